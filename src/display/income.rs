//! Income display formatting

use crate::models::IncomeDto;

use super::{opt_id, truncate, DisplayOptions};

pub fn format_income_list(incomes: &[IncomeDto], options: &DisplayOptions) -> String {
    if incomes.is_empty() {
        return "No incomes found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:10}  {:24}  {:>12}  {:9}\n",
        "ID", "Date", "Source", "Amount", "Frequency"
    ));
    output.push_str(&"-".repeat(68));
    output.push('\n');

    for income in incomes {
        output.push_str(&format!(
            "{:>5}  {:10}  {:24}  {:>12}  {:9}\n",
            opt_id(income.id),
            options.date(income.date),
            truncate(income.source.as_deref().unwrap_or(""), 24),
            options.money(income.amount),
            income.frequency.unwrap_or_default().to_string(),
        ));
    }

    output
}

pub fn format_income_details(income: &IncomeDto, options: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income:        {}\n", opt_id(income.id)));
    output.push_str(&format!(
        "Source:        {}\n",
        income.source.as_deref().unwrap_or("")
    ));
    output.push_str(&format!("Amount:        {}\n", options.money(income.amount)));
    output.push_str(&format!("Date:          {}\n", options.date(income.date)));
    output.push_str(&format!(
        "Frequency:     {}\n",
        income.frequency.unwrap_or_default()
    ));
    if income.end_date.is_some() {
        output.push_str(&format!("Ends:          {}\n", options.date(income.end_date)));
    }
    if let Some(description) = income.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("Description:   {}\n", description));
    }
    output
}
