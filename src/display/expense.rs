//! Expense display formatting

use crate::models::ExpenseDto;

use super::{opt_id, truncate, DisplayOptions};

pub fn format_expense_list(expenses: &[ExpenseDto], options: &DisplayOptions) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:10}  {:20}  {:>12}  {:9}  {:8}\n",
        "ID", "Date", "Category", "Amount", "Frequency", "Method"
    ));
    output.push_str(&"-".repeat(75));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{:>5}  {:10}  {:20}  {:>12}  {:9}  {:8}\n",
            opt_id(expense.id),
            options.date(expense.date),
            truncate(expense.category.as_deref().unwrap_or(""), 20),
            options.money(expense.amount),
            expense.frequency.unwrap_or_default().to_string(),
            expense
                .payment_method
                .map(|m| m.to_string())
                .unwrap_or_default(),
        ));
    }

    output
}

pub fn format_expense_details(expense: &ExpenseDto, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:       {}\n", opt_id(expense.id)));
    output.push_str(&format!(
        "Category:      {}\n",
        expense.category.as_deref().unwrap_or("")
    ));
    output.push_str(&format!("Amount:        {}\n", options.money(expense.amount)));
    output.push_str(&format!("Date:          {}\n", options.date(expense.date)));
    output.push_str(&format!(
        "Frequency:     {}\n",
        expense.frequency.unwrap_or_default()
    ));
    if let Some(method) = expense.payment_method {
        output.push_str(&format!("Paid by:       {}\n", method));
    }
    if expense.frequency.is_some_and(|f| f.is_recurring()) {
        if expense.end_date.is_some() {
            output.push_str(&format!("Ends:          {}\n", options.date(expense.end_date)));
        }
        if expense.next_due_date.is_some() {
            output.push_str(&format!(
                "Next due:      {}\n",
                options.date(expense.next_due_date)
            ));
        }
    }
    if let Some(description) = expense.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("Description:   {}\n", description));
    }

    output
}
