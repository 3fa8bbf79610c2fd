//! Saving display formatting

use crate::models::SavingDto;
use crate::reports::savings::SavingsBucket;

use super::{opt_id, truncate, DisplayOptions};

fn bucket_label(saving: &SavingDto) -> &'static str {
    match SavingsBucket::for_goal(saving.goal.as_deref()) {
        SavingsBucket::Emergency => "emergency",
        SavingsBucket::Retirement => "retirement",
        SavingsBucket::Other => "other",
    }
}

pub fn format_saving_list(savings: &[SavingDto], options: &DisplayOptions) -> String {
    if savings.is_empty() {
        return "No savings found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:10}  {:28}  {:>12}  {:10}\n",
        "ID", "Date", "Goal", "Amount", "Bucket"
    ));
    output.push_str(&"-".repeat(73));
    output.push('\n');

    for saving in savings {
        output.push_str(&format!(
            "{:>5}  {:10}  {:28}  {:>12}  {:10}\n",
            opt_id(saving.id),
            options.date(saving.date),
            truncate(saving.goal.as_deref().unwrap_or(""), 28),
            options.money(saving.amount),
            bucket_label(saving),
        ));
    }

    output
}

pub fn format_saving_details(saving: &SavingDto, options: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!("Saving:        {}\n", opt_id(saving.id)));
    output.push_str(&format!(
        "Goal:          {} ({})\n",
        saving.goal.as_deref().unwrap_or(""),
        bucket_label(saving)
    ));
    output.push_str(&format!("Amount:        {}\n", options.money(saving.amount)));
    output.push_str(&format!("Date:          {}\n", options.date(saving.date)));
    if let Some(description) = saving.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("Description:   {}\n", description));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_saving_bucket_shown() {
        let saving = SavingDto {
            goal: Some("Retirement account".into()),
            amount: Some(Money::from_cents(100000)),
            ..Default::default()
        };
        let details = format_saving_details(&saving, &DisplayOptions::default());
        assert!(details.contains("Retirement account (retirement)"));
        assert!(details.contains("Date:          -"));
    }
}
