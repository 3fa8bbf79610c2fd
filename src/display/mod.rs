//! Display formatting for terminal output
//!
//! List tables and detail views for every resource, formatted with the
//! currency symbol and date format from the settings.

pub mod activity;
pub mod expense;
pub mod income;
pub mod payment;
pub mod saving;
pub mod user;

pub use activity::format_activity_feed;
pub use expense::{format_expense_details, format_expense_list};
pub use income::{format_income_details, format_income_list};
pub use payment::{format_payment_details, format_payment_list};
pub use saving::{format_saving_details, format_saving_list};
pub use user::format_user_details;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

/// Currency and date preferences used when rendering
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency: String,
    pub date_format: String,
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }

    pub fn money(&self, amount: Option<Money>) -> String {
        match amount {
            Some(amount) => amount.format_with_symbol(&self.currency),
            None => "-".into(),
        }
    }

    pub fn date(&self, date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => date.format(&self.date_format).to_string(),
            None => "-".into(),
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency: "$".into(),
            date_format: "%Y-%m-%d".into(),
        }
    }
}

/// Truncate to `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

pub(crate) fn opt_id<I: std::fmt::Display>(id: Option<I>) -> String {
    id.map(|i| i.to_string()).unwrap_or_else(|| "-".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long category", 10), "a rathe...");
        assert_eq!(truncate("ăîșțâăîșțâăî", 8), "ăîșțâ...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn test_options_formatting() {
        let options = DisplayOptions {
            currency: "€".into(),
            date_format: "%d.%m.%Y".into(),
        };
        assert_eq!(options.money(Some(Money::from_cents(1050))), "€10.50");
        assert_eq!(options.money(None), "-");
        assert_eq!(options.date("2024-03-09".parse().ok()), "09.03.2024");
    }
}
