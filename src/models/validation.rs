//! Field validation helpers
//!
//! Records are validated as a whole: every violated rule adds a message and
//! the caller receives all of them at once as `FinanceError::InvalidFields`.

use chrono::NaiveDate;

use super::money::Money;
use crate::error::{FinanceError, FinanceResult};

/// Largest amount a single record may carry (one billion)
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// Collector for field violations
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Require a value to be present
    pub fn require<T>(&mut self, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.push(message);
        }
        value
    }

    /// Require a strictly positive amount
    pub fn positive_amount(&mut self, value: Option<Money>) -> Option<Money> {
        match value {
            None => {
                self.push("Amount cannot be null");
                None
            }
            Some(amount) if !amount.is_positive() => {
                self.push("Amount must be greater than 0");
                None
            }
            Some(amount) if amount > MAX_AMOUNT => {
                self.push(format!(
                    "Amount cannot exceed {}",
                    MAX_AMOUNT.format_with_symbol("")
                ));
                None
            }
            Some(amount) => Some(amount),
        }
    }

    /// Require non-blank text of at most `max_len` characters; the result is trimmed
    pub fn text(&mut self, value: Option<String>, field: &str, max_len: usize) -> Option<String> {
        let trimmed = value.map(|v| v.trim().to_string()).unwrap_or_default();
        if trimmed.is_empty() {
            self.push(format!("{} cannot be empty", field));
            return None;
        }
        if trimmed.chars().count() > max_len {
            self.push(format!("{} cannot exceed {} characters", field, max_len));
            return None;
        }
        Some(trimmed)
    }

    /// Optional text of at most `max_len` characters; missing becomes empty
    pub fn optional_text(&mut self, value: Option<String>, field: &str, max_len: usize) -> String {
        let text = value.map(|v| v.trim().to_string()).unwrap_or_default();
        if text.chars().count() > max_len {
            self.push(format!("{} cannot exceed {} characters", field, max_len));
        }
        text
    }

    /// Require a date that is not after `today`
    pub fn past_or_present(
        &mut self,
        date: Option<NaiveDate>,
        today: NaiveDate,
        future_message: &str,
    ) -> Option<NaiveDate> {
        match date {
            None => {
                self.push("Date cannot be null");
                None
            }
            Some(d) if d > today => {
                self.push(future_message);
                None
            }
            Some(d) => Some(d),
        }
    }

    /// Check that `later` is not before `earlier` when both are present
    pub fn not_before(
        &mut self,
        later: Option<NaiveDate>,
        earlier: Option<NaiveDate>,
        message: &str,
    ) {
        if let (Some(later), Some(earlier)) = (later, earlier) {
            if later < earlier {
                self.push(message);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Turn the collected violations into a result
    pub fn finish(self) -> FinanceResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(FinanceError::InvalidFields(self.0))
        }
    }
}

/// Minimal shape check for an email address
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_collects_all_violations() {
        let mut v = Violations::new();
        v.positive_amount(Some(Money::from_cents(-1)));
        v.text(Some("   ".into()), "Category", 50);
        v.past_or_present(Some(day("2030-01-01")), day("2025-01-01"), "Date cannot be in the future");

        assert_eq!(
            v.messages(),
            &[
                "Amount must be greater than 0".to_string(),
                "Category cannot be empty".to_string(),
                "Date cannot be in the future".to_string(),
            ]
        );
        assert!(matches!(v.finish(), Err(FinanceError::InvalidFields(e)) if e.len() == 3));
    }

    #[test]
    fn test_amount_upper_bound() {
        let mut v = Violations::new();
        assert_eq!(v.positive_amount(Some(MAX_AMOUNT)), Some(MAX_AMOUNT));
        assert!(v.positive_amount(Some(Money::from_cents(MAX_AMOUNT.cents() + 1))).is_none());
        assert!(v.positive_amount(Some(Money::from_cents(i64::MAX))).is_none());
        assert_eq!(
            v.messages(),
            &[
                "Amount cannot exceed 1000000000.00".to_string(),
                "Amount cannot exceed 1000000000.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_text_trims_and_limits() {
        let mut v = Violations::new();
        assert_eq!(v.text(Some("  Food ".into()), "Category", 50).as_deref(), Some("Food"));
        assert!(v.text(Some("x".repeat(51)), "Category", 50).is_none());
        assert_eq!(v.messages(), &["Category cannot exceed 50 characters".to_string()]);
    }

    #[test]
    fn test_not_before() {
        let mut v = Violations::new();
        v.not_before(Some(day("2025-01-01")), Some(day("2025-02-01")), "too early");
        v.not_before(None, Some(day("2025-02-01")), "ignored");
        v.not_before(Some(day("2025-02-01")), Some(day("2025-02-01")), "same day ok");
        assert_eq!(v.messages(), &["too early".to_string()]);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana@@example.com"));
        assert!(!is_valid_email("ana @example.com"));
    }
}
