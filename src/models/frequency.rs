//! Recurrence of expenses and incomes

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often an expense or income recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    #[default]
    OneTime,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Months between two occurrences, `None` for one-time entries
    pub fn step_months(&self) -> Option<u32> {
        match self {
            Self::OneTime => None,
            Self::Monthly => Some(1),
            Self::Yearly => Some(12),
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.step_months().is_some()
    }

    /// First occurrence after `start` that falls on or after `today`
    ///
    /// Occurrences are counted from `start` itself so that a series started on
    /// the 31st lands on the last day of shorter months without drifting.
    /// Returns `None` for one-time entries and when the next occurrence would
    /// fall after `end`.
    pub fn next_occurrence(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        let step = self.step_months()?;

        let elapsed_months = (today.year() - start.year()) * 12 + today.month() as i32
            - start.month() as i32;
        let mut k = (elapsed_months.max(0) as u32 / step).max(1);

        loop {
            let candidate = start.checked_add_months(Months::new(k * step))?;
            if candidate >= today {
                return match end {
                    Some(end) if candidate > end => None,
                    _ => Some(candidate),
                };
            }
            k += 1;
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneTime => write!(f, "One-time"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "onetime" | "once" => Ok(Self::OneTime),
            "monthly" => Ok(Self::Monthly),
            "yearly" | "annual" => Ok(Self::Yearly),
            other => Err(format!("unknown frequency '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Frequency::OneTime).unwrap(), "\"ONE_TIME\"");
        let f: Frequency = serde_json::from_str("\"YEARLY\"").unwrap();
        assert_eq!(f, Frequency::Yearly);
        assert!(serde_json::from_str::<Frequency>("\"WEEKLY\"").is_err());
    }

    #[test]
    fn test_parse_cli_names() {
        assert_eq!("one-time".parse::<Frequency>().unwrap(), Frequency::OneTime);
        assert_eq!("MONTHLY".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!("weekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_one_time_has_no_next_occurrence() {
        assert_eq!(
            Frequency::OneTime.next_occurrence(day("2025-01-10"), None, day("2025-01-01")),
            None
        );
    }

    #[test]
    fn test_monthly_next_occurrence() {
        let start = day("2025-01-15");
        assert_eq!(
            Frequency::Monthly.next_occurrence(start, None, day("2025-01-20")),
            Some(day("2025-02-15"))
        );
        assert_eq!(
            Frequency::Monthly.next_occurrence(start, None, day("2025-04-15")),
            Some(day("2025-04-15"))
        );
        assert_eq!(
            Frequency::Monthly.next_occurrence(start, None, day("2025-04-16")),
            Some(day("2025-05-15"))
        );
    }

    #[test]
    fn test_month_end_does_not_drift() {
        let start = day("2025-01-31");
        assert_eq!(
            Frequency::Monthly.next_occurrence(start, None, day("2025-02-01")),
            Some(day("2025-02-28"))
        );
        assert_eq!(
            Frequency::Monthly.next_occurrence(start, None, day("2025-03-01")),
            Some(day("2025-03-31"))
        );
    }

    #[test]
    fn test_yearly_and_end_date() {
        let start = day("2023-06-01");
        assert_eq!(
            Frequency::Yearly.next_occurrence(start, None, day("2025-01-01")),
            Some(day("2025-06-01"))
        );
        assert_eq!(
            Frequency::Yearly.next_occurrence(start, Some(day("2025-05-31")), day("2025-01-01")),
            None
        );
    }
}
