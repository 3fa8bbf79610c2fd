//! Savings overview
//!
//! Savings are bucketed by goal: goals mentioning "emergency" or
//! "retirement" (case-insensitive) get their own bucket, everything else is
//! "other".

use crate::models::{Money, SavingDto};

use super::most_recent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsBucket {
    Emergency,
    Retirement,
    Other,
}

impl SavingsBucket {
    pub fn for_goal(goal: Option<&str>) -> Self {
        let goal = goal.unwrap_or_default().to_lowercase();
        if goal.contains("emergency") {
            Self::Emergency
        } else if goal.contains("retirement") {
            Self::Retirement
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone)]
pub struct SavingsOverview {
    pub total: Money,
    pub emergency: Money,
    pub retirement: Money,
    pub other: Money,
    pub recent: Vec<SavingDto>,
}

impl SavingsOverview {
    pub fn generate(savings: &[SavingDto]) -> Self {
        let mut overview = Self {
            total: Money::zero(),
            emergency: Money::zero(),
            retirement: Money::zero(),
            other: Money::zero(),
            recent: most_recent(savings, |s| s.date),
        };

        for saving in savings {
            let amount = saving.amount.unwrap_or_default();
            overview.total += amount;
            match SavingsBucket::for_goal(saving.goal.as_deref()) {
                SavingsBucket::Emergency => overview.emergency += amount,
                SavingsBucket::Retirement => overview.retirement += amount,
                SavingsBucket::Other => overview.other += amount,
            }
        }

        overview
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        output.push_str("Savings Overview\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        for (label, amount) in [
            ("Total", self.total),
            ("Emergency", self.emergency),
            ("Retirement", self.retirement),
            ("Other", self.other),
        ] {
            output.push_str(&format!(
                "{:<12} {:>14}\n",
                label,
                amount.format_with_symbol(currency)
            ));
        }

        if !self.recent.is_empty() {
            output.push_str("\nMost recent:\n");
            for saving in &self.recent {
                output.push_str(&format!(
                    "  {} {:<30} {:>14}\n",
                    saving.date.map(|d| d.to_string()).unwrap_or_default(),
                    saving.goal.as_deref().unwrap_or(""),
                    saving.amount.unwrap_or_default().format_with_symbol(currency)
                ));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(SavingsBucket::for_goal(Some("Emergency fund")), SavingsBucket::Emergency);
        assert_eq!(SavingsBucket::for_goal(Some("early RETIREMENT")), SavingsBucket::Retirement);
        assert_eq!(SavingsBucket::for_goal(Some("Holiday")), SavingsBucket::Other);
        assert_eq!(SavingsBucket::for_goal(None), SavingsBucket::Other);
    }

    #[test]
    fn test_savings_overview() {
        let saving = |goal: &str, cents: i64, date: &str| SavingDto {
            amount: Some(Money::from_cents(cents)),
            goal: Some(goal.into()),
            date: Some(date.parse().unwrap()),
            ..Default::default()
        };
        let overview = SavingsOverview::generate(&[
            saving("Emergency fund", 10000, "2024-01-01"),
            saving("Retirement", 25000, "2024-02-01"),
            saving("Bike", 5000, "2024-03-01"),
            saving("Emergency", 2000, "2024-04-01"),
        ]);

        assert_eq!(overview.total.cents(), 42000);
        assert_eq!(overview.emergency.cents(), 12000);
        assert_eq!(overview.retirement.cents(), 25000);
        assert_eq!(overview.other.cents(), 5000);
        assert_eq!(overview.recent.len(), 3);
        assert_eq!(overview.recent[0].goal.as_deref(), Some("Emergency"));
    }
}
