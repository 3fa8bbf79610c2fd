//! Expense overview

use crate::models::{ExpenseDto, Frequency, Money};

use super::{group_totals, most_recent, monthly_totals, write_groups, write_months};
use super::{GroupTotal, MonthTotal};

#[derive(Debug, Clone)]
pub struct ExpenseOverview {
    pub count: usize,
    pub total: Money,
    pub by_month: Vec<MonthTotal>,
    pub by_category: Vec<GroupTotal>,
    pub recent: Vec<ExpenseDto>,
    /// Monthly expenses plus a twelfth of yearly ones
    pub monthly_commitment: Money,
}

impl ExpenseOverview {
    pub fn generate(expenses: &[ExpenseDto]) -> Self {
        let amount = |e: &ExpenseDto| e.amount.unwrap_or_default();

        let monthly_commitment = expenses
            .iter()
            .map(|e| match e.frequency {
                Some(Frequency::Monthly) => amount(e),
                Some(Frequency::Yearly) => amount(e).div_round(12),
                _ => Money::zero(),
            })
            .sum();

        Self {
            count: expenses.len(),
            total: expenses.iter().map(amount).sum(),
            by_month: monthly_totals(expenses.iter().map(|e| (e.date, amount(e)))),
            by_category: group_totals(expenses.iter().map(|e| {
                let category = e.category.clone().unwrap_or_else(|| "Uncategorized".into());
                (category, amount(e))
            })),
            recent: most_recent(expenses, |e| e.date),
            monthly_commitment,
        }
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Expense Overview\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Expenses: {}\n", self.count));
        output.push_str(&format!("Total: {}\n", self.total.format_with_symbol(currency)));
        output.push_str(&format!(
            "Recurring per month: {}\n",
            self.monthly_commitment.format_with_symbol(currency)
        ));

        write_months(&mut output, &self.by_month, currency);
        write_groups(&mut output, "category", &self.by_category, currency);

        if !self.recent.is_empty() {
            output.push_str("\nMost recent:\n");
            for expense in &self.recent {
                output.push_str(&format!(
                    "  {} {:<30} {:>14}\n",
                    expense.date.map(|d| d.to_string()).unwrap_or_default(),
                    expense.category.as_deref().unwrap_or(""),
                    expense.amount.unwrap_or_default().format_with_symbol(currency)
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category: &str, cents: i64, date: &str, frequency: Frequency) -> ExpenseDto {
        ExpenseDto {
            amount: Some(Money::from_cents(cents)),
            category: Some(category.into()),
            date: Some(date.parse().unwrap()),
            frequency: Some(frequency),
            ..Default::default()
        }
    }

    #[test]
    fn test_expense_overview() {
        let expenses = vec![
            expense("Rent", 90000, "2024-01-01", Frequency::Monthly),
            expense("Insurance", 120000, "2024-02-01", Frequency::Yearly),
            expense("Food", 4250, "2024-02-11", Frequency::OneTime),
            ExpenseDto::default(),
        ];
        let overview = ExpenseOverview::generate(&expenses);

        assert_eq!(overview.count, 4);
        assert_eq!(overview.total.cents(), 214250);
        assert_eq!(overview.monthly_commitment.cents(), 100000);
        assert_eq!(overview.by_month.len(), 2);
        assert_eq!(overview.by_month[1].total.cents(), 124250);
        assert_eq!(overview.by_category[0].name, "Insurance");
        assert_eq!(overview.recent.len(), 3);
        assert_eq!(overview.recent[0].category.as_deref(), Some("Food"));

        let text = overview.format_terminal("$");
        assert!(text.contains("Total: $2142.50"));
        assert!(text.contains("Recurring per month: $1000.00"));
    }

    #[test]
    fn test_empty_overview() {
        let overview = ExpenseOverview::generate(&[]);
        assert_eq!(overview.count, 0);
        assert!(overview.total.is_zero());
        assert!(overview.by_month.is_empty());
        assert!(!overview.format_terminal("$").contains("By month"));
    }

    #[test]
    fn test_extreme_totals_saturate() {
        let huge = expense("Rent", i64::MAX, "2024-01-01", Frequency::Monthly);
        let overview = ExpenseOverview::generate(&[huge.clone(), huge]);

        assert_eq!(overview.total.cents(), i64::MAX);
        assert_eq!(overview.by_month[0].total.cents(), i64::MAX);
        assert_eq!(overview.by_category[0].total.cents(), i64::MAX);
        assert_eq!(overview.monthly_commitment.cents(), i64::MAX);
    }
}
