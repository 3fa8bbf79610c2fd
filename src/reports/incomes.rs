//! Income overview

use crate::models::{IncomeDto, Money};

use super::{group_totals, most_recent, monthly_totals, write_groups, write_months};
use super::{GroupTotal, MonthTotal};

#[derive(Debug, Clone)]
pub struct IncomeOverview {
    pub count: usize,
    pub total: Money,
    pub by_source: Vec<GroupTotal>,
    pub by_month: Vec<MonthTotal>,
    pub recent: Vec<IncomeDto>,
}

impl IncomeOverview {
    pub fn generate(incomes: &[IncomeDto]) -> Self {
        let amount = |i: &IncomeDto| i.amount.unwrap_or_default();

        Self {
            count: incomes.len(),
            total: incomes.iter().map(amount).sum(),
            by_source: group_totals(incomes.iter().map(|i| {
                let source = i.source.clone().unwrap_or_else(|| "Unknown".into());
                (source, amount(i))
            })),
            by_month: monthly_totals(incomes.iter().map(|i| (i.date, amount(i)))),
            recent: most_recent(incomes, |i| i.date),
        }
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Income Overview\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Incomes: {}\n", self.count));
        output.push_str(&format!("Total: {}\n", self.total.format_with_symbol(currency)));

        write_groups(&mut output, "source", &self.by_source, currency);
        write_months(&mut output, &self.by_month, currency);

        if !self.recent.is_empty() {
            output.push_str("\nMost recent:\n");
            for income in &self.recent {
                output.push_str(&format!(
                    "  {} {:<30} {:>14}\n",
                    income.date.map(|d| d.to_string()).unwrap_or_default(),
                    income.source.as_deref().unwrap_or(""),
                    income.amount.unwrap_or_default().format_with_symbol(currency)
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
    fn test_income_overview() {
        let income = |source: &str, cents: i64, date: &str| IncomeDto {
            amount: Some(Money::from_cents(cents)),
            source: Some(source.into()),
            date: Some(date.parse().unwrap()),
            ..Default::default()
        };
        let incomes = vec![
            income("Salary", 300000, "2024-01-31"),
            income("Salary", 300000, "2024-02-29"),
            income("Freelance", 45000, "2024-02-10"),
        ];
        let overview = IncomeOverview::generate(&incomes);

        assert_eq!(overview.total.cents(), 645000);
        assert_eq!(overview.by_source[0].name, "Salary");
        assert_eq!(overview.by_source[0].count, 2);
        assert_eq!(overview.by_month[1].label, "Feb");
        assert_eq!(overview.recent[0].source.as_deref(), Some("Salary"));
        assert!(overview.format_terminal("€").contains("Total: €6450.00"));
    }
}
