//! Dashboard summary across incomes, expenses and savings

use crate::models::{ExpenseDto, IncomeDto, Money, SavingDto};

use super::percentage;

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_savings: Money,
    /// Income minus expenses
    pub net_cash_flow: Money,
    /// Savings as a percentage of income, 0 without income
    pub savings_rate: f64,
}

impl Dashboard {
    pub fn generate(incomes: &[IncomeDto], expenses: &[ExpenseDto], savings: &[SavingDto]) -> Self {
        let total_income: Money = incomes.iter().map(|i| i.amount.unwrap_or_default()).sum();
        let total_expenses: Money = expenses.iter().map(|e| e.amount.unwrap_or_default()).sum();
        let total_savings: Money = savings.iter().map(|s| s.amount.unwrap_or_default()).sum();

        Self {
            total_income,
            total_expenses,
            total_savings,
            net_cash_flow: total_income - total_expenses,
            savings_rate: percentage(total_savings, total_income),
        }
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>14}\n",
            "Income",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<16} {:>14}\n",
            "Expenses",
            self.total_expenses.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<16} {:>14}\n",
            "Savings",
            self.total_savings.format_with_symbol(currency)
        ));
        output.push_str(&"-".repeat(31));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>14}\n",
            "Net cash flow",
            self.net_cash_flow.format_with_symbol(currency)
        ));
        output.push_str(&format!("{:<16} {:>13.1}%\n", "Savings rate", self.savings_rate));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_totals() {
        let incomes = vec![IncomeDto {
            amount: Some(Money::from_cents(400000)),
            ..Default::default()
        }];
        let expenses = vec![
            ExpenseDto {
                amount: Some(Money::from_cents(250000)),
                ..Default::default()
            },
            ExpenseDto::default(),
        ];
        let savings = vec![SavingDto {
            amount: Some(Money::from_cents(60000)),
            ..Default::default()
        }];

        let dashboard = Dashboard::generate(&incomes, &expenses, &savings);
        assert_eq!(dashboard.net_cash_flow.cents(), 150000);
        assert_eq!(dashboard.savings_rate, 15.0);

        let text = dashboard.format_terminal("$");
        assert!(text.contains("Savings rate"));
        assert!(text.contains("15.0%"));
    }

    #[test]
    fn test_negative_cash_flow_without_income() {
        let expenses = vec![ExpenseDto {
            amount: Some(Money::from_cents(1000)),
            ..Default::default()
        }];
        let dashboard = Dashboard::generate(&[], &expenses, &[]);
        assert_eq!(dashboard.net_cash_flow.cents(), -1000);
        assert_eq!(dashboard.savings_rate, 0.0);
        assert!(dashboard.format_terminal("$").contains("-$10.00"));
    }
}
