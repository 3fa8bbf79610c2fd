//! Payment status overview

use crate::models::{Money, PaymentDto, PaymentStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentOverview {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub failed: usize,
    pub paid_amount: Money,
    /// Amount of payments not yet paid (pending or failed)
    pub outstanding_amount: Money,
}

impl PaymentOverview {
    /// A payment without a status counts as pending
    pub fn generate(payments: &[PaymentDto]) -> Self {
        let mut overview = Self {
            total: payments.len(),
            ..Default::default()
        };

        for payment in payments {
            let amount = payment.amount.unwrap_or_default();
            match payment.status.unwrap_or_default() {
                PaymentStatus::Paid => {
                    overview.paid += 1;
                    overview.paid_amount += amount;
                }
                PaymentStatus::Pending => {
                    overview.pending += 1;
                    overview.outstanding_amount += amount;
                }
                PaymentStatus::Failed => {
                    overview.failed += 1;
                    overview.outstanding_amount += amount;
                }
            }
        }

        overview
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        output.push_str("Payment Overview\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<14} {:>6}\n", "Payments", self.total));
        output.push_str(&format!("{:<14} {:>6}\n", "Paid", self.paid));
        output.push_str(&format!("{:<14} {:>6}\n", "Pending", self.pending));
        output.push_str(&format!("{:<14} {:>6}\n", "Failed", self.failed));
        output.push_str(&format!(
            "\nPaid amount: {}\nOutstanding: {}\n",
            self.paid_amount.format_with_symbol(currency),
            self.outstanding_amount.format_with_symbol(currency)
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts() {
        let payment = |cents: i64, status: Option<PaymentStatus>| PaymentDto {
            amount: Some(Money::from_cents(cents)),
            status,
            ..Default::default()
        };
        let overview = PaymentOverview::generate(&[
            payment(1000, Some(PaymentStatus::Paid)),
            payment(2000, Some(PaymentStatus::Pending)),
            payment(500, None),
            payment(700, Some(PaymentStatus::Failed)),
        ]);

        assert_eq!(overview.total, 4);
        assert_eq!((overview.paid, overview.pending, overview.failed), (1, 2, 1));
        assert_eq!(overview.paid_amount.cents(), 1000);
        assert_eq!(overview.outstanding_amount.cents(), 3200);
    }
}
