//! Payment display formatting

use crate::models::{PaymentDto, PaymentStatus};

use super::{opt_id, truncate, DisplayOptions};

fn status_icon(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "✓",
        PaymentStatus::Pending => "…",
        PaymentStatus::Failed => "✗",
    }
}

pub fn format_payment_list(payments: &[PaymentDto], options: &DisplayOptions) -> String {
    if payments.is_empty() {
        return "No payments found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:2} {:8}  {:10}  {:24}  {:>12}  {:>7}\n",
        "ID", "", "Status", "Date", "Name", "Amount", "Expense"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for payment in payments {
        let status = payment.status.unwrap_or_default();
        output.push_str(&format!(
            "{:>5}  {:2} {:8}  {:10}  {:24}  {:>12}  {:>7}\n",
            opt_id(payment.id),
            status_icon(status),
            status.to_string(),
            options.date(payment.payment_date),
            truncate(payment.name.as_deref().unwrap_or(""), 24),
            options.money(payment.amount),
            opt_id(payment.linked_expense_id()),
        ));
    }

    output
}

pub fn format_payment_details(payment: &PaymentDto, options: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!("Payment:       {}\n", opt_id(payment.id)));
    output.push_str(&format!(
        "Name:          {}\n",
        payment.name.as_deref().unwrap_or("")
    ));
    output.push_str(&format!("Amount:        {}\n", options.money(payment.amount)));
    output.push_str(&format!(
        "Status:        {}\n",
        payment.status.unwrap_or_default()
    ));
    output.push_str(&format!(
        "Date:          {}\n",
        options.date(payment.payment_date)
    ));

    match &payment.expense {
        Some(expense) => output.push_str(&format!(
            "Expense:       {} ({}, {})\n",
            opt_id(expense.id),
            expense.category.as_deref().unwrap_or(""),
            options.money(expense.amount)
        )),
        None => output.push_str(&format!(
            "Expense:       {}\n",
            opt_id(payment.linked_expense_id())
        )),
    }

    output
}
