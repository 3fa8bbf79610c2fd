//! Reports module for fintrack
//!
//! Overviews computed from the DTO lists the client fetches: per-resource
//! summaries (expenses, incomes, payments, savings) and a dashboard that
//! combines them. Amounts missing from a record count as zero; records
//! without a date are left out of per-month and "most recent" figures.

pub mod dashboard;
pub mod expenses;
pub mod incomes;
pub mod payments;
pub mod savings;

pub use dashboard::Dashboard;
pub use expenses::ExpenseOverview;
pub use incomes::IncomeOverview;
pub use payments::PaymentOverview;
pub use savings::SavingsOverview;

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::Money;

/// Number of records listed under "most recent"
pub const RECENT_COUNT: usize = 3;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Total for one calendar month, summed across years
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    /// 1..=12
    pub month: u32,
    pub label: &'static str,
    pub total: Money,
}

/// Total for one category, source or goal
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub name: String,
    pub total: Money,
    pub count: usize,
}

/// Per-month totals ordered Jan..Dec, empty months omitted
pub(crate) fn monthly_totals<I>(entries: I) -> Vec<MonthTotal>
where
    I: IntoIterator<Item = (Option<NaiveDate>, Money)>,
{
    let mut totals = [Money::zero(); 12];
    let mut seen = [false; 12];
    for (date, amount) in entries {
        let Some(date) = date else { continue };
        let index = date.month0() as usize;
        totals[index] += amount;
        seen[index] = true;
    }

    (0..12)
        .filter(|&i| seen[i] && !totals[i].is_zero())
        .map(|i| MonthTotal {
            month: i as u32 + 1,
            label: MONTH_NAMES[i],
            total: totals[i],
        })
        .collect()
}

/// Totals by name, largest first (ties by name)
pub(crate) fn group_totals<I>(entries: I) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = (String, Money)>,
{
    let mut groups: HashMap<String, GroupTotal> = HashMap::new();
    for (name, amount) in entries {
        let group = groups.entry(name.clone()).or_insert_with(|| GroupTotal {
            name,
            total: Money::zero(),
            count: 0,
        });
        group.total += amount;
        group.count += 1;
    }

    let mut groups: Vec<GroupTotal> = groups.into_values().collect();
    groups.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    groups
}

/// The newest `RECENT_COUNT` dated items, newest first
pub(crate) fn most_recent<T, F>(items: &[T], date_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut dated: Vec<(NaiveDate, usize)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| date_of(item).map(|d| (d, i)))
        .collect();
    // Later entries win ties: they were created later
    dated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
    dated
        .into_iter()
        .take(RECENT_COUNT)
        .map(|(_, i)| items[i].clone())
        .collect()
}

/// Share of `part` in `whole` as a percentage, 0 when `whole` is not positive
pub(crate) fn percentage(part: Money, whole: Money) -> f64 {
    if !whole.is_positive() {
        return 0.0;
    }
    part.cents() as f64 / whole.cents() as f64 * 100.0
}

pub(crate) fn write_months(output: &mut String, months: &[MonthTotal], currency: &str) {
    if months.is_empty() {
        return;
    }
    output.push_str("\nBy month:\n");
    for month in months {
        output.push_str(&format!(
            "  {:<6} {:>14}\n",
            month.label,
            month.total.format_with_symbol(currency)
        ));
    }
}

pub(crate) fn write_groups(output: &mut String, title: &str, groups: &[GroupTotal], currency: &str) {
    if groups.is_empty() {
        return;
    }
    output.push_str(&format!("\nBy {}:\n", title));
    for group in groups {
        output.push_str(&format!(
            "  {:<30} {:>14} {:>6}\n",
            group.name,
            group.total.format_with_symbol(currency),
            group.count
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_monthly_totals_ordered_and_sparse() {
        let months = monthly_totals(vec![
            (date("2024-03-10"), Money::from_cents(1000)),
            (date("2023-03-01"), Money::from_cents(500)),
            (date("2024-01-15"), Money::from_cents(200)),
            (None, Money::from_cents(9999)),
        ]);

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].label, "Jan");
        assert_eq!(months[1].label, "Mar");
        assert_eq!(months[1].total.cents(), 1500);
    }

    #[test]
    fn test_group_totals_descending() {
        let groups = group_totals(vec![
            ("Food".to_string(), Money::from_cents(300)),
            ("Rent".to_string(), Money::from_cents(9000)),
            ("Food".to_string(), Money::from_cents(450)),
        ]);

        assert_eq!(groups[0].name, "Rent");
        assert_eq!(groups[1].total.cents(), 750);
        assert_eq!(groups[1].count, 2);
    }

    #[test]
    fn test_most_recent_skips_undated() {
        let items = vec![
            ("a", date("2024-01-01")),
            ("b", None),
            ("c", date("2024-05-01")),
            ("d", date("2024-03-01")),
            ("e", date("2024-05-01")),
        ];
        let recent = most_recent(&items, |i| i.1);
        let names: Vec<&str> = recent.iter().map(|i| i.0).collect();
        assert_eq!(names, vec!["e", "c", "d"]);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(Money::from_cents(25), Money::from_cents(100)), 25.0);
        assert_eq!(percentage(Money::from_cents(25), Money::zero()), 0.0);
    }
}
