//! List filtering and sorting
//!
//! `ListFilter` is both the query string accepted by the list endpoints and
//! the filter the client sends; it is applied server-side to any record type
//! implementing `Filterable`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Record fields a list filter can look at
pub trait Filterable {
    fn record_id(&self) -> i64;
    fn record_date(&self) -> Option<NaiveDate>;
    fn record_amount(&self) -> Money;
    /// `needle` is already lower-cased
    fn matches_text(&self, needle: &str) -> bool;
}

/// Ordering of list results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest record first (insertion order)
    #[default]
    Id,
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    fn is_default(&self) -> bool {
        *self == Self::Id
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Id => "id",
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::AmountDesc => "amount_desc",
            Self::AmountAsc => "amount_asc",
        };
        f.write_str(name)
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "id" => Ok(Self::Id),
            "date_desc" | "newest" => Ok(Self::DateDesc),
            "date_asc" | "oldest" => Ok(Self::DateAsc),
            "amount_desc" => Ok(Self::AmountDesc),
            "amount_asc" => Ok(Self::AmountAsc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Filter applied to list endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Inclusive lower date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Exact date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<NaiveDate>,
    /// Case-insensitive substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "SortOrder::is_default")]
    pub sort: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ListFilter {
    fn has_date_bounds(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.on.is_some()
    }

    /// Whether a single record passes the date and text filters
    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        if self.has_date_bounds() {
            let Some(date) = item.record_date() else {
                return false;
            };
            if self.from.is_some_and(|from| date < from)
                || self.to.is_some_and(|to| date > to)
                || self.on.is_some_and(|on| date != on)
            {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => item.matches_text(&needle.to_lowercase()),
            _ => true,
        }
    }

    /// Filter, sort and truncate a list of records
    pub fn apply<T: Filterable>(&self, items: Vec<T>) -> Vec<T> {
        let mut items: Vec<T> = items.into_iter().filter(|i| self.matches(i)).collect();

        match self.sort {
            SortOrder::Id => items.sort_by_key(|i| i.record_id()),
            SortOrder::DateDesc => {
                items.sort_by_key(|i| (Reverse(i.record_date()), Reverse(i.record_id())))
            }
            SortOrder::DateAsc => items.sort_by_key(|i| (i.record_date(), i.record_id())),
            SortOrder::AmountDesc => {
                items.sort_by_key(|i| (Reverse(i.record_amount()), i.record_id()))
            }
            SortOrder::AmountAsc => items.sort_by_key(|i| (i.record_amount(), i.record_id())),
        }

        if let Some(limit) = self.limit {
            items.truncate(limit);
        }
        items
    }
}
