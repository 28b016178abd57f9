//! Search and date-range filter stages
//!
//! Both stages only drop rows; surviving rows keep their relative order.

use crate::core::payment::Payment;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Whether `payment` matches a table search
///
/// `needle` must already be lowercase. Unlike the store search, the table
/// does not match on scheme.
pub fn matches_search(payment: &Payment, needle: &str) -> bool {
    payment.identification.to_lowercase().contains(needle)
        || payment.recipient.to_lowercase().contains(needle)
        || payment.status.as_str().contains(needle)
}

/// Keep rows matching `query`; a blank query keeps everything
pub fn filter_by_search<'a>(rows: Vec<&'a Payment>, query: &str) -> Vec<&'a Payment> {
    if query.trim().is_empty() {
        return rows;
    }

    let needle = query.to_lowercase();
    rows.into_iter()
        .filter(|p| matches_search(p, &needle))
        .collect()
}

/// `from` is after `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("date range starts on {from} but ends on {to}")]
pub struct InvalidDateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Inclusive range of calendar dates; a missing bound is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, InvalidDateRange> {
        match (from, to) {
            (Some(from), Some(to)) if from > to => Err(InvalidDateRange { from, to }),
            _ => Ok(Self { from, to }),
        }
    }

    /// Range with no bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Keep rows created within `range`, comparing calendar dates only
pub fn filter_by_date_range<'a>(rows: Vec<&'a Payment>, range: &DateRange) -> Vec<&'a Payment> {
    if range.is_unbounded() {
        return rows;
    }

    rows.into_iter()
        .filter(|p| range.contains(p.created_on()))
        .collect()
}
