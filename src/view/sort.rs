//! Sort stage and the tri-state column toggle

use crate::core::payment::Payment;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    OrderAmount,
    CreatedAt,
    CompletedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::OrderAmount => "orderAmount",
            SortField::CreatedAt => "createdAt",
            SortField::CompletedAt => "completedAt",
        }
    }

    /// Total order of two payments on this column
    pub fn compare(&self, a: &Payment, b: &Payment) -> Ordering {
        match self {
            SortField::OrderAmount => a.order_amount.total_cmp(&b.order_amount),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::CompletedAt => a.completed_at.cmp(&b.completed_at),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orderAmount" => Ok(SortField::OrderAmount),
            "createdAt" => Ok(SortField::CreatedAt),
            "completedAt" => Ok(SortField::CompletedAt),
            other => Err(format!(
                "unknown sort field '{}', expected orderAmount, createdAt or completedAt",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort order '{}', expected asc or desc", other)),
        }
    }
}

/// Sort selection of the payment table
///
/// Clicking a column header drives [`next`](SortState::next):
///
/// ```text
/// Neutral --click X--> Asc(X) --click X--> Desc(X) --click X--> Neutral
/// Asc(Y) / Desc(Y) --click X--> Asc(X)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortState {
    /// Store order, newest first
    #[default]
    Neutral,
    Active {
        field: SortField,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn ascending(field: SortField) -> Self {
        SortState::Active {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        SortState::Active {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// State after the user clicks `clicked`
    pub fn next(self, clicked: SortField) -> Self {
        match self {
            SortState::Active {
                field,
                direction: SortDirection::Ascending,
            } if field == clicked => SortState::descending(clicked),
            SortState::Active {
                field,
                direction: SortDirection::Descending,
            } if field == clicked => SortState::Neutral,
            _ => SortState::ascending(clicked),
        }
    }

    /// Selected column, `None` when neutral
    pub fn field(&self) -> Option<SortField> {
        match self {
            SortState::Neutral => None,
            SortState::Active { field, .. } => Some(*field),
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortState::Neutral => None,
            SortState::Active { direction, .. } => Some(*direction),
        }
    }
}

/// Stable sort of `rows` according to `sort`
///
/// Equal keys keep their input order in both directions.
pub fn sort_payments<'a>(mut rows: Vec<&'a Payment>, sort: SortState) -> Vec<&'a Payment> {
    if let SortState::Active { field, direction } = sort {
        match direction {
            SortDirection::Ascending => rows.sort_by(|a, b| field.compare(a, b)),
            SortDirection::Descending => rows.sort_by(|a, b| field.compare(b, a)),
        }
    }
    rows
}
