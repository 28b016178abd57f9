//! View-state engine for the payment table
//!
//! The visible rows are derived from the full payment list by a fixed
//! pipeline: sort, then search, then date range, then paginate. Every stage
//! is a pure function over borrowed payments.

pub mod filter;
pub mod sort;
pub mod state;

pub use filter::{DateRange, InvalidDateRange, filter_by_date_range, filter_by_search};
pub use sort::{SortDirection, SortField, SortState, sort_payments};
pub use state::{NO_DATA_LABEL, PaymentView, ViewState, date_range_label, paginate};
