//! Table view state and the derivation pipeline

use crate::core::error::RequestError;
use crate::core::format::format_short_date;
use crate::core::payment::Payment;
use crate::core::query::{ListQuery, PAGE_SIZE, PaginationMeta};
use crate::view::filter::{DateRange, filter_by_date_range, filter_by_search};
use crate::view::sort::{SortDirection, SortField, SortState, sort_payments};
use chrono::NaiveDate;

/// Label shown in place of a date range when there are no payments
pub const NO_DATA_LABEL: &str = "Sin datos";

/// Everything the user controls on the payment table
///
/// Changing the query, the sort or the date range resets the page to 1.
/// [`set_page`](Self::set_page) does not clamp; call
/// [`clamp_page`](Self::clamp_page) with the derived page count for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    query: String,
    sort: SortState,
    range: DateRange,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort: SortState::Neutral,
            range: DateRange::unbounded(),
            page: 1,
        }
    }
}

/// Rows of the current page plus pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentView<'a> {
    pub rows: Vec<&'a Payment>,
    pub pagination: PaginationMeta,
}

impl PaymentView<'_> {
    pub fn into_owned(self) -> Vec<Payment> {
        self.rows.into_iter().cloned().collect()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Advance the sort for a click on `field`'s header
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = self.sort.next(field);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.page = 1;
    }

    /// Replace both bounds
    pub fn set_date_range(&mut self, range: DateRange) {
        self.range = range;
        self.page = 1;
    }

    /// Change the lower bound, keeping the upper one
    ///
    /// Returns `false` and leaves the state untouched when the new bound would
    /// end up after the upper bound.
    pub fn set_date_from(&mut self, from: Option<NaiveDate>) -> bool {
        self.apply_range(DateRange::new(from, self.range.to()))
    }

    /// Change the upper bound, keeping the lower one
    pub fn set_date_to(&mut self, to: Option<NaiveDate>) -> bool {
        self.apply_range(DateRange::new(self.range.from(), to))
    }

    pub fn clear_date_range(&mut self) {
        self.set_date_range(DateRange::unbounded());
    }

    /// Jump to `page`, never below 1
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Pull the page back inside `1..=total_pages`
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    fn apply_range<E>(&mut self, range: Result<DateRange, E>) -> bool {
        match range {
            Ok(range) => {
                self.set_date_range(range);
                true
            }
            Err(_) => false,
        }
    }

    /// Sorted, searched and date-filtered rows, before pagination
    pub fn filtered<'a>(&self, payments: &'a [Payment]) -> Vec<&'a Payment> {
        let rows = sort_payments(payments.iter().collect(), self.sort);
        let rows = filter_by_search(rows, &self.query);
        filter_by_date_range(rows, &self.range)
    }

    /// Run the pipeline sort, search, date range, paginate over `payments`
    pub fn derive<'a>(&self, payments: &'a [Payment]) -> PaymentView<'a> {
        let filtered = self.filtered(payments);
        let pagination = PaginationMeta::new(self.page, PAGE_SIZE, filtered.len());
        let rows = paginate(&filtered, self.page, PAGE_SIZE);

        PaymentView { rows, pagination }
    }

    /// Build a view state from HTTP query parameters
    pub fn from_query(query: &ListQuery) -> Result<Self, RequestError> {
        let mut state = Self::new();

        if let Some(q) = &query.q {
            state.set_query(q.as_str());
        }

        if let Some(field) = &query.sort {
            let field: SortField = field.parse().map_err(|message| RequestError::InvalidQuery {
                param: "sort".to_string(),
                message,
            })?;
            let direction = match &query.order {
                Some(order) => order.parse().map_err(|message| RequestError::InvalidQuery {
                    param: "order".to_string(),
                    message,
                })?,
                None => SortDirection::Ascending,
            };
            state.set_sort(SortState::Active { field, direction });
        }

        let from = parse_date("from", query.from.as_deref())?;
        let to = parse_date("to", query.to.as_deref())?;
        let range = DateRange::new(from, to).map_err(|e| RequestError::InvalidQuery {
            param: "from".to_string(),
            message: e.to_string(),
        })?;
        state.set_date_range(range);

        state.set_page(query.page());
        Ok(state)
    }
}

fn parse_date(param: &str, value: Option<&str>) -> Result<Option<NaiveDate>, RequestError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| RequestError::InvalidQuery {
                param: param.to_string(),
                message: format!("expected a YYYY-MM-DD date, got '{}'", raw),
            }),
    }
}

/// Slice out page `page` (1-based) of `rows`
///
/// A page past the end yields no rows.
pub fn paginate<'a>(rows: &[&'a Payment], page: usize, page_size: usize) -> Vec<&'a Payment> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    rows.iter().skip(start).take(page_size).copied().collect()
}

/// Span of creation dates in `payments`, e.g. `"sept 15, 2024 - dic 15, 2024"`
pub fn date_range_label(payments: &[Payment]) -> String {
    let earliest = payments.iter().map(|p| p.created_at).min();
    let latest = payments.iter().map(|p| p.created_at).max();

    match (earliest, latest) {
        (Some(earliest), Some(latest)) => format!(
            "{} - {}",
            format_short_date(earliest),
            format_short_date(latest)
        ),
        _ => NO_DATA_LABEL.to_string(),
    }
}
