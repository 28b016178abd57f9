//! Presentation-side controller of the payments page
//!
//! [`PaymentsDashboard`] holds the latest store snapshot and stats together
//! with the user's [`ViewState`]. It is the caller the view engine expects:
//! page navigation is clamped here, and a successful create refreshes the
//! snapshot and returns to the first page.

use crate::actions::{ActionState, PaymentActions};
use crate::core::payment::{Payment, PaymentStats};
use crate::core::query::PAGE_SIZE;
use crate::core::service::PaymentRepository;
use crate::view::{DateRange, PaymentView, SortField, ViewState, date_range_label};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

pub struct PaymentsDashboard {
    actions: PaymentActions,
    payments: Vec<Payment>,
    stats: PaymentStats,
    state: ViewState,
}

impl PaymentsDashboard {
    /// Fetch the list and the stats concurrently and start on page 1
    pub async fn load(repository: Arc<dyn PaymentRepository>) -> Self {
        let (payments, stats) =
            tokio::join!(repository.list_payments(), repository.get_stats());
        tracing::debug!(payments = payments.len(), "dashboard loaded");

        Self {
            actions: PaymentActions::new(repository),
            payments,
            stats,
            state: ViewState::new(),
        }
    }

    /// Re-fetch list and stats, keeping the view state
    pub async fn refresh(&mut self) {
        let repository = self.actions.repository();
        let (payments, stats) =
            tokio::join!(repository.list_payments(), repository.get_stats());
        self.payments = payments;
        self.stats = stats;

        let total_pages = self.total_pages();
        self.state.clamp_page(total_pages);
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn stats(&self) -> PaymentStats {
        self.stats
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Rows and pagination for the current state
    pub fn view(&self) -> PaymentView<'_> {
        self.state.derive(&self.payments)
    }

    /// Span of the whole snapshot, independent of filters
    pub fn date_range_label(&self) -> String {
        date_range_label(&self.payments)
    }

    pub fn total_pages(&self) -> usize {
        self.state.filtered(&self.payments).len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.state.toggle_sort(field);
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.state.set_date_range(range);
    }

    /// Returns `false` when the new bound was ignored
    pub fn set_date_from(&mut self, from: Option<NaiveDate>) -> bool {
        self.state.set_date_from(from)
    }

    /// Returns `false` when the new bound was ignored
    pub fn set_date_to(&mut self, to: Option<NaiveDate>) -> bool {
        self.state.set_date_to(to)
    }

    pub fn clear_date_range(&mut self) {
        self.state.clear_date_range();
    }

    /// Jump to `page`, clamped to the pages that exist
    pub fn go_to_page(&mut self, page: usize) {
        let total_pages = self.total_pages();
        self.state.set_page(page);
        self.state.clamp_page(total_pages);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.state.page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.state.page().saturating_sub(1));
    }

    /// Submit the creation form
    ///
    /// On success the snapshot and stats are re-fetched and the table goes
    /// back to page 1. Filters and sort are kept.
    pub async fn create_payment(&mut self, form: &Value) -> ActionState<Payment> {
        let result = self.actions.create_payment(form).await;
        if result.success {
            self.refresh().await;
            self.state.set_page(1);
        }
        result
    }
}
