//! HTTP handlers for payment operations

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::error::{DashboardError, PaymentError, RequestError, ValidationError};
use crate::core::payment::{Payment, PaymentScheme, PaymentStats, SelectOption, WALLET_OPTIONS};
use crate::core::query::{ListQuery, PaginationMeta};
use crate::core::service::PaymentRepository;
use crate::core::validation::validate_create_payment;
use crate::invoice::Invoice;
use crate::view::{ViewState, date_range_label};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn PaymentRepository>,
}

/// Response of `GET /payments`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListResponse {
    pub data: Vec<Payment>,
    pub pagination: PaginationMeta,
    /// Span of the whole collection, independent of filters
    pub date_range: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// List one page of payments
///
/// GET /payments?q=&sort=&order=&from=&to=&page=
///
/// A page past the end returns no rows with the requested page number in
/// `pagination`; clamping is left to the client.
pub async fn list_payments(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PaymentListResponse>, DashboardError> {
    let Query(query) = query.map_err(|e| RequestError::InvalidQuery {
        param: "query".to_string(),
        message: e.body_text(),
    })?;
    let view_state = ViewState::from_query(&query)?;

    let payments = state.repository.list_payments().await;
    let view = view_state.derive(&payments);
    let pagination = view.pagination;

    Ok(Json(PaymentListResponse {
        data: view.into_owned(),
        pagination,
        date_range: date_range_label(&payments),
    }))
}

/// Store-level search
///
/// GET /payments/search?q=
pub async fn search_payments(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Payment>> {
    let q = query.q.unwrap_or_default();
    Json(state.repository.search_payments(&q).await)
}

/// GET /payments/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<PaymentStats> {
    Json(state.repository.get_stats().await)
}

/// GET /payments/{id}
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, DashboardError> {
    find_payment(&state, id).await.map(Json)
}

/// Download the invoice of a payment as a text attachment
///
/// GET /payments/{id}/invoice
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DashboardError> {
    let payment = find_payment(&state, id).await?;
    let invoice = Invoice::from_payment(&payment, Utc::now());

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}\"", invoice.file_name());
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((StatusCode::OK, headers, invoice.render_text()))
}

/// Validate a creation form and create the payment
///
/// POST /payments
///
/// `201` with the payment, `422` with per-field errors, `503` when the
/// backend flaked and `502` when no identification could be generated.
pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, DashboardError> {
    let Json(payload) = payload.map_err(|e| RequestError::InvalidBody {
        message: e.body_text(),
    })?;

    if !payload.is_object() {
        return Err(ValidationError::InvalidPayload {
            message: "expected a JSON object".to_string(),
        }
        .into());
    }

    let input = validate_create_payment(&payload).map_err(ValidationError::FieldErrors)?;
    let payment = state.repository.create_payment(input).await.map_err(|e| {
        tracing::warn!(error = %e, "error creating payment");
        e
    })?;

    tracing::info!(
        payment_id = %payment.id,
        identification = %payment.identification,
        "payment created"
    );

    Ok((StatusCode::CREATED, Json(payment)))
}

/// Choices offered by the creation form
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub schemes: Vec<SelectOption>,
    pub wallets: Vec<SelectOption>,
}

/// GET /payment-options
pub async fn form_options() -> Json<FormOptions> {
    let schemes = PaymentScheme::ALL
        .iter()
        .map(|scheme| SelectOption {
            value: scheme.as_str(),
            label: scheme.label(),
        })
        .collect();

    Json(FormOptions {
        schemes,
        wallets: WALLET_OPTIONS.to_vec(),
    })
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "paydesk"
    }))
}

async fn find_payment(state: &AppState, id: String) -> Result<Payment, DashboardError> {
    match state.repository.get_payment(&id).await {
        Some(payment) => Ok(payment),
        None => Err(PaymentError::NotFound { id }.into()),
    }
}
