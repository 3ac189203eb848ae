//! REST front end for payment records.
//!
//! Thin pass-through: each handler decodes the request, calls one store
//! method, and encodes the response. Input parse failures (bad path id,
//! non-numeric body or query fields) are rejected by the extractors before
//! the store is reached.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error, info};

use crate::db::{ListParams, SortColumn, DEFAULT_PAGE_SIZE};
use crate::models::{AppState, ListQuery, Payment, PaymentDraft};
use crate::types::AppError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/payments", post(create_payment).get(list_payments))
        .route(
            "/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .with_state(state)
}

fn store_error(err: AppError) -> StatusCode {
    match err {
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        err => {
            error!(error = %err, "Store operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn create_payment(
    State(state): State<AppState>,
    Json(draft): Json<PaymentDraft>,
) -> Result<(StatusCode, Json<Payment>), StatusCode> {
    let payment = state.store.create(&draft).await.map_err(store_error)?;
    info!(id = payment.id, "Payment created");

    Ok((StatusCode::CREATED, Json(payment)))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, StatusCode> {
    let payment = state.store.get(id).await.map_err(store_error)?;

    Ok(Json(payment))
}

async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<PaymentDraft>,
) -> Result<StatusCode, StatusCode> {
    // Zero rows matched is a documented no-op, not an error
    let rows = state.store.update(id, &draft).await.map_err(store_error)?;
    if rows == 0 {
        debug!(id, "Update matched no rows");
    }

    Ok(StatusCode::OK)
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let rows = state.store.delete(id).await.map_err(store_error)?;
    if rows == 0 {
        debug!(id, "Delete matched no rows");
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Payment>>, StatusCode> {
    let sort = match query.sort.as_deref() {
        None => None,
        Some(value) => Some(SortColumn::parse(value).ok_or(StatusCode::BAD_REQUEST)?),
    };

    let params = ListParams {
        currency: query.currency,
        sort,
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let payments = state.store.list(&params).await.map_err(store_error)?;

    Ok(Json(payments))
}
