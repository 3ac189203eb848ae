//! RPC front end
//!
//! Exposes the five payment operations as unary calls over JSON/HTTP. A call
//! is posted to the single `/rpc` endpoint and names its method, carrying
//! the typed request as `params`:
//!
//! ```text
//! POST /rpc
//! {"method": "GetPayment", "params": {"id": 7}}
//! ```
//!
//! The response envelope reports the outcome: `{"success": true, "result":
//! ...}` on success, `{"success": false, "error": "..."}` otherwise.
//!
//! # Endpoints
//!
//! - `POST /rpc` - Execute a payment RPC call
//! - `GET /rpc/health` - Health check
//!
//! This router is served on its own port (see `ServerConfig::rpc_port`),
//! alongside the REST front end in the same process.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::db::{ListParams, SortColumn, DEFAULT_PAGE_SIZE};
use crate::models::{AppState, PaymentDraft};
use crate::types::AppError;

// =============================================================================
// RPC Envelope Types
// =============================================================================

/// RPC call envelope - names the method to invoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcCall {
    /// Method name (e.g. "GetPayment")
    pub method: String,

    /// Typed request payload (JSON serialized)
    #[serde(default)]
    pub params: serde_json::Value,
}

/// RPC response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Whether the call succeeded
    pub success: bool,

    /// Result data (if success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl RpcResponse {
    /// Create a successful response
    fn success(result: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an error response
    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.into()),
            timestamp: chrono::Utc::now(),
        }
    }
}

// =============================================================================
// Method Request Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreatePaymentRequest {
    amount: f64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct GetPaymentRequest {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdatePaymentRequest {
    id: i64,
    amount: f64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct DeletePaymentRequest {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ListPaymentsRequest {
    currency: Option<String>,
    sort: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

/// Failed call outcome, carrying the HTTP status for the envelope.
struct RpcFailure {
    status: StatusCode,
    message: String,
}

impl RpcFailure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<AppError> for RpcFailure {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(message) => Self {
                status: StatusCode::NOT_FOUND,
                message,
            },
            err => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

// =============================================================================
// RPC Router
// =============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/rpc", post(handle_rpc))
        .route("/rpc/health", get(handle_rpc_health))
        .with_state(state)
}

// =============================================================================
// Endpoint Handlers
// =============================================================================

async fn handle_rpc(
    State(state): State<AppState>,
    Json(call): Json<RpcCall>,
) -> impl IntoResponse {
    info!(method = %call.method, "RPC call");

    match execute_rpc_method(&state, &call.method, call.params).await {
        Ok(value) => (StatusCode::OK, Json(RpcResponse::success(value))),
        Err(failure) => {
            error!(method = %call.method, error = %failure.message, "RPC call failed");
            (failure.status, Json(RpcResponse::error(failure.message)))
        }
    }
}

async fn handle_rpc_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "database": !state.store.pool().is_closed(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Dispatch a call to the store by method name.
async fn execute_rpc_method(
    state: &AppState,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcFailure> {
    match method {
        "CreatePayment" => {
            let request: CreatePaymentRequest = decode_params(params)?;
            let draft = PaymentDraft {
                amount: request.amount,
                currency: request.currency,
            };
            let payment = state.store.create(&draft).await?;
            Ok(json!({ "success": true, "id": payment.id }))
        }

        "GetPayment" => {
            let request: GetPaymentRequest = decode_params(params)?;
            let payment = state.store.get(request.id).await?;
            encode_result(&payment)
        }

        "UpdatePayment" => {
            let request: UpdatePaymentRequest = decode_params(params)?;
            let draft = PaymentDraft {
                amount: request.amount,
                currency: request.currency,
            };
            state.store.update(request.id, &draft).await?;
            Ok(json!({ "success": true }))
        }

        "DeletePayment" => {
            let request: DeletePaymentRequest = decode_params(params)?;
            state.store.delete(request.id).await?;
            Ok(json!({ "success": true }))
        }

        "ListPayments" => {
            let request: ListPaymentsRequest = decode_params(params)?;
            let sort = match request.sort.as_deref() {
                None => None,
                Some(value) => Some(SortColumn::parse(value).ok_or_else(|| {
                    RpcFailure::bad_request(format!("unknown sort column: {value}"))
                })?),
            };
            let list_params = ListParams {
                currency: request.currency,
                sort,
                page: request.page.unwrap_or(1),
                page_size: request.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            };
            let payments = state.store.list(&list_params).await?;
            Ok(json!({ "payments": payments }))
        }

        other => Err(RpcFailure::bad_request(format!("unknown RPC method: {other}"))),
    }
}

fn decode_params<T: serde::de::DeserializeOwned>(
    params: serde_json::Value,
) -> Result<T, RpcFailure> {
    serde_json::from_value(params)
        .map_err(|err| RpcFailure::bad_request(format!("invalid params: {err}")))
}

fn encode_result<T: Serialize>(value: &T) -> Result<serde_json::Value, RpcFailure> {
    serde_json::to_value(value).map_err(|err| AppError::Internal(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_params_reports_bad_request() {
        let failure =
            decode_params::<GetPaymentRequest>(json!({ "id": "seven" })).unwrap_err();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404_envelope() {
        let failure = RpcFailure::from(AppError::NotFound("payment 9".to_string()));
        assert_eq!(failure.status, StatusCode::NOT_FOUND);
        assert_eq!(failure.message, "payment 9");
    }

    #[test]
    fn error_envelope_omits_result() {
        let response = RpcResponse::error("boom");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("boom"));
        assert!(value.get("result").is_none());
    }
}
