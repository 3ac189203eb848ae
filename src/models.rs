use crate::config::Config;
use crate::db::PaymentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PaymentStore,
    pub config: Config,
}

// Note: FromRow is needed for runtime query_as (without DATABASE_URL at compile time)

/// The persisted payment record. `id` is backend-assigned and immutable;
/// `amount` is stored as a double (no arithmetic is ever performed on it);
/// `currency` is an unvalidated short code.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub amount: f64,
    pub currency: String,
}

/// Payment fields supplied by a caller on create/update. An `id` in the
/// wire payload is ignored; ids are always assigned by the backend.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PaymentDraft {
    pub amount: f64,
    pub currency: String,
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring filter on currency.
    pub currency: Option<String>,
    /// Sort column name; must be one of the allow-listed columns.
    pub sort: Option<String>,
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}
