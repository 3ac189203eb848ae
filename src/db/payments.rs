//! Payment store
//!
//! Sole owner of persistence for payment records. Both front ends (REST and
//! RPC) call through this type; it translates each operation into one
//! parameterized SQL statement against the `payments` table and maps backend
//! errors to the domain taxonomy in [`crate::types::AppError`].

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{Payment, PaymentDraft};
use crate::types::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Allow-listed sort columns for list queries.
///
/// Sort input arrives as free text on the wire; it is parsed into this enum
/// before query assembly so that only these identifiers ever appear in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Amount,
    Currency,
}

impl SortColumn {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "amount" => Some(Self::Amount),
            "currency" => Some(Self::Currency),
            _ => None,
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Amount => "amount",
            Self::Currency => "currency",
        }
    }
}

/// Parameters for a list query.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Case-insensitive substring filter on currency; `None` matches all.
    pub currency: Option<String>,
    /// Sort column; `None` sorts by id ascending.
    pub sort: Option<SortColumn>,
    /// 1-indexed page. Values below 1 clamp to 1 rather than producing a
    /// negative offset.
    pub page: i64,
    /// Page size, clamped into `1..=MAX_PAGE_SIZE`.
    pub page_size: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            currency: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListParams {
    fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

/// Assembles the list query. Caller-supplied values (filter pattern, limit,
/// offset) are bound as placeholders; the sort column is interpolated from
/// the [`SortColumn`] allow-list only.
fn build_list_query(params: &ListParams) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT id, amount, currency FROM payments");

    if let Some(filter) = &params.currency {
        query.push(" WHERE currency ILIKE ");
        query.push_bind(format!("%{filter}%"));
    }

    query.push(" ORDER BY ");
    query.push(params.sort.unwrap_or(SortColumn::Id).as_sql());
    query.push(" LIMIT ");
    query.push_bind(params.limit());
    query.push(" OFFSET ");
    query.push_bind(params.offset());

    query
}

/// Mediates all access to the backing `payments` table.
///
/// Holds a cloned connection pool; safe to share across concurrent requests.
/// Dropping a caller's request future cancels the in-flight query.
#[derive(Clone)]
pub struct PaymentStore {
    pool: PgPool,
}

impl PaymentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts a new record and returns it with the backend-assigned id.
    pub async fn create(&self, draft: &PaymentDraft) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (amount, currency) VALUES ($1, $2) RETURNING id, amount, currency",
        )
        .bind(draft.amount)
        .bind(&draft.currency)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Point lookup. Zero rows is `NotFound`; any other backend failure
    /// surfaces as `Database`.
    pub async fn get(&self, id: i64) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT id, amount, currency FROM payments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        payment.ok_or_else(|| AppError::NotFound(format!("payment {id}")))
    }

    /// Overwrites amount and currency for the row matching `id`. Matching
    /// zero rows is not an error; the returned count is the caller's signal.
    pub async fn update(&self, id: i64, draft: &PaymentDraft) -> AppResult<u64> {
        let result = sqlx::query("UPDATE payments SET amount = $1, currency = $2 WHERE id = $3")
            .bind(draft.amount)
            .bind(&draft.currency)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Removes the row matching `id`. Idempotent: deleting a missing id
    /// returns zero rows affected without error.
    pub async fn delete(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Returns one page of records. Filtering is a case-insensitive currency
    /// substring match; ordering defaults to id ascending.
    pub async fn list(&self, params: &ListParams) -> AppResult<Vec<Payment>> {
        let mut query = build_list_query(params);
        let payments = query
            .build_query_as::<Payment>()
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_column_parses_allow_listed_names_only() {
        assert_eq!(SortColumn::parse("id"), Some(SortColumn::Id));
        assert_eq!(SortColumn::parse("amount"), Some(SortColumn::Amount));
        assert_eq!(SortColumn::parse("currency"), Some(SortColumn::Currency));
        assert_eq!(SortColumn::parse("amount; DROP TABLE payments"), None);
        assert_eq!(SortColumn::parse("AMOUNT"), None);
        assert_eq!(SortColumn::parse(""), None);
    }

    #[test]
    fn list_query_defaults_to_id_order_without_filter() {
        let query = build_list_query(&ListParams::default());
        assert_eq!(
            query.sql(),
            "SELECT id, amount, currency FROM payments ORDER BY id LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn list_query_binds_filter_as_placeholder() {
        let params = ListParams {
            currency: Some("usd".to_string()),
            ..ListParams::default()
        };
        let query = build_list_query(&params);
        assert_eq!(
            query.sql(),
            "SELECT id, amount, currency FROM payments WHERE currency ILIKE $1 ORDER BY id LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn list_query_interpolates_allow_listed_sort_column() {
        let params = ListParams {
            sort: Some(SortColumn::Amount),
            ..ListParams::default()
        };
        let query = build_list_query(&params);
        assert_eq!(
            query.sql(),
            "SELECT id, amount, currency FROM payments ORDER BY amount LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn malicious_filter_text_never_reaches_sql() {
        let params = ListParams {
            currency: Some("'; DROP TABLE payments; --".to_string()),
            ..ListParams::default()
        };
        let query = build_list_query(&params);
        assert!(!query.sql().contains("DROP TABLE"));
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let params = ListParams {
            page: 3,
            page_size: 25,
            ..ListParams::default()
        };
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn page_below_one_clamps_to_first_page() {
        let params = ListParams {
            page: 0,
            ..ListParams::default()
        };
        assert_eq!(params.offset(), 0);

        let params = ListParams {
            page: -5,
            ..ListParams::default()
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_size_clamps_into_bounds() {
        let params = ListParams {
            page_size: 0,
            ..ListParams::default()
        };
        assert_eq!(params.limit(), 1);

        let params = ListParams {
            page_size: 10_000,
            ..ListParams::default()
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }
}
