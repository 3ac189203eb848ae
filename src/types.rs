// Shared error taxonomy

/// Domain-level failure surfaced by the payment store.
///
/// Adapters only ever need to distinguish two outcomes: a point lookup that
/// matched nothing (`NotFound`, mapped to 404) and everything else
/// (`Database`/`Internal`, mapped to 500).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
