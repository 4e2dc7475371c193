use rust_decimal::Decimal;
use thiserror::Error;

/// Error types for the store layer.
///
/// Write operations validate their referenced rows up front, so a bad
/// category or parent id surfaces as [`StoreError::InvalidReference`] instead
/// of a database constraint failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error from the underlying database; propagated unchanged, no retries.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The requested project does not exist.
    #[error("project {0} not found")]
    ProjectNotFound(i32),

    /// The requested category does not exist.
    #[error("category {0} not found")]
    CategoryNotFound(i32),

    /// The requested amount does not exist.
    #[error("amount {0} not found")]
    AmountNotFound(i32),

    /// A write referenced a row that does not exist or belongs to another
    /// project.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Amount values are magnitudes of at least one unit.
    #[error("amount value must be at least 1, got {0}")]
    InvalidValue(Decimal),
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
