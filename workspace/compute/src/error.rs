use model::error::StoreError;
use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A tree or totals query referenced a category that does not exist
    /// (or that belongs to a different project).
    #[error("category {0} not found")]
    CategoryNotFound(i32),

    /// A query referenced a project that does not exist.
    #[error("project {0} not found")]
    ProjectNotFound(i32),

    /// Any other store-layer failure reaching the read path.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ComputeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => ComputeError::Database(e),
            StoreError::CategoryNotFound(id) => ComputeError::CategoryNotFound(id),
            StoreError::ProjectNotFound(id) => ComputeError::ProjectNotFound(id),
            other => ComputeError::Store(other),
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
