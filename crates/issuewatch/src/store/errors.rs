use sea_orm::DbErr;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sea-orm.
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// Record not found.
    #[error("not found: {context}")]
    NotFound { context: String },

    /// Duplicate record (unique key conflict caught before insert).
    #[error("already exists: {context}")]
    Duplicate { context: String },
}

impl StoreError {
    /// Create a NotFound error.
    pub fn not_found(context: impl Into<String>) -> Self {
        Self::NotFound {
            context: context.into(),
        }
    }

    /// Create a Duplicate error.
    pub fn duplicate(context: impl Into<String>) -> Self {
        Self::Duplicate {
            context: context.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
