use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during cache store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Row not found.
    #[error("Not found: {context}")]
    NotFound { context: String },

    /// Invalid input data.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl StoreError {
    /// Create a NotFound error for a UUID lookup.
    pub fn not_found_by_id(table: &str, id: Uuid) -> Self {
        Self::NotFound {
            context: format!("{table} id={id}"),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
