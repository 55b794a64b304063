//! Repository Module
//!
//! CRUD operations over the SQLite pool. Repositories are free
//! functions taking `&SqlitePool`; writes that must land together run
//! inside a single transaction (the unit-of-work save the catalog
//! operations require).

pub mod category;
pub mod product;
pub mod product_image;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
