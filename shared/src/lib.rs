//! Shared types for the catalog admin workspace.
//!
//! Entity models live here so that both the server and any future
//! client crate deserialize the same shapes. Database derives
//! (`sqlx::FromRow`) are gated behind the `db` feature to keep
//! client-side builds free of sqlx.

pub mod models;
pub mod util;
