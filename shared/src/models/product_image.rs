//! Product Image Model

use serde::{Deserialize, Serialize};

/// Product image record
///
/// `file_name` is the stored name under the image root
/// (`<uuid>_<original file name>`), not a full path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    pub file_name: String,
    pub is_main: bool,
    pub is_deleted: bool,
    pub created_at: i64,
}
