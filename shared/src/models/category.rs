//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity (分类)
///
/// Referenced by products, never owned by them. Deleted categories are
/// excluded from selection lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
