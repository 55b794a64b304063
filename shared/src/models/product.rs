//! Product Model

use serde::{Deserialize, Serialize};

use super::ProductImage;

/// Product entity (商品)
///
/// Soft-deleted rows stay in storage with `is_deleted = true` and are
/// excluded from every read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Inventory quantity
    pub count: i64,
    pub price: f64,
    pub category_id: i64,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Scalar product fields supplied on create and edit, independent of
/// image handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub count: i64,
    pub price: f64,
    pub category_id: i64,
}

/// Listing row (for the paginated admin index view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductListItem {
    pub id: i64,
    pub name: String,
    /// Stored file name of the image flagged main, if any
    pub main_image: Option<String>,
    pub category_name: String,
    pub count: i64,
    pub price: f64,
}

/// Product together with its image collection (create/edit responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub images: Vec<ProductImage>,
}
