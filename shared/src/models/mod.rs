//! Catalog Entity Models

pub mod category;
pub mod product;
pub mod product_image;

pub use category::Category;
pub use product::{Product, ProductDetail, ProductFields, ProductListItem};
pub use product_image::ProductImage;
