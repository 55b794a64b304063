//! Product Image Repository

use super::RepoResult;
use shared::models::ProductImage;
use sqlx::SqlitePool;

const IMAGE_SELECT: &str =
    "SELECT id, product_id, file_name, is_main, is_deleted, created_at FROM product_image";

/// All image rows of a product, soft-deleted ones included.
///
/// The set-main operation works over the full collection by design;
/// callers that only want live rows use [`find_live_by_product`].
pub async fn find_by_product(pool: &SqlitePool, product_id: i64) -> RepoResult<Vec<ProductImage>> {
    let sql = format!("{IMAGE_SELECT} WHERE product_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, ProductImage>(&sql)
        .bind(product_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Live (non-deleted) image rows of a product
pub async fn find_live_by_product(
    pool: &SqlitePool,
    product_id: i64,
) -> RepoResult<Vec<ProductImage>> {
    let sql = format!("{IMAGE_SELECT} WHERE product_id = ? AND is_deleted = 0 ORDER BY id");
    let rows = sqlx::query_as::<_, ProductImage>(&sql)
        .bind(product_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Flag exactly one image of the product as main and clear the flag on
/// every sibling, then return the resulting collection.
///
/// No soft-delete filter and no existence check: an id matching
/// nothing simply flips every row to not-main (empty collection for an
/// unknown product), which the caller treats as a no-op success.
pub async fn set_main(
    pool: &SqlitePool,
    product_id: i64,
    image_id: i64,
) -> RepoResult<Vec<ProductImage>> {
    sqlx::query("UPDATE product_image SET is_main = (id = ?) WHERE product_id = ?")
        .bind(image_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    find_by_product(pool, product_id).await
}
