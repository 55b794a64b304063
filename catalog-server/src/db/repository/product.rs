//! Product Repository
//!
//! All read paths filter on `is_deleted = 0`; writes that touch the
//! product row and its image rows together commit in one transaction.

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductFields, ProductImage, ProductListItem};
use shared::util::{now_millis, snowflake_id};
use sqlx::{Sqlite, SqlitePool, Transaction};

const PRODUCT_SELECT: &str =
    "SELECT id, name, \"count\", price, category_id, is_deleted, created_at, updated_at FROM product";

/// Count live (non-deleted) products
pub async fn count_live(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE is_deleted = 0")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// One page of the admin listing, newest first.
///
/// Eager-includes the category name via JOIN and the main image file
/// name via subselect. The main-image lookup deliberately carries no
/// soft-delete filter; it mirrors how the listing picks the first row
/// flagged main out of the full image collection.
pub async fn find_page(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<ProductListItem>> {
    let rows = sqlx::query_as::<_, ProductListItem>(
        "SELECT p.id, p.name, \
            (SELECT i.file_name FROM product_image i \
              WHERE i.product_id = p.id AND i.is_main = 1 \
              ORDER BY i.id LIMIT 1) AS main_image, \
            c.name AS category_name, p.\"count\", p.price \
         FROM product p \
         JOIN category c ON p.category_id = c.id \
         WHERE p.is_deleted = 0 \
         ORDER BY p.id DESC \
         LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Find a live product by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ? AND is_deleted = 0");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert the image set for a product. The first record is flagged
/// main; an empty set inserts nothing (product ends up with no main).
async fn insert_image_set(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: i64,
    image_files: &[String],
    now: i64,
) -> RepoResult<Vec<ProductImage>> {
    let mut created = Vec::with_capacity(image_files.len());
    for (index, file_name) in image_files.iter().enumerate() {
        let image = ProductImage {
            id: snowflake_id(),
            product_id,
            file_name: file_name.clone(),
            is_main: index == 0,
            is_deleted: false,
            created_at: now,
        };
        sqlx::query(
            "INSERT INTO product_image (id, product_id, file_name, is_main, is_deleted, created_at) \
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(image.id)
        .bind(image.product_id)
        .bind(&image.file_name)
        .bind(image.is_main)
        .bind(image.created_at)
        .execute(&mut **tx)
        .await?;
        created.push(image);
    }
    Ok(created)
}

/// Create a product together with its image records (one transaction)
pub async fn create(
    pool: &SqlitePool,
    fields: &ProductFields,
    image_files: &[String],
) -> RepoResult<(Product, Vec<ProductImage>)> {
    let now = now_millis();
    let product = Product {
        id: snowflake_id(),
        name: fields.name.clone(),
        count: fields.count,
        price: fields.price,
        category_id: fields.category_id,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO product (id, name, \"count\", price, category_id, is_deleted, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(product.count)
    .bind(product.price)
    .bind(product.category_id)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(&mut *tx)
    .await?;

    let images = insert_image_set(&mut tx, product.id, image_files, now).await?;
    tx.commit().await?;

    Ok((product, images))
}

/// Update scalar fields and, when `new_image_files` is present, replace
/// the live image set (soft-delete current rows, insert the new set
/// with its first record main). Everything commits in one transaction.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    fields: &ProductFields,
    new_image_files: Option<&[String]>,
) -> RepoResult<()> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE product SET name = ?, \"count\" = ?, price = ?, category_id = ?, updated_at = ? \
         WHERE id = ? AND is_deleted = 0",
    )
    .bind(&fields.name)
    .bind(fields.count)
    .bind(fields.price)
    .bind(fields.category_id)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    if let Some(image_files) = new_image_files {
        sqlx::query("UPDATE product_image SET is_deleted = 1 WHERE product_id = ? AND is_deleted = 0")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_image_set(&mut tx, id, image_files, now).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Soft-delete a product and every one of its image records (one
/// transaction). Already-deleted products report NotFound; the second
/// delete of the same id is not a silent success.
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query("UPDATE product SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0")
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    sqlx::query("UPDATE product_image SET is_deleted = 1 WHERE product_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{product_image, test_support::test_pool};

    async fn seed_category(pool: &SqlitePool, name: &str) -> i64 {
        let id = snowflake_id();
        sqlx::query("INSERT INTO category (id, name, is_deleted) VALUES (?, ?, 0)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
        id
    }

    fn fields(name: &str, category_id: i64) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            count: 5,
            price: 9.99,
            category_id,
        }
    }

    #[tokio::test]
    async fn create_with_photos_marks_first_main() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;

        let files = vec!["a_fileA.jpg".to_string(), "b_fileB.jpg".to_string()];
        let (product, images) = create(&pool, &fields("Widget", cat), &files).await.unwrap();

        assert_eq!(images.len(), 2);
        assert!(images[0].is_main);
        assert!(!images[1].is_main);
        assert_eq!(images[0].file_name, "a_fileA.jpg");
        assert_eq!(images[0].product_id, product.id);

        let stored = product_image::find_by_product(&pool, product.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.iter().filter(|i| i.is_main).count(), 1);
    }

    #[tokio::test]
    async fn create_without_photos_has_no_images() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;

        let (product, images) = create(&pool, &fields("Bare", cat), &[]).await.unwrap();
        assert!(images.is_empty());

        let stored = product_image::find_by_product(&pool, product.id)
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn listing_pages_newest_first_and_skips_deleted() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;

        let mut ids = Vec::new();
        for n in 0..15 {
            // snowflake ids share a millisecond; spread them out
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            let (p, _) = create(&pool, &fields(&format!("P{n}"), cat), &[])
                .await
                .unwrap();
            ids.push(p.id);
        }

        let total = count_live(&pool).await.unwrap();
        assert_eq!(total, 15);

        let page1 = find_page(&pool, 10, 0).await.unwrap();
        assert_eq!(page1.len(), 10);
        assert_eq!(page1[0].id, *ids.last().unwrap(), "newest first");
        assert_eq!(page1[0].category_name, "Tools");

        let page2 = find_page(&pool, 10, 10).await.unwrap();
        assert_eq!(page2.len(), 5);

        soft_delete(&pool, ids[0]).await.unwrap();
        assert_eq!(count_live(&pool).await.unwrap(), 14);
        let page2 = find_page(&pool, 10, 10).await.unwrap();
        assert_eq!(page2.len(), 4);
        assert!(page2.iter().all(|item| item.id != ids[0]));
    }

    #[tokio::test]
    async fn listing_exposes_main_image_file_name() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;

        let files = vec!["x_main.jpg".to_string(), "y_other.jpg".to_string()];
        create(&pool, &fields("Pictured", cat), &files).await.unwrap();
        create(&pool, &fields("Plain", cat), &[]).await.unwrap();

        let page = find_page(&pool, 10, 0).await.unwrap();
        let pictured = page.iter().find(|i| i.name == "Pictured").unwrap();
        let plain = page.iter().find(|i| i.name == "Plain").unwrap();
        assert_eq!(pictured.main_image.as_deref(), Some("x_main.jpg"));
        assert!(plain.main_image.is_none());
    }

    #[tokio::test]
    async fn find_by_id_excludes_soft_deleted() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;
        let (product, _) = create(&pool, &fields("Gone", cat), &[]).await.unwrap();

        assert!(find_by_id(&pool, product.id).await.unwrap().is_some());
        soft_delete(&pool, product.id).await.unwrap();
        assert!(find_by_id(&pool, product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_delete_reports_not_found() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;
        let (product, _) = create(&pool, &fields("Once", cat), &[]).await.unwrap();

        soft_delete(&pool, product.id).await.unwrap();
        let err = soft_delete(&pool, product.id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_reports_not_found() {
        let pool = test_pool().await;
        let err = soft_delete(&pool, 7).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_image_set_when_files_supplied() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;
        let files = vec!["old_a.jpg".to_string(), "old_b.jpg".to_string()];
        let (product, _) = create(&pool, &fields("Widget", cat), &files).await.unwrap();

        let new_files = vec!["new_c.jpg".to_string()];
        let updated = ProductFields {
            name: "Widget v2".to_string(),
            count: 7,
            price: 12.5,
            category_id: cat,
        };
        update(&pool, product.id, &updated, Some(&new_files))
            .await
            .unwrap();

        let reloaded = find_by_id(&pool, product.id).await.unwrap().unwrap();
        assert_eq!(reloaded.name, "Widget v2");
        assert_eq!(reloaded.count, 7);

        let images = product_image::find_by_product(&pool, product.id)
            .await
            .unwrap();
        let live: Vec<_> = images.iter().filter(|i| !i.is_deleted).collect();
        assert_eq!(images.len(), 3, "old rows tombstoned, not removed");
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].file_name, "new_c.jpg");
        assert!(live[0].is_main);
    }

    #[tokio::test]
    async fn update_without_file_list_keeps_images() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;
        let files = vec!["keep.jpg".to_string()];
        let (product, _) = create(&pool, &fields("Widget", cat), &files).await.unwrap();

        update(&pool, product.id, &fields("Renamed", cat), None)
            .await
            .unwrap();

        let images = product_image::find_by_product(&pool, product.id)
            .await
            .unwrap();
        assert_eq!(images.len(), 1);
        assert!(!images[0].is_deleted);
        assert!(images[0].is_main);
    }

    #[tokio::test]
    async fn update_of_soft_deleted_product_reports_not_found() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Tools").await;
        let (product, _) = create(&pool, &fields("Widget", cat), &[]).await.unwrap();
        soft_delete(&pool, product.id).await.unwrap();

        let err = update(&pool, product.id, &fields("Widget", cat), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
