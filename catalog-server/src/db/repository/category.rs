//! Category Repository
//!
//! Categories are reference data for the catalog: the admin form needs
//! the live ones as selectable options, nothing more.

use super::RepoResult;
use shared::models::Category;
use sqlx::SqlitePool;

/// All live categories, for create/edit selection lists
pub async fn find_all_live(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, name, is_deleted, created_at, updated_at FROM category \
         WHERE is_deleted = 0 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
