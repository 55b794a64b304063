//! Category API Handlers

use axum::{Json, extract::State};
use shared::models::Category;

use crate::core::ServerState;
use crate::db::repository;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/categories - 获取所有未删除分类 (商品表单的选项列表)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Category>>>> {
    let categories = repository::category::find_all_live(&state.pool).await?;
    Ok(ok(categories))
}
