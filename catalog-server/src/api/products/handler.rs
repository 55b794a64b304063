//! Product API Handlers
//!
//! Create and edit take multipart form data (scalar fields plus
//! repeated `photos` file parts), matching the admin form this service
//! backs. Photo files are written through the storage adapter before
//! the database transaction is issued; the two stores are not linked
//! by a transaction, so a crash in between can orphan files.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use validator::Validate;

use shared::models::{ProductDetail, ProductFields, ProductImage, ProductListItem};

use crate::core::ServerState;
use crate::db::repository;
use crate::services::ImageStorage;
use crate::utils::{AppError, AppResponse, AppResult, Paginate, PaginationParams, ok};

/// Scalar form fields, validated the way the web layer used to
#[derive(Debug, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "count must not be negative"))]
    pub count: i64,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    pub category_id: i64,
}

impl From<&ProductForm> for ProductFields {
    fn from(form: &ProductForm) -> Self {
        Self {
            name: form.name.clone(),
            count: form.count,
            price: form.price,
            category_id: form.category_id,
        }
    }
}

/// One uploaded photo part
struct PhotoUpload {
    original_name: String,
    data: Vec<u8>,
}

fn parse_number<T: std::str::FromStr>(raw: &str, field: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid value for {field}: {raw}")))
}

fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::validation(format!("Missing field: {field}")))
}

/// Pull the scalar fields and photo parts out of the multipart body
async fn parse_product_form(mut multipart: Multipart) -> AppResult<(ProductForm, Vec<PhotoUpload>)> {
    let mut name = None;
    let mut count = None;
    let mut price = None;
    let mut category_id = None;
    let mut photos = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(field.text().await?),
            "count" => count = Some(parse_number(&field.text().await?, "count")?),
            "price" => price = Some(parse_number(&field.text().await?, "price")?),
            "category_id" => {
                category_id = Some(parse_number(&field.text().await?, "category_id")?)
            }
            "photos" => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?.to_vec();
                // browsers send an empty part when no file was chosen
                if !original_name.is_empty() && !data.is_empty() {
                    photos.push(PhotoUpload {
                        original_name,
                        data,
                    });
                }
            }
            _ => {}
        }
    }

    let form = ProductForm {
        name: required(name, "name")?,
        count: required(count, "count")?,
        price: required(price, "price")?,
        category_id: required(category_id, "category_id")?,
    };
    form.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok((form, photos))
}

/// Persist uploads under unique names, returning the stored file names
/// in upload order. All file writes finish before any database save.
async fn stage_photos(storage: &ImageStorage, photos: &[PhotoUpload]) -> AppResult<Vec<String>> {
    let mut file_names = Vec::with_capacity(photos.len());
    for photo in photos {
        let file_name = ImageStorage::unique_file_name(&photo.original_name);
        storage.save_file(&file_name, &photo.data).await?;
        file_names.push(file_name);
    }
    Ok(file_names)
}

/// Whether this edit rebuilds the image set.
///
/// With `replace_on_upload` off this keeps the branch condition
/// observed in the system being replaced: the set is rebuilt only when
/// the request carries NO new photos, which empties it. The corrected
/// policy (flag on) rebuilds the set from the photos that did arrive.
fn should_replace_images(replace_on_upload: bool, has_new_photos: bool) -> bool {
    if replace_on_upload {
        has_new_photos
    } else {
        !has_new_photos
    }
}

// =============================================================================
// Product Handlers
// =============================================================================

/// GET /api/products - 分页获取商品列表 (最新优先)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<AppResponse<Paginate<ProductListItem>>>> {
    let items =
        repository::product::find_page(&state.pool, params.limit() as i64, params.offset() as i64)
            .await?;
    let total = repository::product::count_live(&state.pool).await?;
    let total_pages = Paginate::<ProductListItem>::total_pages_for(total, params.page_size());

    Ok(ok(Paginate::new(items, params.page(), total_pages)))
}

/// POST /api/products - 创建商品 (multipart, 含图片)
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<AppResponse<ProductDetail>>> {
    let (form, photos) = parse_product_form(multipart).await?;

    let file_names = stage_photos(&state.storage, &photos).await?;
    let (product, images) =
        repository::product::create(&state.pool, &(&form).into(), &file_names).await?;

    tracing::info!(id = product.id, images = images.len(), "Product created");
    Ok(ok(ProductDetail { product, images }))
}

/// PUT /api/products/{id} - 更新商品 (multipart)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<AppResponse<ProductDetail>>> {
    let (form, photos) = parse_product_form(multipart).await?;

    repository::product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;

    let replace = should_replace_images(state.config.replace_images_on_upload, !photos.is_empty());
    let new_files = if replace {
        // Old files go first, then the new set is staged; the database
        // sees both changes in one transaction below.
        let live = repository::product_image::find_live_by_product(&state.pool, id).await?;
        for image in &live {
            state.storage.delete_file(&image.file_name).await?;
        }
        Some(stage_photos(&state.storage, &photos).await?)
    } else {
        None
    };

    repository::product::update(&state.pool, id, &(&form).into(), new_files.as_deref()).await?;

    let product = repository::product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
    let images = repository::product_image::find_live_by_product(&state.pool, id).await?;

    tracing::info!(id, replaced_images = replace, "Product updated");
    Ok(ok(ProductDetail { product, images }))
}

/// DELETE /api/products/{id} - 软删除商品及其图片
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    repository::product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;

    // Backing files are removed up front; the rows are then tombstoned
    // together in one transaction.
    let images = repository::product_image::find_by_product(&state.pool, id).await?;
    for image in &images {
        state.storage.delete_file(&image.file_name).await?;
    }

    repository::product::soft_delete(&state.pool, id).await?;

    tracing::info!(id, images = images.len(), "Product soft-deleted");
    Ok(ok(true))
}

/// POST /api/products/{id}/images/{image_id}/main - 设置主图
///
/// 对该商品的全部图片行生效 (含已删除行)，未匹配任何行时视为成功的空操作。
pub async fn set_main_image(
    State(state): State<ServerState>,
    Path((id, image_id)): Path<(i64, i64)>,
) -> AppResult<Json<AppResponse<Vec<ProductImage>>>> {
    let images = repository::product_image::set_main(&state.pool, id, image_id).await?;
    Ok(ok(images))
}
