//! 品牌 API 处理器

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::info;
use validator::Validate;

use voucher_redemption::models::Brand;

use super::{json_body, parse_id};
use crate::{
    dto::{ApiResponse, BrandRequest},
    error::{ApiError, Result},
    state::AppState,
};

/// 创建品牌
///
/// POST /brand
pub async fn create_brand(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BrandRequest>, JsonRejection>,
) -> Result<ApiResponse<Brand>> {
    let req = json_body(payload)?;
    req.validate()?;

    let brand = state.brand_service.create_brand(req.into()).await?;
    info!(brand_id = brand.id, "Brand created");

    Ok(ApiResponse::created(brand, "Brand created successfully"))
}

/// 获取品牌
///
/// GET /brand/{id}
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Brand>> {
    let id = parse_id(&id, "Invalid ID")?;

    let brand = state
        .brand_service
        .get_brand(id)
        .await
        .map_err(ApiError::from_resource)?;

    Ok(ApiResponse::ok(brand))
}

/// 品牌列表
///
/// GET /brand
pub async fn list_brands(State(state): State<AppState>) -> Result<ApiResponse<Vec<Brand>>> {
    let brands = state.brand_service.list_brands().await?;
    Ok(ApiResponse::ok(brands))
}

/// 更新品牌
///
/// PUT /brand/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<BrandRequest>, JsonRejection>,
) -> Result<ApiResponse<Brand>> {
    let id = parse_id(&id, "Invalid ID")?;
    let req = json_body(payload)?;
    req.validate()?;

    let brand = state
        .brand_service
        .update_brand(id, req.into())
        .await
        .map_err(ApiError::from_resource)?;
    info!(brand_id = id, "Brand updated");

    Ok(ApiResponse::ok_with_message(brand, "Brand updated successfully"))
}

/// 删除品牌
///
/// DELETE /brand/{id}
pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>> {
    let id = parse_id(&id, "Invalid ID")?;

    state
        .brand_service
        .delete_brand(id)
        .await
        .map_err(ApiError::from_resource)?;
    info!(brand_id = id, "Brand deleted");

    Ok(ApiResponse::ok_empty("Brand deleted successfully"))
}
