//! 券 API 处理器

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::info;
use validator::Validate;

use voucher_redemption::models::Voucher;

use super::{json_body, parse_id};
use crate::{
    dto::{ApiResponse, VoucherRequest},
    error::{ApiError, Result},
    state::AppState,
};

/// 品牌存在但没有任何券时的提示
pub const BRAND_HAS_NO_VOUCHERS: &str = "Brand tidak memiliki voucher";

/// 创建券
///
/// POST /voucher
pub async fn create_voucher(
    State(state): State<AppState>,
    payload: std::result::Result<Json<VoucherRequest>, JsonRejection>,
) -> Result<ApiResponse<Voucher>> {
    let req = json_body(payload)?;
    req.validate()?;

    let voucher = state
        .voucher_service
        .create_voucher(req.into())
        .await
        .map_err(ApiError::from_resource)?;
    info!(voucher_id = voucher.id, brand_id = voucher.brand_id, "Voucher created");

    Ok(ApiResponse::created(voucher, "Voucher created successfully"))
}

/// 获取券（附带品牌信息）
///
/// GET /voucher/{id}
pub async fn get_voucher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Voucher>> {
    let id = parse_id(&id, "Invalid ID")?;

    let voucher = state
        .voucher_service
        .get_voucher(id)
        .await
        .map_err(ApiError::from_resource)?;

    Ok(ApiResponse::ok(voucher))
}

/// 券列表
///
/// GET /voucher
pub async fn list_vouchers(State(state): State<AppState>) -> Result<ApiResponse<Vec<Voucher>>> {
    let vouchers = state.voucher_service.list_vouchers().await?;
    Ok(ApiResponse::ok(vouchers))
}

/// 品牌下的券
///
/// GET /brand/{id}/vouchers
pub async fn list_brand_vouchers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<Voucher>>> {
    let brand_id = parse_id(&id, "Invalid brand ID")?;

    let vouchers = state
        .voucher_service
        .get_vouchers_by_brand(brand_id)
        .await
        .map_err(ApiError::from_resource)?;

    if vouchers.is_empty() {
        return Err(ApiError::NotFound(BRAND_HAS_NO_VOUCHERS.to_string()));
    }

    Ok(ApiResponse::ok(vouchers))
}

/// 更新券
///
/// PUT /voucher/{id}
pub async fn update_voucher(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<VoucherRequest>, JsonRejection>,
) -> Result<ApiResponse<Voucher>> {
    let id = parse_id(&id, "Invalid ID")?;
    let req = json_body(payload)?;
    req.validate()?;

    let voucher = state
        .voucher_service
        .update_voucher(id, req.into())
        .await
        .map_err(ApiError::from_resource)?;
    info!(voucher_id = id, "Voucher updated");

    Ok(ApiResponse::ok_with_message(voucher, "Voucher updated successfully"))
}

/// 删除券
///
/// DELETE /voucher/{id}
pub async fn delete_voucher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>> {
    let id = parse_id(&id, "Invalid ID")?;

    state
        .voucher_service
        .delete_voucher(id)
        .await
        .map_err(ApiError::from_resource)?;
    info!(voucher_id = id, "Voucher deleted");

    Ok(ApiResponse::ok_empty("Voucher deleted successfully"))
}
