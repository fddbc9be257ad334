//! 兑换与交易查询 API 处理器

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use voucher_redemption::models::Transaction;

use super::{json_body, parse_id};
use crate::{
    dto::{ApiResponse, CreateRedemptionRequest},
    error::{ApiError, Result},
    state::AppState,
};

/// 创建兑换
///
/// POST /transaction/redemption
///
/// 券不存在返回 404，券过期或明细为空返回 400，均不写入任何数据
pub async fn create_redemption(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateRedemptionRequest>, JsonRejection>,
) -> Result<ApiResponse<Transaction>> {
    let req = json_body(payload)?;
    req.validate()?;

    let transaction = state
        .redemption_service
        .create_redemption(req.into())
        .await?;

    Ok(ApiResponse::created(
        transaction,
        "Redemption created successfully",
    ))
}

/// 获取交易及明细
///
/// GET /transaction/redemption/{id}
pub async fn get_redemption(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Transaction>> {
    let id = parse_id(&id, "Invalid transaction ID")?;

    let transaction = state
        .redemption_service
        .get_transaction_by_id(id)
        .await
        .map_err(ApiError::from_resource)?;

    Ok(ApiResponse::ok(transaction))
}

/// 客户的交易历史，最新的在前
///
/// GET /customer/{id}/transactions
pub async fn list_customer_transactions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<Transaction>>> {
    let customer_id = parse_id(&id, "Invalid customer ID")?;

    let transactions = state
        .redemption_service
        .get_customer_transactions(customer_id)
        .await?;

    Ok(ApiResponse::ok(transactions))
}
