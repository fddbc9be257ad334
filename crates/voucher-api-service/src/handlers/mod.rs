//! HTTP 请求处理器
//!
//! - `brand`: 品牌接口
//! - `voucher`: 券接口
//! - `transaction`: 兑换与交易查询接口

pub mod brand;
pub mod transaction;
pub mod voucher;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use tracing::debug;

use crate::error::{ApiError, Result};

/// 请求体无法解析时的提示
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// 解包 JSON 请求体，解析失败统一返回 400 "Invalid request body"
pub(crate) fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!(error = %rejection, "rejected request body");
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })
}

/// 解析路径中的整数 ID，失败时返回给定的提示
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(message.to_string()))
}
