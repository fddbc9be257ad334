//! 统一响应信封
//!
//! 所有接口返回 `{"status": <u16>, "message": <string>, "data"?: <value>}`，
//! `status` 与 HTTP 状态码一致，没有数据时省略 `data`。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// 默认成功提示
pub const SUCCESS_MESSAGE: &str = "Success";

/// API 统一响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200，提示为 "Success"
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, SUCCESS_MESSAGE, Some(data))
    }

    /// 200，自定义提示
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message, Some(data))
    }

    /// 201
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::CREATED, message, Some(data))
    }

    fn with_status(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// 200，无数据
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message, None)
    }

    /// 错误响应，无数据
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_status(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
