//! HTTP 层错误类型定义
//!
//! 服务层错误按分类映射状态码：校验失败 400，不存在 404，存储故障 500。

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use voucher_redemption::{ErrorKind, RedemptionError};

use crate::dto::ApiResponse;

/// 返回给客户端的通用系统错误提示
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// HTTP 层错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 请求格式错误（JSON 解析失败、路径参数非法）
    #[error("{0}")]
    BadRequest(String),

    /// 请求内容校验失败
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 资源接口使用的转换，不存在时返回 "Brand not found" 这类提示
    pub fn from_resource(err: RedemptionError) -> Self {
        match err {
            RedemptionError::BrandNotFound(_) => Self::NotFound("Brand not found".to_string()),
            RedemptionError::VoucherNotFound(_) => Self::NotFound("Voucher not found".to_string()),
            RedemptionError::TransactionNotFound(_) => {
                Self::NotFound("Transaction not found".to_string())
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "request failed with internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        ApiResponse::<()>::error(status, message).into_response()
    }
}

/// 按错误分类转换，不依赖错误消息文本
impl From<RedemptionError> for ApiError {
    fn from(err: RedemptionError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::Validation(err.to_string()),
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::Storage => Self::Internal(err.to_string()),
        }
    }
}

/// 从 validator 错误转换
///
/// 只返回一条提示：按字段名排序后取第一个字段的第一条消息
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.keys().collect();
        fields.sort();

        let message = fields
            .first()
            .and_then(|field| field_errors.get(*field))
            .and_then(|errs| errs.first())
            .map(|e| {
                e.message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(format!("invalid {}", e.code)))
                    .into_owned()
            })
            .unwrap_or_else(|| "Invalid request".to_string());

        Self::Validation(message)
    }
}

/// HTTP 层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
