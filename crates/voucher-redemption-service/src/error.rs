//! 券兑换服务错误类型
//!
//! 定义服务层的业务错误和系统错误。错误按 [`ErrorKind`] 分类，
//! 上层按分类（而不是按消息文本）决定响应状态。

use thiserror::Error;

use crate::models::TransactionStatus;

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 输入不合法或业务规则不满足
    Validation,
    /// 引用的实体不存在
    NotFound,
    /// 存储层或内部故障
    Storage,
}

/// 券兑换服务错误类型
#[derive(Debug, Error)]
pub enum RedemptionError {
    // === 实体不存在 ===
    #[error("brand not found")]
    BrandNotFound(i64),

    #[error("voucher not found")]
    VoucherNotFound(i64),

    #[error("transaction not found")]
    TransactionNotFound(i64),

    // === 兑换校验 ===
    #[error("transaction must have at least one item")]
    EmptyItems,

    #[error("voucher has expired")]
    VoucherExpired(i64),

    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    // === 券校验 ===
    #[error("valid_until must be in the future")]
    ValidUntilInPast,

    #[error("points must be greater than 0")]
    InvalidPoints(i32),

    #[error("{0}")]
    Validation(String),

    // === 删除受引用约束 ===
    #[error("brand still has vouchers")]
    BrandHasVouchers(i64),

    #[error("voucher is used by existing transactions")]
    VoucherInUse(i64),

    // === 系统错误 ===
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// 券兑换服务 Result 类型别名
pub type Result<T> = std::result::Result<T, RedemptionError>;

/// 删除时的外键冲突转换为 `conflict`，其余数据库错误保持为存储错误
pub(crate) fn map_foreign_key(err: sqlx::Error, conflict: RedemptionError) -> RedemptionError {
    match err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => conflict,
        other => RedemptionError::Database(other),
    }
}

impl RedemptionError {
    /// 错误分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BrandNotFound(_) | Self::VoucherNotFound(_) | Self::TransactionNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::EmptyItems
            | Self::VoucherExpired(_)
            | Self::InvalidStatusTransition { .. }
            | Self::ValidUntilInPast
            | Self::InvalidPoints(_)
            | Self::Validation(_)
            | Self::BrandHasVouchers(_)
            | Self::VoucherInUse(_) => ErrorKind::Validation,
            Self::Database(_) | Self::Internal(_) => ErrorKind::Storage,
        }
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        self.kind() != ErrorKind::Storage
    }

    /// 获取错误码（用于 API 响应和指标标签）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BrandNotFound(_) => "BRAND_NOT_FOUND",
            Self::VoucherNotFound(_) => "VOUCHER_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::EmptyItems => "EMPTY_ITEMS",
            Self::VoucherExpired(_) => "VOUCHER_EXPIRED",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::ValidUntilInPast => "VALID_UNTIL_IN_PAST",
            Self::InvalidPoints(_) => "INVALID_POINTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BrandHasVouchers(_) => "BRAND_HAS_VOUCHERS",
            Self::VoucherInUse(_) => "VOUCHER_IN_USE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
