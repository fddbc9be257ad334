//! 请求 DTO 定义
//!
//! 请求体结构与浅层校验。业务校验（品牌是否存在、有效期、券是否过期）
//! 由服务层完成。

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use voucher_redemption::dto::RedemptionRequest;
use voucher_redemption::models::{NewBrand, NewVoucher};

/// 创建/更新品牌请求
#[derive(Debug, Deserialize, Validate)]
pub struct BrandRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_brand_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// 品牌名称校验，按 必填 -> 最少 3 字符 -> 最多 200 字符 的顺序只报告第一条
fn validate_brand_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();

    let (code, message) = if name.is_empty() {
        ("required", "Nama brand tidak boleh kosong")
    } else if len < 3 {
        ("min", "Nama brand minimal harus 3 karakter")
    } else if len > 200 {
        ("max", "Nama brand maksimal harus 200 karakter")
    } else {
        return Ok(());
    };

    Err(ValidationError::new(code).with_message(Cow::Borrowed(message)))
}

impl From<BrandRequest> for NewBrand {
    fn from(req: BrandRequest) -> Self {
        NewBrand::new(req.name, req.description)
    }
}

/// 创建/更新券请求
#[derive(Debug, Deserialize, Validate)]
pub struct VoucherRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "brand ID is required"))]
    pub brand_id: i64,
    #[serde(default)]
    #[validate(length(min = 1, message = "Kode voucher tidak boleh kosong"))]
    pub code: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Nama voucher tidak boleh kosong"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "points must be greater than 0"))]
    pub points: i32,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
}

impl From<VoucherRequest> for NewVoucher {
    fn from(req: VoucherRequest) -> Self {
        NewVoucher {
            brand_id: req.brand_id,
            code: req.code,
            name: req.name,
            description: req.description,
            points: req.points,
            valid_until: req.valid_until,
        }
    }
}

/// 兑换请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRedemptionRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "customer ID is required"))]
    pub customer_id: i64,
    /// 为空时由兑换流程拒绝
    #[serde(default)]
    pub items: Vec<RedemptionItemBody>,
}

/// 兑换明细
#[derive(Debug, Deserialize)]
pub struct RedemptionItemBody {
    pub voucher_id: i64,
    /// 客户端传入的积分会被忽略，以券的当前积分为准
    #[serde(default)]
    pub points_used: Option<i32>,
}

impl From<CreateRedemptionRequest> for RedemptionRequest {
    fn from(req: CreateRedemptionRequest) -> Self {
        RedemptionRequest::new(
            req.customer_id,
            req.items.into_iter().map(|item| item.voucher_id),
        )
    }
}
