//! 券实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::brand::Brand;

/// 券
///
/// 由品牌发行，兑换时消耗固定积分。`valid_until` 为空表示永不过期。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Voucher {
    pub id: i64,
    pub brand_id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    /// 兑换所需积分，恒大于 0
    pub points: i32,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 关联查询时附带的品牌信息
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
}

impl Voucher {
    /// 在给定时刻是否已过期
    ///
    /// 有效期恰好等于该时刻时仍视为有效
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.is_some_and(|valid_until| valid_until < now)
    }
}

/// 创建或更新券时写入的字段
#[derive(Debug, Clone, PartialEq)]
pub struct NewVoucher {
    pub brand_id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub points: i32,
    pub valid_until: Option<DateTime<Utc>>,
}
