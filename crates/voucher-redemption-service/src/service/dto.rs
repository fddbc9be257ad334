//! 服务层数据传输对象

use serde::{Deserialize, Serialize};

/// 兑换请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRequest {
    pub customer_id: i64,
    pub items: Vec<RedemptionItemRequest>,
}

/// 兑换明细请求
///
/// 只携带券 ID，积分以兑换时券的当前积分为准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionItemRequest {
    pub voucher_id: i64,
}

impl RedemptionRequest {
    pub fn new(customer_id: i64, voucher_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            customer_id,
            items: voucher_ids
                .into_iter()
                .map(|voucher_id| RedemptionItemRequest { voucher_id })
                .collect(),
        }
    }
}
