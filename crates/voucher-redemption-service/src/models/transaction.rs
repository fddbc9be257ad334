//! 兑换交易实体
//!
//! 一次兑换生成一条交易头和若干交易明细，明细按请求顺序保存，
//! 每条明细记录兑换时券的积分快照。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RedemptionError, Result};

/// 交易状态
///
/// pending -> completed / failed，completed 和 failed 为终态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum TransactionStatus {
    /// 处理中
    #[default]
    Pending,
    /// 已完成
    Completed,
    /// 失败
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// 是否允许从当前状态流转到目标状态
    pub fn can_transition_to(&self, target: TransactionStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Completed) | (Self::Pending, Self::Failed)
        )
    }

    /// 流转到目标状态，非法流转返回错误
    pub fn transition_to(self, target: TransactionStatus) -> Result<TransactionStatus> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(RedemptionError::InvalidStatusTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 兑换交易
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: i64,
    pub customer_id: i64,
    /// 明细积分之和，由服务端计算
    pub total_points: i64,
    pub status: TransactionStatus,
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<TransactionItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 交易明细，创建后不可修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransactionItem {
    pub id: i64,
    pub transaction_id: i64,
    pub voucher_id: i64,
    /// 兑换时券的积分快照
    pub points_used: i32,
    pub created_at: DateTime<Utc>,
    /// 查询时附带的券展示信息
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher: Option<VoucherSnapshot>,
}

/// 明细关联的券展示信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherSnapshot {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub points: i32,
}

/// 待写入的交易
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewTransaction {
    pub customer_id: i64,
    pub total_points: i64,
    pub status: TransactionStatus,
    pub items: Vec<NewTransactionItem>,
}

/// 待写入的交易明细
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTransactionItem {
    pub voucher_id: i64,
    pub points_used: i32,
}

impl NewTransaction {
    /// 以 pending 状态构建交易，总积分取明细之和
    pub fn pending(customer_id: i64, items: Vec<NewTransactionItem>) -> Self {
        let total_points = items.iter().map(|item| i64::from(item.points_used)).sum();
        Self {
            customer_id,
            total_points,
            status: TransactionStatus::Pending,
            items,
        }
    }

    /// pending -> completed
    pub fn complete(&mut self) -> Result<()> {
        self.status = self.status.transition_to(TransactionStatus::Completed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Completed).unwrap(),
            "\"completed\""
        );
        let status: TransactionStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, TransactionStatus::Failed);
    }

    #[test]
    fn test_status_transitions() {
        use TransactionStatus::*;

        let cases = vec![
            (Pending, Completed, true),
            (Pending, Failed, true),
            (Pending, Pending, false),
            (Completed, Pending, false),
            (Completed, Failed, false),
            (Failed, Completed, false),
        ];

        for (from, to, allowed) in cases {
            assert_eq!(
                from.can_transition_to(to),
                allowed,
                "{} -> {} should be {}",
                from,
                to,
                allowed
            );
        }
    }

    #[test]
    fn test_pending_sums_points() {
        let tx = NewTransaction::pending(
            7,
            vec![
                NewTransactionItem {
                    voucher_id: 1,
                    points_used: 50_000,
                },
                NewTransactionItem {
                    voucher_id: 2,
                    points_used: 25_000,
                },
            ],
        );

        assert_eq!(tx.total_points, 75_000);
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[test]
    fn test_complete_only_from_pending() {
        let mut tx = NewTransaction::pending(1, vec![]);
        tx.complete().unwrap();
        assert_eq!(tx.status, TransactionStatus::Completed);

        let err = tx.complete().unwrap_err();
        assert!(matches!(
            err,
            RedemptionError::InvalidStatusTransition {
                from: TransactionStatus::Completed,
                to: TransactionStatus::Completed,
            }
        ));
    }
}
