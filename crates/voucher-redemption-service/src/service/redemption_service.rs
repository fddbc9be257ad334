//! 券兑换服务
//!
//! 兑换流程：
//!
//! 1. 明细为空直接拒绝，不访问存储
//! 2. 按请求顺序逐条查询券：不存在或已过期则拒绝，否则以券的当前积分作为明细积分
//! 3. 汇总总积分，交易状态 pending -> completed
//! 4. 交易头与明细在同一个数据库事务中写入
//!
//! 第 2 步的任何失败都不会写入数据。状态在写入前完成流转，
//! 持久化后的交易不会停留在 pending。

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument, warn};

use voucher_shared::observability::metrics;

use crate::error::{RedemptionError, Result};
use crate::models::{NewTransaction, NewTransactionItem, Transaction};
use crate::repository::{TransactionRepositoryTrait, VoucherRepositoryTrait};
use crate::service::dto::RedemptionRequest;

/// 券兑换服务
pub struct RedemptionService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    voucher_repo: Arc<dyn VoucherRepositoryTrait>,
}

impl RedemptionService {
    pub fn new(
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
        voucher_repo: Arc<dyn VoucherRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repo,
            voucher_repo,
        }
    }

    /// 创建兑换交易
    ///
    /// 成功时返回已完成的交易及其明细（明细顺序与请求一致）
    #[instrument(skip(self, request), fields(customer_id = request.customer_id, items = request.items.len()))]
    pub async fn create_redemption(&self, request: RedemptionRequest) -> Result<Transaction> {
        let start = Instant::now();
        let item_count = request.items.len();

        let result = self.execute_redemption(request).await;

        let elapsed = start.elapsed().as_secs_f64();
        match &result {
            Ok(transaction) => {
                metrics::record_redemption("completed", item_count, elapsed);
                metrics::record_redemption_points(transaction.total_points);
                info!(
                    transaction_id = transaction.id,
                    total_points = transaction.total_points,
                    "兑换成功"
                );
            }
            Err(e) => {
                metrics::record_redemption(e.error_code(), item_count, elapsed);
                warn!(error = %e, code = e.error_code(), "兑换失败");
            }
        }

        result
    }

    async fn execute_redemption(&self, request: RedemptionRequest) -> Result<Transaction> {
        if request.items.is_empty() {
            return Err(RedemptionError::EmptyItems);
        }

        let now = Utc::now();
        let mut items = Vec::with_capacity(request.items.len());

        for item in &request.items {
            let voucher = self
                .voucher_repo
                .get_voucher_by_id(item.voucher_id)
                .await?
                .ok_or(RedemptionError::VoucherNotFound(item.voucher_id))?;

            if voucher.is_expired_at(now) {
                return Err(RedemptionError::VoucherExpired(voucher.id));
            }

            items.push(NewTransactionItem {
                voucher_id: voucher.id,
                points_used: voucher.points,
            });
        }

        let mut transaction = NewTransaction::pending(request.customer_id, items);
        transaction.complete()?;

        self.transaction_repo.create_transaction(&transaction).await
    }

    /// 获取交易及其明细
    #[instrument(skip(self))]
    pub async fn get_transaction_by_id(&self, id: i64) -> Result<Transaction> {
        let mut transaction = self
            .transaction_repo
            .get_transaction_by_id(id)
            .await?
            .ok_or(RedemptionError::TransactionNotFound(id))?;

        transaction.items = self.transaction_repo.get_transaction_items(id).await?;
        Ok(transaction)
    }

    /// 获取客户的全部交易（最新的在前），每笔交易附带明细
    #[instrument(skip(self))]
    pub async fn get_customer_transactions(&self, customer_id: i64) -> Result<Vec<Transaction>> {
        let mut transactions = self
            .transaction_repo
            .get_transactions_by_customer_id(customer_id)
            .await?;

        for transaction in &mut transactions {
            transaction.items = self
                .transaction_repo
                .get_transaction_items(transaction.id)
                .await?;
        }

        Ok(transactions)
    }
}
