//! 交易仓储
//!
//! 交易头与明细的数据访问。创建交易时交易头和全部明细在同一个
//! 数据库事务中写入，任一步失败时事务随 drop 回滚，不留下部分数据。

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use super::traits::TransactionRepositoryTrait;
use crate::error::{RedemptionError, Result};
use crate::models::{
    NewTransaction, NewTransactionItem, Transaction, TransactionItem, TransactionStatus,
    VoucherSnapshot,
};

/// 明细与券的关联查询行
#[derive(sqlx::FromRow)]
struct TransactionItemRow {
    #[sqlx(flatten)]
    item: TransactionItem,
    voucher_code: Option<String>,
    voucher_name: Option<String>,
    voucher_points: Option<i32>,
}

impl TransactionItemRow {
    fn into_item(self) -> TransactionItem {
        let mut item = self.item;
        if let (Some(code), Some(name), Some(points)) =
            (self.voucher_code, self.voucher_name, self.voucher_points)
        {
            item.voucher = Some(VoucherSnapshot {
                id: item.voucher_id,
                code,
                name,
                points,
            });
        }
        item
    }
}

/// 交易仓储
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 原子写入交易头和明细
    ///
    /// 明细按传入顺序插入，返回的交易包含已分配 ID 的明细
    #[instrument(skip(self, transaction), fields(customer_id = transaction.customer_id, items = transaction.items.len()))]
    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let mut tx = self.pool.begin().await?;

        let mut created = Self::create_header_in_tx(&mut *tx, transaction).await?;

        let mut items = Vec::with_capacity(transaction.items.len());
        for item in &transaction.items {
            items.push(Self::create_item_in_tx(&mut *tx, created.id, item).await?);
        }

        tx.commit().await?;

        created.items = items;
        Ok(created)
    }

    /// 在事务中写入交易头
    async fn create_header_in_tx(
        conn: &mut PgConnection,
        transaction: &NewTransaction,
    ) -> Result<Transaction> {
        let header = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (customer_id, total_points, status, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, customer_id, total_points, status, created_at, updated_at
            "#,
        )
        .bind(transaction.customer_id)
        .bind(transaction.total_points)
        .bind(transaction.status)
        .fetch_one(conn)
        .await?;

        Ok(header)
    }

    /// 在事务中写入单条明细
    async fn create_item_in_tx(
        conn: &mut PgConnection,
        transaction_id: i64,
        item: &NewTransactionItem,
    ) -> Result<TransactionItem> {
        let created = sqlx::query_as::<_, TransactionItem>(
            r#"
            INSERT INTO transaction_items (transaction_id, voucher_id, points_used, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, transaction_id, voucher_id, points_used, created_at
            "#,
        )
        .bind(transaction_id)
        .bind(item.voucher_id)
        .bind(item.points_used)
        .fetch_one(conn)
        .await?;

        Ok(created)
    }

    pub async fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, customer_id, total_points, status, created_at, updated_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// 查询客户的交易，最新的在前
    pub async fn get_transactions_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, customer_id, total_points, status, created_at, updated_at
            FROM transactions
            WHERE customer_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// 更新交易状态
    pub async fn update_transaction(&self, id: i64, status: TransactionStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RedemptionError::TransactionNotFound(id));
        }

        Ok(())
    }

    /// 查询交易明细，按写入顺序返回并附带券信息
    pub async fn get_transaction_items(&self, transaction_id: i64) -> Result<Vec<TransactionItem>> {
        let rows = sqlx::query_as::<_, TransactionItemRow>(
            r#"
            SELECT ti.id, ti.transaction_id, ti.voucher_id, ti.points_used, ti.created_at,
                   v.code AS voucher_code, v.name AS voucher_name, v.points AS voucher_points
            FROM transaction_items ti
            LEFT JOIN vouchers v ON v.id = ti.voucher_id
            WHERE ti.transaction_id = $1
            ORDER BY ti.id ASC
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionItemRow::into_item).collect())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        self.create_transaction(transaction).await
    }

    async fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        self.get_transaction_by_id(id).await
    }

    async fn get_transactions_by_customer_id(&self, customer_id: i64) -> Result<Vec<Transaction>> {
        self.get_transactions_by_customer_id(customer_id).await
    }

    async fn update_transaction(&self, id: i64, status: TransactionStatus) -> Result<()> {
        self.update_transaction(id, status).await
    }

    async fn get_transaction_items(&self, transaction_id: i64) -> Result<Vec<TransactionItem>> {
        self.get_transaction_items(transaction_id).await
    }
}
