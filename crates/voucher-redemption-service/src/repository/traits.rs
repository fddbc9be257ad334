//! 仓储 Trait 定义
//!
//! 服务层依赖这些抽象而非具体实现，便于 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Brand, NewBrand, NewTransaction, NewVoucher, Transaction, TransactionItem, TransactionStatus,
    Voucher,
};

/// 品牌仓储接口
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait BrandRepositoryTrait: Send + Sync {
    async fn create_brand(&self, brand: &NewBrand) -> Result<Brand>;
    async fn get_brand_by_id(&self, id: i64) -> Result<Option<Brand>>;
    async fn update_brand(&self, id: i64, brand: &NewBrand) -> Result<Brand>;
    async fn delete_brand(&self, id: i64) -> Result<()>;
    async fn list_brands(&self) -> Result<Vec<Brand>>;
}

/// 券仓储接口
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait VoucherRepositoryTrait: Send + Sync {
    async fn create_voucher(&self, voucher: &NewVoucher) -> Result<Voucher>;
    /// 附带品牌信息
    async fn get_voucher_by_id(&self, id: i64) -> Result<Option<Voucher>>;
    async fn get_vouchers_by_brand_id(&self, brand_id: i64) -> Result<Vec<Voucher>>;
    async fn update_voucher(&self, id: i64, voucher: &NewVoucher) -> Result<Voucher>;
    async fn delete_voucher(&self, id: i64) -> Result<()>;
    async fn list_vouchers(&self) -> Result<Vec<Voucher>>;
}

/// 交易仓储接口
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// 交易头与全部明细在同一个数据库事务中写入
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction>;
    /// 仅返回交易头，明细通过 `get_transaction_items` 获取
    async fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>>;
    async fn get_transactions_by_customer_id(&self, customer_id: i64) -> Result<Vec<Transaction>>;
    async fn update_transaction(&self, id: i64, status: TransactionStatus) -> Result<()>;
    async fn get_transaction_items(&self, transaction_id: i64) -> Result<Vec<TransactionItem>>;
}
