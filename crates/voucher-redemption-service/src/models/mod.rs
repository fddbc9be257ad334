//! 券兑换服务领域模型
//!
//! 包含品牌、券、兑换交易的实体定义

pub mod brand;
pub mod transaction;
pub mod voucher;

// 重新导出常用类型
pub use brand::{Brand, NewBrand};
pub use transaction::{
    NewTransaction, NewTransactionItem, Transaction, TransactionItem, TransactionStatus,
    VoucherSnapshot,
};
pub use voucher::{NewVoucher, Voucher};
