//! 数据库仓储层
//!
//! 提供品牌、券、交易的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 使用 SQLx 进行数据库操作，连接池由调用方创建后注入
//! - 更新/删除未命中任何行时返回对应的 NotFound 错误
//! - 定义 trait 接口以支持 mock 测试

mod brand_repo;
mod traits;
mod transaction_repo;
mod voucher_repo;

pub use brand_repo::BrandRepository;
pub use traits::*;
pub use transaction_repo::TransactionRepository;
pub use voucher_repo::VoucherRepository;
