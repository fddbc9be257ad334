//! 券兑换核心服务
//!
//! 管理品牌、品牌发行的券，以及客户用积分兑换券的交易。
//!
//! ## 核心功能
//!
//! - **品牌管理**：品牌的增删改查
//! - **券管理**：券的增删改查，创建/更新时校验品牌、有效期和积分
//! - **兑换**：校验每张券的有效性，按券的当前积分计算总额，交易头与明细原子写入
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{ErrorKind, RedemptionError, Result};
pub use models::*;
pub use repository::{BrandRepository, TransactionRepository, VoucherRepository};
pub use service::{BrandService, RedemptionService, VoucherService, dto};
