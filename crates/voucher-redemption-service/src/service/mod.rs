//! 服务层
//!
//! 实现品牌、券和兑换的业务逻辑，依赖仓储 trait 而非具体实现。
//!
//! ## 模块结构
//!
//! - `dto`: 数据传输对象定义
//! - `brand_service`: 品牌管理
//! - `voucher_service`: 券管理与校验
//! - `redemption_service`: 兑换流程

pub mod brand_service;
pub mod dto;
pub mod redemption_service;
pub mod voucher_service;

pub use brand_service::BrandService;
pub use dto::*;
pub use redemption_service::RedemptionService;
pub use voucher_service::VoucherService;
