//! 券兑换 HTTP 服务
//!
//! 提供品牌、券和兑换交易的 REST API。
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型与 HTTP 状态映射
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (snake_case)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use dto::{ApiResponse, CreateRedemptionRequest, BrandRequest, VoucherRequest};
pub use error::{ApiError, Result};
pub use state::AppState;
