//! 数据传输对象
//!
//! - `request`: 请求体结构与校验规则
//! - `response`: 统一响应信封

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
