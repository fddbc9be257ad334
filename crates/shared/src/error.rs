//! 基础设施错误类型
//!
//! 配置、数据库连接、迁移等启动阶段的错误，业务错误由各服务自行定义。

use thiserror::Error;

/// 基础设施错误
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// 基础设施 Result 类型别名
pub type Result<T> = std::result::Result<T, InfraError>;

impl InfraError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Migration(_) => "MIGRATION_ERROR",
        }
    }
}
