//! 品牌实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 品牌
///
/// 券的发行方，一个品牌可拥有多张券
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建或更新品牌时写入的字段
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBrand {
    pub name: String,
    pub description: String,
}

impl NewBrand {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
