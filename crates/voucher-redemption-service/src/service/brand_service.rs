//! 品牌服务

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{RedemptionError, Result};
use crate::models::{Brand, NewBrand};
use crate::repository::BrandRepositoryTrait;

/// 品牌服务
///
/// 对品牌仓储的薄封装，把不存在的品牌转换为 `BrandNotFound`
pub struct BrandService {
    brand_repo: Arc<dyn BrandRepositoryTrait>,
}

impl BrandService {
    pub fn new(brand_repo: Arc<dyn BrandRepositoryTrait>) -> Self {
        Self { brand_repo }
    }

    #[instrument(skip(self, brand), fields(name = %brand.name))]
    pub async fn create_brand(&self, brand: NewBrand) -> Result<Brand> {
        let created = self.brand_repo.create_brand(&brand).await?;
        info!(brand_id = created.id, "品牌创建成功");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: i64) -> Result<Brand> {
        self.brand_repo
            .get_brand_by_id(id)
            .await?
            .ok_or(RedemptionError::BrandNotFound(id))
    }

    #[instrument(skip(self, brand))]
    pub async fn update_brand(&self, id: i64, brand: NewBrand) -> Result<Brand> {
        let updated = self.brand_repo.update_brand(id, &brand).await?;
        info!(brand_id = id, "品牌更新成功");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: i64) -> Result<()> {
        self.brand_repo.delete_brand(id).await?;
        info!(brand_id = id, "品牌已删除");
        Ok(())
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.brand_repo.list_brands().await
    }
}
