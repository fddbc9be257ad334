//! 品牌仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::BrandRepositoryTrait;
use crate::error::{RedemptionError, Result, map_foreign_key};
use crate::models::{Brand, NewBrand};

/// 品牌仓储
pub struct BrandRepository {
    pool: PgPool,
}

impl BrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 创建品牌，返回包含 ID 和时间戳的完整记录
    pub async fn create_brand(&self, brand: &NewBrand) -> Result<Brand> {
        let created = sqlx::query_as::<_, Brand>(
            r#"
            INSERT INTO brands (name, description, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&brand.name)
        .bind(&brand.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn get_brand_by_id(&self, id: i64) -> Result<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM brands
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brand)
    }

    /// 更新品牌名称和描述
    pub async fn update_brand(&self, id: i64, brand: &NewBrand) -> Result<Brand> {
        let updated = sqlx::query_as::<_, Brand>(
            r#"
            UPDATE brands
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&brand.name)
        .bind(&brand.description)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(RedemptionError::BrandNotFound(id))
    }

    /// 删除品牌
    ///
    /// 仍有券引用该品牌时返回 `BrandHasVouchers`
    pub async fn delete_brand(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_foreign_key(e, RedemptionError::BrandHasVouchers(id)))?;

        if result.rows_affected() == 0 {
            return Err(RedemptionError::BrandNotFound(id));
        }

        Ok(())
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM brands
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }
}

#[async_trait]
impl BrandRepositoryTrait for BrandRepository {
    async fn create_brand(&self, brand: &NewBrand) -> Result<Brand> {
        self.create_brand(brand).await
    }

    async fn get_brand_by_id(&self, id: i64) -> Result<Option<Brand>> {
        self.get_brand_by_id(id).await
    }

    async fn update_brand(&self, id: i64, brand: &NewBrand) -> Result<Brand> {
        self.update_brand(id, brand).await
    }

    async fn delete_brand(&self, id: i64) -> Result<()> {
        self.delete_brand(id).await
    }

    async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.list_brands().await
    }
}
