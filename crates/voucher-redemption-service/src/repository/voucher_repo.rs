//! 券仓储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::VoucherRepositoryTrait;
use crate::error::{RedemptionError, Result, map_foreign_key};
use crate::models::{Brand, NewVoucher, Voucher};

const VOUCHER_COLUMNS: &str =
    "id, brand_id, code, name, description, points, valid_until, created_at, updated_at";

/// 券与品牌的关联查询行
#[derive(sqlx::FromRow)]
struct VoucherWithBrandRow {
    #[sqlx(flatten)]
    voucher: Voucher,
    brand_name: Option<String>,
    brand_description: Option<String>,
    brand_created_at: Option<DateTime<Utc>>,
    brand_updated_at: Option<DateTime<Utc>>,
}

impl VoucherWithBrandRow {
    fn into_voucher(self) -> Voucher {
        let mut voucher = self.voucher;
        if let (Some(name), Some(created_at), Some(updated_at)) =
            (self.brand_name, self.brand_created_at, self.brand_updated_at)
        {
            voucher.brand = Some(Brand {
                id: voucher.brand_id,
                name,
                description: self.brand_description.unwrap_or_default(),
                created_at,
                updated_at,
            });
        }
        voucher
    }
}

/// 券仓储
pub struct VoucherRepository {
    pool: PgPool,
}

impl VoucherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_voucher(&self, voucher: &NewVoucher) -> Result<Voucher> {
        let sql = format!(
            r#"
            INSERT INTO vouchers (brand_id, code, name, description, points, valid_until,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {VOUCHER_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Voucher>(&sql)
            .bind(voucher.brand_id)
            .bind(&voucher.code)
            .bind(&voucher.name)
            .bind(&voucher.description)
            .bind(voucher.points)
            .bind(voucher.valid_until)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// 获取券及其所属品牌
    pub async fn get_voucher_by_id(&self, id: i64) -> Result<Option<Voucher>> {
        let row = sqlx::query_as::<_, VoucherWithBrandRow>(
            r#"
            SELECT v.id, v.brand_id, v.code, v.name, v.description, v.points,
                   v.valid_until, v.created_at, v.updated_at,
                   b.name AS brand_name, b.description AS brand_description,
                   b.created_at AS brand_created_at, b.updated_at AS brand_updated_at
            FROM vouchers v
            LEFT JOIN brands b ON b.id = v.brand_id
            WHERE v.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VoucherWithBrandRow::into_voucher))
    }

    pub async fn get_vouchers_by_brand_id(&self, brand_id: i64) -> Result<Vec<Voucher>> {
        let sql = format!(
            r#"
            SELECT {VOUCHER_COLUMNS}
            FROM vouchers
            WHERE brand_id = $1
            ORDER BY id ASC
            "#
        );

        let vouchers = sqlx::query_as::<_, Voucher>(&sql)
            .bind(brand_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(vouchers)
    }

    pub async fn update_voucher(&self, id: i64, voucher: &NewVoucher) -> Result<Voucher> {
        let sql = format!(
            r#"
            UPDATE vouchers
            SET brand_id = $2, code = $3, name = $4, description = $5,
                points = $6, valid_until = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {VOUCHER_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Voucher>(&sql)
            .bind(id)
            .bind(voucher.brand_id)
            .bind(&voucher.code)
            .bind(&voucher.name)
            .bind(&voucher.description)
            .bind(voucher.points)
            .bind(voucher.valid_until)
            .fetch_optional(&self.pool)
            .await?;

        updated.ok_or(RedemptionError::VoucherNotFound(id))
    }

    /// 删除券，已被交易明细引用时返回 `VoucherInUse`
    pub async fn delete_voucher(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM vouchers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_foreign_key(e, RedemptionError::VoucherInUse(id)))?;

        if result.rows_affected() == 0 {
            return Err(RedemptionError::VoucherNotFound(id));
        }

        Ok(())
    }

    pub async fn list_vouchers(&self) -> Result<Vec<Voucher>> {
        let sql = format!("SELECT {VOUCHER_COLUMNS} FROM vouchers ORDER BY id ASC");

        let vouchers = sqlx::query_as::<_, Voucher>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(vouchers)
    }
}

#[async_trait]
impl VoucherRepositoryTrait for VoucherRepository {
    async fn create_voucher(&self, voucher: &NewVoucher) -> Result<Voucher> {
        self.create_voucher(voucher).await
    }

    async fn get_voucher_by_id(&self, id: i64) -> Result<Option<Voucher>> {
        self.get_voucher_by_id(id).await
    }

    async fn get_vouchers_by_brand_id(&self, brand_id: i64) -> Result<Vec<Voucher>> {
        self.get_vouchers_by_brand_id(brand_id).await
    }

    async fn update_voucher(&self, id: i64, voucher: &NewVoucher) -> Result<Voucher> {
        self.update_voucher(id, voucher).await
    }

    async fn delete_voucher(&self, id: i64) -> Result<()> {
        self.delete_voucher(id).await
    }

    async fn list_vouchers(&self) -> Result<Vec<Voucher>> {
        self.list_vouchers().await
    }
}
