//! 券服务
//!
//! 创建/更新券前的业务校验：
//! - 所属品牌必须存在
//! - 有效期（如设置）必须晚于当前时间
//! - 积分必须大于 0
//! - 更新时目标券必须存在

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::error::{RedemptionError, Result};
use crate::models::{NewVoucher, Voucher};
use crate::repository::{BrandRepositoryTrait, VoucherRepositoryTrait};

/// 券服务
pub struct VoucherService {
    voucher_repo: Arc<dyn VoucherRepositoryTrait>,
    brand_repo: Arc<dyn BrandRepositoryTrait>,
}

impl VoucherService {
    pub fn new(
        voucher_repo: Arc<dyn VoucherRepositoryTrait>,
        brand_repo: Arc<dyn BrandRepositoryTrait>,
    ) -> Self {
        Self {
            voucher_repo,
            brand_repo,
        }
    }

    #[instrument(skip(self, voucher), fields(brand_id = voucher.brand_id, code = %voucher.code))]
    pub async fn create_voucher(&self, voucher: NewVoucher) -> Result<Voucher> {
        self.ensure_brand_exists(voucher.brand_id).await?;
        validate_voucher(&voucher, Utc::now())?;

        let created = self.voucher_repo.create_voucher(&voucher).await?;
        info!(voucher_id = created.id, "券创建成功");
        Ok(created)
    }

    /// 获取券及其所属品牌
    #[instrument(skip(self))]
    pub async fn get_voucher(&self, id: i64) -> Result<Voucher> {
        self.voucher_repo
            .get_voucher_by_id(id)
            .await?
            .ok_or(RedemptionError::VoucherNotFound(id))
    }

    /// 列出品牌下的券，品牌不存在时返回 `BrandNotFound`
    #[instrument(skip(self))]
    pub async fn get_vouchers_by_brand(&self, brand_id: i64) -> Result<Vec<Voucher>> {
        self.ensure_brand_exists(brand_id).await?;
        self.voucher_repo.get_vouchers_by_brand_id(brand_id).await
    }

    #[instrument(skip(self, voucher), fields(brand_id = voucher.brand_id))]
    pub async fn update_voucher(&self, id: i64, voucher: NewVoucher) -> Result<Voucher> {
        self.ensure_brand_exists(voucher.brand_id).await?;
        validate_voucher(&voucher, Utc::now())?;

        if self.voucher_repo.get_voucher_by_id(id).await?.is_none() {
            return Err(RedemptionError::VoucherNotFound(id));
        }

        let updated = self.voucher_repo.update_voucher(id, &voucher).await?;
        info!(voucher_id = id, "券更新成功");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_voucher(&self, id: i64) -> Result<()> {
        self.voucher_repo.delete_voucher(id).await?;
        info!(voucher_id = id, "券已删除");
        Ok(())
    }

    pub async fn list_vouchers(&self) -> Result<Vec<Voucher>> {
        self.voucher_repo.list_vouchers().await
    }

    async fn ensure_brand_exists(&self, brand_id: i64) -> Result<()> {
        match self.brand_repo.get_brand_by_id(brand_id).await? {
            Some(_) => Ok(()),
            None => Err(RedemptionError::BrandNotFound(brand_id)),
        }
    }
}

/// 校验券的有效期和积分
fn validate_voucher(voucher: &NewVoucher, now: DateTime<Utc>) -> Result<()> {
    if voucher.valid_until.is_some_and(|valid_until| valid_until <= now) {
        return Err(RedemptionError::ValidUntilInPast);
    }

    if voucher.points <= 0 {
        return Err(RedemptionError::InvalidPoints(voucher.points));
    }

    Ok(())
}
