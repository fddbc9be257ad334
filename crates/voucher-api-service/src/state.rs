//! 应用状态定义

use std::sync::Arc;

use sqlx::PgPool;
use voucher_redemption::repository::{BrandRepository, TransactionRepository, VoucherRepository};
use voucher_redemption::service::{BrandService, RedemptionService, VoucherService};

/// Axum 应用共享状态
///
/// 各服务通过 Arc 在 handler 间共享，底层共用同一个连接池
#[derive(Clone)]
pub struct AppState {
    pub brand_service: Arc<BrandService>,
    pub voucher_service: Arc<VoucherService>,
    pub redemption_service: Arc<RedemptionService>,
}

impl AppState {
    pub fn new(
        brand_service: Arc<BrandService>,
        voucher_service: Arc<VoucherService>,
        redemption_service: Arc<RedemptionService>,
    ) -> Self {
        Self {
            brand_service,
            voucher_service,
            redemption_service,
        }
    }

    /// 基于连接池装配 PostgreSQL 仓储和服务
    pub fn from_pool(pool: PgPool) -> Self {
        let brand_repo = Arc::new(BrandRepository::new(pool.clone()));
        let voucher_repo = Arc::new(VoucherRepository::new(pool.clone()));
        let transaction_repo = Arc::new(TransactionRepository::new(pool));

        Self::new(
            Arc::new(BrandService::new(brand_repo.clone())),
            Arc::new(VoucherService::new(voucher_repo.clone(), brand_repo)),
            Arc::new(RedemptionService::new(transaction_repo, voucher_repo)),
        )
    }
}
