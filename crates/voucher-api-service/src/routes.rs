//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// 品牌路由
fn brand_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/brand",
            post(handlers::brand::create_brand).get(handlers::brand::list_brands),
        )
        .route(
            "/brand/{id}",
            get(handlers::brand::get_brand)
                .put(handlers::brand::update_brand)
                .delete(handlers::brand::delete_brand),
        )
        .route(
            "/brand/{id}/vouchers",
            get(handlers::voucher::list_brand_vouchers),
        )
}

/// 券路由
fn voucher_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/voucher",
            post(handlers::voucher::create_voucher).get(handlers::voucher::list_vouchers),
        )
        .route(
            "/voucher/{id}",
            get(handlers::voucher::get_voucher)
                .put(handlers::voucher::update_voucher)
                .delete(handlers::voucher::delete_voucher),
        )
}

/// 兑换与交易路由
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transaction/redemption",
            post(handlers::transaction::create_redemption),
        )
        .route(
            "/transaction/redemption/{id}",
            get(handlers::transaction::get_redemption),
        )
        .route(
            "/customer/{id}/transactions",
            get(handlers::transaction::list_customer_transactions),
        )
}

/// 构建全部业务路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(brand_routes())
        .merge(voucher_routes())
        .merge(transaction_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_construction() {
        // 路由冲突会在构建时 panic
        let _router = api_routes();
    }
}
