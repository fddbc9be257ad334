//! HTTP 处理器测试
//!
//! 用 mock 仓储装配真实服务，通过 `oneshot` 驱动路由，
//! 校验状态码和响应信封。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use mockall::predicate::eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use voucher_api::{routes, state::AppState};
use voucher_redemption::models::{Brand, NewTransaction, Transaction, TransactionItem, Voucher};
use voucher_redemption::repository::{
    MockBrandRepositoryTrait, MockTransactionRepositoryTrait, MockVoucherRepositoryTrait,
};
use voucher_redemption::service::{BrandService, RedemptionService, VoucherService};
use voucher_redemption::RedemptionError;
use voucher_shared::test_utils::TestDataGenerator;

// ==================== 辅助函数 ====================

struct Mocks {
    brands: MockBrandRepositoryTrait,
    vouchers: MockVoucherRepositoryTrait,
    transactions: MockTransactionRepositoryTrait,
}

impl Mocks {
    fn new() -> Self {
        Self {
            brands: MockBrandRepositoryTrait::new(),
            vouchers: MockVoucherRepositoryTrait::new(),
            transactions: MockTransactionRepositoryTrait::new(),
        }
    }

    /// 装配路由；券服务与兑换服务共用同一个券仓储 mock
    fn into_app(self) -> Router {
        let brands = Arc::new(self.brands);
        let vouchers = Arc::new(self.vouchers);
        let transactions = Arc::new(self.transactions);

        let state = AppState::new(
            Arc::new(BrandService::new(brands.clone())),
            Arc::new(VoucherService::new(vouchers.clone(), brands)),
            Arc::new(RedemptionService::new(transactions, vouchers)),
        );

        routes::api_routes().with_state(state)
    }
}

fn brand(id: i64, name: &str) -> Brand {
    let now = Utc::now();
    Brand {
        id,
        name: name.to_string(),
        description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

fn voucher(id: i64, points: i32, valid_until: Option<DateTime<Utc>>) -> Voucher {
    let now = Utc::now();
    Voucher {
        id,
        brand_id: 1,
        code: format!("V-{}", id),
        name: format!("Voucher {}", id),
        description: String::new(),
        points,
        valid_until,
        created_at: now,
        updated_at: now,
        brand: None,
    }
}

fn persisted(id: i64, tx: &NewTransaction) -> Transaction {
    let now = Utc::now();
    Transaction {
        id,
        customer_id: tx.customer_id,
        total_points: tx.total_points,
        status: tx.status,
        items: tx
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| TransactionItem {
                id: i as i64 + 1,
                transaction_id: id,
                voucher_id: item.voucher_id,
                points_used: item.points_used,
                created_at: now,
                voucher: None,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

// ==================== 品牌 ====================

#[tokio::test]
async fn test_create_brand_missing_name() {
    let app = Mocks::new().into_app();

    let (status, body) = send(app, "POST", "/brand", Some(r#"{"description":"x"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "status": 400, "message": "Nama brand tidak boleh kosong" })
    );
}

#[tokio::test]
async fn test_create_brand_short_name() {
    let app = Mocks::new().into_app();

    let (status, body) = send(app, "POST", "/brand", Some(r#"{"name":"ab"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nama brand minimal harus 3 karakter");
}

#[tokio::test]
async fn test_create_brand_malformed_body() {
    let app = Mocks::new().into_app();

    let (status, body) = send(app, "POST", "/brand", Some("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_create_brand_success() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_create_brand()
        .times(1)
        .returning(|b| Ok(brand(1, &b.name)));

    let (status, body) = send(
        mocks.into_app(),
        "POST",
        "/brand",
        Some(&TestDataGenerator::brand("Kopi Kenangan").to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "Brand created successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Kopi Kenangan");
}

#[tokio::test]
async fn test_get_brand_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_get_brand_by_id()
        .with(eq(999))
        .returning(|_| Ok(None));

    let (status, body) = send(mocks.into_app(), "GET", "/brand/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": 404, "message": "Brand not found" }));
}

#[tokio::test]
async fn test_get_brand_invalid_id() {
    let app = Mocks::new().into_app();

    let (status, body) = send(app, "GET", "/brand/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "status": 400, "message": "Invalid ID" }));
}

#[tokio::test]
async fn test_get_brand_storage_failure_is_generic() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_get_brand_by_id()
        .returning(|_| Err(RedemptionError::Internal("pool exhausted".to_string())));

    let (status, body) = send(mocks.into_app(), "GET", "/brand/1", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn test_delete_brand() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_delete_brand()
        .with(eq(3))
        .returning(|_| Ok(()));

    let (status, body) = send(mocks.into_app(), "DELETE", "/brand/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": 200, "message": "Brand deleted successfully" })
    );
}

#[tokio::test]
async fn test_delete_brand_with_vouchers() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_delete_brand()
        .returning(|id| Err(RedemptionError::BrandHasVouchers(id)));

    let (status, body) = send(mocks.into_app(), "DELETE", "/brand/3", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "status": 400, "message": "brand still has vouchers" })
    );
}

// ==================== 券 ====================

#[tokio::test]
async fn test_create_voucher_success() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_get_brand_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(brand(id, "Starbucks"))));
    mocks
        .vouchers
        .expect_create_voucher()
        .withf(|v| v.code == "Starbucks 50K-code" && v.points == 100)
        .times(1)
        .returning(|v| {
            let mut created = voucher(10, v.points, v.valid_until);
            created.code = v.code.clone();
            created.name = v.name.clone();
            Ok(created)
        });

    let body = TestDataGenerator::voucher(1, "Starbucks 50K", 100, 30).to_string();
    let (status, body) = send(mocks.into_app(), "POST", "/voucher", Some(&body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Voucher created successfully");
    assert_eq!(body["data"]["id"], 10);
    assert_eq!(body["data"]["code"], "Starbucks 50K-code");
}

#[tokio::test]
async fn test_delete_voucher_in_use() {
    let mut mocks = Mocks::new();
    mocks
        .vouchers
        .expect_delete_voucher()
        .with(eq(4))
        .returning(|id| Err(RedemptionError::VoucherInUse(id)));

    let (status, body) = send(mocks.into_app(), "DELETE", "/voucher/4", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "voucher is used by existing transactions");
}

#[tokio::test]
async fn test_create_voucher_past_valid_until() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_get_brand_by_id()
        .returning(|id| Ok(Some(brand(id, "Starbucks"))));
    mocks.vouchers.expect_create_voucher().never();

    let body = TestDataGenerator::voucher(1, "Starbucks 50K", 100, -1).to_string();

    let (status, body) = send(mocks.into_app(), "POST", "/voucher", Some(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "valid_until must be in the future");
}

#[tokio::test]
async fn test_create_voucher_unknown_brand() {
    let mut mocks = Mocks::new();
    mocks.brands.expect_get_brand_by_id().returning(|_| Ok(None));

    let body = json!({ "brand_id": 77, "code": "X", "name": "X", "points": 10 }).to_string();
    let (status, body) = send(mocks.into_app(), "POST", "/voucher", Some(&body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Brand not found");
}

#[tokio::test]
async fn test_get_voucher_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .vouchers
        .expect_get_voucher_by_id()
        .returning(|_| Ok(None));

    let (status, body) = send(mocks.into_app(), "GET", "/voucher/5", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Voucher not found");
}

#[tokio::test]
async fn test_brand_vouchers_invalid_id() {
    let app = Mocks::new().into_app();

    let (status, body) = send(app, "GET", "/brand/x1/vouchers", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid brand ID");
}

#[tokio::test]
async fn test_brand_without_vouchers() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_get_brand_by_id()
        .returning(|id| Ok(Some(brand(id, "Empty Brand"))));
    mocks
        .vouchers
        .expect_get_vouchers_by_brand_id()
        .returning(|_| Ok(vec![]));

    let (status, body) = send(mocks.into_app(), "GET", "/brand/1/vouchers", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Brand tidak memiliki voucher");
}

#[tokio::test]
async fn test_brand_vouchers_listed() {
    let mut mocks = Mocks::new();
    mocks
        .brands
        .expect_get_brand_by_id()
        .returning(|id| Ok(Some(brand(id, "Starbucks"))));
    mocks
        .vouchers
        .expect_get_vouchers_by_brand_id()
        .with(eq(1))
        .returning(|_| Ok(vec![voucher(10, 100, None), voucher(11, 200, None)]));

    let (status, body) = send(mocks.into_app(), "GET", "/brand/1/vouchers", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["id"], 10);
}

// ==================== 兑换 ====================

#[tokio::test]
async fn test_redemption_totals_and_order() {
    let mut mocks = Mocks::new();
    mocks
        .vouchers
        .expect_get_voucher_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(voucher(id, 50_000, Some(Utc::now() + Duration::days(3))))));
    mocks
        .vouchers
        .expect_get_voucher_by_id()
        .with(eq(2))
        .returning(|id| Ok(Some(voucher(id, 25_000, None))));
    mocks
        .transactions
        .expect_create_transaction()
        .times(1)
        .returning(|tx| Ok(persisted(500, tx)));

    let request = TestDataGenerator::redemption(42, &[1, 2]).to_string();
    let (status, body) = send(
        mocks.into_app(),
        "POST",
        "/transaction/redemption",
        Some(&request),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Redemption created successfully");
    assert_eq!(body["data"]["total_points"], 75_000);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["items"][0]["voucher_id"], 1);
    assert_eq!(body["data"]["items"][0]["points_used"], 50_000);
    assert_eq!(body["data"]["items"][1]["voucher_id"], 2);
    assert_eq!(body["data"]["items"][1]["points_used"], 25_000);
}

#[tokio::test]
async fn test_redemption_ignores_client_points() {
    let mut mocks = Mocks::new();
    mocks
        .vouchers
        .expect_get_voucher_by_id()
        .returning(|id| Ok(Some(voucher(id, 500, None))));
    mocks
        .transactions
        .expect_create_transaction()
        .withf(|tx| tx.total_points == 500 && tx.items[0].points_used == 500)
        .times(1)
        .returning(|tx| Ok(persisted(501, tx)));

    let (status, body) = send(
        mocks.into_app(),
        "POST",
        "/transaction/redemption",
        Some(r#"{"customer_id": 3, "items": [{"voucher_id": 1, "points_used": 1}]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total_points"], 500);
}

#[tokio::test]
async fn test_redemption_expired_voucher() {
    let mut mocks = Mocks::new();
    mocks
        .vouchers
        .expect_get_voucher_by_id()
        .returning(|id| Ok(Some(voucher(id, 100, Some(Utc::now() - Duration::days(1))))));
    mocks.transactions.expect_create_transaction().never();

    let (status, body) = send(
        mocks.into_app(),
        "POST",
        "/transaction/redemption",
        Some(r#"{"customer_id": 1, "items": [{"voucher_id": 9}]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "voucher has expired");
}

#[tokio::test]
async fn test_redemption_unknown_voucher() {
    let mut mocks = Mocks::new();
    mocks
        .vouchers
        .expect_get_voucher_by_id()
        .returning(|_| Ok(None));
    mocks.transactions.expect_create_transaction().never();

    let (status, body) = send(
        mocks.into_app(),
        "POST",
        "/transaction/redemption",
        Some(&TestDataGenerator::redemption(1, &[9]).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "voucher not found");
}

#[tokio::test]
async fn test_redemption_empty_items() {
    let app = Mocks::new().into_app();

    let (status, body) = send(
        app,
        "POST",
        "/transaction/redemption",
        Some(r#"{"customer_id": 1, "items": []}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "transaction must have at least one item");
}

#[tokio::test]
async fn test_redemption_missing_customer() {
    let app = Mocks::new().into_app();

    let (status, body) = send(
        app,
        "POST",
        "/transaction/redemption",
        Some(r#"{"items": [{"voucher_id": 1}]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "customer ID is required");
}

#[tokio::test]
async fn test_get_redemption_invalid_id() {
    let app = Mocks::new().into_app();

    let (status, body) = send(app, "GET", "/transaction/redemption/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid transaction ID");
}

#[tokio::test]
async fn test_get_redemption_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .transactions
        .expect_get_transaction_by_id()
        .returning(|_| Ok(None));

    let (status, body) = send(mocks.into_app(), "GET", "/transaction/redemption/77", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "status": 404, "message": "Transaction not found" })
    );
}

#[tokio::test]
async fn test_customer_transactions_empty() {
    let mut mocks = Mocks::new();
    mocks
        .transactions
        .expect_get_transactions_by_customer_id()
        .with(eq(8))
        .returning(|_| Ok(vec![]));

    let (status, body) = send(mocks.into_app(), "GET", "/customer/8/transactions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}
