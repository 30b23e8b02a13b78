//! Integration tests for the sheet and order clients using wiremock HTTP mocks.

use std::str::FromStr;

use rust_decimal::Decimal;
use storefront_core::{
    AppConfig, CatalogState, Environment, ProductId, ShopError, Storefront,
};
use storefront_sheets::{OrderClient, SheetsClient, SheetsError};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALUES_PATH: &str = "/v4/spreadsheets/sheet-123/values/Sheet1!A2:F";

fn config(base_url: &str) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        sheet_id: Some("sheet-123".to_string()),
        api_key: Some("test-key".to_string()),
        sheet_name: "Sheet1".to_string(),
        sheet_range: "A2:F".to_string(),
        sheets_base_url: base_url.to_string(),
        checkout_password: Some("hunter2".to_string()),
        order_endpoint: Some(format!("{base_url}/exec")),
        request_timeout_secs: 30,
        user_agent: "storefront-test/0.1".to_string(),
    }
}

fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "range": "Sheet1!A2:F4",
        "majorDimension": "ROWS",
        "values": [
            ["Suzuki Motor Wheels", "https://img.example.com/1.png", "wheel, motorcycle", "5,000.00"],
            ["Honda Car Wheels", "", "wheel,car", "20,000.00", "https://img.example.com/2a.png"],
            ["Prime Wheels", "", "", "12,500.00"]
        ]
    })
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_products_maps_rows() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let client = SheetsClient::new(&config(&server.uri())).unwrap();
    let products = client.fetch_products().await.expect("should fetch products");

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].name, "Suzuki Motor Wheels");
    assert_eq!(products[0].tags, vec!["wheel", "motorcycle"]);
    assert_eq!(products[1].price, Decimal::from_str("20000.00").unwrap());
    assert_eq!(products[1].images, vec!["https://img.example.com/2a.png"]);
    assert_eq!(products[2].id, ProductId(3));
}

#[tokio::test]
async fn fetch_products_surfaces_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let client = SheetsClient::new(&config(&server.uri())).unwrap();
    let err = client.fetch_products().await.unwrap_err();

    assert!(
        matches!(err, SheetsError::UnexpectedStatus { status: 403, .. }),
        "expected 403, got {err:?}"
    );
    assert!(!err.to_string().contains("test-key"), "API key leaked: {err}");
}

#[tokio::test]
async fn fetch_products_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let client = SheetsClient::new(&config(&server.uri())).unwrap();
    let err = client.fetch_products().await.unwrap_err();
    assert!(matches!(err, SheetsError::Deserialize { .. }));
}

#[tokio::test]
async fn empty_sheet_puts_storefront_in_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "Sheet1!A2:F1000",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    let client = SheetsClient::new(&config(&server.uri())).unwrap();
    let mut shop = Storefront::new(None);
    let err = shop.load(&client).await.unwrap_err();

    assert_eq!(err, ShopError::EmptyCatalog);
    assert!(matches!(shop.state(), CatalogState::Failed(_)));
}

#[tokio::test]
async fn missing_api_key_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(0)
        .mount(&server)
        .await;

    let mut cfg = config(&server.uri());
    cfg.api_key = None;
    let client = SheetsClient::new(&cfg).unwrap();
    let mut shop = Storefront::new(None);
    let err = shop.load(&client).await.unwrap_err();

    assert_eq!(
        err,
        ShopError::Fetch("missing configuration: STOREFRONT_API_KEY is not set".to_string())
    );
}

#[tokio::test]
async fn checkout_posts_order_and_clears_cart() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_partial_json(serde_json::json!({
            "items": "Honda Car Wheels x2",
            "totalQuantity": 2,
            "subtotal": "40000.00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config(&server.uri());
    let sheets = SheetsClient::new(&cfg).unwrap();
    let orders = OrderClient::new(&cfg).unwrap();
    let mut shop = Storefront::new(cfg.checkout_password.clone());
    shop.load(&sheets).await.unwrap();
    shop.add_to_cart(ProductId(2)).unwrap();
    shop.add_to_cart(ProductId(2)).unwrap();
    shop.begin_checkout().unwrap();

    let order = shop.checkout(&orders, "hunter2").await.expect("checkout should succeed");

    assert!(order.order_id.starts_with("ORD-"));
    assert!(shop.cart().is_empty());
}

#[tokio::test]
async fn checkout_with_wrong_password_sends_nothing() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = config(&server.uri());
    let sheets = SheetsClient::new(&cfg).unwrap();
    let orders = OrderClient::new(&cfg).unwrap();
    let mut shop = Storefront::new(cfg.checkout_password.clone());
    shop.load(&sheets).await.unwrap();
    shop.add_to_cart(ProductId(1)).unwrap();

    let err = shop.checkout(&orders, "wrong").await.unwrap_err();

    assert_eq!(err, ShopError::InvalidPassword);
    assert_eq!(shop.cart().quantity_of(ProductId(1)), Some(1));
}

#[tokio::test]
async fn rejected_order_reports_endpoint_error_text() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "Sheet is protected"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config(&server.uri());
    let sheets = SheetsClient::new(&cfg).unwrap();
    let orders = OrderClient::new(&cfg).unwrap();
    let mut shop = Storefront::new(cfg.checkout_password.clone());
    shop.load(&sheets).await.unwrap();
    shop.add_to_cart(ProductId(3)).unwrap();

    let err = shop.checkout(&orders, "hunter2").await.unwrap_err();

    assert_eq!(err, ShopError::Submit("Sheet is protected".to_string()));
    assert_eq!(shop.cart().quantity_of(ProductId(3)), Some(1));
}

#[tokio::test]
async fn order_endpoint_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config(&server.uri());
    let orders = OrderClient::new(&cfg).unwrap();
    let order = storefront_core::Order {
        order_id: "ORD-1".to_string(),
        timestamp: chrono::Utc::now(),
        items: "Prime Wheels x1".to_string(),
        total_quantity: 1,
        subtotal: Decimal::from_str("12500.00").unwrap(),
    };

    let err = orders.submit(&order).await.unwrap_err();
    assert!(matches!(err, SheetsError::UnexpectedStatus { status: 500, .. }));
}

#[tokio::test]
async fn order_client_without_endpoint_reports_missing_config() {
    let mut cfg = config("http://127.0.0.1:9");
    cfg.order_endpoint = None;
    let orders = OrderClient::new(&cfg).unwrap();
    let order = storefront_core::Order {
        order_id: "ORD-2".to_string(),
        timestamp: chrono::Utc::now(),
        items: "Prime Wheels x1".to_string(),
        total_quantity: 1,
        subtotal: Decimal::ONE,
    };
    let err = orders.submit(&order).await.unwrap_err();
    assert!(matches!(err, SheetsError::MissingConfig("STOREFRONT_ORDER_ENDPOINT")));
}
