use storefront_core::Environment;

use super::*;

fn config(base_url: &str) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "debug".to_string(),
        sheet_id: Some("sheet-123".to_string()),
        api_key: Some("test-key".to_string()),
        sheet_name: "Sheet1".to_string(),
        sheet_range: "A2:F".to_string(),
        sheets_base_url: base_url.to_string(),
        checkout_password: None,
        order_endpoint: None,
        request_timeout_secs: 30,
        user_agent: "storefront-test/0.1".to_string(),
    }
}

fn test_client(base_url: &str) -> SheetsClient {
    SheetsClient::new(&config(base_url)).expect("client construction should not fail")
}

#[test]
fn values_url_constructs_expected_path_and_key() {
    let client = test_client("https://sheets.googleapis.com");
    let url = client.values_url("sheet-123", "test-key");
    assert_eq!(
        url.as_str(),
        "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Sheet1!A2:F?key=test-key"
    );
}

#[test]
fn values_url_strips_trailing_slash() {
    let client = test_client("https://sheets.googleapis.com/");
    let url = client.values_url("sheet-123", "test-key");
    assert_eq!(
        url.path(),
        "/v4/spreadsheets/sheet-123/values/Sheet1!A2:F"
    );
}

#[test]
fn values_url_encodes_tab_names_and_keys() {
    let mut cfg = config("https://sheets.googleapis.com");
    cfg.sheet_name = "Auto Parts".to_string();
    let client = SheetsClient::new(&cfg).unwrap();
    let url = client.values_url("sheet/123", "k&y");
    assert!(
        url.path().ends_with("/sheet%2F123/values/Auto%20Parts!A2:F"),
        "segments should be percent-encoded: {url}"
    );
    assert_eq!(url.query(), Some("key=k%26y"));
}

#[test]
fn new_rejects_unparseable_base_url() {
    let result = SheetsClient::new(&config("not a url"));
    assert!(matches!(result, Err(SheetsError::InvalidUrl { .. })));
}

#[tokio::test]
async fn fetch_rows_without_sheet_id_reports_missing_config() {
    let mut cfg = config("https://sheets.googleapis.com");
    cfg.sheet_id = None;
    let client = SheetsClient::new(&cfg).unwrap();
    let err = client.fetch_rows().await.unwrap_err();
    assert!(matches!(err, SheetsError::MissingConfig("STOREFRONT_SHEET_ID")));
}

#[tokio::test]
async fn fetch_rows_without_api_key_reports_missing_config() {
    let mut cfg = config("https://sheets.googleapis.com");
    cfg.api_key = None;
    let client = SheetsClient::new(&cfg).unwrap();
    let err = client.fetch_rows().await.unwrap_err();
    assert!(matches!(err, SheetsError::MissingConfig("STOREFRONT_API_KEY")));
}
