use golden_gen::clients::SettingsClient;
use golden_gen::VerticalContext;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(mock_server: &MockServer) -> SettingsClient {
    SettingsClient::with_client(reqwest::Client::new(), mock_server.uri())
}

#[tokio::test]
async fn test_defaults_before_load() {
    let ctx = VerticalContext::new();
    assert_eq!(ctx.vertical(), "commerce");
    assert_eq!(ctx.supported(), ["commerce", "banking", "finance", "healthcare"]);
    assert!(ctx.is_loading());
}

#[tokio::test]
async fn test_load_applies_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "industry_vertical": "banking",
            "supported_verticals": ["commerce", "banking"]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    ctx.load(&client).await.expect("load failed");

    assert_eq!(ctx.vertical(), "banking");
    assert_eq!(ctx.supported(), ["commerce", "banking"]);
    assert!(!ctx.is_loading());
}

#[tokio::test]
async fn test_load_ignores_empty_vertical() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "industry_vertical": ""
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    ctx.load(&client).await.expect("load failed");

    assert_eq!(ctx.vertical(), "commerce");
    assert_eq!(ctx.supported().len(), 4);
}

#[tokio::test]
async fn test_load_failure_keeps_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    let result = ctx.load(&client).await;

    assert!(result.is_err());
    assert_eq!(ctx.vertical(), "commerce");
    assert_eq!(ctx.supported().len(), 4);
    assert!(!ctx.is_loading());
}

#[tokio::test]
async fn test_set_vertical_posts_setting() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/settings"))
        .and(body_json(json!({ "industry_vertical": "healthcare" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    ctx.set_vertical(&client, "healthcare").await.expect("update failed");

    assert_eq!(ctx.vertical(), "healthcare");
}

#[tokio::test]
async fn test_set_vertical_is_optimistic_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "read-only" })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    let result = ctx.set_vertical(&client, "banking").await;

    assert_eq!(result.unwrap_err().user_message(), "read-only");
    assert_eq!(ctx.vertical(), "banking");
}

#[tokio::test]
async fn test_set_empty_vertical_is_noop() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    ctx.set_vertical(&client, "").await.expect("noop");

    assert_eq!(ctx.vertical(), "commerce");
}

#[tokio::test]
async fn test_load_keeps_valid_vertical_when_list_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "industry_vertical": "banking",
            "supported_verticals": "all"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    ctx.load(&client).await.expect("load failed");

    assert_eq!(ctx.vertical(), "banking");
    assert_eq!(ctx.supported(), ["commerce", "banking", "finance", "healthcare"]);
    assert!(!ctx.is_loading());
}

#[tokio::test]
async fn test_load_keeps_list_when_vertical_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "industry_vertical": { "name": "banking" },
            "supported_verticals": ["commerce", "banking"]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let mut ctx = VerticalContext::new();
    ctx.load(&client).await.expect("load failed");

    assert_eq!(ctx.vertical(), "commerce");
    assert_eq!(ctx.supported(), ["commerce", "banking"]);
}
