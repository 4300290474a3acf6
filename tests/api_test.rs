//! HTTP API tests against the in-process router.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use logging_ui::config::ServiceConfig;
use logging_ui::http::HttpServer;
use logging_ui::lifecycle::startup;
use serde_json::{json, Value};

const BASE: &str = "/myownendpoint";

fn create_test_server(base_path: &str) -> TestServer {
    let mut config = ServiceConfig::default();
    config.logging_ui.base_path = base_path.to_string();
    let registry = startup::build_registry(&config.logging_ui, None);
    let server = HttpServer::new(config, registry, None);
    TestServer::new(server.router()).expect("Failed to create test server")
}

fn level_names() -> Value {
    json!(["OFF", "FATAL", "ERROR", "WARN", "INFO", "CONFIG", "DEBUG", "TRACE", "ALL"])
}

#[tokio::test]
async fn test_list_with_and_without_trailing_slash() {
    let server = create_test_server("myownendpoint/");

    for path in [BASE, "/myownendpoint/"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["levels"], level_names());

        let loggers = body["loggers"].as_object().unwrap();
        assert!(loggers.len() > 1);
        assert_eq!(
            loggers["ROOT"],
            json!({ "configuredLevel": null, "effectiveLevel": "INFO" })
        );
    }
}

#[tokio::test]
async fn test_list_at_root_base_path() {
    let server = create_test_server("/");

    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert!(body["loggers"].get("ROOT").is_some());
}

#[tokio::test]
async fn test_describe_unknown_logger() {
    let server = create_test_server("myownendpoint/");

    let response = server.get("/myownendpoint/app.orders.api").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["levels"], level_names());
    let loggers = body["loggers"].as_object().unwrap();
    assert_eq!(loggers.len(), 1);
    assert_eq!(
        loggers["app.orders.api"],
        json!({ "configuredLevel": null, "effectiveLevel": "INFO" })
    );

    // A describe makes the logger known.
    let body: Value = server.get(BASE).await.json();
    assert!(body["loggers"].get("app.orders.api").is_some());
}

#[tokio::test]
async fn test_set_level_then_read_back() {
    let server = create_test_server("myownendpoint/");

    let response = server
        .post("/myownendpoint/app")
        .json(&json!({ "configuredLevel": "TRACE" }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    let body: Value = server.get("/myownendpoint/app").await.json();
    assert_eq!(
        body["loggers"]["app"],
        json!({ "configuredLevel": "TRACE", "effectiveLevel": "TRACE" })
    );

    // Children inherit.
    let body: Value = server.get("/myownendpoint/app.db").await.json();
    assert_eq!(
        body["loggers"]["app.db"],
        json!({ "configuredLevel": null, "effectiveLevel": "TRACE" })
    );
}

#[tokio::test]
async fn test_set_level_is_case_insensitive() {
    let server = create_test_server("myownendpoint/");

    server
        .post("/myownendpoint/app")
        .json(&json!({ "configuredLevel": "trace" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/myownendpoint/app").await.json();
    assert_eq!(body["loggers"]["app"]["configuredLevel"], "TRACE");
}

#[tokio::test]
async fn test_invalid_level_is_rejected_without_change() {
    let server = create_test_server("myownendpoint/");

    server
        .post("/myownendpoint/app")
        .json(&json!({ "configuredLevel": "WARN" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .post("/myownendpoint/app")
        .json(&json!({ "configuredLevel": "non-existing" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("non-existing"));

    let body: Value = server.get("/myownendpoint/app").await.json();
    assert_eq!(
        body["loggers"]["app"],
        json!({ "configuredLevel": "WARN", "effectiveLevel": "WARN" })
    );
}

#[tokio::test]
async fn test_padded_level_is_rejected() {
    let server = create_test_server("myownendpoint/");

    server
        .post("/myownendpoint/app")
        .json(&json!({ "configuredLevel": " trace " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body: Value = server.get("/myownendpoint/app").await.json();
    assert_eq!(
        body["loggers"]["app"],
        json!({ "configuredLevel": null, "effectiveLevel": "INFO" })
    );
}

#[tokio::test]
async fn test_null_or_missing_level_resets() {
    let server = create_test_server("myownendpoint/");

    for (setup, reset) in [
        ("DEBUG", json!({ "configuredLevel": null })),
        ("ERROR", json!({})),
    ] {
        server
            .post("/myownendpoint/app")
            .json(&json!({ "configuredLevel": setup }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .post("/myownendpoint/app")
            .json(&reset)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body: Value = server.get("/myownendpoint/app").await.json();
        assert_eq!(
            body["loggers"]["app"],
            json!({ "configuredLevel": null, "effectiveLevel": "INFO" })
        );
    }
}

#[tokio::test]
async fn test_root_level_is_inherited() {
    let server = create_test_server("myownendpoint/");

    server
        .post("/myownendpoint/ROOT")
        .json(&json!({ "configuredLevel": "ERROR" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/myownendpoint/fresh.logger").await.json();
    assert_eq!(
        body["loggers"]["fresh.logger"],
        json!({ "configuredLevel": null, "effectiveLevel": "ERROR" })
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = create_test_server("myownendpoint/");

    let response = server
        .post("/myownendpoint/app")
        .bytes("{not json".into())
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = server.get("/myownendpoint/app").await.json();
    assert_eq!(body["loggers"]["app"]["configuredLevel"], Value::Null);
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = create_test_server("myownendpoint/");

    let response = server.get(BASE).await;
    let generated = response.header("x-request-id");
    assert!(!generated.is_empty());

    let response = server
        .get(BASE)
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("client-supplied-id"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "client-supplied-id");
}

#[tokio::test]
async fn test_paths_outside_base_are_not_found() {
    let server = create_test_server("myownendpoint/");

    server.get("/elsewhere").await.assert_status(StatusCode::NOT_FOUND);
    server
        .get("/myownendpoint/a/b")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
