//! HTTP surface tests
//!
//! Drives the axum router in-process with `oneshot`, no socket.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shortlist_bridge::api::build_router;
use shortlist_bridge::bridge::Bridge;
use shortlist_bridge::core::config::BridgeConfig;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    build_router(Arc::new(Bridge::new(BridgeConfig::default(), None)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn upload(app: &Router, names: &[&str]) -> (StatusCode, Value) {
    let candidates: Vec<Value> = names
        .iter()
        .map(|n| json!({"name": n, "jobTitle": "Engineer", "location": "Remote"}))
        .collect();
    send(
        app,
        Method::POST,
        "/api/candidates/upload",
        Some(json!({
            "candidates": candidates,
            "source": "linkedin-recruiter",
            "pageUrl": "https://example.test/search"
        })),
    )
    .await
}

#[tokio::test]
async fn test_upload_then_list_round_trip() {
    let app = app();
    let (status, body) = upload(&app, &["Todd Kurtz", "Kyle Scharnhorst"]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["candidatesReceived"], json!(2));
    assert!(body["requestId"].as_str().unwrap().starts_with("req_"));

    let (status, body) = send(&app, Method::GET, "/api/candidates/list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["candidates"][0]["name"], json!("Todd Kurtz"));
    assert_eq!(body["candidates"][0]["jobTitle"], json!("Engineer"));
    assert_eq!(body["candidates"][1]["name"], json!("Kyle Scharnhorst"));
}

#[tokio::test]
async fn test_upload_non_array_leaves_store_unchanged() {
    let app = app();
    upload(&app, &["Todd Kurtz"]).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/candidates/upload",
        Some(json!({"candidates": {"name": "Not A List"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("array"));

    let (_, body) = send(&app, Method::GET, "/api/candidates/list", None).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["candidates"][0]["name"], json!("Todd Kurtz"));
}

#[tokio::test]
async fn test_upload_timestamp_becomes_last_updated() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/candidates/upload",
        Some(json!({
            "candidates": [{"name": "Todd Kurtz"}],
            "source": "linkedin-recruiter",
            "timestamp": "2024-05-01T12:30:00+02:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/candidates/list", None).await;
    let last_updated =
        chrono::DateTime::parse_from_rfc3339(body["lastUpdated"].as_str().unwrap()).unwrap();
    let expected = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:30:00Z").unwrap();
    assert_eq!(last_updated, expected);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/candidates/voice/process")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_voice_missing_text_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/candidates/voice/process",
        Some(json!({"metadata": {"source": "elevenlabs"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Missing voice text"));

    let (_, body) = send(&app, Method::GET, "/api/candidates/voice/recent", None).await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn test_voice_to_pending_to_report() {
    let app = app();
    upload(&app, &["Todd Kurtz", "Kyle Scharnhorst"]).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/candidates/voice/process",
        Some(json!({"voiceText": "Shortlist Todd Kurtz", "metadata": {"source": "elevenlabs"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translationSource"], json!("fallback"));
    assert_eq!(body["commandsGenerated"], json!(1));
    assert_eq!(body["actions"][0]["action"], json!("add"));
    assert_eq!(body["actions"][0]["candidateName"], json!("Todd Kurtz"));
    let voice_id = body["voiceCommandId"].as_str().unwrap().to_string();
    assert_eq!(body["actions"][0]["voiceCommandId"], json!(voice_id));

    let (_, body) = send(&app, Method::GET, "/api/candidates/commands/pending", None).await;
    assert_eq!(body["count"], json!(1));
    let command_id = body["commands"][0]["id"].as_str().unwrap().to_string();
    assert!(command_id.starts_with("cmd_"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/candidates/commands/report",
        Some(json!({
            "commandId": command_id,
            "success": true,
            "message": "Added to shortlist",
            "source": "chrome-extension"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"]["executed"], json!(true));
    assert_eq!(body["command"]["succeeded"], json!(true));
    assert_eq!(body["command"]["executionMessage"], json!("Added to shortlist"));

    let (_, body) = send(&app, Method::GET, "/api/candidates/commands/pending", None).await;
    assert_eq!(body["count"], json!(0));

    let (_, body) = send(&app, Method::GET, "/api/candidates/commands/history", None).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["reports"][0]["commandId"], json!(command_id));
}

#[tokio::test]
async fn test_failed_report_still_leaves_pending() {
    let app = app();
    upload(&app, &["Todd Kurtz"]).await;
    send(
        &app,
        Method::POST,
        "/api/candidates/voice/process",
        Some(json!({"voiceText": "add todd kurtz"})),
    )
    .await;
    let (_, body) = send(&app, Method::GET, "/api/candidates/commands/pending", None).await;
    let command_id = body["commands"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/candidates/commands/report",
        Some(json!({"commandId": command_id, "message": "Button not found"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"]["executed"], json!(false));
    assert_eq!(body["command"]["succeeded"], json!(false));
    assert_eq!(body["command"]["executionMessage"], json!("Button not found"));

    let (_, body) = send(&app, Method::GET, "/api/candidates/commands/pending", None).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["commands"][0]["id"], json!(command_id));

    let (_, body) = send(&app, Method::GET, "/api/candidates/commands/history", None).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["reports"][0]["success"], json!(false));
}

#[tokio::test]
async fn test_report_unknown_or_missing_command() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/candidates/commands/report",
        Some(json!({"commandId": "cmd_nope", "success": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/candidates/commands/report",
        Some(json!({"success": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/candidates/commands/history", None).await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn test_options_answers_ok_on_every_route() {
    let app = app();
    for uri in [
        "/api/candidates",
        "/api/candidates/upload",
        "/api/candidates/voice/process",
        "/api/candidates/list",
        "/api/candidates/commands/pending",
        "/api/candidates/commands/report",
        "/api/candidates/dashboard",
    ] {
        let (status, _) = send(&app, Method::OPTIONS, uri, None).await;
        assert_eq!(status, StatusCode::OK, "OPTIONS {}", uri);
    }
}

#[tokio::test]
async fn test_dashboard_shape() {
    let app = app();
    upload(&app, &["Todd Kurtz"]).await;
    send(
        &app,
        Method::POST,
        "/api/candidates/voice/process",
        Some(json!({"voiceText": "shortlist todd kurtz"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/candidates/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    let dashboard = &body["dashboard"];
    assert_eq!(dashboard["candidates"]["count"], json!(1));
    assert_eq!(dashboard["candidates"]["names"], json!(["Todd Kurtz"]));
    assert_eq!(dashboard["voiceCommands"]["total"], json!(1));
    assert_eq!(dashboard["pendingCommands"]["unExecuted"], json!(1));
    assert_eq!(dashboard["executionHistory"]["total"], json!(0));
    assert_eq!(dashboard["systemStatus"]["apiHealth"], json!("online"));
    assert_eq!(dashboard["systemStatus"]["translationMode"], json!("fallback-only"));
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/candidates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].as_array().unwrap().len() >= 8);
}
