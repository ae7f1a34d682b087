//! Integration tests for the partdex MCP client against an in-process
//! mock tool server speaking the SSE dialect.

use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream;
use partdex_mcp::{ClientConfig, McpClient, McpClientError};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::time::{Duration, Instant};

/// Serve a router on an ephemeral local port, returning the base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn sse(raw: impl Into<String>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        raw.into(),
    )
        .into_response()
}

/// Handshake stream announcing a relative submission address.
async fn handshake() -> Response {
    sse("data: /messages?session_id=abc123\n\n")
}

fn app_with_messages(messages: Router) -> Router {
    Router::new().route("/mcp", get(handshake)).merge(messages)
}

async fn connect(base: &str) -> McpClient {
    let config = ClientConfig::new(format!("{}/mcp", base).parse().unwrap())
        .with_connect_timeout(Duration::from_secs(5))
        .with_call_timeout(Duration::from_secs(5));
    McpClient::connect(config).await.unwrap()
}

// ============================================================================
// Handshake
// ============================================================================

#[tokio::test]
async fn test_handshake_establishes_session() {
    let base = serve(Router::new().route("/mcp", get(handshake))).await;
    let client = connect(&base).await;

    let session = client.session().unwrap();
    assert_eq!(session.session_id, "abc123");
    assert_eq!(
        session.messages_url.as_str(),
        format!("{}/messages?session_id=abc123", base)
    );
}

#[tokio::test]
async fn test_handshake_skips_noise_before_data_line() {
    async fn noisy() -> Response {
        sse(": welcome\n\nevent: endpoint\ndata: /messages?session_id=s7\n\n")
    }
    let base = serve(Router::new().route("/mcp", get(noisy))).await;
    let client = connect(&base).await;
    assert_eq!(client.session().unwrap().session_id, "s7");
}

#[tokio::test]
async fn test_handshake_missing_data_line() {
    async fn no_data() -> Response {
        sse(": comment only\n\nevent: ping\n\n")
    }
    let base = serve(Router::new().route("/mcp", get(no_data))).await;

    let config = ClientConfig::new(format!("{}/mcp", base).parse().unwrap());
    let err = McpClient::connect(config).await.unwrap_err();
    assert!(matches!(err, McpClientError::HandshakeMissing));
}

#[tokio::test]
async fn test_handshake_missing_session_id() {
    async fn no_session() -> Response {
        sse("data: /messages\n\n")
    }
    let base = serve(Router::new().route("/mcp", get(no_session))).await;

    let config = ClientConfig::new(format!("{}/mcp", base).parse().unwrap());
    let err = McpClient::connect(config).await.unwrap_err();
    assert!(matches!(err, McpClientError::SessionIdMissing(_)));
}

#[tokio::test]
async fn test_failed_handshake_latches() {
    async fn no_data() -> Response {
        sse(": comment only\n\n")
    }
    let base = serve(Router::new().route("/mcp", get(no_data))).await;

    let config = ClientConfig::new(format!("{}/mcp", base).parse().unwrap());
    let mut client = McpClient::new(config);

    let first = client.establish().await.unwrap_err();
    assert!(matches!(first, McpClientError::HandshakeMissing));

    // A retry would reach the server and fail the same way again; the
    // latched state answers without it.
    let second = client.establish().await.unwrap_err();
    assert!(matches!(second, McpClientError::Unestablished));
}

#[tokio::test]
async fn test_connect_timeout_aborts_promptly() {
    async fn stall() -> Response {
        tokio::time::sleep(Duration::from_secs(30)).await;
        sse("data: /messages?session_id=late\n\n")
    }
    let base = serve(Router::new().route("/mcp", get(stall))).await;

    let config = ClientConfig::new(format!("{}/mcp", base).parse().unwrap())
        .with_connect_timeout(Duration::from_millis(100));
    let started = Instant::now();
    let err = McpClient::connect(config).await.unwrap_err();

    assert!(matches!(err, McpClientError::ConnectTimeout(_)));
    assert!(started.elapsed() < Duration::from_secs(2));
}

// ============================================================================
// Tool invocation
// ============================================================================

#[tokio::test]
async fn test_invoke_returns_payload_verbatim() {
    async fn fixed_result(Json(envelope): Json<Value>) -> Response {
        let event = json!({
            "type": "tool_result",
            "request_id": envelope["id"],
            "tool_output": [{"id": 1}],
        });
        sse(format!("data: {}\n\n", event))
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(fixed_result)),
    ))
    .await;

    let client = connect(&base).await;
    let output = client.list_components().await.unwrap();
    assert_eq!(output, json!([{"id": 1}]));
}

#[tokio::test]
async fn test_invoke_coerces_component_id() {
    // Echo the received input back so the test can see what went out.
    async fn echo_input(Json(envelope): Json<Value>) -> Response {
        let event = json!({
            "type": "tool_result",
            "request_id": envelope["id"],
            "tool_output": envelope["tool_input"],
        });
        sse(format!("data: {}\n\n", event))
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(echo_input)),
    ))
    .await;

    let client = connect(&base).await;

    let numeric = client.get_component("42").await.unwrap();
    assert_eq!(numeric, json!({"component_id": 42}));

    let raw = client.get_component("gtx-999").await.unwrap();
    assert_eq!(raw, json!({"component_id": "gtx-999"}));
}

#[tokio::test]
async fn test_invoke_submits_wire_exact_envelope() {
    async fn inspect(Json(envelope): Json<Value>) -> Response {
        assert_eq!(envelope["type"], "tool_call");
        assert_eq!(envelope["tool_name"], "search_components");
        assert_eq!(envelope["tool_input"]["query"], "rtx 4090");
        assert!(!envelope["id"].as_str().unwrap().is_empty());

        let event = json!({
            "type": "tool_result",
            "request_id": envelope["id"],
            "tool_output": [],
        });
        sse(format!("data: {}\n\n", event))
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(inspect)),
    ))
    .await;

    let client = connect(&base).await;
    let output = client.search_components("rtx 4090").await.unwrap();
    assert_eq!(output, json!([]));
}

#[tokio::test]
async fn test_remote_error_without_request_id() {
    async fn error_event(Json(_envelope): Json<Value>) -> Response {
        sse("data: {\"type\":\"error\",\"message\":\"bad tool\"}\n\n")
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(error_event)),
    ))
    .await;

    let client = connect(&base).await;
    let err = client.list_components().await.unwrap_err();
    match err {
        McpClientError::RemoteTool(message) => assert_eq!(message, "bad tool"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_keepalive_only_stream_reports_no_result() {
    async fn keepalives(Json(_envelope): Json<Value>) -> Response {
        sse("\n\n\n")
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(keepalives)),
    ))
    .await;

    let client = connect(&base).await;
    let err = client.list_components().await.unwrap_err();
    assert!(matches!(err, McpClientError::StreamEnded));
}

#[tokio::test]
async fn test_malformed_event_is_a_distinct_failure() {
    async fn malformed(Json(_envelope): Json<Value>) -> Response {
        sse("data: {not json\n\n")
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(malformed)),
    ))
    .await;

    let client = connect(&base).await;
    let err = client.list_components().await.unwrap_err();
    assert!(matches!(err, McpClientError::Malformed(_)));
}

#[tokio::test]
async fn test_foreign_request_id_is_skipped_until_match() {
    async fn foreign_then_match(Json(envelope): Json<Value>) -> Response {
        let foreign = json!({
            "type": "tool_result",
            "request_id": "someone-else",
            "tool_output": "not yours",
        });
        let matching = json!({
            "type": "tool_result",
            "request_id": envelope["id"],
            "tool_output": "yours",
        });
        sse(format!("data: {}\n\ndata: {}\n\n", foreign, matching))
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(foreign_then_match)),
    ))
    .await;

    let client = connect(&base).await;
    let output = client.list_components().await.unwrap();
    assert_eq!(output, json!("yours"));
}

#[tokio::test]
async fn test_response_timeout_boundary() {
    // A response stream that never emits anything at all.
    async fn silent(Json(_envelope): Json<Value>) -> Response {
        let never = stream::pending::<Result<Bytes, Infallible>>();
        Response::builder()
            .header(header::CONTENT_TYPE, "text/event-stream")
            .body(Body::from_stream(never))
            .unwrap()
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(silent)),
    ))
    .await;

    let call_timeout = Duration::from_millis(300);
    let config = ClientConfig::new(format!("{}/mcp", base).parse().unwrap())
        .with_call_timeout(call_timeout);
    let client = McpClient::connect(config).await.unwrap();

    let started = Instant::now();
    let err = client.list_components().await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, McpClientError::ResponseTimeout(_)));
    assert!(elapsed >= call_timeout);
    assert!(elapsed < call_timeout + Duration::from_secs(2));
}

#[tokio::test]
async fn test_submission_transport_failure() {
    // Reserve a port, then free it so the submission address points at
    // nothing listening.
    let reserved = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_port = reserved.local_addr().unwrap().port();
    drop(reserved);

    let base = serve(Router::new().route(
        "/mcp",
        get(move || async move {
            sse(format!(
                "data: http://127.0.0.1:{}/messages?session_id=gone\n\n",
                dead_port
            ))
        }),
    ))
    .await;

    let client = connect(&base).await;
    let err = client.list_components().await.unwrap_err();
    assert!(matches!(err, McpClientError::Submission(_)));
}

#[tokio::test]
async fn test_unknown_tool_is_rejected_locally() {
    let base = serve(Router::new().route("/mcp", get(handshake))).await;
    let client = connect(&base).await;

    let err = client.invoke("drop_tables", json!({})).await.unwrap_err();
    assert!(matches!(err, McpClientError::UnknownTool(_)));
}

#[tokio::test]
async fn test_call_failure_does_not_poison_session() {
    async fn error_then_ok(Json(envelope): Json<Value>) -> Response {
        // Error for searches, result for listings; the same session
        // serves both.
        if envelope["tool_name"] == "search_components" {
            sse("data: {\"type\":\"error\",\"message\":\"index offline\"}\n\n")
        } else {
            let event = json!({
                "type": "tool_result",
                "request_id": envelope["id"],
                "tool_output": [],
            });
            sse(format!("data: {}\n\n", event))
        }
    }
    let base = serve(app_with_messages(
        Router::new().route("/messages", post(error_then_ok)),
    ))
    .await;

    let client = connect(&base).await;
    assert!(client.search_components("rtx").await.is_err());
    assert!(client.list_components().await.is_ok());
}
