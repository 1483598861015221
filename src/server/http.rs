//! HTTP server setup with Axum

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::sse::{self, SessionManager};
use super::McpServer;
use crate::config::{Listener, Transport};
use crate::error::BridgeError;

/// How long open connections get to finish after Ctrl-C
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Shared state for the HTTP transports
pub struct HttpState {
    pub server: Arc<McpServer>,
    pub sessions: Arc<SessionManager>,
    /// Normalized mount path, e.g. `/mcp` or empty for the root
    pub mount: String,
}

/// Create the Axum router for `transport` mounted at `mount`
pub fn create_router(server: Arc<McpServer>, transport: Transport, mount: &str) -> Router {
    let state = Arc::new(HttpState {
        server,
        sessions: Arc::new(SessionManager::new()),
        mount: mount.to_string(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().route("/health", get(health_check));
    let router = match transport {
        Transport::Sse => router
            .route(&format!("{mount}/sse"), get(sse::sse_handler))
            .route(&format!("{mount}/messages"), post(sse::message_handler)),
        Transport::Http => {
            let path = if mount.is_empty() { "/" } else { mount };
            router.route(path, post(mcp_request_handler))
        }
        Transport::Stdio => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve `router` until Ctrl-C, over TLS when the listener says so
pub async fn serve(router: Router, listener: Listener) -> Result<(), BridgeError> {
    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));
    let service = router.into_make_service();

    match listener {
        Listener::Plain(addr) => {
            axum_server::bind(addr).handle(handle).serve(service).await?;
        }
        Listener::Tls { addr, files } => {
            let config = RustlsConfig::from_pem_file(&files.cert, &files.key).await?;
            axum_server::bind_rustls(addr, config)
                .handle(handle)
                .serve(service)
                .await?;
        }
    }
    Ok(())
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("shutdown requested");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
        Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
    }
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "mcp-neo4j-memory" }))
}

/// POST {path} - JSON-RPC request answered in the response body
async fn mcp_request_handler(State(state): State<Arc<HttpState>>, body: String) -> Response {
    match state.server.handle_message(&body).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::store::MemoryStore;
    use crate::tools::ToolRegistry;

    fn app(transport: Transport) -> Router {
        let server = McpServer::new(ToolRegistry::with_store(Arc::new(MemoryStore::new())));
        create_router(Arc::new(server), transport, "/mcp")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(Transport::Sse)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
    }

    #[tokio::test]
    async fn test_streamable_http_answers_in_body() {
        let response = app(Transport::Http)
            .oneshot(post_json(
                "/mcp",
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["result"]["tools"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_streamable_http_notification_accepted() {
        let response = app(Transport::Http)
            .oneshot(post_json(
                "/mcp",
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_sse_message_for_unknown_session() {
        let response = app(Transport::Sse)
            .oneshot(post_json(
                "/mcp/messages?session_id=nope",
                r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sse_routes_absent_in_http_mode() {
        let response = app(Transport::Http)
            .oneshot(Request::builder().uri("/mcp/sse").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
