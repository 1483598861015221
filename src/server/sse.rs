//! SSE transport for MCP over HTTP
//!
//! ## Endpoints
//! - `GET {path}/sse` - event stream; the first event is `endpoint`
//! - `POST {path}/messages?session_id=..` - JSON-RPC from client to server,
//!   answered on the session's stream as `message` events

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::stream::Stream;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::http::HttpState;

/// Messages buffered per session before senders wait
const SESSION_BUFFER: usize = 64;

/// Connected SSE client
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub session_id: String,
    pub connected_at: i64,
    sender: mpsc::Sender<Value>,
}

/// Session manager for tracking connected clients
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, ClientSession>>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and return the receiving end of its stream
    pub fn open(&self) -> (ClientSession, mpsc::Receiver<Value>) {
        let (sender, receiver) = mpsc::channel(SESSION_BUFFER);
        let session = ClientSession {
            session_id: uuid::Uuid::new_v4().simple().to_string(),
            connected_at: chrono::Utc::now().timestamp(),
            sender,
        };
        self.sessions
            .write()
            .insert(session.session_id.clone(), session.clone());
        (session, receiver)
    }

    pub fn get(&self, session_id: &str) -> Option<ClientSession> {
        self.sessions.read().get(session_id).cloned()
    }

    pub fn close(&self, session_id: &str) {
        self.sessions.write().remove(session_id);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

/// Removes the session when its event stream is dropped
struct SessionGuard {
    sessions: Arc<SessionManager>,
    session_id: String,
    connected_at: i64,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions.close(&self.session_id);
        let seconds = chrono::Utc::now().timestamp() - self.connected_at;
        info!(session = %self.session_id, seconds, "SSE client disconnected");
    }
}

/// GET {path}/sse
pub async fn sse_handler(
    State(state): State<Arc<HttpState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session, mut receiver) = state.sessions.open();
    let endpoint = format!("{}/messages?session_id={}", state.mount, session.session_id);
    info!(session = %session.session_id, "SSE client connected");

    let guard = SessionGuard {
        sessions: state.sessions.clone(),
        session_id: session.session_id,
        connected_at: session.connected_at,
    };

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint));

        while let Some(message) = receiver.recv().await {
            yield Ok(Event::default().event("message").data(message.to_string()));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default().interval(Duration::from_secs(30)))
}

#[derive(Debug, Deserialize)]
pub struct MessageParams {
    pub session_id: String,
}

/// POST {path}/messages
pub async fn message_handler(
    State(state): State<Arc<HttpState>>,
    Query(params): Query<MessageParams>,
    body: String,
) -> Response {
    let Some(session) = state.sessions.get(&params.session_id) else {
        return (StatusCode::NOT_FOUND, "Unknown session").into_response();
    };

    if let Some(response) = state.server.handle_message(&body).await {
        if session.sender.send(response).await.is_err() {
            warn!(session = %params.session_id, "SSE stream closed before response");
            return (StatusCode::GONE, "Session closed").into_response();
        }
    }
    StatusCode::ACCEPTED.into_response()
}
