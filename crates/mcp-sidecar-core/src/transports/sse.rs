//! SSE transport
//!
//! The HTTP surface of the original server: `GET /sse` upgrades the
//! connection into a long-lived session and `POST /messages?sessionId=...`
//! delivers a client message to that session. Responses travel back over
//! the session's event stream, not the POST. A drop guard bound to the
//! stream removes the session when the connection closes, however it
//! closes.

use crate::config::ServerConfig;
use crate::handler::CoreHandler;
use crate::session::{SessionId, SessionRegistry};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use futures::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Queued responses per session before a slow client exerts backpressure
const SESSION_CHANNEL_CAPACITY: usize = 32;

/// Plain-text body the original server returns for a missing session.
/// Kept byte-for-byte for wire compatibility.
const NO_TRANSPORT_BODY: &str = "No transport found for sessionId";

/// Shared state behind the SSE routes
pub struct SseState {
    pub handler: CoreHandler,
    pub sessions: Arc<SessionRegistry>,
}

/// Build the two-route SSE application
pub fn router(state: Arc<SseState>) -> Router {
    Router::new()
        .route("/sse", get(open_session))
        .route("/messages", post(deliver_message))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// `GET /sse`: open a session and stream responses to the client
async fn open_session(
    State(state): State<Arc<SseState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
    let session_id = state.sessions.open(tx);
    info!(%session_id, live_sessions = state.sessions.len(), "SSE session opened");

    // Per the SSE transport handshake, the first event tells the client
    // where to POST its messages for this session.
    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?sessionId={session_id}"));

    let stream = SessionStream {
        endpoint: Some(endpoint),
        rx,
        _guard: SessionGuard {
            id: session_id,
            sessions: Arc::clone(&state.sessions),
        },
    };
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// `POST /messages?sessionId=...`: route a client message to its session
#[instrument(level = "debug", skip(state, body))]
async fn deliver_message(
    State(state): State<Arc<SseState>>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    let Some(session_id) = query.session_id else {
        return no_transport();
    };
    let channel = match state.sessions.lookup(&session_id) {
        Ok(channel) => channel,
        Err(e) => {
            warn!(%session_id, error = %e, "Message for unknown session");
            return no_transport();
        }
    };

    if let Some(response) = state.handler.handle_message(&body).await {
        if channel.send(response).await.is_err() {
            // Receiver already gone; the message was still dispatched, so
            // this is an accepted delivery to a session that died under us.
            // Reap the entry early rather than waiting for the guard.
            state.sessions.close(&session_id);
            warn!(%session_id, "Session channel closed mid-request; response dropped");
        }
    }
    StatusCode::ACCEPTED.into_response()
}

fn no_transport() -> Response {
    (StatusCode::BAD_REQUEST, NO_TRANSPORT_BODY).into_response()
}

/// Event stream for one session: the endpoint handshake event, then queued
/// responses. Owns the guard that closes the session on disconnect.
struct SessionStream {
    endpoint: Option<Event>,
    rx: mpsc::Receiver<String>,
    _guard: SessionGuard,
}

impl Stream for SessionStream {
    type Item = std::result::Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(event) = this.endpoint.take() {
            return Poll::Ready(Some(Ok(event)));
        }
        this.rx
            .poll_recv(cx)
            .map(|next| next.map(|data| Ok(Event::default().event("message").data(data))))
    }
}

/// Removes the session registry entry when the stream is dropped
struct SessionGuard {
    id: SessionId,
    sessions: Arc<SessionRegistry>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions.close(&self.id);
        debug!(session_id = %self.id, "SSE connection closed");
    }
}

/// Run the MCP server with SSE transport
#[instrument(level = "info", skip(config), fields(port = config.port))]
pub async fn run_sse_server(config: &ServerConfig) -> anyhow::Result<()> {
    let handler = CoreHandler::from_config(config)?;
    let state = Arc::new(SseState {
        handler,
        sessions: Arc::new(SessionRegistry::new()),
    });
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "Starting MCP server with SSE transport");
    info!("  GET  /sse      - SSE stream (server to client)");
    info!("  POST /messages - HTTP messages (client to server)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    info!("SSE server stopped");
    Ok(())
}
