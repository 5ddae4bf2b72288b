// Reverse proxy in front of the fantasy API.
//
// Exposes a health-check route and a wildcard `/api/{*path}` route that
// strips the prefix, prepends the upstream origin, injects a browser
// user-agent, and relays status, content-type, and body verbatim. A single
// process-wide pacing gate spaces forwarded requests out so bursts from
// the front end never hammer the upstream.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{any, get};
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::config::{
    ProxyConfig, ALLOWED_ORIGINS, LEAGUE_ID, PACING_INTERVAL_MS, REQUEST_TIMEOUT_SECS, USER_AGENT,
};

// ---------------------------------------------------------------------------
// Pacing gate
// ---------------------------------------------------------------------------

/// Fixed-interval pacing for outbound forwards.
///
/// One gate is shared by the whole process, with no per-client
/// partitioning: concurrent requests queue on the lock, which is held
/// across the sleep, so the spacing holds regardless of who is calling.
#[derive(Debug)]
pub struct PacingGate {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl PacingGate {
    pub fn new(min_interval: Duration) -> Self {
        PacingGate {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until at least `min_interval` has passed since the previous
    /// caller was released, then record the new timestamp.
    pub async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

// ---------------------------------------------------------------------------
// Proxy state
// ---------------------------------------------------------------------------

/// Shared state for the proxy routes: upstream origin, outbound client,
/// and the pacing gate. Injected through axum state rather than living in
/// globals, so tests can build isolated instances.
#[derive(Debug)]
pub struct ProxyState {
    upstream: String,
    http: reqwest::Client,
    gate: PacingGate,
}

impl ProxyState {
    /// Build proxy state targeting `upstream` (origin without a trailing
    /// slash). Outbound requests carry the standard fixed timeout.
    pub fn new(upstream: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(ProxyState {
            upstream: upstream.into().trim_end_matches('/').to_string(),
            http,
            gate: PacingGate::new(Duration::from_millis(PACING_INTERVAL_MS)),
        })
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the proxy router: health check at `/`, forwarder under `/api`.
pub fn router(state: Arc<ProxyState>) -> Router {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .map(|origin| HeaderValue::from_static(origin))
        .collect();

    Router::new()
        .route("/", get(health))
        .route("/api/{*path}", any(forward))
        .layer(CorsLayer::new().allow_origin(AllowOrigin::list(origins)))
        .with_state(state)
}

/// Bind on `127.0.0.1:{port}` and serve until the task is aborted.
pub async fn serve(config: &ProxyConfig, state: Arc<ProxyState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("127.0.0.1", config.port)).await?;
    serve_on(listener, state).await
}

/// Serve on an already-bound listener (tests bind port 0).
pub async fn serve_on(listener: TcpListener, state: Arc<ProxyState>) -> anyhow::Result<()> {
    info!("proxy listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// Static JSON descriptor of example endpoints.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "Touchline proxy running",
        "endpoints": {
            "league": format!("/api/leagues-classic/{LEAGUE_ID}/standings/"),
            "bootstrap": "/api/bootstrap-static/",
            "entry": "/api/entry/:id/",
        }
    }))
}

/// Forward one request to the upstream and relay the response verbatim.
///
/// Any transport failure becomes a fixed 500 with the error's message;
/// upstream-down and malformed-request are deliberately not distinguished.
async fn forward(
    State(state): State<Arc<ProxyState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
) -> Response {
    let url = upstream_url(&state.upstream, &path, query.as_deref());

    state.gate.wait().await;
    info!("[proxy] {method} {url}");

    let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .unwrap_or(reqwest::Method::GET);
    let upstream = match state
        .http
        .request(method, &url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => return forward_error(&url, e),
    };

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    match upstream.bytes().await {
        Ok(body) => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => forward_error(&url, e),
    }
}

fn forward_error(url: &str, e: reqwest::Error) -> Response {
    warn!("[proxy] forward to {url} failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// Construct the upstream URL from the captured path remainder and the
/// original query string.
pub fn upstream_url(upstream: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{upstream}/{path}");
    if let Some(query) = query {
        url.push('?');
        url.push_str(query);
    }
    url
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
