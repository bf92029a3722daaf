// Copyright 2026 Pitchbot Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface: the chat widget page and the chat/status API.
//!
//! Plumbing around the core: every downstream failure (page fetch, remote
//! model) has already been degraded to a valid value by the time it reaches
//! these handlers, so the only errors surfaced to clients are missing
//! request parameters.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::cache::ProductCache;
use crate::config::Config;
use crate::extraction::PageDataExtractor;
use crate::fetch::HttpFetcher;
use crate::product::ProductRecord;
use crate::responder::RemoteResponder;

/// Embedded chat widget markup, seeded per product at render time.
const WIDGET_HTML: &str = include_str!("widget.html");

/// Shared state behind every handler.
pub struct AppState {
    pub cache: tokio::sync::Mutex<ProductCache>,
    pub extractor: PageDataExtractor,
    pub responder: RemoteResponder,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout_ms));
        Self {
            cache: tokio::sync::Mutex::new(ProductCache::new(config.cache_ttl)),
            extractor: PageDataExtractor::new(fetcher),
            responder: RemoteResponder::new(config),
            started_at: Instant::now(),
        }
    }
}

/// Build the axum router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/chatbot", get(chatbot))
        .route("/api/chat", post(api_chat))
        .route("/status", get(status))
        .layer(cors)
        .with_state(state)
}

/// Serve the HTTP surface on the configured port.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config));
    let app = router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("pitchbot listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Deserialize, Default)]
struct ChatbotParams {
    url: Option<String>,
}

/// Render the chat widget seeded with the product resolved from `?url=`.
async fn chatbot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChatbotParams>,
) -> Response {
    let url = match params.url {
        Some(url) if !url.trim().is_empty() => url,
        _ => return bad_request("URL da página de vendas é obrigatória"),
    };
    if url::Url::parse(&url).is_err() {
        return bad_request("URL da página de vendas é inválida");
    }

    let record = resolve_record(&state, &url).await;
    Html(render_widget(&record)).into_response()
}

#[derive(Deserialize, Default)]
struct ChatRequest {
    message: Option<String>,
    #[serde(rename = "productUrl")]
    product_url: Option<String>,
}

/// Answer one chat message about the product at `productUrl`.
async fn api_chat(State(state): State<Arc<AppState>>, Json(body): Json<ChatRequest>) -> Response {
    let (message, product_url) = match (body.message, body.product_url) {
        (Some(m), Some(u)) if !m.trim().is_empty() && !u.trim().is_empty() => (m, u),
        _ => return bad_request("Mensagem e URL do produto são obrigatórias"),
    };
    if url::Url::parse(&product_url).is_err() {
        return bad_request("URL do produto é inválida");
    }

    let record = resolve_record(&state, &product_url).await;
    let reply = state.responder.respond(&message, &record).await;

    Json(json!({
        "response": reply.text,
        "timestamp": Utc::now().to_rfc3339(),
    }))
    .into_response()
}

async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let cache_size = state.cache.lock().await.len();
    Json(json!({
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "cache_size": cache_size,
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

// ── Helpers ─────────────────────────────────────────────────────

/// Cache hit, else extract and cache. The lock is released across the
/// extraction await; racing requests may extract redundantly, which is
/// harmless because extraction is idempotent.
async fn resolve_record(state: &AppState, url: &str) -> ProductRecord {
    if let Some(record) = state.cache.lock().await.get(url) {
        return record;
    }
    let record = state.extractor.extract(url).await.into_record();
    state.cache.lock().await.put(url, record.clone());
    record
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Seed the widget template with the product title and URL, HTML-escaped.
fn render_widget(record: &ProductRecord) -> String {
    WIDGET_HTML
        .replace("{{TITLE}}", &escape_html(&record.title))
        .replace("{{PRODUCT_URL}}", &escape_html(&record.url))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
