//! LC Server - HTTP front end for the LC draft renderer
//!
//! Routes:
//! - `POST /generate-lc-draft-pdf/` renders a JSON record and returns the PDF
//! - `GET /` liveness message

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lc_template::{LcDraftRecord, RendererConfig, TemplateError, TemplateRenderer};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Service title reported at startup and by the liveness route
pub const SERVICE_TITLE: &str = "LC Draft Generator";

/// Route that renders a draft
pub const GENERATE_ROUTE: &str = "/generate-lc-draft-pdf/";

/// Errors surfaced by the service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Render failure: {0}")]
    RenderFailure(#[from] TemplateError),

    #[error("Render task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        error!(error = %self, "PDF generation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "PDF generation failed" })),
        )
            .into_response()
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding the page backgrounds
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            static_dir: RendererConfig::default().static_dir,
        }
    }
}

/// Shared request state
#[derive(Clone)]
pub struct AppState {
    renderer: Arc<TemplateRenderer>,
}

impl AppState {
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }
}

/// Build the router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(GENERATE_ROUTE, post(generate_lc_draft_pdf))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let renderer = TemplateRenderer::new(RendererConfig {
        static_dir: config.static_dir.clone(),
    });
    let listener = tokio::net::TcpListener::bind(config.bind).await?;

    info!(
        title = SERVICE_TITLE,
        version = env!("CARGO_PKG_VERSION"),
        bind = %listener.local_addr()?,
        static_dir = %config.static_dir.display(),
        "listening"
    );

    axum::serve(listener, app(AppState::new(renderer))).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": format!("{SERVICE_TITLE} is running") }))
}

async fn generate_lc_draft_pdf(
    State(state): State<AppState>,
    Json(record): Json<LcDraftRecord>,
) -> Result<Response, ServiceError> {
    let renderer = Arc::clone(&state.renderer);
    let document = tokio::task::spawn_blocking(move || renderer.render(&record)).await??;

    debug!(size = document.bytes.len(), "served LC draft");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", document.filename),
        ),
    ];
    Ok((StatusCode::OK, headers, document.bytes).into_response())
}
