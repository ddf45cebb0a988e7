// Server module: axum router and handlers for the widget API. Handlers
// receive the registry through shared state rather than a global, and
// every error is a typed variant translated to a bare status code.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::registry::{Registry, RegistryError};

/// Server configuration, read from the environment with sensible
/// defaults: listen on 0.0.0.0:5000 and serve browser assets from the
/// current directory.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Directory holding the home page and any static assets.
    pub asset_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            asset_dir: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Build a config from `WIDGET_PORT` and `WIDGET_ASSET_DIR`, falling
    /// back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = std::env::var("WIDGET_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
        {
            config.addr.set_port(port);
        }
        if let Ok(dir) = std::env::var("WIDGET_ASSET_DIR") {
            config.asset_dir = PathBuf::from(dir);
        }
        config
    }
}

/// Shared application state. Mutating handlers take the write lock so
/// create/rename/delete are serialized and the uniqueness invariant
/// holds; the listing handler only needs the read lock.
pub struct AppState {
    pub registry: RwLock<Registry>,
    asset_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            asset_dir: config.asset_dir.clone(),
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RegistryError::Validation => StatusCode::BAD_REQUEST,
            RegistryError::Conflict { .. } => StatusCode::CONFLICT,
            RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
        };
        tracing::debug!(%status, error = %self, "request rejected");
        // status only, no body
        status.into_response()
    }
}

/// Request body for POST and PUT: `{"model": "WidgetName"}`.
#[derive(Debug, Deserialize)]
pub struct ModelRequest {
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ModelResponse {
    model: String,
}

#[derive(Debug, Serialize)]
struct ListingResponse {
    widget_models: Vec<String>,
}

/// GET /widget_models
async fn listing_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let names = state.registry.read().await.list();
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Json(ListingResponse {
            widget_models: names,
        }),
    )
}

/// POST /widget_models
async fn creation_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ModelRequest>>,
) -> Result<Json<ModelResponse>, RegistryError> {
    // a missing or malformed body is a validation failure, same as a bad name
    let Json(req) = body.ok_or(RegistryError::Validation)?;
    let name = state.registry.write().await.create(&req.model)?;
    tracing::info!(%name, "widget created");
    Ok(Json(ModelResponse { model: name }))
}

/// PUT /widget_models/:oldname
async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(oldname): Path<String>,
    body: Option<Json<ModelRequest>>,
) -> Result<Json<ModelResponse>, RegistryError> {
    let Json(req) = body.ok_or(RegistryError::Validation)?;
    let name = state
        .registry
        .write()
        .await
        .rename(&oldname, &req.model)?;
    tracing::info!(old = %oldname, new = %name, "widget renamed");
    Ok(Json(ModelResponse { model: name }))
}

/// DELETE /widget_models/:name
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, RegistryError> {
    state.registry.write().await.delete(&name)?;
    tracing::info!(%name, "widget deleted");
    Ok(StatusCode::OK)
}

/// GET / — serve the browser client page from the asset directory.
async fn homepage_handler(State(state): State<Arc<AppState>>) -> Response {
    let path = state.asset_dir.join("client_browser.html");
    match tokio::fs::read(&path).await {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .header(header::CACHE_CONTROL, "no-cache")
            .body(Body::from(bytes))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Build the full router over the given state. Static assets (the
/// browser client's js files) are served for any path no API route
/// claims.
pub fn router(config: &ServerConfig, state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/widget_models",
            get(listing_handler).post(creation_handler),
        )
        .route(
            "/widget_models/:name",
            axum::routing::put(update_handler).delete(delete_handler),
        )
        .route("/", get(homepage_handler))
        .fallback_service(ServeDir::new(&config.asset_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and run the server until it is shut down.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(&config));
    let app = router(&config, state);
    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!("widget API server listening on http://{}", config.addr);
    axum::serve(listener, app).await
}
