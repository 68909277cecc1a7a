//! HTTP surface of the store.
//!
//! Every request re-reads the filesystem. Archive work is blocking, so it
//! runs on tokio's blocking pool and never on the request task itself.

use std::net::SocketAddr;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use wta_core::catalog::{self, CatalogError};
use wta_core::media::static_media_type;
use wta_core::paths::resolve_within;

const LIST_ENDPOINT: &str = "/wta-store/list";
const ICON_ENDPOINT: &str = "/wta-store/icon/{file}";
const FILES_ENDPOINT: &str = "/wta-store/files/{*name}";
const PUBLIC_ENDPOINT: &str = "/{*path}";
const INDEX_FILE: &str = "index.html";

/// Startup configuration for the store server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub public_dir: PathBuf,
    pub packages_dir: PathBuf,
}

#[derive(Debug)]
struct ServerState {
    public_dir: PathBuf,
    packages_dir: PathBuf,
}

impl ServerState {
    fn from_config(config: &ServerConfig) -> Self {
        for (label, dir) in [
            ("public", &config.public_dir),
            ("packages", &config.packages_dir),
        ] {
            if !dir.is_dir() {
                warn!(dir = %dir.display(), "{label} directory does not exist yet");
            }
        }
        Self {
            public_dir: config.public_dir.clone(),
            packages_dir: config.packages_dir.clone(),
        }
    }
}

/// Run the store server until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let bind_addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid --bind '{}': expected host:port", config.bind))?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind store server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve store server listen address")?;

    info!(
        public_dir = %config.public_dir.display(),
        packages_dir = %config.packages_dir.display(),
        "Server running at http://{local_addr}"
    );

    axum::serve(listener, build_router(&config))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("store server exited unexpectedly")?;

    info!("Server stopped");
    Ok(())
}

/// Build the store router for `config`.
pub fn build_router(config: &ServerConfig) -> Router {
    let state = Arc::new(ServerState::from_config(config));
    Router::new()
        .route(LIST_ENDPOINT, get(handle_list))
        .route(ICON_ENDPOINT, get(handle_icon))
        .route(FILES_ENDPOINT, get(handle_package_file))
        .route("/", get(handle_public_root))
        .route(PUBLIC_ENDPOINT, get(handle_public))
        .with_state(state)
}

async fn run_blocking<T, F>(f: F) -> Result<T, CatalogError>
where
    F: FnOnce() -> Result<T, CatalogError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CatalogError::Io(std::io::Error::other(e)))?
}

fn text(status: StatusCode, body: &'static str) -> Response {
    (status, body).into_response()
}

async fn handle_list(State(state): State<Arc<ServerState>>) -> Response {
    let packages_dir = state.packages_dir.clone();
    match run_blocking(move || catalog::list_apps(&packages_dir)).await {
        Ok(apps) => {
            debug!(count = apps.len(), "listed packages");
            Json(apps).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to list packages");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Error listing WTA files")
        }
    }
}

async fn handle_icon(
    State(state): State<Arc<ServerState>>,
    Path(file): Path<String>,
) -> Response {
    let packages_dir = state.packages_dir.clone();
    let package = file.clone();
    match run_blocking(move || catalog::load_icon(&packages_dir, &package)).await {
        Ok(icon) => {
            debug!(file = %file, icon = %icon.name, media_type = icon.media_type, "serving icon");
            ([(CONTENT_TYPE, icon.media_type)], icon.bytes).into_response()
        }
        Err(CatalogError::PackageNotFound(_)) => {
            text(StatusCode::NOT_FOUND, "WTA file not found")
        }
        Err(CatalogError::IconNotFound { icon, .. }) => {
            debug!(file = %file, icon = %icon, "icon entry missing");
            text(StatusCode::NOT_FOUND, "Icon not found in WTA file")
        }
        Err(e) => {
            error!(file = %file, error = %e, "failed to read icon");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Error reading WTA file")
        }
    }
}

async fn handle_package_file(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
) -> Response {
    match catalog::resolve_package_file(&state.packages_dir, &name) {
        Some(path) => serve_file(&path).await,
        None => text(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn handle_public_root(State(state): State<Arc<ServerState>>) -> Response {
    serve_public(&state.public_dir, "").await
}

async fn handle_public(
    State(state): State<Arc<ServerState>>,
    Path(path): Path<String>,
) -> Response {
    serve_public(&state.public_dir, &path).await
}

async fn serve_public(public_dir: &FsPath, request_path: &str) -> Response {
    let Some(mut path) = resolve_within(public_dir, request_path) else {
        return text(StatusCode::NOT_FOUND, "Not found");
    };
    if path.is_dir() {
        path.push(INDEX_FILE);
    }
    if !path.is_file() {
        return text(StatusCode::NOT_FOUND, "Not found");
    }
    serve_file(&path).await
}

async fn serve_file(path: &FsPath) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(CONTENT_TYPE, static_media_type(path))], bytes).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            text(StatusCode::NOT_FOUND, "Not found")
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read file");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Error reading file")
        }
    }
}
