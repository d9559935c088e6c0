//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;

use notify_docs_config::{SiteSettings, SwaggerUiConfig};
use notify_docs_static::{missing_documents, AssetPipeline, PageContext, TemplateEngine};

use crate::reload::{reload_client_script, ReloadHub, ReloadMessage};
use crate::watcher::{FileWatcher, WatchEvent};

const RELOAD_SOCKET_PATH: &str = "/__reload";
const RELOAD_SCRIPT_PATH: &str = "/__reload.js";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Page title
    pub title: String,

    /// Base URL of the swagger-ui-dist files
    pub widget_url: String,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        let site = SiteSettings::default();

        Self {
            assets_dir: PathBuf::from(site.assets_dir),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            title: site.title,
            widget_url: site.widget_url,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    AddressError(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Template error: {0}")]
    TemplateError(String),
}

/// Shared server state.
///
/// Everything is rendered once at startup; the widget configuration is never
/// mutated while the server runs.
pub struct ServerState {
    ui: SwaggerUiConfig,
    page: String,
    initializer: String,
    css: String,
    reload: ReloadHub,
}

impl ServerState {
    /// Render the page and initializer for `ui`.
    pub fn new(config: &DevServerConfig, ui: SwaggerUiConfig) -> Result<Self, ServerError> {
        let templates = TemplateEngine::new();

        let context = PageContext::new(&config.title, &config.widget_url, &ui)
            .with_script(RELOAD_SCRIPT_PATH);

        let page = templates
            .render_page(&context)
            .map_err(|e| ServerError::TemplateError(e.to_string()))?;

        let initializer = templates
            .render_initializer(&ui)
            .map_err(|e| ServerError::TemplateError(e.to_string()))?;

        Ok(Self {
            ui,
            page,
            initializer,
            css: AssetPipeline::generate_css(),
            reload: ReloadHub::new(),
        })
    }

    pub fn reload(&self) -> &ReloadHub {
        &self.reload
    }
}

/// Build the router serving the page, the initializer and the documents.
pub fn router(state: Arc<ServerState>, assets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/index.css", get(css_handler))
        .route("/swagger-initializer.js", get(initializer_handler))
        .route("/config.json", get(config_handler))
        .route(RELOAD_SOCKET_PATH, get(ws_handler))
        .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .with_state(state)
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
    ui: SwaggerUiConfig,
}

impl DevServer {
    /// Create a new development server for the given widget configuration.
    pub fn new(config: DevServerConfig, ui: SwaggerUiConfig) -> Self {
        Self { config, ui }
    }

    /// Start the development server.
    ///
    /// The port is bound before anything else happens, so a port already in use
    /// fails fast without starting the watcher or opening a browser.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::AddressError(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        for url in missing_documents(&self.ui, &self.config.assets_dir) {
            tracing::warn!(
                "Document {} not found in {}",
                url,
                self.config.assets_dir.display()
            );
        }

        let state = Arc::new(ServerState::new(&self.config, self.ui)?);

        let (watcher, mut rx) = FileWatcher::new(&[self.config.assets_dir.clone()])
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event);
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.assets_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::debug!("Could not open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handle file watch events.
fn handle_watch_event(state: &ServerState, event: WatchEvent) {
    match &event {
        WatchEvent::DocumentModified(path) => {
            tracing::info!("Document modified: {}", path.display());
        }
        _ => tracing::debug!("Asset changed: {}", event.path().display()),
    }

    state.reload.send(ReloadMessage::Reload);
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Html(state.page.clone())
}

async fn css_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], state.css.clone())
}

async fn initializer_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        state.initializer.clone(),
    )
}

async fn config_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.ui.clone())
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward reload messages to a connected browser.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.reload.subscribe();

    if send_message(&mut socket, &ReloadMessage::Connected)
        .await
        .is_err()
    {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ReloadMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}

async fn reload_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        reload_client_script(RELOAD_SOCKET_PATH),
    )
}
