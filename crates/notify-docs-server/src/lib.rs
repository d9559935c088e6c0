//! Development server with live reload for the API-NGR-notify docs.
//!
//! Hosts the Swagger UI page and the OpenAPI documents, watches the documents and
//! reloads connected browsers when they change.

pub mod reload;
pub mod server;
pub mod watcher;

pub use reload::{ReloadHub, ReloadMessage};
pub use server::{router, DevServer, DevServerConfig, ServerError, ServerState};
pub use watcher::{FileWatcher, WatchEvent};
