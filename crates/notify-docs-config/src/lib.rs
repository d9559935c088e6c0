//! Swagger UI startup configuration.
//!
//! This crate describes the configuration handed to the Swagger UI widget when the
//! hosting page finishes loading: which OpenAPI documents to offer, where to mount
//! the widget, and which presets, plugins and layout to activate.

pub mod file;
pub mod model;
pub mod startup;

pub use file::{BuildSettings, ConfigError, ConfigFile, SiteSettings, UiSettings};
pub use model::{DocumentSource, Layout, Plugin, Preset, SwaggerUiConfig};
pub use startup::StartupConfigurator;
