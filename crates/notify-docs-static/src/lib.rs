//! Static site generator for the API-NGR-notify Swagger UI page.
//!
//! Renders the hosting page and the widget initializer from a [`SwaggerUiConfig`]
//! and bundles them with the OpenAPI documents into a deployable directory.
//!
//! [`SwaggerUiConfig`]: notify_docs_config::SwaggerUiConfig

pub mod assets;
pub mod builder;
pub mod templates;

pub use assets::{local_document, missing_documents, AssetPipeline, ASSETS_PREFIX};
pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use templates::{PageContext, TemplateEngine};
