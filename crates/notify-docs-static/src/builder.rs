//! Static site builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use notify_docs_config::{BuildSettings, SiteSettings, SwaggerUiConfig};
use walkdir::WalkDir;

use crate::assets::{missing_documents, AssetPipeline};
use crate::templates::{PageContext, TemplateEngine};

/// Configuration for building the static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the OpenAPI documents, copied to `assets/`
    pub assets_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Page title
    pub title: String,

    /// Base URL of the swagger-ui-dist files
    pub widget_url: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let site = SiteSettings::default();

        Self {
            assets_dir: PathBuf::from(site.assets_dir),
            output_dir: PathBuf::from(site.output),
            minify: BuildSettings::default().minify,
            title: site.title,
            widget_url: site.widget_url,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of files copied from the assets directory
    pub assets: usize,

    /// Source URLs with no matching file in the assets directory
    pub missing: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read assets: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    ui: SwaggerUiConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder for the given widget configuration.
    pub fn new(config: BuildConfig, ui: SwaggerUiConfig) -> Self {
        Self {
            config,
            ui,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        self.render_page()?;
        self.render_initializer()?;
        self.generate_css()?;
        let assets = self.copy_assets()?;
        self.write_config()?;

        let missing = missing_documents(&self.ui, &self.config.assets_dir);
        for url in &missing {
            tracing::warn!(
                "Document {} not found in {}, the page will show a fetch error",
                url,
                self.config.assets_dir.display()
            );
        }

        let duration = start.elapsed();

        Ok(BuildResult {
            assets,
            missing,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render index.html.
    fn render_page(&self) -> Result<(), BuildError> {
        let context = PageContext::new(&self.config.title, &self.config.widget_url, &self.ui);

        let html = self
            .templates
            .render_page(&context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        fs::write(self.config.output_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Render swagger-initializer.js.
    fn render_initializer(&self) -> Result<(), BuildError> {
        let js = self
            .templates
            .render_initializer(&self.ui)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        fs::write(self.config.output_dir.join("swagger-initializer.js"), js)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    fn generate_css(&self) -> Result<(), BuildError> {
        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };

        fs::write(self.config.output_dir.join("index.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Copy the assets directory verbatim into `<output>/assets`.
    fn copy_assets(&self) -> Result<usize, BuildError> {
        let source_dir = &self.config.assets_dir;
        let target_dir = self.config.output_dir.join("assets");

        if !source_dir.exists() {
            tracing::warn!("Assets directory not found: {}", source_dir.display());
            return Ok(0);
        }

        let mut copied = 0;

        for entry in WalkDir::new(source_dir).follow_links(true) {
            let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
            let path = entry.path();

            let relative = path
                .strip_prefix(source_dir)
                .map_err(|e| BuildError::ReadError(e.to_string()))?;
            let target = target_dir.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| BuildError::WriteError(e.to_string()))?;
                continue;
            }

            fs::copy(path, &target).map_err(|e| {
                BuildError::WriteError(format!("{}: {}", target.display(), e))
            })?;
            tracing::debug!("Copied {}", relative.display());
            copied += 1;
        }

        Ok(copied)
    }

    /// Write the widget configuration as JSON for external tooling.
    fn write_config(&self) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(&self.ui)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("config.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify_docs_config::StartupConfigurator;
    use tempfile::tempdir;

    const NOTIFY_YAML: &str = "openapi: 3.0.3\ninfo:\n  title: API-NGR-notify\n  version: 1.0.0\npaths: {}\n";

    #[tokio::test]
    async fn builds_site() {
        let temp = tempdir().unwrap();
        let assets = temp.path().join("assets");
        let out = temp.path().join("dist");

        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("api-ngr-notify-1.0.0.yaml"), NOTIFY_YAML).unwrap();

        let config = BuildConfig {
            assets_dir: assets,
            output_dir: out.clone(),
            ..Default::default()
        };

        let builder = StaticBuilder::new(config, StartupConfigurator::new().configure());
        let result = builder.build().await.unwrap();

        assert_eq!(result.assets, 1);
        assert!(result.missing.is_empty());
        assert!(out.join("index.html").exists());
        assert!(out.join("index.css").exists());

        let js = fs::read_to_string(out.join("swagger-initializer.js")).unwrap();
        assert!(js.contains("/assets/api-ngr-notify-1.0.0.yaml"));

        let copied = fs::read_to_string(out.join("assets/api-ngr-notify-1.0.0.yaml")).unwrap();
        assert_eq!(copied, NOTIFY_YAML);
    }

    #[tokio::test]
    async fn writes_config_json() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let builder = StaticBuilder::new(
            BuildConfig {
                assets_dir: temp.path().join("assets"),
                output_dir: out.clone(),
                ..Default::default()
            },
            StartupConfigurator::new().configure(),
        );

        builder.build().await.unwrap();

        let json = fs::read_to_string(out.join("config.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mount_id"], "swagger-ui");
        assert_eq!(value["layout"], "StandaloneLayout");
        assert_eq!(value["presets"], serde_json::json!(["apis", "standalone"]));
        assert_eq!(value["plugins"], serde_json::json!(["download-url"]));
    }

    #[tokio::test]
    async fn reports_missing_document() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let builder = StaticBuilder::new(
            BuildConfig {
                assets_dir: temp.path().join("assets"),
                output_dir: out.clone(),
                ..Default::default()
            },
            StartupConfigurator::new().configure(),
        );

        let result = builder.build().await.unwrap();

        assert_eq!(result.assets, 0);
        assert_eq!(result.missing, vec!["/assets/api-ngr-notify-1.0.0.yaml"]);
        assert!(out.join("index.html").exists());
    }

    #[tokio::test]
    async fn copies_nested_assets() {
        let temp = tempdir().unwrap();
        let assets = temp.path().join("assets");
        let out = temp.path().join("dist");

        fs::create_dir_all(assets.join("schemas")).unwrap();
        fs::write(assets.join("api-ngr-notify-1.0.0.yaml"), NOTIFY_YAML).unwrap();
        fs::write(assets.join("schemas/event.yaml"), "type: object\n").unwrap();

        let builder = StaticBuilder::new(
            BuildConfig {
                assets_dir: assets,
                output_dir: out.clone(),
                minify: false,
                ..Default::default()
            },
            StartupConfigurator::new().configure(),
        );

        let result = builder.build().await.unwrap();

        assert_eq!(result.assets, 2);
        assert!(out.join("assets/schemas/event.yaml").exists());

        let css = fs::read_to_string(out.join("index.css")).unwrap();
        assert!(css.contains('\n'));
    }

    #[test]
    fn default_config_follows_site_settings() {
        let site = SiteSettings::default();
        let config = BuildConfig::default();

        assert_eq!(config.assets_dir, PathBuf::from(&site.assets_dir));
        assert_eq!(config.output_dir, PathBuf::from(&site.output));
        assert_eq!(config.title, site.title);
        assert_eq!(config.widget_url, site.widget_url);
        assert!(config.minify);
    }
}
