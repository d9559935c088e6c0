//! Configuration file (swagger.toml) loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::{DocumentSource, Layout, Plugin, Preset, SwaggerUiConfig};
use crate::startup::{StartupConfigurator, DEFAULT_MOUNT_ID};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("At least one document source is required")]
    EmptySources,

    #[error("Document source {0:?} has an empty url")]
    EmptySourceUrl(String),

    #[error("Mount id must not be empty")]
    EmptyMountId,

    #[error("Mount id {0:?} must start with a letter and contain only letters, digits, '-' or '_'")]
    InvalidMountId(String),

    #[error("{0} requires the standalone preset")]
    LayoutRequiresStandalone(Layout),
}

/// Configuration file structure.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default = "default_sources")]
    pub sources: Vec<DocumentSource>,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

/// Page and hosting settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteSettings {
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,
    /// Output directory for `build`
    #[serde(default = "default_output")]
    pub output: String,
    /// Directory served under `/assets`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Base URL of the swagger-ui-dist files
    #[serde(default = "default_widget_url")]
    pub widget_url: String,
}

/// Widget settings, mirroring the widget's own option names.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UiSettings {
    #[serde(default = "default_mount_id")]
    pub mount_id: String,
    #[serde(default = "default_true")]
    pub deep_linking: bool,
    #[serde(default = "default_presets")]
    pub presets: Vec<Preset>,
    #[serde(default = "default_plugins")]
    pub plugins: Vec<Plugin>,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BuildSettings {
    #[serde(default = "default_true")]
    pub minify: bool,
}

fn default_sources() -> Vec<DocumentSource> {
    StartupConfigurator::new().configure().sources
}
fn default_title() -> String {
    "API-NGR-notify".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_assets_dir() -> String {
    "assets".to_string()
}
fn default_widget_url() -> String {
    "https://unpkg.com/swagger-ui-dist@5".to_string()
}
fn default_mount_id() -> String {
    DEFAULT_MOUNT_ID.to_string()
}
fn default_presets() -> Vec<Preset> {
    vec![Preset::Apis, Preset::Standalone]
}
fn default_plugins() -> Vec<Plugin> {
    vec![Plugin::DownloadUrl]
}
fn default_true() -> bool {
    true
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            site: SiteSettings::default(),
            sources: default_sources(),
            ui: UiSettings::default(),
            build: BuildSettings::default(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: default_output(),
            assets_dir: default_assets_dir(),
            widget_url: default_widget_url(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            mount_id: default_mount_id(),
            deep_linking: true,
            presets: default_presets(),
            plugins: default_plugins(),
            layout: Layout::default(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self { minify: true }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    ///
    /// A missing file yields the defaults, which describe the same widget setup as
    /// [`StartupConfigurator::configure`]. A file that exists but is malformed is
    /// an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::parse(&content).map_err(|message| ConfigError::ParseError {
            path: path.display().to_string(),
            message,
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse(source).map_err(|message| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message,
        })
    }

    fn parse(source: &str) -> Result<Self, String> {
        toml::from_str(source).map_err(|e| e.to_string())
    }

    /// Build the widget configuration described by this file.
    ///
    /// Only the structural invariants are checked. Documents are never fetched,
    /// a bad URL is reported by the widget itself.
    pub fn swagger_ui(&self) -> Result<SwaggerUiConfig, ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::EmptySources);
        }

        if let Some(source) = self.sources.iter().find(|s| s.url.trim().is_empty()) {
            return Err(ConfigError::EmptySourceUrl(source.name.clone()));
        }

        // Accept both `swagger-ui` and `#swagger-ui`
        let mount_id = self.ui.mount_id.trim().trim_start_matches('#');
        if mount_id.is_empty() {
            return Err(ConfigError::EmptyMountId);
        }

        // The initializer addresses the element as `#<id>`, so the id must be a
        // plain CSS identifier
        if !is_plain_identifier(mount_id) {
            return Err(ConfigError::InvalidMountId(mount_id.to_string()));
        }

        if self.ui.layout == Layout::Standalone && !self.ui.presets.contains(&Preset::Standalone) {
            return Err(ConfigError::LayoutRequiresStandalone(self.ui.layout));
        }

        Ok(SwaggerUiConfig {
            sources: self.sources.clone(),
            mount_id: mount_id.to_string(),
            deep_linking: self.ui.deep_linking,
            presets: self.ui.presets.clone(),
            plugins: self.ui.plugins.clone(),
            layout: self.ui.layout,
        })
    }
}

/// `[A-Za-z][A-Za-z0-9_-]*`
fn is_plain_identifier(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_startup_configuration() {
        let config = ConfigFile::default().swagger_ui().unwrap();

        assert_eq!(config, StartupConfigurator::new().configure());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = ConfigFile::load(&temp.path().join("swagger.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigFile::from_toml_str(
            r#"
[site]
title = "Notify API"

[ui]
deep_linking = false
"#,
        )
        .unwrap();

        assert_eq!(config.site.title, "Notify API");
        assert_eq!(config.site.assets_dir, "assets");
        assert!(!config.ui.deep_linking);
        assert_eq!(config.ui.presets, vec![Preset::Apis, Preset::Standalone]);
        assert_eq!(config.sources, default_sources());
        assert!(config.build.minify);
    }

    #[test]
    fn parses_full_file() {
        let config = ConfigFile::from_toml_str(
            r##"
[[sources]]
url = "/assets/api-ngr-notify-1.0.0.yaml"
name = "API-NGR-notify"

[[sources]]
url = "/assets/api-ngr-notify-2.0.0.yaml"
name = "API-NGR-notify v2"

[ui]
mount_id = "#docs"
presets = ["apis"]
plugins = []
layout = "BaseLayout"
"##,
        )
        .unwrap();

        let ui = config.swagger_ui().unwrap();

        assert_eq!(ui.sources().len(), 2);
        assert_eq!(ui.sources()[1].name, "API-NGR-notify v2");
        assert_eq!(ui.mount_id(), "docs");
        assert_eq!(ui.presets(), &[Preset::Apis]);
        assert!(ui.plugins().is_empty());
        assert_eq!(ui.layout(), Layout::Base);
    }

    #[test]
    fn rejects_empty_sources() {
        let config = ConfigFile::from_toml_str("sources = []").unwrap();

        assert!(matches!(config.swagger_ui(), Err(ConfigError::EmptySources)));
    }

    #[test]
    fn rejects_empty_source_url() {
        let config = ConfigFile::from_toml_str(
            r#"
[[sources]]
url = ""
name = "Broken"
"#,
        )
        .unwrap();

        match config.swagger_ui() {
            Err(ConfigError::EmptySourceUrl(name)) => assert_eq!(name, "Broken"),
            other => panic!("Expected EmptySourceUrl, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_preset() {
        let result = ConfigFile::from_toml_str("[ui]\npresets = [\"fancy\"]");

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn errors_on_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("swagger.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();

        let result = ConfigFile::load(&path);

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn rejects_mount_ids_that_are_not_plain_selectors() {
        for id in ["api.docs", "api:docs", "api docs", "docs[0]", "1docs", "-docs"] {
            let source = format!("[ui]\nmount_id = {:?}", id);
            let config = ConfigFile::from_toml_str(&source).unwrap();

            match config.swagger_ui() {
                Err(ConfigError::InvalidMountId(rejected)) => assert_eq!(rejected, id),
                other => panic!("Expected InvalidMountId for {:?}, got {:?}", id, other),
            }
        }
    }

    #[test]
    fn accepts_plain_mount_ids() {
        let config = ConfigFile::from_toml_str("[ui]\nmount_id = \"#api-docs_v2\"").unwrap();

        assert_eq!(config.swagger_ui().unwrap().mount_selector(), "#api-docs_v2");
    }

    #[test]
    fn standalone_layout_requires_standalone_preset() {
        let config = ConfigFile::from_toml_str(
            "[ui]\npresets = [\"apis\"]\nlayout = \"StandaloneLayout\"",
        )
        .unwrap();

        assert!(matches!(
            config.swagger_ui(),
            Err(ConfigError::LayoutRequiresStandalone(Layout::Standalone))
        ));

        let config =
            ConfigFile::from_toml_str("[ui]\npresets = [\"apis\"]\nlayout = \"BaseLayout\"")
                .unwrap();
        assert_eq!(config.swagger_ui().unwrap().layout(), Layout::Base);
    }
}
