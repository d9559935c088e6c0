//! Initialize a notify-docs project.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the starter document, matching the default document source.
const DOCUMENT_FILE: &str = "api-ngr-notify-1.0.0.yaml";

/// Run the init command.
///
/// Writes `config` and the starter document into an `assets/` directory next
/// to it. Existing files are kept unless `yes` is set.
pub async fn run(config: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing notify-docs...");

    let written = scaffold(config, yes)?;

    for path in &written {
        tracing::info!("Created {}", path.display());
    }

    if written.is_empty() {
        tracing::warn!("Nothing to do, files already exist. Use --yes to overwrite.");
    } else {
        tracing::info!("Initialization complete!");
        tracing::info!("Run 'notify-docs dev' to start the development server.");
    }

    Ok(())
}

pub(crate) fn scaffold(config: &Path, yes: bool) -> Result<Vec<PathBuf>> {
    let root = config.parent().unwrap_or(Path::new(""));
    let assets_dir = root.join("assets");
    let mut written = Vec::new();

    if !config.exists() || yes {
        fs::write(config, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config.display()))?;
        written.push(config.to_path_buf());
    }

    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;

    let document_path = assets_dir.join(DOCUMENT_FILE);
    if !document_path.exists() || yes {
        fs::write(&document_path, DEFAULT_DOCUMENT)
            .with_context(|| format!("Failed to write {}", document_path.display()))?;
        written.push(document_path);
    }

    Ok(written)
}

const DEFAULT_CONFIG: &str = r#"# notify-docs configuration

[site]
# Page title
title = "API-NGR-notify"

# Output directory for built site
output = "dist"

# Directory served under /assets
assets_dir = "assets"

# Where the swagger-ui-dist files are loaded from
widget_url = "https://unpkg.com/swagger-ui-dist@5"

[[sources]]
url = "/assets/api-ngr-notify-1.0.0.yaml"
name = "API-NGR-notify"

[ui]
mount_id = "swagger-ui"
deep_linking = true
presets = ["apis", "standalone"]
plugins = ["download-url"]
layout = "StandaloneLayout"

[build]
# Enable minification
minify = true
"#;

const DEFAULT_DOCUMENT: &str = r#"openapi: 3.0.3
info:
  title: API-NGR-notify
  version: 1.0.0
  description: Replace this document with the API-NGR-notify specification.
paths: {}
"#;
