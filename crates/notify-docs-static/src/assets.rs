//! Asset pipeline for the page stylesheet and the OpenAPI documents.

use std::path::{Component, Path, PathBuf};

use notify_docs_config::SwaggerUiConfig;

/// URL prefix under which the assets directory is served.
pub const ASSETS_PREFIX: &str = "/assets/";

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the page CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

/// Map a document URL served under `/assets/` to its file in `assets_dir`.
///
/// Returns `None` for URLs outside the assets prefix (remote documents) and for
/// paths that would escape `assets_dir`.
pub fn local_document(assets_dir: &Path, url: &str) -> Option<PathBuf> {
    let relative = Path::new(url.strip_prefix(ASSETS_PREFIX)?);

    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    Some(assets_dir.join(relative))
}

/// Source URLs that point into the assets directory but have no file there.
///
/// The widget reports these itself when it fails to fetch them, so callers only
/// use this to warn early.
pub fn missing_documents(ui: &SwaggerUiConfig, assets_dir: &Path) -> Vec<String> {
    ui.sources()
        .iter()
        .filter(|source| match local_document(assets_dir, &source.url) {
            Some(path) => !path.is_file(),
            None => false,
        })
        .map(|source| source.url.clone())
        .collect()
}

// Same rules as the stock swagger-ui-dist index.css
const DEFAULT_CSS: &str = r#"html {
  box-sizing: border-box;
  overflow: -moz-scrollbars-vertical;
  overflow-y: scroll;
}

*,
*:before,
*:after {
  box-sizing: inherit;
}

body {
  margin: 0;
  background: #fafafa;
}
"#;
