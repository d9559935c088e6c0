//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use notify_docs_static::{BuildConfig, StaticBuilder};

/// Run the build command.
pub async fn run(config: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let project = super::load(config)?;

    let build_config = BuildConfig {
        assets_dir: project.assets_dir(),
        output_dir: output.unwrap_or_else(|| project.output_dir()),
        minify: minify.unwrap_or(project.file.build.minify),
        title: project.file.site.title,
        widget_url: project.file.site.widget_url,
    };

    let result = StaticBuilder::new(build_config, project.ui).build().await?;

    tracing::info!(
        "Built page with {} asset files in {}ms",
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
