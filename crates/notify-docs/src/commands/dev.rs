//! Development server command.

use std::path::Path;

use anyhow::Result;
use notify_docs_server::{DevServer, DevServerConfig};

/// Run the dev server.
pub async fn run(config: &Path, port: u16, open: bool) -> Result<()> {
    let project = super::load(config)?;

    tracing::info!("Starting development server on port {}", port);

    let server_config = DevServerConfig {
        assets_dir: project.assets_dir(),
        port,
        open,
        title: project.file.site.title,
        widget_url: project.file.site.widget_url,
        ..Default::default()
    };

    DevServer::new(server_config, project.ui).start().await?;

    Ok(())
}
