//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

/// Run the serve command.
pub async fn run(config: &Path, port: u16, dir: Option<PathBuf>, open: bool) -> Result<()> {
    let dir = serve_dir(config, dir)?;

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'notify-docs build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!("Serving {} at http://{}", dir.display(), addr);

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    if open {
        let url = format!("http://{}", addr);
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// The explicit `--dir`, or the build output named in the config file.
fn serve_dir(config: &Path, dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => Ok(super::load(config)?.output_dir()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_to_configured_output() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("swagger.toml");
        fs::write(&config, "[site]\noutput = \"public\"\n").unwrap();

        assert_eq!(
            serve_dir(&config, None).unwrap(),
            temp.path().join("public")
        );
    }

    #[test]
    fn explicit_dir_wins() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("swagger.toml");
        fs::write(&config, "[site]\noutput = \"public\"\n").unwrap();

        assert_eq!(
            serve_dir(&config, Some(PathBuf::from("elsewhere"))).unwrap(),
            PathBuf::from("elsewhere")
        );
    }
}
