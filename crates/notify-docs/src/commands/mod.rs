pub mod build;
pub mod config;
pub mod dev;
pub mod init;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify_docs_config::{ConfigFile, SwaggerUiConfig};

/// A loaded config file together with the directory its paths are relative to.
pub struct Project {
    pub file: ConfigFile,
    pub ui: SwaggerUiConfig,
    root: PathBuf,
}

impl Project {
    /// Assets directory, relative to the config file.
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(&self.file.site.assets_dir)
    }

    /// Build output directory, relative to the config file.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.file.site.output)
    }
}

/// Load the config file and the widget configuration it describes.
pub fn load(path: &Path) -> Result<Project> {
    let file = ConfigFile::load(path)?;
    let ui = file
        .swagger_ui()
        .with_context(|| format!("Invalid Swagger UI configuration in {}", path.display()))?;

    Ok(Project {
        file,
        ui,
        root: path.parent().unwrap_or(Path::new("")).to_path_buf(),
    })
}
