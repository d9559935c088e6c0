//! Print the resolved widget configuration.

use std::path::Path;

use anyhow::{Context, Result};

/// Run the config command.
pub fn run(config: &Path) -> Result<()> {
    let project = super::load(config)?;

    let json =
        serde_json::to_string_pretty(&project.ui).context("Failed to encode configuration")?;
    println!("{}", json);

    Ok(())
}
