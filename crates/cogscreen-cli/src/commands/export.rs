use std::path::PathBuf;

use anyhow::{Context, Result};

pub async fn execute(output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (_config, store) = super::open_configured_store(config_path.as_deref()).await?;

    let document = store.export_json()?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    std::fs::write(&output, document)
        .with_context(|| format!("Failed to write export file: {}", output.display()))?;

    println!("Exported {} result(s) to {}", store.len(), output.display());
    Ok(())
}
