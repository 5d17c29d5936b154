use std::path::PathBuf;

use anyhow::{Context, Result};

pub async fn execute(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (_config, mut store) = super::open_configured_store(config_path.as_deref()).await?;

    let payload = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read import file: {}", input.display()))?;
    let count = store.import_json(&payload).await?;

    println!("Imported {count} result(s), replacing the previous collection");
    Ok(())
}
