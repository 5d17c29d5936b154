use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    if !yes {
        anyhow::bail!("Refusing to delete all results without --yes");
    }

    let (_config, mut store) = super::open_configured_store(config_path.as_deref()).await?;
    let count = store.len();
    store.clear_all().await?;
    println!("Deleted {count} result(s)");
    Ok(())
}
