use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

pub async fn execute(id: Uuid, config_path: Option<PathBuf>) -> Result<()> {
    let (_config, mut store) = super::open_configured_store(config_path.as_deref()).await?;

    if store.delete(id).await? {
        println!("Deleted result {id}");
        Ok(())
    } else {
        anyhow::bail!("No result with id {id}")
    }
}
