pub mod clear;
pub mod dashboard;
pub mod delete;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod results;
pub mod show;
pub mod stats;
pub mod take;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use cogscreen_core::catalog::Catalog;
use cogscreen_core::parser::load_test_directory;
use cogscreen_store::backend::JsonFileStorage;
use cogscreen_store::store::ResultStore;

use crate::config::CogscreenConfig;

/// Build the catalog: built-in tests plus any custom definitions from the
/// configured tests directory.
pub(crate) fn load_catalog(config: &CogscreenConfig) -> Result<Catalog> {
    match &config.tests_dir {
        Some(dir) if dir.exists() => {
            let extra = load_test_directory(dir)
                .with_context(|| format!("Failed to load custom tests from {}", dir.display()))?;
            Ok(Catalog::with_extra_tests(extra))
        }
        Some(dir) => {
            tracing::warn!(dir = %dir.display(), "configured tests directory does not exist");
            Ok(Catalog::builtin())
        }
        None => Ok(Catalog::builtin()),
    }
}

/// Open the results store backed by the configured JSON file.
pub(crate) async fn open_store(config: &CogscreenConfig) -> ResultStore {
    let backend = Arc::new(JsonFileStorage::new(&config.data_file));
    let mut store = ResultStore::new(backend);
    store.load().await;
    store
}

/// Shorthand used by commands that need config + store together.
pub(crate) async fn open_configured_store(
    config_path: Option<&Path>,
) -> Result<(CogscreenConfig, ResultStore)> {
    let config = crate::config::load_config(config_path)?;
    let store = open_store(&config).await;
    Ok((config, store))
}
