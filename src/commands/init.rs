//! Init command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::FactStore;
use std::path::PathBuf;
use tracing::info;

/// Initialize petfacts configuration and database
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<Config> {
    let config = Config::load_from(base_dir)?;

    if config.paths.config_file.exists() && !force {
        return Err(Error::Config(format!(
            "Config already exists at {}. Use --force to overwrite.",
            config.paths.config_file.display()
        )));
    }

    config.save()?;

    // Opening the store creates the database file and schema
    let store = FactStore::new(&config.paths.db_file).await?;
    store.init_schema().await?;

    info!("Initialized petfacts at {:?}", config.paths.base_dir);
    Ok(config)
}
