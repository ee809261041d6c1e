//! Status command implementation

use crate::config::Config;
use crate::error::Result;
use crate::store::{FactStore, StoreStats};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub db_path: String,
    pub store_stats: StoreStats,
}

/// Get system status
pub async fn cmd_status(config: &Config, store: &FactStore) -> Result<StatusInfo> {
    info!("Getting status");

    let store_stats = store.stats().await?;

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        db_path: config.paths.db_file.display().to_string(),
        store_stats,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 petfacts Status\n");
    println!("Configuration: {}", status.config_path);
    println!("Database: {}", status.db_path);
    println!("\nStored Facts:");
    println!("  Cat facts: {}", status.store_stats.cat_facts);
    println!("  Cat metadata rows: {}", status.store_stats.cat_metadata);
    println!("  Dog facts: {}", status.store_stats.dog_facts);
}
