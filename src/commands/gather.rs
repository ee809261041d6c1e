//! Gather command implementation
//!
//! Runs the fetch loop and ingestion for each category in turn:
//! read the known texts once, collect up to N unique candidates within the
//! attempt budget, then write the batch through the store's insert contract.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{collect_unique, CatFactProvider, DogFactProvider, FactProvider};
use crate::ingest::ingest_facts;
use crate::store::{Category, FactStore};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Requested counts per category
#[derive(Debug, Clone)]
pub struct GatherOptions {
    pub cat_count: usize,
    pub dog_count: usize,
}

/// Statistics for one category of a gather run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGatherStats {
    pub category: String,
    pub requested: usize,
    pub fetched: usize,
    pub attempts: u32,
    pub inserted: usize,
    pub duplicates: usize,
    pub shortfall: bool,
}

/// Statistics for a whole gather run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatherStats {
    pub categories: Vec<CategoryGatherStats>,
}

/// Fetch and store unique facts for one category
pub async fn gather_category(
    store: &FactStore,
    provider: &dyn FactProvider,
    category: Category,
    n: usize,
    attempt_multiplier: u32,
) -> Result<CategoryGatherStats> {
    info!("Gathering {} {} facts", n, category);

    let known = store.existing_texts(category).await?;
    let max_attempts = n as u32 * attempt_multiplier;
    let outcome = collect_unique(provider, n, &known, max_attempts).await;

    let ingest = ingest_facts(store, category, &outcome.facts).await?;

    Ok(CategoryGatherStats {
        category: category.to_string(),
        requested: outcome.requested,
        fetched: outcome.facts.len(),
        attempts: outcome.attempts,
        inserted: ingest.inserted,
        duplicates: ingest.duplicates,
        shortfall: outcome.shortfall(),
    })
}

/// Run the full gather flow for both categories
pub async fn cmd_gather(
    config: &Config,
    store: &FactStore,
    options: GatherOptions,
) -> Result<GatherStats> {
    let multiplier = config.fetch.attempt_multiplier;

    let cat_provider = CatFactProvider::from_config(&config.providers)?;
    let cat_stats = gather_category(
        store,
        &cat_provider,
        Category::Cat,
        options.cat_count,
        multiplier,
    )
    .await?;

    let dog_provider = DogFactProvider::from_config(&config.providers)?;
    let dog_stats = gather_category(
        store,
        &dog_provider,
        Category::Dog,
        options.dog_count,
        multiplier,
    )
    .await?;

    Ok(GatherStats {
        categories: vec![cat_stats, dog_stats],
    })
}

/// Print gather statistics to console
pub fn print_gather_stats(stats: &GatherStats) {
    println!("\n✓ Gather complete");
    for cat in &stats.categories {
        println!("\n{} facts:", cat.category);
        println!("  Requested: {}", cat.requested);
        println!("  Fetched: {} (in {} attempts)", cat.fetched, cat.attempts);
        println!("  Inserted: {}", cat.inserted);
        println!("  Duplicates skipped: {}", cat.duplicates);
        if cat.shortfall {
            println!(
                "  ⚠ Shortfall: only {} of {} unique facts obtained",
                cat.fetched, cat.requested
            );
        }
    }
}
