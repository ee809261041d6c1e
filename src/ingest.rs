//! Batch ingestion into the fact store
//!
//! Each fact commits independently; a duplicate rejection from the store is
//! the expected second line of defense behind the fetch loop's in-memory
//! check and is absorbed here. Cat facts additionally get a metadata row
//! (text length, insertion time) keyed by the new identifier. The metadata
//! insert is not atomic with the fact insert; a fact row without metadata is
//! an accepted degraded state.

use crate::error::Result;
use crate::store::{Category, FactStore};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Statistics from one ingestion batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Persist a batch of texts for one category.
///
/// Duplicates are skipped and counted; storage failures propagate.
pub async fn ingest_facts(
    store: &FactStore,
    category: Category,
    facts: &[String],
) -> Result<IngestStats> {
    let mut stats = IngestStats::default();

    for text in facts {
        let id = match store.insert_fact(category, text).await {
            Ok(id) => id,
            Err(e) if e.is_duplicate() => {
                debug!("Skipping duplicate {} fact", category);
                stats.duplicates += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if category == Category::Cat {
            let fact_length = text.chars().count() as i64;
            let insertion_time = Utc::now().to_rfc3339();
            match store
                .insert_cat_metadata(id, fact_length, &insertion_time)
                .await
            {
                Ok(()) => {}
                Err(e) if e.is_duplicate() => {
                    debug!("Metadata row already exists for cat fact {}", id);
                }
                Err(e) => return Err(e),
            }
        }

        stats.inserted += 1;
    }

    info!(
        "Ingested {} {} facts ({} duplicates skipped)",
        stats.inserted, category, stats.duplicates
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_test_store() -> (FactStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = FactStore::new(&tmp.path().join("test.db")).await.unwrap();
        (store, tmp)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn re_ingesting_the_same_batch_inserts_nothing() {
        let (store, _tmp) = setup_test_store().await;
        let batch = strings(&["A", "B", "C"]);

        let first = ingest_facts(&store, Category::Dog, &batch).await.unwrap();
        assert_eq!(first.inserted, 3);
        assert_eq!(first.duplicates, 0);

        let second = ingest_facts(&store, Category::Dog, &batch).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.duplicates, 3);

        assert_eq!(store.all_facts(Category::Dog).await.unwrap(), batch);
    }

    #[tokio::test]
    async fn cat_facts_get_matching_metadata() {
        let (store, _tmp) = setup_test_store().await;
        let batch = strings(&["Cats purr.", "Kittens sleep most of the day."]);

        ingest_facts(&store, Category::Cat, &batch).await.unwrap();

        let rows = store.cat_facts_with_metadata().await.unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.fact_length as usize, row.fact.chars().count());
            assert!(!row.insertion_time.is_empty());
        }
    }

    #[tokio::test]
    async fn dog_facts_get_no_metadata() {
        let (store, _tmp) = setup_test_store().await;

        ingest_facts(&store, Category::Dog, &strings(&["Dogs bark."]))
            .await
            .unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.dog_facts, 1);
        assert_eq!(stats.cat_metadata, 0);
    }

    #[tokio::test]
    async fn partial_batch_overlap_inserts_only_novel_texts() {
        let (store, _tmp) = setup_test_store().await;

        ingest_facts(&store, Category::Cat, &strings(&["A", "B"]))
            .await
            .unwrap();
        let stats = ingest_facts(&store, Category::Cat, &strings(&["B", "C"]))
            .await
            .unwrap();

        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(
            store.all_facts(Category::Cat).await.unwrap(),
            strings(&["A", "B", "C"])
        );
    }
}
