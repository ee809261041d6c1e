//! Fact storage using SQLite
//!
//! This module owns the three relations of the pipeline:
//! - cat_facts (text, unique per category)
//! - cat_fact_metadata (derived length and insertion time, one row per cat fact)
//! - dog_facts (text, unique per category)
//!
//! Uniqueness is enforced by the schema; a violated constraint surfaces as
//! [`Error::Duplicate`] so callers can treat re-inserts as benign.

mod schema;

pub use schema::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, info};

/// Fact categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cat,
    Dog,
}

impl Category {
    /// Table holding facts for this category
    pub fn table(&self) -> &'static str {
        match self {
            Category::Cat => "cat_facts",
            Category::Dog => "dog_facts",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Cat => write!(f, "cat"),
            Category::Dog => write!(f, "dog"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cat" => Ok(Category::Cat),
            "dog" => Ok(Category::Dog),
            _ => Err(Error::Config(format!("Unknown category: {}", s))),
        }
    }
}

/// A cat fact joined with its metadata row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CatFactDetail {
    pub fact: String,
    pub fact_length: i64,
    pub insertion_time: String,
}

/// Row counts for the status command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub cat_facts: usize,
    pub cat_metadata: usize,
    pub dog_facts: usize,
}

/// Fact database handle
#[derive(Clone)]
pub struct FactStore {
    pool: SqlitePool,
}

impl FactStore {
    /// Open the database at the given path, creating file and schema if needed
    pub async fn new(db_path: &std::path::Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        debug!("Connecting to SQLite database at {:?}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };

        if !store.is_initialized().await? {
            store.init_schema().await?;
        }

        Ok(store)
    }

    /// Initialize the database schema (idempotent)
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Check if the schema has been created
    pub async fn is_initialized(&self) -> Result<bool> {
        let result: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM sqlite_master WHERE type='table' AND name='cat_facts'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(result.is_some())
    }

    /// Every text currently stored for a category, for deduplication
    pub async fn existing_texts(&self, category: Category) -> Result<HashSet<String>> {
        let texts: Vec<String> =
            sqlx::query_scalar(&format!("SELECT fact FROM {}", category.table()))
                .fetch_all(&self.pool)
                .await?;
        Ok(texts.into_iter().collect())
    }

    /// All texts for a category in insertion order
    pub async fn all_facts(&self, category: Category) -> Result<Vec<String>> {
        let texts: Vec<String> =
            sqlx::query_scalar(&format!("SELECT fact FROM {} ORDER BY id", category.table()))
                .fetch_all(&self.pool)
                .await?;
        Ok(texts)
    }

    /// Insert one fact; returns the newly assigned identifier.
    ///
    /// Fails with [`Error::Duplicate`] if the text already exists for the
    /// category.
    pub async fn insert_fact(&self, category: Category, text: &str) -> Result<i64> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (fact) VALUES (?)",
            category.table()
        ))
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, text))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert the metadata row for a cat fact.
    ///
    /// Fails with [`Error::Duplicate`] if a metadata row already exists for
    /// the identifier.
    pub async fn insert_cat_metadata(
        &self,
        cat_fact_id: i64,
        fact_length: i64,
        insertion_time: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cat_fact_metadata (cat_fact_id, fact_length, insertion_time)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(cat_fact_id)
        .bind(fact_length)
        .bind(insertion_time)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, &format!("metadata for cat fact {}", cat_fact_id)))?;
        Ok(())
    }

    /// Cat facts joined with their metadata rows
    pub async fn cat_facts_with_metadata(&self) -> Result<Vec<CatFactDetail>> {
        let rows = sqlx::query_as::<_, CatFactDetail>(
            r#"
            SELECT cat_facts.fact, cat_fact_metadata.fact_length, cat_fact_metadata.insertion_time
            FROM cat_facts
            JOIN cat_fact_metadata ON cat_facts.id = cat_fact_metadata.cat_fact_id
            ORDER BY cat_facts.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Row counts across all three relations
    pub async fn stats(&self) -> Result<StoreStats> {
        let cat_facts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cat_facts")
            .fetch_one(&self.pool)
            .await?;
        let cat_metadata: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cat_fact_metadata")
            .fetch_one(&self.pool)
            .await?;
        let dog_facts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dog_facts")
            .fetch_one(&self.pool)
            .await?;

        Ok(StoreStats {
            cat_facts: cat_facts as usize,
            cat_metadata: cat_metadata as usize,
            dog_facts: dog_facts as usize,
        })
    }
}

/// Map a SQLite unique-constraint violation to [`Error::Duplicate`]; anything
/// else stays a database error.
fn map_unique(err: sqlx::Error, text: &str) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::Duplicate(text.to_string())
        }
        _ => Error::Database(err),
    }
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

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let (store, _tmp) = setup_test_store().await;
        assert!(store.is_initialized().await.unwrap());
        store.init_schema().await.unwrap();
        store.init_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_and_duplicate() {
        let (store, _tmp) = setup_test_store().await;

        let id = store
            .insert_fact(Category::Cat, "Cats sleep a lot.")
            .await
            .unwrap();
        assert!(id > 0);

        let err = store
            .insert_fact(Category::Cat, "Cats sleep a lot.")
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_uniqueness_is_per_category() {
        let (store, _tmp) = setup_test_store().await;

        store
            .insert_fact(Category::Cat, "They have four legs.")
            .await
            .unwrap();
        // Same text in the other category is a different fact
        store
            .insert_fact(Category::Dog, "They have four legs.")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_identifiers_are_monotonic() {
        let (store, _tmp) = setup_test_store().await;

        let a = store.insert_fact(Category::Dog, "fact a").await.unwrap();
        let b = store.insert_fact(Category::Dog, "fact b").await.unwrap();
        let c = store.insert_fact(Category::Dog, "fact c").await.unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_existing_texts() {
        let (store, _tmp) = setup_test_store().await;

        store.insert_fact(Category::Cat, "one").await.unwrap();
        store.insert_fact(Category::Cat, "two").await.unwrap();
        store.insert_fact(Category::Dog, "three").await.unwrap();

        let cats = store.existing_texts(Category::Cat).await.unwrap();
        assert_eq!(cats.len(), 2);
        assert!(cats.contains("one") && cats.contains("two"));

        let dogs = store.existing_texts(Category::Dog).await.unwrap();
        assert_eq!(dogs.len(), 1);
    }

    #[tokio::test]
    async fn test_metadata_insert_and_join() {
        let (store, _tmp) = setup_test_store().await;

        let id = store
            .insert_fact(Category::Cat, "A cat fact.")
            .await
            .unwrap();
        store
            .insert_cat_metadata(id, 11, "2026-01-01T00:00:00+00:00")
            .await
            .unwrap();

        let rows = store.cat_facts_with_metadata().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fact, "A cat fact.");
        assert_eq!(rows[0].fact_length, 11);

        // Second metadata row for the same fact is rejected
        let err = store
            .insert_cat_metadata(id, 11, "2026-01-01T00:00:00+00:00")
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.insert_fact(Category::Cat, "x").await.unwrap();
        store
            .insert_cat_metadata(id, 1, "2026-01-01T00:00:00+00:00")
            .await
            .unwrap();
        store.insert_fact(Category::Dog, "y").await.unwrap();
        store.insert_fact(Category::Dog, "z").await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.cat_facts, 1);
        assert_eq!(stats.cat_metadata, 1);
        assert_eq!(stats.dog_facts, 2);
    }
}
