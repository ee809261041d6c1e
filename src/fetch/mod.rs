//! Duplicate-avoiding fetch loop
//!
//! A provider is an unreliable source: one call yields zero or more candidate
//! facts, or a transport error. [`collect_unique`] keeps calling until it has
//! `n` texts that are new against both the store's contents and the in-flight
//! batch, or until the attempt budget is spent. Transport errors and
//! duplicates consume budget; they never abort the run.

mod providers;

pub use providers::*;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, warn};

/// One call against an external fact source.
///
/// A single call may yield several candidates (batched endpoints) or exactly
/// one; either way it counts as one attempt.
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn fetch(&self) -> Result<Vec<String>>;
}

/// Result of a fetch loop run
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Unique texts collected, at most `requested`
    pub facts: Vec<String>,
    /// Provider calls made
    pub attempts: u32,
    /// Texts asked for
    pub requested: usize,
}

impl FetchOutcome {
    /// True if the attempt budget ran out before `requested` texts were found
    pub fn shortfall(&self) -> bool {
        self.facts.len() < self.requested
    }
}

/// Collect up to `n` texts distinct from `known` and from each other.
///
/// `known` is read once by the caller and not refreshed during the loop;
/// the store's unique constraint remains the backstop at write time.
pub async fn collect_unique(
    provider: &dyn FactProvider,
    n: usize,
    known: &HashSet<String>,
    max_attempts: u32,
) -> FetchOutcome {
    let mut facts: Vec<String> = Vec::with_capacity(n);
    let mut seen: HashSet<String> = HashSet::with_capacity(n);
    let mut attempts: u32 = 0;

    while facts.len() < n && attempts < max_attempts {
        attempts += 1;

        let batch = match provider.fetch().await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("Fetch attempt {} failed: {}", attempts, e);
                continue;
            }
        };

        for candidate in batch {
            if facts.len() == n {
                break;
            }
            if candidate.is_empty() || known.contains(&candidate) || seen.contains(&candidate) {
                debug!("Skipping duplicate or empty candidate");
                continue;
            }
            seen.insert(candidate.clone());
            facts.push(candidate);
        }
    }

    if facts.len() < n {
        warn!(
            "Only obtained {} of {} unique facts after {} attempts",
            facts.len(),
            n,
            attempts
        );
    }

    FetchOutcome {
        facts,
        attempts,
        requested: n,
    }
}
