//! Word-frequency reporting over the stored facts
//!
//! Reads nothing itself; callers hand in fact texts and the cat metadata
//! join, this module tokenizes, tallies, and writes the CSV and chart
//! artifacts.

mod chart;
mod tokenize;

pub use chart::*;
pub use tokenize::*;

use crate::error::Result;
use crate::store::CatFactDetail;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Tally word frequencies across a set of texts.
pub fn word_frequencies<'a, I>(texts: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut freq = HashMap::new();
    for text in texts {
        for word in tokenize(text) {
            *freq.entry(word).or_insert(0) += 1;
        }
    }
    freq
}

/// Merge two frequency maps.
pub fn combine_frequencies(
    a: &HashMap<String, usize>,
    b: &HashMap<String, usize>,
) -> HashMap<String, usize> {
    let mut combined = a.clone();
    for (word, count) in b {
        *combined.entry(word.clone()).or_insert(0) += count;
    }
    combined
}

/// Write the frequency report CSV with columns
/// `word, freq_cat, freq_dog, freq_combined`.
///
/// Rows are ordered by combined count descending, then word ascending, so
/// output is deterministic. Returns the number of data rows written.
pub fn write_frequency_csv(
    path: &Path,
    freq_cat: &HashMap<String, usize>,
    freq_dog: &HashMap<String, usize>,
) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let combined = combine_frequencies(freq_cat, freq_dog);
    let mut rows: Vec<(&String, &usize)> = combined.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["word", "freq_cat", "freq_dog", "freq_combined"])?;
    for (word, total) in &rows {
        writer.write_record(&[
            (*word).clone(),
            freq_cat.get(*word).copied().unwrap_or(0).to_string(),
            freq_dog.get(*word).copied().unwrap_or(0).to_string(),
            total.to_string(),
        ])?;
    }
    writer.flush()?;

    info!("Wrote {} word frequency rows to {:?}", rows.len(), path);
    Ok(rows.len())
}

/// Mean fact length over the cat facts + metadata join; 0.0 when empty.
pub fn average_fact_length(rows: &[CatFactDetail]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let total: i64 = rows.iter().map(|r| r.fact_length).sum();
    total as f64 / rows.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn frequencies_count_across_texts() {
        let freq = word_frequencies(["cats sleep often", "cats purr"]);
        assert_eq!(freq.get("cats"), Some(&2));
        assert_eq!(freq.get("sleep"), Some(&1));
        assert_eq!(freq.get("purr"), Some(&1));
    }

    #[test]
    fn combine_sums_overlapping_words() {
        let a = word_frequencies(["dog dog park"]);
        let b = word_frequencies(["dog bone"]);
        let combined = combine_frequencies(&a, &b);
        assert_eq!(combined.get("dog"), Some(&3));
        assert_eq!(combined.get("park"), Some(&1));
        assert_eq!(combined.get("bone"), Some(&1));
    }

    #[test]
    fn csv_contains_all_words_with_per_category_counts() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("freq.csv");

        let cat = word_frequencies(["whiskers whiskers tail"]);
        let dog = word_frequencies(["tail bone"]);
        let rows = write_frequency_csv(&path, &cat, &dog).unwrap();
        assert_eq!(rows, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "word,freq_cat,freq_dog,freq_combined");
        // "tail" and "whiskers" both total 2; alphabetical tie-break
        assert_eq!(lines[1], "tail,1,1,2");
        assert_eq!(lines[2], "whiskers,2,0,2");
        assert_eq!(lines[3], "bone,0,1,1");
    }

    #[test]
    fn average_length_of_empty_join_is_zero() {
        assert_eq!(average_fact_length(&[]), 0.0);
    }

    #[test]
    fn average_length_is_the_mean() {
        let rows = vec![
            CatFactDetail {
                fact: "ab".to_string(),
                fact_length: 2,
                insertion_time: "2026-01-01T00:00:00+00:00".to_string(),
            },
            CatFactDetail {
                fact: "abcd".to_string(),
                fact_length: 4,
                insertion_time: "2026-01-01T00:00:00+00:00".to_string(),
            },
        ];
        assert_eq!(average_fact_length(&rows), 3.0);
    }
}
