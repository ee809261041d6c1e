//! Report command implementation
//!
//! Reads all stored facts, computes word frequencies per category and
//! combined, writes the CSV report and three top-N bar charts, and computes
//! the average cat-fact length from the metadata join.

use crate::config::Config;
use crate::error::Result;
use crate::report::{
    average_fact_length, combine_frequencies, render_top_words, word_frequencies,
    write_frequency_csv,
};
use crate::store::{Category, FactStore};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Statistics from a report run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStats {
    pub cat_facts: usize,
    pub dog_facts: usize,
    pub distinct_words: usize,
    pub average_cat_fact_length: f64,
    pub csv_path: String,
    pub chart_paths: Vec<String>,
}

/// Run the full report flow
pub async fn cmd_report(config: &Config, store: &FactStore) -> Result<ReportStats> {
    let cat_facts = store.all_facts(Category::Cat).await?;
    let dog_facts = store.all_facts(Category::Dog).await?;
    info!(
        "Reporting over {} cat facts and {} dog facts",
        cat_facts.len(),
        dog_facts.len()
    );

    let freq_cat = word_frequencies(cat_facts.iter().map(|s| s.as_str()));
    let freq_dog = word_frequencies(dog_facts.iter().map(|s| s.as_str()));
    let combined = combine_frequencies(&freq_cat, &freq_dog);

    let csv_path = config.csv_path();
    write_frequency_csv(&csv_path, &freq_cat, &freq_dog)?;

    let top = config.report.top_words;
    let chart_dir = config.chart_dir();
    let charts = [
        ("Top cat fact words", &freq_cat, chart_dir.join("cat_words.png")),
        ("Top dog fact words", &freq_dog, chart_dir.join("dog_words.png")),
        (
            "Top combined words",
            &combined,
            chart_dir.join("combined_words.png"),
        ),
    ];
    let mut chart_paths = Vec::with_capacity(charts.len());
    for (title, freq, path) in &charts {
        render_top_words(freq, title, path, top)?;
        chart_paths.push(path.display().to_string());
    }

    let joined = store.cat_facts_with_metadata().await?;

    Ok(ReportStats {
        cat_facts: cat_facts.len(),
        dog_facts: dog_facts.len(),
        distinct_words: combined.len(),
        average_cat_fact_length: average_fact_length(&joined),
        csv_path: csv_path.display().to_string(),
        chart_paths,
    })
}

/// Print report statistics to console
pub fn print_report_stats(stats: &ReportStats) {
    println!("\n✓ Report complete");
    println!("  Cat facts: {}", stats.cat_facts);
    println!("  Dog facts: {}", stats.dog_facts);
    println!("  Distinct words: {}", stats.distinct_words);
    println!(
        "  Average cat fact length: {:.1} characters",
        stats.average_cat_fact_length
    );
    println!("  CSV: {}", stats.csv_path);
    for path in &stats.chart_paths {
        println!("  Chart: {}", path);
    }
}
