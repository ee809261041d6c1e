//! Bar chart rendering for top word frequencies

use crate::error::{Error, Result};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Select the `top` most frequent words, ordered by count descending then
/// word ascending.
pub fn top_words(freq: &HashMap<String, usize>, top: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> =
        freq.iter().map(|(w, c)| (w.clone(), *c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(top);
    entries
}

/// Render a bar chart of the `top` most frequent words to a PNG file.
pub fn render_top_words(
    freq: &HashMap<String, usize>,
    title: &str,
    path: &Path,
    top: usize,
) -> Result<()> {
    let words = top_words(freq, top);
    if words.is_empty() {
        warn!("No words to chart for '{}', skipping {:?}", title, path);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_count = words.iter().map(|(_, c)| *c).max().unwrap_or(1) as i32;
    let bar_count = words.len() as i32;

    let root = BitMapBackend::new(path, (1024, 640)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::Chart(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(110)
        .y_label_area_size(50)
        .build_cartesian_2d(0..bar_count, 0..max_count + max_count / 10 + 1)
        .map_err(|e| Error::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(words.len())
        .x_label_formatter(&|idx| {
            words
                .get(*idx as usize)
                .map(|(w, _)| w.clone())
                .unwrap_or_default()
        })
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .y_desc("occurrences")
        .draw()
        .map_err(|e| Error::Chart(e.to_string()))?;

    chart
        .draw_series(words.iter().enumerate().map(|(i, (_, count))| {
            Rectangle::new(
                [(i as i32, 0), (i as i32 + 1, *count as i32)],
                BLUE.mix(0.6).filled(),
            )
        }))
        .map_err(|e| Error::Chart(e.to_string()))?;

    root.present().map_err(|e| Error::Chart(e.to_string()))?;
    info!("Wrote chart {:?}", path);

    Ok(())
}
