use anyhow::{Context, Result};
use earmark_ontology::Ontology;
use earmark_retrieval::MetadataEntry;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// Usable clip duration window, matching the crawler's download limits
const MIN_DURATION_SECS: f64 = 0.3;
const MAX_DURATION_SECS: f64 = 30.0;

pub(crate) fn load_ontology(path: &Path) -> Result<Ontology> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading taxonomy snapshot {}", path.display()))?;
    Ontology::from_json_str(&json)
        .with_context(|| format!("loading taxonomy snapshot {}", path.display()))
}

pub(crate) fn load_label_set(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading label set {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Load metadata entries and apply the crawler hygiene rules: an entry must
/// carry at least one tag, and a recorded duration must fall inside the
/// usable window.
pub(crate) fn load_entries(path: &Path) -> Result<Vec<MetadataEntry>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading metadata entries {}", path.display()))?;
    let mut entries: Vec<MetadataEntry> = serde_json::from_str(&json)
        .with_context(|| format!("parsing metadata entries {}", path.display()))?;

    let before = entries.len();
    entries.retain(|entry| {
        !entry.tags.is_empty()
            && entry
                .duration
                .map_or(true, |d| (MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&d))
    });
    log::info!("Kept {} of {before} entries after metadata hygiene", entries.len());

    Ok(entries)
}

pub(crate) fn load_counts(path: &Path) -> Result<HashMap<String, usize>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading population table {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing population table {}", path.display()))
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
