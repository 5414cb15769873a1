use crate::normalize::{preprocess, tokenize, Lemmatizer};
use crate::vocabulary::Vocabulary;
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum similarity a best match must strictly exceed to be kept.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Free-text metadata of one crawled audio clip.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataEntry {
    /// Clip identifier
    pub id: String,

    /// User-supplied tags, one word or phrase each
    #[serde(default)]
    pub tags: Vec<String>,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Clip duration in seconds, when the crawler recorded one
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Predicted class for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// Match every entry against the vocabulary and keep the confident ones.
///
/// Tags and description are normalized and vectorized independently, then
/// summed: a term occurring in both reinforces the signal. Entries whose
/// best similarity does not exceed `threshold` are absent from the result;
/// an entry with no usable text vectorizes to zero and is always absent.
///
/// Entries are independent, so the scan fans out across the rayon pool;
/// results are collected into a BTreeMap so output order does not depend
/// on scheduling.
pub fn retrieve(
    entries: &[MetadataEntry],
    vocabulary: &Vocabulary,
    lemmatizer: &dyn Lemmatizer,
    threshold: f32,
) -> BTreeMap<String, Prediction> {
    let results: BTreeMap<String, Prediction> = entries
        .par_iter()
        .filter_map(|entry| {
            retrieve_one(entry, vocabulary, lemmatizer, threshold)
                .map(|prediction| (entry.id.clone(), prediction))
        })
        .collect();

    log::info!(
        "Retrieval matched {} of {} entries (threshold {})",
        results.len(),
        entries.len(),
        threshold
    );

    results
}

fn retrieve_one(
    entry: &MetadataEntry,
    vocabulary: &Vocabulary,
    lemmatizer: &dyn Lemmatizer,
    threshold: f32,
) -> Option<Prediction> {
    // Tags arrive pre-tokenized; the description is raw text
    let tag_terms = preprocess(&entry.tags, Some(lemmatizer));
    let desc_tokens = tokenize(&entry.description);
    let desc_terms = preprocess(&desc_tokens, Some(lemmatizer));

    let mut query: Array1<f32> = Array1::zeros(vocabulary.len());
    if !tag_terms.is_empty() {
        query += &vocabulary.vectorize(&tag_terms);
    }
    if !desc_terms.is_empty() {
        query += &vocabulary.vectorize(&desc_terms);
    }

    let outcome = vocabulary.match_vector(&query);
    let score = outcome.similarities[outcome.index];
    if score > threshold {
        Some(Prediction {
            label: outcome.label.to_string(),
            score,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemma::EnglishLemmatizer;
    use earmark_ontology::{Ontology, TaxonomyRecord};
    use pretty_assertions::assert_eq;

    fn record(id: &str, name: &str, child_ids: &[&str]) -> TaxonomyRecord {
        TaxonomyRecord {
            id: id.to_string(),
            name: name.to_string(),
            child_ids: child_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn entry(id: &str, tags: &[&str], description: &str) -> MetadataEntry {
        MetadataEntry {
            id: id.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            description: description.to_string(),
            duration: None,
        }
    }

    fn engine_vocabulary() -> Vocabulary {
        let ontology = Ontology::from_records(vec![
            record("/e", "Engine", &["/e/c", "/e/m"]),
            record("/e/c", "Car engine", &[]),
            record("/e/m", "Motorcycle engine", &[]),
        ])
        .unwrap();
        Vocabulary::build(&["Engine".to_string()], &ontology, &EnglishLemmatizer).unwrap()
    }

    #[test]
    fn tags_matching_a_child_credit_the_parent_class() {
        let vocab = engine_vocabulary();
        let entries = vec![entry("100", &["car", "engine", "noise"], "")];

        let results = retrieve(&entries, &vocab, &EnglishLemmatizer, DEFAULT_THRESHOLD);

        let prediction = &results["100"];
        assert_eq!(prediction.label, "Engine");
        assert!(prediction.score > 0.0);
    }

    #[test]
    fn description_terms_reinforce_tag_terms() {
        let vocab = engine_vocabulary();
        let tagged_only = vec![entry("1", &["engine"], "")];
        let reinforced = vec![entry("1", &["engine"], "an old engine idling")];

        let weak = retrieve(&tagged_only, &vocab, &EnglishLemmatizer, 0.0);
        let strong = retrieve(&reinforced, &vocab, &EnglishLemmatizer, 0.0);

        assert!(strong["1"].score >= weak["1"].score);
    }

    #[test]
    fn below_threshold_entries_are_absent() {
        let vocab = engine_vocabulary();
        let entries = vec![entry("7", &["birdsong", "forest", "morning"], "")];

        let results = retrieve(&entries, &vocab, &EnglishLemmatizer, DEFAULT_THRESHOLD);
        assert!(results.is_empty());
    }

    #[test]
    fn empty_entries_are_absent_at_any_threshold() {
        let vocab = engine_vocabulary();
        let entries = vec![entry("42", &[], "")];

        for threshold in [0.0, 0.25, DEFAULT_THRESHOLD, 0.9] {
            let results = retrieve(&entries, &vocab, &EnglishLemmatizer, threshold);
            assert!(results.is_empty(), "threshold {threshold}");
        }
    }

    #[test]
    fn result_keys_are_entry_ids() {
        let vocab = engine_vocabulary();
        let entries = vec![
            entry("a", &["car", "engine"], ""),
            entry("b", &["motorcycle", "engine"], ""),
            entry("c", &[], ""),
        ];

        let results = retrieve(&entries, &vocab, &EnglishLemmatizer, 0.1);
        let ids: Vec<&str> = results.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
