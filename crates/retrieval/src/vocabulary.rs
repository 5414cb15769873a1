use crate::error::{Result, RetrievalError};
use crate::normalize::{preprocess, tokenize, Lemmatizer};
use earmark_ontology::Ontology;
use ndarray::{Array1, Array2, Axis};
use std::collections::HashMap;

const NORM_EPSILON: f32 = 1e-8;

/// Translate a label-set entry to its taxonomy display form: underscores
/// become spaces and conjunction punctuation is restored ("Bell_and_chime"
/// is the class "Bell, chime" in the snapshot).
pub fn canonical_label(label: &str) -> String {
    let label = label.replace('_', " ");
    if label == "Dishes and pots and pans" {
        return "Dishes, pots, and pans".to_string();
    }
    label.replace(" and", ",")
}

/// Result of matching one query vector against the label matrix.
#[derive(Debug)]
pub struct MatchOutcome<'a> {
    /// Cosine similarity against every label row
    pub similarities: Array1<f32>,

    /// Arg-max row; ties resolve to the first row
    pub index: usize,

    /// Label credited by the winning row
    pub label: &'a str,
}

/// Fixed term space for a label set, with one binary membership vector per
/// class label and per direct child label.
///
/// Child labels widen recall without adding classes: a match on a child row
/// is credited to the parent's original label. Row order is label-set order
/// with each label's children following in declared order; a label or child
/// that reappears overwrites its existing row in place. That order is the
/// tie-break for [`Vocabulary::match_vector`].
pub struct Vocabulary {
    /// Sorted, deduplicated terms; defines vector dimensionality
    terms: Vec<String>,

    /// Term -> dimension
    term_index: HashMap<String, usize>,

    /// One binary row per (label | child label) entry
    label_vecs: Array2<f32>,

    /// Row -> original label the row votes for
    credited: Vec<String>,
}

impl Vocabulary {
    /// Build the term space for `label_set`.
    ///
    /// Every label must resolve (by canonical display form) to a class in
    /// the ontology; its terms and the terms of its direct children enter
    /// the vocabulary.
    pub fn build(
        label_set: &[String],
        ontology: &Ontology,
        lemmatizer: &dyn Lemmatizer,
    ) -> Result<Self> {
        if label_set.is_empty() {
            return Err(RetrievalError::EmptyLabelSet);
        }

        let mut all_terms: Vec<String> = Vec::new();
        // insertion-ordered rows: key -> (terms, credited label)
        let mut row_index: HashMap<String, usize> = HashMap::new();
        let mut rows: Vec<(Vec<String>, String)> = Vec::new();

        let mut upsert = |key: &str, terms: Vec<String>, credit: &str| {
            match row_index.get(key).copied() {
                Some(i) => rows[i] = (terms, credit.to_string()),
                None => {
                    row_index.insert(key.to_string(), rows.len());
                    rows.push((terms, credit.to_string()));
                }
            }
        };

        for orig_label in label_set {
            let label = canonical_label(orig_label);
            let node = ontology
                .get(&label)
                .map_err(|_| RetrievalError::UnknownLabel(orig_label.clone()))?;

            let terms = extract_label_terms(&label, lemmatizer);
            all_terms.extend(terms.iter().cloned());
            upsert(&label, terms, orig_label);

            for child_id in &node.child_ids {
                let child_label = ontology.get(child_id)?.name.clone();
                let terms = extract_label_terms(&child_label, lemmatizer);
                all_terms.extend(terms.iter().cloned());
                upsert(&child_label, terms, orig_label);
            }
        }

        all_terms.sort();
        all_terms.dedup();
        let term_index = all_terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        let mut vocabulary = Vocabulary {
            terms: all_terms,
            term_index,
            label_vecs: Array2::zeros((0, 0)),
            credited: rows.iter().map(|(_, credit)| credit.clone()).collect(),
        };
        let term_lists: Vec<Vec<String>> = rows.into_iter().map(|(terms, _)| terms).collect();
        vocabulary.label_vecs = vocabulary.vectorize_all(&term_lists);

        log::info!(
            "Built vocabulary: {} terms, {} label rows for {} classes",
            vocabulary.terms.len(),
            vocabulary.credited.len(),
            label_set.len()
        );

        Ok(vocabulary)
    }

    /// Terms of the vector space, sorted.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Vector dimensionality.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Binary membership vector: 1 where the vocabulary term occurs in
    /// `terms`. Unknown terms are ignored; repetition has no effect.
    pub fn vectorize(&self, terms: &[String]) -> Array1<f32> {
        let mut vec = Array1::zeros(self.terms.len());
        for term in terms {
            if let Some(&i) = self.term_index.get(term.as_str()) {
                vec[i] = 1.0;
            }
        }
        vec
    }

    /// Stack many term lists into a matrix, one row each, in input order.
    pub fn vectorize_all(&self, term_lists: &[Vec<String>]) -> Array2<f32> {
        let mut matrix = Array2::zeros((term_lists.len(), self.terms.len()));
        for (i, terms) in term_lists.iter().enumerate() {
            matrix.row_mut(i).assign(&self.vectorize(terms));
        }
        matrix
    }

    /// Cosine-match a query vector against every label row and pick the
    /// best one. An all-zero query scores 0 against everything (the norm
    /// epsilon keeps the division finite) and resolves to the first row.
    pub fn match_vector(&self, query: &Array1<f32>) -> MatchOutcome<'_> {
        let similarities = self.cosine_similarity(query);

        let mut index = 0;
        let mut best = f32::NEG_INFINITY;
        for (i, &sim) in similarities.iter().enumerate() {
            if sim > best {
                best = sim;
                index = i;
            }
        }

        MatchOutcome {
            similarities,
            index,
            label: &self.credited[index],
        }
    }

    fn cosine_similarity(&self, query: &Array1<f32>) -> Array1<f32> {
        let query_norm = query.dot(query).sqrt();
        let dots = self.label_vecs.dot(query);
        let norms = self
            .label_vecs
            .map_axis(Axis(1), |row| row.dot(&row).sqrt());
        let denom = norms.mapv(|norm| norm * query_norm + NORM_EPSILON);
        dots / denom
    }
}

fn extract_label_terms(label: &str, lemmatizer: &dyn Lemmatizer) -> Vec<String> {
    let tokens = tokenize(label);
    preprocess(&tokens, Some(lemmatizer))
}
