use serde::Serialize;
use std::collections::BTreeMap;

/// Accuracy of predictions against ground truth.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Accuracy per ground-truth class, over clips that received a prediction
    pub per_class: BTreeMap<String, f64>,

    /// Mean of the per-class accuracies
    pub macro_average: f64,

    /// Overall accuracy
    pub micro_average: f64,

    /// Number of clips evaluated
    pub evaluated: usize,
}

/// Score predicted labels against ground-truth labels.
///
/// Only clips present in both tables count; a clip the retrieval step
/// skipped is not an error, it simply does not contribute. With no
/// overlapping clips the averages are 0.
pub fn evaluate(
    predictions: &BTreeMap<String, String>,
    ground_truth: &BTreeMap<String, String>,
) -> EvaluationReport {
    let mut correct_by_class: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    let mut correct = 0usize;
    let mut evaluated = 0usize;

    for (clip_id, truth) in ground_truth {
        let Some(prediction) = predictions.get(clip_id) else {
            continue;
        };
        evaluated += 1;
        let hit = prediction == truth;
        if hit {
            correct += 1;
        }
        let entry = correct_by_class.entry(truth.as_str()).or_insert((0, 0));
        entry.0 += usize::from(hit);
        entry.1 += 1;
    }

    let per_class: BTreeMap<String, f64> = correct_by_class
        .iter()
        .map(|(label, &(hits, total))| (label.to_string(), hits as f64 / total as f64))
        .collect();

    let macro_average = if per_class.is_empty() {
        0.0
    } else {
        per_class.values().sum::<f64>() / per_class.len() as f64
    };
    let micro_average = if evaluated == 0 {
        0.0
    } else {
        correct as f64 / evaluated as f64
    };

    EvaluationReport {
        per_class,
        macro_average,
        micro_average,
        evaluated,
    }
}
