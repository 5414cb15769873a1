use crate::error::Result;
use earmark_ontology::Ontology;
use std::collections::{BTreeSet, HashMap};

/// Keep only classes with at least `n` examples.
pub fn filter_by_minimum_support(counts: &HashMap<String, usize>, n: usize) -> BTreeSet<String> {
    counts
        .iter()
        .filter(|&(_, &count)| count >= n)
        .map(|(label, _)| label.clone())
        .collect()
}

/// Classes clearing their per-split minimum support in every split.
///
/// Each element of `splits` pairs a population table with that split's
/// threshold; a class must survive all of them to be usable at all.
pub fn usable_classes(splits: &[(&HashMap<String, usize>, usize)]) -> BTreeSet<String> {
    let mut survivors: Option<BTreeSet<String>> = None;
    for &(counts, n) in splits {
        let kept = filter_by_minimum_support(counts, n);
        survivors = Some(match survivors {
            Some(current) => current.intersection(&kept).cloned().collect(),
            None => kept,
        });
    }

    let survivors = survivors.unwrap_or_default();
    log::info!(
        "Minimum support kept {} classes across {} splits",
        survivors.len(),
        splits.len()
    );
    survivors
}

/// Drop every candidate that is an ancestor of another candidate, keeping
/// only maximally-specific classes.
///
/// Ancestry uses the taxonomy's first-parent walk, and each candidate is
/// checked against the full input set, not against earlier survivors.
/// Quadratic in the candidate count, which is small next to the taxonomy.
pub fn filter_by_ancestry(
    labels: &BTreeSet<String>,
    ontology: &Ontology,
) -> Result<BTreeSet<String>> {
    let mut kept = BTreeSet::new();
    for label in labels {
        let mut is_ancestor = false;
        for other in labels {
            if ontology.is_ancestor(label, other)? {
                is_ancestor = true;
                break;
            }
        }
        if !is_ancestor {
            kept.insert(label.clone());
        }
    }

    log::info!(
        "Ancestry filter kept {} of {} candidate classes",
        kept.len(),
        labels.len()
    );
    Ok(kept)
}

/// Decide whether a clip's label list names a single sound.
///
/// The first label is assumed to be the most specific one. If every later
/// label is an ancestor of the first, the clip is a single sound and the
/// first label names it; any unrelated label means the clip contains more
/// than one sound and `None` is returned. An empty list is no sound at all.
pub fn reduce_to_single_label<'a>(
    labels: &'a [String],
    ontology: &Ontology,
) -> Result<Option<&'a str>> {
    let Some((first, rest)) = labels.split_first() else {
        return Ok(None);
    };

    for label in rest {
        if !ontology.is_ancestor(label, first)? {
            return Ok(None);
        }
    }
    Ok(Some(first))
}

/// Keep classes whose retrieval matches reach the reference population
/// with `margin` examples of headroom.
///
/// A class missing from either table is dropped.
pub fn filter_by_match_ratio(
    matched: &HashMap<String, usize>,
    reference: &HashMap<String, usize>,
    margin: usize,
) -> BTreeSet<String> {
    matched
        .iter()
        .filter(|&(label, &count)| {
            reference
                .get(label.as_str())
                .is_some_and(|&target| count >= target + margin)
        })
        .map(|(label, _)| label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use earmark_ontology::TaxonomyRecord;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs
            .iter()
            .map(|&(label, count)| (label.to_string(), count))
            .collect()
    }

    fn labels(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn record(id: &str, name: &str, child_ids: &[&str]) -> TaxonomyRecord {
        TaxonomyRecord {
            id: id.to_string(),
            name: name.to_string(),
            child_ids: child_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn vehicle_taxonomy() -> Ontology {
        Ontology::from_records(vec![
            record("/v", "Vehicle", &["/v/e"]),
            record("/v/e", "Engine", &["/v/e/c", "/v/e/m"]),
            record("/v/e/c", "Car engine", &[]),
            record("/v/e/m", "Motorcycle engine", &[]),
            record("/b", "Bird", &[]),
        ])
        .unwrap()
    }

    #[test]
    fn minimum_support_keeps_populated_classes() {
        let kept = filter_by_minimum_support(&counts(&[("A", 50), ("B", 9)]), 10);
        assert_eq!(kept, labels(&["A"]));
    }

    #[test]
    fn minimum_support_is_inclusive() {
        let kept = filter_by_minimum_support(&counts(&[("A", 10)]), 10);
        assert_eq!(kept, labels(&["A"]));
    }

    #[test]
    fn usable_classes_intersects_splits() {
        let train = counts(&[("A", 60), ("B", 55), ("C", 80)]);
        let val = counts(&[("A", 12), ("B", 4), ("C", 15)]);
        let test = counts(&[("A", 25), ("C", 19)]);

        let kept = usable_classes(&[(&train, 50), (&val, 10), (&test, 20)]);
        assert_eq!(kept, labels(&["A"]));
    }

    #[test]
    fn usable_classes_with_no_splits_is_empty() {
        assert!(usable_classes(&[]).is_empty());
    }

    #[test]
    fn ancestry_filter_drops_ancestors_of_candidates() {
        let ontology = vehicle_taxonomy();
        let candidates = labels(&["Vehicle", "Engine", "Car engine", "Bird"]);

        let kept = filter_by_ancestry(&candidates, &ontology).unwrap();
        assert_eq!(kept, labels(&["Car engine", "Bird"]));
    }

    #[test]
    fn ancestry_filter_keeps_unrelated_classes() {
        let ontology = vehicle_taxonomy();
        let candidates = labels(&["Car engine", "Motorcycle engine", "Bird"]);

        let kept = filter_by_ancestry(&candidates, &ontology).unwrap();
        assert_eq!(kept, candidates);
    }

    #[test]
    fn ancestry_filter_output_has_no_related_pair() {
        let ontology = vehicle_taxonomy();
        let candidates = labels(&["Vehicle", "Engine", "Car engine", "Motorcycle engine"]);

        let kept = filter_by_ancestry(&candidates, &ontology).unwrap();
        for a in &kept {
            for b in &kept {
                assert!(!ontology.is_ancestor(a, b).unwrap());
            }
        }
    }

    #[test]
    fn ancestry_filter_unknown_label_fails() {
        let ontology = vehicle_taxonomy();
        let candidates = labels(&["Car engine", "Spaceship"]);
        assert!(filter_by_ancestry(&candidates, &ontology).is_err());
    }

    #[test]
    fn single_sound_clip_reduces_to_its_first_label() {
        let ontology = vehicle_taxonomy();
        let clip = vec![
            "Car engine".to_string(),
            "Engine".to_string(),
            "Vehicle".to_string(),
        ];

        let label = reduce_to_single_label(&clip, &ontology).unwrap();
        assert_eq!(label, Some("Car engine"));
    }

    #[test]
    fn clip_with_unrelated_labels_is_not_reduced() {
        let ontology = vehicle_taxonomy();
        let clip = vec!["Car engine".to_string(), "Bird".to_string()];

        let label = reduce_to_single_label(&clip, &ontology).unwrap();
        assert_eq!(label, None);
    }

    #[test]
    fn single_label_clip_is_already_reduced() {
        let ontology = vehicle_taxonomy();
        let clip = vec!["Bird".to_string()];

        let label = reduce_to_single_label(&clip, &ontology).unwrap();
        assert_eq!(label, Some("Bird"));
    }

    #[test]
    fn empty_label_list_reduces_to_nothing() {
        let ontology = vehicle_taxonomy();
        assert_eq!(reduce_to_single_label(&[], &ontology).unwrap(), None);
    }

    #[test]
    fn match_ratio_requires_headroom_over_the_reference() {
        let matched = counts(&[("A", 53), ("B", 52), ("C", 40)]);
        let reference = counts(&[("A", 50), ("B", 50), ("C", 50)]);

        let kept = filter_by_match_ratio(&matched, &reference, 3);
        assert_eq!(kept, labels(&["A"]));
    }

    #[test]
    fn match_ratio_drops_classes_missing_from_either_table() {
        let matched = counts(&[("A", 100)]);
        let reference = counts(&[("B", 10)]);

        assert!(filter_by_match_ratio(&matched, &reference, 3).is_empty());
    }

    proptest! {
        /// Raising the threshold never grows the kept set.
        #[test]
        fn proptest_minimum_support_is_monotonic(
            table in prop::collection::hash_map("[a-z]{1,6}", 0usize..100, 0..12),
            low in 0usize..50,
            delta in 0usize..50,
        ) {
            let loose = filter_by_minimum_support(&table, low);
            let strict = filter_by_minimum_support(&table, low + delta);
            prop_assert!(strict.is_subset(&loose));
        }
    }
}
