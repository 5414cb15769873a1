use earmark_ontology::{Ontology, TaxonomyRecord};
use earmark_retrieval::{retrieve, EnglishLemmatizer, MetadataEntry, Vocabulary};

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

fn taxonomy() -> Ontology {
    Ontology::from_records(vec![
        record("/e", "Engine", &["/e/c", "/e/m"]),
        record("/e/c", "Car engine", &[]),
        record("/e/m", "Motorcycle engine", &[]),
        record("/g", "Electric guitar", &[]),
        record("/d", "Dishes, pots, and pans", &[]),
    ])
    .unwrap()
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn full_pipeline_credits_child_matches_to_the_class() {
    let ontology = taxonomy();
    let lemmatizer = EnglishLemmatizer::new();
    let vocabulary = Vocabulary::build(&labels(&["Engine"]), &ontology, &lemmatizer).unwrap();

    // Child names widen the vocabulary beyond the class's own terms
    for term in ["car", "engine", "motorcycle"] {
        assert!(
            vocabulary.terms().iter().any(|t| t == term),
            "missing term {term}"
        );
    }

    let entries = vec![entry("100", &["car", "engine", "noise"], "")];
    let results = retrieve(&entries, &vocabulary, &lemmatizer, 0.5);

    let prediction = results.get("100").expect("entry above threshold");
    assert_eq!(prediction.label, "Engine");
    assert!(prediction.score > 0.5);
}

#[test]
fn underscored_label_set_entries_resolve_to_display_names() {
    let ontology = taxonomy();
    let lemmatizer = EnglishLemmatizer::new();
    let vocabulary = Vocabulary::build(
        &labels(&["Electric_guitar", "Dishes_and_pots_and_pans"]),
        &ontology,
        &lemmatizer,
    )
    .unwrap();

    let entries = vec![
        entry("1", &["guitar", "electric"], ""),
        entry("2", &["pots", "pans"], "dishes clattering in the kitchen"),
    ];
    let results = retrieve(&entries, &vocabulary, &lemmatizer, 0.3);

    // Predictions carry the label set's original spelling
    assert_eq!(results["1"].label, "Electric_guitar");
    assert_eq!(results["2"].label, "Dishes_and_pots_and_pans");
}

#[test]
fn plural_tags_match_singular_label_terms() {
    let ontology = taxonomy();
    let lemmatizer = EnglishLemmatizer::new();
    let vocabulary = Vocabulary::build(&labels(&["Engine"]), &ontology, &lemmatizer).unwrap();

    let entries = vec![entry("5", &["engines", "cars"], "")];
    let results = retrieve(&entries, &vocabulary, &lemmatizer, 0.5);

    assert_eq!(results["5"].label, "Engine");
}

#[test]
fn description_alone_can_clear_the_threshold() {
    let ontology = taxonomy();
    let lemmatizer = EnglishLemmatizer::new();
    let vocabulary = Vocabulary::build(&labels(&["Engine"]), &ontology, &lemmatizer).unwrap();

    let entries = vec![entry("9", &["recording"], "a car engine idling")];
    let results = retrieve(&entries, &vocabulary, &lemmatizer, 0.5);

    assert_eq!(results["9"].label, "Engine");
}

#[test]
fn unrelated_and_empty_entries_are_absent() {
    let ontology = taxonomy();
    let lemmatizer = EnglishLemmatizer::new();
    let vocabulary = Vocabulary::build(&labels(&["Engine"]), &ontology, &lemmatizer).unwrap();

    let entries = vec![
        entry("10", &["rain", "thunder"], "a storm rolling in"),
        entry("11", &[], ""),
    ];
    let results = retrieve(&entries, &vocabulary, &lemmatizer, 0.0);

    // No vocabulary overlap scores exactly 0, which never clears a strict
    // threshold, even one of 0
    assert!(!results.contains_key("10"));
    assert!(!results.contains_key("11"));
}
