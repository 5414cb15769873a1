use crate::input;
use crate::RetrieveArgs;
use anyhow::Result;
use earmark_retrieval::{retrieve, EnglishLemmatizer, Prediction, Vocabulary};
use indicatif::ProgressBar;
use std::collections::BTreeMap;

/// Entries scanned between progress ticks.
const CHUNK_SIZE: usize = 256;

pub(crate) fn run(args: &RetrieveArgs) -> Result<()> {
    let ontology = input::load_ontology(&args.ontology)?;
    let label_set = input::load_label_set(&args.labels)?;
    let entries = input::load_entries(&args.entries)?;

    let lemmatizer = EnglishLemmatizer::new();
    let vocabulary = Vocabulary::build(&label_set, &ontology, &lemmatizer)?;

    let bar = ProgressBar::new(entries.len() as u64);
    let mut results: BTreeMap<String, Prediction> = BTreeMap::new();
    for chunk in entries.chunks(CHUNK_SIZE) {
        results.extend(retrieve(chunk, &vocabulary, &lemmatizer, args.threshold));
        bar.inc(chunk.len() as u64);
    }
    bar.finish_and_clear();

    input::write_json(&args.output, &results)?;
    println!(
        "Matched {} of {} entries; predictions written to {}",
        results.len(),
        entries.len(),
        args.output.display()
    );
    Ok(())
}
