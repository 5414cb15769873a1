use crate::input;
use crate::SelectClassesArgs;
use anyhow::{bail, Result};
use earmark_curation::{filter_by_ancestry, usable_classes};
use std::collections::HashMap;
use std::fs;

pub(crate) fn run(args: &SelectClassesArgs) -> Result<()> {
    if args.counts.len() != args.min_support.len() {
        bail!(
            "{} population tables given but {} --min-support values",
            args.counts.len(),
            args.min_support.len()
        );
    }

    let ontology = input::load_ontology(&args.ontology)?;
    let tables: Vec<HashMap<String, usize>> = args
        .counts
        .iter()
        .map(|path| input::load_counts(path))
        .collect::<Result<_>>()?;

    let splits: Vec<(&HashMap<String, usize>, usize)> = tables
        .iter()
        .zip(args.min_support.iter().copied())
        .collect();
    let candidates = usable_classes(&splits);
    let kept = filter_by_ancestry(&candidates, &ontology)?;

    let mut listing = kept.iter().cloned().collect::<Vec<_>>().join("\n");
    listing.push('\n');
    match &args.output {
        Some(path) => {
            fs::write(path, listing)?;
            println!("Selected {} classes; written to {}", kept.len(), path.display());
        }
        None => print!("{listing}"),
    }
    Ok(())
}
