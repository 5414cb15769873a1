use crate::input;
use crate::LineageArgs;
use anyhow::Result;

pub(crate) fn run(args: &LineageArgs) -> Result<()> {
    let ontology = input::load_ontology(&args.ontology)?;
    for path in ontology.lineage_names(&args.class)? {
        println!("{path}");
    }
    Ok(())
}
