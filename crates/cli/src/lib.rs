use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use earmark_retrieval::DEFAULT_THRESHOLD;
use std::path::PathBuf;

mod command;
mod input;

#[derive(Parser)]
#[command(name = "earmark")]
#[command(about = "Curate weakly-labeled audio datasets against a sound-event taxonomy")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match crawled clip metadata against a taxonomy label set
    Retrieve(RetrieveArgs),

    /// Select usable training classes from per-split population tables
    SelectClasses(SelectClassesArgs),

    /// Score predictions against ground-truth labels
    Evaluate(EvaluateArgs),

    /// Print every root-to-class path for a taxonomy class
    Lineage(LineageArgs),
}

#[derive(Args)]
pub(crate) struct RetrieveArgs {
    /// Taxonomy snapshot (JSON array of {id, name, child_ids})
    #[arg(long)]
    pub(crate) ontology: PathBuf,

    /// Label set, one class name per line
    #[arg(long)]
    pub(crate) labels: PathBuf,

    /// Clip metadata entries (JSON array of {id, tags, description})
    #[arg(long)]
    pub(crate) entries: PathBuf,

    /// Where to write predictions (JSON object keyed by entry id)
    #[arg(long)]
    pub(crate) output: PathBuf,

    /// Similarity a best match must strictly exceed to be kept
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub(crate) threshold: f32,
}

#[derive(Args)]
pub(crate) struct SelectClassesArgs {
    /// Taxonomy snapshot (JSON)
    #[arg(long)]
    pub(crate) ontology: PathBuf,

    /// Population table per split (JSON object label -> count); repeatable
    #[arg(long = "counts", required = true)]
    pub(crate) counts: Vec<PathBuf>,

    /// Minimum support per split, one value per --counts, in the same order
    #[arg(long = "min-support", required = true)]
    pub(crate) min_support: Vec<usize>,

    /// Where to write the class list (one per line); stdout when omitted
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct EvaluateArgs {
    /// Predictions as written by `earmark retrieve`
    #[arg(long)]
    pub(crate) predictions: PathBuf,

    /// Ground-truth labels (JSON object entry id -> label)
    #[arg(long = "ground-truth")]
    pub(crate) ground_truth: PathBuf,

    /// Optionally write the report as JSON as well
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct LineageArgs {
    /// Taxonomy snapshot (JSON)
    #[arg(long)]
    pub(crate) ontology: PathBuf,

    /// Class to inspect, by display name or by id
    pub(crate) class: String,
}

pub fn main_entry() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Retrieve(args) => command::retrieve::run(args),
        Commands::SelectClasses(args) => command::select_classes::run(args),
        Commands::Evaluate(args) => command::evaluate::run(args),
        Commands::Lineage(args) => command::lineage::run(args),
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
}
