//! # Earmark Curation
//!
//! Class selection over population tables and the taxonomy:
//!
//! - **Minimum support** - keep classes with enough examples per split,
//!   then intersect across splits
//! - **Ancestry filter** - drop classes that are ancestors of other kept
//!   classes, leaving only maximally-specific ones
//! - **Single-label reduction** - decide whether a multi-label clip is a
//!   single sound and which label names it
//! - **Match-ratio filter** - drop classes the retrieval step could not
//!   populate to the size of the reference split
//! - **Evaluation** - per-class and aggregate accuracy of predictions
//!   against ground truth
//!
//! Everything here is a pure function over its inputs; the ontology is the
//! only shared structure and is read-only.

mod error;
mod evaluate;
mod select;

pub use error::{CurationError, Result};
pub use evaluate::{evaluate, EvaluationReport};
pub use select::{
    filter_by_ancestry, filter_by_match_ratio, filter_by_minimum_support,
    reduce_to_single_label, usable_classes,
};
