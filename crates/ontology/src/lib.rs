//! # Earmark Ontology
//!
//! Sound-event taxonomy as a directed acyclic graph.
//!
//! The taxonomy snapshot is an ordered list of JSON records
//! `{id, name, child_ids}` in the AudioSet ontology format. Loading builds
//! an immutable graph that answers the queries the curation pipeline needs:
//!
//! - **Lookup** - resolve a class by opaque id (`/m/...`) or display name
//! - **Ancestry** - `is_ancestor` / `is_descendant` between classes
//! - **Lineage** - every root-to-node path through the DAG
//!
//! ## Architecture
//!
//! ```text
//! TaxonomyRecord[]
//!     │
//!     ├──> Loader (iterative three-color DFS)
//!     │      ├─ Link parents/children in declared order
//!     │      ├─ Assign levels (1 + max parent level)
//!     │      └─ Reject cycles and dangling child ids
//!     │
//!     └──> Ontology (petgraph arena)
//!            ├─ Nodes: sound-event classes
//!            ├─ Indexes: by id and by display name
//!            └─ Lineage cache (filled lazily, never invalidated)
//! ```

mod error;
mod graph;
mod loader;
mod types;

pub use error::{OntologyError, Result};
pub use types::{Ontology, OntologyNode, TaxonomyRecord};
