use crate::error::{OntologyError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// One record of the taxonomy snapshot (AudioSet ontology format).
///
/// Snapshot fields beyond these three (descriptions, example URLs,
/// restrictions) are ignored on load.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyRecord {
    /// Stable identifier, e.g. "/m/0284vy3"
    pub id: String,

    /// Display name, e.g. "Train horn"
    pub name: String,

    /// Identifiers of direct children, in declared order
    #[serde(default)]
    pub child_ids: Vec<String>,
}

/// A single sound-event class in the loaded taxonomy.
#[derive(Debug, Clone)]
pub struct OntologyNode {
    /// Stable identifier, e.g. "/m/0284vy3"
    pub id: String,

    /// Display name, e.g. "Train horn"
    pub name: String,

    /// Identifiers of direct children, in declared order
    pub child_ids: Vec<String>,

    /// Distance from a root: 0 for roots, otherwise 1 + max parent level
    pub level: usize,

    /// Direct parents in link order; the first entry is the parent the
    /// legacy ancestry check follows
    pub(crate) parents: Vec<NodeIndex>,

    /// Direct children in declared order
    pub(crate) children: Vec<NodeIndex>,
}

/// Sound-event taxonomy DAG.
///
/// Immutable once loaded; all queries take `&self` and the lineage cache is
/// internally synchronized, so a single instance can be shared across
/// worker threads.
pub struct Ontology {
    /// Node arena; edges run parent -> child
    pub(crate) graph: DiGraph<OntologyNode, ()>,

    /// Id -> node index
    pub(crate) id_index: HashMap<String, NodeIndex>,

    /// Display name -> node index (names are unique within a snapshot)
    pub(crate) name_index: HashMap<String, NodeIndex>,

    /// Memoized root-to-node paths, filled on first use
    pub(crate) lineage_cache: RwLock<HashMap<NodeIndex, Arc<Vec<Vec<NodeIndex>>>>>,
}

impl Ontology {
    /// Resolve a class by key: ids start with '/', anything else is treated
    /// as a display name.
    pub fn get(&self, key: &str) -> Result<&OntologyNode> {
        self.index_of(key).map(|idx| &self.graph[idx])
    }

    pub(crate) fn index_of(&self, key: &str) -> Result<NodeIndex> {
        let index = if key.starts_with('/') {
            self.id_index.get(key)
        } else {
            self.name_index.get(key)
        };
        index
            .copied()
            .ok_or_else(|| OntologyError::NotFound(key.to_string()))
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &OntologyNode {
        &self.graph[idx]
    }

    /// Direct parents of a class, in link order.
    pub fn parents(&self, key: &str) -> Result<Vec<&OntologyNode>> {
        let idx = self.index_of(key)?;
        Ok(self.graph[idx]
            .parents
            .iter()
            .map(|&p| &self.graph[p])
            .collect())
    }

    /// Direct children of a class, in declared order.
    pub fn children(&self, key: &str) -> Result<Vec<&OntologyNode>> {
        let idx = self.index_of(key)?;
        Ok(self.graph[idx]
            .children
            .iter()
            .map(|&c| &self.graph[c])
            .collect())
    }

    /// Iterate over all classes.
    pub fn nodes(&self) -> impl Iterator<Item = &OntologyNode> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Number of classes in the taxonomy.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl std::fmt::Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ontology")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .finish()
    }
}
