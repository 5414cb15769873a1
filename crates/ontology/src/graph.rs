use crate::error::Result;
use crate::types::{Ontology, OntologyNode};
use petgraph::graph::NodeIndex;
use std::sync::Arc;

impl Ontology {
    /// Whether `a` lies on the lineage path leading to `b`.
    ///
    /// Legacy rule: at each step only the first parent is consulted, so an
    /// ancestor reachable solely through a later parent of a multi-parent
    /// node is not reported. Curated class lists depend on this behavior;
    /// it must not be widened to search every parent branch.
    pub fn is_ancestor(&self, a: &str, b: &str) -> Result<bool> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        Ok(self.is_ancestor_idx(a, b))
    }

    /// Whether `a` is reachable from `b` going downward; mirror of
    /// [`Ontology::is_ancestor`].
    pub fn is_descendant(&self, a: &str, b: &str) -> Result<bool> {
        self.is_ancestor(b, a)
    }

    pub(crate) fn is_ancestor_idx(&self, a: NodeIndex, b: NodeIndex) -> bool {
        let mut current = b;
        while self.node(a).level < self.node(current).level {
            let Some(&first) = self.node(current).parents.first() else {
                return false;
            };
            if first == a {
                return true;
            }
            current = first;
        }
        false
    }

    /// Every root-to-node path, ordered root first. A class with several
    /// parents has several paths.
    ///
    /// Paths are memoized per node; the graph is immutable after load, so
    /// cache entries are never invalidated.
    pub fn lineage(&self, key: &str) -> Result<Vec<Vec<&OntologyNode>>> {
        let idx = self.index_of(key)?;
        let paths = self.lineage_idx(idx);
        Ok(paths
            .iter()
            .map(|path| path.iter().map(|&i| self.node(i)).collect())
            .collect())
    }

    /// Lineages rendered as "Root > ... > Node" strings, one per path.
    pub fn lineage_names(&self, key: &str) -> Result<Vec<String>> {
        let paths = self.lineage(key)?;
        Ok(paths
            .iter()
            .map(|path| {
                path.iter()
                    .map(|node| node.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" > ")
            })
            .collect())
    }

    fn lineage_idx(&self, idx: NodeIndex) -> Arc<Vec<Vec<NodeIndex>>> {
        if let Some(cached) = self
            .lineage_cache
            .read()
            .expect("lineage cache poisoned")
            .get(&idx)
        {
            return Arc::clone(cached);
        }

        let paths = Arc::new(self.lineage_paths(idx));
        Arc::clone(
            self.lineage_cache
                .write()
                .expect("lineage cache poisoned")
                .entry(idx)
                .or_insert(paths),
        )
    }

    fn lineage_paths(&self, node: NodeIndex) -> Vec<Vec<NodeIndex>> {
        let parents = &self.node(node).parents;
        if parents.is_empty() {
            return vec![vec![node]];
        }

        let mut paths = Vec::new();
        for &parent in parents {
            for path in self.lineage_idx(parent).iter() {
                let mut path = path.clone();
                path.push(node);
                paths.push(path);
            }
        }
        paths
    }
}
