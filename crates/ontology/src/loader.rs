use crate::error::{OntologyError, Result};
use crate::types::{Ontology, OntologyNode, TaxonomyRecord};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::sync::RwLock;

/// Traversal state of a node during linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// One entry of the explicit DFS stack.
struct Frame {
    node: NodeIndex,
    /// Position of the next child to expand
    cursor: usize,
    /// Whether this visit establishes parent/child links. True only for a
    /// node's first visit; later visits re-descend for level propagation
    /// without duplicating links.
    link: bool,
}

impl Ontology {
    /// Parse a JSON taxonomy snapshot (an array of `{id, name, child_ids}`
    /// records) and build the graph.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<TaxonomyRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Build the graph from taxonomy records.
    ///
    /// Fails on dangling child ids, duplicate ids or names, and cycles.
    /// No partially-built graph is ever returned.
    pub fn from_records(records: Vec<TaxonomyRecord>) -> Result<Self> {
        let mut graph = DiGraph::new();
        let mut id_index = HashMap::new();
        let mut name_index = HashMap::new();

        for record in records {
            let node = OntologyNode {
                id: record.id.clone(),
                name: record.name.clone(),
                child_ids: record.child_ids,
                level: 0,
                parents: Vec::new(),
                children: Vec::new(),
            };
            let idx = graph.add_node(node);
            if id_index.insert(record.id.clone(), idx).is_some() {
                return Err(OntologyError::DuplicateId { id: record.id });
            }
            if name_index.insert(record.name.clone(), idx).is_some() {
                return Err(OntologyError::DuplicateName { name: record.name });
            }
        }

        let mut ontology = Ontology {
            graph,
            id_index,
            name_index,
            lineage_cache: RwLock::new(HashMap::new()),
        };
        ontology.link()?;

        log::info!(
            "Loaded taxonomy: {} classes, {} parent/child links",
            ontology.graph.node_count(),
            ontology.graph.edge_count()
        );

        Ok(ontology)
    }

    /// Link parents/children and assign levels with a DFS from every node
    /// in record order.
    ///
    /// Levels are recomputed on every entry, so a node reached again through
    /// a later-linked, deeper parent re-propagates the larger level through
    /// its subtree. Only the first visit creates links.
    fn link(&mut self) -> Result<()> {
        let mut colors = vec![Color::Unvisited; self.graph.node_count()];
        let starts: Vec<NodeIndex> = self.graph.node_indices().collect();
        for start in starts {
            self.visit(start, &mut colors)?;
        }
        Ok(())
    }

    fn visit(&mut self, start: NodeIndex, colors: &mut [Color]) -> Result<()> {
        let mut stack: Vec<Frame> = Vec::new();
        self.enter(start, colors, &mut stack)?;

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let node = frame.node;
            let link = frame.link;
            let cursor = frame.cursor;
            frame.cursor += 1;

            let child_id = match self.graph[node].child_ids.get(cursor) {
                Some(id) => id.clone(),
                None => {
                    colors[node.index()] = Color::Done;
                    stack.pop();
                    continue;
                }
            };

            let child = match self.id_index.get(&child_id) {
                Some(&child) => child,
                None => {
                    return Err(OntologyError::MissingChild {
                        parent: self.graph[node].id.clone(),
                        child: child_id,
                    });
                }
            };

            if link {
                self.graph[child].parents.push(node);
                self.graph[node].children.push(child);
                self.graph.add_edge(node, child, ());
            }

            self.enter(child, colors, &mut stack)?;
        }

        Ok(())
    }

    /// Push a node onto the DFS stack, recomputing its level from the
    /// parents linked so far. Entering a node that is already in progress
    /// means the taxonomy contains a cycle.
    fn enter(
        &mut self,
        node: NodeIndex,
        colors: &mut [Color],
        stack: &mut Vec<Frame>,
    ) -> Result<()> {
        let color = colors[node.index()];
        if color == Color::InProgress {
            return Err(OntologyError::Cycle {
                id: self.graph[node].id.clone(),
            });
        }

        // Roots keep level 0; everything else sits one past its deepest parent
        let level = self.graph[node]
            .parents
            .iter()
            .map(|&parent| self.graph[parent].level + 1)
            .max();
        if let Some(level) = level {
            self.graph[node].level = level;
        }

        colors[node.index()] = Color::InProgress;
        stack.push(Frame {
            node,
            cursor: 0,
            link: color == Color::Unvisited,
        });
        Ok(())
    }
}
