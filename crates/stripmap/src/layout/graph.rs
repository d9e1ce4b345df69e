//! Precedence graph shared by consensus ordering and layer assignment.
//!
//! Each consecutive stop pair `s[i] → s[i+1]` of every input sequence becomes a
//! directed edge; a pair used by several sequences bumps the edge frequency
//! instead of adding a parallel edge. A sequence counts once per pair even if
//! it repeats that pair. Node indices follow first global appearance (sequence order,
//! then position within the sequence), which is the deterministic tie-break
//! every traversal in this crate uses.

use indexmap::{IndexMap, IndexSet};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

/// Directed precedence graph over stop ids.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceGraph<'a> {
    graph: DiGraph<&'a str, u32>,
    indices: IndexMap<&'a str, NodeIndex>,
}

impl<'a> PrecedenceGraph<'a> {
    /// Builds the union graph of all given stop sequences.
    pub fn from_sequences<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut precedence = Self::default();
        for sequence in sequences {
            let nodes: Vec<NodeIndex> = sequence
                .iter()
                .map(|stop| precedence.ensure_node(stop))
                .collect();
            let pairs: IndexSet<(NodeIndex, NodeIndex)> =
                nodes.windows(2).map(|pair| (pair[0], pair[1])).collect();
            for (from, to) in pairs {
                precedence.add_precedence(from, to);
            }
        }
        precedence
    }

    fn ensure_node(&mut self, stop: &'a str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(stop) {
            return idx;
        }
        let idx = self.graph.add_node(stop);
        self.indices.insert(stop, idx);
        idx
    }

    fn add_precedence(&mut self, from: NodeIndex, to: NodeIndex) {
        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge] += 1,
            None => {
                self.graph.add_edge(from, to, 1);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.indices.values().copied()
    }

    pub fn stop(&self, node: NodeIndex) -> &'a str {
        self.graph[node]
    }

    pub fn index_of(&self, stop: &str) -> Option<NodeIndex> {
        self.indices.get(stop).copied()
    }

    /// Number of distinct predecessors of every node, indexed by
    /// `NodeIndex::index()`.
    pub fn in_degrees(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .map(|node| {
                self.graph
                    .neighbors_directed(node, Direction::Incoming)
                    .count()
            })
            .collect()
    }

    /// Distinct successors of `node`, in first-appearance order.
    pub fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut successors: Vec<NodeIndex> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| edge.target())
            .collect();
        successors.sort_unstable();
        successors
    }

    /// How many input sequences contain the consecutive pair `from → to`.
    pub fn frequency(&self, from: &str, to: &str) -> u32 {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self
                .graph
                .find_edge(from, to)
                .map_or(0, |edge| self.graph[edge]),
            _ => 0,
        }
    }
}
