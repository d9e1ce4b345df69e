//! Longest-path layer assignment for one direction.
//!
//! Stops are ranked by a FIFO topological traversal of the union precedence
//! graph. Stops without predecessors start at layer 0; every edge `(u, v)`
//! proposes `layer(u) + 1` for `v` and the largest proposal wins, so
//! `layer(v) > layer(u)` holds for every edge of an acyclic graph.
//!
//! The queue is seeded in first-appearance order and successors are visited
//! in first-appearance order, which makes the traversal order, and therefore
//! the output order, fully deterministic.

use std::collections::VecDeque;

use indexmap::IndexMap;
use log::trace;

use super::graph::PrecedenceGraph;

/// Layers of one direction's stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerAssignment<'a> {
    layers: IndexMap<&'a str, usize>,
    dropped: Vec<&'a str>,
}

impl<'a> LayerAssignment<'a> {
    /// Layer of `stop`, or `None` if the stop is unknown or part of a cycle.
    pub fn layer(&self, stop: &str) -> Option<usize> {
        self.layers.get(stop).copied()
    }

    /// Layered stops in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.layers.iter().map(|(stop, layer)| (*stop, *layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Highest assigned layer; 0 when nothing was layered.
    pub fn max_layer(&self) -> usize {
        self.layers.values().copied().max().unwrap_or(0)
    }

    /// Stops that never reached in-degree zero because of a precedence cycle.
    pub fn dropped(&self) -> &[&'a str] {
        &self.dropped
    }
}

/// Assigns a layer to every stop reachable through zero in-degree.
pub fn assign_layers<'a>(graph: &PrecedenceGraph<'a>) -> LayerAssignment<'a> {
    let mut in_degree = graph.in_degrees();
    let mut candidate: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut queue: VecDeque<_> = graph
        .nodes()
        .filter(|node| in_degree[node.index()] == 0)
        .collect();

    let mut layers = IndexMap::with_capacity(graph.node_count());

    while let Some(node) = queue.pop_front() {
        let layer = candidate[node.index()].unwrap_or(0);
        layers.insert(graph.stop(node), layer);

        for successor in graph.successors(node) {
            let proposal = layer + 1;
            let slot = &mut candidate[successor.index()];
            *slot = Some(slot.map_or(proposal, |current| current.max(proposal)));

            in_degree[successor.index()] -= 1;
            if in_degree[successor.index()] == 0 {
                queue.push_back(successor);
            }
        }
    }

    let dropped = graph
        .nodes()
        .map(|node| graph.stop(node))
        .filter(|stop| !layers.contains_key(stop))
        .collect();

    trace!(layers:? = layers; "Layer assignment");

    LayerAssignment { layers, dropped }
}
