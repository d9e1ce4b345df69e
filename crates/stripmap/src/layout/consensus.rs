//! Consensus ordering of several stop sequences.
//!
//! Synthesizes one ordering from per-trip orderings that may disagree. The
//! precedence graph is sorted topologically; among ready stops the one that
//! appears earliest in the first sequence wins, stops absent from the first
//! sequence come after all present ones, and remaining ties fall back to
//! first global appearance.
//!
//! Stops caught in a precedence cycle never become ready and are left out of
//! the result. This is never an error.

use log::debug;

use super::graph::PrecedenceGraph;

/// Merges stop sequences into a single consensus ordering.
///
/// A single input sequence is returned unchanged.
///
/// # Examples
///
/// ```
/// # use stripmap::layout::merge_sequences;
/// let main: Vec<String> = ["A", "B", "C"].map(String::from).to_vec();
/// let branch: Vec<String> = ["A", "B", "D"].map(String::from).to_vec();
///
/// let merged = merge_sequences(&[main.as_slice(), branch.as_slice()]);
/// assert_eq!(merged, ["A", "B", "C", "D"]);
/// ```
pub fn merge_sequences(sequences: &[&[String]]) -> Vec<String> {
    match sequences {
        [] => Vec::new(),
        [single] => single.to_vec(),
        [first, ..] => {
            let graph = PrecedenceGraph::from_sequences(sequences.iter().copied());
            let merged = topological_order(&graph, first);
            if merged.len() < graph.node_count() {
                debug!(
                    dropped = graph.node_count() - merged.len();
                    "Consensus ordering dropped stops caught in precedence cycles"
                );
            }
            merged
        }
    }
}

fn topological_order(graph: &PrecedenceGraph<'_>, reference: &[String]) -> Vec<String> {
    let rank = |stop: &str| {
        reference
            .iter()
            .position(|candidate| candidate == stop)
            .unwrap_or(usize::MAX)
    };

    let mut in_degree = graph.in_degrees();
    let mut ready: Vec<_> = graph
        .nodes()
        .filter(|node| in_degree[node.index()] == 0)
        .collect();
    let mut merged = Vec::with_capacity(graph.node_count());

    while let Some(pick) = ready
        .iter()
        .enumerate()
        .min_by_key(|(_, node)| (rank(graph.stop(**node)), node.index()))
        .map(|(slot, _)| slot)
    {
        let node = ready.swap_remove(pick);
        merged.push(graph.stop(node).to_string());

        for successor in graph.successors(node) {
            let degree = &mut in_degree[successor.index()];
            *degree -= 1;
            if *degree == 0 {
                ready.push(successor);
            }
        }
    }

    merged
}
