//! Complexity ceilings (X001–X004), checked before a plugin is persisted.

use std::collections::VecDeque;

use petgraph::algo::is_cyclic_directed;

use crate::error::CompilerError;
use crate::limits::Limits;
use crate::parse::graph::ExecutionGraph;
use crate::parse::types::{PluginEdge, PluginNode};

pub fn check_complexity(
    nodes: &[PluginNode],
    edges: &[PluginEdge],
    limits: &Limits,
) -> Vec<CompilerError> {
    let mut errors = Vec::new();

    if nodes.len() > limits.max_nodes {
        errors.push(CompilerError::validate(
            "X001",
            format!(
                "Plugin has too many nodes ({}, maximum {})",
                nodes.len(),
                limits.max_nodes
            ),
            None,
        ));
    }
    if edges.len() > limits.max_edges {
        errors.push(CompilerError::validate(
            "X002",
            format!(
                "Plugin has too many connections ({}, maximum {})",
                edges.len(),
                limits.max_edges
            ),
            None,
        ));
    }

    let graph = ExecutionGraph::build(nodes, edges);
    for trigger in graph.triggers() {
        let depth = max_depth_from(&graph, trigger);
        if depth > limits.max_depth {
            let id = graph.entry(trigger).node.id().to_string();
            errors.push(CompilerError::validate(
                "X003",
                format!(
                    "Plugin is nested too deeply ({} levels from trigger '{}', maximum {})",
                    depth, id, limits.max_depth
                ),
                Some(id),
            ));
        }
    }

    if is_cyclic_directed(&graph.routing_graph()) {
        errors.push(CompilerError::validate(
            "X004",
            "Plugin graph contains a cycle",
            None,
        ));
    }

    errors
}

/// Breadth-first depth of the deepest node reachable from `start`
/// (the start node itself is depth 0).
fn max_depth_from(graph: &ExecutionGraph<'_>, start: usize) -> usize {
    let mut depth = vec![None; graph.len()];
    let mut queue = VecDeque::new();
    depth[start] = Some(0usize);
    queue.push_back(start);
    let mut max = 0;

    while let Some(idx) = queue.pop_front() {
        let d = depth[idx].unwrap_or(0);
        max = max.max(d);
        for link in &graph.entry(idx).next {
            if depth[link.node].is_none() {
                depth[link.node] = Some(d + 1);
                queue.push_back(link.node);
            }
        }
    }

    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::node_config::*;

    fn chain(len: usize) -> (Vec<PluginNode>, Vec<PluginEdge>) {
        let mut nodes = vec![PluginNode::new("n0", "trigger", TriggerConfig::default()).unwrap()];
        let mut edges = Vec::new();
        for i in 1..len {
            nodes.push(PluginNode::new(&format!("n{i}"), "reply", ResponseConfig::default()).unwrap());
            edges.push(PluginEdge::new(&format!("e{i}"), &format!("n{}", i - 1), &format!("n{i}")));
        }
        (nodes, edges)
    }

    #[test]
    fn depth_at_limit_passes() {
        let (nodes, edges) = chain(21);
        assert!(check_complexity(&nodes, &edges, &Limits::default()).is_empty());
    }

    #[test]
    fn depth_over_limit_fails() {
        let (nodes, edges) = chain(22);
        let errors = check_complexity(&nodes, &edges, &Limits::default());
        assert!(errors.iter().any(|e| e.code == "X003"), "{:?}", errors);
    }

    #[test]
    fn node_and_edge_ceilings() {
        let (nodes, edges) = chain(12);
        let limits = Limits {
            max_nodes: 10,
            max_edges: 5,
            ..Limits::default()
        };
        let codes: Vec<_> = check_complexity(&nodes, &edges, &limits)
            .into_iter()
            .map(|e| e.code)
            .collect();
        assert!(codes.contains(&"X001".to_string()));
        assert!(codes.contains(&"X002".to_string()));
    }

    #[test]
    fn cycle_is_reported() {
        let (nodes, mut edges) = chain(3);
        edges.push(PluginEdge::new("back", "n2", "n1"));
        let errors = check_complexity(&nodes, &edges, &Limits::default());
        assert!(errors.iter().any(|e| e.code == "X004"));
    }
}
