//! Graph-level structural validation rules (V001–V006).

use std::collections::HashSet;

use crate::error::CompilerError;
use crate::parse::types::{PluginEdge, PluginNode};

/// Trigger, response and connectivity rules. Returns all errors found.
pub fn validate_structural(nodes: &[PluginNode], edges: &[PluginEdge]) -> Vec<CompilerError> {
    let mut errors = Vec::new();

    v001_exactly_one_trigger(nodes, &mut errors);
    v002_at_least_one_response(nodes, &mut errors);
    v003_all_connected(nodes, edges, &mut errors);

    errors
}

/// Edge and id sanity rules. Kept apart from `validate_structural` because
/// the execution graph tolerates dangling edges and repeated ids; the full
/// pipeline still reports them.
pub fn validate_integrity(nodes: &[PluginNode], edges: &[PluginEdge]) -> Vec<CompilerError> {
    let mut errors = Vec::new();

    v004_edges_reference_existing_nodes(nodes, edges, &mut errors);
    v005_no_self_loops(edges, &mut errors);
    v006_unique_node_ids(nodes, &mut errors);

    errors
}

fn v001_exactly_one_trigger(nodes: &[PluginNode], errors: &mut Vec<CompilerError>) {
    let trigger_count = nodes.iter().filter(|n| n.is_trigger()).count();
    if trigger_count == 0 {
        errors.push(CompilerError::validate(
            "V001",
            "Plugin must have exactly one trigger node",
            None,
        ));
    } else if trigger_count > 1 {
        errors.push(CompilerError::validate(
            "V001",
            format!(
                "Plugin can only have one trigger node (found {})",
                trigger_count
            ),
            None,
        ));
    }
}

fn v002_at_least_one_response(nodes: &[PluginNode], errors: &mut Vec<CompilerError>) {
    if !nodes.iter().any(|n| n.is_response()) {
        errors.push(CompilerError::validate(
            "V002",
            "Plugin must have at least one response node",
            None,
        ));
    }
}

fn v003_all_connected(nodes: &[PluginNode], edges: &[PluginEdge], errors: &mut Vec<CompilerError>) {
    let connected: HashSet<&str> = edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect();

    for node in nodes {
        if node.is_trigger() {
            continue;
        }
        if !connected.contains(node.id().as_str()) {
            errors.push(CompilerError::validate(
                "V003",
                format!("Node '{}' is not connected", node.id()),
                Some(node.id().to_string()),
            ));
        }
    }
}

fn v004_edges_reference_existing_nodes(
    nodes: &[PluginNode],
    edges: &[PluginEdge],
    errors: &mut Vec<CompilerError>,
) {
    let known: HashSet<&str> = nodes.iter().map(|n| n.id().as_str()).collect();
    for edge in edges {
        if !known.contains(edge.source.as_str()) {
            errors.push(CompilerError::validate(
                "V004",
                format!(
                    "Edge '{}' references unknown source node '{}'",
                    edge.id, edge.source
                ),
                None,
            ));
        }
        if !known.contains(edge.target.as_str()) {
            errors.push(CompilerError::validate(
                "V004",
                format!(
                    "Edge '{}' references unknown target node '{}'",
                    edge.id, edge.target
                ),
                None,
            ));
        }
    }
}

fn v005_no_self_loops(edges: &[PluginEdge], errors: &mut Vec<CompilerError>) {
    for edge in edges {
        if edge.source == edge.target {
            errors.push(CompilerError::validate(
                "V005",
                format!("Self-loop detected on node '{}'", edge.source),
                Some(edge.source.clone()),
            ));
        }
    }
}

fn v006_unique_node_ids(nodes: &[PluginNode], errors: &mut Vec<CompilerError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for node in nodes {
        let id = node.id().as_str();
        if !seen.insert(id) && reported.insert(id) {
            errors.push(CompilerError::validate(
                "V006",
                format!("Duplicate node id '{}'", id),
                Some(id.to_string()),
            ));
        }
    }
}
