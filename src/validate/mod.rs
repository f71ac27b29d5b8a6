//! Graph-level validation phase.
//!
//! `validate` is the editor-facing check (trigger, response, connectivity).
//! `validate_graph` is the full pipeline run before compiling: those rules
//! plus edge and id sanity, complexity ceilings and per-node configuration.

pub mod complexity;
pub mod node_rules;
pub mod structural;

pub use complexity::check_complexity;

use serde::Serialize;

use crate::error::CompilerError;
use crate::limits::Limits;
use crate::parse::types::{PluginEdge, PluginGraph, PluginNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: &[CompilerError]) -> Self {
        ValidationResult {
            valid: errors.is_empty(),
            errors: errors.iter().map(|e| e.message.clone()).collect(),
        }
    }
}

/// Trigger, response and connectivity rules; all errors are collected.
pub fn validate(nodes: &[PluginNode], edges: &[PluginEdge]) -> ValidationResult {
    ValidationResult::from_errors(&structural::validate_structural(nodes, edges))
}

/// Every rule: structural, edges and ids, complexity and node configs.
pub fn validate_graph(graph: &PluginGraph, limits: &Limits) -> Vec<CompilerError> {
    let mut errors = structural::validate_structural(&graph.nodes, &graph.edges);
    errors.extend(structural::validate_integrity(&graph.nodes, &graph.edges));
    errors.extend(check_complexity(&graph.nodes, &graph.edges, limits));

    for node in &graph.nodes {
        errors.extend(validate_node(node, limits));
    }

    errors
}

/// Validate a single node's configuration.
pub fn validate_node(node: &PluginNode, limits: &Limits) -> Vec<CompilerError> {
    node_rules::validate_node_config(node, limits)
}
