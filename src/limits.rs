//! Resource ceilings enforced before and during generation.
//!
//! All limits are hard caps. The defaults match what the editor enforces; a
//! host may load overrides from JSON (camelCase keys, missing keys keep their
//! default).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Limits {
    /// Maximum number of nodes in one plugin graph.
    pub max_nodes: usize,
    /// Maximum number of edges in one plugin graph.
    pub max_edges: usize,
    /// Maximum breadth-first depth from any trigger node.
    pub max_depth: usize,
    /// Indentation levels are clamped to this value when rendering.
    pub max_indent: usize,
    /// Recursion cutoff for the generator walk.
    pub max_generation_depth: usize,
    /// Loop cap used when a loop node does not configure `maxIterations`.
    pub default_loop_iterations: u64,
    /// Upper bound accepted for a configured `maxIterations`.
    pub max_loop_iterations: u64,
    /// JSON paths longer than this are not parsed.
    pub max_json_path_length: usize,
    /// Upper bound for `action:wait`, in milliseconds.
    pub max_wait_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_nodes: 100,
            max_edges: 200,
            max_depth: 20,
            max_indent: 50,
            max_generation_depth: 256,
            default_loop_iterations: 1000,
            max_loop_iterations: 10_000,
            max_json_path_length: 1000,
            max_wait_ms: 300_000,
        }
    }
}

impl Limits {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
