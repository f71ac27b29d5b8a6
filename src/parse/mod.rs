//! Parse phase: JSON → Rust types + execution graph construction.

pub mod graph;
pub mod node_config;
pub mod types;

pub use graph::ExecutionGraph;
pub use node_config::*;
pub use types::*;

use crate::error::CompilerError;

/// Deserialize a `{ nodes, edges }` JSON string into a `PluginGraph`.
pub fn parse(json: &str) -> Result<PluginGraph, Vec<CompilerError>> {
    serde_json::from_str::<PluginGraph>(json).map_err(|e| vec![parse_error(&e)])
}

/// P003 when a node id was rejected, P001 for anything else.
pub fn parse_error(e: &serde_json::Error) -> CompilerError {
    let message = e.to_string();
    if e.is_data() && message.starts_with("node id") {
        CompilerError::parse("P003", format!("Invalid node id: {}", message))
    } else {
        CompilerError::parse("P001", format!("Failed to parse plugin graph JSON: {}", message))
    }
}
