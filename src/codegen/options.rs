//! Command options derived from `user_input` variables.
//!
//! Hosts register these as slash-command parameters so the values can be
//! read back with `interaction.options.get(name)`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::parse::node_config::VariableSource;
use crate::parse::types::PluginNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Options in node order; the first node declaring a name wins.
pub fn extract_options(nodes: &[PluginNode]) -> Vec<CommandOption> {
    let mut seen = HashSet::new();
    nodes
        .iter()
        .filter_map(|node| match node {
            PluginNode::Variable(v) if v.data.config.variable_type == VariableSource::UserInput => {
                Some(v)
            }
            _ => None,
        })
        .filter(|v| !v.data.config.name.trim().is_empty())
        .filter(|v| seen.insert(v.data.config.name.trim().to_string()))
        .map(|v| {
            let cfg = &v.data.config;
            let description = cfg
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(v.data.label.as_str())
                .to_string();
            CommandOption {
                name: cfg.name.trim().to_string(),
                description,
                required: cfg.required,
            }
        })
        .collect()
}
