//! Compiled plugins and the parse → validate → compile pipeline.

use serde::{Deserialize, Serialize};

use crate::codegen::{CommandOption, Compiler, extract_options};
use crate::error::CompilerError;
use crate::parse::node_config::{TriggerConfig, TriggerKind};
use crate::parse::types::{NodeBase, PluginEdge, PluginGraph, PluginNode};
use crate::validate::validate_graph;

/// What fires a plugin: a command name, an event name or a message pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDescriptor {
    pub kind: TriggerKind,
    pub value: String,
}

impl TriggerDescriptor {
    pub fn from_trigger(node: &NodeBase<TriggerConfig>) -> Self {
        let cfg = &node.data.config;
        let value = match cfg.trigger_type {
            TriggerKind::Command => &cfg.command,
            TriggerKind::Event => &cfg.event,
            TriggerKind::Message => &cfg.pattern,
        };
        TriggerDescriptor {
            kind: cfg.trigger_type,
            value: value.as_deref().unwrap_or_default().trim().to_string(),
        }
    }

    /// The descriptor of the first trigger node, if any.
    pub fn find(nodes: &[PluginNode]) -> Option<Self> {
        nodes.iter().find_map(|n| match n {
            PluginNode::Trigger(t) => Some(Self::from_trigger(t)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledPlugin {
    pub id: String,
    pub nodes: Vec<PluginNode>,
    pub edges: Vec<PluginEdge>,
    /// Async routine body; expects `context` and `resolve` in scope.
    pub body: String,
    pub trigger: TriggerDescriptor,
    pub enabled: bool,
    pub options: Vec<CommandOption>,
}

/// Full pipeline: validate → generate → derive trigger and options.
/// Compilation is never attempted when validation reports errors.
pub fn compile_plugin(
    id: &str,
    graph: PluginGraph,
    compiler: &Compiler,
) -> Result<CompiledPlugin, Vec<CompilerError>> {
    let errors = validate_graph(&graph, compiler.limits());
    if !errors.is_empty() {
        tracing::debug!(plugin = id, errors = errors.len(), "plugin failed validation");
        return Err(errors);
    }

    let body = compiler.compile_graph(&graph).map_err(|e| vec![e])?;
    let trigger = TriggerDescriptor::find(&graph.nodes).ok_or_else(|| {
        vec![CompilerError::compile("C001", "No trigger node found", None)]
    })?;
    let options = extract_options(&graph.nodes);

    Ok(CompiledPlugin {
        id: id.to_string(),
        nodes: graph.nodes,
        edges: graph.edges,
        body,
        trigger,
        enabled: true,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::node_config::*;

    fn graph() -> PluginGraph {
        PluginGraph {
            nodes: vec![
                PluginNode::new(
                    "t",
                    "Weather",
                    TriggerConfig {
                        command: Some(" weather ".into()),
                        ..Default::default()
                    },
                )
                .unwrap(),
                PluginNode::new(
                    "city",
                    "City",
                    VariableConfig {
                        name: "city".into(),
                        variable_type: VariableSource::UserInput,
                        description: Some("City to look up".into()),
                        required: true,
                        ..Default::default()
                    },
                )
                .unwrap(),
                PluginNode::new(
                    "r",
                    "Reply",
                    ResponseConfig {
                        message: "Weather for {city}".into(),
                        ephemeral: false,
                    },
                )
                .unwrap(),
            ],
            edges: vec![
                PluginEdge::new("e1", "t", "city"),
                PluginEdge::new("e2", "city", "r"),
            ],
        }
    }

    #[test]
    fn compiles_with_trigger_and_options() {
        let plugin = compile_plugin("weather", graph(), &Compiler::default()).unwrap();
        assert_eq!(plugin.id, "weather");
        assert!(plugin.enabled);
        assert_eq!(
            plugin.trigger,
            TriggerDescriptor {
                kind: TriggerKind::Command,
                value: "weather".into()
            }
        );
        assert_eq!(plugin.options.len(), 1);
        assert_eq!(plugin.options[0].description, "City to look up");
        assert!(plugin.body.contains("resolve(pendingResponse);"));
    }

    #[test]
    fn invalid_graph_is_not_compiled() {
        let mut g = graph();
        g.edges.clear();
        let errors = compile_plugin("weather", g, &Compiler::default()).unwrap_err();
        assert!(errors.iter().all(|e| e.code == "V003"));
        assert_eq!(errors.len(), 2);
    }
}
