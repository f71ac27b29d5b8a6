#![allow(dead_code)]

use plugin_compiler::codegen::handles;
use plugin_compiler::parse::*;

// =============================================================================
// Node builders
// =============================================================================

pub fn node<C: IntoPluginNode>(id: &str, label: &str, config: C) -> PluginNode {
    PluginNode::new(id, label, config).unwrap()
}

pub fn command(id: &str, name: &str) -> PluginNode {
    node(
        id,
        "Trigger",
        TriggerConfig {
            command: Some(name.into()),
            ..Default::default()
        },
    )
}

pub fn respond(id: &str, message: &str) -> PluginNode {
    node(
        id,
        "Reply",
        ResponseConfig {
            message: message.into(),
            ephemeral: false,
        },
    )
}

pub fn condition(id: &str, expression: &str) -> PluginNode {
    node(
        id,
        "Check",
        ConditionConfig {
            expression: expression.into(),
        },
    )
}

pub fn edge(source: &str, target: &str) -> PluginEdge {
    PluginEdge::new(&format!("{}-{}", source, target), source, target)
}

pub fn tagged(source: &str, target: &str, handle: &str) -> PluginEdge {
    edge(source, target).with_handle(handle)
}

// =============================================================================
// Graph builders
// =============================================================================

/// `/hello` replying "Hello!".
pub fn hello_graph() -> PluginGraph {
    PluginGraph {
        nodes: vec![command("t", "hello"), respond("r", "Hello!")],
        edges: vec![edge("t", "r")],
    }
}

/// trigger → condition → (yes | no).
pub fn branching_graph() -> PluginGraph {
    PluginGraph {
        nodes: vec![
            command("t", "check"),
            condition("c", "{count} > 5"),
            respond("yes", "big"),
            respond("no", "small"),
        ],
        edges: vec![
            edge("t", "c"),
            tagged("c", "yes", handles::TRUE),
            tagged("c", "no", handles::FALSE),
        ],
    }
}

/// trigger → c0 → c1 → ... → c{n-1} → r, each link on the true arm.
pub fn chained_conditions(n: usize) -> PluginGraph {
    let mut nodes = vec![command("t", "deep")];
    let mut edges = vec![edge("t", "c0")];
    for i in 0..n {
        nodes.push(condition(&format!("c{}", i), "{x} > 0"));
        let next = if i + 1 == n {
            "r".to_string()
        } else {
            format!("c{}", i + 1)
        };
        edges.push(tagged(&format!("c{}", i), &next, handles::TRUE));
    }
    nodes.push(respond("r", "bottom"));
    PluginGraph { nodes, edges }
}

/// trigger → loop (body: log) → reply on completion.
pub fn loop_graph() -> PluginGraph {
    PluginGraph {
        nodes: vec![
            command("t", "each"),
            node(
                "loop",
                "Each item",
                ForLoopConfig {
                    array_variable: "items".into(),
                    iterator_variable: "item".into(),
                    max_iterations: Some(10),
                },
            ),
            node(
                "log",
                "Log",
                ActionConfig::Log {
                    message: "item {item}".into(),
                },
            ),
            respond("r", "done"),
        ],
        edges: vec![
            edge("t", "loop"),
            tagged("loop", "log", handles::LOOP_BODY),
            tagged("loop", "r", handles::COMPLETE),
        ],
    }
}

pub fn to_json(graph: &PluginGraph) -> String {
    serde_json::to_string(graph).unwrap()
}
