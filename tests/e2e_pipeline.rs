//! End-to-end: editor JSON → parse → validate → compile → register → dispatch lookup.

mod helpers;

use plugin_compiler::parse::{self, TriggerKind};
use plugin_compiler::store::{MemoryStore, StateStore};
use plugin_compiler::{Compiler, PluginRegistry, compile_plugin};

const MODERATION: &str = r#"{
    "nodes": [
        { "id": "trigger-1", "type": "trigger", "position": { "x": 0, "y": 0 },
          "data": { "label": "Kick command", "config": { "triggerType": "command", "command": "kick" } } },
        { "id": "target", "type": "variable",
          "data": { "label": "Member to kick", "config": { "name": "target", "type": "user_input", "required": true } } },
        { "id": "perm", "type": "permission",
          "data": { "label": "Moderators only", "config": { "checkType": "permission", "permission": "KickMembers" } } },
        { "id": "kick", "type": "discord_action",
          "data": { "label": "Kick", "config": { "action": "kick", "userId": "{target}", "reason": "Requested by {user}" } } },
        { "id": "count", "type": "database",
          "data": { "label": "Count kicks", "config": { "operation": "set", "key": "kicks:{target}", "value": "1" } } },
        { "id": "done", "type": "response",
          "data": { "label": "Done", "config": { "message": "Kicked {target}" } } },
        { "id": "nope", "type": "response",
          "data": { "label": "Denied", "config": { "message": "You can't do that", "ephemeral": true } } }
    ],
    "edges": [
        { "id": "e1", "source": "trigger-1", "target": "target" },
        { "id": "e2", "source": "target", "target": "perm" },
        { "id": "e3", "source": "perm", "target": "kick", "sourceHandle": "allowed" },
        { "id": "e4", "source": "perm", "target": "nope", "sourceHandle": "denied" },
        { "id": "e5", "source": "kick", "target": "count" },
        { "id": "e6", "source": "count", "target": "done" }
    ]
}"#;

#[test]
fn moderation_plugin_end_to_end() {
    let graph = parse::parse(MODERATION).expect("should parse");
    let plugin = compile_plugin("moderation", graph, &Compiler::default()).expect("should compile");

    assert_eq!(plugin.trigger.kind, TriggerKind::Command);
    assert_eq!(plugin.trigger.value, "kick");
    assert_eq!(plugin.options.len(), 1);
    assert_eq!(plugin.options[0].name, "target");
    assert_eq!(plugin.options[0].description, "Member to kick");
    assert!(plugin.options[0].required);

    let body = &plugin.body;
    assert!(body.contains(r#"?.permissions?.has("KickMembers") ?? false)"#));
    assert!(body.contains("await member.kick("));
    assert!(body.contains(r#"await store.set(`kicks:${variables["target"] ?? ""}`, "1");"#));
    assert!(body.contains(r#"pendingResponse = { content: "You can't do that", ephemeral: true };"#));

    let kick_at = body.find("await member.kick(").unwrap();
    let denied_at = body.find("You can't do that").unwrap();
    let done_at = body.find("Kicked ").unwrap();
    assert!(kick_at < done_at && done_at < denied_at);

    let registry = PluginRegistry::new();
    assert!(registry.register(plugin));
    let matched = registry.find_by_trigger("kick", TriggerKind::Command);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "moderation");
}

#[test]
fn invalid_json_never_reaches_the_compiler() {
    let errors = parse::parse(r#"{ "nodes": [ { "id": "x", "type": "teleport" } ] }"#).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "P001");
}

#[test]
fn validation_errors_block_compilation() {
    let mut graph = parse::parse(MODERATION).unwrap();
    graph.nodes.retain(|n| !n.is_response());
    graph.edges.retain(|e| e.target != "done" && e.target != "nope");

    let errors = compile_plugin("moderation", graph, &Compiler::default()).unwrap_err();
    assert!(errors.iter().any(|e| e.code == "V002"));
}

#[test]
fn helper_graphs_survive_json() {
    for graph in [helpers::hello_graph(), helpers::branching_graph(), helpers::loop_graph()] {
        let json = helpers::to_json(&graph);
        let reparsed = parse::parse(&json).expect("round trip");
        assert_eq!(reparsed.nodes.len(), graph.nodes.len());
        assert!(compile_plugin("p", reparsed, &Compiler::default()).is_ok());
    }
}

#[test]
fn memory_store_backs_database_nodes() {
    let store = MemoryStore::new();
    store.set("kicks:42", serde_json::json!(1));
    store.set("kicks:7", serde_json::json!(3));
    store.set("bans:1", serde_json::json!(true));

    assert_eq!(store.get("kicks:42"), Some(serde_json::json!(1)));
    assert_eq!(store.list("kicks:"), vec!["kicks:42", "kicks:7"]);
    assert!(store.delete("kicks:42"));
    assert!(!store.exists("kicks:42"));
    assert_eq!(store.len(), 2);
}
