//! Integration tests for the sandbox gate and plugin registry lifecycle.

mod helpers;

use plugin_compiler::parse::TriggerKind;
use plugin_compiler::registry::{PluginRegistry, SandboxGate, SandboxViolation};
use plugin_compiler::{CompiledPlugin, Compiler, compile_plugin};

fn hello(id: &str) -> CompiledPlugin {
    compile_plugin(id, helpers::hello_graph(), &Compiler::default()).unwrap()
}

fn with_body(id: &str, body: &str) -> CompiledPlugin {
    CompiledPlugin {
        body: body.into(),
        ..hello(id)
    }
}

#[test]
fn gate_rejects_escape_hatches() {
    let gate = SandboxGate::new();
    let cases = [
        (r#"require("fs")"#, SandboxViolation::Require),
        ("eval(code)", SandboxViolation::Eval),
        ("process.exit()", SandboxViolation::ProcessExit),
        ("const cp = 'child_process';", SandboxViolation::ChildProcess),
        ("console.log(__dirname)", SandboxViolation::Dirname),
        ("global.x = 1", SandboxViolation::GlobalAssignment),
    ];
    for (body, expected) in cases {
        assert_eq!(gate.scan(body), Err(expected), "body: {}", body);
    }
}

#[test]
fn gate_accepts_ordinary_bodies() {
    let gate = SandboxGate::new();
    for body in [
        "console.log('hi');",
        "variables[\"n\"] = Math.random();",
        "pendingResponse = JSON.stringify({});",
        "variables[\"sum\"] = (1 + 2) * 3 / 4 - 5;",
    ] {
        assert_eq!(gate.scan(body), Ok(()), "body: {}", body);
    }
}

#[test]
fn generated_bodies_pass_the_gate() {
    for graph in [
        helpers::hello_graph(),
        helpers::branching_graph(),
        helpers::loop_graph(),
    ] {
        let plugin = compile_plugin("p", graph, &Compiler::default()).unwrap();
        assert_eq!(SandboxGate::new().scan(&plugin.body), Ok(()));
    }
}

#[test]
fn rejected_plugins_are_not_registered() {
    let registry = PluginRegistry::new();
    assert!(!registry.register(with_body("bad", "require('fs');")));
    assert!(!registry.contains("bad"));
    assert!(registry.is_empty());
}

#[test]
fn lifecycle_round_trip() {
    let registry = PluginRegistry::new();
    assert!(registry.register(hello("hello")));
    assert_eq!(registry.len(), 1);

    let found = registry.find_by_trigger("hello", TriggerKind::Command);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "hello");

    assert!(registry.disable("hello"));
    assert!(registry.disable("hello"));
    assert!(registry.find_by_trigger("hello", TriggerKind::Command).is_empty());
    assert_eq!(registry.get("hello").map(|p| p.enabled), Some(false));

    assert!(registry.enable("hello"));
    assert_eq!(registry.find_by_trigger("hello", TriggerKind::Command).len(), 1);

    assert!(registry.unregister("hello"));
    assert!(!registry.unregister("hello"));
    assert!(!registry.enable("hello"));
    assert!(registry.find_by_trigger("hello", TriggerKind::Command).is_empty());

    assert!(registry.register(hello("hello")));
    assert_eq!(registry.statistics().enabled, 1);
}

#[test]
fn re_registering_replaces() {
    let registry = PluginRegistry::new();
    registry.register(hello("p"));
    registry.register(with_body("p", "pendingResponse = \"v2\";"));
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.get("p").map(|p| p.body),
        Some("pendingResponse = \"v2\";".to_string())
    );
}

#[test]
fn trigger_kind_must_match() {
    let registry = PluginRegistry::new();
    registry.register(hello("hello"));
    assert!(registry.find_by_trigger("hello", TriggerKind::Event).is_empty());
    assert!(registry.find_by_trigger("Hello", TriggerKind::Command).is_empty());
}
