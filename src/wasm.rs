//! WASM entry points for browser use.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::codegen::Compiler;
use crate::error::CompilerError;
use crate::limits::Limits;
use crate::parse::types::PluginGraph;
use crate::plugin::{CompiledPlugin, TriggerDescriptor};
use crate::validate::{ValidationResult, check_complexity};

/// Trigger, response and connectivity rules.
/// Returns `{ valid, errors }`.
#[wasm_bindgen]
pub fn validate_plugin(json: &str) -> JsValue {
    let result = validate_plugin_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_plugin_inner(json: &str) -> ValidationResult {
    match crate::parse::parse(json) {
        Ok(graph) => crate::validate::validate(&graph.nodes, &graph.edges),
        Err(errors) => ValidationResult::from_errors(&errors),
    }
}

/// Node/edge counts, depth and cycle checks with default limits.
/// Returns `{ valid, errors }`.
#[wasm_bindgen]
pub fn check_plugin_complexity(json: &str) -> JsValue {
    let result = check_plugin_complexity_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn check_plugin_complexity_inner(json: &str) -> ValidationResult {
    match crate::parse::parse(json) {
        Ok(graph) => ValidationResult::from_errors(&check_complexity(
            &graph.nodes,
            &graph.edges,
            &Limits::default(),
        )),
        Err(errors) => ValidationResult::from_errors(&errors),
    }
}

/// Full pipeline: parse → validate → compile.
/// Returns `{ status: "success", plugin }` or `{ status: "errors", errors }`.
#[wasm_bindgen]
pub fn compile_plugin(json: &str) -> JsValue {
    let result = compile_plugin_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn compile_plugin_inner(json: &str) -> CompileResult {
    // 1. Parse
    let source = match serde_json::from_str::<PluginSource>(json) {
        Ok(s) => s,
        Err(e) => {
            return CompileResult::Errors {
                errors: vec![crate::parse::parse_error(&e)],
            };
        }
    };

    // 2. Validate + compile
    let id = source
        .id
        .or_else(|| TriggerDescriptor::find(&source.graph.nodes).map(|t| t.value))
        .unwrap_or_default();
    match crate::plugin::compile_plugin(&id, source.graph, &Compiler::default()) {
        Ok(plugin) => CompileResult::Success { plugin },
        Err(errors) => CompileResult::Errors { errors },
    }
}

// ---------------------------------------------------------------------------
// Payloads exchanged with JS
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PluginSource {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    graph: PluginGraph,
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success { plugin: CompiledPlugin },
    #[serde(rename = "errors")]
    Errors { errors: Vec<CompilerError> },
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = r#"{
        "id": "hello",
        "nodes": [
            { "id": "t", "type": "trigger", "data": { "label": "Hello", "config": { "command": "hello" } } },
            { "id": "r", "type": "response", "data": { "label": "Reply", "config": { "message": "Hello!" } } }
        ],
        "edges": [ { "id": "e", "source": "t", "target": "r" } ]
    }"#;

    #[test]
    fn compile_success() {
        match compile_plugin_inner(HELLO) {
            CompileResult::Success { plugin } => {
                assert_eq!(plugin.id, "hello");
                assert!(plugin.body.contains("pendingResponse = \"Hello!\";"));
            }
            CompileResult::Errors { errors } => {
                panic!("unexpected errors: {:?}", errors.iter().map(|e| &e.message).collect::<Vec<_>>())
            }
        }
    }

    #[test]
    fn parse_failure_is_reported() {
        match compile_plugin_inner("{ not json") {
            CompileResult::Errors { errors } => {
                assert_eq!(errors[0].code, "P001");
                assert_eq!(errors[0].phase, crate::error::Phase::Parse);
            }
            CompileResult::Success { .. } => panic!("expected errors"),
        }
    }

    #[test]
    fn validation_result_shape() {
        let result = validate_plugin_inner(r#"{ "nodes": [], "edges": [] }"#);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Plugin must have exactly one trigger node",
                "Plugin must have at least one response node",
            ]
        );
        assert!(check_plugin_complexity_inner(HELLO).valid);
    }
}
