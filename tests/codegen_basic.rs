//! Integration tests for the codegen pass.

mod helpers;

use plugin_compiler::codegen::{Compiler, compile, handles};
use plugin_compiler::parse::*;

#[test]
fn hello_plugin_resolves_reply() {
    let graph = helpers::hello_graph();
    let body = compile(&graph.nodes, &graph.edges).unwrap();

    assert!(body.contains("\"Hello!\""));
    assert!(body.contains("resolve(pendingResponse);"));
    assert!(body.starts_with("const variables = Object.create(null);"));
}

#[test]
fn condition_branches_to_if_else() {
    let graph = helpers::branching_graph();
    let body = compile(&graph.nodes, &graph.edges).unwrap();

    insta::assert_snapshot!(body, @r#"
    const variables = Object.create(null);
    let pendingResponse = null;
    const { interaction, message, client, store } = context;
    try {
      // [trigger] Trigger
      console.log("[plugin] command trigger: check");
      // [condition] Check
      if (variables["count"] > 5) {
        // [response] Reply
        pendingResponse = "big";
      } else {
        // [response] Reply
        pendingResponse = "small";
      }
    } catch (error) {
      console.error("[plugin] execution failed:", error);
      variables["_error"] = error?.message ?? String(error);
    }
    resolve(pendingResponse);
    "#);
}

#[test]
fn deep_nesting_is_clamped() {
    let graph = helpers::chained_conditions(55);
    let body = compile(&graph.nodes, &graph.edges).unwrap();

    let max_indent = body
        .lines()
        .map(|line| line.len() - line.trim_start().len())
        .max()
        .unwrap_or(0);
    assert!(max_indent <= 100, "indentation reached {} spaces", max_indent);
    assert!(body.contains("pendingResponse = \"bottom\";"));
    assert_eq!(body.matches("if (variables[\"x\"] > 0) {").count(), 55);
}

#[test]
fn placeholders_become_variable_references() {
    let nodes = vec![
        helpers::command("t", "greet"),
        helpers::node(
            "name",
            "Name",
            VariableConfig {
                name: "who".into(),
                variable_type: VariableSource::UserName,
                ..Default::default()
            },
        ),
        helpers::respond("r", "Hi {who}, `ok`"),
    ];
    let edges = vec![helpers::edge("t", "name"), helpers::edge("name", "r")];
    let body = compile(&nodes, &edges).unwrap();

    assert!(
        body.contains(r#"pendingResponse = `Hi ${variables["who"] ?? ""}, \`ok\``;"#),
        "{}",
        body
    );
}

#[test]
fn json_extract_walks_the_path() {
    let nodes = vec![
        helpers::command("t", "weather"),
        helpers::node(
            "pick",
            "Pick",
            JsonConfig {
                operation: JsonOp::Extract,
                input_variable: "payload".into(),
                output_variable: "city".into(),
                path: r#"data.items[0]["display-name"]"#.into(),
                pretty: false,
            },
        ),
        helpers::respond("r", "{city}"),
    ];
    let edges = vec![helpers::edge("t", "pick"), helpers::edge("pick", "r")];
    let body = compile(&nodes, &edges).unwrap();

    assert!(body.contains(
        r#"variables["city"] = variables["payload"]?.["data"]?.["items"]?.[0]?.["display-name"];"#
    ));
}

#[test]
fn loop_body_runs_inside_the_loop() {
    let graph = helpers::loop_graph();
    let body = compile(&graph.nodes, &graph.edges).unwrap();

    let loop_at = body.find("for (const [").expect("for loop");
    let log_at = body.find("console.log(`item ").expect("loop body");
    let reply_at = body.find("pendingResponse = \"done\";").expect("completion");
    assert!(loop_at < log_at && log_at < reply_at);
    assert!(body.contains(".slice(0, 10)"));
}

#[test]
fn unknown_handles_continue_after_branch() {
    let mut graph = helpers::branching_graph();
    graph.nodes.push(helpers::respond("after", "after"));
    graph.edges.push(helpers::tagged("c", "after", handles::COMPLETE));
    let body = compile(&graph.nodes, &graph.edges).unwrap();

    let close = body.find("pendingResponse = \"small\";").unwrap();
    let after = body.find("pendingResponse = \"after\";").unwrap();
    assert!(close < after);
    assert!(body.contains("\n  pendingResponse = \"after\";"));
}

#[test]
fn compiler_honours_custom_limits() {
    let graph = helpers::chained_conditions(10);
    let compiler = Compiler::new(plugin_compiler::Limits {
        max_indent: 3,
        ..Default::default()
    });
    let body = compiler.compile_graph(&graph).unwrap();
    assert!(body.lines().all(|l| l.len() - l.trim_start().len() <= 6));
}
