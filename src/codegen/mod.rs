//! Codegen pass: plugin graph → JavaScript routine body.
//!
//! Public API: `Compiler::compile(nodes, edges) -> Result<String, CompilerError>`
//!
//! The generator walks the execution graph depth-first from the trigger and
//! builds a `Stmt` tree; `stmt::render` lays it out with clamped
//! indentation. A visited set over dense node indices guarantees each node
//! is emitted at most once, so cycles stop re-expanding instead of looping.

mod control;
mod data_ops;
mod discord;
pub mod expression;
pub mod interpolate;
pub mod json_path;
mod operations;
pub mod options;
pub mod stmt;
pub mod writer;

pub use discord::parse_hex_color;
pub use options::{CommandOption, extract_options};

use tracing::Span;

use crate::error::CompilerError;
use crate::limits::Limits;
use crate::parse::graph::ExecutionGraph;
use crate::parse::types::{PluginEdge, PluginGraph, PluginNode};
use expression::{ExpressionError, sanitize_expression};
use interpolate::var_ref;
use stmt::{Stmt, render};
use writer::CodeWriter;

/// Edge handle tags that select a branch.
pub mod handles {
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
    pub const ALLOWED: &str = "allowed";
    pub const DENIED: &str = "denied";
    pub const LOOP_BODY: &str = "loop-body";
    pub const COMPLETE: &str = "complete";
}

pub struct Compiler {
    limits: Limits,
    span: Span,
}

impl Compiler {
    pub fn new(limits: Limits) -> Self {
        Compiler {
            limits,
            span: Span::none(),
        }
    }

    /// Run every compile inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn compile_graph(&self, graph: &PluginGraph) -> Result<String, CompilerError> {
        self.compile(&graph.nodes, &graph.edges)
    }

    /// Generate the routine body. Fails only when the graph has no trigger.
    pub fn compile(
        &self,
        nodes: &[PluginNode],
        edges: &[PluginEdge],
    ) -> Result<String, CompilerError> {
        let _entered = self.span.enter();

        let graph = ExecutionGraph::build(nodes, edges);
        let trigger = graph
            .trigger()
            .ok_or_else(|| CompilerError::compile("C001", "No trigger node found", None))?;
        tracing::debug!(nodes = graph.len(), edges = edges.len(), "generating plugin body");

        let mut generator = Generator {
            graph: &graph,
            limits: &self.limits,
            visited: vec![false; graph.len()],
        };
        let body = generator.emit_from(trigger, 0);
        let emitted = generator.visited.iter().filter(|v| **v).count();

        let mut w = CodeWriter::with_max_indent(self.limits.max_indent);
        w.line("const variables = Object.create(null);");
        w.line("let pendingResponse = null;");
        w.line("const { interaction, message, client, store } = context;");
        render(
            &[Stmt::try_catch(
                body,
                vec![
                    Stmt::line("console.error(\"[plugin] execution failed:\", error);"),
                    Stmt::line(format!(
                        "{} = error?.message ?? String(error);",
                        var_ref("_error")
                    )),
                ],
            )],
            &mut w,
        );
        w.line("resolve(pendingResponse);");

        let out = w.finish();
        tracing::debug!(
            emitted,
            unreachable = graph.len() - emitted,
            bytes = out.len(),
            "generated plugin body"
        );
        Ok(out)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(Limits::default())
    }
}

/// Compile with default limits.
pub fn compile(nodes: &[PluginNode], edges: &[PluginEdge]) -> Result<String, CompilerError> {
    Compiler::default().compile(nodes, edges)
}

struct Generator<'g, 'a> {
    graph: &'g ExecutionGraph<'a>,
    limits: &'g Limits,
    visited: Vec<bool>,
}

impl<'g, 'a> Generator<'g, 'a> {
    /// Emit `idx` and everything reachable from it that has not been
    /// emitted yet. `depth` is the recursion depth of this call.
    fn emit_from(&mut self, idx: usize, depth: usize) -> Vec<Stmt> {
        if self.visited[idx] {
            return Vec::new();
        }
        let node = self.graph.entry(idx).node;
        if depth > self.limits.max_generation_depth {
            tracing::warn!(
                node = %node.id(),
                depth,
                "generation depth limit reached, not expanding further"
            );
            return vec![Stmt::comment(format!(
                "generation depth limit reached at '{}'",
                node.id()
            ))];
        }
        self.visited[idx] = true;

        let mut out = vec![Stmt::comment(format!(
            "[{}] {}",
            node.node_type(),
            node.label()
        ))];
        out.extend(self.emit_node(idx, node, depth));
        out
    }

    fn emit_node(&mut self, idx: usize, node: &'a PluginNode, depth: usize) -> Vec<Stmt> {
        use handles::*;

        let limits = self.limits;
        let mut out = match node {
            PluginNode::Condition(n) => {
                let test = checked(node, control::condition_test(&n.data.config));
                return self.branch(idx, depth, Vec::new(), test, TRUE, FALSE);
            }
            PluginNode::Comparison(n) => {
                let test = control::comparison_test(&n.data.config);
                return self.branch(idx, depth, Vec::new(), test, TRUE, FALSE);
            }
            PluginNode::Permission(n) => {
                let (setup, test) = control::permission_test(n);
                return self.branch(idx, depth, setup, test, ALLOWED, DENIED);
            }
            PluginNode::ForLoop(n) => {
                let body = self.follow(idx, depth, |h| h == Some(LOOP_BODY));
                let mut out = vec![control::for_loop(n, limits, body)];
                out.extend(self.follow(idx, depth, |h| h != Some(LOOP_BODY)));
                return out;
            }
            PluginNode::WhileLoop(n) => {
                let test = checked(node, sanitize_expression(&n.data.config.condition));
                let body = self.follow(idx, depth, |h| h == Some(LOOP_BODY));
                let mut out = vec![control::while_loop(n, limits, &test, body)];
                out.extend(self.follow(idx, depth, |h| h != Some(LOOP_BODY)));
                return out;
            }
            PluginNode::Trigger(n) => operations::emit_trigger(n),
            PluginNode::Response(n) => operations::emit_response(n),
            PluginNode::Variable(n) => operations::emit_variable(n),
            PluginNode::Action(n) => operations::emit_action(n, limits),
            PluginNode::Data(n) => operations::emit_data(n),
            PluginNode::HttpRequest(n) => operations::emit_http_request(n),
            PluginNode::Database(n) => operations::emit_database(n),
            PluginNode::Json(n) => operations::emit_json(n, limits),
            PluginNode::EmbedBuilder(n) => discord::emit_embed_builder(n),
            PluginNode::EmbedResponse(n) => discord::emit_embed_response(n),
            PluginNode::DiscordAction(n) => discord::emit_discord_action(n, limits),
            PluginNode::ArrayOperation(n) => data_ops::emit_array_operation(n),
            PluginNode::StringOperation(n) => data_ops::emit_string_operation(n),
            PluginNode::ObjectOperation(n) => data_ops::emit_object_operation(n),
            PluginNode::MathOperation(n) => data_ops::emit_math_operation(n),
        };
        out.extend(self.follow(idx, depth, |_| true));
        out
    }

    /// Emit the successors of `idx` whose edge handle satisfies `select`,
    /// in edge order.
    fn follow<F>(&mut self, idx: usize, depth: usize, select: F) -> Vec<Stmt>
    where
        F: Fn(Option<&str>) -> bool,
    {
        let graph = self.graph;
        let mut out = Vec::new();
        for link in &graph.entry(idx).next {
            if select(link.handle.as_deref()) {
                out.extend(self.emit_from(link.node, depth + 1));
            }
        }
        out
    }

    /// `if (test) { yes } else { no }` followed by untagged successors.
    /// Setup statements and the `if` share a bare block so their
    /// declarations stay local to this node.
    fn branch(
        &mut self,
        idx: usize,
        depth: usize,
        mut setup: Vec<Stmt>,
        test: String,
        yes: &str,
        no: &str,
    ) -> Vec<Stmt> {
        let then_body = self.follow(idx, depth, |h| h == Some(yes));
        let else_body = self.follow(idx, depth, |h| h == Some(no));
        let test = Stmt::If {
            cond: test,
            then_body,
            else_body,
        };
        let mut out = if setup.is_empty() {
            vec![test]
        } else {
            setup.push(test);
            vec![Stmt::block("", setup)]
        };
        out.extend(self.follow(idx, depth, |h| h != Some(yes) && h != Some(no)));
        out
    }
}

/// A rejected expression compiles to `false`.
fn checked(node: &PluginNode, test: Result<String, ExpressionError>) -> String {
    test.unwrap_or_else(|error| {
        tracing::warn!(node = %node.id(), %error, "rejected expression, branch compiled as false");
        "false".to_string()
    })
}
