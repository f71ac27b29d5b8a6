//! Branch tests and loop scaffolding for condition, comparison, permission,
//! for_loop and while_loop nodes.
//!
//! The generator owns recursion into branches; these helpers only produce the
//! boolean test (plus any setup statements) and wrap already generated loop
//! bodies.

use super::expression::{ExpressionError, sanitize_expression};
use super::interpolate::{js_string, operand, var_ref};
use super::operations::{MEMBER, USER};
use super::stmt::Stmt;
use crate::limits::Limits;
use crate::parse::node_config::*;
use crate::parse::types::NodeBase;

pub fn condition_test(cfg: &ConditionConfig) -> Result<String, ExpressionError> {
    sanitize_expression(&cfg.expression)
}

pub fn comparison_test(cfg: &ComparisonConfig) -> String {
    let left = operand(&cfg.left);
    let right = operand(&cfg.right);
    let infix = |op: &str| format!("{} {} {}", left, op, right);
    let method = |name: &str| {
        format!(
            "String({} ?? \"\").{}(String({} ?? \"\"))",
            left, name, right
        )
    };
    match cfg.operator {
        ComparisonOp::Equals => infix("=="),
        ComparisonOp::NotEquals => infix("!="),
        ComparisonOp::StrictEquals => infix("==="),
        ComparisonOp::StrictNotEquals => infix("!=="),
        ComparisonOp::GreaterThan => infix(">"),
        ComparisonOp::LessThan => infix("<"),
        ComparisonOp::GreaterOrEqual => infix(">="),
        ComparisonOp::LessOrEqual => infix("<="),
        ComparisonOp::Includes => method("includes"),
        ComparisonOp::StartsWith => method("startsWith"),
        ComparisonOp::EndsWith => method("endsWith"),
    }
}

/// Setup statements and the test expression for a permission node.
pub fn permission_test(node: &NodeBase<PermissionConfig>) -> (Vec<Stmt>, String) {
    let cfg = &node.data.config;
    let list = format!("allowed_{}", node.id.ident());
    let values: Vec<String> = cfg.values.iter().map(|v| js_string(v)).collect();
    let setup = || {
        vec![Stmt::line(format!(
            "const {} = [{}];",
            list,
            values.join(", ")
        ))]
    };

    let (setup, check) = match cfg.check_type {
        PermissionCheck::UserId => (setup(), format!("{}.includes({}?.id)", list, USER)),
        PermissionCheck::Role => (
            setup(),
            format!(
                "({}?.roles?.cache?.some((role) => {}.includes(role.id) || {}.includes(role.name)) ?? false)",
                MEMBER, list, list
            ),
        ),
        PermissionCheck::Permission => {
            let name = cfg
                .permission
                .as_deref()
                .or_else(|| cfg.values.first().map(String::as_str))
                .unwrap_or("Administrator");
            (
                Vec::new(),
                format!(
                    "({}?.permissions?.has({}) ?? false)",
                    MEMBER,
                    js_string(name)
                ),
            )
        }
    };

    match cfg.mode {
        PermissionMode::Whitelist => (setup, check),
        PermissionMode::Blacklist => (setup, format!("!{}", check)),
    }
}

/// A configured cap is clamped to `1..=max_loop_iterations`.
pub fn loop_cap(configured: Option<u64>, limits: &Limits) -> u64 {
    configured
        .unwrap_or(limits.default_loop_iterations)
        .clamp(1, limits.max_loop_iterations.max(1))
}

pub fn for_loop(node: &NodeBase<ForLoopConfig>, limits: &Limits, body: Vec<Stmt>) -> Stmt {
    let cfg = &node.data.config;
    let ident = node.id.ident();
    let items = format!("items_{}", ident);
    let source = var_ref(&cfg.array_variable);
    let iterator = match cfg.iterator_variable.trim() {
        "" => "item",
        name => name,
    };

    let mut loop_body = vec![
        Stmt::line(format!("{} = item;", var_ref(iterator))),
        Stmt::line(format!("{} = index;", var_ref(&format!("{}_index", iterator)))),
    ];
    loop_body.extend(body);

    Stmt::block(
        "",
        vec![
            Stmt::line(format!(
                "const {} = Array.isArray({}) ? {}.slice(0, {}) : [];",
                items,
                source,
                source,
                loop_cap(cfg.max_iterations, limits)
            )),
            Stmt::block(
                format!("for (const [index, item] of {}.entries())", items),
                loop_body,
            ),
        ],
    )
}

pub fn while_loop(
    node: &NodeBase<WhileLoopConfig>,
    limits: &Limits,
    test: &str,
    body: Vec<Stmt>,
) -> Stmt {
    let counter = format!("iterations_{}", node.id.ident());
    let cap = loop_cap(node.data.config.max_iterations, limits);

    let mut loop_body = vec![Stmt::line(format!("{}++;", counter))];
    loop_body.extend(body);

    Stmt::block(
        "",
        vec![
            Stmt::line(format!("let {} = 0;", counter)),
            Stmt::block(
                format!("while (({}) && {} < {})", test, counter, cap),
                loop_body,
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::stmt::render;
    use crate::codegen::writer::CodeWriter;
    use crate::parse::types::{NodeData, NodeId, Position};

    fn base<C>(id: &str, config: C) -> NodeBase<C> {
        NodeBase {
            id: NodeId::new(id).unwrap(),
            position: Position::default(),
            data: NodeData {
                label: id.into(),
                config,
            },
        }
    }

    fn rendered(stmt: Stmt) -> String {
        let mut w = CodeWriter::new();
        render(&[stmt], &mut w);
        w.finish()
    }

    #[test]
    fn comparison_operands() {
        let cfg = ComparisonConfig {
            left: "{count}".into(),
            operator: ComparisonOp::GreaterOrEqual,
            right: "10".into(),
        };
        assert_eq!(comparison_test(&cfg), r#"variables["count"] >= 10"#);

        let cfg = ComparisonConfig {
            left: "{name}".into(),
            operator: ComparisonOp::StartsWith,
            right: "admin".into(),
        };
        assert_eq!(
            comparison_test(&cfg),
            r#"String(variables["name"] ?? "").startsWith(String("admin" ?? ""))"#
        );
    }

    #[test]
    fn permission_blacklist_negates() {
        let node = base(
            "perm-1",
            PermissionConfig {
                check_type: PermissionCheck::UserId,
                mode: PermissionMode::Blacklist,
                values: vec!["123".into(), "456".into()],
                permission: None,
            },
        );
        let (setup, test) = permission_test(&node);
        assert_eq!(
            setup,
            vec![Stmt::line(r#"const allowed_perm_1 = ["123", "456"];"#)]
        );
        assert_eq!(
            test,
            "!allowed_perm_1.includes((interaction?.user ?? message?.author)?.id)"
        );
    }

    #[test]
    fn capability_check_has_no_setup() {
        let node = base(
            "p",
            PermissionConfig {
                check_type: PermissionCheck::Permission,
                permission: Some("ManageMessages".into()),
                ..Default::default()
            },
        );
        let (setup, test) = permission_test(&node);
        assert!(setup.is_empty());
        assert!(test.ends_with(r#"?.permissions?.has("ManageMessages") ?? false)"#));
    }

    #[test]
    fn loop_caps() {
        let limits = Limits::default();
        assert_eq!(loop_cap(None, &limits), 1000);
        assert_eq!(loop_cap(Some(0), &limits), 1);
        assert_eq!(loop_cap(Some(50), &limits), 50);
        assert_eq!(loop_cap(Some(1_000_000), &limits), 10_000);
    }

    #[test]
    fn for_loop_shape() {
        let node = base(
            "loop",
            ForLoopConfig {
                array_variable: "users".into(),
                iterator_variable: "user".into(),
                max_iterations: Some(5),
            },
        );
        let out = rendered(for_loop(
            &node,
            &Limits::default(),
            vec![Stmt::line("console.log(1);")],
        ));
        insta::assert_snapshot!(out, @r#"
        {
          const items_loop = Array.isArray(variables["users"]) ? variables["users"].slice(0, 5) : [];
          for (const [index, item] of items_loop.entries()) {
            variables["user"] = item;
            variables["user_index"] = index;
            console.log(1);
          }
        }
        "#);
    }

    #[test]
    fn while_loop_is_bounded() {
        let node = base("w", WhileLoopConfig::default());
        let out = rendered(while_loop(&node, &Limits::default(), "variables[\"n\"] < 3", vec![]));
        assert!(out.contains("let iterations_w = 0;"));
        assert!(out.contains(r#"while ((variables["n"] < 3) && iterations_w < 1000) {"#));
        assert!(out.contains("iterations_w++;"));
    }
}
