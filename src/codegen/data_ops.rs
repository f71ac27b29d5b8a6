//! Pure data transforms: array, string, object and math operation nodes.
//!
//! Each reads named input variable(s) or templates and writes one output
//! variable. Object keys are always set through computed keys or
//! `Object.fromEntries`, so a key such as `__proto__` stays an own property.

use super::interpolate::{interpolate, interpolate_value, js_string, operand, var_ref};
use super::operations::output_name;
use super::stmt::Stmt;
use crate::parse::node_config::*;
use crate::parse::types::NodeBase;

fn assign(name: &str, value: String) -> Vec<Stmt> {
    vec![Stmt::line(format!("{} = {};", var_ref(name), value))]
}

/// `(Array.isArray(x) ? x : [])`
fn as_array(variable: &str) -> String {
    let r = var_ref(variable);
    format!("(Array.isArray({}) ? {} : [])", r, r)
}

pub fn emit_array_operation(node: &NodeBase<ArrayOperationConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let output = output_name(&cfg.output_variable, &node.id, "array");
    let input = var_ref(&cfg.input_variable);
    let item = match cfg.property.as_deref().filter(|p| !p.is_empty()) {
        Some(p) => format!("item?.[{}]", js_string(p)),
        None => "item".to_string(),
    };

    let value = match cfg.operation {
        ArrayOp::Create => {
            let items: Vec<String> = cfg.items.iter().map(|i| interpolate_value(i)).collect();
            format!("[{}]", items.join(", "))
        }
        ArrayOp::Push => format!(
            "[...{}, {}]",
            as_array(&cfg.input_variable),
            interpolate_value(&cfg.value)
        ),
        ArrayOp::Pop => format!("Array.isArray({}) ? {}.pop() ?? null : null", input, input),
        ArrayOp::Filter => {
            let operand = interpolate_value(&cfg.value);
            let test = match cfg.filter_mode {
                FilterMode::Equals => format!("{} == {}", item, operand),
                FilterMode::NotEquals => format!("{} != {}", item, operand),
                FilterMode::Contains => {
                    format!("String({} ?? \"\").includes(String({}))", item, operand)
                }
            };
            format!("{}.filter((item) => {})", as_array(&cfg.input_variable), test)
        }
        ArrayOp::Map => format!("{}.map((item) => {})", as_array(&cfg.input_variable), item),
        ArrayOp::Length => format!(
            "Array.isArray({}) || typeof {} === \"string\" ? {}.length : 0",
            input, input, input
        ),
        ArrayOp::Join => format!(
            "{}.join({})",
            as_array(&cfg.input_variable),
            js_string(cfg.separator.as_deref().unwrap_or(", "))
        ),
    };
    assign(&output, value)
}

pub fn emit_string_operation(node: &NodeBase<StringOperationConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let output = output_name(&cfg.output_variable, &node.id, "text");
    let text = format!("String({})", interpolate(&cfg.input));

    let value = match cfg.operation {
        StringOp::Concat => {
            let parts: Vec<String> = if cfg.inputs.is_empty() {
                vec![interpolate(&cfg.input)]
            } else {
                cfg.inputs.iter().map(|i| interpolate(i)).collect()
            };
            format!(
                "[{}].join({})",
                parts.join(", "),
                js_string(cfg.separator.as_deref().unwrap_or(""))
            )
        }
        StringOp::Split => format!(
            "{}.split({}).map((part) => part.trim())",
            text,
            js_string(cfg.separator.as_deref().unwrap_or(","))
        ),
        StringOp::Replace => format!(
            "{}.{}({}, {})",
            text,
            if cfg.replace_all { "replaceAll" } else { "replace" },
            interpolate(&cfg.search),
            interpolate(&cfg.replacement)
        ),
        StringOp::Upper => format!("{}.toUpperCase()", text),
        StringOp::Lower => format!("{}.toLowerCase()", text),
        StringOp::Trim => format!("{}.trim()", text),
        StringOp::Substring => match cfg.end {
            Some(end) => format!("{}.substring({}, {})", text, cfg.start.unwrap_or(0), end),
            None => format!("{}.substring({})", text, cfg.start.unwrap_or(0)),
        },
        StringOp::ConditionalMapping => {
            let pairs: Vec<String> = cfg
                .mappings
                .iter()
                .map(|m| format!("[{}, {}]", js_string(&m.when), interpolate(&m.result)))
                .collect();
            let fallback = match cfg.default_value.as_deref() {
                Some(d) => interpolate(d),
                None => text.clone(),
            };
            format!("new Map([{}]).get({}) ?? {}", pairs.join(", "), text, fallback)
        }
        StringOp::Join => format!(
            "{}.join({})",
            as_array(cfg.input.trim()),
            js_string(cfg.separator.as_deref().unwrap_or(", "))
        ),
    };
    assign(&output, value)
}

pub fn emit_object_operation(node: &NodeBase<ObjectOperationConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let output = output_name(&cfg.output_variable, &node.id, "object");
    let input = var_ref(&cfg.input_variable);
    let object = format!(
        "(typeof {} === \"object\" && {} !== null ? {} : {{}})",
        input, input, input
    );

    let value = match cfg.operation {
        ObjectOp::Create => {
            let entries: Vec<String> = cfg
                .entries
                .iter()
                .map(|e| format!("[{}, {}]", interpolate(&e.key), interpolate_value(&e.value)))
                .collect();
            format!("Object.fromEntries([{}])", entries.join(", "))
        }
        ObjectOp::Get => {
            let key = interpolate(&cfg.key);
            format!(
                "Object.hasOwn({}, {}) ? {}[{}] : null",
                object, key, object, key
            )
        }
        ObjectOp::Set => format!(
            "{{ ...{}, [{}]: {} }}",
            object,
            interpolate(&cfg.key),
            interpolate_value(&cfg.value)
        ),
        ObjectOp::Keys => format!("Object.keys({})", object),
        ObjectOp::Values => format!("Object.values({})", object),
    };
    assign(&output, value)
}

pub fn emit_math_operation(node: &NodeBase<MathOperationConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let output = output_name(&cfg.output_variable, &node.id, "result");
    let left = format!("Number({})", operand(&cfg.left));
    let right = format!("Number({})", operand(&cfg.right));

    let value = match cfg.operation {
        MathOp::Add => format!("{} + {}", left, right),
        MathOp::Subtract => format!("{} - {}", left, right),
        MathOp::Multiply => format!("{} * {}", left, right),
        MathOp::Divide => format!("{} === 0 ? null : {} / {}", right, left, right),
        MathOp::Modulo => format!("{} === 0 ? null : {} % {}", right, left, right),
        MathOp::Power => format!("Math.pow({}, {})", left, right),
        MathOp::Sqrt => format!("Math.sqrt({})", left),
        MathOp::Abs => format!("Math.abs({})", left),
    };
    assign(&output, value)
}
