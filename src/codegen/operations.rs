//! Emitters for the non-branching node kinds that touch the runtime context:
//! trigger, response, variable, action, data, http_request, database, json.
//!
//! Every emitter returns statements only; traversal into successors is the
//! generator's job.

use serde_json::Value;

use super::interpolate::{interpolate, interpolate_value, js_string, var_ref};
use super::json_path::{emit_path_access, parse_json_path};
use super::stmt::Stmt;
use crate::limits::Limits;
use crate::parse::node_config::*;
use crate::parse::types::{NodeBase, NodeId};
use crate::store::StoreOp;

// Runtime context accessors. Command triggers carry an `interaction`,
// message triggers a `message`; exactly one of the two is set.
pub(super) const USER: &str = "(interaction?.user ?? message?.author)";
pub(super) const MEMBER: &str = "(interaction?.member ?? message?.member)";
pub(super) const CHANNEL: &str = "(interaction?.channel ?? message?.channel)";
pub(super) const GUILD: &str = "(interaction?.guild ?? message?.guild)";

/// `variables["name_error"] = error?.message ?? String(error);`
pub(super) fn record_error(name: &str) -> Stmt {
    Stmt::line(format!(
        "{} = error?.message ?? String(error);",
        var_ref(&format!("{}_error", name))
    ))
}

/// The configured output name, or one derived from the node id.
pub(super) fn output_name(configured: &str, id: &NodeId, suffix: &str) -> String {
    let configured = configured.trim();
    if configured.is_empty() {
        format!("{}_{}", id.ident(), suffix)
    } else {
        configured.to_string()
    }
}

pub fn emit_trigger(node: &NodeBase<TriggerConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let value = match cfg.trigger_type {
        TriggerKind::Command => cfg.command.as_deref(),
        TriggerKind::Event => cfg.event.as_deref(),
        TriggerKind::Message => cfg.pattern.as_deref(),
    }
    .unwrap_or(node.data.label.as_str());
    vec![Stmt::line(format!(
        "console.log({});",
        js_string(&format!("[plugin] {} trigger: {}", cfg.trigger_type, value))
    ))]
}

pub fn emit_response(node: &NodeBase<ResponseConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let content = interpolate(&cfg.message);
    if cfg.ephemeral {
        vec![Stmt::line(format!(
            "pendingResponse = {{ content: {}, ephemeral: true }};",
            content
        ))]
    } else {
        vec![Stmt::line(format!("pendingResponse = {};", content))]
    }
}

pub fn emit_variable(node: &NodeBase<VariableConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let name = output_name(&cfg.name, &node.id, "value");
    let value = match cfg.variable_type {
        VariableSource::UserInput => {
            let fallback = if cfg.value.is_empty() {
                "message?.content ?? null".to_string()
            } else {
                interpolate_value(&cfg.value)
            };
            format!(
                "interaction?.options?.get({})?.value ?? {}",
                js_string(&name),
                fallback
            )
        }
        VariableSource::UserName => format!("{}?.username ?? null", USER),
        VariableSource::UserId => format!("{}?.id ?? null", USER),
        VariableSource::ChannelId => format!("{}?.id ?? null", CHANNEL),
        VariableSource::GuildId => format!("{}?.id ?? null", GUILD),
        VariableSource::Timestamp => "Date.now()".to_string(),
        VariableSource::RandomNumber => random_between(cfg.min, cfg.max),
        VariableSource::String => interpolate(&cfg.value),
        VariableSource::Literal => literal(&cfg.value),
    };
    vec![Stmt::line(format!("{} = {};", var_ref(&name), value))]
}

/// Uniform integer in `[min, max]`; bounds default to 0..=100 and are
/// swapped when reversed.
fn random_between(min: Option<i64>, max: Option<i64>) -> String {
    let (mut lo, mut hi) = (min.unwrap_or(0), max.unwrap_or(100));
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }
    let span = i128::from(hi) - i128::from(lo) + 1;
    format!("Math.floor(Math.random() * {}) + {}", span, lo)
}

/// Numbers, booleans and null keep their type; everything else is a string.
fn literal(value: &str) -> String {
    match serde_json::from_str::<Value>(value.trim()) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => v.to_string(),
        _ => js_string(value),
    }
}

pub fn emit_action(node: &NodeBase<ActionConfig>, limits: &Limits) -> Vec<Stmt> {
    match &node.data.config {
        ActionConfig::Log { message } => {
            vec![Stmt::line(format!("console.log({});", interpolate(message)))]
        }
        ActionConfig::Wait { duration } => {
            let ms = match duration.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => (n.max(0.0) as u64).min(limits.max_wait_ms).to_string(),
                _ => format!(
                    "Math.min(Math.max(Number({}) || 0, 0), {})",
                    interpolate_value(duration),
                    limits.max_wait_ms
                ),
            };
            vec![Stmt::line(format!(
                "await new Promise((done) => setTimeout(done, {}));",
                ms
            ))]
        }
        ActionConfig::SetState { key, value } => vec![Stmt::line(format!(
            "await store.set({}, {});",
            interpolate(key),
            interpolate_value(value)
        ))],
    }
}

pub fn emit_data(node: &NodeBase<DataConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let name = output_name(&cfg.variable_name, &node.id, "data");
    let value = match cfg.data_type {
        DataSource::ServerName => format!("{}?.name ?? null", GUILD),
        DataSource::ChannelName => format!("{}?.name ?? null", CHANNEL),
        DataSource::Timestamp => "new Date().toISOString()".to_string(),
        DataSource::MemberCount => format!("{}?.memberCount ?? 0", GUILD),
    };
    vec![Stmt::line(format!("{} = {};", var_ref(&name), value))]
}

pub fn emit_http_request(node: &NodeBase<HttpRequestConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let name = output_name(&cfg.variable_name, &node.id, "response");

    let mut init = vec![format!("method: {}", js_string(cfg.method.as_str()))];
    if !cfg.headers.is_empty() {
        let headers: Vec<String> = cfg
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}", js_string(k), interpolate(v)))
            .collect();
        init.push(format!("headers: {{ {} }}", headers.join(", ")));
    }
    if let Some(body) = cfg.body.as_deref().filter(|_| cfg.method.allows_body()) {
        init.push(format!("body: {}", interpolate(body)));
    }

    vec![Stmt::try_catch(
        vec![
            Stmt::line(format!(
                "const response = await fetch({}, {{ {} }});",
                interpolate(&cfg.url),
                init.join(", ")
            )),
            Stmt::line(format!(
                "{} = response.status;",
                var_ref(&format!("{}_status", name))
            )),
            Stmt::line(format!(
                "{} = await response.json().catch(() => null);",
                var_ref(&name)
            )),
        ],
        vec![
            Stmt::line(format!(
                "console.error({}, error);",
                js_string(&format!("[plugin] http_request '{}' failed:", node.id))
            )),
            record_error(&name),
        ],
    )]
}

pub fn emit_database(node: &NodeBase<DatabaseConfig>) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let output = cfg.output_variable.as_deref().unwrap_or_default();
    let name = output_name(output, &node.id, "result");

    let mut args = vec![interpolate(&cfg.key)];
    if cfg.operation.takes_value() {
        args.push(interpolate_value(&cfg.value));
    }
    let call = format!("await store.{}({})", cfg.operation.method(), args.join(", "));
    let body = if cfg.operation.has_result() {
        let call = match cfg.operation {
            StoreOp::Get => format!("({}) ?? null", call),
            _ => call,
        };
        Stmt::line(format!("{} = {};", var_ref(&name), call))
    } else {
        Stmt::line(format!("{};", call))
    };

    vec![Stmt::try_catch(vec![body], vec![record_error(&name)])]
}

pub fn emit_json(node: &NodeBase<JsonConfig>, limits: &Limits) -> Vec<Stmt> {
    let cfg = &node.data.config;
    let input = var_ref(&cfg.input_variable);
    let name = output_name(&cfg.output_variable, &node.id, "json");
    let output = var_ref(&name);

    match cfg.operation {
        JsonOp::Parse => vec![Stmt::try_catch(
            vec![Stmt::line(format!(
                "{} = typeof {} === \"string\" ? JSON.parse({}) : {};",
                output, input, input, input
            ))],
            vec![Stmt::line(format!("{} = null;", output)), record_error(&name)],
        )],
        JsonOp::Stringify => {
            let indent = if cfg.pretty { ", null, 2" } else { "" };
            vec![Stmt::line(format!(
                "{} = JSON.stringify({}{});",
                output, input, indent
            ))]
        }
        JsonOp::Extract => {
            let steps = parse_json_path(&cfg.path, limits.max_json_path_length);
            vec![Stmt::line(format!(
                "{} = {};",
                output,
                emit_path_access(&input, &steps)
            ))]
        }
    }
}
