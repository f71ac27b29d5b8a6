//! Per-node configuration validation (N001–N008).
//! SYNC NOTE: Match arms here must track `PluginNode` in
//! `src/parse/types.rs`.

use crate::codegen::expression::sanitize_expression;
use crate::codegen::interpolate::is_identifier;
use crate::codegen::parse_hex_color;
use crate::error::CompilerError;
use crate::limits::Limits;
use crate::parse::node_config::*;
use crate::parse::types::*;

/// Validate a single node's config. Returns all errors found.
pub fn validate_node_config(node: &PluginNode, limits: &Limits) -> Vec<CompilerError> {
    let mut errors = Vec::new();
    let node_id = Some(node.id().to_string());
    let mut names = Names {
        node_id: &node_id,
        errors: &mut errors,
    };

    match node {
        PluginNode::Trigger(n) => {
            let cfg = &n.data.config;
            let (value, what) = match cfg.trigger_type {
                TriggerKind::Command => (&cfg.command, "command name"),
                TriggerKind::Event => (&cfg.event, "event name"),
                TriggerKind::Message => (&cfg.pattern, "message pattern"),
            };
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                names.errors.push(CompilerError::validate(
                    "N008",
                    format!("{} trigger must have a {}", cfg.trigger_type, what),
                    node_id.clone(),
                ));
            }
        }
        PluginNode::Response(_) => {}
        PluginNode::Variable(n) => names.required(&n.data.config.name),
        PluginNode::Data(n) => names.optional(&n.data.config.variable_name),
        PluginNode::Condition(n) => {
            if let Err(e) = sanitize_expression(&n.data.config.expression) {
                names.errors.push(CompilerError::validate(
                    "N003",
                    format!("Invalid condition expression: {}", e),
                    node_id.clone(),
                ));
            }
        }
        PluginNode::Comparison(_) => {}
        PluginNode::Permission(n) => {
            let cfg = &n.data.config;
            let empty = match cfg.check_type {
                PermissionCheck::Permission => {
                    cfg.permission.as_deref().is_none_or(|p| p.trim().is_empty())
                        && cfg.values.is_empty()
                }
                _ => cfg.values.is_empty(),
            };
            if empty {
                names.errors.push(CompilerError::validate(
                    "N007",
                    "Permission check has nothing to check against",
                    node_id.clone(),
                ));
            }
        }
        PluginNode::Action(n) => {
            if let ActionConfig::SetState { key, .. } = &n.data.config {
                if key.trim().is_empty() {
                    names.errors.push(CompilerError::validate(
                        "N007",
                        "set_state action must have a key",
                        node_id.clone(),
                    ));
                }
            }
        }
        PluginNode::HttpRequest(n) => {
            if n.data.config.url.trim().is_empty() {
                names.errors.push(CompilerError::validate(
                    "N002",
                    "HTTP request URL must not be empty",
                    node_id.clone(),
                ));
            }
            names.optional(&n.data.config.variable_name);
        }
        PluginNode::EmbedBuilder(n) => {
            names.optional(&n.data.config.variable_name);
            if let Some(color) = n.data.config.color.as_deref() {
                if !color.trim().is_empty() && parse_hex_color(color).is_none() {
                    names.errors.push(CompilerError::validate(
                        "N005",
                        format!("Embed color '{}' must be a #RRGGBB hex value", color),
                        node_id.clone(),
                    ));
                }
            }
        }
        PluginNode::EmbedResponse(n) => names.required(&n.data.config.embed_variable),
        PluginNode::DiscordAction(n) => {
            let cfg = &n.data.config;
            if let Some(missing) = missing_target(cfg) {
                names.errors.push(CompilerError::validate(
                    "N007",
                    format!("Discord action '{}' is missing {}", cfg.name(), missing),
                    node_id.clone(),
                ));
            }
            if let Some(result) = cfg.result_variable() {
                names.optional(result);
            }
        }
        PluginNode::ForLoop(n) => {
            names.required(&n.data.config.array_variable);
            names.optional(&n.data.config.iterator_variable);
            check_iterations(n.data.config.max_iterations, limits, &node_id, names.errors);
        }
        PluginNode::WhileLoop(n) => {
            if let Err(e) = sanitize_expression(&n.data.config.condition) {
                names.errors.push(CompilerError::validate(
                    "N003",
                    format!("Invalid loop condition: {}", e),
                    node_id.clone(),
                ));
            }
            check_iterations(n.data.config.max_iterations, limits, &node_id, names.errors);
        }
        PluginNode::ArrayOperation(n) => {
            let cfg = &n.data.config;
            if cfg.operation != ArrayOp::Create {
                names.required(&cfg.input_variable);
            }
            names.optional(&cfg.output_variable);
        }
        PluginNode::StringOperation(n) => names.optional(&n.data.config.output_variable),
        PluginNode::ObjectOperation(n) => {
            let cfg = &n.data.config;
            if cfg.operation != ObjectOp::Create {
                names.required(&cfg.input_variable);
            }
            names.optional(&cfg.output_variable);
        }
        PluginNode::MathOperation(n) => names.optional(&n.data.config.output_variable),
        PluginNode::Database(n) => {
            let cfg = &n.data.config;
            if cfg.key.trim().is_empty() && cfg.operation != crate::store::StoreOp::List {
                names.errors.push(CompilerError::validate(
                    "N007",
                    format!("Database {} operation must have a key", cfg.operation.method()),
                    node_id.clone(),
                ));
            }
            if let Some(output) = cfg.output_variable.as_deref() {
                names.optional(output);
            }
        }
        PluginNode::Json(n) => {
            let cfg = &n.data.config;
            names.required(&cfg.input_variable);
            names.optional(&cfg.output_variable);
            if cfg.operation == JsonOp::Extract {
                if cfg.path.trim().is_empty() {
                    names.errors.push(CompilerError::validate(
                        "N006",
                        "JSON extract path must not be empty",
                        node_id.clone(),
                    ));
                } else if cfg.path.len() > limits.max_json_path_length {
                    names.errors.push(CompilerError::validate(
                        "N006",
                        format!(
                            "JSON path exceeds {} characters",
                            limits.max_json_path_length
                        ),
                        node_id.clone(),
                    ));
                }
            }
        }
    }

    errors
}

/// Variable-name checks (N001) for one node.
struct Names<'e> {
    node_id: &'e Option<String>,
    errors: &'e mut Vec<CompilerError>,
}

impl Names<'_> {
    fn required(&mut self, name: &str) {
        if name.trim().is_empty() {
            self.errors.push(CompilerError::validate(
                "N001",
                "Variable name must not be empty",
                self.node_id.clone(),
            ));
        } else {
            self.optional(name);
        }
    }

    /// Empty is allowed; the generator derives a name from the node id.
    fn optional(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && !is_identifier(name) {
            self.errors.push(CompilerError::validate(
                "N001",
                format!("Variable name '{}' is not a valid identifier", name),
                self.node_id.clone(),
            ));
        }
    }
}

fn check_iterations(
    configured: Option<u64>,
    limits: &Limits,
    node_id: &Option<String>,
    errors: &mut Vec<CompilerError>,
) {
    if let Some(n) = configured {
        if n == 0 || n > limits.max_loop_iterations {
            errors.push(CompilerError::validate(
                "N004",
                format!(
                    "Loop maxIterations must be between 1 and {} (got {})",
                    limits.max_loop_iterations, n
                ),
                node_id.clone(),
            ));
        }
    }
}

fn missing_target(cfg: &DiscordActionConfig) -> Option<&'static str> {
    fn blank(s: &str) -> bool {
        s.trim().is_empty()
    }
    match cfg {
        DiscordActionConfig::SendDm { user_id, .. }
        | DiscordActionConfig::Kick { user_id, .. }
        | DiscordActionConfig::Ban { user_id, .. } => blank(user_id).then_some("a user id"),
        DiscordActionConfig::AddReaction { emoji, .. } => blank(emoji).then_some("an emoji"),
        DiscordActionConfig::AddReactions { emojis, .. } => {
            emojis.is_empty().then_some("emojis")
        }
        DiscordActionConfig::CreatePoll {
            question, options, ..
        } => {
            if blank(question) {
                Some("a question")
            } else if options.len() < 2 {
                Some("at least two options")
            } else {
                None
            }
        }
        DiscordActionConfig::GetRole { role_id, .. }
        | DiscordActionConfig::HasRole { role_id, .. }
        | DiscordActionConfig::AddRole { role_id, .. }
        | DiscordActionConfig::RemoveRole { role_id, .. } => blank(role_id).then_some("a role id"),
        DiscordActionConfig::GetChannel { channel_id, .. }
        | DiscordActionConfig::DeleteChannel { channel_id } => {
            blank(channel_id).then_some("a channel id")
        }
        DiscordActionConfig::CreateChannel { name, .. } => blank(name).then_some("a channel name"),
        DiscordActionConfig::CollectReactions { .. } => None,
    }
}
