//! Per-kind node configuration payloads.
//!
//! The editor sends configs as loosely typed maps; numbers sometimes arrive
//! as strings and lists sometimes as comma-separated text. The `lenient`
//! helpers normalize those shapes at the serde boundary so emitters only
//! ever see typed values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::StoreOp;

// =============================================================================
// LENIENT DESERIALIZERS
// =============================================================================

pub(crate) mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number, numeric string, empty string or null.
    pub fn opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected a non-negative number, got {n}"))),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a non-negative number, got '{s}'"))),
            Some(other) => Err(D::Error::custom(format!("expected a number, got {other}"))),
        }
    }

    pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected an integer, got {n}"))),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer, got '{s}'"))),
            Some(other) => Err(D::Error::custom(format!("expected an integer, got {other}"))),
        }
    }

    /// Strings, numbers and booleans all become text.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(other) => Err(D::Error::custom(format!("expected text, got {other}"))),
        }
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let s = text(d)?;
        Ok(if s.is_empty() { None } else { Some(s) })
    }

    /// A JSON array of strings or a comma-separated string.
    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(s
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    Value::Number(n) => Ok(n.to_string()),
                    other => Err(D::Error::custom(format!("expected a string item, got {other}"))),
                })
                .collect(),
            Some(other) => Err(D::Error::custom(format!("expected a list, got {other}"))),
        }
    }
}

// =============================================================================
// TRIGGER / RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    #[default]
    Command,
    Event,
    Message,
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerKind::Command => write!(f, "command"),
            TriggerKind::Event => write!(f, "event"),
            TriggerKind::Message => write!(f, "message"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerConfig {
    pub trigger_type: TriggerKind,
    pub command: Option<String>,
    pub event: Option<String>,
    pub pattern: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseConfig {
    #[serde(deserialize_with = "lenient::text")]
    pub message: String,
    pub ephemeral: bool,
}

// =============================================================================
// VARIABLE / DATA
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableSource {
    UserInput,
    UserName,
    UserId,
    ChannelId,
    GuildId,
    Timestamp,
    RandomNumber,
    String,
    #[default]
    #[serde(other)]
    Literal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariableConfig {
    pub name: String,
    #[serde(alias = "type")]
    pub variable_type: VariableSource,
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub min: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub max: Option<i64>,
    pub description: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    ServerName,
    ChannelName,
    Timestamp,
    MemberCount,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataConfig {
    pub data_type: DataSource,
    #[serde(alias = "name")]
    pub variable_name: String,
}

// =============================================================================
// CONTROL FLOW
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionConfig {
    #[serde(alias = "condition")]
    pub expression: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    #[default]
    #[serde(alias = "==")]
    Equals,
    #[serde(alias = "!=")]
    NotEquals,
    #[serde(alias = "===")]
    StrictEquals,
    #[serde(alias = "!==")]
    StrictNotEquals,
    #[serde(alias = ">")]
    GreaterThan,
    #[serde(alias = "<")]
    LessThan,
    #[serde(alias = ">=")]
    GreaterOrEqual,
    #[serde(alias = "<=")]
    LessOrEqual,
    #[serde(alias = "contains")]
    Includes,
    #[serde(alias = "startsWith")]
    StartsWith,
    #[serde(alias = "endsWith")]
    EndsWith,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonConfig {
    #[serde(deserialize_with = "lenient::text")]
    pub left: String,
    pub operator: ComparisonOp,
    #[serde(deserialize_with = "lenient::text")]
    pub right: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCheck {
    #[default]
    UserId,
    Role,
    Permission,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMode {
    #[default]
    Whitelist,
    Blacklist,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionConfig {
    pub check_type: PermissionCheck,
    pub mode: PermissionMode,
    /// User ids or role ids/names, depending on `check_type`.
    #[serde(deserialize_with = "lenient::string_list")]
    pub values: Vec<String>,
    /// Capability name for `check_type = permission`, e.g. `ManageMessages`.
    pub permission: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForLoopConfig {
    pub array_variable: String,
    pub iterator_variable: String,
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub max_iterations: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WhileLoopConfig {
    pub condition: String,
    #[serde(deserialize_with = "lenient::opt_u64")]
    pub max_iterations: Option<u64>,
}

// =============================================================================
// ACTIONS / IO
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "actionType", rename_all = "snake_case")]
pub enum ActionConfig {
    Log {
        #[serde(default, deserialize_with = "lenient::text")]
        message: String,
    },
    Wait {
        /// Milliseconds; may contain placeholders.
        #[serde(default, deserialize_with = "lenient::text")]
        duration: String,
    },
    SetState {
        #[serde(default)]
        key: String,
        #[serde(default, deserialize_with = "lenient::text")]
        value: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpRequestConfig {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub body: Option<String>,
    #[serde(alias = "name")]
    pub variable_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseConfig {
    pub operation: StoreOp,
    /// Key or, for `list`, key prefix. May contain placeholders.
    pub key: String,
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    pub output_variable: Option<String>,
}

// =============================================================================
// EMBEDS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedField {
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedBuilderConfig {
    #[serde(alias = "name")]
    pub variable_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `#RRGGBB`; parsed to an integer at compile time.
    pub color: Option<String>,
    pub url: Option<String>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    pub fields: Vec<EmbedField>,
    pub timestamp: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedResponseConfig {
    pub embed_variable: String,
    pub content: Option<String>,
    pub ephemeral: bool,
}

// =============================================================================
// DISCORD ACTIONS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    #[default]
    Text,
    Voice,
    Category,
}

impl ChannelType {
    /// Discord API channel type number.
    pub fn api_value(&self) -> u8 {
        match self {
            ChannelType::Text => 0,
            ChannelType::Voice => 2,
            ChannelType::Category => 4,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PollOption {
    pub emoji: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DiscordActionConfig {
    #[serde(rename_all = "camelCase")]
    SendDm {
        #[serde(default)]
        user_id: String,
        #[serde(default, deserialize_with = "lenient::text")]
        message: String,
        #[serde(default)]
        result_variable: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AddReaction {
        /// Defaults to the message captured by the last `embed_response`.
        #[serde(default)]
        message_id: Option<String>,
        #[serde(default)]
        emoji: String,
    },
    #[serde(rename_all = "camelCase")]
    AddReactions {
        #[serde(default)]
        message_id: Option<String>,
        #[serde(default, deserialize_with = "lenient::string_list")]
        emojis: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    CreatePoll {
        #[serde(default)]
        question: String,
        #[serde(default)]
        options: Vec<PollOption>,
        #[serde(default, deserialize_with = "lenient::opt_u64")]
        duration_ms: Option<u64>,
        #[serde(default)]
        result_variable: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    GetRole {
        #[serde(default)]
        role_id: String,
        #[serde(default)]
        result_variable: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    HasRole {
        #[serde(default)]
        user_id: Option<String>,
        #[serde(default)]
        role_id: String,
        #[serde(default)]
        result_variable: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AddRole {
        #[serde(default)]
        user_id: Option<String>,
        #[serde(default)]
        role_id: String,
    },
    #[serde(rename_all = "camelCase")]
    RemoveRole {
        #[serde(default)]
        user_id: Option<String>,
        #[serde(default)]
        role_id: String,
    },
    #[serde(rename_all = "camelCase")]
    GetChannel {
        #[serde(default)]
        channel_id: String,
        #[serde(default)]
        result_variable: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Kick {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        reason: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Ban {
        #[serde(default)]
        user_id: String,
        #[serde(default)]
        reason: Option<String>,
        #[serde(default, deserialize_with = "lenient::opt_u64")]
        delete_message_days: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    CreateChannel {
        #[serde(default)]
        name: String,
        #[serde(default)]
        channel_type: ChannelType,
        #[serde(default)]
        result_variable: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteChannel {
        #[serde(default)]
        channel_id: String,
    },
    #[serde(rename_all = "camelCase")]
    CollectReactions {
        #[serde(default)]
        message_id: Option<String>,
        #[serde(default, deserialize_with = "lenient::opt_u64")]
        timeout_ms: Option<u64>,
        #[serde(default)]
        result_variable: Option<String>,
    },
}

impl DiscordActionConfig {
    pub fn name(&self) -> &'static str {
        match self {
            DiscordActionConfig::SendDm { .. } => "send_dm",
            DiscordActionConfig::AddReaction { .. } => "add_reaction",
            DiscordActionConfig::AddReactions { .. } => "add_reactions",
            DiscordActionConfig::CreatePoll { .. } => "create_poll",
            DiscordActionConfig::GetRole { .. } => "get_role",
            DiscordActionConfig::HasRole { .. } => "has_role",
            DiscordActionConfig::AddRole { .. } => "add_role",
            DiscordActionConfig::RemoveRole { .. } => "remove_role",
            DiscordActionConfig::GetChannel { .. } => "get_channel",
            DiscordActionConfig::Kick { .. } => "kick",
            DiscordActionConfig::Ban { .. } => "ban",
            DiscordActionConfig::CreateChannel { .. } => "create_channel",
            DiscordActionConfig::DeleteChannel { .. } => "delete_channel",
            DiscordActionConfig::CollectReactions { .. } => "collect_reactions",
        }
    }

    pub fn result_variable(&self) -> Option<&str> {
        match self {
            DiscordActionConfig::SendDm { result_variable, .. }
            | DiscordActionConfig::CreatePoll { result_variable, .. }
            | DiscordActionConfig::GetRole { result_variable, .. }
            | DiscordActionConfig::HasRole { result_variable, .. }
            | DiscordActionConfig::GetChannel { result_variable, .. }
            | DiscordActionConfig::CreateChannel { result_variable, .. }
            | DiscordActionConfig::CollectReactions { result_variable, .. } => {
                result_variable.as_deref().filter(|v| !v.is_empty())
            }
            _ => None,
        }
    }
}

// =============================================================================
// DATA TRANSFORMS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayOp {
    #[default]
    Create,
    Push,
    Pop,
    Filter,
    Map,
    Length,
    Join,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    Equals,
    NotEquals,
    Contains,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrayOperationConfig {
    pub operation: ArrayOp,
    pub input_variable: String,
    pub output_variable: String,
    /// Item templates for `create`.
    #[serde(deserialize_with = "lenient::string_list")]
    pub items: Vec<String>,
    /// Pushed value, or the filter operand.
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    pub separator: Option<String>,
    pub filter_mode: FilterMode,
    /// Item property read by `filter` and `map`; the whole item when absent.
    pub property: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringOp {
    #[default]
    Concat,
    Split,
    Replace,
    #[serde(alias = "uppercase")]
    Upper,
    #[serde(alias = "lowercase")]
    Lower,
    Trim,
    Substring,
    #[serde(alias = "map")]
    ConditionalMapping,
    Join,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringMapping {
    #[serde(rename = "match", deserialize_with = "lenient::text")]
    pub when: String,
    #[serde(deserialize_with = "lenient::text")]
    pub result: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringOperationConfig {
    pub operation: StringOp,
    /// Input template. For `join`, the array variable name.
    #[serde(deserialize_with = "lenient::text")]
    pub input: String,
    /// Templates joined by `concat`.
    #[serde(deserialize_with = "lenient::string_list")]
    pub inputs: Vec<String>,
    pub output_variable: String,
    pub separator: Option<String>,
    pub search: String,
    pub replacement: String,
    pub replace_all: bool,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub start: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub end: Option<i64>,
    pub mappings: Vec<StringMapping>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectOp {
    #[default]
    Create,
    Get,
    Set,
    Keys,
    Values,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValue {
    pub key: String,
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectOperationConfig {
    pub operation: ObjectOp,
    pub input_variable: String,
    pub output_variable: String,
    pub key: String,
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    pub entries: Vec<KeyValue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathOp {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Sqrt,
    Abs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MathOperationConfig {
    pub operation: MathOp,
    #[serde(alias = "a", deserialize_with = "lenient::text")]
    pub left: String,
    #[serde(alias = "b", deserialize_with = "lenient::text")]
    pub right: String,
    pub output_variable: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonOp {
    #[default]
    Parse,
    Stringify,
    Extract,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonConfig {
    pub operation: JsonOp,
    pub input_variable: String,
    pub output_variable: String,
    pub path: String,
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_strings() {
        let cfg: ForLoopConfig =
            serde_json::from_str(r#"{ "arrayVariable": "items", "maxIterations": "25" }"#).unwrap();
        assert_eq!(cfg.max_iterations, Some(25));

        let cfg: ForLoopConfig =
            serde_json::from_str(r#"{ "arrayVariable": "items", "maxIterations": "" }"#).unwrap();
        assert_eq!(cfg.max_iterations, None);
    }

    #[test]
    fn values_accept_comma_list() {
        let cfg: PermissionConfig =
            serde_json::from_str(r#"{ "checkType": "role", "values": "admin, mod ,," }"#).unwrap();
        assert_eq!(cfg.values, vec!["admin", "mod"]);
        assert_eq!(cfg.mode, PermissionMode::Whitelist);
    }

    #[test]
    fn unknown_variable_source_is_literal() {
        let cfg: VariableConfig =
            serde_json::from_str(r#"{ "name": "x", "variableType": "something_new", "value": 5 }"#)
                .unwrap();
        assert_eq!(cfg.variable_type, VariableSource::Literal);
        assert_eq!(cfg.value, "5");
    }

    #[test]
    fn comparison_operator_aliases() {
        let cfg: ComparisonConfig =
            serde_json::from_str(r#"{ "left": "{a}", "operator": "startsWith", "right": "x" }"#)
                .unwrap();
        assert_eq!(cfg.operator, ComparisonOp::StartsWith);
        let cfg: ComparisonConfig =
            serde_json::from_str(r#"{ "left": "1", "operator": "===", "right": 1 }"#).unwrap();
        assert_eq!(cfg.operator, ComparisonOp::StrictEquals);
        assert_eq!(cfg.right, "1");
    }

    #[test]
    fn discord_action_is_tagged() {
        let cfg: DiscordActionConfig = serde_json::from_str(
            r#"{ "action": "ban", "userId": "{target}", "reason": "spam", "deleteMessageDays": "7" }"#,
        )
        .unwrap();
        match cfg {
            DiscordActionConfig::Ban {
                user_id,
                delete_message_days,
                ..
            } => {
                assert_eq!(user_id, "{target}");
                assert_eq!(delete_message_days, Some(7));
            }
            other => panic!("Expected Ban, got {:?}", other),
        }
    }

    #[test]
    fn action_is_tagged_by_action_type() {
        let cfg: ActionConfig =
            serde_json::from_str(r#"{ "actionType": "wait", "duration": 1500 }"#).unwrap();
        assert!(matches!(cfg, ActionConfig::Wait { ref duration } if duration == "1500"));
    }
}
