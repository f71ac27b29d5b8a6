//! Rust types mirroring the editor's plugin graph JSON.
//!
//! These types are the serde target for the `{ nodes, edges }` payload.
//! Node kinds form a closed set; each variant carries its own typed config
//! (see `node_config`).

use serde::{Deserialize, Serialize};

use super::node_config::*;

// =============================================================================
// NODE IDS
// =============================================================================

const MAX_NODE_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeIdError {
    #[error("node id must not be empty")]
    Empty,
    #[error("node id '{0}' exceeds 64 characters")]
    TooLong(String),
    #[error("node id '{0}' may only contain letters, digits, '_' and '-'")]
    InvalidChar(String),
}

/// A node identifier. Ids end up in generated identifiers, so the grammar
/// is restricted to `[A-Za-z0-9_-]{1,64}` and checked on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Result<Self, NodeIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(NodeIdError::Empty);
        }
        if id.len() > MAX_NODE_ID_LEN {
            return Err(NodeIdError::TooLong(id));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(NodeIdError::InvalidChar(id));
        }
        Ok(NodeId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a JavaScript identifier fragment (`-` becomes `_`).
    pub fn ident(&self) -> String {
        self.0.replace('-', "_")
    }
}

impl TryFrom<String> for NodeId {
    type Error = NodeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NodeId::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TOP-LEVEL GRAPH
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginGraph {
    #[serde(default)]
    pub nodes: Vec<PluginNode>,
    #[serde(default)]
    pub edges: Vec<PluginEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

impl PluginEdge {
    pub fn new(id: &str, source: &str, target: &str) -> Self {
        PluginEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handle(mut self, handle: &str) -> Self {
        self.source_handle = Some(handle.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// NODE BASE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData<C> {
    #[serde(default)]
    pub label: String,
    pub config: C,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeBase<C> {
    pub id: NodeId,
    #[serde(default)]
    pub position: Position,
    pub data: NodeData<C>,
}

// =============================================================================
// PLUGIN NODE: tagged union over 20 node kinds
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginNode {
    Trigger(NodeBase<TriggerConfig>),
    Response(NodeBase<ResponseConfig>),
    Variable(NodeBase<VariableConfig>),
    Condition(NodeBase<ConditionConfig>),
    Permission(NodeBase<PermissionConfig>),
    Comparison(NodeBase<ComparisonConfig>),
    Action(NodeBase<ActionConfig>),
    Data(NodeBase<DataConfig>),
    HttpRequest(NodeBase<HttpRequestConfig>),
    EmbedBuilder(NodeBase<EmbedBuilderConfig>),
    EmbedResponse(NodeBase<EmbedResponseConfig>),
    DiscordAction(NodeBase<DiscordActionConfig>),
    ForLoop(NodeBase<ForLoopConfig>),
    WhileLoop(NodeBase<WhileLoopConfig>),
    ArrayOperation(NodeBase<ArrayOperationConfig>),
    StringOperation(NodeBase<StringOperationConfig>),
    ObjectOperation(NodeBase<ObjectOperationConfig>),
    MathOperation(NodeBase<MathOperationConfig>),
    Database(NodeBase<DatabaseConfig>),
    Json(NodeBase<JsonConfig>),
}

macro_rules! each_node {
    ($node:expr, $n:ident => $body:expr) => {
        match $node {
            PluginNode::Trigger($n) => $body,
            PluginNode::Response($n) => $body,
            PluginNode::Variable($n) => $body,
            PluginNode::Condition($n) => $body,
            PluginNode::Permission($n) => $body,
            PluginNode::Comparison($n) => $body,
            PluginNode::Action($n) => $body,
            PluginNode::Data($n) => $body,
            PluginNode::HttpRequest($n) => $body,
            PluginNode::EmbedBuilder($n) => $body,
            PluginNode::EmbedResponse($n) => $body,
            PluginNode::DiscordAction($n) => $body,
            PluginNode::ForLoop($n) => $body,
            PluginNode::WhileLoop($n) => $body,
            PluginNode::ArrayOperation($n) => $body,
            PluginNode::StringOperation($n) => $body,
            PluginNode::ObjectOperation($n) => $body,
            PluginNode::MathOperation($n) => $body,
            PluginNode::Database($n) => $body,
            PluginNode::Json($n) => $body,
        }
    };
}

impl PluginNode {
    pub fn id(&self) -> &NodeId {
        each_node!(self, n => &n.id)
    }

    pub fn label(&self) -> &str {
        each_node!(self, n => &n.data.label)
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            PluginNode::Trigger(_) => "trigger",
            PluginNode::Response(_) => "response",
            PluginNode::Variable(_) => "variable",
            PluginNode::Condition(_) => "condition",
            PluginNode::Permission(_) => "permission",
            PluginNode::Comparison(_) => "comparison",
            PluginNode::Action(_) => "action",
            PluginNode::Data(_) => "data",
            PluginNode::HttpRequest(_) => "http_request",
            PluginNode::EmbedBuilder(_) => "embed_builder",
            PluginNode::EmbedResponse(_) => "embed_response",
            PluginNode::DiscordAction(_) => "discord_action",
            PluginNode::ForLoop(_) => "for_loop",
            PluginNode::WhileLoop(_) => "while_loop",
            PluginNode::ArrayOperation(_) => "array_operation",
            PluginNode::StringOperation(_) => "string_operation",
            PluginNode::ObjectOperation(_) => "object_operation",
            PluginNode::MathOperation(_) => "math_operation",
            PluginNode::Database(_) => "database",
            PluginNode::Json(_) => "json",
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, PluginNode::Trigger(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, PluginNode::Response(_))
    }

    /// Build a node from an id, label and config. Used by hosts that
    /// assemble graphs programmatically and by tests.
    pub fn new<C>(id: &str, label: &str, config: C) -> Result<Self, NodeIdError>
    where
        C: IntoPluginNode,
    {
        let base = NodeBase {
            id: NodeId::new(id)?,
            position: Position::default(),
            data: NodeData {
                label: label.into(),
                config,
            },
        };
        Ok(C::wrap(base))
    }
}

/// Maps a config type to its node variant.
pub trait IntoPluginNode: Sized {
    fn wrap(base: NodeBase<Self>) -> PluginNode;
}

macro_rules! into_node {
    ($($config:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoPluginNode for $config {
                fn wrap(base: NodeBase<Self>) -> PluginNode {
                    PluginNode::$variant(base)
                }
            }
        )*
    };
}

into_node! {
    TriggerConfig => Trigger,
    ResponseConfig => Response,
    VariableConfig => Variable,
    ConditionConfig => Condition,
    PermissionConfig => Permission,
    ComparisonConfig => Comparison,
    ActionConfig => Action,
    DataConfig => Data,
    HttpRequestConfig => HttpRequest,
    EmbedBuilderConfig => EmbedBuilder,
    EmbedResponseConfig => EmbedResponse,
    DiscordActionConfig => DiscordAction,
    ForLoopConfig => ForLoop,
    WhileLoopConfig => WhileLoop,
    ArrayOperationConfig => ArrayOperation,
    StringOperationConfig => StringOperation,
    ObjectOperationConfig => ObjectOperation,
    MathOperationConfig => MathOperation,
    DatabaseConfig => Database,
    JsonConfig => Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_grammar() {
        assert!(NodeId::new("trigger-1").is_ok());
        assert!(NodeId::new("node_A9").is_ok());
        assert_eq!(NodeId::new(""), Err(NodeIdError::Empty));
        assert!(matches!(NodeId::new("a b"), Err(NodeIdError::InvalidChar(_))));
        assert!(matches!(NodeId::new("x\"];"), Err(NodeIdError::InvalidChar(_))));
        assert!(matches!(NodeId::new("a".repeat(65)), Err(NodeIdError::TooLong(_))));
    }

    #[test]
    fn ident_replaces_hyphens() {
        assert_eq!(NodeId::new("http-req-1").unwrap().ident(), "http_req_1");
    }

    #[test]
    fn deserialize_rejects_bad_id() {
        let json = r#"{ "id": "bad id", "type": "response", "data": { "label": "r", "config": { "message": "hi" } } }"#;
        assert!(serde_json::from_str::<PluginNode>(json).is_err());
    }

    #[test]
    fn deserialize_unknown_kind_fails() {
        let json = r#"{ "id": "x", "type": "shell_exec", "data": { "label": "x", "config": {} } }"#;
        assert!(serde_json::from_str::<PluginNode>(json).is_err());
    }

    #[test]
    fn deserialize_response_node() {
        let json = r#"{ "id": "resp-1", "type": "response", "data": { "label": "Reply", "config": { "message": "Hello!" } } }"#;
        let node: PluginNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.id().as_str(), "resp-1");
        assert_eq!(node.node_type(), "response");
        assert_eq!(node.label(), "Reply");
        assert!(node.is_response());
    }
}
