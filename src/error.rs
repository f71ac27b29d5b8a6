//! Error type shared by parsing, validation, compilation and registration.
//!
//! Every error carries a stable code (`P001`, `V003`, `N007`, `X004`, `C001`,
//! `R001`, ...) so the editor can key messages and highlights on it; the
//! message is for humans and may change.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Parse,
    Validate,
    Compile,
    Register,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Parse => "Parse",
            Phase::Validate => "Validate",
            Phase::Compile => "Compile",
            Phase::Register => "Register",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("[{phase}:{code}] {message}{}", node_suffix(.node_id))]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    /// The node the error is attached to, when there is one.
    pub node_id: Option<String>,
}

fn node_suffix(node_id: &Option<String>) -> String {
    node_id
        .as_ref()
        .map(|id| format!(" (node '{}')", id))
        .unwrap_or_default()
}

impl CompilerError {
    fn new(phase: Phase, code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase,
            message: message.into(),
            node_id,
        }
    }

    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        Self::new(Phase::Parse, code, message, None)
    }

    pub fn validate(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Self::new(Phase::Validate, code, message, node_id)
    }

    pub fn compile(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Self::new(Phase::Compile, code, message, node_id)
    }

    pub fn register(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Self::new(Phase::Register, code, message, node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_node() {
        let err = CompilerError::validate("N002", "HTTP request URL must not be empty", Some("fetch".into()));
        assert_eq!(
            err.to_string(),
            "[Validate:N002] HTTP request URL must not be empty (node 'fetch')"
        );
        assert_eq!(
            CompilerError::parse("P001", "bad json").to_string(),
            "[Parse:P001] bad json"
        );
    }
}
