//! Static denylist scan applied to compiled bodies before registration.
//!
//! This is a textual check, not a capability sandbox. The generator only
//! emits from closed templates with escaped user text; the gate is the last
//! check on bodies that may have come from elsewhere.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum SandboxViolation {
    #[error("module loading via require()")]
    Require,
    #[error("static module import")]
    Import,
    #[error("dynamic import()")]
    DynamicImport,
    #[error("process.exit")]
    ProcessExit,
    #[error("__dirname access")]
    Dirname,
    #[error("__filename access")]
    Filename,
    #[error("child_process access")]
    ChildProcess,
    #[error("eval()")]
    Eval,
    #[error("new Function()")]
    FunctionConstructor,
    #[error("assignment to a global")]
    GlobalAssignment,
}

const RULES: &[(SandboxViolation, &str)] = &[
    (SandboxViolation::Require, r"\brequire\s*\("),
    (SandboxViolation::Import, r"\bimport\s[^;\n]*\bfrom\b"),
    (SandboxViolation::DynamicImport, r"\bimport\s*\("),
    (SandboxViolation::ProcessExit, r"\bprocess\s*\.\s*exit\b"),
    (SandboxViolation::Dirname, r"__dirname"),
    (SandboxViolation::Filename, r"__filename"),
    (SandboxViolation::ChildProcess, r"child_process"),
    (SandboxViolation::Eval, r"\beval\s*\("),
    (SandboxViolation::FunctionConstructor, r"\bnew\s+Function\s*\("),
    (
        SandboxViolation::GlobalAssignment,
        r"\b(?:global|globalThis)\s*\.\s*[A-Za-z_$][\w$]*\s*=(?:[^=]|$)",
    ),
];

static DENYLIST: Lazy<Vec<(SandboxViolation, Regex)>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|(violation, pattern)| {
            (
                *violation,
                Regex::new(pattern).expect("denylist patterns are valid"),
            )
        })
        .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxGate;

impl SandboxGate {
    pub fn new() -> Self {
        SandboxGate
    }

    /// The first denylisted pattern found in `body`, in rule order.
    pub fn scan(&self, body: &str) -> Result<(), SandboxViolation> {
        match DENYLIST.iter().find(|(_, re)| re.is_match(body)) {
            Some((violation, _)) => Err(*violation),
            None => Ok(()),
        }
    }

    /// Every denylisted pattern found in `body`.
    pub fn violations(&self, body: &str) -> Vec<SandboxViolation> {
        DENYLIST
            .iter()
            .filter(|(_, re)| re.is_match(body))
            .map(|(violation, _)| *violation)
            .collect()
    }
}
