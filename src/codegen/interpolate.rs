//! Template interpolation and JavaScript string escaping.
//!
//! Every piece of end-user text that reaches generated code passes through
//! this module. Text outside placeholders is always emitted inside a string
//! or template literal with its delimiters escaped; placeholders become
//! lookups into the per-invocation `variables` map and nothing else.
//!
//! Placeholder grammar:
//!
//! ```text
//! {name}          name  = [A-Za-z_][A-Za-z0-9_]*
//! {name[0]}       index = [0-9]+
//! {name[other]}   index = another variable name
//! ```
//!
//! Anything else between braces is literal text.

/// The name of the per-invocation variable map in generated code.
pub const VARIABLES: &str = "variables";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderIndex {
    Position(u64),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Lit(String),
    Placeholder {
        name: String,
        index: Option<PlaceholderIndex>,
    },
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split a template into literal runs and placeholders.
pub fn parse_template(template: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut lit = String::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        lit.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| {
            parse_placeholder(&after[..close]).map(|p| (p, close))
        }) {
            Some((placeholder, close)) => {
                if !lit.is_empty() {
                    parts.push(TemplatePart::Lit(std::mem::take(&mut lit)));
                }
                parts.push(placeholder);
                rest = &after[close + 1..];
            }
            None => {
                lit.push('{');
                rest = after;
            }
        }
    }
    lit.push_str(rest);
    if !lit.is_empty() {
        parts.push(TemplatePart::Lit(lit));
    }
    parts
}

fn parse_placeholder(inner: &str) -> Option<TemplatePart> {
    let (name, index) = match inner.find('[') {
        Some(open) => {
            let idx = inner[open + 1..].strip_suffix(']')?;
            (&inner[..open], Some(parse_index(idx)?))
        }
        None => (inner, None),
    };
    if !is_identifier(name) {
        return None;
    }
    Some(TemplatePart::Placeholder {
        name: name.to_string(),
        index,
    })
}

fn parse_index(idx: &str) -> Option<PlaceholderIndex> {
    if !idx.is_empty() && idx.chars().all(|c| c.is_ascii_digit()) {
        return idx.parse().ok().map(PlaceholderIndex::Position);
    }
    if is_identifier(idx) {
        return Some(PlaceholderIndex::Variable(idx.to_string()));
    }
    None
}

/// `variables["name"]`
pub fn var_ref(name: &str) -> String {
    format!("{}[{}]", VARIABLES, js_string(name))
}

fn placeholder_ref(name: &str, index: &Option<PlaceholderIndex>) -> String {
    match index {
        None => var_ref(name),
        Some(PlaceholderIndex::Position(i)) => format!("{}?.[{}]", var_ref(name), i),
        Some(PlaceholderIndex::Variable(v)) => format!("{}?.[{}]", var_ref(name), var_ref(v)),
    }
}

/// Interpolate a template into a JavaScript string expression.
///
/// Without placeholders the result is a double-quoted literal whose content
/// is the input text (escaped); with placeholders it is a template literal.
pub fn interpolate(template: &str) -> String {
    let parts = parse_template(template);
    if !parts
        .iter()
        .any(|p| matches!(p, TemplatePart::Placeholder { .. }))
    {
        return js_string(template);
    }

    let mut out = String::from("`");
    for part in &parts {
        match part {
            TemplatePart::Lit(text) => out.push_str(&escape_template_text(text)),
            TemplatePart::Placeholder { name, index } => {
                out.push_str("${");
                out.push_str(&placeholder_ref(name, index));
                out.push_str(" ?? \"\"}");
            }
        }
    }
    out.push('`');
    out
}

/// Like [`interpolate`], but a template that is exactly one placeholder
/// yields the raw reference so numbers, arrays and objects keep their type.
pub fn interpolate_value(template: &str) -> String {
    let parts = parse_template(template.trim());
    match parts.as_slice() {
        [TemplatePart::Placeholder { name, index }] => placeholder_ref(name, index),
        _ => interpolate(template),
    }
}

/// An operand for comparisons and arithmetic: a lone placeholder stays a
/// reference, a finite number becomes a number literal, anything else is
/// interpolated text.
pub fn operand(text: &str) -> String {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
            return format!("{}", n);
        }
    }
    interpolate_value(text)
}

/// Rewrite placeholders to variable references inside an already
/// tokenized expression. Used by the expression sanitizer.
pub(crate) fn placeholder_expression(inner: &str) -> Option<String> {
    match parse_placeholder(inner)? {
        TemplatePart::Placeholder { name, index } => Some(placeholder_ref(&name, &index)),
        TemplatePart::Lit(_) => None,
    }
}

/// Escape text for the inside of a JavaScript template literal.
pub fn escape_template_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// A double-quoted JavaScript string literal.
pub fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Make user text safe for a `//` line comment.
pub fn comment_text(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() || c == '\u{2028}' || c == '\u{2029}' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
