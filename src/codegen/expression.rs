//! Sanitizer for freeform boolean expressions (condition and while nodes).
//!
//! Users write expressions such as `{count} > 5 && {name} !== "bot"`. The
//! expression is tokenized and rebuilt from an allow-list: literals,
//! operators, parentheses, `.length`, and placeholders. Identifiers, calls,
//! property access and assignment are rejected, so the rebuilt text can only
//! read the variable map.

use super::interpolate::{js_string, placeholder_expression};

const MAX_EXPRESSION_LEN: usize = 1000;

const OPERATORS: &[&str] = &[
    "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "<", ">", "!", "+", "-", "*", "/", "%", "(",
    ")",
];

const KEYWORDS: &[&str] = &["true", "false", "null", "undefined"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,
    #[error("expression exceeds 1000 characters")]
    TooLong,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("'{0}' is not allowed; reference variables as {{name}}")]
    Identifier(String),
    #[error("invalid placeholder '{{{0}}}'")]
    Placeholder(String),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unbalanced parentheses")]
    UnbalancedParens,
}

/// Tokenize and rebuild `expr`, replacing placeholders with variable
/// lookups. Tokens are joined with single spaces.
pub fn sanitize_expression(expr: &str) -> Result<String, ExpressionError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(ExpressionError::Empty);
    }
    if trimmed.len() > MAX_EXPRESSION_LEN {
        return Err(ExpressionError::TooLong);
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut tokens: Vec<String> = Vec::new();
    let mut depth: i64 = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let number: String = chars[start..i].iter().collect();
            if number.parse::<f64>().is_err() {
                return Err(ExpressionError::UnexpectedChar { ch: '.', pos: i - 1 });
            }
            tokens.push(number);
            continue;
        }

        if c == '"' || c == '\'' {
            let (value, next) = read_string(&chars, i)?;
            tokens.push(js_string(&value));
            i = next;
            continue;
        }

        if c == '{' {
            let close = chars[i..]
                .iter()
                .position(|&ch| ch == '}')
                .map(|p| p + i)
                .ok_or(ExpressionError::UnexpectedChar { ch: '{', pos: i })?;
            let inner: String = chars[i + 1..close].iter().collect();
            let reference =
                placeholder_expression(&inner).ok_or(ExpressionError::Placeholder(inner))?;
            tokens.push(reference);
            i = close + 1;
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if !KEYWORDS.contains(&word.as_str()) {
                return Err(ExpressionError::Identifier(word));
            }
            tokens.push(word);
            continue;
        }

        if c == '.' {
            let rest: String = chars[i..].iter().take(7).collect();
            let follows_value = tokens
                .last()
                .is_some_and(|t| t.ends_with(']') || t.ends_with(')') || t.ends_with('"'));
            let boundary = chars
                .get(i + 7)
                .is_none_or(|ch| !(ch.is_ascii_alphanumeric() || *ch == '_'));
            if rest == ".length" && follows_value && boundary {
                // Attach to the previous token so `{items}.length` stays one operand.
                if let Some(last) = tokens.last_mut() {
                    last.push_str("?.length");
                }
                i += 7;
                continue;
            }
            return Err(ExpressionError::UnexpectedChar { ch: c, pos: i });
        }

        let rest: String = chars[i..].iter().take(3).collect();
        match OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            Some(op) => {
                match *op {
                    "(" => depth += 1,
                    ")" => {
                        depth -= 1;
                        if depth < 0 {
                            return Err(ExpressionError::UnbalancedParens);
                        }
                    }
                    _ => {}
                }
                tokens.push((*op).to_string());
                i += op.chars().count();
            }
            None => return Err(ExpressionError::UnexpectedChar { ch: c, pos: i }),
        }
    }

    if depth != 0 {
        return Err(ExpressionError::UnbalancedParens);
    }

    Ok(tokens.join(" "))
}

/// Read a quoted string starting at `start`; returns the unescaped value
/// and the index after the closing quote.
fn read_string(chars: &[char], start: usize) -> Result<(String, usize), ExpressionError> {
    let quote = chars[start];
    let mut value = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let escaped = chars.get(i + 1).ok_or(ExpressionError::UnterminatedString)?;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => *other,
                });
                i += 2;
            }
            c if c == quote => return Ok((value, i + 1)),
            c => {
                value.push(c);
                i += 1;
            }
        }
    }
    Err(ExpressionError::UnterminatedString)
}
