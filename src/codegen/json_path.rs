//! JSON path parsing for `json:extract`.
//!
//! Accepts `a.b.c`, `items[0]`, `a["key-with-dash"]` and mixtures. Paths
//! longer than the configured ceiling parse to nothing; a malformed bracket
//! stops consumption and keeps the steps read so far. Extraction is emitted
//! as optional chaining so a missing intermediate yields `undefined`.

use serde::Serialize;

use super::interpolate::js_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PathStep {
    Property(String),
    Index(u64),
}

pub fn parse_json_path(path: &str, max_len: usize) -> Vec<PathStep> {
    let mut steps = Vec::new();
    if path.len() > max_len {
        return steps;
    }

    let chars: Vec<char> = path.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '.' => i += 1,
            '[' => match read_bracket(&chars, i) {
                Some((step, next)) => {
                    steps.push(step);
                    i = next;
                }
                None => break,
            },
            _ => {
                let start = i;
                while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                    i += 1;
                }
                steps.push(PathStep::Property(chars[start..i].iter().collect()));
            }
        }
    }

    steps
}

/// Parse `[0]`, `["key"]` or `['key']` starting at the `[`.
fn read_bracket(chars: &[char], open: usize) -> Option<(PathStep, usize)> {
    let mut i = open + 1;
    match *chars.get(i)? {
        quote @ ('"' | '\'') => {
            i += 1;
            let mut key = String::new();
            loop {
                match *chars.get(i)? {
                    '\\' => {
                        key.push(*chars.get(i + 1)?);
                        i += 2;
                    }
                    c if c == quote => break,
                    c => {
                        key.push(c);
                        i += 1;
                    }
                }
            }
            if *chars.get(i + 1)? != ']' {
                return None;
            }
            Some((PathStep::Property(key), i + 2))
        }
        _ => {
            let start = i;
            while chars.get(i)?.is_ascii_digit() {
                i += 1;
            }
            if i == start || chars[i] != ']' {
                return None;
            }
            let index: String = chars[start..i].iter().collect();
            Some((PathStep::Index(index.parse().ok()?), i + 1))
        }
    }
}

/// `base?.["a"]?.[0]` for the given steps.
pub fn emit_path_access(base: &str, steps: &[PathStep]) -> String {
    let mut out = base.to_string();
    for step in steps {
        match step {
            PathStep::Property(name) => {
                out.push_str("?.[");
                out.push_str(&js_string(name));
                out.push(']');
            }
            PathStep::Index(i) => {
                out.push_str(&format!("?.[{}]", i));
            }
        }
    }
    out
}
