//! Lightweight `{variable}` substitution engine.
//!
//! # Syntax
//!
//! - `{name}` - Simple variable substitution
//! - `{user.name}` - Nested property access via dot notation
//! - `{items.0}` - Array index access
//! - `{{` and `}}` - Escaped braces (renders as `{` and `}`)
//!
//! Unknown variables are left in place as `{name}` so they are easy to spot in
//! the output. There are no loops, conditionals or filters; use
//! [`MiniJinjaEngine`](super::MiniJinjaEngine) for those.

use std::path::Path;

use serde_json::Value;

use super::{read_source, TemplateEngine};
use crate::attributes::RenderContext;
use crate::error::RenderError;

/// A template engine doing plain `{variable}` substitution.
///
/// # Example
///
/// ```rust
/// use viewkit::{RenderContext, SimpleEngine, TemplateEngine};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("status.txt");
/// std::fs::write(&path, "Status: {status}, owner: {user.name}").unwrap();
///
/// let data = viewkit::attributes::from_value(json!({
///     "status": "ok",
///     "user": {"name": "ana"},
/// })).unwrap();
/// let ctx = RenderContext::merge(&Default::default(), &data);
///
/// let output = SimpleEngine::new().evaluate(&path, &ctx).unwrap();
/// assert_eq!(output, "Status: ok, owner: ana");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleEngine;

impl SimpleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Substitutes variables in `source` from `context`.
    pub fn render_str(&self, source: &str, context: &RenderContext) -> Result<String, RenderError> {
        let mut result = String::with_capacity(source.len());
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    result.push('{');
                }
                '{' => {
                    let mut var_name = String::new();
                    let mut closed = false;

                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        var_name.push(inner);
                    }

                    if !closed {
                        return Err(RenderError::Evaluation(format!(
                            "unclosed variable substitution: {{{}",
                            var_name
                        )));
                    }

                    let var_name = var_name.trim();
                    if var_name.is_empty() {
                        return Err(RenderError::Evaluation(
                            "empty variable name in template".to_string(),
                        ));
                    }

                    match lookup(context, var_name) {
                        Some(value) => result.push_str(&format_value(value)),
                        None => {
                            result.push('{');
                            result.push_str(var_name);
                            result.push('}');
                        }
                    }
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    result.push('}');
                }
                other => result.push(other),
            }
        }

        Ok(result)
    }
}

impl TemplateEngine for SimpleEngine {
    fn evaluate(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError> {
        let source = read_source(path)?;
        self.render_str(&source, context)
    }
}

/// Resolves a dotted path: the first segment against the context, the rest
/// through nested objects and array indices.
fn lookup<'a>(context: &'a RenderContext, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = context.get(segments.next()?)?;

    for part in segments {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
