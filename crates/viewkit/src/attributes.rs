//! Default attributes and per-call render contexts.
//!
//! A [`Renderer`](crate::Renderer) owns a set of default [`Attributes`]. Every
//! render merges those defaults with the data supplied by the caller into a
//! [`RenderContext`], which is what the template engine actually sees:
//!
//! ```rust
//! use viewkit::{Attributes, RenderContext};
//! use serde_json::json;
//!
//! let defaults = viewkit::attributes::from_value(json!({"x": 1, "y": 2})).unwrap();
//! let data = viewkit::attributes::from_value(json!({"y": 3})).unwrap();
//!
//! let ctx = RenderContext::merge(&defaults, &data);
//! assert_eq!(ctx.get("x"), Some(&json!(1)));
//! assert_eq!(ctx.get("y"), Some(&json!(3)));
//! ```
//!
//! The key `template` is reserved. See [`ensure_unreserved`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RenderError;

/// Key that may never appear in call data.
pub const RESERVED_KEY: &str = "template";

/// Mapping from attribute name to an arbitrary value.
pub type Attributes = Map<String, Value>;

/// Converts any serializable value into an [`Attributes`] mapping.
///
/// `null` converts to an empty mapping. Anything other than an object or
/// `null` is rejected with [`RenderError::Config`].
pub fn from_serialize<T: Serialize>(data: &T) -> Result<Attributes, RenderError> {
    from_value(serde_json::to_value(data)?)
}

/// Converts a JSON value into an [`Attributes`] mapping.
pub fn from_value(value: Value) -> Result<Attributes, RenderError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Attributes::new()),
        other => Err(RenderError::Config(format!(
            "attributes must be a mapping, got {}",
            kind_of(&other)
        ))),
    }
}

/// Fails with [`RenderError::DuplicateTemplateKey`] if `data` holds the reserved key.
///
/// Presence alone counts: a `null` value under `template` is still rejected.
pub fn ensure_unreserved(data: &Attributes) -> Result<(), RenderError> {
    if data.contains_key(RESERVED_KEY) {
        return Err(RenderError::DuplicateTemplateKey);
    }
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// The merged variables exposed to a template during one render.
///
/// Built fresh for every call and dropped when the call returns. Names in the
/// context are referenceable inside the template by that name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    vars: Attributes,
}

impl RenderContext {
    /// Overlays `data` on top of `defaults`. Keys from `data` win.
    pub fn merge(defaults: &Attributes, data: &Attributes) -> Self {
        let mut vars = defaults.clone();
        for (key, value) in data {
            vars.insert(key.clone(), value.clone());
        }
        Self { vars }
    }

    /// Looks up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Returns true if the context defines `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Borrows the underlying mapping.
    pub fn as_map(&self) -> &Attributes {
        &self.vars
    }

    /// Returns the context as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.vars.clone())
    }
}

impl Serialize for RenderContext {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.vars.serialize(serializer)
    }
}
