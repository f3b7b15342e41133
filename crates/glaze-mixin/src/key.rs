//! Typed parameter keys.
//!
//! A key's identity is the full `(name, discriminator, declared kind,
//! default)` tuple: two keys with the same name but different defaults are
//! distinct. [`ParamKey::compose`] scopes a key by a discriminator string
//! so an array of sub-mixins can address per-element parameters without
//! collision; composed keys built from the same base are distinct exactly
//! when their discriminators differ.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// The declared value type of a parameter key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Int => write!(f, "int"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::String => write!(f, "string"),
        }
    }
}

/// A parameter value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f64),
    String(String),
}

impl Value {
    /// The kind this value carries.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }
}

// Floats compare and hash by bit pattern so values can serve as map keys
// inside `ParamKey` defaults.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Bool(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::String(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

/// A typed, named parameter key with a default value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamKey {
    name: String,
    /// Composition scope; `None` for a base key.
    #[serde(default)]
    discriminator: Option<String>,
    default: Value,
}

impl ParamKey {
    /// A base key. The declared kind is the kind of the default value.
    pub fn new(name: impl Into<String>, default: Value) -> Self {
        ParamKey {
            name: name.into(),
            discriminator: None,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref()
    }

    /// The declared value kind.
    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Scope this key by a discriminator. Composing an already-composed key
    /// appends the new segment, outermost scope first.
    pub fn compose(&self, discriminator: &str) -> ParamKey {
        let discriminator = match &self.discriminator {
            Some(existing) => format!("{existing}.{discriminator}"),
            None => discriminator.to_string(),
        };
        ParamKey {
            name: self.name.clone(),
            discriminator: Some(discriminator),
            default: self.default.clone(),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.discriminator {
            Some(d) => write!(f, "{}.{}", self.name, d),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_keys_are_distinct_by_discriminator() {
        let base = ParamKey::new("UseComputeColor2", Value::Bool(false));
        let a = base.compose("SubCompute1");
        let b = base.compose("SubCompute2");
        assert_ne!(a, b);
        assert_eq!(a, base.compose("SubCompute1"));
        assert_ne!(a, base);
    }

    #[test]
    fn compose_appends_segments() {
        let base = ParamKey::new("Color", Value::Int(0));
        let nested = base.compose("SubComputes[0]").compose("ColorRedirect");
        assert_eq!(nested.discriminator(), Some("SubComputes[0].ColorRedirect"));
        assert_eq!(nested.to_string(), "Color.SubComputes[0].ColorRedirect");
    }

    #[test]
    fn identity_includes_default() {
        let a = ParamKey::new("count", Value::Int(0));
        let b = ParamKey::new("count", Value::Int(1));
        assert_ne!(a, b);
    }

    #[test]
    fn kind_follows_default() {
        assert_eq!(ParamKey::new("flag", Value::Bool(true)).kind(), ValueKind::Bool);
        assert_eq!(
            ParamKey::new("name", Value::String("x".into())).kind(),
            ValueKind::String
        );
    }

    #[test]
    fn float_values_are_hashable_and_comparable() {
        assert_eq!(Value::Float(1.5), Value::Float(1.5));
        assert_ne!(Value::Float(1.5), Value::Float(2.5));
        assert_ne!(Value::Float(1.0), Value::Int(1));
    }
}
