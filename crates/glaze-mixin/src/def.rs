//! Declarative mixin definitions.
//!
//! A definition is pure data: the engine walks it, the registry stores it,
//! and external tooling ships it as JSON. Conditions reference parameter
//! keys directly; at generation time every referenced key is read under
//! the current composition scope and recorded as used.

use serde::{Deserialize, Serialize};

use crate::key::{ParamKey, Value};

/// A named, composable mixin definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixinDef {
    pub name: String,
    pub items: Vec<MixinItem>,
}

impl MixinDef {
    pub fn new(name: impl Into<String>, items: Vec<MixinItem>) -> Self {
        MixinDef {
            name: name.into(),
            items,
        }
    }
}

/// One contribution inside a mixin definition, applied in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MixinItem {
    /// Contribute a shader fragment by name, without registry lookup.
    Fragment(String),
    /// Apply a mixin by name. A registered definition is applied inline
    /// (inheritance-like flattening); an unregistered name degrades to a
    /// plain fragment.
    Mixin(String),
    /// A parameter-driven branch.
    If {
        cond: Condition,
        #[serde(default)]
        then_items: Vec<MixinItem>,
        #[serde(default)]
        else_items: Vec<MixinItem>,
    },
    /// A named composition slot, generated under its own scope.
    Compose { slot: String, items: Vec<MixinItem> },
    /// An array-valued composition slot; element `i` is generated under
    /// the scope `slot[i]`.
    ComposeArray {
        slot: String,
        count: ArrayCount,
        items: Vec<MixinItem>,
    },
    /// A macro substitution binding. Later bindings of the same name
    /// overwrite earlier ones.
    Macro { name: String, source: MacroSource },
}

/// How many elements an array-valued composition slot has.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArrayCount {
    Fixed(usize),
    /// Read the element count from an `Int` key; the read is recorded as
    /// used like any other.
    Key(ParamKey),
}

/// Where a macro's substitution value comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MacroSource {
    /// A literal value baked into the definition.
    Value(Value),
    /// The value of a parameter key at generation time.
    Key(ParamKey),
}

/// A branch condition over parameter keys.
///
/// Evaluation consults every referenced key without short-circuiting, so
/// the used set reflects each of them regardless of the outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// A boolean key holds `true`.
    Flag(ParamKey),
    /// A key's value equals the literal.
    Equals(ParamKey, Value),
    Not(Box<Condition>),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_round_trip_through_json() {
        let def = MixinDef::new(
            "Lit",
            vec![
                MixinItem::Mixin("Base".into()),
                MixinItem::If {
                    cond: Condition::Flag(ParamKey::new("UseFog", Value::Bool(false))),
                    then_items: vec![MixinItem::Fragment("Fog".into())],
                    else_items: vec![],
                },
                MixinItem::Macro {
                    name: "LIGHT_COUNT".into(),
                    source: MacroSource::Key(ParamKey::new("LightCount", Value::Int(1))),
                },
            ],
        );
        let json = serde_json::to_string(&def).unwrap();
        let back: MixinDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
