//! The per-generation output artifact.

use std::collections::BTreeMap;
use std::fmt;

use crate::key::Value;
use crate::params::ParameterSet;

/// The output of one mixin generation. Immutable once returned; a new call
/// always builds a fresh result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MixinResult {
    /// Ordered contributing fragment names, deduplicated; the first
    /// occurrence wins.
    pub mixins: Vec<String>,
    /// Named composition slots and the results that fill them.
    pub compositions: BTreeMap<String, Composition>,
    /// Macro substitutions by macro name.
    pub macros: BTreeMap<String, Value>,
    /// Every parameter consulted while building this result, fully scoped,
    /// with the value observed at read time. Transitive reads from nested
    /// compositions are included.
    pub used_parameters: ParameterSet,
}

/// What fills a composition slot.
#[derive(Clone, Debug, PartialEq)]
pub enum Composition {
    Single(MixinResult),
    Array(Vec<MixinResult>),
}

impl MixinResult {
    /// Append a fragment name, keeping the list deduplicated.
    pub(crate) fn push_mixin(&mut self, name: &str) {
        if !self.mixins.iter().any(|m| m == name) {
            self.mixins.push(name.to_string());
        }
    }
}

impl fmt::Display for MixinResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mixin ")?;
        for (i, name) in self.mixins.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
        }
        if !self.compositions.is_empty() {
            write!(f, " [{{")?;
            for (i, (slot, comp)) in self.compositions.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} = {}", slot, comp)?;
            }
            write!(f, "}}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composition::Single(result) => write!(f, "{}", result),
            Composition::Array(elems) => {
                write!(f, "[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_mixin_deduplicates_keeping_first() {
        let mut result = MixinResult::default();
        result.push_mixin("A");
        result.push_mixin("B");
        result.push_mixin("A");
        assert_eq!(result.mixins, ["A", "B"]);
    }

    #[test]
    fn display_renders_fragments_and_compositions() {
        let mut inner = MixinResult::default();
        inner.push_mixin("ComputeColor2");

        let mut outer = MixinResult::default();
        outer.push_mixin("ComputeColorRedirect");
        outer
            .compositions
            .insert("ColorRedirect".into(), Composition::Single(inner));

        assert_eq!(
            outer.to_string(),
            "mixin ComputeColorRedirect [{ColorRedirect = mixin ComputeColor2}]"
        );

        let array = Composition::Array(vec![outer]);
        assert_eq!(
            array.to_string(),
            "[mixin ComputeColorRedirect [{ColorRedirect = mixin ComputeColor2}]]"
        );
    }
}
