//! The mixin definition registry.

use rustc_hash::FxHashMap;

use crate::def::MixinDef;
use crate::error::MixinError;
use crate::generate;
use crate::params::ParameterSet;
use crate::result::MixinResult;

/// A lookup table of mixin definitions, keyed by name.
///
/// Populated once at load time and read-only afterwards: generation takes
/// `&self`, builds a fresh result per call, and shares no mutable state
/// across calls, so a registry behind an `Arc` can serve concurrent
/// generations without locking.
#[derive(Clone, Debug, Default)]
pub struct MixinRegistry {
    defs: FxHashMap<String, MixinDef>,
}

impl MixinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its own name, replacing any previous
    /// definition of that name.
    pub fn register(&mut self, def: MixinDef) {
        self.defs.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&MixinDef> {
        self.defs.get(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Load a registry from a JSON array of definitions.
    pub fn from_json(source: &str) -> Result<Self, MixinError> {
        let defs: Vec<MixinDef> =
            serde_json::from_str(source).map_err(|err| MixinError::InvalidDefinition {
                detail: err.to_string(),
            })?;
        let mut registry = Self::new();
        for def in defs {
            registry.register(def);
        }
        Ok(registry)
    }

    /// Generate the named mixin against a parameter set.
    ///
    /// Fails with [`MixinError::UnknownMixin`] when the name is not
    /// registered. For a fixed name and fixed values of every key in the
    /// returned result's used set, repeated calls produce structurally
    /// identical results.
    pub fn generate(
        &self,
        name: &str,
        params: &ParameterSet,
    ) -> Result<MixinResult, MixinError> {
        generate::generate(self, name, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::MixinItem;

    #[test]
    fn unknown_name_fails() {
        let registry = MixinRegistry::new();
        let err = registry
            .generate("Missing", &ParameterSet::new())
            .unwrap_err();
        assert_eq!(
            err,
            MixinError::UnknownMixin {
                name: "Missing".into()
            }
        );
    }

    #[test]
    fn register_replaces_by_name() {
        let mut registry = MixinRegistry::new();
        registry.register(MixinDef::new("M", vec![MixinItem::Fragment("A".into())]));
        registry.register(MixinDef::new("M", vec![MixinItem::Fragment("B".into())]));
        assert_eq!(registry.len(), 1);
        let result = registry.generate("M", &ParameterSet::new()).unwrap();
        assert_eq!(result.mixins, ["B"]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = MixinRegistry::from_json("{not json").unwrap_err();
        assert!(matches!(err, MixinError::InvalidDefinition { .. }));
    }
}
