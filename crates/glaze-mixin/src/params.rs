//! Parameter sets.

use rustc_hash::FxHashMap;

use crate::error::MixinError;
use crate::key::{ParamKey, Value};

/// A mapping from parameter-key identity to value.
///
/// Insertion order is irrelevant and keys are unique. Assignment is
/// kind-checked against the key's declared kind; lookups fall back to the
/// key's default when no value was set. Read-tracking is not the set's
/// concern: the generation context records consulted keys into the
/// result's used set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: FxHashMap<ParamKey, Value>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value to a key.
    ///
    /// Fails with [`MixinError::InvalidParameterValue`] when the value's
    /// kind does not match the key's declared kind; the set is unchanged in
    /// that case.
    pub fn set(&mut self, key: &ParamKey, value: Value) -> Result<(), MixinError> {
        if value.kind() != key.kind() {
            return Err(MixinError::InvalidParameterValue {
                key: key.to_string(),
                expected: key.kind(),
                found: value.kind(),
            });
        }
        self.values.insert(key.clone(), value);
        Ok(())
    }

    /// The value assigned to `key`, or the key's default when unset.
    pub fn get(&self, key: &ParamKey) -> Value {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.default_value().clone())
    }

    /// The assigned value only; `None` when the key was never set.
    pub fn lookup(&self, key: &ParamKey) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether a value was assigned to `key`.
    pub fn contains(&self, key: &ParamKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy every entry of `other` into this set.
    pub fn merge(&mut self, other: &ParameterSet) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &Value)> {
        self.values.iter()
    }

    /// Record an observed value without kind-checking. Used for read
    /// tracking, where the value always came from a matching key.
    pub(crate) fn record(&mut self, key: ParamKey, value: Value) {
        self.values.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ValueKind;

    fn flag() -> ParamKey {
        ParamKey::new("flag", Value::Bool(false))
    }

    #[test]
    fn get_falls_back_to_default() {
        let params = ParameterSet::new();
        assert_eq!(params.get(&flag()), Value::Bool(false));
        assert!(!params.contains(&flag()));
    }

    #[test]
    fn set_then_get() {
        let mut params = ParameterSet::new();
        params.set(&flag(), Value::Bool(true)).unwrap();
        assert_eq!(params.get(&flag()), Value::Bool(true));
        assert!(params.contains(&flag()));
    }

    #[test]
    fn set_rejects_kind_mismatch() {
        let mut params = ParameterSet::new();
        let err = params.set(&flag(), Value::Int(3)).unwrap_err();
        assert_eq!(
            err,
            MixinError::InvalidParameterValue {
                key: "flag".into(),
                expected: ValueKind::Bool,
                found: ValueKind::Int,
            }
        );
        // The failed assignment left no trace.
        assert!(!params.contains(&flag()));
    }

    #[test]
    fn composed_keys_do_not_collide() {
        let base = flag();
        let mut params = ParameterSet::new();
        params.set(&base.compose("a"), Value::Bool(true)).unwrap();
        params.set(&base.compose("b"), Value::Bool(false)).unwrap();
        assert_eq!(params.get(&base.compose("a")), Value::Bool(true));
        assert_eq!(params.get(&base.compose("b")), Value::Bool(false));
        assert_eq!(params.get(&base), Value::Bool(false));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn merge_overwrites_existing_entries() {
        let mut a = ParameterSet::new();
        a.set(&flag(), Value::Bool(false)).unwrap();
        let mut b = ParameterSet::new();
        b.set(&flag(), Value::Bool(true)).unwrap();
        a.merge(&b);
        assert_eq!(a.get(&flag()), Value::Bool(true));
    }
}
