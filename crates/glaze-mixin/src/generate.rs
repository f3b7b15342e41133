//! The composition engine.
//!
//! One generation call walks a definition top to bottom, holding the
//! read-only registry and parameter set plus a stack of composition
//! discriminators. Parameter reads resolve through the current scope, fall
//! back to the key's default, and are recorded with the observed value into
//! the result being built. Nested compositions run with their own result
//! and merge their used sets upward, so the top-level result reflects every
//! transitively-consulted key.

use crate::def::{ArrayCount, Condition, MacroSource, MixinItem};
use crate::error::MixinError;
use crate::key::{ParamKey, Value};
use crate::params::ParameterSet;
use crate::registry::MixinRegistry;
use crate::result::{Composition, MixinResult};

pub(crate) fn generate(
    registry: &MixinRegistry,
    name: &str,
    params: &ParameterSet,
) -> Result<MixinResult, MixinError> {
    let def = registry.get(name).ok_or_else(|| MixinError::UnknownMixin {
        name: name.to_string(),
    })?;
    let mut ctx = GenContext {
        registry,
        params,
        path: Vec::new(),
    };
    let mut result = MixinResult::default();
    ctx.apply_items(&def.items, &mut result)?;
    Ok(result)
}

/// Per-call generation state.
struct GenContext<'a> {
    registry: &'a MixinRegistry,
    params: &'a ParameterSet,
    /// Composition discriminators, outermost first.
    path: Vec<String>,
}

impl GenContext<'_> {
    fn apply_items(
        &mut self,
        items: &[MixinItem],
        out: &mut MixinResult,
    ) -> Result<(), MixinError> {
        for item in items {
            match item {
                MixinItem::Fragment(name) => out.push_mixin(name),
                MixinItem::Mixin(name) => self.apply_mixin(name, out)?,
                MixinItem::If {
                    cond,
                    then_items,
                    else_items,
                } => {
                    let branch = if self.eval(cond, out) {
                        then_items
                    } else {
                        else_items
                    };
                    self.apply_items(branch, out)?;
                }
                MixinItem::Compose { slot, items } => {
                    let nested = self.generate_nested(slot.clone(), items, out)?;
                    bind_composition(slot, Composition::Single(nested), out)?;
                }
                MixinItem::ComposeArray { slot, count, items } => {
                    let count = self.array_count(count, out)?;
                    let mut elems = Vec::with_capacity(count);
                    for i in 0..count {
                        let nested =
                            self.generate_nested(format!("{slot}[{i}]"), items, out)?;
                        elems.push(nested);
                    }
                    bind_composition(slot, Composition::Array(elems), out)?;
                }
                MixinItem::Macro { name, source } => {
                    let value = match source {
                        MacroSource::Value(value) => value.clone(),
                        MacroSource::Key(key) => self.read(key, out),
                    };
                    out.macros.insert(name.clone(), value);
                }
            }
        }
        Ok(())
    }

    /// Apply a mixin reference: registered definitions are flattened
    /// inline, unregistered names contribute a plain fragment.
    fn apply_mixin(&mut self, name: &str, out: &mut MixinResult) -> Result<(), MixinError> {
        match self.registry.get(name) {
            Some(def) => self.apply_items(&def.items, out),
            None => {
                out.push_mixin(name);
                Ok(())
            }
        }
    }

    /// Generate a nested composition under an extra scope segment and
    /// surface its reads in the parent's used set.
    fn generate_nested(
        &mut self,
        segment: String,
        items: &[MixinItem],
        out: &mut MixinResult,
    ) -> Result<MixinResult, MixinError> {
        self.path.push(segment);
        let mut nested = MixinResult::default();
        let applied = self.apply_items(items, &mut nested);
        self.path.pop();
        applied?;
        out.used_parameters.merge(&nested.used_parameters);
        Ok(nested)
    }

    /// Evaluate a condition. Every referenced key is read, and therefore
    /// recorded, regardless of the outcome.
    fn eval(&self, cond: &Condition, out: &mut MixinResult) -> bool {
        match cond {
            Condition::Flag(key) => self.read(key, out) == Value::Bool(true),
            Condition::Equals(key, value) => self.read(key, out) == *value,
            Condition::Not(inner) => !self.eval(inner, out),
            // Folds evaluate every element, so `All`/`Any` never skip a read.
            Condition::All(conds) => conds.iter().fold(true, |acc, c| self.eval(c, out) && acc),
            Condition::Any(conds) => conds.iter().fold(false, |acc, c| self.eval(c, out) || acc),
        }
    }

    fn array_count(
        &self,
        count: &ArrayCount,
        out: &mut MixinResult,
    ) -> Result<usize, MixinError> {
        match count {
            ArrayCount::Fixed(n) => Ok(*n),
            ArrayCount::Key(key) => match self.read(key, out) {
                Value::Int(n) => Ok(n.max(0) as usize),
                other => Err(MixinError::InvalidDefinition {
                    detail: format!(
                        "array count key `{}` holds a {} value, expected int",
                        key,
                        other.kind()
                    ),
                }),
            },
        }
    }

    /// Read a key under the current composition scope, recording the
    /// observed value into the result's used set.
    fn read(&self, key: &ParamKey, out: &mut MixinResult) -> Value {
        let key = self.scoped(key);
        let value = self.params.get(&key);
        out.used_parameters.record(key, value.clone());
        value
    }

    fn scoped(&self, key: &ParamKey) -> ParamKey {
        if self.path.is_empty() {
            key.clone()
        } else {
            key.compose(&self.path.join("."))
        }
    }
}

fn bind_composition(
    slot: &str,
    comp: Composition,
    out: &mut MixinResult,
) -> Result<(), MixinError> {
    if out.compositions.contains_key(slot) {
        return Err(MixinError::DuplicateCompositionKey {
            slot: slot.to_string(),
        });
    }
    out.compositions.insert(slot.to_string(), comp);
    Ok(())
}
