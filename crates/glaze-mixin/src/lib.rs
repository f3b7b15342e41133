//! Glaze mixin composition: assembling shader programs from named,
//! parameterized source fragments.
//!
//! A mixin definition describes the fragments a shader permutation is built
//! from: unconditional pieces, parameter-driven branches, named composition
//! slots filled by generating other mixins, and macro substitutions. One
//! generation call resolves a definition against a [`ParameterSet`] into an
//! immutable [`MixinResult`].
//!
//! Every parameter consulted along the way is recorded, fully scoped, into
//! the result's used set. Two generations of the same mixin whose parameter
//! sets agree on every key in the first run's used set produce structurally
//! identical results, which is what lets an external cache memoize by a
//! minimized parameter fingerprint instead of the full set.
//!
//! Generation is synchronous and holds no shared mutable state: the
//! registry is read-only after load and each call builds a fresh result, so
//! concurrent callers may safely coalesce calls with equal fingerprints.
//!
//! # Architecture
//!
//! - [`key`]: typed parameter keys with defaults and discriminator scoping
//! - [`params`]: parameter sets with kind-checked assignment
//! - [`def`]: declarative, JSON-loadable mixin definitions
//! - [`registry`]: the read-only definition lookup table
//! - [`result`]: the per-generation output artifact
//! - [`error`]: the closed failure taxonomy

pub mod def;
pub mod error;
mod generate;
pub mod key;
pub mod params;
pub mod registry;
pub mod result;

pub use def::{ArrayCount, Condition, MacroSource, MixinDef, MixinItem};
pub use error::MixinError;
pub use key::{ParamKey, Value, ValueKind};
pub use params::ParameterSet;
pub use registry::MixinRegistry;
pub use result::{Composition, MixinResult};
