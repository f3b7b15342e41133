//! Per-node type annotations.
//!
//! Every expression carries a `TypeInference` record populated by a prior
//! type-resolution phase: `target` is the type computed bottom-up for the
//! node itself, `expected` is an optional constraint pushed top-down from
//! the surrounding context (assignment target, declared variable type,
//! function return type, call-argument parameter type). Either side may be
//! absent; an unresolved node is passed through the middle-end unchanged.

use serde::Serialize;

use crate::ty::Ty;

/// Type annotation attached to every expression node.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TypeInference {
    /// The type computed for the node itself.
    pub target: Option<Ty>,
    /// The type the surrounding context requires, if any.
    pub expected: Option<Ty>,
}

impl TypeInference {
    /// An annotation with only a computed target type.
    pub fn of(target: Ty) -> Self {
        TypeInference {
            target: Some(target),
            expected: None,
        }
    }

    /// The contextual expectation if present, otherwise the computed type.
    pub fn resolved(&self) -> Option<&Ty> {
        self.expected.as_ref().or(self.target.as_ref())
    }
}
