//! Type lattice for the Glaze shading language.
//!
//! Defines the scalar kinds, the `Ty` lattice over scalars, vectors,
//! matrices and opaque object types, and the shape/element helpers the
//! cast-analysis pass builds on. Equality is structural: two types are
//! interchangeable only if identical in tag and parameters.

use std::fmt;

use serde::Serialize;

/// A scalar element kind.
///
/// The variant order is the implicit promotion order: when two numeric
/// operands meet in a binary expression, the result element kind is the
/// larger of the two.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Double,
}

impl ScalarKind {
    /// The promoted kind of two operands.
    pub fn promote(self, other: ScalarKind) -> ScalarKind {
        self.max(other)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Bool => write!(f, "bool"),
            ScalarKind::Int => write!(f, "int"),
            ScalarKind::Float => write!(f, "float"),
            ScalarKind::Double => write!(f, "double"),
        }
    }
}

/// A Glaze shader type.
///
/// - `Scalar`: a single value (`bool`, `int`, `float`, `double`)
/// - `Vector`: `dim` elements of one scalar kind (`float3`)
/// - `Matrix`: `rows` x `cols` elements of one scalar kind (`float4x4`)
/// - `Object`: an opaque resource type (samplers, textures). Objects are
///   reference-assigned and never the source or target of a value cast.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Ty {
    Scalar(ScalarKind),
    Vector { elem: ScalarKind, dim: u8 },
    Matrix { elem: ScalarKind, rows: u8, cols: u8 },
    Object(String),
}

impl Ty {
    /// Create a `bool` type.
    pub fn bool() -> Ty {
        Ty::Scalar(ScalarKind::Bool)
    }

    /// Create an `int` type.
    pub fn int() -> Ty {
        Ty::Scalar(ScalarKind::Int)
    }

    /// Create a `float` type.
    pub fn float() -> Ty {
        Ty::Scalar(ScalarKind::Float)
    }

    /// Create a `double` type.
    pub fn double() -> Ty {
        Ty::Scalar(ScalarKind::Double)
    }

    /// Create a vector type.
    pub fn vector(elem: ScalarKind, dim: u8) -> Ty {
        Ty::Vector { elem, dim }
    }

    /// Create a matrix type.
    pub fn matrix(elem: ScalarKind, rows: u8, cols: u8) -> Ty {
        Ty::Matrix { elem, rows, cols }
    }

    /// Create an opaque object type.
    pub fn object(name: impl Into<String>) -> Ty {
        Ty::Object(name.into())
    }

    /// The element kind behind this type. `None` for object types.
    pub fn base_scalar(&self) -> Option<ScalarKind> {
        match self {
            Ty::Scalar(kind) => Some(*kind),
            Ty::Vector { elem, .. } => Some(*elem),
            Ty::Matrix { elem, .. } => Some(*elem),
            Ty::Object(_) => None,
        }
    }

    /// Whether this is a scalar type.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Ty::Scalar(_))
    }

    /// Whether this is an opaque object type.
    pub fn is_object(&self) -> bool {
        matches!(self, Ty::Object(_))
    }

    /// Same shape with a different element kind. Broadcasting `Bool` over
    /// a `float3` yields `bool3`. Object types have no shape and are
    /// returned unchanged.
    pub fn with_elem(&self, elem: ScalarKind) -> Ty {
        match self {
            Ty::Scalar(_) => Ty::Scalar(elem),
            Ty::Vector { dim, .. } => Ty::Vector { elem, dim: *dim },
            Ty::Matrix { rows, cols, .. } => Ty::Matrix {
                elem,
                rows: *rows,
                cols: *cols,
            },
            Ty::Object(name) => Ty::Object(name.clone()),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Scalar(kind) => write!(f, "{}", kind),
            Ty::Vector { elem, dim } => write!(f, "{}{}", elem, dim),
            Ty::Matrix { elem, rows, cols } => write!(f, "{}{}x{}", elem, rows, cols),
            Ty::Object(name) => write!(f, "{}", name),
        }
    }
}
