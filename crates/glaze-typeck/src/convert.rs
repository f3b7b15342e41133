//! Implicit-conversion rules for binary operands.
//!
//! Given the types of two operands, [`binary_conversion_type`] computes the
//! type both sides unify to before the operation runs. Logical operators
//! bias the element kind to `bool`; everything else promotes through the
//! scalar order. Shape unification broadcasts scalars over vectors and
//! matrices and truncates mismatched dimensions to the smaller side.

use glaze_ast::ty::{ScalarKind, Ty};

/// The type two binary operands implicitly convert to, or `None` when
/// either side is unknown, an object type, or the shapes have no common
/// form (matrix versus vector).
pub fn binary_conversion_type(left: Option<&Ty>, right: Option<&Ty>, logical: bool) -> Option<Ty> {
    let left = left?;
    let right = right?;
    if left.is_object() || right.is_object() {
        return None;
    }
    let elem = if logical {
        ScalarKind::Bool
    } else {
        left.base_scalar()?.promote(right.base_scalar()?)
    };
    let unified = match (left, right) {
        (Ty::Scalar(_), Ty::Scalar(_)) => Ty::Scalar(elem),
        (Ty::Vector { dim, .. }, Ty::Scalar(_)) | (Ty::Scalar(_), Ty::Vector { dim, .. }) => {
            Ty::vector(elem, *dim)
        }
        (Ty::Vector { dim: a, .. }, Ty::Vector { dim: b, .. }) => Ty::vector(elem, (*a).min(*b)),
        (Ty::Matrix { rows, cols, .. }, Ty::Scalar(_))
        | (Ty::Scalar(_), Ty::Matrix { rows, cols, .. }) => Ty::matrix(elem, *rows, *cols),
        (
            Ty::Matrix { rows: r1, cols: c1, .. },
            Ty::Matrix { rows: r2, cols: c2, .. },
        ) => Ty::matrix(elem, (*r1).min(*r2), (*c1).min(*c2)),
        // Matrix and vector operands have no common implicit shape.
        _ => return None,
    };
    Some(unified)
}

/// Whether a numeric binary operand of type `from` needs an explicit cast
/// to reach the unified type `to`.
///
/// A scalar operand whose kind matches the shaped side's element kind is
/// broadcast by the backend without a cast node.
pub fn needs_binary_cast(from: Option<&Ty>, to: Option<&Ty>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => {
            from != to && !is_broadcast(from, to) && !is_broadcast(to, from)
        }
        _ => false,
    }
}

fn is_broadcast(scalar: &Ty, shaped: &Ty) -> bool {
    matches!(scalar, Ty::Scalar(kind) if !shaped.is_scalar() && shaped.base_scalar() == Some(*kind))
}
