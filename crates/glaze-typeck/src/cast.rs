//! The cast-analysis rewrite.
//!
//! A single bottom-up pass over the tree: children are rewritten first so
//! their types are final before the parent's coercion rule runs, then the
//! local rule decides whether to wrap a child in an explicit conversion.
//! Conversion nodes are type-constructor calls (`float3(x)`) annotated with
//! their produced type, which also makes the pass idempotent: re-running it
//! over its own output inserts nothing new.
//!
//! The rewrite consumes each node by value and returns the replacement
//! subtree, so parent-to-child links are rebuilt rather than mutated and
//! the no-cycle invariant holds by construction.

use glaze_ast::expr::{Callee, CallExpr, Expr, UnaryOp};
use glaze_ast::infer::TypeInference;
use glaze_ast::item::{Function, Module};
use glaze_ast::stmt::{Block, Stmt};
use glaze_ast::ty::{ScalarKind, Ty};

use crate::convert::{binary_conversion_type, needs_binary_cast};

/// Rewrite a whole module, inserting explicit conversions wherever the
/// language would otherwise rely on an ambiguous implicit coercion.
///
/// Never fails: nodes with unresolved types are left untouched.
pub fn insert_casts(module: Module) -> Module {
    Module {
        functions: module.functions.into_iter().map(rewrite_function).collect(),
    }
}

fn rewrite_function(func: Function) -> Function {
    let Function {
        name,
        params,
        return_type,
        body,
        span,
    } = func;
    Function {
        name,
        params,
        return_type,
        body: rewrite_block(body),
        span,
    }
}

fn rewrite_block(block: Block) -> Block {
    Block {
        stmts: block.stmts.into_iter().map(rewrite_stmt).collect(),
        span: block.span,
    }
}

/// Rewrite a single statement subtree.
pub fn rewrite_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Expr(mut s) => {
            s.expr = rewrite_expr(s.expr);
            Stmt::Expr(s)
        }
        Stmt::Block(b) => Stmt::Block(rewrite_block(b)),
        Stmt::Decl(mut decl) => {
            if let Some(init) = decl.init.take() {
                let init = rewrite_expr(init);
                let init_ty = init.info().target.clone();
                // Opaque resources are reference-assigned, never value-cast.
                let init = if init_ty.as_ref().is_some_and(Ty::is_object) {
                    init
                } else {
                    cast_to(init_ty.as_ref(), Some(&decl.ty), init)
                };
                decl.init = Some(init);
            }
            Stmt::Decl(decl)
        }
        Stmt::If(b) => {
            let mut node = *b;
            node.cond = rewrite_expr(node.cond);
            node.then_branch = rewrite_stmt(node.then_branch);
            node.else_branch = node.else_branch.map(rewrite_stmt);
            // Binary and unary conditions already produce a boolean through
            // the rules below; anything else gets an explicit conversion.
            if !matches!(node.cond, Expr::Binary(_) | Expr::Unary(_)) {
                let cond_ty = node.cond.info().target.clone();
                node.cond = convert_to_bool(node.cond, cond_ty.as_ref());
            }
            Stmt::If(Box::new(node))
        }
        Stmt::Return(mut s) => {
            if let Some(value) = s.value.take() {
                let value = rewrite_expr(value);
                let from = value.info().target.clone();
                let to = value.info().resolved().cloned();
                s.value = Some(cast_to(from.as_ref(), to.as_ref(), value));
            }
            Stmt::Return(s)
        }
    }
}

/// Rewrite a single expression subtree.
pub fn rewrite_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Literal(_) | Expr::Var(_) => expr,

        Expr::Unary(b) => {
            let mut node = *b;
            node.expr = rewrite_expr(node.expr);
            let unary_ty = node.info.target.clone();
            let input_ty = node.expr.info().target.clone();
            if let (Some(unary_ty), Some(input_ty)) = (unary_ty, input_ty) {
                if unary_ty == Ty::bool() && input_ty != Ty::bool() && node.op == UnaryOp::LogicalNot
                {
                    node.expr = wrap_ctor(Ty::bool(), node.expr);
                }
            }
            Expr::Unary(Box::new(node))
        }

        Expr::Binary(b) => {
            let mut node = *b;
            node.lhs = rewrite_expr(node.lhs);
            node.rhs = rewrite_expr(node.rhs);

            let left_ty = node.lhs.info().target.clone();
            let right_ty = node.rhs.info().target.clone();
            let mut return_ty = node.info.resolved().cloned();
            let mut numeric = true;

            if node.op.is_logical() {
                numeric = false;
                return_ty = binary_conversion_type(left_ty.as_ref(), right_ty.as_ref(), true);
                node.info.target = return_ty.clone();
            } else if node.op.is_comparison() {
                numeric = false;
                return_ty = binary_conversion_type(left_ty.as_ref(), right_ty.as_ref(), false);
                // Comparisons produce a boolean broadcast over the unified
                // operand shape: float3 < float3 is bool3, not bool.
                let result = return_ty
                    .as_ref()
                    .map(|ty| ty.with_elem(ScalarKind::Bool))
                    .unwrap_or_else(Ty::bool);
                node.info.target = Some(result);
            }

            // A numeric operation asked to produce a scalar bool has no
            // valid numeric->bool coercion path; convert the whole
            // expression instead of casting the operands.
            if numeric && return_ty.as_ref() == Some(&Ty::bool()) {
                if let Some(type_to_check) = left_ty.clone().or_else(|| right_ty.clone()) {
                    return convert_to_bool(Expr::Binary(Box::new(node)), Some(&type_to_check));
                }
            }

            if !numeric || needs_binary_cast(left_ty.as_ref(), return_ty.as_ref()) {
                node.lhs = cast_to(left_ty.as_ref(), return_ty.as_ref(), node.lhs);
            }
            if !numeric || needs_binary_cast(right_ty.as_ref(), return_ty.as_ref()) {
                node.rhs = cast_to(right_ty.as_ref(), return_ty.as_ref(), node.rhs);
            }
            Expr::Binary(Box::new(node))
        }

        Expr::Conditional(b) => {
            let mut node = *b;
            node.cond = rewrite_expr(node.cond);
            node.if_true = rewrite_expr(node.if_true);
            node.if_false = rewrite_expr(node.if_false);

            let left_ty = node.if_true.info().target.clone();
            let right_ty = node.if_false.info().target.clone();
            let right_is_scalar = right_ty.as_ref().is_some_and(Ty::is_scalar);
            let cast_left = match &left_ty {
                None => true,
                Some(left) => left.is_scalar() && !right_is_scalar,
            };
            if cast_left {
                node.if_true = cast_to(left_ty.as_ref(), right_ty.as_ref(), node.if_true);
            } else {
                node.if_false = cast_to(right_ty.as_ref(), left_ty.as_ref(), node.if_false);
            }
            Expr::Conditional(Box::new(node))
        }

        Expr::Assign(b) => {
            let mut node = *b;
            node.target = rewrite_expr(node.target);
            node.value = rewrite_expr(node.value);

            let target_ty = node.target.info().resolved().cloned();
            let value_ty = node.value.info().target.clone();
            node.value = cast_to(value_ty.as_ref(), target_ty.as_ref(), node.value);
            Expr::Assign(Box::new(node))
        }

        Expr::Index(b) => {
            let mut node = *b;
            node.base = rewrite_expr(node.base);
            node.index = rewrite_expr(node.index);

            // Subscripts must be integral.
            if let Some(index_ty) = node.index.info().target.clone() {
                if matches!(
                    index_ty.base_scalar(),
                    Some(ScalarKind::Float | ScalarKind::Double)
                ) {
                    node.index = cast_to(Some(&index_ty), Some(&Ty::int()), node.index);
                }
            }
            Expr::Index(Box::new(node))
        }

        Expr::Call(b) => {
            let mut node = *b;
            node.callee = match node.callee {
                Callee::Method { receiver, name } => Callee::Method {
                    receiver: Box::new(rewrite_expr(*receiver)),
                    name,
                },
                other => other,
            };
            node.args = node
                .args
                .into_iter()
                .map(|arg| {
                    let arg = rewrite_expr(arg);
                    let from = arg.info().target.clone();
                    match from {
                        Some(ref from_ty) if !from_ty.is_object() => {
                            let to = arg.info().resolved().cloned();
                            cast_to(Some(from_ty), to.as_ref(), arg)
                        }
                        _ => arg,
                    }
                })
                .collect();
            Expr::Call(Box::new(node))
        }
    }
}

// ── Cast helpers ─────────────────────────────────────────────────────────

/// The single point of truth for cast insertion. Wraps `expr` in a
/// type-constructor call only when both types are known and differ;
/// unknown types short-circuit to identity. Total, never fails.
fn cast_to(from: Option<&Ty>, to: Option<&Ty>, expr: Expr) -> Expr {
    match (from, to) {
        (Some(from), Some(to)) if from != to => wrap_ctor(to.clone(), expr),
        _ => expr,
    }
}

/// Wrap an expression in a `bool` conversion unless it is already boolean.
fn convert_to_bool(expr: Expr, type_to_check: Option<&Ty>) -> Expr {
    if type_to_check == Some(&Ty::bool()) {
        expr
    } else {
        wrap_ctor(Ty::bool(), expr)
    }
}

fn wrap_ctor(to: Ty, expr: Expr) -> Expr {
    let span = expr.span();
    Expr::Call(Box::new(CallExpr {
        callee: Callee::Type(to.clone()),
        args: vec![expr],
        info: TypeInference::of(to),
        span,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_ast::expr::VarRef;
    use glaze_ast::span::Span;

    fn sp() -> Span {
        Span::new(0, 0)
    }

    fn var(name: &str, ty: Ty) -> Expr {
        Expr::Var(VarRef::typed(name, ty, sp()))
    }

    #[test]
    fn cast_to_wraps_on_mismatch() {
        let wrapped = cast_to(Some(&Ty::int()), Some(&Ty::float()), var("a", Ty::int()));
        match &wrapped {
            Expr::Call(call) => {
                assert_eq!(call.callee, Callee::Type(Ty::float()));
                assert_eq!(call.info.target, Some(Ty::float()));
                assert_eq!(call.args.len(), 1);
            }
            other => panic!("expected a conversion call, got {:?}", other),
        }
    }

    #[test]
    fn cast_to_is_identity_on_match_or_unknown() {
        let e = var("a", Ty::int());
        assert_eq!(cast_to(Some(&Ty::int()), Some(&Ty::int()), e.clone()), e);
        assert_eq!(cast_to(None, Some(&Ty::int()), e.clone()), e);
        assert_eq!(cast_to(Some(&Ty::int()), None, e.clone()), e);
    }

    #[test]
    fn convert_to_bool_skips_booleans() {
        let e = var("flag", Ty::bool());
        assert_eq!(convert_to_bool(e.clone(), Some(&Ty::bool())), e);

        let wrapped = convert_to_bool(var("x", Ty::float()), Some(&Ty::float()));
        assert!(matches!(&wrapped, Expr::Call(c) if c.callee == Callee::Type(Ty::bool())));
        // Unknown types are wrapped as well; the conversion is harmless.
        let wrapped = convert_to_bool(Expr::Var(VarRef::new("y", sp())), None);
        assert!(matches!(&wrapped, Expr::Call(c) if c.callee == Callee::Type(Ty::bool())));
    }
}
