//! Top-level items: functions and the compilation-unit module.

use crate::span::Span;
use crate::stmt::Block;
use crate::ty::Ty;

/// A compilation unit. Owns its whole tree; the cast-analysis pass consumes
/// it by value and returns the rewritten module.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}

/// A function definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Ty,
    pub body: Block,
    pub span: Span,
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
}
