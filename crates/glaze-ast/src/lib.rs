//! Glaze shader AST: node variants, type lattice, and inference annotations.
//!
//! This crate holds the data model shared by the Glaze middle-end passes.
//! The AST is produced by an external parser as a single owned tree; the
//! cast-analysis pass in `glaze-typeck` consumes it by value and returns a
//! coercion-complete rebuild.
//!
//! # Architecture
//!
//! - [`ty`]: scalar/vector/matrix/object type lattice
//! - [`span`]: byte-offset source spans
//! - [`infer`]: per-node type annotations (computed target, contextual expectation)
//! - [`expr`] / [`stmt`] / [`item`]: the node variants themselves

pub mod expr;
pub mod infer;
pub mod item;
pub mod span;
pub mod stmt;
pub mod ty;

pub use expr::{BinaryOp, Callee, Expr, Lit, UnaryOp};
pub use infer::TypeInference;
pub use item::{Function, Module, Param};
pub use span::Span;
pub use stmt::{Block, Stmt};
pub use ty::{ScalarKind, Ty};
