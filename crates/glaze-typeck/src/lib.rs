//! Glaze cast analysis: implicit-conversion resolution over shader ASTs.
//!
//! This crate implements the type-driven rewrite that turns implicit
//! coercions into explicit conversion nodes, so the downstream code
//! generator never has to guess at a cast. It consumes a module whose
//! expressions already carry [`TypeInference`] annotations from a prior
//! type-resolution phase.
//!
//! The pass is total and silent: a node with unresolved types is passed
//! through unmodified rather than reported. An invalid program that slips
//! through is caught by the backend validator, not here.
//!
//! # Architecture
//!
//! - [`convert`]: the implicit-conversion lattice for binary operands
//! - [`cast`]: the bottom-up rewrite inserting conversion nodes
//!
//! [`TypeInference`]: glaze_ast::TypeInference

pub mod cast;
pub mod convert;

pub use cast::insert_casts;
