//! Semantic analysis for Tern programs.
//!
//! This crate turns the parser's untyped AST into a typed unit: every
//! expression carries a result type, every identifier is resolved to a scope
//! object, and every implicit conversion is an explicit cast node. Checking
//! runs in two passes — a declaration scan that populates the unit scope,
//! then an expression check that elaborates declaration bodies — and stops
//! at the first violation.

mod checker;
pub mod eval;
mod resolve;
mod scan;
pub mod scope;
pub mod tree;

pub use checker::{Context, check};
