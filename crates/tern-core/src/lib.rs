//! Core types and utilities for the Tern language compiler.
//!
//! This crate provides the fundamental vocabulary shared by all compiler
//! stages: source spans, the error type, qualified identifiers, and the
//! interned type system.

pub mod error;
pub mod ident;
pub mod span;
pub mod type_system;

pub use error::{Error, Result};
pub use ident::Ident;
pub use span::{Location, Span};
pub use type_system::{Storage, Type, TypeId, TypeKind, TypeStore};
