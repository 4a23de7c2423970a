//! Abstract Syntax Tree (AST) definitions for Tern.
//!
//! This crate is the contract between the parser and the semantic pass: a
//! plain data model with source spans and no behavior. The parser produces
//! these values; the checker consumes them and never mutates them.

pub mod ast;
pub mod atype;
pub mod expr;

pub use ast::{Decl, DeclKind, FnFlags, FuncDecl, GlobalDecl, SubUnit, TypeDecl, Unit};
pub use atype::{AType, ATypeKind, EnumMember, FuncType, Param, StructMember};
pub use expr::{
    Access, ArrayItem, BinOp, Binding, CallArg, Case, CastKind, Constant, ControlKind, Expr,
    ExprKind, FieldInit, ForExpr, Measure, UnOp,
};
