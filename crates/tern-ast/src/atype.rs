//! Syntactic types, as written in source.
//!
//! These are resolved to interned types by the semantic pass. Array lengths
//! and enum values are ordinary expressions; resolving them routes back
//! through expression checking and constant evaluation.

use crate::expr::Expr;
use tern_core::type_system::Variadism;
use tern_core::{Ident, Span, Storage};

/// A type as written in source.
#[derive(Debug, Clone, PartialEq)]
pub struct AType {
    pub span: Span,
    pub is_const: bool,
    pub kind: ATypeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ATypeKind {
    /// A builtin primitive (`int`, `bool`, `str`, ...).
    Builtin(Storage),

    /// A reference to a named type. With `unwrap` (`...name`), resolves to
    /// the alias target rather than the alias itself.
    Alias { ident: Ident, unwrap: bool },

    Pointer {
        referent: Box<AType>,
        nullable: bool,
    },

    /// `[expr]T`, `[*]T` when `length` is absent.
    Array {
        length: Option<Box<Expr>>,
        element: Box<AType>,
    },

    Slice { element: Box<AType> },

    Struct { members: Vec<StructMember> },

    Union { members: Vec<StructMember> },

    Tagged { members: Vec<AType> },

    Enum {
        /// Underlying storage; `int` when unspecified.
        storage: Option<Storage>,
        values: Vec<EnumMember>,
    },

    Function(Box<FuncType>),
}

/// A named member of a struct or union type.
#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub name: String,
    pub ty: AType,
}

/// One value of an enum type; an absent value counts up from the previous.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<Expr>,
}

/// A function prototype.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub params: Vec<Param>,
    pub result: AType,
    pub variadism: Variadism,
}

/// A formal parameter. The name is optional in type position but required on
/// function declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: AType,
    pub span: Span,
}
