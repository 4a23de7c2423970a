//! Compilation units and top-level declarations.

use crate::atype::{AType, FuncType};
use crate::expr::Expr;
use tern_core::{Ident, Span};

/// A complete compilation unit: one namespace, one or more subunits (source
/// files).
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// The unit namespace; top-level declarations are mangled under it.
    pub ns: Option<Ident>,
    pub subunits: Vec<SubUnit>,
}

/// A single source file within a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubUnit {
    /// Source path, used for synthesized assertion messages.
    pub path: Option<String>,
    /// Imported namespaces. Import resolution is not implemented; the
    /// checker rejects a non-empty list.
    pub imports: Vec<Ident>,
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub exported: bool,
    pub span: Span,
    pub kind: DeclKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// `def NAME: type = value`
    Const(GlobalDecl),
    /// `fn name(...) result = body`
    Func(FuncDecl),
    /// `let name: type = value` at the top level
    Global(GlobalDecl),
    /// `type Name = ...`
    Type(TypeDecl),
}

/// A constant or global declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDecl {
    pub ident: Ident,
    pub ty: AType,
    /// Absent for forward global declarations; always present for constants.
    pub init: Option<Expr>,
    /// Linker symbol override. Never set on constants.
    pub symbol: Option<String>,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub ident: Ident,
    /// Linker symbol override; used verbatim as the mangled name.
    pub symbol: Option<String>,
    pub flags: FnFlags,
    pub prototype: FuncType,
    /// Absent for prototypes, which are scanned but produce no checked
    /// declaration.
    pub body: Option<Expr>,
}

/// Function attribute flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FnFlags {
    pub init: bool,
    pub fini: bool,
    pub test: bool,
}

impl FnFlags {
    /// True if any of `@init` / `@fini` / `@test` is set.
    #[must_use]
    pub const fn is_special(self) -> bool {
        self.init || self.fini || self.test
    }
}

/// A type alias declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub ident: Ident,
    pub ty: AType,
}
