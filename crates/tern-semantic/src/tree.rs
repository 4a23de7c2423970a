//! The typed unit: the checker's output tree.
//!
//! Every expression carries its result type and whether control can flow
//! past it. Identifiers are resolved to scope objects, implicit conversions
//! are explicit [`ExprKind::Cast`] nodes, and named constants have been
//! spliced in at their use sites — no `Const` object references survive.

use tern_ast::{BinOp, CastKind, ControlKind, FnFlags, UnOp};
use tern_core::type_system::StructField;
use tern_core::{Ident, TypeId};

use crate::scope::{ObjectRef, ScopeArena, ScopeId};

/// The checked output of one compilation unit. Owns every typed node and the
/// scope arena they reference.
#[derive(Debug)]
pub struct Unit {
    pub ns: Option<Ident>,
    pub decls: Vec<Decl>,
    pub scopes: ScopeArena,
}

/// A checked top-level declaration.
#[derive(Debug, Clone)]
pub struct Decl {
    /// Mangled identifier (namespace-qualified, or the `symbol` override).
    pub ident: Ident,
    pub symbol: Option<String>,
    pub exported: bool,
    pub kind: DeclKind,
}

#[derive(Debug, Clone)]
pub enum DeclKind {
    Func {
        ty: TypeId,
        flags: FnFlags,
        scope: ScopeId,
        body: Expr,
    },
    Global {
        ty: TypeId,
        /// The evaluated initializer.
        value: Expr,
    },
    Type(TypeId),
}

/// A typed expression.
#[derive(Debug, Clone)]
pub struct Expr {
    pub result: TypeId,
    /// True iff control cannot flow past this expression.
    pub terminates: bool,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Access(Access),

    Assert {
        cond: Option<Box<Expr>>,
        message: Box<Expr>,
    },

    Assign {
        op: Option<BinOp>,
        indirect: bool,
        object: Box<Expr>,
        value: Box<Expr>,
    },

    Binarithm {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Binding(Vec<Binding>),

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    Cast {
        kind: CastKind,
        secondary: TypeId,
        value: Box<Expr>,
    },

    Constant(Value),

    Control {
        kind: ControlKind,
        label: Option<String>,
        /// The loop scope this break/continue targets.
        target: ScopeId,
    },

    Defer(Box<Expr>),

    For {
        scope: ScopeId,
        label: Option<String>,
        bindings: Option<Box<Expr>>,
        cond: Box<Expr>,
        afterthought: Option<Box<Expr>>,
        body: Box<Expr>,
    },

    If {
        cond: Box<Expr>,
        true_branch: Box<Expr>,
        false_branch: Option<Box<Expr>>,
    },

    List {
        scope: ScopeId,
        exprs: Vec<Expr>,
    },

    Measure(Measure),

    Return(Option<Box<Expr>>),

    Slice {
        object: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },

    Struct(Vec<FieldValue>),

    Switch {
        value: Box<Expr>,
        cases: Vec<Case>,
    },

    Unarithm {
        op: UnOp,
        operand: Box<Expr>,
    },
}

/// A resolved access expression.
#[derive(Debug, Clone)]
pub enum Access {
    /// An identifier resolved to a runtime binding or declaration. Constants
    /// never appear here; they are spliced.
    Object(ObjectRef),
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Field {
        object: Box<Expr>,
        field: StructField,
    },
}

/// One checked binding: the inserted scope object and its (cast or
/// evaluated) initializer.
#[derive(Debug, Clone)]
pub struct Binding {
    pub object: ObjectRef,
    pub initializer: Expr,
}

/// A struct literal member: resolved field descriptor plus value.
#[derive(Debug, Clone)]
pub struct FieldValue {
    pub field: StructField,
    pub value: Expr,
}

/// One switch case: evaluated option constants and the case body. An empty
/// option list is the default case.
#[derive(Debug, Clone)]
pub struct Case {
    pub options: Vec<Expr>,
    pub body: Expr,
}

#[derive(Debug, Clone)]
pub enum Measure {
    Len(Box<Expr>),
    Size(TypeId),
}

/// A constant value, tagged by its storage category.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Rune(char),
    Bool(bool),
    Str(String),
    Null,
    Void,
    Array {
        items: Vec<Expr>,
        /// Whether the final element expands to fill the hinted length.
        expand: bool,
    },
}

impl Expr {
    /// Convenience accessor for expressions known to hold a constant.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Constant(value) => Some(value),
            _ => None,
        }
    }
}

impl Value {
    /// Numeric equality between scalar constants; used when comparing
    /// evaluated values. Non-scalar values never compare equal.
    #[must_use]
    pub fn scalar_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Rune(a), Self::Rune(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Null, Self::Null) | (Self::Void, Self::Void) => true,
            _ => false,
        }
    }
}
