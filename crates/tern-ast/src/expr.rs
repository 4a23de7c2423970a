//! Expressions in Tern.

use crate::atype::AType;
use tern_core::{Ident, Span, Storage};

/// An expression with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Identifier, index, or field access.
    Access(Access),

    /// `assert(cond)`, `assert(cond, msg)`, or the unconditional `abort()`
    /// form when `cond` is absent.
    Assert {
        cond: Option<Box<Expr>>,
        message: Option<Box<Expr>>,
    },

    /// `object = value` or `*object = value` when `indirect`. Op-assignment
    /// carries the operator through unchanged.
    Assign {
        op: Option<BinOp>,
        object: Box<Expr>,
        value: Box<Expr>,
        indirect: bool,
    },

    Binarithm {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `let`/`def` in statement position; one node may declare several
    /// bindings.
    Binding(Vec<Binding>),

    Call {
        callee: Box<Expr>,
        args: Vec<CallArg>,
    },

    Cast {
        kind: CastKind,
        value: Box<Expr>,
        ty: Box<AType>,
    },

    Constant(Constant),

    /// `break` / `continue`, optionally labeled.
    Control {
        kind: ControlKind,
        label: Option<String>,
    },

    Defer(Box<Expr>),

    For(Box<ForExpr>),

    If {
        cond: Box<Expr>,
        true_branch: Box<Expr>,
        false_branch: Option<Box<Expr>>,
    },

    /// An expression list (block); introduces a scope.
    List(Vec<Expr>),

    Measure(Measure),

    Return(Option<Box<Expr>>),

    Slice {
        object: Box<Expr>,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },

    /// A struct literal. `name` and `autofill` are accepted by the parser
    /// but not yet implemented by the checker.
    Struct {
        autofill: bool,
        name: Option<Ident>,
        fields: Vec<FieldInit>,
    },

    Switch {
        value: Box<Expr>,
        cases: Vec<Case>,
    },

    Unarithm {
        op: UnOp,
        operand: Box<Expr>,
    },
}

/// The three access forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Ident(Ident),
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Field {
        object: Box<Expr>,
        field: String,
    },
}

/// A single name introduced by a binding expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: Option<AType>,
    pub is_const: bool,
    pub is_static: bool,
    pub init: Expr,
}

/// A call argument; `variadic` marks an already-spread trailing argument
/// (`f(xs...)`).
#[derive(Debug, Clone, PartialEq)]
pub struct CallArg {
    pub variadic: bool,
    pub value: Expr,
}

/// The cast operators: `: T` (plain), `as T` (assertion), `is T` (test).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    Cast,
    Assertion,
    Test,
}

/// A literal value, tagged with its storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int { storage: Storage, value: i64 },
    Uint { storage: Storage, value: u64 },
    Float { storage: Storage, value: f64 },
    Rune(char),
    Bool(bool),
    Str(String),
    Null,
    Void,
    Array(Vec<ArrayItem>),
}

/// One element of an array literal; `expand` marks the trailing `...`
/// element.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    pub value: Expr,
    pub expand: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Break,
    Continue,
}

/// A `for` loop: `for :label (bindings; cond; afterthought) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForExpr {
    pub label: Option<String>,
    pub bindings: Option<Expr>,
    pub cond: Expr,
    pub afterthought: Option<Expr>,
    pub body: Expr,
}

/// The measurement operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Measure {
    Len(Box<Expr>),
    Size(Box<AType>),
    /// Unimplemented; the checker reports it as such.
    Offset(Box<Expr>),
}

/// A field initializer in a struct literal, with its declared type.
/// `embedded` marks an anonymous embedded member, which the checker does
/// not yet support.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInit {
    pub name: String,
    pub ty: AType,
    pub value: Expr,
    pub embedded: bool,
}

/// One case of a `switch`; an empty option list is the default case.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub options: Vec<Expr>,
    pub body: Expr,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    // Comparison and logic
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
}

impl BinOp {
    /// True for the operators whose result takes the operand type; the rest
    /// produce `bool`.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Subtract
                | Self::Multiply
                | Self::Divide
                | Self::Modulo
                | Self::BitAnd
                | Self::BitOr
                | Self::BitXor
                | Self::ShiftLeft
                | Self::ShiftRight
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// `&expr`
    Address,
    /// `*expr`
    Deref,
    /// `!expr`
    LogicalNot,
    /// `~expr`
    BitNot,
    Minus,
    Plus,
}
