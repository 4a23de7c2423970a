//! Shared builders for semantic analysis tests.
//!
//! The parser is not part of this workspace, so tests construct AST values
//! directly; these helpers keep that terse.
#![allow(dead_code)]

use tern_ast::{
    AType, ATypeKind, Access, ArrayItem, BinOp, Binding, CallArg, Case, Constant, ControlKind,
    Decl, DeclKind, Expr, ExprKind, FnFlags, ForExpr, FuncDecl, FuncType, GlobalDecl, Param,
    SubUnit, TypeDecl, Unit,
};
use tern_core::type_system::Variadism;
use tern_core::{Ident, Result, Span, Storage, TypeStore};
use tern_semantic::tree;

pub fn span() -> Span {
    Span::from_range(0, 0)
}

pub fn expr(kind: ExprKind) -> Expr {
    Expr { span: span(), kind }
}

// Literals

pub fn int(value: i64) -> Expr {
    expr(ExprKind::Constant(Constant::Int {
        storage: Storage::Int,
        value,
    }))
}

pub fn uint(storage: Storage, value: u64) -> Expr {
    expr(ExprKind::Constant(Constant::Uint { storage, value }))
}

pub fn boolean(value: bool) -> Expr {
    expr(ExprKind::Constant(Constant::Bool(value)))
}

pub fn string(value: &str) -> Expr {
    expr(ExprKind::Constant(Constant::Str(value.to_string())))
}

pub fn null() -> Expr {
    expr(ExprKind::Constant(Constant::Null))
}

pub fn array_literal(items: Vec<Expr>) -> Expr {
    expr(ExprKind::Constant(Constant::Array(
        items
            .into_iter()
            .map(|value| ArrayItem {
                value,
                expand: false,
            })
            .collect(),
    )))
}

// Access and operators

pub fn ident(name: &str) -> Expr {
    expr(ExprKind::Access(Access::Ident(Ident::new(name))))
}

pub fn qualified(ns: &str, name: &str) -> Expr {
    expr(ExprKind::Access(Access::Ident(Ident::qualified(
        Ident::new(ns),
        name,
    ))))
}

pub fn index(array: Expr, idx: Expr) -> Expr {
    expr(ExprKind::Access(Access::Index {
        array: Box::new(array),
        index: Box::new(idx),
    }))
}

pub fn field(object: Expr, name: &str) -> Expr {
    expr(ExprKind::Access(Access::Field {
        object: Box::new(object),
        field: name.to_string(),
    }))
}

pub fn binarithm(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    expr(ExprKind::Binarithm {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    })
}

pub fn unarithm(op: tern_ast::UnOp, operand: Expr) -> Expr {
    expr(ExprKind::Unarithm {
        op,
        operand: Box::new(operand),
    })
}

pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(ident(callee)),
        args: args
            .into_iter()
            .map(|value| CallArg {
                variadic: false,
                value,
            })
            .collect(),
    })
}

// Statements-as-expressions

pub fn list(exprs: Vec<Expr>) -> Expr {
    expr(ExprKind::List(exprs))
}

pub fn binding(name: &str, ty: Option<AType>, init: Expr) -> Expr {
    expr(ExprKind::Binding(vec![Binding {
        name: name.to_string(),
        ty,
        is_const: false,
        is_static: false,
        init,
    }]))
}

pub fn const_binding(name: &str, ty: Option<AType>, init: Expr) -> Expr {
    expr(ExprKind::Binding(vec![Binding {
        name: name.to_string(),
        ty,
        is_const: true,
        is_static: false,
        init,
    }]))
}

pub fn static_binding(name: &str, ty: Option<AType>, init: Expr) -> Expr {
    expr(ExprKind::Binding(vec![Binding {
        name: name.to_string(),
        ty,
        is_const: false,
        is_static: true,
        init,
    }]))
}

pub fn assign(object: Expr, value: Expr) -> Expr {
    expr(ExprKind::Assign {
        op: None,
        object: Box::new(object),
        value: Box::new(value),
        indirect: false,
    })
}

pub fn ret(value: Option<Expr>) -> Expr {
    expr(ExprKind::Return(value.map(Box::new)))
}

pub fn break_to(label: Option<&str>) -> Expr {
    expr(ExprKind::Control {
        kind: ControlKind::Break,
        label: label.map(str::to_string),
    })
}

pub fn for_loop(label: Option<&str>, cond: Expr, body: Expr) -> Expr {
    expr(ExprKind::For(Box::new(ForExpr {
        label: label.map(str::to_string),
        bindings: None,
        cond,
        afterthought: None,
        body,
    })))
}

pub fn if_else(cond: Expr, true_branch: Expr, false_branch: Option<Expr>) -> Expr {
    expr(ExprKind::If {
        cond: Box::new(cond),
        true_branch: Box::new(true_branch),
        false_branch: false_branch.map(Box::new),
    })
}

pub fn switch(value: Expr, cases: Vec<(Vec<Expr>, Expr)>) -> Expr {
    expr(ExprKind::Switch {
        value: Box::new(value),
        cases: cases
            .into_iter()
            .map(|(options, body)| Case { options, body })
            .collect(),
    })
}

// Syntactic types

pub fn builtin(storage: Storage) -> AType {
    AType {
        span: span(),
        is_const: false,
        kind: ATypeKind::Builtin(storage),
    }
}

pub fn const_type(mut ty: AType) -> AType {
    ty.is_const = true;
    ty
}

pub fn named_type(name: &str) -> AType {
    AType {
        span: span(),
        is_const: false,
        kind: ATypeKind::Alias {
            ident: Ident::new(name),
            unwrap: false,
        },
    }
}

pub fn pointer_to(referent: AType, nullable: bool) -> AType {
    AType {
        span: span(),
        is_const: false,
        kind: ATypeKind::Pointer {
            referent: Box::new(referent),
            nullable,
        },
    }
}

pub fn array_of(length: u64, element: AType) -> AType {
    AType {
        span: span(),
        is_const: false,
        kind: ATypeKind::Array {
            length: Some(Box::new(int(length as i64))),
            element: Box::new(element),
        },
    }
}

pub fn tagged_of(members: Vec<AType>) -> AType {
    AType {
        span: span(),
        is_const: false,
        kind: ATypeKind::Tagged { members },
    }
}

// Declarations and units

pub fn param(name: &str, ty: AType) -> Param {
    Param {
        name: Some(name.to_string()),
        ty,
        span: span(),
    }
}

pub fn prototype(params: Vec<Param>, result: AType, variadism: Variadism) -> FuncType {
    FuncType {
        params,
        result,
        variadism,
    }
}

pub fn func_decl(name: &str, proto: FuncType, body: Option<Expr>) -> Decl {
    Decl {
        exported: false,
        span: span(),
        kind: DeclKind::Func(FuncDecl {
            ident: Ident::new(name),
            symbol: None,
            flags: FnFlags::default(),
            prototype: proto,
            body,
        }),
    }
}

pub fn const_decl(name: &str, ty: AType, init: Expr) -> Decl {
    Decl {
        exported: false,
        span: span(),
        kind: DeclKind::Const(GlobalDecl {
            ident: Ident::new(name),
            ty,
            init: Some(init),
            symbol: None,
        }),
    }
}

pub fn global_decl(name: &str, ty: AType, init: Option<Expr>) -> Decl {
    Decl {
        exported: false,
        span: span(),
        kind: DeclKind::Global(GlobalDecl {
            ident: Ident::new(name),
            ty,
            init,
            symbol: None,
        }),
    }
}

pub fn type_decl(name: &str, ty: AType) -> Decl {
    Decl {
        exported: false,
        span: span(),
        kind: DeclKind::Type(TypeDecl {
            ident: Ident::new(name),
            ty,
        }),
    }
}

pub fn enum_type(values: &[&str]) -> AType {
    AType {
        span: span(),
        is_const: false,
        kind: ATypeKind::Enum {
            storage: None,
            values: values
                .iter()
                .map(|name| tern_ast::EnumMember {
                    name: name.to_string(),
                    value: None,
                })
                .collect(),
        },
    }
}

pub fn unit_of(decls: Vec<Decl>) -> Unit {
    Unit {
        ns: None,
        subunits: vec![SubUnit {
            path: Some("main.tn".to_string()),
            imports: Vec::new(),
            decls,
        }],
    }
}

pub fn unit_with_ns(ns: &str, decls: Vec<Decl>) -> Unit {
    Unit {
        ns: Some(Ident::new(ns)),
        ..unit_of(decls)
    }
}

/// Checks a unit against a fresh store.
pub fn check_unit(unit: &Unit) -> Result<(TypeStore, tree::Unit)> {
    let mut store = TypeStore::new();
    let checked = tern_semantic::check(&mut store, unit)?;
    Ok((store, checked))
}

/// Wraps `body` in `fn main() void` and checks the resulting unit.
pub fn check_body(body: Expr) -> Result<(TypeStore, tree::Unit)> {
    let main = func_decl(
        "main",
        prototype(Vec::new(), builtin(Storage::Void), Variadism::None),
        Some(body),
    );
    check_unit(&unit_of(vec![main]))
}

/// The checked body of the first function declaration in the unit.
pub fn first_body(unit: &tree::Unit) -> &tree::Expr {
    unit.decls
        .iter()
        .find_map(|decl| match &decl.kind {
            tree::DeclKind::Func { body, .. } => Some(body),
            _ => None,
        })
        .expect("unit contains a checked function")
}

/// The expressions of a body known to be a list.
pub fn body_exprs(unit: &tree::Unit) -> &[tree::Expr] {
    match &first_body(unit).kind {
        tree::ExprKind::List { exprs, .. } => exprs,
        other => panic!("expected a list body, got {other:?}"),
    }
}
