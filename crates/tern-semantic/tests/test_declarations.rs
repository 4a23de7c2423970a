//! Declaration checking tests: functions, globals, statics, attributes.

mod common;

use common::*;
use tern_ast::{DeclKind, FnFlags};
use tern_core::type_system::Variadism;
use tern_core::{Ident, Storage};
use tern_semantic::tree;

fn int_fn(name: &str, body: tern_ast::Expr) -> tern_ast::Decl {
    func_decl(
        name,
        prototype(Vec::new(), builtin(Storage::Int), Variadism::None),
        Some(body),
    )
}

#[test]
fn test_function_body_result_must_be_assignable() {
    let bad = int_fn("f", list(vec![boolean(true)]));
    let err = check_unit(&unit_of(vec![bad])).unwrap_err();
    assert!(err.to_string().contains("function result type"));
}

#[test]
fn test_terminating_body_skips_result_check() {
    let ok = int_fn("f", list(vec![ret(Some(int(1)))]));
    assert!(check_unit(&unit_of(vec![ok])).is_ok());
}

#[test]
fn test_return_value_must_be_assignable() {
    let bad = int_fn("f", list(vec![ret(Some(boolean(true)))]));
    let err = check_unit(&unit_of(vec![bad])).unwrap_err();
    assert!(err.to_string().contains("Return value"));
}

#[test]
fn test_return_value_is_cast_to_result_type() {
    // fn f() nullable *int = { return null; };
    let f = func_decl(
        "f",
        prototype(
            Vec::new(),
            pointer_to(builtin(Storage::Int), true),
            Variadism::None,
        ),
        Some(list(vec![ret(Some(null()))])),
    );
    let (store, unit) = check_unit(&unit_of(vec![f])).unwrap();

    let body = first_body(&unit);
    let tree::ExprKind::List { exprs, .. } = &body.kind else {
        panic!("expected a list body");
    };
    let tree::ExprKind::Return(Some(value)) = &exprs[0].kind else {
        panic!("expected a return with value");
    };
    let tree::ExprKind::Cast { value: inner, .. } = &value.kind else {
        panic!("expected an implicit cast, got {:?}", value.kind);
    };
    assert_eq!(store.get(value.result).storage(), Storage::Pointer);
    assert_eq!(store.get(inner.result).storage(), Storage::Null);
}

#[test]
fn test_parameters_are_visible_in_body() {
    let f = func_decl(
        "add",
        prototype(
            vec![param("a", builtin(Storage::Int)), param("b", builtin(Storage::Int))],
            builtin(Storage::Int),
            Variadism::None,
        ),
        Some(list(vec![ret(Some(binarithm(
            tern_ast::BinOp::Add,
            ident("a"),
            ident("b"),
        )))])),
    );
    assert!(check_unit(&unit_of(vec![f])).is_ok());
}

#[test]
fn test_unnamed_parameters_are_rejected() {
    let mut f = func_decl(
        "f",
        prototype(
            vec![param("a", builtin(Storage::Int))],
            builtin(Storage::Void),
            Variadism::None,
        ),
        Some(list(vec![])),
    );
    if let DeclKind::Func(func) = &mut f.kind {
        func.prototype.params[0].name = None;
    }
    let err = check_unit(&unit_of(vec![f])).unwrap_err();
    assert!(err.to_string().contains("must be named"));
}

#[test]
fn test_c_variadism_is_rejected() {
    let f = func_decl(
        "f",
        prototype(
            vec![param("a", builtin(Storage::Int))],
            builtin(Storage::Void),
            Variadism::C,
        ),
        Some(list(vec![])),
    );
    let err = check_unit(&unit_of(vec![f])).unwrap_err();
    assert!(err.to_string().contains("C-style variadism"));
}

#[test]
fn test_special_functions_must_return_void() {
    let mut f = int_fn("boot", list(vec![ret(Some(int(0)))]));
    if let DeclKind::Func(func) = &mut f.kind {
        func.flags = FnFlags {
            init: true,
            ..FnFlags::default()
        };
    }
    let err = check_unit(&unit_of(vec![f])).unwrap_err();
    assert!(err.to_string().contains("must return void"));
}

#[test]
fn test_special_functions_cannot_be_exported() {
    let mut f = func_decl(
        "boot",
        prototype(Vec::new(), builtin(Storage::Void), Variadism::None),
        Some(list(vec![])),
    );
    f.exported = true;
    if let DeclKind::Func(func) = &mut f.kind {
        func.flags = FnFlags {
            test: true,
            ..FnFlags::default()
        };
    }
    let err = check_unit(&unit_of(vec![f])).unwrap_err();
    assert!(err.to_string().contains("cannot be exported"));
}

#[test]
fn test_prototypes_and_forward_globals_produce_no_decls() {
    let proto = func_decl(
        "f",
        prototype(Vec::new(), builtin(Storage::Void), Variadism::None),
        None,
    );
    let forward = global_decl("g", builtin(Storage::Int), None);
    let (_, unit) = check_unit(&unit_of(vec![proto, forward])).unwrap();
    assert!(unit.decls.is_empty());
}

#[test]
fn test_global_initializer_is_evaluated() {
    let g = global_decl(
        "counter",
        builtin(Storage::Int),
        Some(binarithm(tern_ast::BinOp::Multiply, int(6), int(7))),
    );
    let (_, unit) = check_unit(&unit_of(vec![g])).unwrap();

    let tree::DeclKind::Global { value, .. } = &unit.decls[0].kind else {
        panic!("expected a global declaration");
    };
    assert!(matches!(value.as_value(), Some(tree::Value::Int(42))));
}

#[test]
fn test_global_initializer_must_be_constant() {
    // A global cannot be initialized from a function call.
    let f = func_decl(
        "f",
        prototype(Vec::new(), builtin(Storage::Int), Variadism::None),
        Some(list(vec![ret(Some(int(1)))])),
    );
    let g = global_decl("counter", builtin(Storage::Int), Some(call("f", vec![])));
    let err = check_unit(&unit_of(vec![f, g])).unwrap_err();
    assert!(err.to_string().contains("evaluate global initializer"));
}

#[test]
fn test_static_binding_gets_synthetic_name() {
    let body = list(vec![
        static_binding("counter", Some(builtin(Storage::Int)), int(0)),
        static_binding("other", Some(builtin(Storage::Int)), int(1)),
    ]);
    let (_, unit) = check_body(body).unwrap();

    let exprs = body_exprs(&unit);
    let mut mangled = Vec::new();
    for expr in exprs {
        let tree::ExprKind::Binding(bindings) = &expr.kind else {
            panic!("expected a binding");
        };
        let object = unit.scopes.object(bindings[0].object);
        assert!(matches!(
            bindings[0].initializer.as_value(),
            Some(tree::Value::Int(_))
        ));
        mangled.push(object.mangled.clone());
    }
    assert_eq!(mangled, vec![Ident::new("static.0"), Ident::new("static.1")]);
}

#[test]
fn test_static_binding_initializer_must_be_constant() {
    let body = list(vec![
        binding("x", Some(builtin(Storage::Int)), int(1)),
        static_binding("s", Some(builtin(Storage::Int)), ident("x")),
    ]);
    let err = check_body(body).unwrap_err();
    assert!(err.to_string().contains("static initializer"));
}

#[test]
fn test_type_declaration_produces_type_decl() {
    let t = type_decl("Pair", builtin(Storage::Int));
    let (store, unit) = check_unit(&unit_of(vec![t])).unwrap();

    let tree::DeclKind::Type(ty) = &unit.decls[0].kind else {
        panic!("expected a type declaration");
    };
    assert_eq!(store.get(*ty).storage(), Storage::Int);
    assert_eq!(unit.decls[0].ident, Ident::new("Pair"));
}
