//! Control flow elaboration tests: loops, labels, branches, switch, defer.

mod common;

use common::*;
use tern_ast::ExprKind as AstExprKind;
use tern_core::{Storage, TypeId};
use tern_semantic::scope::ScopeClass;
use tern_semantic::tree::ExprKind;

#[test]
fn test_labelled_break_targets_outer_loop() {
    // for :outer (true) { for (true) { break :outer; }; };
    let inner = for_loop(None, boolean(true), list(vec![break_to(Some("outer"))]));
    let outer = for_loop(Some("outer"), boolean(true), list(vec![inner]));
    let (_, unit) = check_body(list(vec![outer])).unwrap();

    let exprs = body_exprs(&unit);
    let ExprKind::For {
        scope: outer_scope,
        body: outer_body,
        ..
    } = &exprs[0].kind
    else {
        panic!("expected the outer for loop");
    };
    let ExprKind::List { exprs: inner_list, .. } = &outer_body.kind else {
        panic!("expected the outer loop body");
    };
    let ExprKind::For { body: inner_body, .. } = &inner_list[0].kind else {
        panic!("expected the inner for loop");
    };
    let ExprKind::List { exprs: break_list, .. } = &inner_body.kind else {
        panic!("expected the inner loop body");
    };
    let ExprKind::Control { target, .. } = &break_list[0].kind else {
        panic!("expected the break");
    };

    assert_eq!(target, outer_scope);
    assert_eq!(unit.scopes.get(*target).class, ScopeClass::Loop);
    assert_eq!(unit.scopes.get(*target).label.as_deref(), Some("outer"));
}

#[test]
fn test_unlabelled_break_targets_innermost_loop() {
    let inner = for_loop(None, boolean(true), list(vec![break_to(None)]));
    let outer = for_loop(Some("outer"), boolean(true), list(vec![inner]));
    let (_, unit) = check_body(list(vec![outer])).unwrap();

    let exprs = body_exprs(&unit);
    let ExprKind::For { body: outer_body, .. } = &exprs[0].kind else {
        panic!("expected the outer for loop");
    };
    let ExprKind::List { exprs: inner_list, .. } = &outer_body.kind else {
        panic!("expected the outer loop body");
    };
    let ExprKind::For {
        scope: inner_scope,
        body: inner_body,
        ..
    } = &inner_list[0].kind
    else {
        panic!("expected the inner for loop");
    };
    let ExprKind::List { exprs: break_list, .. } = &inner_body.kind else {
        panic!("expected the inner loop body");
    };
    let ExprKind::Control { target, .. } = &break_list[0].kind else {
        panic!("expected the break");
    };
    assert_eq!(target, inner_scope);
    assert!(break_list[0].terminates);
}

#[test]
fn test_break_to_unknown_label_is_rejected() {
    let inner = for_loop(None, boolean(true), list(vec![break_to(Some("nope"))]));
    let outer = for_loop(Some("outer"), boolean(true), list(vec![inner]));
    let err = check_body(list(vec![outer])).unwrap_err();
    assert!(err.to_string().contains("Unknown label nope"));
}

#[test]
fn test_break_outside_loop_is_rejected() {
    let err = check_body(list(vec![break_to(None)])).unwrap_err();
    assert!(err.to_string().contains("loop"));
}

#[test]
fn test_duplicate_loop_labels_are_rejected() {
    let inner = for_loop(Some("a"), boolean(true), list(vec![]));
    let outer = for_loop(Some("a"), boolean(true), list(vec![inner]));
    let err = check_body(list(vec![outer])).unwrap_err();
    assert!(err.to_string().contains("unique"));
}

#[test]
fn test_non_boolean_loop_condition_is_rejected() {
    let loop_expr = for_loop(None, int(1), list(vec![]));
    let err = check_body(list(vec![loop_expr])).unwrap_err();
    assert!(err.to_string().contains("boolean"));
}

#[test]
fn test_if_without_else_is_void() {
    let body = list(vec![if_else(boolean(true), list(vec![int(1)]), None)]);
    let (_, unit) = check_body(body).unwrap();
    let exprs = body_exprs(&unit);
    assert_eq!(exprs[0].result, TypeId::VOID);
    assert!(!exprs[0].terminates);
}

#[test]
fn test_if_with_both_branches_terminating_terminates() {
    // fn f() int = { if (true) { return 1; } else { return 2; }; };
    let branches = if_else(
        boolean(true),
        list(vec![ret(Some(int(1)))]),
        Some(list(vec![ret(Some(int(2)))])),
    );
    let main = func_decl(
        "f",
        prototype(
            Vec::new(),
            builtin(Storage::Int),
            tern_core::type_system::Variadism::None,
        ),
        Some(list(vec![branches])),
    );
    let (_, unit) = check_unit(&unit_of(vec![main])).unwrap();

    let body = first_body(&unit);
    assert!(body.terminates);
    let ExprKind::List { exprs, .. } = &body.kind else {
        panic!("expected a list body");
    };
    assert!(exprs[0].terminates);
    assert_eq!(exprs[0].result, TypeId::VOID);
}

#[test]
fn test_if_takes_surviving_branch_type() {
    // One branch diverges; the other supplies the result type.
    let branches = if_else(
        boolean(true),
        list(vec![ret(None)]),
        Some(list(vec![int(7)])),
    );
    let body = list(vec![binding("x", None, branches)]);
    let (_, unit) = check_body(body).unwrap();

    let exprs = body_exprs(&unit);
    let ExprKind::Binding(bindings) = &exprs[0].kind else {
        panic!("expected a binding");
    };
    assert_eq!(bindings[0].initializer.result, TypeId::INT);
}

#[test]
fn test_if_branch_type_mismatch_is_rejected() {
    let branches = if_else(
        boolean(true),
        list(vec![int(1)]),
        Some(list(vec![boolean(false)])),
    );
    let err = check_body(list(vec![binding("x", None, branches)])).unwrap_err();
    assert!(err.to_string().contains("single type"));
}

#[test]
fn test_non_boolean_if_condition_is_rejected() {
    let err = check_body(list(vec![if_else(int(1), list(vec![]), None)])).unwrap_err();
    assert!(err.to_string().contains("boolean"));
}

#[test]
fn test_switch_result_from_non_terminating_cases() {
    // All cases agree on int; the switch takes that type.
    let sw = switch(
        int(1),
        vec![
            (vec![int(1)], int(10)),
            (vec![int(2)], int(20)),
        ],
    );
    let body = list(vec![binding("x", None, sw)]);
    let (_, unit) = check_body(body).unwrap();

    let exprs = body_exprs(&unit);
    let ExprKind::Binding(bindings) = &exprs[0].kind else {
        panic!("expected a binding");
    };
    assert_eq!(bindings[0].initializer.result, TypeId::INT);
}

#[test]
fn test_switch_case_type_mismatch_is_rejected() {
    let sw = switch(int(1), vec![(vec![boolean(true)], int(10))]);
    let err = check_body(list(vec![binding("x", None, sw)])).unwrap_err();
    assert!(err.to_string().contains("Invalid type for switch case"));
}

#[test]
fn test_switch_case_options_must_be_constant() {
    let body = list(vec![
        binding("x", Some(builtin(Storage::Int)), int(3)),
        switch(int(1), vec![(vec![ident("x")], list(vec![]))]),
    ]);
    let err = check_body(body).unwrap_err();
    assert!(err.to_string().contains("evaluate"));
}

#[test]
fn test_fully_terminating_switch_terminates() {
    let sw = switch(
        int(1),
        vec![
            (vec![int(1)], ret(None)),
            (vec![], ret(None)),
        ],
    );
    let (_, unit) = check_body(list(vec![sw])).unwrap();
    let exprs = body_exprs(&unit);
    assert!(exprs[0].terminates);
    assert_eq!(exprs[0].result, TypeId::VOID);
}

#[test]
fn test_defer_cannot_nest() {
    let inner = expr(AstExprKind::Defer(Box::new(int(1))));
    let outer = expr(AstExprKind::Defer(Box::new(inner)));
    let err = check_body(list(vec![outer])).unwrap_err();
    assert!(err.to_string().contains("defer"));
}

#[test]
fn test_defer_checks_deferred_expression() {
    let deferred = expr(AstExprKind::Defer(Box::new(call("f", vec![]))));
    let f = func_decl(
        "f",
        prototype(
            Vec::new(),
            builtin(Storage::Void),
            tern_core::type_system::Variadism::None,
        ),
        None,
    );
    let main = func_decl(
        "main",
        prototype(
            Vec::new(),
            builtin(Storage::Void),
            tern_core::type_system::Variadism::None,
        ),
        Some(list(vec![deferred])),
    );
    let (_, unit) = check_unit(&unit_of(vec![f, main])).unwrap();
    let exprs = body_exprs(&unit);
    assert!(matches!(exprs[0].kind, ExprKind::Defer(_)));
    assert_eq!(exprs[0].result, TypeId::VOID);
}
