//! Control flow: branches, loops, switch, return, defer.

use tracing::trace;

use tern_ast as ast;
use tern_ast::ControlKind;
use tern_core::{Error, Result, Span, Storage, TypeId};

use crate::checker::core::Context;
use crate::checker::helpers::lower_implicit_cast;
use crate::eval::eval_expr;
use crate::scope::ScopeClass;
use crate::tree;

impl Context<'_> {
    pub(super) fn check_expr_control(
        &mut self,
        kind: ControlKind,
        label: Option<&str>,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("control");
        let Some(target) = self.scopes.lookup_loop(self.current, label) else {
            return Err(match label {
                Some(label) => {
                    Error::SemanticWithSpan(format!("Unknown label {label}"), span)
                }
                None => {
                    let verb = match kind {
                        ControlKind::Break => "break",
                        ControlKind::Continue => "continue",
                    };
                    Error::SemanticWithSpan(format!("No enclosing loop to {verb}"), span)
                }
            });
        };

        Ok(tree::Expr {
            result: TypeId::VOID,
            terminates: true,
            kind: tree::ExprKind::Control {
                kind,
                label: label.map(str::to_string),
                target,
            },
        })
    }

    pub(super) fn check_expr_for(
        &mut self,
        for_expr: &ast::ForExpr,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("for");
        let label = for_expr.label.clone();
        let scope = self.push_scope(ScopeClass::Loop, label.clone());

        if let Some(wanted) = &label {
            let mut current = self.scopes.get(scope).parent;
            while let Some(id) = current {
                let ancestor = self.scopes.get(id);
                if ancestor.label.as_deref() == Some(wanted) {
                    return Err(Error::SemanticWithSpan(
                        "for loop label must be unique among its ancestors".to_string(),
                        span,
                    ));
                }
                current = ancestor.parent;
            }
        }

        let bindings = match &for_expr.bindings {
            Some(bindings) => Some(Box::new(self.check_expression(bindings, None)?)),
            None => None,
        };

        let cond = self.check_expression(&for_expr.cond, Some(TypeId::BOOL))?;
        if self.storage(cond.result) != Storage::Bool {
            return Err(Error::SemanticWithSpan(
                "Expected for condition to be boolean".to_string(),
                for_expr.cond.span,
            ));
        }

        let afterthought = match &for_expr.afterthought {
            Some(afterthought) => Some(Box::new(self.check_expression(afterthought, None)?)),
            None => None,
        };
        let body = self.check_expression(&for_expr.body, None)?;

        self.pop_scope();
        Ok(tree::Expr {
            result: TypeId::VOID,
            terminates: false,
            kind: tree::ExprKind::For {
                scope,
                label,
                bindings,
                cond: Box::new(cond),
                afterthought,
                body: Box::new(body),
            },
        })
    }

    pub(super) fn check_expr_if(
        &mut self,
        cond: &ast::Expr,
        true_branch: &ast::Expr,
        false_branch: Option<&ast::Expr>,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("if");
        let cond_expr = self.check_expression(cond, Some(TypeId::BOOL))?;
        let true_expr = self.check_expression(true_branch, None)?;

        let (result, terminates, false_expr) = match false_branch {
            Some(false_branch) => {
                let false_expr = self.check_expression(false_branch, None)?;
                let (result, terminates) = match (true_expr.terminates, false_expr.terminates) {
                    (true, true) => (TypeId::VOID, true),
                    (true, false) => (false_expr.result, false),
                    (false, true) => (true_expr.result, false),
                    (false, false) => {
                        if true_expr.result != false_expr.result {
                            return Err(self.type_mismatch_error(
                                "If branch results must have a single type \
                                 (tagged union results are not implemented)",
                                true_expr.result,
                                false_expr.result,
                                span,
                            ));
                        }
                        (true_expr.result, false)
                    }
                };
                (result, terminates, Some(Box::new(false_expr)))
            }
            None => (TypeId::VOID, true_expr.terminates, None),
        };

        if self.storage(cond_expr.result) != Storage::Bool {
            return Err(Error::SemanticWithSpan(
                "Expected if condition to be boolean".to_string(),
                cond.span,
            ));
        }

        Ok(tree::Expr {
            result,
            terminates,
            kind: tree::ExprKind::If {
                cond: Box::new(cond_expr),
                true_branch: Box::new(true_expr),
                false_branch: false_expr,
            },
        })
    }

    pub(super) fn check_expr_switch(
        &mut self,
        value: &ast::Expr,
        cases: &[ast::Case],
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("switch");
        let value_expr = self.check_expression(value, None)?;
        let scrutinee = value_expr.result;

        // Duplicate and exhaustiveness checking are not implemented.
        let mut result: Option<TypeId> = None;
        let mut checked_cases = Vec::with_capacity(cases.len());
        for case in cases {
            let mut options = Vec::with_capacity(case.options.len());
            for option in &case.options {
                let checked = self.check_expression(option, Some(scrutinee))?;
                if checked.result != scrutinee {
                    return Err(Error::SemanticWithSpan(
                        "Invalid type for switch case".to_string(),
                        option.span,
                    ));
                }
                let evaled = eval_expr(self.store, &checked).map_err(|_| {
                    Error::Eval(
                        "Unable to evaluate case at compile time".to_string(),
                        option.span,
                    )
                })?;
                options.push(evaled);
            }

            let body = self.check_expression(&case.body, Some(scrutinee))?;
            if !body.terminates {
                match result {
                    None => result = Some(body.result),
                    Some(expected) if expected != body.result => {
                        return Err(self.type_mismatch_error(
                            "Switch case results must have a single type \
                             (tagged union results are not implemented)",
                            expected,
                            body.result,
                            span,
                        ));
                    }
                    Some(_) => {}
                }
            }
            checked_cases.push(tree::Case { options, body });
        }

        let (result, terminates) = match result {
            Some(result) => (result, false),
            None => (TypeId::VOID, true),
        };
        Ok(tree::Expr {
            result,
            terminates,
            kind: tree::ExprKind::Switch {
                value: Box::new(value_expr),
                cases: checked_cases,
            },
        })
    }

    pub(super) fn check_expr_return(
        &mut self,
        value: Option<&ast::Expr>,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("return");
        let Some(fn_result) = self.current_fn_result else {
            return Err(Error::SemanticWithSpan(
                "Cannot return outside of a function".to_string(),
                span,
            ));
        };

        let value_expr = match value {
            Some(value) => {
                let checked = self.check_expression(value, Some(fn_result))?;
                if !self.store.is_assignable(fn_result, checked.result) {
                    return Err(self.type_mismatch_error(
                        "Return value is not assignable to function result type",
                        fn_result,
                        checked.result,
                        value.span,
                    ));
                }
                Some(Box::new(lower_implicit_cast(fn_result, checked)))
            }
            None => None,
        };

        Ok(tree::Expr {
            result: TypeId::VOID,
            terminates: true,
            kind: tree::ExprKind::Return(value_expr),
        })
    }

    pub(super) fn check_expr_defer(
        &mut self,
        deferred: &ast::Expr,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("defer");
        if self.deferring {
            return Err(Error::SemanticWithSpan(
                "Cannot defer within another defer expression".to_string(),
                span,
            ));
        }
        self.deferring = true;
        let checked = self.check_expression(deferred, None);
        self.deferring = false;

        Ok(tree::Expr {
            result: TypeId::VOID,
            terminates: false,
            kind: tree::ExprKind::Defer(Box::new(checked?)),
        })
    }
}
