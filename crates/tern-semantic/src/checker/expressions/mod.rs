//! Expression elaboration.
//!
//! One procedure per expression kind, dispatched from
//! [`Context::check_expression`]. Each procedure produces a typed expression
//! with a result type and termination flag; the `hint` parameter carries the
//! contextually expected type and drives inference in literals.
//!
//! Split into focused submodules:
//! - `access`: identifiers, indexing, field selection
//! - `bindings`: `let` bindings and assignment
//! - `calls`: function calls and variadic lowering
//! - `casts`: cast operators and measurement
//! - `control_flow`: branches, loops, switch, return, defer
//! - `literals`: array and struct literals

mod access;
mod bindings;
mod calls;
mod casts;
mod control_flow;
mod literals;
mod operators;

use tracing::trace;

use tern_ast as ast;
use tern_core::{Error, Result, Span, Storage, TypeId};

use crate::checker::core::Context;
use crate::tree;

impl Context<'_> {
    /// Checks an expression, producing its typed form.
    ///
    /// `hint` is the contextually expected type, or `None` when the context
    /// imposes nothing. Hints steer literal inference; they never override
    /// an expression's own typing rules.
    pub fn check_expression(
        &mut self,
        aexpr: &ast::Expr,
        hint: Option<TypeId>,
    ) -> Result<tree::Expr> {
        match &aexpr.kind {
            ast::ExprKind::Access(access) => self.check_expr_access(access, aexpr.span),
            ast::ExprKind::Assert { cond, message } => {
                self.check_expr_assert(cond.as_deref(), message.as_deref(), aexpr.span)
            }
            ast::ExprKind::Assign {
                op,
                object,
                value,
                indirect,
            } => self.check_expr_assign(*op, object, value, *indirect, aexpr.span),
            ast::ExprKind::Binarithm { op, lhs, rhs } => {
                self.check_expr_binarithm(*op, lhs, rhs, aexpr.span)
            }
            ast::ExprKind::Binding(bindings) => self.check_expr_binding(bindings, aexpr.span),
            ast::ExprKind::Call { callee, args } => {
                self.check_expr_call(callee, args, aexpr.span)
            }
            ast::ExprKind::Cast { kind, value, ty } => {
                self.check_expr_cast(*kind, value, ty, aexpr.span)
            }
            ast::ExprKind::Constant(constant) => {
                self.check_expr_constant(constant, hint, aexpr.span)
            }
            ast::ExprKind::Control { kind, label } => {
                self.check_expr_control(*kind, label.as_deref(), aexpr.span)
            }
            ast::ExprKind::Defer(deferred) => self.check_expr_defer(deferred, aexpr.span),
            ast::ExprKind::For(for_expr) => self.check_expr_for(for_expr, aexpr.span),
            ast::ExprKind::If {
                cond,
                true_branch,
                false_branch,
            } => self.check_expr_if(cond, true_branch, false_branch.as_deref(), aexpr.span),
            ast::ExprKind::List(exprs) => self.check_expr_list(exprs),
            ast::ExprKind::Measure(measure) => self.check_expr_measure(measure, aexpr.span),
            ast::ExprKind::Return(value) => self.check_expr_return(value.as_deref(), aexpr.span),
            ast::ExprKind::Slice { object, start, end } => {
                self.check_expr_slice(object, start.as_deref(), end.as_deref(), aexpr.span)
            }
            ast::ExprKind::Struct {
                autofill,
                name,
                fields,
            } => self.check_expr_struct(*autofill, name.as_ref(), fields, aexpr.span),
            ast::ExprKind::Switch { value, cases } => {
                self.check_expr_switch(value, cases, aexpr.span)
            }
            ast::ExprKind::Unarithm { op, operand } => {
                self.check_expr_unarithm(*op, operand, aexpr.span)
            }
        }
    }

    /// The dealiased storage class of a result type; enums keep their own
    /// storage tag here.
    pub(crate) fn storage(&self, id: TypeId) -> Storage {
        self.store.get(self.store.dealias(id)).storage()
    }

    fn check_expr_list(&mut self, exprs: &[ast::Expr]) -> Result<tree::Expr> {
        trace!("expression-list");
        let scope = self.push_scope(crate::scope::ScopeClass::Block, None);

        let mut checked = Vec::with_capacity(exprs.len());
        for expr in exprs {
            checked.push(self.check_expression(expr, None)?);
        }
        let (result, terminates) = checked
            .last()
            .map_or((TypeId::VOID, false), |last| (last.result, last.terminates));

        self.pop_scope();
        Ok(tree::Expr {
            result,
            terminates,
            kind: tree::ExprKind::List {
                scope,
                exprs: checked,
            },
        })
    }

    fn check_expr_constant(
        &mut self,
        constant: &ast::Constant,
        hint: Option<TypeId>,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("constant");
        let (result, value) = match constant {
            ast::Constant::Int { storage, value } => {
                (self.store.builtin(*storage, false), tree::Value::Int(*value))
            }
            ast::Constant::Uint { storage, value } => (
                self.store.builtin(*storage, false),
                tree::Value::Uint(*value),
            ),
            ast::Constant::Rune(rune) => (TypeId::RUNE, tree::Value::Rune(*rune)),
            ast::Constant::Bool(value) => (TypeId::BOOL, tree::Value::Bool(*value)),
            ast::Constant::Str(value) => (TypeId::STRING, tree::Value::Str(value.clone())),
            ast::Constant::Null => (TypeId::NULL, tree::Value::Null),
            ast::Constant::Void => (TypeId::VOID, tree::Value::Void),
            ast::Constant::Float { .. } => {
                return Err(Error::SemanticWithSpan(
                    "Floating-point constants are not implemented".to_string(),
                    span,
                ));
            }
            ast::Constant::Array(items) => return self.check_expr_array(items, hint, span),
        };
        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Constant(value),
        })
    }

    fn check_expr_assert(
        &mut self,
        cond: Option<&ast::Expr>,
        message: Option<&ast::Expr>,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("assert");
        let mut terminates = false;
        let cond = match cond {
            Some(acond) => {
                let checked = self.check_expression(acond, Some(TypeId::BOOL))?;
                if self.storage(checked.result) != Storage::Bool {
                    return Err(Error::SemanticWithSpan(
                        "Assertion condition must be boolean".to_string(),
                        acond.span,
                    ));
                }
                Some(Box::new(checked))
            }
            // The condition-less form aborts unconditionally.
            None => {
                terminates = true;
                None
            }
        };

        let message = match message {
            Some(amessage) => {
                let checked = self.check_expression(amessage, Some(TypeId::STRING))?;
                if self.storage(checked.result) != Storage::String {
                    return Err(Error::SemanticWithSpan(
                        "Assertion message must be string".to_string(),
                        amessage.span,
                    ));
                }
                checked
            }
            None => {
                let path = self.path.as_deref().unwrap_or("<unknown>");
                let text = format!(
                    "Assertion failed: {path}:{}:{}",
                    span.start.line, span.start.column
                );
                let result = self.store.builtin(Storage::String, true);
                tree::Expr {
                    result,
                    terminates: false,
                    kind: tree::ExprKind::Constant(tree::Value::Str(text)),
                }
            }
        };

        Ok(tree::Expr {
            result: TypeId::VOID,
            terminates,
            kind: tree::ExprKind::Assert {
                cond,
                message: Box::new(message),
            },
        })
    }
}
