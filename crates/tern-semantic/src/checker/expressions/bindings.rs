//! Binding expressions and assignment.

use tracing::trace;

use tern_ast as ast;
use tern_ast::BinOp;
use tern_core::type_system::TypeKind;
use tern_core::{Error, Ident, Result, Span, TypeId};

use crate::checker::core::Context;
use crate::checker::helpers::lower_implicit_cast;
use crate::eval::eval_expr;
use crate::scope::{ObjectKind, ScopeObject};
use crate::tree;

impl Context<'_> {
    pub(super) fn check_expr_binding(
        &mut self,
        bindings: &[ast::Binding],
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("binding");
        let mut checked = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let declared = match &binding.ty {
                Some(atype) => {
                    let ty = self.resolve_atype(atype)?;
                    Some(self.store.lookup_with_flags(ty, binding.is_const))
                }
                None => None,
            };

            let initializer = self.check_expression(&binding.init, declared)?;
            let ty = match declared {
                Some(ty) => ty,
                None => self
                    .store
                    .lookup_with_flags(initializer.result, binding.is_const),
            };

            let size = self.store.get(ty).size;
            if size.is_none() || size == Some(0) {
                return Err(Error::SemanticWithSpan(
                    "Cannot create binding for type of zero or undefined size".to_string(),
                    span,
                ));
            }
            if !self.store.is_assignable(ty, initializer.result) {
                return Err(self.type_mismatch_error(
                    "Initializer is not assignable to binding type",
                    ty,
                    initializer.result,
                    binding.init.span,
                ));
            }
            let mut initializer = lower_implicit_cast(ty, initializer);

            let name = Ident::new(&binding.name);
            let object = if binding.is_static {
                // Statics are evaluated now and lowered to unit-lifetime
                // declarations under a synthetic name.
                initializer = eval_expr(self.store, &initializer).map_err(|_| {
                    Error::Eval(
                        "Unable to evaluate static initializer at compile time".to_string(),
                        binding.init.span,
                    )
                })?;
                let mangled = Ident::new(format!("static.{}", self.static_id));
                self.static_id += 1;
                self.scopes.insert(
                    self.current,
                    ScopeObject {
                        kind: ObjectKind::Decl,
                        name,
                        mangled,
                        ty,
                        value: None,
                    },
                )
            } else {
                self.scopes.insert(
                    self.current,
                    ScopeObject {
                        kind: ObjectKind::Bind,
                        name: name.clone(),
                        mangled: name,
                        ty,
                        value: None,
                    },
                )
            };

            checked.push(tree::Binding {
                object,
                initializer,
            });
        }

        Ok(tree::Expr {
            result: TypeId::VOID,
            terminates: false,
            kind: tree::ExprKind::Binding(checked),
        })
    }

    pub(super) fn check_expr_assign(
        &mut self,
        op: Option<BinOp>,
        object: &ast::Expr,
        value: &ast::Expr,
        indirect: bool,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("assign");
        let object_expr = self.check_expression(object, None)?;
        let value_expr = self.check_expression(value, Some(object_expr.result))?;

        let value_expr = if indirect {
            let dealiased = self.store.dealias(object_expr.result);
            match self.store.get(dealiased).kind {
                TypeKind::Pointer { nullable: true, .. } => {
                    return Err(Error::SemanticWithSpan(
                        "Cannot dereference nullable pointer type".to_string(),
                        span,
                    ));
                }
                TypeKind::Pointer { referent, .. } => {
                    if !self.store.is_assignable(referent, value_expr.result) {
                        return Err(self.type_mismatch_error(
                            "Value type is not assignable to pointer type",
                            referent,
                            value_expr.result,
                            value.span,
                        ));
                    }
                    lower_implicit_cast(referent, value_expr)
                }
                _ => {
                    return Err(Error::SemanticWithSpan(
                        "Cannot dereference non-pointer type for assignment".to_string(),
                        span,
                    ));
                }
            }
        } else {
            if !matches!(object_expr.kind, tree::ExprKind::Access(_)) {
                return Err(Error::SemanticWithSpan(
                    "Cannot assign to expression".to_string(),
                    span,
                ));
            }
            if self.store.get(object_expr.result).is_const {
                return Err(Error::SemanticWithSpan(
                    "Cannot assign to const object".to_string(),
                    span,
                ));
            }
            if !self
                .store
                .is_assignable(object_expr.result, value_expr.result)
            {
                return Err(self.type_mismatch_error(
                    "rvalue type is not assignable to lvalue",
                    object_expr.result,
                    value_expr.result,
                    value.span,
                ));
            }
            lower_implicit_cast(object_expr.result, value_expr)
        };

        Ok(tree::Expr {
            result: TypeId::VOID,
            terminates: false,
            kind: tree::ExprKind::Assign {
                op,
                indirect,
                object: Box::new(object_expr),
                value: Box::new(value_expr),
            },
        })
    }
}
