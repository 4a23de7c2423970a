//! Function calls and variadic argument lowering.

use tracing::trace;

use tern_ast as ast;
use tern_core::type_system::{TypeKind, Variadism};
use tern_core::{Error, Result, Span, TypeId};

use crate::checker::core::Context;
use crate::checker::helpers::lower_implicit_cast;
use crate::tree;

impl Context<'_> {
    pub(super) fn check_expr_call(
        &mut self,
        callee: &ast::Expr,
        args: &[ast::CallArg],
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("call");
        let callee_expr = self.check_expression(callee, None)?;

        let Some(fntype) = self.store.dereference(callee_expr.result) else {
            return Err(Error::SemanticWithSpan(
                "Cannot dereference nullable pointer type for function call".to_string(),
                span,
            ));
        };
        let TypeKind::Function {
            params,
            result,
            variadism,
        } = self.store.get(fntype).kind.clone()
        else {
            return Err(Error::SemanticWithSpan(
                "Cannot call non-function type".to_string(),
                span,
            ));
        };

        let mut checked_args = Vec::with_capacity(args.len());
        let mut next_arg = 0usize;
        for (i, &param) in params.iter().enumerate() {
            if next_arg >= args.len() {
                return Err(Error::SemanticWithSpan(
                    "Not enough arguments for function call".to_string(),
                    span,
                ));
            }

            let last_param = i + 1 == params.len();
            if last_param && variadism == Variadism::Native && !args[next_arg].variadic {
                // Collect the remaining loose arguments into an array
                // literal and hand it to the slice parameter.
                let vaargs = self.lower_vaargs(&args[next_arg..], param)?;
                checked_args.push(lower_implicit_cast(param, vaargs));
                next_arg = args.len();
                break;
            }

            let arg = &args[next_arg];
            let value = self.check_expression(&arg.value, Some(param))?;
            if !self.store.is_assignable(param, value.result) {
                return Err(self.type_mismatch_error(
                    "Argument is not assignable to parameter type",
                    param,
                    value.result,
                    arg.value.span,
                ));
            }
            checked_args.push(lower_implicit_cast(param, value));
            next_arg += 1;
        }
        if next_arg < args.len() {
            return Err(Error::SemanticWithSpan(
                "Too many arguments for function call".to_string(),
                span,
            ));
        }

        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Call {
                callee: Box::new(callee_expr),
                args: checked_args,
            },
        })
    }

    /// Rewrites the trailing loose arguments of a variadic call into a
    /// synthetic array literal of the parameter's element type.
    fn lower_vaargs(&mut self, args: &[ast::CallArg], param: TypeId) -> Result<tree::Expr> {
        let element = match self.store.get(self.store.dealias(param)).kind {
            TypeKind::Slice { element } | TypeKind::Array { element, .. } => element,
            _ => {
                return Err(Error::Semantic(
                    "variadic parameter does not have a slice type".to_string(),
                ));
            }
        };

        let span = args[0].value.span;
        let items = args
            .iter()
            .map(|arg| ast::ArrayItem {
                value: arg.value.clone(),
                expand: false,
            })
            .collect();
        let synthetic = ast::Expr {
            span,
            kind: ast::ExprKind::Constant(ast::Constant::Array(items)),
        };

        let hint = self.store.lookup_array(element, None);
        let value = self.check_expression(&synthetic, Some(hint))?;
        match self.store.get(value.result).kind {
            TypeKind::Array { element: got, .. } if got == element => Ok(value),
            _ => Err(Error::SemanticWithSpan(
                "Argument is not assignable to variadic parameter type".to_string(),
                span,
            )),
        }
    }
}
