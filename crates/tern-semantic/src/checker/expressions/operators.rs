//! Binary and unary arithmetic.

use tracing::trace;

use tern_ast as ast;
use tern_ast::{BinOp, UnOp};
use tern_core::type_system::TypeKind;
use tern_core::{Error, Result, Span, Storage, TypeId};

use crate::checker::core::Context;
use crate::tree;

impl Context<'_> {
    pub(super) fn check_expr_binarithm(
        &mut self,
        op: BinOp,
        lhs: &ast::Expr,
        rhs: &ast::Expr,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("binarithm");
        let lhs_expr = self.check_expression(lhs, None)?;
        let rhs_expr = self.check_expression(rhs, None)?;

        // Operands must share a storage class exactly; numeric promotion is
        // not implemented.
        let lhs_storage = self.storage(lhs_expr.result);
        let rhs_storage = self.storage(rhs_expr.result);
        if lhs_storage != rhs_storage {
            return Err(Error::SemanticWithSpan(
                format!(
                    "Mismatched binary operand types {lhs_storage} and {rhs_storage} \
                     (numeric promotion is not implemented)"
                ),
                span,
            ));
        }

        let result = if op.is_arithmetic() {
            lhs_expr.result
        } else {
            TypeId::BOOL
        };
        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Binarithm {
                op,
                lhs: Box::new(lhs_expr),
                rhs: Box::new(rhs_expr),
            },
        })
    }

    pub(super) fn check_expr_unarithm(
        &mut self,
        op: UnOp,
        operand: &ast::Expr,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("unarithm");
        let operand_expr = self.check_expression(operand, None)?;

        let result = match op {
            UnOp::LogicalNot => {
                if self.storage(operand_expr.result) != Storage::Bool {
                    return Err(Error::SemanticWithSpan(
                        "Cannot perform logical NOT (!) on non-boolean type".to_string(),
                        operand.span,
                    ));
                }
                TypeId::BOOL
            }
            UnOp::BitNot => {
                if !self.store.is_integer(operand_expr.result) {
                    return Err(Error::SemanticWithSpan(
                        "Cannot perform binary NOT (~) on non-integer type".to_string(),
                        operand.span,
                    ));
                }
                if self.store.is_signed(operand_expr.result) {
                    return Err(Error::SemanticWithSpan(
                        "Cannot perform binary NOT (~) on signed type".to_string(),
                        operand.span,
                    ));
                }
                operand_expr.result
            }
            UnOp::Minus | UnOp::Plus => {
                if !self.store.is_numeric(operand_expr.result) {
                    return Err(Error::SemanticWithSpan(
                        "Cannot perform operation on non-numeric type".to_string(),
                        operand.span,
                    ));
                }
                if !self.store.is_signed(operand_expr.result) {
                    return Err(Error::SemanticWithSpan(
                        "Cannot perform operation on unsigned type".to_string(),
                        operand.span,
                    ));
                }
                operand_expr.result
            }
            UnOp::Address => self.store.lookup_pointer(operand_expr.result, false),
            UnOp::Deref => {
                let dealiased = self.store.dealias(operand_expr.result);
                match self.store.get(dealiased).kind {
                    TypeKind::Pointer { nullable: true, .. } => {
                        return Err(Error::SemanticWithSpan(
                            "Cannot dereference nullable pointer type".to_string(),
                            span,
                        ));
                    }
                    TypeKind::Pointer { referent, .. } => referent,
                    _ => {
                        return Err(Error::SemanticWithSpan(
                            "Cannot de-reference non-pointer type".to_string(),
                            operand.span,
                        ));
                    }
                }
            }
        };

        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Unarithm {
                op,
                operand: Box::new(operand_expr),
            },
        })
    }
}
