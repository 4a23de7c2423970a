//! Cast operators and measurement expressions.

use tracing::trace;

use tern_ast as ast;
use tern_ast::CastKind;
use tern_core::type_system::TypeKind;
use tern_core::{Error, Result, Span, Storage, TypeId};

use crate::checker::core::Context;
use crate::tree;

impl Context<'_> {
    pub(super) fn check_expr_cast(
        &mut self,
        kind: CastKind,
        value: &ast::Expr,
        ty: &ast::AType,
        _span: Span,
    ) -> Result<tree::Expr> {
        trace!("cast");
        let secondary = self.resolve_atype(ty)?;
        let value_expr = self.check_expression(value, Some(secondary))?;
        if !self.store.is_castable(secondary, value_expr.result) {
            return Err(self.type_mismatch_error(
                "Invalid cast",
                secondary,
                value_expr.result,
                ty.span,
            ));
        }

        if matches!(kind, CastKind::Assertion | CastKind::Test) {
            let primary = self.store.dealias(value_expr.result);
            let TypeKind::Tagged { members } = &self.store.get(primary).kind else {
                return Err(Error::SemanticWithSpan(
                    "Expected a tagged union type".to_string(),
                    value.span,
                ));
            };
            let target = self.store.dealias(secondary);
            if !members.iter().any(|&m| self.store.dealias(m) == target) {
                return Err(Error::SemanticWithSpan(
                    "Type is not a valid member of the tagged union type".to_string(),
                    ty.span,
                ));
            }
        }

        let result = match kind {
            CastKind::Cast | CastKind::Assertion => secondary,
            CastKind::Test => TypeId::BOOL,
        };
        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Cast {
                kind,
                secondary,
                value: Box::new(value_expr),
            },
        })
    }

    pub(super) fn check_expr_measure(
        &mut self,
        measure: &ast::Measure,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("measure");
        let kind = match measure {
            ast::Measure::Len(value) => {
                let value_expr = self.check_expression(value, None)?;
                let storage = self.storage(value_expr.result);
                if !matches!(storage, Storage::Array | Storage::Slice | Storage::String) {
                    return Err(Error::SemanticWithSpan(
                        "len argument must be of an array, slice, or str type".to_string(),
                        value.span,
                    ));
                }
                let dealiased = self.store.dealias(value_expr.result);
                if self.store.get(dealiased).size.is_none() {
                    return Err(Error::SemanticWithSpan(
                        "Cannot take length of array type with undefined length".to_string(),
                        value.span,
                    ));
                }
                tree::Measure::Len(Box::new(value_expr))
            }
            ast::Measure::Size(atype) => {
                let ty = self.resolve_atype(atype)?;
                tree::Measure::Size(ty)
            }
            ast::Measure::Offset(_) => {
                return Err(Error::SemanticWithSpan(
                    "offset measurement is not implemented".to_string(),
                    span,
                ));
            }
        };

        Ok(tree::Expr {
            result: TypeId::SIZE,
            terminates: false,
            kind: tree::ExprKind::Measure(kind),
        })
    }
}
