//! Shared helpers for the check pass.

use tern_ast::CastKind;
use tern_core::{Error, Span, TypeId};

use crate::checker::core::Context;
use crate::tree::{Expr, ExprKind};

/// Wraps `expr` in an implicit cast to `to`, unless the types already match.
///
/// This is the single place implicit conversions are materialized; the cast
/// preserves the wrapped expression's termination.
pub(crate) fn lower_implicit_cast(to: TypeId, expr: Expr) -> Expr {
    if to == expr.result {
        return expr;
    }
    Expr {
        result: to,
        terminates: expr.terminates,
        kind: ExprKind::Cast {
            kind: CastKind::Cast,
            secondary: to,
            value: Box::new(expr),
        },
    }
}

impl Context<'_> {
    /// A type mismatch diagnostic with both types rendered.
    pub(crate) fn type_mismatch_error(
        &self,
        message: &str,
        expected: TypeId,
        found: TypeId,
        span: Span,
    ) -> Error {
        Error::SemanticWithSpan(
            format!(
                "{message}: expected '{}', found '{}'",
                self.store.type_name(expected),
                self.store.type_name(found)
            ),
            span,
        )
    }
}
