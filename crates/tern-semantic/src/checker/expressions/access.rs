//! Identifier, index, and field access.

use tracing::trace;

use tern_ast as ast;
use tern_core::type_system::TypeKind;
use tern_core::{Error, Result, Span, Storage, TypeId};

use crate::checker::core::Context;
use crate::checker::helpers::lower_implicit_cast;
use crate::scope::ObjectKind;
use crate::tree;

impl Context<'_> {
    pub(super) fn check_expr_access(
        &mut self,
        access: &ast::Access,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("access");
        match access {
            ast::Access::Ident(ident) => self.check_access_ident(ident, span),
            ast::Access::Index { array, index } => self.check_access_index(array, index),
            ast::Access::Field { object, field } => self.check_access_field(object, field, span),
        }
    }

    fn check_access_ident(&mut self, ident: &tern_core::Ident, span: Span) -> Result<tree::Expr> {
        let Some(obj_ref) = self.scopes.lookup(self.current, ident) else {
            return Err(Error::SemanticWithSpan(
                format!("Unknown object '{ident}'"),
                span,
            ));
        };
        let object = self.scopes.object(obj_ref);
        match object.kind {
            // Lower constants: the stored value is spliced into the use
            // site, so no Const object reference survives checking.
            ObjectKind::Const => Ok(object
                .value
                .clone()
                .expect("constant object carries a value")),
            ObjectKind::Type => Err(Error::SemanticWithSpan(
                "Expected identifier, got type".to_string(),
                span,
            )),
            ObjectKind::Bind | ObjectKind::Decl => Ok(tree::Expr {
                result: object.ty,
                terminates: false,
                kind: tree::ExprKind::Access(tree::Access::Object(obj_ref)),
            }),
        }
    }

    fn check_access_index(&mut self, array: &ast::Expr, index: &ast::Expr) -> Result<tree::Expr> {
        let array_expr = self.check_expression(array, None)?;
        let index_expr = self.check_expression(index, None)?;

        let Some(atype) = self.store.dereference(array_expr.result) else {
            return Err(Error::SemanticWithSpan(
                "Cannot dereference nullable pointer for indexing".to_string(),
                array.span,
            ));
        };
        let element = match self.store.get(atype).kind {
            TypeKind::Array { element, .. } | TypeKind::Slice { element } => element,
            _ => {
                return Err(Error::SemanticWithSpan(
                    format!(
                        "Cannot index non-array, non-slice {} object",
                        self.storage(atype)
                    ),
                    array.span,
                ));
            }
        };
        if !self.store.is_integer(index_expr.result) {
            return Err(Error::SemanticWithSpan(
                format!(
                    "Cannot use non-integer {} type as slice/array index",
                    self.storage(index_expr.result)
                ),
                index.span,
            ));
        }
        let index_expr = lower_implicit_cast(TypeId::SIZE, index_expr);

        // The container's constness propagates into the element type.
        let container_const = self.store.get(atype).is_const;
        let result = self.store.lookup_with_flags(element, container_const);

        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Access(tree::Access::Index {
                array: Box::new(array_expr),
                index: Box::new(index_expr),
            }),
        })
    }

    pub(super) fn check_expr_slice(
        &mut self,
        object: &ast::Expr,
        start: Option<&ast::Expr>,
        end: Option<&ast::Expr>,
        _span: Span,
    ) -> Result<tree::Expr> {
        trace!("slice");
        let object_expr = self.check_expression(object, None)?;

        let Some(atype) = self.store.dereference(object_expr.result) else {
            return Err(Error::SemanticWithSpan(
                "Cannot dereference nullable pointer for slicing".to_string(),
                object.span,
            ));
        };
        let element = match self.store.get(atype).kind {
            TypeKind::Array { element, .. } | TypeKind::Slice { element } => element,
            _ => {
                return Err(Error::SemanticWithSpan(
                    "Cannot slice non-array, non-slice object".to_string(),
                    object.span,
                ));
            }
        };

        let start_expr = match start {
            Some(bound) => Some(Box::new(self.check_slice_bound(bound)?)),
            None => None,
        };
        let end_expr = match end {
            Some(bound) => Some(Box::new(self.check_slice_bound(bound)?)),
            None => None,
        };

        let result = self.store.lookup_slice(element);
        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Slice {
                object: Box::new(object_expr),
                start: start_expr,
                end: end_expr,
            },
        })
    }

    fn check_slice_bound(&mut self, bound: &ast::Expr) -> Result<tree::Expr> {
        let checked = self.check_expression(bound, None)?;
        if !self.store.is_integer(checked.result) {
            return Err(Error::SemanticWithSpan(
                format!(
                    "Cannot use non-integer {} type as slicing operand",
                    self.storage(checked.result)
                ),
                bound.span,
            ));
        }
        Ok(lower_implicit_cast(TypeId::SIZE, checked))
    }

    fn check_access_field(
        &mut self,
        object: &ast::Expr,
        field: &str,
        span: Span,
    ) -> Result<tree::Expr> {
        let object_expr = self.check_expression(object, None)?;

        let Some(stype) = self.store.dereference(object_expr.result) else {
            return Err(Error::SemanticWithSpan(
                "Cannot dereference nullable pointer for field selection".to_string(),
                object.span,
            ));
        };
        if !matches!(self.storage(stype), Storage::Struct | Storage::Union) {
            return Err(Error::SemanticWithSpan(
                "Cannot select field from non-struct, non-union object".to_string(),
                object.span,
            ));
        }
        let Some(descriptor) = self.store.get_field(stype, field) else {
            return Err(Error::SemanticWithSpan(
                format!("No such struct field '{field}'"),
                span,
            ));
        };
        let descriptor = descriptor.clone();

        Ok(tree::Expr {
            result: descriptor.ty,
            terminates: false,
            kind: tree::ExprKind::Access(tree::Access::Field {
                object: Box::new(object_expr),
                field: descriptor,
            }),
        })
    }
}
