//! Array and struct literals.

use tracing::trace;

use tern_ast as ast;
use tern_core::type_system::TypeKind;
use tern_core::{Error, Ident, Result, Span, TypeId};

use crate::checker::core::Context;
use crate::checker::helpers::lower_implicit_cast;
use crate::tree;

impl Context<'_> {
    pub(super) fn check_expr_array(
        &mut self,
        items: &[ast::ArrayItem],
        hint: Option<TypeId>,
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("array");
        // The hint selects the element type; inference falls back to the
        // first member.
        let hint_kind = hint.map(|h| self.store.get(self.store.dealias(h)).kind.clone());
        let mut element = match &hint_kind {
            Some(TypeKind::Array { element, .. } | TypeKind::Slice { element }) => Some(*element),
            _ => None,
        };

        let mut expand = false;
        let mut checked = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let value = self.check_expression(&item.value, element)?;
            let value = match element {
                None => {
                    element = Some(value.result);
                    value
                }
                Some(element) => {
                    if !self.store.is_assignable(element, value.result) {
                        return Err(self.type_mismatch_error(
                            "Array members must be of a uniform type",
                            element,
                            value.result,
                            item.value.span,
                        ));
                    }
                    lower_implicit_cast(element, value)
                }
            };
            if item.expand {
                if i + 1 != items.len() {
                    return Err(Error::SemanticWithSpan(
                        "Array expansion must be the final member".to_string(),
                        item.value.span,
                    ));
                }
                expand = true;
            }
            checked.push(value);
        }

        let Some(element) = element else {
            return Err(Error::SemanticWithSpan(
                "Cannot infer element type of empty array literal".to_string(),
                span,
            ));
        };

        let result = if expand {
            // Expansion fills a sized destination array; the hint supplies
            // the length.
            let length = match &hint_kind {
                Some(TypeKind::Array {
                    length: Some(length),
                    ..
                }) if *length >= checked.len() as u64 => *length,
                Some(_) => {
                    return Err(Error::SemanticWithSpan(
                        "Cannot expand array into destination type".to_string(),
                        span,
                    ));
                }
                None => {
                    return Err(Error::SemanticWithSpan(
                        "Cannot expand array for inferred type".to_string(),
                        span,
                    ));
                }
            };
            self.store.lookup_array(element, Some(length))
        } else {
            self.store.lookup_array(element, Some(checked.len() as u64))
        };

        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Constant(tree::Value::Array {
                items: checked,
                expand,
            }),
        })
    }

    pub(super) fn check_expr_struct(
        &mut self,
        autofill: bool,
        name: Option<&Ident>,
        fields: &[ast::FieldInit],
        span: Span,
    ) -> Result<tree::Expr> {
        trace!("struct");
        if autofill {
            return Err(Error::SemanticWithSpan(
                "Struct autofill is not implemented".to_string(),
                span,
            ));
        }
        if name.is_some() {
            return Err(Error::SemanticWithSpan(
                "Named struct literals are not implemented".to_string(),
                span,
            ));
        }

        // The literal builds its own struct type from the declared field
        // types; values are checked against those declarations.
        let mut members = Vec::with_capacity(fields.len());
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            if field.embedded {
                return Err(Error::SemanticWithSpan(
                    "Embedded struct fields are not implemented".to_string(),
                    field.value.span,
                ));
            }
            let ty = self.resolve_atype(&field.ty)?;
            let value = self.check_expression(&field.value, Some(ty))?;
            members.push((field.name.clone(), ty));
            values.push(value);
        }

        let plain = self.store.lookup_struct(members, false);
        let result = self.store.lookup_with_flags(plain, true);

        let mut checked = Vec::with_capacity(fields.len());
        for (field, value) in fields.iter().zip(values) {
            let Some(descriptor) = self.store.get_field(result, &field.name) else {
                return Err(Error::SemanticWithSpan(
                    "No field by this name exists for this type".to_string(),
                    span,
                ));
            };
            let descriptor = descriptor.clone();
            if !self.store.is_assignable(descriptor.ty, value.result) {
                return Err(self.type_mismatch_error(
                    "Cannot initialize struct field from value of this type",
                    descriptor.ty,
                    value.result,
                    span,
                ));
            }
            let value = lower_implicit_cast(descriptor.ty, value);
            checked.push(tree::FieldValue {
                field: descriptor,
                value,
            });
        }

        Ok(tree::Expr {
            result,
            terminates: false,
            kind: tree::ExprKind::Struct(checked),
        })
    }
}
