//! Resolution of syntactic types to interned types.
//!
//! This is where the checker, the type store, and the constant evaluator
//! become mutually recursive: array lengths and enum values are ordinary
//! constant expressions, so resolving a type may check and evaluate
//! expressions, which may in turn resolve more types.

use tracing::trace;

use tern_ast as ast;
use tern_core::type_system::{EnumValue, Variadism};
use tern_core::{Error, Result, Storage, TypeId};

use crate::checker::Context;
use crate::eval::eval_expr;
use crate::scope::ObjectKind;
use crate::tree::Value;

impl Context<'_> {
    /// Resolves a type as written in source to its interned form.
    pub fn resolve_atype(&mut self, atype: &ast::AType) -> Result<TypeId> {
        trace!("resolve type");
        let id = match &atype.kind {
            ast::ATypeKind::Builtin(storage) => {
                if !storage.is_primitive() {
                    return Err(Error::SemanticWithSpan(
                        format!("'{storage}' is not a builtin type"),
                        atype.span,
                    ));
                }
                self.store.builtin(*storage, false)
            }

            ast::ATypeKind::Alias { ident, unwrap } => {
                let Some(obj_ref) = self.scopes.lookup(self.current, ident) else {
                    return Err(Error::SemanticWithSpan(
                        format!("Unknown type '{ident}'"),
                        atype.span,
                    ));
                };
                let object = self.scopes.object(obj_ref);
                if object.kind != ObjectKind::Type {
                    return Err(Error::SemanticWithSpan(
                        format!("'{ident}' is not a type"),
                        atype.span,
                    ));
                }
                let target = object.ty;
                let mangled = object.mangled.clone();
                if *unwrap {
                    target
                } else {
                    self.store.lookup_alias(mangled, target)
                }
            }

            ast::ATypeKind::Pointer { referent, nullable } => {
                let referent = self.resolve_atype(referent)?;
                self.store.lookup_pointer(referent, *nullable)
            }

            ast::ATypeKind::Array { length, element } => {
                let element = self.resolve_atype(element)?;
                let length = match length {
                    Some(expr) => Some(self.resolve_array_length(expr)?),
                    None => None,
                };
                self.store.lookup_array(element, length)
            }

            ast::ATypeKind::Slice { element } => {
                let element = self.resolve_atype(element)?;
                self.store.lookup_slice(element)
            }

            ast::ATypeKind::Struct { members } => self.resolve_struct(members, false)?,
            ast::ATypeKind::Union { members } => self.resolve_struct(members, true)?,

            ast::ATypeKind::Tagged { members } => {
                let mut ids = Vec::with_capacity(members.len());
                for member in members {
                    ids.push(self.resolve_atype(member)?);
                }
                self.store.lookup_tagged(ids)
            }

            ast::ATypeKind::Enum { storage, values } => {
                self.resolve_enum(*storage, values, atype.span)?
            }

            ast::ATypeKind::Function(func) => self.resolve_func_type(func)?,
        };
        Ok(self.store.lookup_with_flags(id, atype.is_const))
    }

    /// Array lengths are constant expressions: check, then evaluate.
    fn resolve_array_length(&mut self, expr: &ast::Expr) -> Result<u64> {
        let checked = self.check_expression(expr, Some(TypeId::SIZE))?;
        if !self.store.is_integer(checked.result) {
            return Err(Error::SemanticWithSpan(
                "Array length must be an integer".to_string(),
                expr.span,
            ));
        }
        let evaled = eval_expr(self.store, &checked).map_err(|_| {
            Error::Eval(
                "Unable to evaluate array length at compile time".to_string(),
                expr.span,
            )
        })?;
        match evaled.as_value() {
            Some(Value::Uint(v)) => Ok(*v),
            Some(Value::Int(v)) if *v >= 0 => Ok(*v as u64),
            _ => Err(Error::SemanticWithSpan(
                "Array length must be a non-negative integer".to_string(),
                expr.span,
            )),
        }
    }

    fn resolve_struct(&mut self, members: &[ast::StructMember], is_union: bool) -> Result<TypeId> {
        let mut fields = Vec::with_capacity(members.len());
        for member in members {
            let ty = self.resolve_atype(&member.ty)?;
            fields.push((member.name.clone(), ty));
        }
        Ok(self.store.lookup_struct(fields, is_union))
    }

    fn resolve_enum(
        &mut self,
        storage: Option<Storage>,
        values: &[ast::EnumMember],
        span: tern_core::Span,
    ) -> Result<TypeId> {
        let storage = storage.unwrap_or(Storage::Int);
        if !storage.is_integer() {
            return Err(Error::SemanticWithSpan(
                "Enum storage must be an integer type".to_string(),
                span,
            ));
        }
        let hint = self.store.builtin(storage, false);

        // Implicit values count up from the previous member, starting at 0.
        let mut next = 0i64;
        let mut out = Vec::with_capacity(values.len());
        for member in values {
            let value = match &member.value {
                Some(expr) => {
                    let checked = self.check_expression(expr, Some(hint))?;
                    let evaled = eval_expr(self.store, &checked).map_err(|_| {
                        Error::Eval(
                            "Unable to evaluate enum value at compile time".to_string(),
                            expr.span,
                        )
                    })?;
                    match evaled.as_value() {
                        Some(Value::Int(v)) => *v,
                        Some(Value::Uint(v)) => *v as i64,
                        _ => {
                            return Err(Error::SemanticWithSpan(
                                "Enum value must be an integer constant".to_string(),
                                expr.span,
                            ));
                        }
                    }
                }
                None => next,
            };
            next = value + 1;
            out.push(EnumValue {
                name: member.name.clone(),
                value,
            });
        }
        Ok(self.store.lookup_enum(storage, out))
    }

    /// Resolves a function prototype. The native-variadic tail parameter is
    /// stored in the function type as a slice of its declared element type.
    pub(crate) fn resolve_func_type(&mut self, func: &ast::FuncType) -> Result<TypeId> {
        let mut params = Vec::with_capacity(func.params.len());
        for (i, param) in func.params.iter().enumerate() {
            let mut ty = self.resolve_atype(&param.ty)?;
            if func.variadism == Variadism::Native && i + 1 == func.params.len() {
                ty = self.store.lookup_slice(ty);
            }
            params.push(ty);
        }
        let result = self.resolve_atype(&func.result)?;
        Ok(self.store.lookup_function(params, result, func.variadism))
    }
}
