//! The declaration scan (pass 1).
//!
//! Walks every top-level declaration in source order and populates the unit
//! scope: constants are checked and evaluated immediately, functions and
//! globals are inserted by type only (their bodies wait for pass 2), and
//! type declarations are interned — with enum values materialized as
//! constants on the spot.

use tracing::trace;

use tern_ast as ast;
use tern_core::type_system::TypeKind;
use tern_core::{Error, Ident, Result, Span};

use crate::checker::Context;
use crate::checker::helpers::lower_implicit_cast;
use crate::eval::eval_expr;
use crate::scope::{ObjectKind, ScopeObject};
use crate::tree::{Expr, ExprKind, Value};

impl Context<'_> {
    pub(crate) fn scan_decl(&mut self, decl: &ast::Decl) -> Result<()> {
        match &decl.kind {
            ast::DeclKind::Const(constant) => self.scan_const(constant, decl.span),
            ast::DeclKind::Func(func) => self.scan_function(func),
            ast::DeclKind::Global(global) => self.scan_global(global),
            ast::DeclKind::Type(ty) => self.scan_type(ty),
        }
    }

    fn scan_const(&mut self, decl: &ast::GlobalDecl, span: Span) -> Result<()> {
        trace!("scan constant");
        if decl.symbol.is_some() {
            return Err(Error::SemanticWithSpan(
                "Constants cannot carry a symbol".to_string(),
                span,
            ));
        }
        let Some(init) = &decl.init else {
            return Err(Error::SemanticWithSpan(
                "Constant declarations require an initializer".to_string(),
                span,
            ));
        };

        let ty = self.resolve_atype(&decl.ty)?;
        let initializer = self.check_expression(init, Some(ty))?;
        if !self.store.is_assignable(ty, initializer.result) {
            return Err(self.type_mismatch_error(
                "Constant type is not assignable from initializer type",
                ty,
                initializer.result,
                init.span,
            ));
        }
        let initializer = lower_implicit_cast(ty, initializer);
        let value = eval_expr(self.store, &initializer).map_err(|_| {
            Error::Eval(
                "Unable to evaluate constant initializer at compile time".to_string(),
                init.span,
            )
        })?;

        let mangled = self.mangle(&decl.ident);
        self.scopes.insert(
            self.unit_scope,
            ScopeObject {
                kind: ObjectKind::Const,
                name: decl.ident.clone(),
                mangled,
                ty,
                value: Some(value),
            },
        );
        Ok(())
    }

    fn scan_function(&mut self, decl: &ast::FuncDecl) -> Result<()> {
        trace!("scan function");
        let fntype = self.resolve_func_type(&decl.prototype)?;
        let mangled = match &decl.symbol {
            Some(symbol) => Ident::new(symbol),
            None => self.mangle(&decl.ident),
        };
        self.scopes.insert(
            self.unit_scope,
            ScopeObject {
                kind: ObjectKind::Decl,
                name: decl.ident.clone(),
                mangled,
                ty: fntype,
                value: None,
            },
        );
        Ok(())
    }

    fn scan_global(&mut self, decl: &ast::GlobalDecl) -> Result<()> {
        trace!("scan global");
        let ty = self.resolve_atype(&decl.ty)?;
        let mangled = match &decl.symbol {
            Some(symbol) => Ident::new(symbol),
            None => self.mangle(&decl.ident),
        };
        self.scopes.insert(
            self.unit_scope,
            ScopeObject {
                kind: ObjectKind::Decl,
                name: decl.ident.clone(),
                mangled,
                ty,
                value: None,
            },
        );
        Ok(())
    }

    fn scan_type(&mut self, decl: &ast::TypeDecl) -> Result<()> {
        trace!("scan type");
        let ty = self.resolve_atype(&decl.ty)?;
        let mangled = self.mangle(&decl.ident);
        self.scopes.insert(
            self.unit_scope,
            ScopeObject {
                kind: ObjectKind::Type,
                name: decl.ident.clone(),
                mangled: mangled.clone(),
                ty,
                value: None,
            },
        );

        // Enum values materialize as constants of the alias type, answering
        // to both `Enum::Value` and `ns::Enum::Value`.
        let TypeKind::Enum { storage, values } =
            self.store.get(self.store.dealias(ty)).kind.clone()
        else {
            return Ok(());
        };
        let alias = self.store.lookup_alias(mangled.clone(), ty);
        for value in &values {
            let constant = if storage.is_signed() {
                Value::Int(value.value)
            } else {
                Value::Uint(value.value as u64)
            };
            let short = Ident::qualified(decl.ident.clone(), value.name.clone());
            let qualified = Ident::qualified(mangled.clone(), value.name.clone());
            self.scopes.insert(
                self.unit_scope,
                ScopeObject {
                    kind: ObjectKind::Const,
                    name: short,
                    mangled: qualified,
                    ty: alias,
                    value: Some(Expr {
                        result: alias,
                        terminates: false,
                        kind: ExprKind::Constant(constant),
                    }),
                },
            );
        }
        Ok(())
    }
}
