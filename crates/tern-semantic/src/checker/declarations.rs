//! Declaration checking (pass 2).

use tracing::trace;

use tern_ast as ast;
use tern_core::type_system::{TypeKind, Variadism};
use tern_core::{Error, Ident, Result, Span, TypeId};

use crate::checker::core::Context;
use crate::checker::helpers::lower_implicit_cast;
use crate::eval::eval_expr;
use crate::scope::{ObjectKind, ScopeClass, ScopeObject};
use crate::tree;

impl Context<'_> {
    /// Checks one top-level declaration. Constants were fully handled by the
    /// scan; prototypes and forward declarations produce nothing.
    pub(crate) fn check_decl(&mut self, decl: &ast::Decl) -> Result<Option<tree::Decl>> {
        match &decl.kind {
            ast::DeclKind::Const(_) => Ok(None),
            ast::DeclKind::Func(func) => self.check_function(func, decl.exported, decl.span),
            ast::DeclKind::Global(global) => self.check_global(global, decl.exported),
            ast::DeclKind::Type(ty) => self.check_type_decl(ty, decl.exported),
        }
    }

    fn check_function(
        &mut self,
        decl: &ast::FuncDecl,
        exported: bool,
        span: Span,
    ) -> Result<Option<tree::Decl>> {
        let Some(body) = &decl.body else {
            return Ok(None); // Prototype
        };
        trace!("function");

        let fntype = self.resolve_func_type(&decl.prototype)?;
        let TypeKind::Function {
            params,
            result,
            variadism,
        } = self.store.get(fntype).kind.clone()
        else {
            return Err(Error::Semantic(
                "function prototype did not resolve to a function type".to_string(),
            ));
        };
        if variadism == Variadism::C {
            return Err(Error::SemanticWithSpan(
                "C-style variadism is not allowed for function declarations".to_string(),
                span,
            ));
        }

        let (ident, symbol) = match &decl.symbol {
            Some(symbol) => (Ident::new(symbol), Some(symbol.clone())),
            None => (self.mangle(&decl.ident), None),
        };

        let scope = self.push_scope(ScopeClass::Function, None);
        for (param, &ty) in decl.prototype.params.iter().zip(&params) {
            let Some(name) = &param.name else {
                return Err(Error::SemanticWithSpan(
                    "Function parameters must be named".to_string(),
                    param.span,
                ));
            };
            let name = Ident::new(name);
            self.scopes.insert(
                scope,
                ScopeObject {
                    kind: ObjectKind::Bind,
                    name: name.clone(),
                    mangled: name,
                    ty,
                    value: None,
                },
            );
        }

        self.current_fn_result = Some(result);
        let checked = self.check_expression(body, Some(result));
        self.current_fn_result = None;
        let mut checked = checked?;

        if !checked.terminates {
            if !self.store.is_assignable(result, checked.result) {
                return Err(self.type_mismatch_error(
                    "Result value is not assignable to function result type",
                    result,
                    checked.result,
                    body.span,
                ));
            }
            checked = lower_implicit_cast(result, checked);
        }
        self.pop_scope();

        if decl.flags.is_special() {
            if result != TypeId::VOID {
                return Err(Error::SemanticWithSpan(
                    "@init, @fini, and @test functions must return void".to_string(),
                    span,
                ));
            }
            if exported {
                return Err(Error::SemanticWithSpan(
                    "@init, @fini, and @test functions cannot be exported".to_string(),
                    span,
                ));
            }
        }

        Ok(Some(tree::Decl {
            ident,
            symbol,
            exported,
            kind: tree::DeclKind::Func {
                ty: fntype,
                flags: decl.flags,
                scope,
                body: checked,
            },
        }))
    }

    fn check_global(
        &mut self,
        decl: &ast::GlobalDecl,
        exported: bool,
    ) -> Result<Option<tree::Decl>> {
        let Some(init) = &decl.init else {
            return Ok(None); // Forward declaration
        };
        trace!("global");

        let ty = self.resolve_atype(&decl.ty)?;
        let initializer = self.check_expression(init, Some(ty))?;
        if !self.store.is_assignable(ty, initializer.result) {
            return Err(self.type_mismatch_error(
                "Global type is not assignable from initializer type",
                ty,
                initializer.result,
                init.span,
            ));
        }
        let initializer = lower_implicit_cast(ty, initializer);
        let value = eval_expr(self.store, &initializer).map_err(|_| {
            Error::Eval(
                "Unable to evaluate global initializer at compile time".to_string(),
                init.span,
            )
        })?;

        let (ident, symbol) = match &decl.symbol {
            Some(symbol) => (Ident::new(symbol), Some(symbol.clone())),
            None => (self.mangle(&decl.ident), None),
        };
        Ok(Some(tree::Decl {
            ident,
            symbol,
            exported,
            kind: tree::DeclKind::Global { ty, value },
        }))
    }

    fn check_type_decl(
        &mut self,
        decl: &ast::TypeDecl,
        exported: bool,
    ) -> Result<Option<tree::Decl>> {
        trace!("type");
        let ty = self.resolve_atype(&decl.ty)?;
        Ok(Some(tree::Decl {
            ident: self.mangle(&decl.ident),
            symbol: None,
            exported,
            kind: tree::DeclKind::Type(ty),
        }))
    }
}
