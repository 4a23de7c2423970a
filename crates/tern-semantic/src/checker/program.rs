//! The two-pass check entry point.

use tracing::trace;

use tern_ast as ast;
use tern_core::{Error, Result, TypeStore};

use crate::checker::core::Context;
use crate::scope::ScopeClass;
use crate::tree;

/// Checks a unit.
///
/// The first pass scans every subunit's top-level declarations into the unit
/// scope; the second elaborates declaration bodies into typed expressions,
/// re-entering each subunit's scope. The returned unit owns the typed tree
/// and the scope arena; interned types stay in `store`.
pub fn check(store: &mut TypeStore, unit: &ast::Unit) -> Result<tree::Unit> {
    let mut ctx = Context::new(store, unit.ns.clone());

    // First pass populates the unit scope. Each subunit gets a scope of its
    // own below it, the future home of its imports.
    let mut subunit_scopes = Vec::with_capacity(unit.subunits.len());
    for subunit in &unit.subunits {
        trace!("scan subunit");
        if !subunit.imports.is_empty() {
            return Err(Error::Semantic(
                "Import resolution is not implemented".to_string(),
            ));
        }
        let scope = ctx.push_scope(ScopeClass::Subunit, None);
        ctx.path = subunit.path.clone();
        for decl in &subunit.decls {
            ctx.scan_decl(decl)?;
        }
        ctx.pop_scope();
        subunit_scopes.push(scope);
    }

    // Second pass populates the expression graph.
    let mut decls = Vec::new();
    for (subunit, &scope) in unit.subunits.iter().zip(&subunit_scopes) {
        trace!("check subunit");
        ctx.current = scope;
        ctx.path = subunit.path.clone();
        for decl in &subunit.decls {
            if let Some(checked) = ctx.check_decl(decl)? {
                decls.push(checked);
            }
        }
    }

    let Context { scopes, .. } = ctx;
    Ok(tree::Unit {
        ns: unit.ns.clone(),
        decls,
        scopes,
    })
}
