//! The checker context threaded through the two passes.

use tern_core::{Ident, TypeId, TypeStore};

use crate::scope::{ScopeArena, ScopeClass, ScopeId};

/// Transient state for one in-flight check of a unit.
///
/// The context is an explicit parameter everywhere, never process-wide
/// state. It borrows the type store (interned types outlive the unit) and
/// owns the scope arena, which moves into the finished unit when checking
/// completes.
pub struct Context<'a> {
    pub(crate) store: &'a mut TypeStore,
    pub(crate) scopes: ScopeArena,
    pub(crate) current: ScopeId,
    pub(crate) unit_scope: ScopeId,
    /// The unit namespace; declarations are mangled under it.
    pub(crate) ns: Option<Ident>,
    /// The enclosing function's result type, for `return`.
    pub(crate) current_fn_result: Option<TypeId>,
    /// Set while checking a deferred expression; defers do not nest.
    pub(crate) deferring: bool,
    /// Monotonic counter for `static.N` names. Never reset within a unit.
    pub(crate) static_id: u64,
    /// Current source path, for synthesized assertion messages.
    pub(crate) path: Option<String>,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a mut TypeStore, ns: Option<Ident>) -> Self {
        let mut scopes = ScopeArena::new();
        let unit_scope = scopes.alloc(None, ScopeClass::Unit, None);
        Self {
            store,
            scopes,
            current: unit_scope,
            unit_scope,
            ns,
            current_fn_result: None,
            deferring: false,
            static_id: 0,
            path: None,
        }
    }

    /// Creates a child of the current scope and makes it current.
    pub(crate) fn push_scope(&mut self, class: ScopeClass, label: Option<String>) -> ScopeId {
        let id = self.scopes.alloc(Some(self.current), class, label);
        self.current = id;
        id
    }

    /// Restores the parent scope.
    pub(crate) fn pop_scope(&mut self) {
        let parent = self
            .scopes
            .get(self.current)
            .parent
            .expect("cannot pop the unit scope");
        self.current = parent;
    }

    /// Re-parents a declaration identifier under the unit namespace.
    pub(crate) fn mangle(&self, ident: &Ident) -> Ident {
        ident.under(self.ns.as_ref())
    }
}
