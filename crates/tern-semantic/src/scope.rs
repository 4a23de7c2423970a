//! Lexical scopes and the objects they hold.
//!
//! Scopes live in an arena and refer to each other by [`ScopeId`], so typed
//! expressions can capture the scope they were checked in and the arena can
//! move into the finished unit. The arena index idiom mirrors the type
//! store's id indirection.

use tern_core::{Ident, TypeId};

use crate::tree::Expr;

/// Handle to a scope in a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Handle to an object within a specific scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef {
    pub scope: ScopeId,
    pub index: usize,
}

/// What kind of expression (or structural level) created a scope. Label
/// resolution only looks at `Loop` scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeClass {
    Unit,
    Subunit,
    Function,
    Block,
    Loop,
}

/// The kind of a named scope entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A named compile-time value; carries its evaluated constant.
    Const,
    /// A type alias.
    Type,
    /// A runtime local binding.
    Bind,
    /// A runtime global or function.
    Decl,
}

/// A named entry in a scope.
///
/// `name` is the user-facing spelling and `mangled` the linker-facing one;
/// lookups match either, which is how enum values answer to both their short
/// and fully-qualified spellings.
#[derive(Debug, Clone)]
pub struct ScopeObject {
    pub kind: ObjectKind,
    pub name: Ident,
    pub mangled: Ident,
    pub ty: TypeId,
    /// Present only for `Const` objects.
    pub value: Option<Expr>,
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub class: ScopeClass,
    pub label: Option<String>,
    objects: Vec<ScopeObject>,
}

impl Scope {
    #[must_use]
    pub fn objects(&self) -> &[ScopeObject] {
        &self.objects
    }
}

/// Arena of every scope created while checking one unit.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Creates a scope under `parent`.
    pub fn alloc(
        &mut self,
        parent: Option<ScopeId>,
        class: ScopeClass,
        label: Option<String>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            parent,
            class,
            label,
            objects: Vec::new(),
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// The first scope allocated: the unit scope in a checked unit.
    #[must_use]
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    #[must_use]
    pub fn object(&self, r: ObjectRef) -> &ScopeObject {
        &self.scopes[r.scope.0].objects[r.index]
    }

    /// Adds an object to `scope`. Duplicate names are not detected: lookup
    /// scans newest-first, so a duplicate insert silently shadows the
    /// earlier entry.
    pub fn insert(&mut self, scope: ScopeId, object: ScopeObject) -> ObjectRef {
        let objects = &mut self.scopes[scope.0].objects;
        objects.push(object);
        ObjectRef {
            scope,
            index: objects.len() - 1,
        }
    }

    /// Resolves `ident` starting at `from` and walking parent scopes. An
    /// object matches on either its user-facing or its mangled spelling.
    #[must_use]
    pub fn lookup(&self, from: ScopeId, ident: &Ident) -> Option<ObjectRef> {
        let mut current = Some(from);
        while let Some(id) = current {
            let scope = self.get(id);
            for (index, object) in scope.objects.iter().enumerate().rev() {
                if object.name == *ident || object.mangled == *ident {
                    return Some(ObjectRef { scope: id, index });
                }
            }
            current = scope.parent;
        }
        None
    }

    /// Finds the loop scope a `break`/`continue` targets: the innermost
    /// enclosing `Loop` scope when no label is given, or the nearest
    /// ancestor `Loop` scope with a matching label.
    #[must_use]
    pub fn lookup_loop(&self, from: ScopeId, label: Option<&str>) -> Option<ScopeId> {
        let mut current = Some(from);
        while let Some(id) = current {
            let scope = self.get(id);
            if scope.class == ScopeClass::Loop {
                match label {
                    None => return Some(id),
                    Some(wanted) if scope.label.as_deref() == Some(wanted) => return Some(id),
                    Some(_) => {}
                }
            }
            current = scope.parent;
        }
        None
    }

    /// True if `ancestor` appears on the parent chain of `scope` (or is the
    /// scope itself).
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ScopeId, scope: ScopeId) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).parent;
        }
        false
    }
}
