//! Qualified identifiers.

use std::fmt;

/// A possibly-qualified name: `name` plus an optional parent namespace.
///
/// `a::b::c` is represented as `c` whose namespace is `b` whose namespace is
/// `a`. Equality is structural over the whole chain; two identifiers are the
/// same name only if both the terminal name and every ancestor match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub ns: Option<Box<Ident>>,
}

impl Ident {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ns: None,
        }
    }

    /// Creates `ns::name`.
    #[must_use]
    pub fn qualified(ns: Ident, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ns: Some(Box::new(ns)),
        }
    }

    /// Returns a copy of this identifier re-parented under `ns`, replacing
    /// any namespace it already carried. This is how top-level declarations
    /// acquire their unit-qualified name.
    #[must_use]
    pub fn under(&self, ns: Option<&Ident>) -> Self {
        Self {
            name: self.name.clone(),
            ns: ns.map(|n| Box::new(n.clone())),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.ns {
            write!(f, "{ns}::")?;
        }
        write!(f, "{}", self.name)
    }
}
