use super::{Storage, TypeId, TypeKind};

/// An interned type: structure plus computed layout.
///
/// Values of this struct are created only by the store and never mutated
/// afterwards; everything downstream refers to them by [`TypeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub id: TypeId,
    pub kind: TypeKind,
    /// Whether the type carries the `const` flag.
    pub is_const: bool,
    /// Size in bytes; `None` means the size is undefined (open arrays,
    /// function types).
    pub size: Option<u64>,
    pub align: u64,
}

impl Type {
    #[must_use]
    pub fn storage(&self) -> Storage {
        self.kind.storage()
    }
}
