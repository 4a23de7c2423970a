/// Unique identifier for an interned type.
///
/// `TypeId` is a lightweight, copyable handle into the [`TypeStore`]. Because
/// the store hash-conses, two structurally identical types always receive the
/// same id, and id equality is type equality. Indirection through ids is also
/// what keeps self-referential type graphs (pointer to alias to pointer...)
/// finite.
///
/// [`TypeStore`]: super::TypeStore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u64);

impl TypeId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    // Builtin type ids; the range below USER_START is reserved for the
    // singletons the store registers at construction.
    pub const VOID: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const NULL: TypeId = TypeId(2);
    pub const I8: TypeId = TypeId(3);
    pub const I16: TypeId = TypeId(4);
    pub const I32: TypeId = TypeId(5);
    pub const I64: TypeId = TypeId(6);
    pub const INT: TypeId = TypeId(7);
    pub const U8: TypeId = TypeId(8);
    pub const U16: TypeId = TypeId(9);
    pub const U32: TypeId = TypeId(10);
    pub const U64: TypeId = TypeId(11);
    pub const UINT: TypeId = TypeId(12);
    pub const RUNE: TypeId = TypeId(13);
    pub const F32: TypeId = TypeId(14);
    pub const F64: TypeId = TypeId(15);
    pub const CHAR: TypeId = TypeId(16);
    pub const UINTPTR: TypeId = TypeId(17);
    pub const SIZE: TypeId = TypeId(18);
    pub const STRING: TypeId = TypeId(19);

    /// First id handed out to non-builtin types.
    pub const USER_START: u64 = 100;
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}
