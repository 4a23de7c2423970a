use super::{Storage, TypeId};
use crate::Ident;

/// The structure of a type: its storage class together with the
/// storage-specific payload.
///
/// All references to other types are [`TypeId`]s, never inline types; the
/// store owns the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// One of the builtin storage classes with no payload (`int`, `bool`,
    /// `str`, ...).
    Primitive(Storage),

    /// `*T` or `nullable *T`.
    Pointer { referent: TypeId, nullable: bool },

    /// `[N]T`; `length == None` is the open (unsized) array `[*]T`.
    Array {
        element: TypeId,
        length: Option<u64>,
    },

    /// `[]T`.
    Slice { element: TypeId },

    Struct { fields: Vec<StructField> },

    Union { fields: Vec<StructField> },

    /// Tagged union; `members` lists the variant types.
    Tagged { members: Vec<TypeId> },

    Enum {
        storage: Storage,
        values: Vec<EnumValue>,
    },

    Function {
        params: Vec<TypeId>,
        result: TypeId,
        variadism: Variadism,
    },

    /// A named transparent alias for `target`.
    Alias { ident: Ident, target: TypeId },
}

impl TypeKind {
    /// Returns the storage class tag for this kind.
    #[must_use]
    pub fn storage(&self) -> Storage {
        match self {
            Self::Primitive(storage) => *storage,
            Self::Pointer { .. } => Storage::Pointer,
            Self::Array { .. } => Storage::Array,
            Self::Slice { .. } => Storage::Slice,
            Self::Struct { .. } => Storage::Struct,
            Self::Union { .. } => Storage::Union,
            Self::Tagged { .. } => Storage::Tagged,
            Self::Enum { .. } => Storage::Enum,
            Self::Function { .. } => Storage::Function,
            Self::Alias { .. } => Storage::Alias,
        }
    }
}

/// A named member of a struct or union type, with its computed byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    pub ty: TypeId,
    pub offset: u64,
}

/// A named value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// How a function type accepts its trailing arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variadism {
    None,
    /// C-style `...`; never allowed on Tern function declarations.
    C,
    /// Tern-style variadism: the tail parameter is surfaced to the callee as
    /// a slice and callers may pass loose arguments.
    Native,
}
