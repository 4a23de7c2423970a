use super::{EnumValue, Storage, StructField, Type, TypeId, TypeKind, Variadism};
use crate::Ident;
use std::collections::HashMap;

const POINTER_SIZE: u64 = 8;
const POINTER_ALIGN: u64 = 8;
// A slice/string head is pointer + length + capacity.
const SLICE_SIZE: u64 = 24;
const TAG_SIZE: u64 = 4;

/// Central store for all interned types.
///
/// The store hash-conses: constructing a type that is structurally identical
/// to one already interned yields the existing [`TypeId`]. Interned types are
/// immutable and live as long as the store, so handing out long-lived ids is
/// always safe. Builtin singletons for every primitive storage class are
/// registered at construction.
#[derive(Debug, Clone)]
pub struct TypeStore {
    types: HashMap<TypeId, Type>,
    interned: HashMap<(TypeKind, bool), TypeId>,
    next_id: u64,
}

const BUILTINS: &[(TypeId, Storage)] = &[
    (TypeId::VOID, Storage::Void),
    (TypeId::BOOL, Storage::Bool),
    (TypeId::NULL, Storage::Null),
    (TypeId::I8, Storage::I8),
    (TypeId::I16, Storage::I16),
    (TypeId::I32, Storage::I32),
    (TypeId::I64, Storage::I64),
    (TypeId::INT, Storage::Int),
    (TypeId::U8, Storage::U8),
    (TypeId::U16, Storage::U16),
    (TypeId::U32, Storage::U32),
    (TypeId::U64, Storage::U64),
    (TypeId::UINT, Storage::Uint),
    (TypeId::RUNE, Storage::Rune),
    (TypeId::F32, Storage::F32),
    (TypeId::F64, Storage::F64),
    (TypeId::CHAR, Storage::Char),
    (TypeId::UINTPTR, Storage::Uintptr),
    (TypeId::SIZE, Storage::Size),
    (TypeId::STRING, Storage::String),
];

impl TypeStore {
    /// Creates a store with every builtin primitive pre-registered at its
    /// fixed [`TypeId`].
    #[must_use]
    pub fn new() -> Self {
        let mut store = Self {
            types: HashMap::new(),
            interned: HashMap::new(),
            next_id: TypeId::USER_START,
        };
        for &(id, storage) in BUILTINS {
            let kind = TypeKind::Primitive(storage);
            let (size, align) = store.layout(&kind);
            store.interned.insert((kind.clone(), false), id);
            store.types.insert(
                id,
                Type {
                    id,
                    kind,
                    is_const: false,
                    size,
                    align,
                },
            );
        }
        store
    }

    /// Looks up an interned type. Ids are only minted by this store, so a
    /// miss is a caller bug.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &Type {
        self.types.get(&id).expect("TypeId should exist in store")
    }

    /// The canonical builtin instance for a primitive storage class.
    pub fn builtin(&mut self, storage: Storage, is_const: bool) -> TypeId {
        debug_assert!(storage.is_primitive());
        let plain = BUILTINS
            .iter()
            .find(|&&(_, s)| s == storage)
            .map(|&(id, _)| id)
            .expect("storage class has no builtin singleton");
        if is_const {
            self.lookup_with_flags(plain, true)
        } else {
            plain
        }
    }

    /// Returns `id` with the `const` flag additionally set. Flags only
    /// accumulate; passing `false` is the identity.
    pub fn lookup_with_flags(&mut self, id: TypeId, is_const: bool) -> TypeId {
        let ty = self.get(id);
        if !is_const || ty.is_const {
            return id;
        }
        let kind = ty.kind.clone();
        self.intern(kind, true)
    }

    pub fn lookup_pointer(&mut self, referent: TypeId, nullable: bool) -> TypeId {
        self.intern(TypeKind::Pointer { referent, nullable }, false)
    }

    pub fn lookup_slice(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeKind::Slice { element }, false)
    }

    /// Constructs an array type; `length == None` is the open array.
    pub fn lookup_array(&mut self, element: TypeId, length: Option<u64>) -> TypeId {
        self.intern(TypeKind::Array { element, length }, false)
    }

    /// Constructs a struct or union type, assigning member offsets.
    pub fn lookup_struct(&mut self, members: Vec<(String, TypeId)>, is_union: bool) -> TypeId {
        let mut fields = Vec::with_capacity(members.len());
        let mut offset = 0u64;
        for (name, ty) in members {
            let member = self.get(ty);
            let field_offset = if is_union {
                0
            } else {
                offset = align_up(offset, member.align.max(1));
                offset
            };
            if !is_union {
                offset += member.size.unwrap_or(0);
            }
            fields.push(StructField {
                name,
                ty,
                offset: field_offset,
            });
        }
        let kind = if is_union {
            TypeKind::Union { fields }
        } else {
            TypeKind::Struct { fields }
        };
        self.intern(kind, false)
    }

    pub fn lookup_tagged(&mut self, members: Vec<TypeId>) -> TypeId {
        self.intern(TypeKind::Tagged { members }, false)
    }

    pub fn lookup_enum(&mut self, storage: Storage, values: Vec<EnumValue>) -> TypeId {
        self.intern(TypeKind::Enum { storage, values }, false)
    }

    pub fn lookup_function(
        &mut self,
        params: Vec<TypeId>,
        result: TypeId,
        variadism: Variadism,
    ) -> TypeId {
        self.intern(
            TypeKind::Function {
                params,
                result,
                variadism,
            },
            // Function types always carry the const flag.
            true,
        )
    }

    pub fn lookup_alias(&mut self, ident: Ident, target: TypeId) -> TypeId {
        self.intern(TypeKind::Alias { ident, target }, false)
    }

    fn intern(&mut self, kind: TypeKind, is_const: bool) -> TypeId {
        if let Some(&id) = self.interned.get(&(kind.clone(), is_const)) {
            return id;
        }
        let (size, align) = self.layout(&kind);
        let id = TypeId::new(self.next_id);
        self.next_id += 1;
        self.interned.insert((kind.clone(), is_const), id);
        self.types.insert(
            id,
            Type {
                id,
                kind,
                is_const,
                size,
                align,
            },
        );
        id
    }

    fn layout(&self, kind: &TypeKind) -> (Option<u64>, u64) {
        match kind {
            TypeKind::Primitive(storage) => primitive_layout(*storage),
            TypeKind::Pointer { .. } => (Some(POINTER_SIZE), POINTER_ALIGN),
            TypeKind::Slice { .. } => (Some(SLICE_SIZE), POINTER_ALIGN),
            TypeKind::Array { element, length } => {
                let member = self.get(*element);
                let size = match (member.size, length) {
                    (Some(s), Some(n)) => Some(s * n),
                    _ => None,
                };
                (size, member.align)
            }
            TypeKind::Struct { fields } => {
                let mut size = 0u64;
                let mut align = 1u64;
                for field in fields {
                    let member = self.get(field.ty);
                    align = align.max(member.align);
                    size = size.max(field.offset + member.size.unwrap_or(0));
                }
                (Some(align_up(size, align)), align)
            }
            TypeKind::Union { fields } => {
                let mut size = 0u64;
                let mut align = 1u64;
                for field in fields {
                    let member = self.get(field.ty);
                    align = align.max(member.align);
                    size = size.max(member.size.unwrap_or(0));
                }
                (Some(align_up(size, align)), align)
            }
            TypeKind::Tagged { members } => {
                let mut size = 0u64;
                let mut align = TAG_SIZE;
                let mut sized = true;
                for &member in members {
                    let member = self.get(member);
                    align = align.max(member.align);
                    match member.size {
                        Some(s) => size = size.max(s),
                        None => sized = false,
                    }
                }
                let size = sized.then(|| align_up(align_up(TAG_SIZE, align) + size, align));
                (size, align)
            }
            TypeKind::Enum { storage, .. } => primitive_layout(*storage),
            TypeKind::Function { .. } => (None, 1),
            TypeKind::Alias { target, .. } => {
                let target = self.get(*target);
                (target.size, target.align)
            }
        }
    }

    /// Renders a type for diagnostics.
    #[must_use]
    pub fn type_name(&self, id: TypeId) -> String {
        let ty = self.get(id);
        let name = match &ty.kind {
            TypeKind::Primitive(storage) => storage.to_string(),
            TypeKind::Pointer { referent, nullable } => {
                let referent = self.type_name(*referent);
                if *nullable {
                    format!("nullable *{referent}")
                } else {
                    format!("*{referent}")
                }
            }
            TypeKind::Array { element, length } => match length {
                Some(n) => format!("[{n}]{}", self.type_name(*element)),
                None => format!("[*]{}", self.type_name(*element)),
            },
            TypeKind::Slice { element } => format!("[]{}", self.type_name(*element)),
            TypeKind::Struct { fields } => self.aggregate_name("struct", fields),
            TypeKind::Union { fields } => self.aggregate_name("union", fields),
            TypeKind::Tagged { members } => {
                let members: Vec<_> = members.iter().map(|&m| self.type_name(m)).collect();
                format!("({})", members.join(" | "))
            }
            TypeKind::Enum { .. } => "enum".to_string(),
            TypeKind::Function { params, result, .. } => {
                let params: Vec<_> = params.iter().map(|&p| self.type_name(p)).collect();
                format!("fn({}) {}", params.join(", "), self.type_name(*result))
            }
            TypeKind::Alias { ident, .. } => ident.to_string(),
        };
        if ty.is_const && !matches!(ty.kind, TypeKind::Function { .. }) {
            format!("const {name}")
        } else {
            name
        }
    }

    fn aggregate_name(&self, keyword: &str, fields: &[StructField]) -> String {
        let fields: Vec<_> = fields
            .iter()
            .map(|f| format!("{}: {}", f.name, self.type_name(f.ty)))
            .collect();
        format!("{keyword} {{ {} }}", fields.join(", "))
    }
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

fn primitive_layout(storage: Storage) -> (Option<u64>, u64) {
    let size = match storage {
        Storage::Void => 0,
        Storage::Bool | Storage::I8 | Storage::U8 | Storage::Char => 1,
        Storage::I16 | Storage::U16 => 2,
        Storage::I32 | Storage::U32 | Storage::Int | Storage::Uint => 4,
        Storage::Rune | Storage::F32 => 4,
        Storage::I64 | Storage::U64 | Storage::F64 => 8,
        Storage::Null | Storage::Uintptr | Storage::Size => 8,
        Storage::String => SLICE_SIZE,
        _ => unreachable!("not a primitive storage class"),
    };
    (Some(size), size.clamp(1, POINTER_ALIGN))
}

const fn align_up(offset: u64, align: u64) -> u64 {
    (offset + align - 1) / align * align
}
