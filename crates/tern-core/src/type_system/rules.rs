//! Type relations: dealiasing, dereferencing, assignability, castability.

use super::{Storage, StructField, TypeId, TypeKind, TypeStore};

impl TypeStore {
    /// Unwraps transparent aliases until a non-alias type is reached.
    #[must_use]
    pub fn dealias(&self, id: TypeId) -> TypeId {
        let mut id = id;
        while let TypeKind::Alias { target, .. } = self.get(id).kind {
            id = target;
        }
        id
    }

    /// Sees through one level of non-nullable pointer.
    ///
    /// Returns the referent for a non-nullable pointer, `None` for a nullable
    /// pointer (the caller must diagnose), and the type itself otherwise.
    /// The returned id is always dealiased.
    #[must_use]
    pub fn dereference(&self, id: TypeId) -> Option<TypeId> {
        let id = self.dealias(id);
        match self.get(id).kind {
            TypeKind::Pointer { nullable: true, .. } => None,
            TypeKind::Pointer { referent, .. } => Some(self.dealias(referent)),
            _ => Some(id),
        }
    }

    /// Finds a struct or union member by name.
    #[must_use]
    pub fn get_field(&self, id: TypeId, name: &str) -> Option<&StructField> {
        match &self.get(self.dealias(id)).kind {
            TypeKind::Struct { fields } | TypeKind::Union { fields } => {
                fields.iter().find(|f| f.name == name)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_integer(&self, id: TypeId) -> bool {
        self.storage_of(id).is_integer()
    }

    #[must_use]
    pub fn is_signed(&self, id: TypeId) -> bool {
        self.storage_of(id).is_signed()
    }

    #[must_use]
    pub fn is_numeric(&self, id: TypeId) -> bool {
        self.storage_of(id).is_numeric()
    }

    /// The storage class after dealiasing; enums classify as their underlying
    /// storage.
    fn storage_of(&self, id: TypeId) -> Storage {
        match self.get(self.dealias(id)).kind {
            TypeKind::Enum { storage, .. } => storage,
            ref kind => kind.storage(),
        }
    }

    /// Whether `src` may be implicitly converted to `dst` at assignments,
    /// bindings, arguments, returns, and literal members.
    #[must_use]
    pub fn is_assignable(&self, dst: TypeId, src: TypeId) -> bool {
        if dst == src {
            return true;
        }
        let dst = self.dealias(dst);
        let src = self.dealias(src);
        let dst_ty = self.get(dst);
        let src_ty = self.get(src);
        // Identity modulo aliases and const flags.
        if dst_ty.kind == src_ty.kind {
            return true;
        }

        match (&dst_ty.kind, &src_ty.kind) {
            // null is assignable to any nullable pointer.
            (TypeKind::Pointer { nullable: true, .. }, TypeKind::Primitive(Storage::Null)) => true,

            // Pointers to the same referent; nullability may only widen.
            (
                TypeKind::Pointer {
                    referent: dst_ref,
                    nullable: dst_null,
                },
                TypeKind::Pointer {
                    referent: src_ref,
                    nullable: src_null,
                },
            ) => self.dealias(*dst_ref) == self.dealias(*src_ref) && (*dst_null || !*src_null),

            // A sized array is assignable to the open array of its element.
            (
                TypeKind::Array {
                    element: dst_elem,
                    length: None,
                },
                TypeKind::Array {
                    element: src_elem, ..
                },
            ) => dst_elem == src_elem,

            // A variant is assignable into a tagged union that carries it.
            (TypeKind::Tagged { members }, _) => {
                members.iter().any(|&m| self.dealias(m) == src)
            }

            _ => false,
        }
    }

    /// Whether an explicit cast from `src` to `dst` is permitted. A strict
    /// superset of assignability.
    #[must_use]
    pub fn is_castable(&self, dst: TypeId, src: TypeId) -> bool {
        if self.is_assignable(dst, src) {
            return true;
        }
        let dst = self.dealias(dst);
        let src = self.dealias(src);
        let dst_storage = self.get(dst).storage();
        let src_storage = self.get(src).storage();

        match (dst_storage, src_storage) {
            // Numeric conversions, including enum <-> integer.
            _ if self.is_numeric(dst) && self.is_numeric(src) => true,

            // Pointer reinterpretation.
            (Storage::Pointer, Storage::Pointer)
            | (Storage::Pointer, Storage::Null)
            | (Storage::Pointer, Storage::Uintptr)
            | (Storage::Uintptr, Storage::Pointer) => true,

            // Arrays and slices of the same element interconvert explicitly.
            (Storage::Slice, Storage::Array)
            | (Storage::Array, Storage::Slice)
            | (Storage::Array, Storage::Array)
            | (Storage::Slice, Storage::Slice) => {
                self.element_of(dst) == self.element_of(src)
            }

            // Tagged union narrowing.
            (_, Storage::Tagged) => {
                let TypeKind::Tagged { members } = &self.get(src).kind else {
                    return false;
                };
                members.iter().any(|&m| self.dealias(m) == dst)
            }

            _ => false,
        }
    }

    fn element_of(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id).kind {
            TypeKind::Array { element, .. } | TypeKind::Slice { element } => {
                Some(self.dealias(element))
            }
            _ => None,
        }
    }
}
