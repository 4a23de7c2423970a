//! The Tern type system.
//!
//! Types are immutable values interned by the [`TypeStore`]: structurally
//! identical types share a single [`TypeId`], so type equality reduces to id
//! equality. All references between types go through ids, which keeps
//! self-referential type graphs representable.

mod rules;
mod storage;
mod store;
mod ty;
mod type_id;
mod type_kind;

pub use storage::Storage;
pub use store::TypeStore;
pub use ty::Type;
pub use type_id::TypeId;
pub use type_kind::{EnumValue, StructField, TypeKind, Variadism};
