//! Integration tests for the type store.

use tern_core::type_system::{TypeKind, Variadism};
use tern_core::{Ident, Storage, TypeId, TypeStore};

#[test]
fn test_structurally_equal_types_share_an_id() {
    let mut store = TypeStore::new();

    // Built at different program points, through different paths.
    let a = {
        let elem = store.builtin(Storage::Int, false);
        store.lookup_array(elem, Some(3))
    };
    let b = store.lookup_array(TypeId::INT, Some(3));
    assert_eq!(a, b);
    assert_eq!(store.get(a).id, store.get(b).id);

    let p1 = store.lookup_pointer(a, false);
    let p2 = store.lookup_pointer(b, false);
    assert_eq!(p1, p2);
}

#[test]
fn test_distinct_structures_get_distinct_ids() {
    let mut store = TypeStore::new();
    let a = store.lookup_array(TypeId::INT, Some(3));
    let b = store.lookup_array(TypeId::INT, Some(4));
    let open = store.lookup_array(TypeId::INT, None);
    assert_ne!(a, b);
    assert_ne!(a, open);
}

#[test]
fn test_function_types_intern() {
    let mut store = TypeStore::new();
    let f1 = store.lookup_function(vec![TypeId::INT], TypeId::VOID, Variadism::None);
    let f2 = store.lookup_function(vec![TypeId::INT], TypeId::VOID, Variadism::None);
    let f3 = store.lookup_function(vec![TypeId::INT], TypeId::VOID, Variadism::Native);
    assert_eq!(f1, f2);
    assert_ne!(f1, f3);
    // Function types are unsized.
    assert_eq!(store.get(f1).size, None);
}

#[test]
fn test_alias_identity_and_dealiasing() {
    let mut store = TypeStore::new();
    let a1 = store.lookup_alias(Ident::new("meters"), TypeId::INT);
    let a2 = store.lookup_alias(Ident::new("meters"), TypeId::INT);
    let other = store.lookup_alias(Ident::new("feet"), TypeId::INT);
    assert_eq!(a1, a2);
    assert_ne!(a1, other);
    assert_eq!(store.dealias(a1), TypeId::INT);
    // Aliases take their target's layout.
    assert_eq!(store.get(a1).size, store.get(TypeId::INT).size);
}

#[test]
fn test_const_flag_produces_a_distinct_interned_type() {
    let mut store = TypeStore::new();
    let arr = store.lookup_array(TypeId::INT, Some(2));
    let const_arr = store.lookup_with_flags(arr, true);
    assert_ne!(arr, const_arr);
    assert!(store.get(const_arr).is_const);
    assert_eq!(store.get(const_arr).kind, store.get(arr).kind);
    // Assignability ignores the const flag.
    assert!(store.is_assignable(arr, const_arr));
}

#[test]
fn test_tagged_union_membership() {
    let mut store = TypeStore::new();
    let meters = store.lookup_alias(Ident::new("meters"), TypeId::INT);
    let tagged = store.lookup_tagged(vec![meters, TypeId::VOID]);

    let TypeKind::Tagged { members } = &store.get(tagged).kind else {
        panic!("expected a tagged union");
    };
    assert_eq!(members.len(), 2);
    // Membership checks see through aliases.
    assert!(store.is_assignable(tagged, TypeId::INT));
    assert!(store.is_castable(TypeId::INT, tagged));
}

#[test]
fn test_builtin_singletons() {
    let mut store = TypeStore::new();
    assert_eq!(store.builtin(Storage::Int, false), TypeId::INT);
    assert_eq!(store.builtin(Storage::Size, false), TypeId::SIZE);
    let const_str = store.builtin(Storage::String, true);
    assert!(store.get(const_str).is_const);
    assert_eq!(store.builtin(Storage::String, true), const_str);
}
