#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn test_insert_and_get() {
    let mut slab = Slab::new();
    let a = slab.insert("drift");
    let b = slab.insert("quadrupole");
    assert_eq!(slab.get(a), Some(&"drift"));
    assert_eq!(slab.get(b), Some(&"quadrupole"));
    assert_eq!(slab.len(), 2);
}

#[test]
fn test_freed_slot_is_reused_with_new_generation() {
    let mut slab = Slab::new();
    let a = slab.insert(1.0_f64);
    assert_eq!(slab.remove(a), Ok(1.0));

    let b = slab.insert(2.0_f64);
    assert_eq!(a.index(), b.index());
    assert_ne!(a.generation(), b.generation());
    assert_eq!(slab.slot_count(), 1);

    // The old handle must not see the new occupant.
    assert_eq!(slab.get(a), None);
    assert_eq!(slab.get(b), Some(&2.0));
}

#[test]
fn test_double_release_is_detected() {
    let mut slab = Slab::new();
    let a = slab.insert(7_u32);
    assert!(slab.remove(a).is_ok());
    let err = slab.remove(a).unwrap_err();
    assert_eq!(err.index, 0);
    assert!(err.to_string().contains("stale arena handle"));
    assert!(slab.is_empty());
}

#[test]
fn test_release_of_reused_slot_through_old_handle_fails() {
    let mut slab = Slab::new();
    let a = slab.insert('a');
    slab.remove(a).unwrap();
    let b = slab.insert('b');
    assert!(slab.remove(a).is_err());
    assert_eq!(slab.get(b), Some(&'b'));
}

#[test]
fn test_iter_skips_free_slots() {
    let mut slab = Slab::with_capacity(4);
    let a = slab.insert(1);
    let b = slab.insert(2);
    let c = slab.insert(3);
    slab.remove(b).unwrap();

    let live: Vec<_> = slab.iter().map(|(h, v)| (h, *v)).collect();
    assert_eq!(live, vec![(a, 1), (c, 3)]);
}

#[test]
fn test_get_mut_updates_in_place() {
    let mut slab = Slab::new();
    let a = slab.insert(String::from("L"));
    slab.get_mut(a).unwrap().push_str("RAD");
    assert_eq!(slab.get(a).map(String::as_str), Some("LRAD"));
}

#[test]
fn test_handle_debug_format() {
    let mut slab = Slab::new();
    let a = slab.insert(());
    assert_eq!(format!("{a:?}"), "Handle(0v0)");
}
