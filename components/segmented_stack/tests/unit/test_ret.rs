//! Return-to-ancestor

use segmented_stack::{Frame, FrameConfig, FrameFlags, StackError};
use std::sync::Arc;

#[test]
fn test_ret_empties_returned_segment() {
    let mut stack = Frame::new(FrameFlags::empty());
    for i in 0..100 {
        stack = stack.push(i).unwrap();
    }

    let cursor = stack.ret(1).unwrap();
    assert_eq!(cursor.fill(), 0);
    assert_eq!(cursor.pop::<i32>().unwrap_err(), StackError::EmptyStack);
}

#[test]
fn test_ret_below_bottom_creates_chain_of_ancestors() {
    let bottom = Frame::new(FrameFlags::empty());
    let cursor = bottom.ret(3).unwrap();

    assert_eq!(cursor.stats().segments, 4);
    assert!(!cursor.has_prev());

    let mut walk = cursor.clone();
    for _ in 0..3 {
        walk = walk.next().unwrap();
    }
    assert_eq!(walk, bottom);
}

#[test]
fn test_ret_from_new_bottom_extends_chain_downward() {
    let bottom = Frame::new(FrameFlags::empty()).push(1).unwrap();
    let first = bottom.ret(1).unwrap();
    let refilled = first.push(2).unwrap();
    let second = refilled.ret(0).unwrap().ret(1).unwrap();

    assert_ne!(second, first);
    assert_eq!(second.next(), Some(first.clone()));
    assert_eq!(second.stats().segments, 3);
}

#[test]
fn test_pushes_after_ret_never_resurface_discarded_values() {
    let config = FrameConfig::default().with_capacity(2);
    let bottom = Frame::with_config(config).unwrap();
    let top = bottom
        .push("a")
        .unwrap()
        .push("b")
        .unwrap()
        .push("c")
        .unwrap();
    assert_ne!(top, bottom);

    let cursor = top.ret(1).unwrap();
    assert_eq!(cursor, bottom);

    let cursor = cursor.push("x").unwrap().push("y").unwrap().push("z").unwrap();
    assert_eq!(cursor, top);
    assert_eq!(cursor.fill(), 1);
    assert_eq!(cursor.len(), 3);

    let (cursor, z) = cursor.pop::<&str>().unwrap();
    let (cursor, y) = cursor.pop::<&str>().unwrap();
    let (cursor, x) = cursor.pop::<&str>().unwrap();
    assert_eq!((x, y, z), ("x", "y", "z"));
    assert!(cursor.is_empty());
}

#[test]
fn test_ret_drops_discarded_values() {
    let shared = Arc::new(());
    let mut stack = Frame::new(FrameFlags::empty());
    for _ in 0..10 {
        stack = stack.push(Arc::clone(&shared)).unwrap();
    }
    assert_eq!(Arc::strong_count(&shared), 11);

    let _cursor = stack.ret(1).unwrap();
    assert_eq!(Arc::strong_count(&shared), 1);
}

#[test]
fn test_ret_keeps_reserved_storage() {
    let stack = Frame::new(FrameFlags::empty()).push(1u8).unwrap();
    let reserved = stack.stats().reserved_slots;

    let cursor = stack.ret(1).unwrap().push(2u8).unwrap();
    let stats = cursor.stats();
    assert_eq!(stats.segments, 2);
    assert_eq!(stats.reserved_segments, 2);
    assert_eq!(stats.reserved_slots, reserved * 2);
}
