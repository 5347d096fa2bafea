//! Segment layout diagnostic

use segmented_stack::layout::{segment_layout, slot_storage_bytes};
use segmented_stack::CAPACITY;

/// Test: the layout report names every segment field
#[test]
fn test_layout_report() {
    let layouts = segment_layout();
    let names: Vec<_> = layouts.iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Segment", "SegmentState", "Slot"]);

    let segment_fields: Vec<_> = layouts[0].fields.iter().map(|f| f.name).collect();
    assert_eq!(segment_fields, vec!["id", "flags", "capacity", "state"]);
}

/// Test: the layout serializes for machine consumption
#[test]
fn test_layout_json() {
    let json = serde_json::to_value(segment_layout()).unwrap();
    assert_eq!(json[1]["name"], "SegmentState");
    assert!(json[1]["fields"][0]["offset"].is_u64());
}

/// Test: one full segment's slot storage scales with capacity
#[test]
fn test_slot_storage_size() {
    let per_slot = segment_layout()[2].size;
    assert_eq!(slot_storage_bytes(CAPACITY), per_slot * CAPACITY);
}
