//! Memory layout of the segment record.
//!
//! Purely for observability: reports the size and alignment of the segment
//! types and the offset of each of their fields. Nothing in the stack
//! depends on it.

use crate::frame::{Segment, SegmentState};
use crate::slot::Slot;
use serde::Serialize;
use std::fmt;
use std::mem::{align_of, offset_of, size_of};

/// Layout of one field of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    /// Field name
    pub name: &'static str,
    /// Byte offset inside the containing type
    pub offset: usize,
    /// Size of the field in bytes
    pub size: usize,
    /// Alignment of the field in bytes
    pub align: usize,
}

/// Layout of a type and its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeLayout {
    /// Type name
    pub name: &'static str,
    /// Size of the type in bytes
    pub size: usize,
    /// Alignment of the type in bytes
    pub align: usize,
    /// Fields in declaration order
    pub fields: Vec<FieldLayout>,
}

macro_rules! field {
    ($ty:ty, $field:ident, $field_ty:ty) => {
        FieldLayout {
            name: stringify!($field),
            offset: offset_of!($ty, $field),
            size: size_of::<$field_ty>(),
            align: align_of::<$field_ty>(),
        }
    };
}

/// Layout of the segment record and the state behind its lock.
///
/// # Examples
///
/// ```
/// let layouts = segmented_stack::layout::segment_layout();
/// assert_eq!(layouts[0].name, "Segment");
/// assert!(layouts.iter().all(|l| l.size >= l.fields.iter().map(|f| f.size).sum::<usize>()));
/// ```
pub fn segment_layout() -> Vec<TypeLayout> {
    vec![
        TypeLayout {
            name: "Segment",
            size: size_of::<Segment>(),
            align: align_of::<Segment>(),
            fields: vec![
                field!(Segment, id, crate::SegmentId),
                field!(Segment, flags, crate::FrameFlags),
                field!(Segment, capacity, usize),
                field!(Segment, state, parking_lot::Mutex<SegmentState>),
            ],
        },
        TypeLayout {
            name: "SegmentState",
            size: size_of::<SegmentState>(),
            align: align_of::<SegmentState>(),
            fields: vec![
                field!(SegmentState, slots, Vec<Slot>),
                field!(SegmentState, prev, Option<crate::SegmentId>),
                field!(SegmentState, next, Option<crate::SegmentId>),
            ],
        },
        TypeLayout {
            name: "Slot",
            size: size_of::<Slot>(),
            align: align_of::<Slot>(),
            fields: Vec::new(),
        },
    ]
}

/// Bytes of slot storage one fully reserved segment of `capacity` slots occupies.
pub fn slot_storage_bytes(capacity: usize) -> usize {
    size_of::<Slot>() * capacity
}

impl fmt::Display for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}:\tsize:{:8X} align:{:8X}",
            self.name, self.size, self.align
        )?;
        for (i, field) in self.fields.iter().enumerate() {
            writeln!(
                f,
                "  field:{}:{}\toffset:{:8X} align:{:8X} size:{:8X}",
                i, field.name, field.offset, field.align, field.size
            )?;
        }
        Ok(())
    }
}
