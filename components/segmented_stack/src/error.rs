//! Error types for stack operations.

use crate::frame::SegmentId;
use thiserror::Error;

/// Errors surfaced by [`Frame`](crate::Frame) operations.
///
/// `EmptyStack` is the only expected condition; every other variant means
/// the call site misused the stack or the host ran out of memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// Pop reached the bottom of the chain without finding a value.
    #[error("stack is empty")]
    EmptyStack,

    /// Pop asked for a type other than the one stored on top.
    ///
    /// The value is left on the stack.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        /// Type requested by the caller
        expected: &'static str,
        /// Type of the value on top of the stack
        found: &'static str,
    },

    /// Reserving slot storage for a segment failed.
    #[error("failed to allocate storage for a segment of {capacity} slots")]
    AllocationFailed {
        /// Number of slots that could not be reserved
        capacity: usize,
    },

    /// Segment capacity must hold at least one value.
    #[error("segment capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// A segment of a non-atomic chain was in use by another caller.
    #[error("segment {segment} is in use by another caller")]
    Contended {
        /// Segment that could not be entered
        segment: SegmentId,
    },
}

impl StackError {
    /// Returns whether this is the recoverable "nothing to pop" condition.
    pub fn is_empty_stack(&self) -> bool {
        matches!(self, StackError::EmptyStack)
    }
}

/// Result type for stack operations
pub type Result<T> = std::result::Result<T, StackError>;
