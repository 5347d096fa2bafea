//! Stack construction parameters.

use crate::error::{Result, StackError};
use crate::flags::FrameFlags;
use crate::frame::CAPACITY;

/// Configuration for a new chain of segments.
///
/// The capacity is fixed for the lifetime of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Flags copied onto every segment
    pub flags: FrameFlags,
    /// Number of slots per segment
    pub capacity: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            flags: FrameFlags::empty(),
            capacity: CAPACITY,
        }
    }
}

impl FrameConfig {
    /// Default configuration with per-segment locking enabled
    pub fn atomic() -> Self {
        Self::default().with_flags(FrameFlags::ATOMIC)
    }

    /// Replace the flags
    pub fn with_flags(mut self, flags: FrameFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the per-segment capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Check that the configuration describes a usable chain.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(StackError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}
