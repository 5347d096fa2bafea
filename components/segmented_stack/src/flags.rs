//! Flag bitmask shared by every segment of a chain.

use bitflags::bitflags;

bitflags! {
    /// Flags given at stack creation and copied onto every segment of the chain.
    ///
    /// Bits other than the ones declared here are retained but ignored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FrameFlags: u32 {
        /// Serialize push and pop on each segment with that segment's own lock.
        const ATOMIC = 1 << 0;
    }
}

impl Default for FrameFlags {
    fn default() -> Self {
        FrameFlags::empty()
    }
}

impl FrameFlags {
    /// Returns whether per-segment locking is enabled.
    pub fn is_atomic(self) -> bool {
        self.contains(FrameFlags::ATOMIC)
    }
}
