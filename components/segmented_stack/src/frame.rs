//! Frame chain: segments, cursor handles and the stack operations.
//!
//! Every segment of a chain lives in an append-only arena owned by the chain.
//! Links between segments are arena ids, so the chain can be walked in both
//! directions without reference cycles, and no segment is freed while any
//! [`Frame`] of the chain is alive.
//!
//! # Locking
//!
//! Each segment keeps its state behind its own mutex. Chains created with
//! [`FrameFlags::ATOMIC`] block on that mutex; other chains only try it and
//! report [`StackError::Contended`] when it is already held. An operation
//! holds at most one segment lock at a time and releases it before moving to
//! a neighbouring segment.
//!
//! Only single calls are serialized. The cursor itself is not synchronized:
//! threads sharing a chain must agree externally on which handle to use next.

use crate::config::FrameConfig;
use crate::error::{Result, StackError};
use crate::flags::FrameFlags;
use crate::slot::Slot;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Default number of slots per segment
pub const CAPACITY: usize = 1 << 12;

/// Position of a segment in its chain's arena.
///
/// Ids are assigned in allocation order, so the initial bottom segment is
/// always `#0`. They say nothing about the segment's place in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl SegmentId {
    /// Index of the segment in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fixed-capacity segment of the stack.
pub(crate) struct Segment {
    pub(crate) id: SegmentId,
    pub(crate) flags: FrameFlags,
    pub(crate) capacity: usize,
    pub(crate) state: Mutex<SegmentState>,
}

/// Mutable part of a segment.
///
/// `slots.len()` is the segment's fill. Storage for `capacity` slots is
/// reserved on the first push and kept across resets, so the vector never
/// grows past its reservation.
pub(crate) struct SegmentState {
    pub(crate) slots: Vec<Slot>,
    pub(crate) prev: Option<SegmentId>,
    pub(crate) next: Option<SegmentId>,
}

impl Segment {
    /// Enter the segment for mutation.
    fn enter(&self) -> Result<MutexGuard<'_, SegmentState>> {
        if self.flags.is_atomic() {
            Ok(self.state.lock())
        } else {
            self.state
                .try_lock()
                .ok_or(StackError::Contended { segment: self.id })
        }
    }

    /// Read-only view used by the diagnostics; always waits for the lock.
    fn observe(&self) -> MutexGuard<'_, SegmentState> {
        self.state.lock()
    }
}

impl SegmentState {
    fn store(&mut self, capacity: usize, slot: Slot) -> Result<()> {
        reserve(&mut self.slots, capacity)?;
        self.slots.push(slot);
        Ok(())
    }
}

fn reserve(slots: &mut Vec<Slot>, capacity: usize) -> Result<()> {
    if slots.capacity() < capacity {
        slots
            .try_reserve_exact(capacity - slots.len())
            .map_err(|_| StackError::AllocationFailed { capacity })?;
    }
    Ok(())
}

/// Arena owning every segment of one stack.
struct Chain {
    config: FrameConfig,
    segments: RwLock<Vec<Arc<Segment>>>,
}

impl Chain {
    fn new(config: FrameConfig) -> Self {
        let bottom = Arc::new(Segment {
            id: SegmentId(0),
            flags: config.flags,
            capacity: config.capacity,
            state: Mutex::new(SegmentState {
                slots: Vec::new(),
                prev: None,
                next: None,
            }),
        });
        Chain {
            config,
            segments: RwLock::new(vec![bottom]),
        }
    }

    fn segment(&self, id: SegmentId) -> Arc<Segment> {
        Arc::clone(&self.segments.read()[id.0])
    }

    /// Append a segment with the given links, optionally holding `first`.
    ///
    /// The arena lock is taken after the slot storage is reserved and is
    /// never held while waiting on a segment lock.
    fn allocate(
        &self,
        prev: Option<SegmentId>,
        next: Option<SegmentId>,
        first: Option<Slot>,
    ) -> Result<Arc<Segment>> {
        let capacity = self.config.capacity;
        let mut slots = Vec::new();
        if let Some(slot) = first {
            reserve(&mut slots, capacity)?;
            slots.push(slot);
        }

        let mut segments = self.segments.write();
        let id = SegmentId(segments.len());
        let segment = Arc::new(Segment {
            id,
            flags: self.config.flags,
            capacity,
            state: Mutex::new(SegmentState { slots, prev, next }),
        });
        segments.push(Arc::clone(&segment));
        drop(segments);

        tracing::trace!(segment = %id, capacity, "allocated segment");
        Ok(segment)
    }

    fn snapshot(&self) -> Vec<Arc<Segment>> {
        self.segments.read().clone()
    }
}

/// Summary of a whole chain, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainStats {
    /// Segments in the arena
    pub segments: usize,
    /// Segments whose slot storage has been reserved
    pub reserved_segments: usize,
    /// Slots reserved across all segments
    pub reserved_slots: usize,
    /// Values currently stored across all segments
    pub live_values: usize,
}

/// Cursor handle into a segmented stack.
///
/// Every operation returns the handle the cursor rests on afterwards, which
/// may be a neighbouring segment. Callers must replace their handle with the
/// returned one.
///
/// Cloning a `Frame` is cheap and yields another handle to the same segment.
/// Two frames compare equal when they point at the same segment.
///
/// # Examples
///
/// ```
/// use segmented_stack::{Frame, FrameConfig};
///
/// let config = FrameConfig::default().with_capacity(2);
/// let bottom = Frame::with_config(config).unwrap();
///
/// let top = bottom.push(1u32).unwrap().push(2u32).unwrap().push(3u32).unwrap();
/// assert_ne!(top, bottom);
/// assert_eq!(top.len(), 3);
///
/// let (cursor, value) = top.pop::<u32>().unwrap();
/// assert_eq!(value, 3);
/// let (cursor, value) = cursor.pop::<u32>().unwrap();
/// assert_eq!(value, 2);
/// assert_eq!(cursor, bottom);
/// ```
#[derive(Clone)]
pub struct Frame {
    chain: Arc<Chain>,
    segment: Arc<Segment>,
}

impl Frame {
    /// Create a stack consisting of one empty bottom segment of [`CAPACITY`] slots.
    pub fn new(flags: FrameFlags) -> Frame {
        Self::from_chain(Chain::new(FrameConfig::default().with_flags(flags)))
    }

    /// Create a stack from an explicit configuration.
    pub fn with_config(config: FrameConfig) -> Result<Frame> {
        config.validate()?;
        Ok(Self::from_chain(Chain::new(config)))
    }

    fn from_chain(chain: Chain) -> Frame {
        let segment = chain.segment(SegmentId(0));
        Frame {
            chain: Arc::new(chain),
            segment,
        }
    }

    fn at(&self, segment: Arc<Segment>) -> Frame {
        Frame {
            chain: Arc::clone(&self.chain),
            segment,
        }
    }

    /// Push `value` onto the stack.
    ///
    /// Stores into the current segment while it has room. A full segment
    /// hands the value to its existing successor, or links a new successor
    /// holding the value as its first element.
    ///
    /// Returns the segment that now holds the value.
    #[must_use = "the cursor may have moved to another segment"]
    pub fn push<T: Any + Send>(&self, value: T) -> Result<Frame> {
        self.push_slot(Slot::new(value))
    }

    /// Push an already type-erased value.
    #[must_use = "the cursor may have moved to another segment"]
    pub fn push_slot(&self, slot: Slot) -> Result<Frame> {
        let mut segment = Arc::clone(&self.segment);
        loop {
            let mut state = segment.enter()?;
            if state.slots.len() < segment.capacity {
                state.store(segment.capacity, slot)?;
                drop(state);
                return Ok(self.at(segment));
            }

            let next = state.next;
            match next {
                Some(id) => {
                    drop(state);
                    segment = self.chain.segment(id);
                }
                None => {
                    let created = self.chain.allocate(Some(segment.id), None, Some(slot))?;
                    state.next = Some(created.id);
                    drop(state);
                    return Ok(self.at(created));
                }
            }
        }
    }

    /// Pop the top value as a `T`.
    ///
    /// An empty segment hands the pop to its predecessor. Returns the segment
    /// the cursor rests on together with the value.
    ///
    /// # Errors
    ///
    /// - [`StackError::EmptyStack`] when no value is reachable.
    /// - [`StackError::TypeMismatch`] when the top value is not a `T`; the
    ///   value stays on the stack.
    #[must_use = "the cursor may have moved to another segment"]
    pub fn pop<T: Any + Send>(&self) -> Result<(Frame, T)> {
        self.pop_map(Slot::downcast::<T>, type_name::<T>())
    }

    /// Pop the top value into `dst`.
    ///
    /// `dst` is left untouched on error.
    #[must_use = "the cursor may have moved to another segment"]
    pub fn pop_into<T: Any + Send>(&self, dst: &mut T) -> Result<Frame> {
        let (frame, value) = self.pop::<T>()?;
        *dst = value;
        Ok(frame)
    }

    /// Pop the top value without checking its type.
    #[must_use = "the cursor may have moved to another segment"]
    pub fn pop_slot(&self) -> Result<(Frame, Slot)> {
        self.pop_map(Ok, "segmented_stack::Slot")
    }

    fn pop_map<T>(
        &self,
        take: impl Fn(Slot) -> std::result::Result<T, Slot>,
        expected: &'static str,
    ) -> Result<(Frame, T)> {
        let mut segment = Arc::clone(&self.segment);
        loop {
            let mut state = segment.enter()?;
            if let Some(slot) = state.slots.pop() {
                return match take(slot) {
                    Ok(value) => {
                        drop(state);
                        Ok((self.at(segment), value))
                    }
                    Err(slot) => {
                        let found = slot.type_name();
                        state.slots.push(slot);
                        tracing::debug!(segment = %segment.id, expected, found, "pop type mismatch");
                        Err(StackError::TypeMismatch { expected, found })
                    }
                };
            }

            let prev = state.prev;
            drop(state);
            match prev {
                Some(id) => segment = self.chain.segment(id),
                None => return Err(StackError::EmptyStack),
            }
        }
    }

    /// Return `n` segments toward the bottom, discarding everything above.
    ///
    /// The current segment and every ancestor visited on the way are emptied
    /// and their values dropped; their storage is kept for reuse. Missing
    /// ancestors below the bottom are created and linked on demand, so the
    /// existing chain is never orphaned.
    ///
    /// `ret(0)` leaves the stack untouched.
    #[must_use = "the cursor has moved to an ancestor segment"]
    pub fn ret(&self, n: u64) -> Result<Frame> {
        if n == 0 {
            return Ok(self.clone());
        }

        let mut segment = Arc::clone(&self.segment);
        segment.enter()?.slots.clear();
        for _ in 0..n {
            let mut state = segment.enter()?;
            let linked = state.prev;
            let prev = match linked {
                Some(id) => {
                    drop(state);
                    self.chain.segment(id)
                }
                None => {
                    let created = self.chain.allocate(None, Some(segment.id), None)?;
                    state.prev = Some(created.id);
                    drop(state);
                    created
                }
            };
            prev.enter()?.slots.clear();
            segment = prev;
        }

        tracing::debug!(from = %self.segment.id, to = %segment.id, steps = n, "returned to ancestor");
        Ok(self.at(segment))
    }

    /// Number of values reachable from this cursor.
    ///
    /// Walks every ancestor, so this costs one lock per segment below the cursor.
    pub fn len(&self) -> usize {
        let mut total = 0;
        let mut segment = Arc::clone(&self.segment);
        loop {
            let (fill, prev) = {
                let state = segment.observe();
                (state.slots.len(), state.prev)
            };
            total += fill;
            match prev {
                Some(id) => segment = self.chain.segment(id),
                None => return total,
            }
        }
    }

    /// Returns whether no value is reachable from this cursor.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill of the current segment plus the fill of its predecessor.
    ///
    /// Only equals [`len`](Frame::len) while at most two segments hold values.
    pub fn shallow_len(&self) -> usize {
        let (fill, prev) = {
            let state = self.segment.observe();
            (state.slots.len(), state.prev)
        };
        match prev {
            Some(id) => fill + self.chain.segment(id).observe().slots.len(),
            None => fill,
        }
    }

    /// Type name of the value the next pop would return.
    pub fn peek_type_name(&self) -> Option<&'static str> {
        let mut segment = Arc::clone(&self.segment);
        loop {
            let (top, prev) = {
                let state = segment.observe();
                (state.slots.last().map(Slot::type_name), state.prev)
            };
            if top.is_some() {
                return top;
            }
            segment = self.chain.segment(prev?);
        }
    }

    /// Number of values stored in the current segment
    pub fn fill(&self) -> usize {
        self.segment.observe().slots.len()
    }

    /// Slots per segment of this chain
    pub fn capacity(&self) -> usize {
        self.segment.capacity
    }

    /// Flags of this chain
    pub fn flags(&self) -> FrameFlags {
        self.segment.flags
    }

    /// Returns whether per-segment locking is enabled.
    pub fn is_atomic(&self) -> bool {
        self.segment.flags.is_atomic()
    }

    /// Arena id of the current segment
    pub fn segment_id(&self) -> SegmentId {
        self.segment.id
    }

    /// Handle to the predecessor segment, if linked.
    pub fn prev(&self) -> Option<Frame> {
        let prev = self.segment.observe().prev?;
        Some(self.at(self.chain.segment(prev)))
    }

    /// Handle to the successor segment, if allocated.
    pub fn next(&self) -> Option<Frame> {
        let next = self.segment.observe().next?;
        Some(self.at(self.chain.segment(next)))
    }

    /// Returns whether the current segment has a predecessor.
    pub fn has_prev(&self) -> bool {
        self.segment.observe().prev.is_some()
    }

    /// Returns whether the current segment has a successor.
    pub fn has_next(&self) -> bool {
        self.segment.observe().next.is_some()
    }

    /// Returns whether both handles belong to the same stack.
    pub fn same_chain(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.chain, &other.chain)
    }

    /// Collect statistics over every segment of the chain.
    pub fn stats(&self) -> ChainStats {
        self.chain
            .snapshot()
            .iter()
            .fold(ChainStats::default(), |mut stats, segment| {
                let state = segment.observe();
                stats.segments += 1;
                if state.slots.capacity() > 0 {
                    stats.reserved_segments += 1;
                    stats.reserved_slots += state.slots.capacity();
                }
                stats.live_values += state.slots.len();
                stats
            })
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.segment, &other.segment)
    }
}

impl Eq for Frame {}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.segment.observe();
        f.debug_struct("Frame")
            .field("segment", &self.segment.id)
            .field("flags", &self.segment.flags)
            .field("fill", &state.slots.len())
            .field("capacity", &self.segment.capacity)
            .field("prev", &state.prev)
            .field("next", &state.next)
            .finish()
    }
}
