//! Segmented LIFO stack built from a chain of fixed-capacity frames.
//!
//! A stack is a doubly linked chain of segments ("frames"). Each segment
//! holds up to [`CAPACITY`] type-erased values; pushing past the end moves
//! the cursor to the next segment (allocating it on demand) and popping past
//! the start moves it back. The caller always holds a [`Frame`] handle to the
//! segment the cursor currently rests on and must replace it with the handle
//! returned by every operation.
//!
//! # Overview
//!
//! - [`Frame`] - Cursor handle into a chain of segments
//! - [`FrameFlags`] - Per-chain flags (`ATOMIC` enables per-segment locking)
//! - [`FrameConfig`] - Construction parameters (flags, segment capacity)
//! - [`Slot`] - Type-erased value stored in a segment
//! - [`StackError`] - Errors surfaced by stack operations
//! - [`layout`] - Memory layout diagnostic for the segment record
//!
//! # Examples
//!
//! ```
//! use segmented_stack::{Frame, FrameFlags, StackError};
//!
//! let stack = Frame::new(FrameFlags::empty());
//! let stack = stack.push(42i32).unwrap();
//! let stack = stack.push("heh".to_string()).unwrap();
//!
//! let (stack, text) = stack.pop::<String>().unwrap();
//! assert_eq!(text, "heh");
//! let (stack, num) = stack.pop::<i32>().unwrap();
//! assert_eq!(num, 42);
//!
//! assert_eq!(stack.pop::<i32>().unwrap_err(), StackError::EmptyStack);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod config;
mod error;
mod flags;
mod frame;
pub mod layout;
mod slot;

pub use config::FrameConfig;
pub use error::{Result, StackError};
pub use flags::FrameFlags;
pub use frame::{ChainStats, Frame, SegmentId, CAPACITY};
pub use slot::Slot;
