//! Benchmark infrastructure for the segmented stack
//!
//! This crate exercises the stack operations and measures their
//! throughput. It includes:
//!
//! - Micro-benchmarks for push, pop, segment rollover and `ret` reuse
//! - Benchmark runner with timing and result formatting
//!
//! # Examples
//!
//! ```rust,no_run
//! use benchmarks::micro;
//!
//! let results = micro::run_all();
//! for result in results {
//!     println!("{}: {:.2}ms", result.name, result.duration_ms);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod micro;
pub mod runner;

pub use runner::{Benchmark, BenchmarkResult, BenchmarkSuite};
