//! Micro-benchmarks for the fundamental stack operations
//!
//! Each workload builds its own stack so runs are independent.

use crate::runner::{Benchmark, BenchmarkResult, BenchmarkSuite};
use segmented_stack::{Frame, FrameConfig, FrameFlags, Result, CAPACITY};

/// Default operation count per benchmark
pub const DEFAULT_OPERATIONS: usize = 1_000_000;

fn push_values(flags: FrameFlags, ops: usize) -> Result<Frame> {
    let mut stack = Frame::new(flags);
    for i in 0..ops {
        stack = stack.push(i)?;
    }
    Ok(stack)
}

fn push(ops: usize) -> Result<()> {
    push_values(FrameFlags::empty(), ops).map(|_| ())
}

fn push_atomic(ops: usize) -> Result<()> {
    push_values(FrameFlags::ATOMIC, ops).map(|_| ())
}

fn push_then_pop(ops: usize) -> Result<()> {
    let mut stack = push_values(FrameFlags::empty(), ops)?;
    for _ in 0..ops {
        let (next, _) = stack.pop::<usize>()?;
        stack = next;
    }
    Ok(())
}

fn interleaved(ops: usize) -> Result<()> {
    let mut stack = Frame::new(FrameFlags::empty());
    let mut dst = 0usize;
    for i in 0..ops / 2 {
        stack = stack.push(i)?.pop_into(&mut dst)?;
    }
    Ok(())
}

/// Push and pop around a one-slot segment boundary so the cursor keeps crossing it.
fn boundary_thrash(ops: usize) -> Result<()> {
    let config = FrameConfig::default().with_capacity(1);
    let mut stack = Frame::with_config(config)?.push(0usize)?;
    for i in 0..ops / 4 {
        stack = stack.push(i)?;
        let (next, _) = stack.pop::<usize>()?;
        let (next, below) = next.pop::<usize>()?;
        stack = next.push(below)?;
    }
    Ok(())
}

/// Fill a few segments, then discard them with `ret` and refill the same storage.
fn ret_reuse(ops: usize) -> Result<()> {
    let mut stack = Frame::new(FrameFlags::empty());
    let mut done = 0;
    while done < ops {
        let batch = (ops - done).min(CAPACITY * 2);
        for i in 0..batch {
            stack = stack.push(i)?;
        }
        done += batch;
        stack = stack.ret(1)?;
    }
    Ok(())
}

/// Create the micro-benchmark suite
pub fn create_suite() -> BenchmarkSuite {
    let mut suite = BenchmarkSuite::new("micro".to_string());
    let ops = DEFAULT_OPERATIONS;
    suite.add(Benchmark::new("push", "Push usize values", ops, push));
    suite.add(Benchmark::new(
        "push_atomic",
        "Push usize values with per-segment locking",
        ops,
        push_atomic,
    ));
    suite.add(Benchmark::new(
        "push_then_pop",
        "Push then pop every value",
        ops,
        push_then_pop,
    ));
    suite.add(Benchmark::new(
        "interleaved_push_pop",
        "Alternate push and pop on one segment",
        ops,
        interleaved,
    ));
    suite.add(Benchmark::new(
        "segment_boundary",
        "Alternate push and pop across a segment boundary",
        ops,
        boundary_thrash,
    ));
    suite.add(Benchmark::new(
        "ret_reuse",
        "Refill segments discarded by ret",
        ops,
        ret_reuse,
    ));
    suite
}

/// Run all micro-benchmarks once with the default operation count
pub fn run_all() -> Vec<BenchmarkResult> {
    create_suite().run()
}
