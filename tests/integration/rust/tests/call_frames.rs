//! Stack driven like an interpreter's operand and call-frame stack
//!
//! A tiny postfix evaluator keeps its operands on the stack, and scopes are
//! opened and unwound with `ret` the way a VM discards a call frame.

use segmented_stack::{Frame, FrameConfig, FrameFlags, StackError};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Push(i64),
    Add,
    Mul,
}

/// Evaluate a postfix program, keeping the operands on the segmented stack.
fn eval(program: &[Op], mut stack: Frame) -> Result<(Frame, i64), StackError> {
    for op in program {
        stack = match op {
            Op::Push(v) => stack.push(*v)?,
            Op::Add | Op::Mul => {
                let (s, rhs) = stack.pop::<i64>()?;
                let (s, lhs) = s.pop::<i64>()?;
                let result = if *op == Op::Add { lhs + rhs } else { lhs * rhs };
                s.push(result)?
            }
        };
    }
    stack.pop::<i64>()
}

/// Test: postfix evaluation across many small segments
#[test]
fn test_postfix_evaluation_over_small_segments() {
    let stack = Frame::with_config(FrameConfig::default().with_capacity(2)).unwrap();
    // (1 + 2) * (3 + 4) * 5
    let program = vec![
        Op::Push(1),
        Op::Push(2),
        Op::Add,
        Op::Push(3),
        Op::Push(4),
        Op::Add,
        Op::Mul,
        Op::Push(5),
        Op::Mul,
    ];
    let (stack, value) = eval(&program, stack).unwrap();
    assert_eq!(value, 105);
    assert!(stack.is_empty());
}

/// Test: malformed programs surface EmptyStack instead of crashing
#[test]
fn test_underflowing_program() {
    let stack = Frame::new(FrameFlags::empty());
    let err = eval(&[Op::Push(1), Op::Add], stack).unwrap_err();
    assert_eq!(err, StackError::EmptyStack);
}

/// Test: deep pushes spanning many segments unwind correctly
#[test]
fn test_deep_sum() {
    let mut program = vec![Op::Push(0)];
    for i in 1..=10_000 {
        program.push(Op::Push(i));
    }
    for _ in 1..=10_000 {
        program.push(Op::Add);
    }
    let (_, value) = eval(&program, Frame::new(FrameFlags::empty())).unwrap();
    assert_eq!(value, 10_000 * 10_001 / 2);
}

/// Test: a caller scope opened below the current frame is discarded as a unit
#[test]
fn test_scope_unwinding_with_ret() {
    let root = Frame::new(FrameFlags::empty());

    // Open a fresh scope below the chain, fill it, then unwind it.
    let scope = root.ret(1).unwrap();
    let mut cursor = scope.clone();
    for i in 0..5_000u32 {
        cursor = cursor.push(i).unwrap();
    }
    assert_eq!(cursor, root);
    assert_eq!(cursor.len(), 5_000);

    let unwound = cursor.ret(1).unwrap();
    assert_eq!(unwound, scope);
    assert!(unwound.is_empty());
    assert_eq!(unwound.stats().live_values, 0);
}

/// Test: handles from several threads share one ATOMIC chain
#[test]
fn test_atomic_chain_shared_between_threads() {
    let bottom = Frame::new(FrameFlags::ATOMIC);

    crossbeam::scope(|s| {
        for t in 0..4u64 {
            let mut cursor = bottom.clone();
            s.spawn(move |_| {
                for i in 0..5_000u64 {
                    cursor = cursor.push(t << 32 | i).unwrap();
                }
            });
        }
    })
    .unwrap();

    let stats = bottom.stats();
    assert_eq!(stats.live_values, 20_000);
    assert_eq!(stats.segments, 5);
}
