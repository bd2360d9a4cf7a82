//! Stack safety for the recursive parser and evaluator.
//!
//! Deeply nested source (long operator chains, nested groupings, deep but
//! bounded recursion in user functions) is handled by growing the native stack
//! on demand instead of overflowing it.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 128 * 1024;

/// Stack space allocated each time the red zone is reached.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first growing the stack if less than the red zone remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
