//! Stack safety for recursive evaluation.
//!
//! Nested expressions, blocks and user calls all recurse on the native stack.
//! Call depth is bounded by [`crate::evaluator::DEFAULT_MAX_CALL_DEPTH`], but
//! a single call can nest arbitrarily deep expressions, so every recursion
//! point grows the stack on demand.

/// Grows the stack if remaining space is less than 256KB, allocating 2MB.
pub fn ensure_sufficient_stack<R, F: FnOnce() -> R>(f: F) -> R {
    stacker::maybe_grow(256 * 1024, 2 * 1024 * 1024, f)
}
