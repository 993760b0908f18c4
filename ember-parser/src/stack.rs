// Ember Stack Safety
// Grows the native stack for deeply nested source

/// Run `f`, first growing the stack if less than 256KB remains
pub fn ensure_sufficient_stack<R, F: FnOnce() -> R>(f: F) -> R {
    stacker::maybe_grow(256 * 1024, 2 * 1024 * 1024, f)
}
