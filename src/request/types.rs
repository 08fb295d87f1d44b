//! Defaults for request fields.

use std::num::NonZeroUsize;
use std::thread;

/// Upper bound on deletion workers when the request does not set one.
pub const DEFAULT_MAX_PARALLELISM: usize = 4;

/// `min(available parallelism, DEFAULT_MAX_PARALLELISM)`.
pub fn default_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(DEFAULT_MAX_PARALLELISM)
}

pub(crate) fn default_true() -> bool {
    true
}
