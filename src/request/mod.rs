//! Cleanup request model.
//!
//! A `CleanupRequest` is the only input to the engine. It can be built in code or
//! loaded from YAML; unknown fields in the YAML are ignored for forward
//! compatibility and missing fields take their defaults.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::{CleanupRequest, FilesetSpec};
pub use types::{DEFAULT_MAX_PARALLELISM, default_parallelism};
