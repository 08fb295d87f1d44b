//! Deletion planning: turns default targets and resolved filesets into an
//! ordered, bottom-up list of paths to remove.
//!
//! # Ordering
//!
//! A directory can only be removed once it is empty, so every entry precedes
//! the entries for its ancestors. Unrelated subtrees keep the order in which
//! their targets and filesets were declared, which makes a plan deterministic
//! for a given request and filesystem state.
//!
//! # Directory decisions
//!
//! - Default targets are always `DeleteWhole`; they are never partially cleaned.
//! - A matched directory is `DeleteWhole` only if nothing beneath it survives.
//!   Otherwise it stays and only its matched children are listed.
//! - An unmatched directory that loses all of its children is listed as
//!   `DeleteContentsOnly`, unless an exclude pattern names it.
//! - A fileset root is never listed.

mod planning;
mod types;


pub use planning::{plan, plan_fileset};
pub use types::{DeleteMode, DeletionPlan, EntryKind, PlanEntry};
