//! Core data structures for Epilog
//!
//! - [`bindings`]: persistent association-list bindings with `matcher`,
//!   `unifier`, `plug` and `standardize`
//! - [`store`]: multi-environment binding store with an undo trail
//! - [`theory`]: indexed fact and rule collections
//! - [`dedup`]: answer deduplication policies

pub mod bindings;
pub mod dedup;
pub mod store;
pub mod theory;

pub use bindings::{matcher, plug, standardize, unifier, Bindings};
pub use dedup::DedupPolicy;
pub use store::{Checkpoint, EnvId, Store, Trail};
pub use theory::{make_pattern, EntryId, IndexMode, Theory};
