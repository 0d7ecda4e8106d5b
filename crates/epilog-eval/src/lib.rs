//! Query evaluation for Epilog
//!
//! Queries are answered top-down by a resumable search over an arena of
//! frames (see [`search`]). Facts and rules are kept in separate
//! [`Theory`](epilog_core::Theory) values: a goal whose relation has rules is
//! expanded through them, any other goal is looked up among the facts.
//!
//! # Query Types
//!
//! - [`Engine::find_any`], [`Engine::find_all`], [`Engine::find_n`],
//!   [`Engine::find_p`] and the lazy [`Engine::solutions`]
//! - hypothetical variants (`hypo_*`) that read the facts through an
//!   [`Overlay`] of additions and deletions
//! - [`Engine::value`] for `evaluate(Expr, Value)` style expressions
//! - `temp_find_*`, which add rules for the duration of one query
//!
//! Updates (`execute`, `update`, `transform` and their `hypo_*` forms) live
//! in [`update`].
//!
//! Every query runs under a frame limit; see [`EngineConfig`]. Running out
//! ends the query as if it had no further answers.

pub mod config;
pub mod engine;
mod frame;
pub mod search;
pub mod update;
mod value;

pub use config::{EngineConfig, DEFAULT_EXPAND_DEPTH, DEFAULT_FRAME_LIMIT};
pub use engine::{Engine, Solutions};
pub use search::Overlay;

use epilog_ast::Term;
use epilog_core::Theory;

/// [`Engine::find_any`] on a default engine.
pub fn find_any(template: &Term, query: &Term, facts: &Theory, rules: &Theory) -> Option<Term> {
    Engine::new().find_any(template, query, facts, rules)
}

/// [`Engine::find_all`] on a default engine.
pub fn find_all(template: &Term, query: &Term, facts: &Theory, rules: &Theory) -> Vec<Term> {
    Engine::new().find_all(template, query, facts, rules)
}

pub fn find_n(n: usize, template: &Term, query: &Term, facts: &Theory, rules: &Theory) -> Vec<Term> {
    Engine::new().find_n(n, template, query, facts, rules)
}

pub fn find_p(query: &Term, facts: &Theory, rules: &Theory) -> bool {
    Engine::new().find_p(query, facts, rules)
}

pub fn hypo_find_all(
    template: &Term,
    query: &Term,
    adds: &Theory,
    dels: &Theory,
    facts: &Theory,
    rules: &Theory,
) -> Vec<Term> {
    Engine::new().hypo_find_all(template, query, Overlay::new(adds, dels), facts, rules)
}

pub fn hypo_find_p(query: &Term, adds: &Theory, dels: &Theory, facts: &Theory, rules: &Theory) -> bool {
    Engine::new().hypo_find_p(query, Overlay::new(adds, dels), facts, rules)
}

pub fn value(expr: &Term, facts: &Theory, rules: &Theory) -> Option<Term> {
    Engine::new().value(expr, facts, rules)
}

#[cfg(test)]
#[path = "../tests/unit/scenario_tests.rs"]
mod scenario_tests;
