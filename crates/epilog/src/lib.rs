//! Epilog: deductive inference with negation, aggregation and hypothetical
//! reasoning
//!
//! This crate gathers the workspace crates behind one dependency:
//!
//! - [`epilog_ast`]: terms, symbols and sentence constructors
//! - [`epilog_core`]: bindings, the trail-based store and indexed theories
//! - [`epilog_builtins`]: computed relations, math functions and list operators
//! - [`epilog_parser`]: `read`, `read_data` and `grind`
//! - [`epilog_safety`]: arity, safety and stratification checks
//! - [`epilog_eval`]: the query engine, hypothetical queries and updates
//!
//! [`Session`] ties them together for programs given as text.
//!
//! # Example
//!
//! ```ignore
//! use epilog::{read, Session};
//!
//! let mut session = Session::new();
//! session.load_str("parent(a,b). parent(b,c). grandparent(X,Z) :- parent(X,Y) & parent(Y,Z).")?;
//! let answers = session.ask(&read("grandparent(X,Z)")?, None);
//! assert_eq!(answers.answers[0].to_string(), "X = a, Z = c");
//! ```

pub mod error;
pub mod program;
pub mod session;

pub use epilog_ast;
pub use epilog_builtins;
pub use epilog_core;
pub use epilog_eval;
pub use epilog_parser;
pub use epilog_safety;

pub use epilog_ast::{Symbol, Term};
pub use epilog_core::{DedupPolicy, IndexMode, Theory};
pub use epilog_eval::{Engine, EngineConfig, Overlay, Solutions, DEFAULT_EXPAND_DEPTH, DEFAULT_FRAME_LIMIT};
pub use epilog_parser::{grind, read, read_data, ReadError};
pub use epilog_safety::Diagnostic;

pub use error::LoadError;
pub use program::{
    define_facts, define_more_facts, define_more_rules, define_rules, get_bases, get_views, insert_fact,
    insert_rule, split_program, uninsert_fact, uninsert_rule,
};
pub use session::{Answer, Answers, LoadSummary, Session};
