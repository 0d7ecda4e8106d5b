//! Term model for Epilog
//!
//! Terms, reserved keywords, cons lists, sentence shapes (rules, handlers,
//! transitions, definitions) and the [`NameGenerator`] used wherever fresh
//! names are invented.

pub mod keywords;
mod list;
mod names;
mod sentence;
mod term;

pub use list::{cons, nil};
pub use names::NameGenerator;
pub use term::{format_number, is_numeric_symbol, is_variable_name, Symbol, Term, MAX_TERM_DEPTH};
