//! Reader and printer for Epilog
//!
//! The reader is a chumsky lexer feeding a chumsky expression parser. The
//! printer ([`grind`]) produces text the reader turns back into the same
//! term, up to the names of anonymous variables.
//!
//! # Syntax
//!
//! - **Atoms**: `parent(art, bob)`, constants `art`, numbers `42`, strings `"hi"`
//! - **Variables**: leading uppercase letter (`X`, `Who`); `_` is anonymous
//! - **Rules**: `grandparent(X,Z) :- parent(X,Y) & parent(Y,Z)`
//! - **Negation / disjunction**: `~q(X)`, `p(X) | q(X)`
//! - **Updates**: `+p(a)`, `-p(a)`, `*message(a)`
//! - **Lists**: `[a,b,c]`, cons cells `H!T`
//! - **Sentences**: `cond ==> action`, `f(X) := value`, `pattern :: replacement`
//! - **Comments**: `%` to end of line
//!
//! # Example
//!
//! ```ignore
//! use epilog_parser::{grind, read};
//!
//! let rule = read("p(X) :- q(X) & ~r(X)").unwrap();
//! assert_eq!(grind(&rule), "p(X) :- q(X) & ~r(X)");
//! ```

mod error;
mod printer;
mod reader;
mod token;

pub use error::{ReadError, ReadStage};
pub use printer::{grind, grind_lines};
pub use reader::{read, read_data, read_data_with, read_items, read_items_with, read_with, tokens};
pub use token::{Op, Span, SpannedToken, Token};
