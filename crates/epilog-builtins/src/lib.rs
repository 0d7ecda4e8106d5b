//! Builtin relations for Epilog
//!
//! Everything the engine can compute instead of looking up.
//!
//! # Supported Built-ins
//!
//! - **Arithmetic**: `plus`, `minus`, `times`, `quotient`, `remainder`
//! - **Strings**: `symbolize`, `newsymbolize`, `readstring`, `stringify`,
//!   `readstringall`, `stringifyall`, `matches`, `submatches`,
//!   `stringappend`, `stringmin`, `stringjoin`
//! - **Time**: `timestamp`, `maketimestamp`, `getyear` and friends
//! - **Lists**: `append`, `reverse`, `revappend`, `length`, `listify`,
//!   `delistify`
//! - **Math**: the usual floating point functions (`abs`, `sqrt`, `pow`, ...)
//! - **List operators**: `maximum`, `minimum`, `range`, `midrange`, `sum`,
//!   `median`, `mean`, `variance`, `stddev`
//!
//! All values are symbols. Numbers are read with [`numberize`] and written
//! with [`stringize`], so `plus(1, 2.5, X)` binds `X` to `3.5`.
//!
//! # Usage
//!
//! ```ignore
//! // total(T) :- price(A) & tax(B) & plus(A, B, T)
//! ```

mod clock;
mod library;
mod math;
mod numeric;
mod text;

pub use clock::DatePart;
pub use library::Builtin;
pub use math::{apply_math, is_math, ListOp};
pub use numeric::{number_term, numberize, numlistify, quotify, strip_quotes, stringize};
pub use text::{all_matches, first_match, newsymbolize, symbolize};

use epilog_ast::Term;

/// Relations usable as `name(In..., Out)`.
pub fn is_builtin(name: &str) -> bool {
    Builtin::from_name(name).is_some()
}

pub fn is_list_op(name: &str) -> bool {
    ListOp::from_name(name).is_some()
}

/// Any name with a computed meaning: builtin, math function or list operator.
pub fn is_computed(name: &str) -> bool {
    is_builtin(name) || is_math(name) || is_list_op(name)
}

/// Call a builtin by name. `None` when the name is unknown or the builtin
/// has no value for these inputs.
pub fn call_builtin(name: &str, args: &[Term]) -> Option<Term> {
    Builtin::from_name(name)?.call(args)
}

/// `name(In..., Out)` as a math function over numbers.
pub fn call_math(name: &str, args: &[Term]) -> Option<Term> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        let value = numberize(arg);
        if value.is_nan() {
            return None;
        }
        values.push(value);
    }
    apply_math(name, &values).and_then(number_term)
}

/// `name(List, Out)` as a list operator.
pub fn call_list_op(name: &str, list: &Term) -> Option<Term> {
    let op = ListOp::from_name(name)?;
    let values = numlistify(list)?;
    number_term(op.apply(&values))
}

/// Are all the given terms pairwise distinct?
pub fn mutex(args: &[Term]) -> bool {
    args.iter()
        .enumerate()
        .all(|(i, x)| args[i + 1..].iter().all(|y| x != y))
}

#[cfg(test)]
#[path = "../tests/unit/builtins_tests.rs"]
mod tests;
