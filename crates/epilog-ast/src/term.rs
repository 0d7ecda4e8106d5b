//! Term representation for Epilog
//!
//! Every piece of data the engine manipulates is a [`Term`]: facts, rules,
//! queries, update directives and the answers handed back to callers.
//!
//! # Key Components
//!
//! - **Var**: a logic variable, written with a leading uppercase letter or `_`
//! - **Sym**: an opaque constant, including numbers (`42`, `3.5`) and quoted
//!   strings (`"hello"`, quotes kept in the symbol text)
//! - **Compound**: a functor symbol applied to an ordered argument list
//!
//! Classification happens once, when a term is built from text via
//! [`Term::atom`]; afterwards every call site matches on the enum.
//!
//! # Example
//!
//! ```ignore
//! // parent(X, mary)
//! let goal = Term::compound("parent", vec![Term::var("X"), Term::sym("mary")]);
//! assert!(!goal.is_ground());
//! assert_eq!(goal.vars(), vec![Intern::new("X".to_string())]);
//! ```

use crate::keywords;
use internment::Intern;
use std::sync::Arc;

/// Interned string for efficient storage and comparison
pub type Symbol = Intern<String>;

/// Upper bound on nesting depth for recursive traversals (plug, unify, vars).
///
/// Terms nested deeper than this are treated as malformed: unification fails
/// and plugging stops substituting below this depth.
pub const MAX_TERM_DEPTH: usize = 10_000;

/// A symbolic value: variable, constant symbol or compound expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Term {
    Var(Symbol),
    Sym(Symbol),
    Compound(Symbol, Arc<[Term]>),
}

/// Is this name spelled like a variable (leading uppercase letter or `_`)?
pub fn is_variable_name(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c == '_' || c.is_ascii_uppercase())
        .unwrap_or(false)
}

impl Term {
    pub fn var(name: &str) -> Term {
        Term::Var(Intern::new(name.to_string()))
    }

    pub fn sym(name: &str) -> Term {
        Term::Sym(Intern::new(name.to_string()))
    }

    /// Classify a bare token by its spelling: variable names become `Var`,
    /// everything else becomes `Sym`.
    pub fn atom(text: &str) -> Term {
        if is_variable_name(text) {
            Term::var(text)
        } else {
            Term::sym(text)
        }
    }

    pub fn compound(functor: &str, args: Vec<Term>) -> Term {
        Term::Compound(Intern::new(functor.to_string()), args.into())
    }

    /// Build `functor(args...)`, collapsing to a plain symbol when there are
    /// no arguments.
    pub fn apply(functor: Symbol, args: Vec<Term>) -> Term {
        if args.is_empty() {
            Term::Sym(functor)
        } else {
            Term::Compound(functor, args.into())
        }
    }

    /// Quoted string literal; `text` is stored between double quotes.
    pub fn string(text: &str) -> Term {
        Term::Sym(Intern::new(format!("\"{}\"", text)))
    }

    pub fn number(value: f64) -> Term {
        Term::Sym(Intern::new(format_number(value)))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Term::Sym(_))
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Term::Compound(..))
    }

    /// Symbol of a constant, if this term is one.
    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Term::Sym(s) => Some(*s),
            _ => None,
        }
    }

    /// Name of a variable, if this term is one.
    pub fn as_variable(&self) -> Option<Symbol> {
        match self {
            Term::Var(v) => Some(*v),
            _ => None,
        }
    }

    /// Outermost symbol: the functor of a compound or the symbol itself.
    pub fn functor(&self) -> Option<Symbol> {
        match self {
            Term::Sym(s) => Some(*s),
            Term::Compound(f, _) => Some(*f),
            Term::Var(_) => None,
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Compound(_, args) => args,
            _ => &[],
        }
    }

    pub fn arg(&self, index: usize) -> Option<&Term> {
        self.args().get(index)
    }

    pub fn arity(&self) -> usize {
        self.args().len()
    }

    /// Does this term have the given functor (or equal the given symbol)?
    pub fn has_functor(&self, name: Symbol) -> bool {
        self.functor() == Some(name)
    }

    /// Relation a sentence talks about. Looks through `not`, `rule`,
    /// `definition` and `handler` wrappers to the underlying atom.
    pub fn operator(&self) -> Option<Symbol> {
        match self {
            Term::Compound(f, args) if keywords::is_wrapper(*f) && !args.is_empty() => {
                args[0].operator()
            }
            _ => self.functor(),
        }
    }

    /// Arguments of the atom named by [`Term::operator`].
    pub fn operands(&self) -> &[Term] {
        match self {
            Term::Compound(f, args) if keywords::is_wrapper(*f) && !args.is_empty() => {
                args[0].operands()
            }
            _ => self.args(),
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Sym(_) => true,
            Term::Compound(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Variables in order of first occurrence, without repeats.
    pub fn vars(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    /// Append variables not already present in `out`.
    pub fn collect_vars(&self, out: &mut Vec<Symbol>) {
        match self {
            Term::Var(v) => {
                if !out.contains(v) {
                    out.push(*v);
                }
            }
            Term::Sym(_) => {}
            Term::Compound(_, args) => {
                for arg in args.iter() {
                    arg.collect_vars(out);
                }
            }
        }
    }

    /// Every non-variable symbol occurring anywhere in the term, functors
    /// included, in traversal order.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut Vec<Symbol>) {
        match self {
            Term::Var(_) => {}
            Term::Sym(s) => out.push(*s),
            Term::Compound(f, args) => {
                out.push(*f);
                for arg in args.iter() {
                    arg.collect_symbols(out);
                }
            }
        }
    }

    /// Nesting depth; symbols and variables have depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Term::Compound(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
            _ => 1,
        }
    }

    /// Is this a quoted string constant?
    pub fn is_string(&self) -> bool {
        match self {
            Term::Sym(s) => is_quoted(s),
            _ => false,
        }
    }

    /// Contents of a quoted string constant, quotes removed.
    pub fn string_text(&self) -> Option<&str> {
        match self {
            Term::Sym(s) if is_quoted(s) => Some(&s[1..s.len() - 1]),
            _ => None,
        }
    }

    /// Does this constant spell a number?
    pub fn is_numeric(&self) -> bool {
        match self {
            Term::Sym(s) => is_numeric_symbol(s),
            _ => false,
        }
    }
}

fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

/// Does this symbol text parse as a number?
pub fn is_numeric_symbol(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return false;
    }
    text.parse::<f64>().is_ok()
}

/// Render a number the way symbols carry them: integral values print without
/// a fractional part, infinities use the `infinity`/`neginfinity` symbols.
pub fn format_number(value: f64) -> String {
    if value == f64::INFINITY {
        "infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "neginfinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

impl From<Symbol> for Term {
    fn from(symbol: Symbol) -> Self {
        if is_variable_name(symbol.as_str()) {
            Term::Var(symbol)
        } else {
            Term::Sym(symbol)
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/term_tests.rs"]
mod tests;
