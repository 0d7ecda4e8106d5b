//! Association-list bindings and the matcher family built on them
//!
//! [`Bindings`] is an immutable, persistent list of `variable = value` pairs:
//! extending it returns a new list that shares its tail with the old one, so
//! a failed match never has anything to undo. This is the representation used
//! by one-off pattern matching (handler expansion, `definition` lookup,
//! `save`-style duplicate checks), where a trail would be overkill.
//!
//! # Operations
//!
//! - [`matcher`] / [`match_with`]: one-directional match of a pattern against
//!   a (usually ground) term; only pattern variables get bound
//! - [`unifier`] / [`unify`]: full bidirectional unification with occurs-check
//! - [`plug`]: apply bindings recursively
//! - [`standardize`]: rename every variable apart

use epilog_ast::{NameGenerator, Symbol, Term, MAX_TERM_DEPTH};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
struct Binding {
    var: Symbol,
    value: Term,
    next: Option<Arc<Binding>>,
}

/// Immutable association list from variables to terms
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    head: Option<Arc<Binding>>,
    len: usize,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new list with `var = value` in front of `self`.
    pub fn with(&self, var: Symbol, value: Term) -> Bindings {
        Bindings {
            head: Some(Arc::new(Binding {
                var,
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn get(&self, var: &Symbol) -> Option<&Term> {
        self.iter().find(|(v, _)| v == var).map(|(_, value)| value)
    }

    pub fn contains(&self, var: &Symbol) -> bool {
        self.get(var).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recent binding first.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Term)> {
        let mut current = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = current?;
            current = node.next.as_deref();
            Some((node.var, &node.value))
        })
    }

    /// Fully plugged value of every bound variable.
    pub fn to_map(&self) -> HashMap<Symbol, Term> {
        let mut out = HashMap::new();
        for (var, value) in self.iter() {
            out.entry(var).or_insert_with(|| plug(value, self));
        }
        out
    }
}

/// Match `pattern` against `term` from empty bindings.
pub fn matcher(pattern: &Term, term: &Term) -> Option<Bindings> {
    match_with(pattern, term, Bindings::new())
}

/// One-directional match: variables in `pattern` may be bound, `term` is taken
/// literally. A pattern variable seen twice must match equal subterms.
pub fn match_with(pattern: &Term, term: &Term, bindings: Bindings) -> Option<Bindings> {
    match_depth(pattern, term, bindings, 0)
}

fn match_depth(pattern: &Term, term: &Term, bindings: Bindings, depth: usize) -> Option<Bindings> {
    if depth > MAX_TERM_DEPTH {
        return None;
    }
    match pattern {
        Term::Var(v) => match bindings.get(v) {
            Some(value) if value == term => Some(bindings),
            Some(_) => None,
            None => Some(bindings.with(*v, term.clone())),
        },
        Term::Sym(_) => (pattern == term).then_some(bindings),
        Term::Compound(f, args) => match term {
            Term::Compound(g, targs) if f == g && args.len() == targs.len() => {
                args.iter()
                    .zip(targs.iter())
                    .try_fold(bindings, |bl, (p, t)| match_depth(p, t, bl, depth + 1))
            }
            _ => None,
        },
    }
}

/// Unify two terms from empty bindings.
pub fn unifier(x: &Term, y: &Term) -> Option<Bindings> {
    unify(x, y, Bindings::new())
}

/// Bidirectional unification with occurs-check.
pub fn unify(x: &Term, y: &Term, bindings: Bindings) -> Option<Bindings> {
    unify_depth(x, y, bindings, 0)
}

fn unify_depth(x: &Term, y: &Term, bindings: Bindings, depth: usize) -> Option<Bindings> {
    if depth > MAX_TERM_DEPTH {
        return None;
    }
    if x == y {
        return Some(bindings);
    }
    match (x, y) {
        (Term::Var(v), _) => unify_var(*v, y, bindings, depth),
        (_, Term::Var(v)) => unify_var(*v, x, bindings, depth),
        (Term::Sym(_), _) | (_, Term::Sym(_)) => None,
        (Term::Compound(f, xs), Term::Compound(g, ys)) => {
            if f != g || xs.len() != ys.len() {
                return None;
            }
            xs.iter()
                .zip(ys.iter())
                .try_fold(bindings, |bl, (a, b)| unify_depth(a, b, bl, depth + 1))
        }
    }
}

fn unify_var(var: Symbol, value: &Term, bindings: Bindings, depth: usize) -> Option<Bindings> {
    if let Some(bound) = bindings.get(&var) {
        let bound = bound.clone();
        return unify_depth(&bound, value, bindings, depth + 1);
    }
    if occurs(var, value, &bindings, 0) {
        return None;
    }
    Some(bindings.with(var, value.clone()))
}

fn occurs(var: Symbol, term: &Term, bindings: &Bindings, depth: usize) -> bool {
    if depth > MAX_TERM_DEPTH {
        return true;
    }
    match term {
        Term::Var(v) if *v == var => true,
        Term::Var(v) => bindings
            .get(v)
            .map(|value| occurs(var, value, bindings, depth + 1))
            .unwrap_or(false),
        Term::Sym(_) => false,
        Term::Compound(_, args) => args.iter().any(|a| occurs(var, a, bindings, depth + 1)),
    }
}

/// Replace bound variables by their values, recursively. Unbound variables
/// are left as they are.
pub fn plug(term: &Term, bindings: &Bindings) -> Term {
    plug_depth(term, bindings, 0)
}

fn plug_depth(term: &Term, bindings: &Bindings, depth: usize) -> Term {
    if depth > MAX_TERM_DEPTH {
        return term.clone();
    }
    match term {
        Term::Var(v) => match bindings.get(v) {
            Some(value) => plug_depth(value, bindings, depth + 1),
            None => term.clone(),
        },
        Term::Sym(_) => term.clone(),
        Term::Compound(f, args) => Term::Compound(
            *f,
            args.iter()
                .map(|a| plug_depth(a, bindings, depth + 1))
                .collect::<Vec<_>>()
                .into(),
        ),
    }
}

/// Rename every variable to a fresh one; repeated occurrences of a variable
/// get the same new name.
pub fn standardize(term: &Term, names: &mut NameGenerator) -> Term {
    let mut renaming = HashMap::new();
    standardize_with(term, names, &mut renaming)
}

fn standardize_with(
    term: &Term,
    names: &mut NameGenerator,
    renaming: &mut HashMap<Symbol, Symbol>,
) -> Term {
    match term {
        Term::Var(v) => Term::Var(*renaming.entry(*v).or_insert_with(|| names.fresh_var_name())),
        Term::Sym(_) => term.clone(),
        Term::Compound(f, args) => Term::Compound(
            *f,
            args.iter()
                .map(|a| standardize_with(a, names, renaming))
                .collect::<Vec<_>>()
                .into(),
        ),
    }
}

#[cfg(test)]
#[path = "../tests/unit/bindings_tests.rs"]
mod tests;
