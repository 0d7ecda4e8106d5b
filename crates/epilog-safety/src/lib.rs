//! Static checks for Epilog programs
//!
//! [`find_errors`] runs every check over a list of sentences and reports what
//! it finds as [`Diagnostic`]s, in this order:
//!
//! 1. arity: a relation used with more than one arity
//! 2. safety: see [`safety`]
//! 3. stratified recursion: in a recursive rule, the variables of recursive
//!    subgoals must also appear in some non-recursive subgoal
//! 4. stratified negation: negated and aggregated subgoals must refer to
//!    strictly lower strata
//!
//! Diagnostics are advisory. Nothing stops a program with errors from being
//! queried.

pub mod safety;
pub mod stratification;

pub use safety::is_safe;
pub use stratification::{all_relations, stratify, Stratification};

use epilog_ast::{keywords, Symbol, Term};
use epilog_parser::grind;
use log::debug;
use std::fmt;

/// A problem found in a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MixedArity(Symbol),
    UnsafeRule(Term),
    UnstratifiedRecursion(Term),
    UnstratifiedNegation(Term),
}

impl Diagnostic {
    /// The sentence at fault, if the diagnostic is about one.
    pub fn sentence(&self) -> Option<&Term> {
        match self {
            Diagnostic::MixedArity(_) => None,
            Diagnostic::UnsafeRule(t)
            | Diagnostic::UnstratifiedRecursion(t)
            | Diagnostic::UnstratifiedNegation(t) => Some(t),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MixedArity(relation) => write!(f, "Mixed arity: {}", relation.as_str()),
            Diagnostic::UnsafeRule(rule) => write!(f, "Unsafe rule: {}", grind(rule)),
            Diagnostic::UnstratifiedRecursion(rule) => {
                write!(f, "Unstratified Recursion: {}", grind(rule))
            }
            Diagnostic::UnstratifiedNegation(rule) => {
                write!(f, "Unstratified Negation: {}", grind(rule))
            }
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Run every check over `data`.
pub fn find_errors(data: &[Term]) -> Vec<Diagnostic> {
    let mut errors = arity_errors(data);
    errors.extend(safety_errors(data));
    errors.extend(stratification_errors(data));
    debug!("checked {} sentences, {} diagnostics", data.len(), errors.len());
    errors
}

/// Check if a rule is safe
pub fn check_rule_safety(rule: &Term) -> Result<(), Diagnostic> {
    if is_safe(rule) {
        Ok(())
    } else {
        Err(Diagnostic::UnsafeRule(rule.clone()))
    }
}

/// Check if all rules in a program are safe
pub fn check_program_safety(rules: &[Term]) -> Result<(), Diagnostic> {
    for rule in rules {
        check_rule_safety(rule)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Fixed(usize),
    Mixed,
}

pub fn arity_errors(data: &[Term]) -> Vec<Diagnostic> {
    let mut arities: Vec<(Symbol, Arity)> = Vec::new();
    for datum in data {
        collect_arities(datum, &mut arities);
    }
    arities
        .into_iter()
        .filter(|(_, arity)| *arity == Arity::Mixed)
        .map(|(relation, _)| Diagnostic::MixedArity(relation))
        .collect()
}

fn collect_arities(term: &Term, arities: &mut Vec<(Symbol, Arity)>) {
    let (functor, args) = match term {
        Term::Var(_) => return,
        Term::Sym(s) => return add_arity(*s, 0, arities),
        Term::Compound(f, args) => (*f, args),
    };
    if keywords::is_aggregate(functor) {
        if let Some(goal) = args.get(1) {
            collect_arities(goal, arities);
        }
    } else if functor == keywords::not() {
        if let Some(goal) = args.first() {
            collect_arities(goal, arities);
        }
    } else if functor == keywords::and() || functor == keywords::or() || functor == keywords::rule() {
        for arg in args.iter() {
            collect_arities(arg, arities);
        }
    } else {
        add_arity(functor, args.len(), arities);
    }
}

fn add_arity(relation: Symbol, n: usize, arities: &mut Vec<(Symbol, Arity)>) {
    match arities.iter_mut().find(|(r, _)| *r == relation) {
        None => arities.push((relation, Arity::Fixed(n))),
        Some((_, arity)) => {
            if *arity != Arity::Fixed(n) {
                *arity = Arity::Mixed;
            }
        }
    }
}

pub fn safety_errors(data: &[Term]) -> Vec<Diagnostic> {
    data.iter()
        .filter(|datum| !is_safe(datum))
        .map(|datum| Diagnostic::UnsafeRule(datum.clone()))
        .collect()
}

pub fn stratification_errors(data: &[Term]) -> Vec<Diagnostic> {
    let strata = stratify(data);
    let mut errors: Vec<Diagnostic> = data
        .iter()
        .filter(|datum| !stratified_recursion(datum, &strata))
        .map(|datum| Diagnostic::UnstratifiedRecursion(datum.clone()))
        .collect();
    errors.extend(
        data.iter()
            .filter(|datum| !stratified_negation(datum, &strata))
            .map(|datum| Diagnostic::UnstratifiedNegation(datum.clone())),
    );
    errors
}

/// Stratum of the relation of `goal`, if it is a relation at all.
fn stratum_of(goal: &Term, strata: &Stratification) -> Option<usize> {
    goal.operator().and_then(|r| strata.stratum(r))
}

/// Is `goal` at or above `stratum`? Non-relations never are.
fn at_or_above(goal_stratum: Option<usize>, stratum: usize) -> bool {
    goal_stratum.map_or(false, |s| s >= stratum)
}

fn is_positive(goal: &Term) -> bool {
    match goal.functor() {
        Some(f) if goal.is_compound() => f != keywords::not() && !keywords::is_aggregate(f),
        _ => true,
    }
}

/// Negated and aggregated subgoals of a rule must sit strictly below its head.
pub fn stratified_negation(datum: &Term, strata: &Stratification) -> bool {
    let Some((head, body)) = datum.as_rule() else {
        return true;
    };
    let Some(stratum) = stratum_of(head, strata) else {
        return true;
    };
    for goal in body {
        let Some(functor) = goal.functor().filter(|_| goal.is_compound()) else {
            continue;
        };
        if functor == keywords::not() {
            let inner = goal.arg(0).and_then(|g| stratum_of(g, strata));
            if at_or_above(inner, stratum) {
                return false;
            }
        } else if keywords::is_aggregate(functor) {
            let relations = all_relations(std::slice::from_ref(goal));
            if relations
                .into_iter()
                .any(|r| at_or_above(strata.stratum(r), stratum))
            {
                return false;
            }
        }
    }
    true
}

/// In a recursive rule every variable of a recursive subgoal must also occur
/// in a non-recursive positive subgoal.
pub fn stratified_recursion(datum: &Term, strata: &Stratification) -> bool {
    let Some((head, body)) = datum.as_rule() else {
        return true;
    };
    let Some(stratum) = stratum_of(head, strata) else {
        return true;
    };
    let mut recursive = Vec::new();
    let mut grounding = Vec::new();
    for goal in body.iter().filter(|g| is_positive(g)) {
        if at_or_above(stratum_of(goal, strata), stratum) {
            goal.collect_vars(&mut recursive);
        } else {
            goal.collect_vars(&mut grounding);
        }
    }
    recursive.iter().all(|v| grounding.contains(v))
}

#[cfg(test)]
#[path = "../tests/unit/diagnostics_tests.rs"]
mod tests;
