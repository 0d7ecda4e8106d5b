//! Constructors and accessors for the sentence shapes the engine understands:
//! rules, handlers, transitions, definitions, negations, conjunctions and
//! disjunctions.

use crate::keywords;
use crate::term::{Symbol, Term};
use std::sync::Arc;

fn build(functor: Symbol, args: Vec<Term>) -> Term {
    Term::Compound(functor, Arc::from(args))
}

impl Term {
    /// `rule(head, body...)`
    pub fn rule(head: Term, body: Vec<Term>) -> Term {
        let mut args = Vec::with_capacity(body.len() + 1);
        args.push(head);
        args.extend(body);
        build(keywords::rule(), args)
    }

    pub fn handler(pattern: Term, replacement: Term) -> Term {
        build(keywords::handler(), vec![pattern, replacement])
    }

    pub fn transition(condition: Term, action: Term) -> Term {
        build(keywords::transition(), vec![condition, action])
    }

    pub fn definition(head: Term, value: Term) -> Term {
        build(keywords::definition(), vec![head, value])
    }

    pub fn negation(goal: Term) -> Term {
        build(keywords::not(), vec![goal])
    }

    /// `and(goals...)`; a single goal is returned unchanged.
    pub fn conjunction(mut goals: Vec<Term>) -> Term {
        if goals.len() == 1 {
            return goals.remove(0);
        }
        build(keywords::and(), goals)
    }

    /// `or(goals...)`; a single goal is returned unchanged.
    pub fn disjunction(mut goals: Vec<Term>) -> Term {
        if goals.len() == 1 {
            return goals.remove(0);
        }
        build(keywords::or(), goals)
    }

    pub fn is_rule(&self) -> bool {
        self.as_rule().is_some()
    }

    /// Head and body of a `rule(...)` sentence.
    pub fn as_rule(&self) -> Option<(&Term, &[Term])> {
        match self {
            Term::Compound(f, args) if *f == keywords::rule() && !args.is_empty() => {
                Some((&args[0], &args[1..]))
            }
            _ => None,
        }
    }

    /// Pattern and replacement of a `handler(...)` sentence.
    pub fn as_handler(&self) -> Option<(&Term, &Term)> {
        self.as_pair(keywords::handler())
    }

    /// Condition and action of a `transition(...)` sentence.
    pub fn as_transition(&self) -> Option<(&Term, &Term)> {
        self.as_pair(keywords::transition())
    }

    /// Head and value of a `definition(...)` sentence.
    pub fn as_definition(&self) -> Option<(&Term, &Term)> {
        self.as_pair(keywords::definition())
    }

    /// Goal under a `not(...)`.
    pub fn as_negation(&self) -> Option<&Term> {
        match self {
            Term::Compound(f, args) if *f == keywords::not() && args.len() == 1 => Some(&args[0]),
            _ => None,
        }
    }

    fn as_pair(&self, functor: Symbol) -> Option<(&Term, &Term)> {
        match self {
            Term::Compound(f, args) if *f == functor && args.len() == 2 => Some((&args[0], &args[1])),
            _ => None,
        }
    }
}
