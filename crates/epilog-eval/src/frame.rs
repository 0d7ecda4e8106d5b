//! Frames of the search arena
//!
//! Every goal under evaluation is a [`Frame`] stored in the search's arena and
//! addressed by [`FrameId`]. A frame knows its caller by id; control moves
//! between frames by setting a [`Task`] on the frame that runs next.

use epilog_ast::{keywords, Symbol, Term};
use epilog_core::{Checkpoint, EnvId, Theory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FrameId(pub(crate) usize);

/// The toplevel frame always sits at the bottom of the arena.
pub(crate) const TOPLEVEL: FrameId = FrameId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Task {
    /// First entry into the goal
    Call,
    /// Produce another solution
    Redo,
    /// A child succeeded (or, on the toplevel, an answer is ready)
    Next,
    /// A child ran out of solutions
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Toplevel,
    Atom,
    Same,
    Distinct,
    Mutex,
    Evaluation,
    Member,
    Negation,
    Conjunction,
    Disjunction,
    Truth,
    Base,
    View,
    Rule,
}

/// Per-kind working state
#[derive(Debug, Clone)]
pub(crate) enum Scratch {
    Empty,
    /// Unify `target` (in the frame's environment) with each candidate (in
    /// `env`) in turn.
    Cursor {
        target: Term,
        candidates: Vec<Term>,
        index: usize,
        env: EnvId,
    },
    /// Subgoals run left to right; `generators` holds the frames of the
    /// subgoals that currently have a solution.
    Sequence { generators: Vec<FrameId> },
    /// Disjuncts tried one after another.
    Choice { index: usize, generator: Option<FrameId> },
    /// Rules for a view goal, each tried in `env`.
    Expansion {
        candidates: Vec<Term>,
        index: usize,
        env: EnvId,
        generator: Option<FrameId>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub kind: Kind,
    pub goal: Term,
    pub env: EnvId,
    pub task: Task,
    pub caller: FrameId,
    pub checkpoint: Checkpoint,
    pub scratch: Scratch,
}

impl Frame {
    /// Subgoals of a conjunction or of a rule body.
    pub fn subgoals(&self) -> &[Term] {
        match self.kind {
            Kind::Rule => self.goal.as_rule().map_or(&[], |(_, body)| body),
            _ => self.goal.args(),
        }
    }
}

/// Frame kind for `goal`. Relations with no rules are answered from facts.
pub(crate) fn kind_of(goal: &Term, rules: &Theory) -> Kind {
    let functor = match goal {
        Term::Var(_) | Term::Sym(_) => return Kind::Atom,
        Term::Compound(f, _) => *f,
    };
    let name = functor.as_str();
    if functor == keywords::same() {
        Kind::Same
    } else if functor == keywords::distinct() {
        Kind::Distinct
    } else if functor == keywords::mutex() {
        Kind::Mutex
    } else if functor == keywords::member() {
        Kind::Member
    } else if functor == keywords::not() {
        Kind::Negation
    } else if functor == keywords::and() {
        Kind::Conjunction
    } else if functor == keywords::or() {
        Kind::Disjunction
    } else if functor == keywords::truth() && goal.arity() == 2 {
        Kind::Truth
    } else if is_evaluation(functor) || epilog_builtins::is_computed(name) {
        Kind::Evaluation
    } else if rules.defines(functor) {
        Kind::View
    } else {
        Kind::Base
    }
}

fn is_evaluation(functor: Symbol) -> bool {
    functor == keywords::evaluate()
        || functor == keywords::map()
        || keywords::is_aggregate(functor)
        || functor.as_str() == "matches"
        || functor.as_str() == "submatches"
}

/// Relation a frame reports on when tracing.
pub(crate) fn traced_relation(frame: &Frame) -> Option<Symbol> {
    match frame.kind {
        Kind::Base | Kind::View => frame.goal.functor(),
        _ => None,
    }
}
