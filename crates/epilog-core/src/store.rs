//! Trail-based binding store
//!
//! The search engine keeps one [`Store`] per query. A store holds any number
//! of environments (one per rule expansion), each mapping variables to a
//! `(Term, EnvId)` pair: the value together with the environment its own
//! variables must be read in. Every binding is recorded on the [`Trail`], and
//! backtracking rolls the trail back to a [`Checkpoint`] in LIFO order.
//!
//! # Invariants
//!
//! - A failed [`Store::unify`] or [`Store::match_into`] leaves the store
//!   exactly as it found it.
//! - `rollback(cp)` removes precisely the bindings made since `cp`.
//! - With occurs-check enabled no binding cycle can be created.

use epilog_ast::{NameGenerator, Symbol, Term, MAX_TERM_DEPTH};
use log::trace;
use std::collections::HashMap;

/// Handle to one environment inside a [`Store`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvId(u32);

impl EnvId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position in the trail to roll back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// Ordered journal of the bindings made so far
#[derive(Debug, Clone, Default)]
pub struct Trail {
    entries: Vec<(EnvId, Symbol)>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, env: EnvId, var: Symbol) {
        self.entries.push((env, var));
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return entries made after `cp`, newest first.
    pub fn unwind(&mut self, cp: Checkpoint) -> impl Iterator<Item = (EnvId, Symbol)> + '_ {
        let start = cp.0.min(self.entries.len());
        self.entries.drain(start..).rev()
    }
}

type Frame = HashMap<Symbol, (Term, EnvId)>;

/// Multi-environment binding store with an undo trail
#[derive(Debug, Clone, Default)]
pub struct Store {
    envs: Vec<Frame>,
    trail: Trail,
    occurs_check: bool,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occurs_check(occurs_check: bool) -> Self {
        Self {
            occurs_check,
            ..Self::default()
        }
    }

    pub fn occurs_check(&self) -> bool {
        self.occurs_check
    }

    /// Allocate a fresh, empty environment.
    pub fn new_env(&mut self) -> EnvId {
        self.envs.push(Frame::new());
        EnvId((self.envs.len() - 1) as u32)
    }

    pub fn env_count(&self) -> usize {
        self.envs.len()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.trail.checkpoint()
    }

    /// Undo every binding made after `cp`.
    pub fn rollback(&mut self, cp: Checkpoint) {
        let envs = &mut self.envs;
        for (env, var) in self.trail.unwind(cp) {
            if let Some(frame) = envs.get_mut(env.index()) {
                frame.remove(&var);
            }
        }
    }

    /// Total number of live bindings across all environments.
    pub fn binding_count(&self) -> usize {
        self.envs.iter().map(HashMap::len).sum()
    }

    pub fn lookup(&self, var: Symbol, env: EnvId) -> Option<&(Term, EnvId)> {
        self.envs.get(env.index()).and_then(|frame| frame.get(&var))
    }

    pub fn is_bound(&self, var: Symbol, env: EnvId) -> bool {
        self.lookup(var, env).is_some()
    }

    /// Record `var = value` where `value` is read in `value_env`.
    pub fn bind(&mut self, var: Symbol, env: EnvId, value: Term, value_env: EnvId) {
        if let Some(frame) = self.envs.get_mut(env.index()) {
            frame.insert(var, (value, value_env));
            self.trail.push(env, var);
        }
    }

    /// Follow variable bindings until reaching a non-variable or an unbound
    /// variable.
    pub fn resolve<'a>(&'a self, mut term: &'a Term, mut env: EnvId) -> (&'a Term, EnvId) {
        while let Term::Var(v) = term {
            match self.lookup(*v, env) {
                Some((value, value_env)) => {
                    term = value;
                    env = *value_env;
                }
                None => break,
            }
        }
        (term, env)
    }

    /// Bidirectional unification of `x` (read in `ex`) with `y` (read in
    /// `ey`). On failure every binding attempted is undone.
    pub fn unify(&mut self, x: &Term, ex: EnvId, y: &Term, ey: EnvId) -> bool {
        let cp = self.checkpoint();
        if self.unify_depth(x, ex, y, ey, 0) {
            true
        } else {
            self.rollback(cp);
            false
        }
    }

    fn unify_depth(&mut self, x: &Term, ex: EnvId, y: &Term, ey: EnvId, depth: usize) -> bool {
        if depth > MAX_TERM_DEPTH {
            return false;
        }
        match (x, y) {
            (Term::Var(v), _) => self.unify_var(*v, ex, y, ey, depth),
            (_, Term::Var(v)) => self.unify_var(*v, ey, x, ex, depth),
            (Term::Sym(a), Term::Sym(b)) => a == b,
            (Term::Compound(f, xs), Term::Compound(g, ys)) => {
                if f != g || xs.len() != ys.len() {
                    return false;
                }
                xs.iter()
                    .zip(ys.iter())
                    .all(|(a, b)| self.unify_depth(a, ex, b, ey, depth + 1))
            }
            _ => false,
        }
    }

    fn unify_var(&mut self, var: Symbol, ev: EnvId, y: &Term, ey: EnvId, depth: usize) -> bool {
        if let Term::Var(w) = y {
            if *w == var && ev == ey {
                return true;
            }
        }
        if let Some((value, value_env)) = self.lookup(var, ev).cloned() {
            return self.unify_depth(&value, value_env, y, ey, depth + 1);
        }
        if self.identical(var, ev, y, ey) {
            return true;
        }
        if self.occurs_check && self.occurs(var, ev, y, ey, 0) {
            return false;
        }
        self.bind(var, ev, y.clone(), ey);
        true
    }

    /// Does `y` (in `ey`) dereference to the unbound variable `var` (in `ev`)?
    fn identical(&self, var: Symbol, ev: EnvId, y: &Term, ey: EnvId) -> bool {
        match self.resolve(y, ey) {
            (Term::Var(w), env) => *w == var && env == ev,
            _ => false,
        }
    }

    fn occurs(&self, var: Symbol, ev: EnvId, y: &Term, ey: EnvId, depth: usize) -> bool {
        if depth > MAX_TERM_DEPTH {
            return true;
        }
        match y {
            Term::Var(w) => {
                if *w == var && ey == ev {
                    return true;
                }
                match self.lookup(*w, ey) {
                    Some((value, value_env)) => self.occurs(var, ev, value, *value_env, depth + 1),
                    None => false,
                }
            }
            Term::Sym(_) => false,
            Term::Compound(_, args) => args
                .iter()
                .any(|a| self.occurs(var, ev, a, ey, depth + 1)),
        }
    }

    /// One-directional match: only variables of `pattern` (in `ep`) get bound;
    /// `term` (in `et`) is taken literally. Undoes itself on failure.
    pub fn match_into(&mut self, pattern: &Term, ep: EnvId, term: &Term, et: EnvId) -> bool {
        let cp = self.checkpoint();
        if self.match_depth(pattern, ep, term, et, 0) {
            true
        } else {
            self.rollback(cp);
            false
        }
    }

    fn match_depth(&mut self, pattern: &Term, ep: EnvId, term: &Term, et: EnvId, depth: usize) -> bool {
        if depth > MAX_TERM_DEPTH {
            return false;
        }
        match pattern {
            Term::Var(v) => match self.lookup(*v, ep).cloned() {
                Some((value, value_env)) => self.match_depth(&value, value_env, term, et, depth + 1),
                None => {
                    self.bind(*v, ep, term.clone(), et);
                    true
                }
            },
            Term::Sym(_) => pattern == term,
            Term::Compound(f, args) => match term {
                Term::Compound(g, targs) if f == g && args.len() == targs.len() => args
                    .iter()
                    .zip(targs.iter())
                    .all(|(p, t)| self.match_depth(p, ep, t, et, depth + 1)),
                _ => false,
            },
        }
    }

    /// Substitute bindings into `term` (read in `env`), producing a term
    /// meaningful in `target`. Unbound variables of other environments are
    /// renamed to fresh variables of `target`; the renaming is itself a
    /// binding, so it is trailed and undone on backtrack.
    pub fn plug(&mut self, term: &Term, env: EnvId, target: EnvId, names: &mut NameGenerator) -> Term {
        self.plug_depth(term, env, target, names, 0)
    }

    fn plug_depth(
        &mut self,
        term: &Term,
        env: EnvId,
        target: EnvId,
        names: &mut NameGenerator,
        depth: usize,
    ) -> Term {
        if depth > MAX_TERM_DEPTH {
            return term.clone();
        }
        match term {
            Term::Var(v) => {
                if let Some((value, value_env)) = self.lookup(*v, env).cloned() {
                    return self.plug_depth(&value, value_env, target, names, depth + 1);
                }
                if env == target {
                    return term.clone();
                }
                let fresh = names.fresh_var();
                trace!("renaming {} across environments to {:?}", v.as_str(), fresh);
                self.bind(*v, env, fresh.clone(), target);
                fresh
            }
            Term::Sym(_) => term.clone(),
            Term::Compound(f, args) => {
                let mut plugged = Vec::with_capacity(args.len());
                for arg in args.iter() {
                    plugged.push(self.plug_depth(arg, env, target, names, depth + 1));
                }
                Term::Compound(*f, plugged.into())
            }
        }
    }

    /// Is `term` ground once its bindings are applied?
    pub fn is_ground(&self, term: &Term, env: EnvId) -> bool {
        self.ground_depth(term, env, 0)
    }

    fn ground_depth(&self, term: &Term, env: EnvId, depth: usize) -> bool {
        if depth > MAX_TERM_DEPTH {
            return false;
        }
        match self.resolve(term, env) {
            (Term::Var(_), _) => false,
            (Term::Sym(_), _) => true,
            (Term::Compound(_, args), env) => args.iter().all(|a| self.ground_depth(a, env, depth + 1)),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/store_tests.rs"]
mod tests;
