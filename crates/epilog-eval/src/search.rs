//! The search loop
//!
//! A [`Search`] answers one query by driving frames of its arena through
//! their `(kind, task)` transitions until the toplevel frame is told `Next`
//! (an answer is ready) or `Back` (there are no more). Between answers the
//! arena is kept, so asking for the next answer resumes where the previous
//! one left off instead of deriving it again.
//!
//! Bindings live in one [`Store`] per search. Each frame remembers the trail
//! position it started at and rolls back to it before trying an alternative,
//! so an exhausted search leaves the trail empty.
//!
//! All searches started from one [`Context`] share a [`Budget`]: nested
//! searches for aggregates and values spend from the query's frame limit.

use crate::config::EngineConfig;
use crate::frame::{kind_of, traced_relation, Frame, FrameId, Kind, Scratch, Task, TOPLEVEL};
use epilog_ast::{keywords, NameGenerator, Symbol, Term, MAX_TERM_DEPTH};
use epilog_builtins::{call_builtin, call_list_op, call_math, is_builtin, is_math, quotify};
use epilog_core::dedup::vniquify;
use epilog_core::{EnvId, Store, Theory};
use epilog_parser::grind;
use log::{debug, trace};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// Hypothetical additions and deletions layered over the facts
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub adds: &'a Theory,
    pub dels: &'a Theory,
}

impl<'a> Overlay<'a> {
    pub fn new(adds: &'a Theory, dels: &'a Theory) -> Self {
        Self { adds, dels }
    }
}

/// Where a search reads facts, rules and datasets from
#[derive(Clone, Copy)]
pub(crate) struct Sources<'a> {
    pub facts: &'a Theory,
    pub rules: &'a Theory,
    pub overlay: Option<Overlay<'a>>,
    pub datasets: &'a HashMap<Symbol, Theory>,
    pub config: &'a EngineConfig,
}

/// Step counters shared by a search and the searches nested in it
#[derive(Debug)]
pub(crate) struct Budget {
    inferences: Cell<usize>,
    instantiations: Cell<usize>,
    limit: usize,
}

impl Budget {
    fn new(limit: usize) -> Self {
        Self {
            inferences: Cell::new(0),
            instantiations: Cell::new(0),
            limit,
        }
    }

    pub fn infer(&self) {
        self.inferences.set(self.inferences.get() + 1);
    }

    pub fn instantiate(&self) {
        self.instantiations.set(self.instantiations.get() + 1);
    }

    pub fn inferences(&self) -> usize {
        self.inferences.get()
    }

    pub fn instantiations(&self) -> usize {
        self.instantiations.get()
    }

    pub fn exhausted(&self) -> bool {
        self.inferences.get() + self.instantiations.get() >= self.limit
    }
}

/// Sources plus the budget they are searched under
#[derive(Clone)]
pub(crate) struct Context<'a> {
    pub sources: Sources<'a>,
    pub budget: Rc<Budget>,
}

impl<'a> Context<'a> {
    pub fn new(sources: Sources<'a>) -> Self {
        let budget = Rc::new(Budget::new(sources.config.frame_limit));
        Self { sources, budget }
    }

    pub fn search(&self, template: &Term, goal: &Term) -> Search<'a> {
        Search::new(self.clone(), template, goal)
    }

    pub fn find_any(&self, template: &Term, goal: &Term) -> Option<Term> {
        self.search(template, goal).next_answer()
    }

    pub fn find_p(&self, goal: &Term) -> bool {
        self.find_any(&Term::Sym(keywords::truth()), goal).is_some()
    }

    /// Every answer, duplicates included.
    pub fn collect_all(&self, template: &Term, goal: &Term) -> Vec<Term> {
        let mut search = self.search(template, goal);
        let mut answers = Vec::new();
        while let Some(answer) = search.next_answer() {
            answers.push(answer);
        }
        answers
    }

    pub fn find_all(&self, template: &Term, goal: &Term) -> Vec<Term> {
        self.sources.config.dedup.apply(self.collect_all(template, goal))
    }
}

pub(crate) struct Search<'a> {
    ctx: Context<'a>,
    store: Store,
    names: NameGenerator,
    frames: Vec<Frame>,
    template: Term,
    root: FrameId,
    started: bool,
    finished: bool,
    limit_reached: bool,
}

impl<'a> Search<'a> {
    fn new(ctx: Context<'a>, template: &Term, goal: &Term) -> Self {
        let mut store = Store::with_occurs_check(ctx.sources.config.occurs_check);
        let env = store.new_env();
        let toplevel = Frame {
            kind: Kind::Toplevel,
            goal: template.clone(),
            env,
            task: Task::Call,
            caller: TOPLEVEL,
            checkpoint: store.checkpoint(),
            scratch: Scratch::Empty,
        };
        let names = NameGenerator::starting_at(highest_fresh_index(&[template, goal]));
        let mut search = Self {
            ctx,
            store,
            names,
            frames: vec![toplevel],
            template: template.clone(),
            root: TOPLEVEL,
            started: false,
            finished: false,
            limit_reached: false,
        };
        search.root = search.spawn(goal.clone(), env, TOPLEVEL);
        search
    }

    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    pub fn budget(&self) -> &Budget {
        &self.ctx.budget
    }

    pub fn trail_len(&self) -> usize {
        self.store.trail().len()
    }

    /// Run until the next answer, or `None` when there are no more or the
    /// frame limit has been reached.
    pub fn next_answer(&mut self) -> Option<Term> {
        if self.finished {
            return None;
        }
        let mut current = self.root;
        if self.started {
            self.frames[current.0].task = Task::Redo;
        }
        self.started = true;
        loop {
            if self.ctx.budget.exhausted() {
                debug!(
                    "frame limit of {} reached after {} frames",
                    self.ctx.sources.config.frame_limit,
                    self.frames.len()
                );
                self.limit_reached = true;
                self.finished = true;
                return None;
            }
            if current == TOPLEVEL {
                if self.frames[TOPLEVEL.0].task == Task::Next {
                    let env = self.frames[TOPLEVEL.0].env;
                    let template = self.template.clone();
                    return Some(self.store.plug(&template, env, env, &mut self.names));
                }
                self.finished = true;
                return None;
            }
            current = self.step(current);
        }
    }

    fn spawn(&mut self, goal: Term, env: EnvId, caller: FrameId) -> FrameId {
        let (goal, env) = {
            let (resolved, env) = self.store.resolve(&goal, env);
            (resolved.clone(), env)
        };
        let kind = kind_of(&goal, self.ctx.sources.rules);
        self.push(kind, goal, env, caller)
    }

    fn push(&mut self, kind: Kind, goal: Term, env: EnvId, caller: FrameId) -> FrameId {
        self.frames.push(Frame {
            kind,
            goal,
            env,
            task: Task::Call,
            caller,
            checkpoint: self.store.checkpoint(),
            scratch: Scratch::Empty,
        });
        FrameId(self.frames.len() - 1)
    }

    /// Report `task` to the caller of `id` and hand control to it.
    fn signal(&mut self, id: FrameId, task: Task) -> FrameId {
        match task {
            Task::Next => self.trace_event(id, "Exit"),
            Task::Back => self.trace_event(id, "Fail"),
            _ => {}
        }
        let caller = self.frames[id.0].caller;
        self.frames[caller.0].task = task;
        caller
    }

    fn resume(&mut self, id: FrameId) -> FrameId {
        self.frames[id.0].task = Task::Redo;
        id
    }

    fn step(&mut self, id: FrameId) -> FrameId {
        let (kind, task) = {
            let frame = &self.frames[id.0];
            (frame.kind, frame.task)
        };
        match task {
            Task::Call => self.trace_event(id, "Call"),
            Task::Redo => self.trace_event(id, "Redo"),
            _ => {}
        }
        match kind {
            Kind::Toplevel => TOPLEVEL,
            Kind::Atom => self.step_atom(id, task),
            Kind::Same => self.step_same(id, task),
            Kind::Distinct => self.step_distinct(id, task),
            Kind::Mutex => self.step_mutex(id, task),
            Kind::Evaluation | Kind::Member | Kind::Truth | Kind::Base => self.step_cursor(id, kind, task),
            Kind::Negation => self.step_negation(id, task),
            Kind::Conjunction | Kind::Rule => self.step_sequence(id, task),
            Kind::Disjunction => self.step_disjunction(id, task),
            Kind::View => self.step_view(id, task),
        }
    }

    fn step_atom(&mut self, id: FrameId, task: Task) -> FrameId {
        match task {
            Task::Call => {
                let (goal, env) = {
                    let frame = &self.frames[id.0];
                    (frame.goal.clone(), frame.env)
                };
                let Some(symbol) = goal.as_symbol() else {
                    return self.signal(id, Task::Back);
                };
                if symbol == keywords::truth() {
                    return self.signal(id, Task::Next);
                }
                if symbol == keywords::falsity() {
                    return self.signal(id, Task::Back);
                }
                let kind = if self.ctx.sources.rules.defines(symbol) {
                    Kind::View
                } else {
                    Kind::Base
                };
                let child = self.push(kind, goal, env, id);
                self.frames[id.0].scratch = Scratch::Choice {
                    index: 0,
                    generator: Some(child),
                };
                child
            }
            Task::Next => self.signal(id, Task::Next),
            Task::Redo => match &self.frames[id.0].scratch {
                Scratch::Choice { generator: Some(child), .. } => {
                    let child = *child;
                    self.resume(child)
                }
                _ => {
                    self.store.rollback(self.frames[id.0].checkpoint);
                    self.signal(id, Task::Back)
                }
            },
            Task::Back => {
                self.store.rollback(self.frames[id.0].checkpoint);
                self.signal(id, Task::Back)
            }
        }
    }

    fn step_same(&mut self, id: FrameId, task: Task) -> FrameId {
        match task {
            Task::Call => {
                let frame = &self.frames[id.0];
                let env = frame.env;
                let unified = match (frame.goal.arg(0), frame.goal.arg(1)) {
                    (Some(x), Some(y)) => self.store.unify(x, env, y, env),
                    _ => false,
                };
                self.signal(id, if unified { Task::Next } else { Task::Back })
            }
            _ => {
                self.store.rollback(self.frames[id.0].checkpoint);
                self.signal(id, Task::Back)
            }
        }
    }

    fn step_distinct(&mut self, id: FrameId, task: Task) -> FrameId {
        if task != Task::Call {
            return self.signal(id, Task::Back);
        }
        let frame = &self.frames[id.0];
        let (env, checkpoint) = (frame.env, frame.checkpoint);
        let unified = match (frame.goal.arg(0), frame.goal.arg(1)) {
            (Some(x), Some(y)) => self.store.unify(x, env, y, env),
            _ => return self.signal(id, Task::Back),
        };
        if unified {
            self.store.rollback(checkpoint);
            self.signal(id, Task::Back)
        } else {
            self.signal(id, Task::Next)
        }
    }

    fn step_mutex(&mut self, id: FrameId, task: Task) -> FrameId {
        if task != Task::Call {
            return self.signal(id, Task::Back);
        }
        let (goal, env) = self.goal_and_env(id);
        let mut args = Vec::with_capacity(goal.arity());
        for arg in goal.args() {
            let value = self.plug(arg, env);
            if value.is_variable() {
                return self.signal(id, Task::Back);
            }
            args.push(value);
        }
        let ok = epilog_builtins::mutex(&args);
        self.signal(id, if ok { Task::Next } else { Task::Back })
    }

    /// Frames that unify a target with each of a list of candidates.
    fn step_cursor(&mut self, id: FrameId, kind: Kind, task: Task) -> FrameId {
        if task != Task::Call {
            return self.advance_cursor(id, kind);
        }
        let (goal, env) = self.goal_and_env(id);
        let scratch = match kind {
            Kind::Base => {
                let candidates = self.base_candidates(&goal, env);
                let env = self.store.new_env();
                Some((goal, candidates, env))
            }
            Kind::Truth => self.dataset_candidates(&goal, env),
            Kind::Member => self.member_candidates(&goal, env),
            _ => self.evaluate_goal(&goal, env),
        };
        let Some((target, candidates, cand_env)) = scratch else {
            return self.signal(id, Task::Back);
        };
        self.frames[id.0].scratch = Scratch::Cursor {
            target,
            candidates,
            index: 0,
            env: cand_env,
        };
        self.advance_cursor(id, kind)
    }

    fn advance_cursor(&mut self, id: FrameId, kind: Kind) -> FrameId {
        let counted = matches!(kind, Kind::Base | Kind::Truth);
        self.store.rollback(self.frames[id.0].checkpoint);
        loop {
            let frame = &mut self.frames[id.0];
            let env = frame.env;
            let Scratch::Cursor { target, candidates, index, env: cand_env } = &mut frame.scratch else {
                return self.signal(id, Task::Back);
            };
            let Some(candidate) = candidates.get(*index) else {
                return self.signal(id, Task::Back);
            };
            *index += 1;
            if counted {
                self.ctx.budget.instantiate();
            }
            if self.store.unify(target, env, candidate, *cand_env) {
                return self.signal(id, Task::Next);
            }
        }
    }

    fn base_candidates(&self, goal: &Term, env: EnvId) -> Vec<Term> {
        let sources = self.ctx.sources;
        match sources.overlay {
            None => lookup_terms(sources.facts, goal, env, &self.store),
            Some(overlay) => {
                let mut candidates = lookup_terms(overlay.adds, goal, env, &self.store);
                candidates.extend(
                    lookup_terms(sources.facts, goal, env, &self.store)
                        .into_iter()
                        .filter(|fact| !overlay.dels.contains(fact)),
                );
                candidates
            }
        }
    }

    /// `true(Goal, Dataset)`: facts of a named dataset.
    fn dataset_candidates(&mut self, goal: &Term, env: EnvId) -> Option<(Term, Vec<Term>, EnvId)> {
        let target = goal.arg(0)?.clone();
        let name = self.plug(goal.arg(1)?, env).as_symbol()?;
        let candidates = match self.ctx.sources.datasets.get(&name) {
            Some(dataset) => lookup_terms(dataset, &target, env, &self.store),
            None => Vec::new(),
        };
        Some((target, candidates, self.store.new_env()))
    }

    fn member_candidates(&mut self, goal: &Term, env: EnvId) -> Option<(Term, Vec<Term>, EnvId)> {
        let item = goal.arg(0)?.clone();
        let mut list = self.plug(goal.arg(1)?, env);
        let mut items = Vec::new();
        while let Some((head, tail)) = list.as_cons() {
            items.push(head.clone());
            let tail = tail.clone();
            list = tail;
        }
        Some((item, items, env))
    }

    /// Evaluation goals: a target to unify and the values to unify it with.
    fn evaluate_goal(&mut self, goal: &Term, env: EnvId) -> Option<(Term, Vec<Term>, EnvId)> {
        let functor = goal.functor()?;
        let name = functor.as_str();
        let args = goal.args();

        if functor == keywords::evaluate() {
            let expr = self.plug(args.first()?, env);
            let value = self.ctx.value(&expr)?;
            return Some((args.get(1)?.clone(), vec![value], env));
        }
        if name == "matches" {
            let text = self.plug(args.first()?, env);
            let pattern = self.plug(args.get(1)?, env);
            let groups = epilog_builtins::first_match(text.string_text()?, pattern.string_text()?)?;
            let outputs = &args[2..];
            if groups.len() <= outputs.len() {
                return None;
            }
            let values = groups[1..=outputs.len()].iter().map(|g| quotify(g)).collect();
            return Some((Term::list(outputs.to_vec()), vec![Term::list(values)], env));
        }
        if name == "submatches" {
            let text = self.plug(args.first()?, env);
            let pattern = self.plug(args.get(1)?, env);
            let found = epilog_builtins::all_matches(text.string_text()?, pattern.string_text()?);
            let values = found.iter().map(|m| quotify(m)).collect();
            return Some((args.get(2)?.clone(), values, env));
        }
        if functor == keywords::map() {
            let relation = args.first()?.as_symbol()?;
            let list = self.plug(args.get(1)?, env);
            let mut results = Vec::new();
            for item in list.list_items()? {
                let out = self.names.fresh_var();
                let call = Term::apply(relation, vec![item, out.clone()]);
                results.push(self.ctx.find_any(&out, &call)?);
            }
            return Some((args.get(2)?.clone(), vec![Term::list(results)], env));
        }
        if keywords::is_aggregate(functor) {
            let template = self.plug(args.first()?, env);
            let inner = self.plug(args.get(1)?, env);
            let value = if functor == keywords::setofall() {
                Term::list(self.ctx.find_all(&template, &inner))
            } else {
                let count = vniquify(self.ctx.collect_all(&template, &inner)).len();
                Term::number(count as f64)
            };
            return Some((args.get(2)?.clone(), vec![value], env));
        }

        let (output, inputs) = args.split_last()?;
        let mut values = Vec::with_capacity(inputs.len());
        for input in inputs {
            let value = self.plug(input, env);
            if value.is_variable() {
                return None;
            }
            values.push(value);
        }
        let value = if is_builtin(name) {
            call_builtin(name, &values)?
        } else if is_math(name) {
            call_math(name, &values)?
        } else {
            call_list_op(name, values.first()?)?
        };
        Some((output.clone(), vec![value], env))
    }

    fn step_negation(&mut self, id: FrameId, task: Task) -> FrameId {
        match task {
            Task::Call => {
                let (goal, env) = self.goal_and_env(id);
                match goal.arg(0) {
                    Some(inner) => self.spawn(inner.clone(), env, id),
                    None => self.signal(id, Task::Back),
                }
            }
            Task::Next => {
                self.store.rollback(self.frames[id.0].checkpoint);
                self.signal(id, Task::Back)
            }
            Task::Back => self.signal(id, Task::Next),
            Task::Redo => self.signal(id, Task::Back),
        }
    }

    /// Conjunctions and rule bodies.
    fn step_sequence(&mut self, id: FrameId, task: Task) -> FrameId {
        match task {
            Task::Call => {
                self.frames[id.0].scratch = Scratch::Sequence { generators: Vec::new() };
                self.extend_sequence(id)
            }
            Task::Next => self.extend_sequence(id),
            Task::Redo => match self.last_generator(id) {
                Some(generator) => self.resume(generator),
                None => self.signal(id, Task::Back),
            },
            Task::Back => {
                if let Scratch::Sequence { generators } = &mut self.frames[id.0].scratch {
                    generators.pop();
                }
                match self.last_generator(id) {
                    Some(generator) => self.resume(generator),
                    None => self.signal(id, Task::Back),
                }
            }
        }
    }

    fn extend_sequence(&mut self, id: FrameId) -> FrameId {
        let frame = &self.frames[id.0];
        let done = match &frame.scratch {
            Scratch::Sequence { generators } => generators.len(),
            _ => 0,
        };
        let Some(goal) = frame.subgoals().get(done).cloned() else {
            return self.signal(id, Task::Next);
        };
        let env = frame.env;
        let child = self.spawn(goal, env, id);
        if let Scratch::Sequence { generators } = &mut self.frames[id.0].scratch {
            generators.push(child);
        }
        child
    }

    fn last_generator(&self, id: FrameId) -> Option<FrameId> {
        match &self.frames[id.0].scratch {
            Scratch::Sequence { generators } => generators.last().copied(),
            _ => None,
        }
    }

    fn step_disjunction(&mut self, id: FrameId, task: Task) -> FrameId {
        match task {
            Task::Call => {
                self.frames[id.0].scratch = Scratch::Choice { index: 0, generator: None };
                self.try_disjunct(id)
            }
            Task::Next => self.signal(id, Task::Next),
            Task::Redo => match &self.frames[id.0].scratch {
                Scratch::Choice { generator: Some(generator), .. } => {
                    let generator = *generator;
                    self.resume(generator)
                }
                _ => self.signal(id, Task::Back),
            },
            Task::Back => {
                if let Scratch::Choice { index, .. } = &mut self.frames[id.0].scratch {
                    *index += 1;
                }
                self.try_disjunct(id)
            }
        }
    }

    fn try_disjunct(&mut self, id: FrameId) -> FrameId {
        let frame = &self.frames[id.0];
        let index = match &frame.scratch {
            Scratch::Choice { index, .. } => *index,
            _ => usize::MAX,
        };
        let Some(goal) = frame.goal.arg(index).cloned() else {
            return self.signal(id, Task::Back);
        };
        let env = frame.env;
        let child = self.spawn(goal, env, id);
        if let Scratch::Choice { generator, .. } = &mut self.frames[id.0].scratch {
            *generator = Some(child);
        }
        child
    }

    fn step_view(&mut self, id: FrameId, task: Task) -> FrameId {
        match task {
            Task::Call => {
                let (goal, env) = self.goal_and_env(id);
                let candidates = lookup_terms(self.ctx.sources.rules, &goal, env, &self.store);
                let rule_env = self.store.new_env();
                self.frames[id.0].scratch = Scratch::Expansion {
                    candidates,
                    index: 0,
                    env: rule_env,
                    generator: None,
                };
                self.advance_view(id)
            }
            Task::Next => self.signal(id, Task::Next),
            Task::Redo => match &self.frames[id.0].scratch {
                Scratch::Expansion { generator: Some(generator), .. } => {
                    let generator = *generator;
                    self.resume(generator)
                }
                _ => self.advance_view(id),
            },
            Task::Back => self.advance_view(id),
        }
    }

    /// Try the remaining rules of a view frame. Rules get a child frame for
    /// their body; plain sentences in the rule theory answer directly.
    fn advance_view(&mut self, id: FrameId) -> FrameId {
        self.store.rollback(self.frames[id.0].checkpoint);
        loop {
            let next = {
                let frame = &mut self.frames[id.0];
                match &mut frame.scratch {
                    Scratch::Expansion { candidates, index, env, .. } if *index < candidates.len() => {
                        let candidate = candidates[*index].clone();
                        *index += 1;
                        Some((frame.goal.clone(), frame.env, candidate, *env))
                    }
                    _ => None,
                }
            };
            let Some((goal, env, candidate, rule_env)) = next else {
                return self.signal(id, Task::Back);
            };
            self.ctx.budget.infer();
            if let Some((head, _)) = candidate.as_rule() {
                if self.store.unify(head, rule_env, &goal, env) {
                    let child = self.push(Kind::Rule, candidate.clone(), rule_env, id);
                    self.set_view_generator(id, Some(child));
                    return child;
                }
            } else if self.store.unify(&goal, env, &candidate, rule_env) {
                self.set_view_generator(id, None);
                return self.signal(id, Task::Next);
            }
        }
    }

    fn set_view_generator(&mut self, id: FrameId, child: Option<FrameId>) {
        if let Scratch::Expansion { generator, .. } = &mut self.frames[id.0].scratch {
            *generator = child;
        }
    }

    fn goal_and_env(&self, id: FrameId) -> (Term, EnvId) {
        let frame = &self.frames[id.0];
        (frame.goal.clone(), frame.env)
    }

    fn plug(&mut self, term: &Term, env: EnvId) -> Term {
        self.store.plug(term, env, env, &mut self.names)
    }

    fn trace_event(&self, id: FrameId, event: &str) {
        let frame = &self.frames[id.0];
        let Some(relation) = traced_relation(frame) else {
            return;
        };
        if self.ctx.sources.config.is_traced(relation) {
            trace!("{}: {}", event, grind(&self.show(&frame.goal, frame.env, 0)));
        }
    }

    /// Instantiate `term` for display without touching the store.
    fn show(&self, term: &Term, env: EnvId, depth: usize) -> Term {
        if depth > MAX_TERM_DEPTH {
            return term.clone();
        }
        match self.store.resolve(term, env) {
            (Term::Compound(f, args), env) => {
                Term::Compound(*f, args.iter().map(|a| self.show(a, env, depth + 1)).collect())
            }
            (resolved, _) => resolved.clone(),
        }
    }
}

fn lookup_terms(theory: &Theory, goal: &Term, env: EnvId, store: &Store) -> Vec<Term> {
    theory
        .lookup_in(goal, env, store)
        .into_iter()
        .filter_map(|id| theory.get(id).cloned())
        .collect()
}

/// Largest `N` among variables spelled `V<N>` or `_<N>`, so renamed
/// variables in answers never collide with the query's own.
fn highest_fresh_index(terms: &[&Term]) -> u64 {
    terms
        .iter()
        .flat_map(|term| term.vars())
        .filter_map(|var| {
            let name = var.as_str();
            name.strip_prefix('V')
                .or_else(|| name.strip_prefix('_'))
                .and_then(|n| n.parse::<u64>().ok())
        })
        .max()
        .unwrap_or(0)
}
