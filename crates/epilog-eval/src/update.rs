//! Updates
//!
//! An update seed is expanded into a flat list of changes and then applied:
//!
//! - `and(A, B, ...)` expands each part
//! - `transition(Condition, Action)` expands every instance of `Action` for
//!   which `Condition` holds
//! - a seed matching the pattern of a `handler(Pattern, Replacement)` in the
//!   rules is replaced by the expansion of the replacement (every matching
//!   handler contributes), at most `expand_depth` levels deep
//! - anything else, including `not(P)`, is a change in its own right
//!
//! Changes are applied deletions first: `delete(P)` and `not(P)` drop `P`,
//! then `insert(P)` and bare `P` save it. `enqueue(P)` is not applied but
//! returned as an output. `true(P, Dataset)` targets the named dataset
//! instead of the facts.

use crate::engine::Engine;
use crate::search::{Context, Overlay};
use epilog_ast::{keywords, Term};
use epilog_core::{make_pattern, matcher, plug, Theory};
use log::debug;

impl Engine {
    /// Changes `seed` stands for, deduplicated.
    pub fn expand(&self, seed: &Term, facts: &Theory, rules: &Theory) -> Vec<Term> {
        let ctx = self.context(facts, rules, None);
        self.config().dedup.apply(self.expand_at(&ctx, seed, 0))
    }

    pub fn hypo_expand(&self, seed: &Term, overlay: Overlay<'_>, facts: &Theory, rules: &Theory) -> Vec<Term> {
        let ctx = self.context(facts, rules, Some(overlay));
        self.config().dedup.apply(self.expand_at(&ctx, seed, 0))
    }

    /// Expand `seed` and apply the changes to `facts`. Returns the outputs.
    pub fn execute(&mut self, seed: &Term, facts: &mut Theory, rules: &Theory) -> Vec<Term> {
        let changes = self.expand(seed, facts, rules);
        self.apply_changes(&changes, facts)
    }

    /// Like [`Engine::execute`], with conditions read under `overlay`.
    pub fn hypo_execute(
        &mut self,
        seed: &Term,
        overlay: Overlay<'_>,
        facts: &mut Theory,
        rules: &Theory,
    ) -> Vec<Term> {
        let changes = self.hypo_expand(seed, overlay, facts, rules);
        self.apply_changes(&changes, facts)
    }

    /// Fire every `transition` among the rules once, against the same
    /// state, then apply all of their changes together.
    pub fn update(&mut self, facts: &mut Theory, rules: &Theory) -> Vec<Term> {
        let changes = self.transition_changes(facts, rules, None);
        self.apply_changes(&changes, facts)
    }

    pub fn hypo_update(&mut self, overlay: Overlay<'_>, facts: &mut Theory, rules: &Theory) -> Vec<Term> {
        let changes = self.transition_changes(facts, rules, Some(overlay));
        self.apply_changes(&changes, facts)
    }

    /// Apply every instance of `action` for which `condition` holds.
    pub fn transform(&mut self, condition: &Term, action: &Term, facts: &mut Theory, rules: &Theory) -> Vec<Term> {
        let seed = Term::transition(condition.clone(), action.clone());
        self.execute(&seed, facts, rules)
    }

    pub fn hypo_transform(
        &mut self,
        condition: &Term,
        action: &Term,
        overlay: Overlay<'_>,
        facts: &mut Theory,
        rules: &Theory,
    ) -> Vec<Term> {
        let seed = Term::transition(condition.clone(), action.clone());
        self.hypo_execute(&seed, overlay, facts, rules)
    }

    /// Apply already expanded changes. Returns the enqueued outputs.
    pub fn apply_changes(&mut self, changes: &[Term], facts: &mut Theory) -> Vec<Term> {
        let mut dropped = 0;
        for change in changes {
            let functor = change.functor();
            if change.is_compound() && (functor == Some(keywords::delete()) || functor == Some(keywords::not())) {
                if let Some(target) = change.arg(0) {
                    if self.drop_from(target, facts) {
                        dropped += 1;
                    }
                }
            }
        }

        let mut saved = 0;
        let mut outputs = Vec::new();
        for change in changes {
            let target = match change {
                Term::Var(_) => continue,
                Term::Sym(_) => change,
                Term::Compound(f, args) => {
                    if *f == keywords::delete() || *f == keywords::not() {
                        continue;
                    }
                    if *f == keywords::enqueue() {
                        outputs.extend(args.first().cloned());
                        continue;
                    }
                    if *f == keywords::insert() {
                        match args.first() {
                            Some(inner) => inner,
                            None => continue,
                        }
                    } else {
                        change
                    }
                }
            };
            if self.save_to(target, facts) {
                saved += 1;
            }
        }
        debug!(
            "applied {} changes: {} dropped, {} saved, {} outputs",
            changes.len(),
            dropped,
            saved,
            outputs.len()
        );
        outputs
    }

    fn save_to(&mut self, change: &Term, facts: &mut Theory) -> bool {
        match dataset_target(change) {
            Some((fact, name)) => self.dataset_entry(name).save(fact.clone()),
            None => facts.save(change.clone()),
        }
    }

    fn drop_from(&mut self, change: &Term, facts: &mut Theory) -> bool {
        match dataset_target(change) {
            Some((fact, name)) => self.dataset_entry(name).drop(fact).is_some(),
            None => facts.drop(change).is_some(),
        }
    }

    fn transition_changes(&self, facts: &Theory, rules: &Theory, overlay: Option<Overlay<'_>>) -> Vec<Term> {
        let ctx = self.context(facts, rules, overlay);
        let mut changes = Vec::new();
        for sentence in rules.lookup(&make_pattern(keywords::transition(), 2)) {
            if sentence.as_transition().is_some() {
                let expanded = self.expand_at(&ctx, sentence, 0);
                changes.extend(self.config().dedup.apply(expanded));
            }
        }
        changes
    }

    fn expand_at(&self, ctx: &Context<'_>, seed: &Term, depth: usize) -> Vec<Term> {
        if let Term::Compound(functor, args) = seed {
            if *functor == keywords::not() {
                return vec![seed.clone()];
            }
            if *functor == keywords::and() {
                return args
                    .iter()
                    .flat_map(|part| self.expand_at(ctx, part, depth))
                    .collect();
            }
        }
        if let Some((condition, action)) = seed.as_transition() {
            return ctx
                .find_all(action, condition)
                .iter()
                .flat_map(|change| self.expand_at(ctx, change, depth))
                .collect();
        }
        if seed.is_variable() {
            return Vec::new();
        }
        if depth > self.config().expand_depth {
            return Vec::new();
        }
        self.expand_handlers(ctx, seed, depth)
    }

    fn expand_handlers(&self, ctx: &Context<'_>, seed: &Term, depth: usize) -> Vec<Term> {
        let mut changes = Vec::new();
        let mut handled = false;
        for sentence in ctx.sources.rules.lookup(&make_pattern(keywords::handler(), 2)) {
            let Some((pattern, replacement)) = sentence.as_handler() else {
                continue;
            };
            if let Some(bindings) = matcher(pattern, seed) {
                handled = true;
                let rewritten = plug(replacement, &bindings);
                changes.extend(self.expand_at(ctx, &rewritten, depth + 1));
            }
        }
        if handled {
            changes
        } else {
            vec![seed.clone()]
        }
    }
}

/// `true(Fact, Dataset)` with a symbol for the dataset.
fn dataset_target(change: &Term) -> Option<(&Term, epilog_ast::Symbol)> {
    if change.functor() != Some(keywords::truth()) || change.arity() != 2 {
        return None;
    }
    Some((change.arg(0)?, change.arg(1)?.as_symbol()?))
}

#[cfg(test)]
#[path = "../tests/unit/update_tests.rs"]
mod tests;
