//! Query entry points
//!
//! An [`Engine`] holds the configuration and the named datasets that
//! `true(Goal, Dataset)` consults. Facts and rules are passed to every call,
//! so one engine can answer queries over any number of theories.
//!
//! # Example
//!
//! ```ignore
//! let facts = Theory::from_terms(IndexMode::Full, read_data("parent(a,b). parent(b,c).")?);
//! let rules = Theory::from_terms(
//!     IndexMode::Rule,
//!     read_data("grandparent(X,Z) :- parent(X,Y) & parent(Y,Z)")?,
//! );
//! let engine = Engine::new();
//! let answers = engine.find_all(&read("g(X,Z)")?, &read("grandparent(X,Z)")?, &facts, &rules);
//! // [g(a,c)]
//! ```

use crate::config::EngineConfig;
use crate::search::{Context, Overlay, Search, Sources};
use epilog_ast::{Symbol, Term};
use epilog_core::{EntryId, Theory};
use internment::Intern;
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    datasets: HashMap<Symbol, Theory>,
}

/// Answers of a query, produced on demand
///
/// The search state is kept between answers, so pulling answer `n + 1`
/// continues from answer `n`. The iterator ends when the answers run out or
/// the frame limit is reached; [`Solutions::limit_reached`] tells the two
/// apart.
pub struct Solutions<'a> {
    search: Search<'a>,
}

impl<'a> Solutions<'a> {
    pub fn limit_reached(&self) -> bool {
        self.search.limit_reached()
    }

    pub fn inferences(&self) -> usize {
        self.search.budget().inferences()
    }

    pub fn instantiations(&self) -> usize {
        self.search.budget().instantiations()
    }

    /// Bindings currently recorded on the search's trail.
    pub fn trail_len(&self) -> usize {
        self.search.trail_len()
    }
}

impl<'a> Iterator for Solutions<'a> {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        self.search.next_answer()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            datasets: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Register `data` under `name`, replacing any dataset of that name.
    pub fn add_dataset(&mut self, name: &str, data: Theory) {
        debug!("dataset {} with {} facts", name, data.len());
        self.datasets.insert(Intern::new(name.to_string()), data);
    }

    pub fn dataset(&self, name: &str) -> Option<&Theory> {
        self.datasets.get(&Intern::new(name.to_string()))
    }

    pub fn remove_dataset(&mut self, name: &str) -> Option<Theory> {
        self.datasets.remove(&Intern::new(name.to_string()))
    }

    pub(crate) fn dataset_entry(&mut self, name: Symbol) -> &mut Theory {
        self.datasets.entry(name).or_insert_with(Theory::facts)
    }

    pub(crate) fn context<'a>(
        &'a self,
        facts: &'a Theory,
        rules: &'a Theory,
        overlay: Option<Overlay<'a>>,
    ) -> Context<'a> {
        Context::new(Sources {
            facts,
            rules,
            overlay,
            datasets: &self.datasets,
            config: &self.config,
        })
    }

    /// Lazily enumerate instances of `template` for which `query` holds.
    pub fn solutions<'a>(
        &'a self,
        template: &Term,
        query: &Term,
        facts: &'a Theory,
        rules: &'a Theory,
    ) -> Solutions<'a> {
        Solutions {
            search: self.context(facts, rules, None).search(template, query),
        }
    }

    /// First answer, if any.
    pub fn find_any(&self, template: &Term, query: &Term, facts: &Theory, rules: &Theory) -> Option<Term> {
        self.solutions(template, query, facts, rules).next()
    }

    /// All answers, deduplicated with the configured policy.
    pub fn find_all(&self, template: &Term, query: &Term, facts: &Theory, rules: &Theory) -> Vec<Term> {
        let answers = self.solutions(template, query, facts, rules).collect();
        self.config.dedup.apply(answers)
    }

    /// At most `n` answers, in the order found.
    pub fn find_n(&self, n: usize, template: &Term, query: &Term, facts: &Theory, rules: &Theory) -> Vec<Term> {
        self.solutions(template, query, facts, rules).take(n).collect()
    }

    pub fn find_p(&self, query: &Term, facts: &Theory, rules: &Theory) -> bool {
        self.context(facts, rules, None).find_p(query)
    }

    /// Answers as if `overlay.adds` were added to the facts and
    /// `overlay.dels` removed from them.
    pub fn hypo_solutions<'a>(
        &'a self,
        template: &Term,
        query: &Term,
        overlay: Overlay<'a>,
        facts: &'a Theory,
        rules: &'a Theory,
    ) -> Solutions<'a> {
        Solutions {
            search: self.context(facts, rules, Some(overlay)).search(template, query),
        }
    }

    pub fn hypo_find_any(
        &self,
        template: &Term,
        query: &Term,
        overlay: Overlay<'_>,
        facts: &Theory,
        rules: &Theory,
    ) -> Option<Term> {
        self.hypo_solutions(template, query, overlay, facts, rules).next()
    }

    pub fn hypo_find_all(
        &self,
        template: &Term,
        query: &Term,
        overlay: Overlay<'_>,
        facts: &Theory,
        rules: &Theory,
    ) -> Vec<Term> {
        let answers = self.hypo_solutions(template, query, overlay, facts, rules).collect();
        self.config.dedup.apply(answers)
    }

    pub fn hypo_find_n(
        &self,
        n: usize,
        template: &Term,
        query: &Term,
        overlay: Overlay<'_>,
        facts: &Theory,
        rules: &Theory,
    ) -> Vec<Term> {
        self.hypo_solutions(template, query, overlay, facts, rules)
            .take(n)
            .collect()
    }

    pub fn hypo_find_p(&self, query: &Term, overlay: Overlay<'_>, facts: &Theory, rules: &Theory) -> bool {
        self.context(facts, rules, Some(overlay)).find_p(query)
    }

    /// Value of `expr`; see `evaluate(Expr, Value)`.
    pub fn value(&self, expr: &Term, facts: &Theory, rules: &Theory) -> Option<Term> {
        self.context(facts, rules, None).value(expr)
    }

    pub fn hypo_value(&self, expr: &Term, overlay: Overlay<'_>, facts: &Theory, rules: &Theory) -> Option<Term> {
        self.context(facts, rules, Some(overlay)).value(expr)
    }

    /// Run `query` with `temp_rules` added to `rules` for its duration.
    pub fn temp_find_all(
        &self,
        template: &Term,
        query: &Term,
        temp_rules: &[Term],
        facts: &Theory,
        rules: &mut Theory,
    ) -> Vec<Term> {
        let added = insert_all(rules, temp_rules);
        let answers = self.find_all(template, query, facts, rules);
        remove_all(rules, added);
        answers
    }

    pub fn temp_find_any(
        &self,
        template: &Term,
        query: &Term,
        temp_rules: &[Term],
        facts: &Theory,
        rules: &mut Theory,
    ) -> Option<Term> {
        let added = insert_all(rules, temp_rules);
        let answer = self.find_any(template, query, facts, rules);
        remove_all(rules, added);
        answer
    }

    pub fn temp_find_p(&self, query: &Term, temp_rules: &[Term], facts: &Theory, rules: &mut Theory) -> bool {
        let added = insert_all(rules, temp_rules);
        let found = self.find_p(query, facts, rules);
        remove_all(rules, added);
        found
    }
}

fn insert_all(rules: &mut Theory, temp_rules: &[Term]) -> Vec<EntryId> {
    temp_rules.iter().map(|rule| rules.insert(rule.clone())).collect()
}

fn remove_all(rules: &mut Theory, added: Vec<EntryId>) {
    for id in added {
        rules.remove(id);
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine_tests.rs"]
mod tests;
