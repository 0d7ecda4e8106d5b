//! A program loaded from text, ready for queries and updates

use crate::error::LoadError;
use crate::program::{insert_fact, insert_rule, is_rule_sentence, uninsert_fact, uninsert_rule};
use epilog_ast::{Symbol, Term};
use epilog_core::{IndexMode, Theory};
use epilog_eval::{Engine, EngineConfig};
use epilog_parser::{grind, read_data};
use epilog_safety::{find_errors, Diagnostic};
use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;

/// Bindings of the named variables of a query for one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub bindings: Vec<(Symbol, Term)>,
}

impl Answer {
    pub fn get(&self, var: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(name, _)| name.as_str() == var)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bindings.is_empty() {
            return write!(f, "true.");
        }
        let parts: Vec<String> = self
            .bindings
            .iter()
            .map(|(name, value)| format!("{} = {}", name.as_str(), grind(value)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Answers to one query
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub answers: Vec<Answer>,
    /// The query ran out of frames before running out of answers.
    pub limit_reached: bool,
}

/// Counts of what a load added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub facts: usize,
    pub rules: usize,
}

/// Facts, rules and an engine to query them with
#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    facts: Theory,
    rules: Theory,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default(), true)
    }

    /// A session with `config`. Without `indexed`, every lookup scans.
    pub fn with_config(config: EngineConfig, indexed: bool) -> Self {
        let (facts_mode, rules_mode) = if indexed {
            (IndexMode::Full, IndexMode::Rule)
        } else {
            (IndexMode::None, IndexMode::None)
        };
        Self {
            engine: Engine::with_config(config),
            facts: Theory::new(facts_mode),
            rules: Theory::new(rules_mode),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn facts(&self) -> &Theory {
        &self.facts
    }

    pub fn rules(&self) -> &Theory {
        &self.rules
    }

    /// Read period separated sentences from `text` and add them. Nothing is
    /// added when the text does not read.
    pub fn load_str(&mut self, text: &str) -> Result<LoadSummary, LoadError> {
        let data = read_data(text)?;
        let mut summary = LoadSummary::default();
        for sentence in data {
            if is_rule_sentence(&sentence) {
                if self.add_rule(sentence) {
                    summary.rules += 1;
                }
            } else if self.add_fact(sentence) {
                summary.facts += 1;
            }
        }
        debug!("loaded {} facts and {} rules", summary.facts, summary.rules);
        Ok(summary)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<LoadSummary, LoadError> {
        let text = fs::read_to_string(path).map_err(|error| LoadError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        self.load_str(&text)
    }

    /// Add a fact unless it is already stored.
    pub fn add_fact(&mut self, fact: Term) -> bool {
        insert_fact(fact, &mut self.facts, &mut self.rules)
    }

    pub fn remove_fact(&mut self, fact: &Term) -> bool {
        uninsert_fact(fact, &mut self.facts, &mut self.rules)
    }

    pub fn add_rule(&mut self, rule: Term) -> bool {
        insert_rule(rule, &mut self.facts, &mut self.rules)
    }

    pub fn remove_rule(&mut self, rule: &Term) -> bool {
        uninsert_rule(rule, &mut self.rules)
    }

    /// Every stored sentence, facts first.
    pub fn sentences(&self) -> Vec<Term> {
        self.facts.iter().chain(self.rules.iter()).cloned().collect()
    }

    /// Static checks over the whole program.
    pub fn check(&self) -> Vec<Diagnostic> {
        find_errors(&self.sentences())
    }

    pub fn find_any(&self, template: &Term, query: &Term) -> Option<Term> {
        self.engine.find_any(template, query, &self.facts, &self.rules)
    }

    pub fn find_all(&self, template: &Term, query: &Term) -> Vec<Term> {
        self.engine.find_all(template, query, &self.facts, &self.rules)
    }

    pub fn find_p(&self, query: &Term) -> bool {
        self.engine.find_p(query, &self.facts, &self.rules)
    }

    /// Bindings of the named variables of `query`, for at most `limit`
    /// distinct answers (all of them when `limit` is `None`).
    pub fn ask(&self, query: &Term, limit: Option<usize>) -> Answers {
        let vars: Vec<Symbol> = query
            .vars()
            .into_iter()
            .filter(|var| !var.as_str().starts_with('_'))
            .collect();
        let template = Term::list(vars.iter().map(|var| Term::Var(*var)).collect());

        let mut solutions = self.engine.solutions(&template, query, &self.facts, &self.rules);
        let mut found: Vec<Term> = Vec::new();
        for answer in solutions.by_ref() {
            if !found.contains(&answer) {
                found.push(answer);
            }
            if limit.map_or(false, |n| found.len() >= n) {
                break;
            }
        }
        let limit_reached = solutions.limit_reached();

        let answers = found
            .into_iter()
            .map(|values| Answer {
                bindings: vars
                    .iter()
                    .copied()
                    .zip(values.list_items().unwrap_or_default())
                    .collect(),
            })
            .collect();
        Answers { answers, limit_reached }
    }

    /// Apply an update seed. Returns the enqueued outputs.
    pub fn execute(&mut self, seed: &Term) -> Vec<Term> {
        self.engine.execute(seed, &mut self.facts, &self.rules)
    }

    /// Fire the transitions among the rules.
    pub fn update(&mut self) -> Vec<Term> {
        self.engine.update(&mut self.facts, &self.rules)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session_tests.rs"]
mod tests;
