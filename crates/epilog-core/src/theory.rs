//! Indexed theories
//!
//! A [`Theory`] is an insertion-ordered collection of terms (facts, rules,
//! handlers, definitions, transitions) with an inverted index from symbols to
//! the entries mentioning them. Entries get an [`EntryId`] when inserted, and
//! live ids ascend in insertion order.
//!
//! Removing by id keeps every other id valid; tombstones at the end of the
//! table are dropped at once, so an id may come back for a later insert.
//! Removing by term ([`Theory::uninsert`], [`Theory::drop`],
//! [`Theory::eliminate`]) compacts the table once tombstones outnumber live
//! entries, which renumbers the ids.
//!
//! # Index modes
//!
//! - [`IndexMode::Full`]: every symbol anywhere in the entry (used for facts)
//! - [`IndexMode::Rule`]: the relation of a rule's head, or the outermost
//!   functor of any other sentence (used for rules)
//! - [`IndexMode::Shallow`]: the outermost functor only
//! - [`IndexMode::None`]: no index, every lookup is a linear scan
//!
//! Numeric symbols and `map` are never index keys; a lookup keyed on one of
//! them returns the whole theory. Lookups only ever narrow the candidate set:
//! anything that could match the query is among the candidates.

use crate::store::{EnvId, Store};
use epilog_ast::{is_numeric_symbol, keywords, Symbol, Term};
use internment::Intern;
use log::trace;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    #[default]
    Full,
    Rule,
    Shallow,
    None,
}

/// Stable handle to an entry of a [`Theory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

#[derive(Debug, Clone, Default)]
pub struct Theory {
    mode: IndexMode,
    entries: Vec<Option<Term>>,
    live: usize,
    index: HashMap<Symbol, Vec<EntryId>>,
}

fn indexable(symbol: Symbol) -> bool {
    symbol != keywords::map() && !is_numeric_symbol(symbol.as_str())
}

impl Theory {
    pub fn new(mode: IndexMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Theory indexed for facts.
    pub fn facts() -> Self {
        Self::new(IndexMode::Full)
    }

    /// Theory indexed for rules.
    pub fn rules() -> Self {
        Self::new(IndexMode::Rule)
    }

    pub fn from_terms(mode: IndexMode, terms: impl IntoIterator<Item = Term>) -> Self {
        let mut theory = Self::new(mode);
        theory.define_more(terms);
        theory
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: EntryId) -> Option<&Term> {
        self.entries.get(id.0).and_then(Option::as_ref)
    }

    /// Live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.entries.iter().filter_map(Option::as_ref)
    }

    /// Live entry ids in insertion order.
    pub fn ids(&self) -> Vec<EntryId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EntryId(i))
            .collect()
    }

    pub fn to_vec(&self) -> Vec<Term> {
        self.iter().cloned().collect()
    }

    fn keys(&self, term: &Term) -> Vec<Symbol> {
        let mut keys = Vec::new();
        match self.mode {
            IndexMode::None => {}
            IndexMode::Full => {
                for symbol in term.symbols() {
                    if indexable(symbol) && !keys.contains(&symbol) {
                        keys.push(symbol);
                    }
                }
            }
            IndexMode::Rule => {
                let target = match term.as_rule() {
                    Some((head, _)) => head,
                    None => term,
                };
                if let Some(f) = target.functor().filter(|f| indexable(*f)) {
                    keys.push(f);
                }
            }
            IndexMode::Shallow => {
                if let Some(f) = term.functor().filter(|f| indexable(*f)) {
                    keys.push(f);
                }
            }
        }
        keys
    }

    /// Append `term` without any duplicate check.
    pub fn insert(&mut self, term: Term) -> EntryId {
        let id = EntryId(self.entries.len());
        for key in self.keys(&term) {
            self.index.entry(key).or_default().push(id);
        }
        trace!("insert #{} {:?}", id.0, term);
        self.entries.push(Some(term));
        self.live += 1;
        id
    }

    /// Remove the entry with this id.
    pub fn remove(&mut self, id: EntryId) -> Option<Term> {
        let term = self.entries.get_mut(id.0)?.take()?;
        for key in self.keys(&term) {
            if let Some(bucket) = self.index.get_mut(&key) {
                bucket.retain(|e| *e != id);
                if bucket.is_empty() {
                    self.index.remove(&key);
                }
            }
        }
        self.live -= 1;
        while let Some(None) = self.entries.last() {
            self.entries.pop();
        }
        trace!("remove #{} {:?}", id.0, term);
        Some(term)
    }

    fn compact(&mut self) {
        if self.entries.len() - self.live <= self.live {
            return;
        }
        trace!("compact {} slots to {}", self.entries.len(), self.live);
        let terms: Vec<Term> = self.entries.drain(..).flatten().collect();
        self.index.clear();
        self.live = 0;
        self.define_more(terms);
    }

    /// Remove the most recently inserted entry equal to `term`.
    pub fn uninsert(&mut self, term: &Term) -> Option<Term> {
        let id = self
            .lookup_ids(term)
            .into_iter()
            .rev()
            .find(|id| self.get(*id) == Some(term))?;
        let removed = self.remove(id);
        self.compact();
        removed
    }

    /// Insert `term` unless a structurally equal entry exists. Returns whether
    /// it was inserted.
    pub fn save(&mut self, term: Term) -> bool {
        if self.contains(&term) {
            return false;
        }
        self.insert(term);
        true
    }

    /// Remove the first entry structurally equal to `term`.
    pub fn drop(&mut self, term: &Term) -> Option<Term> {
        let id = self
            .lookup_ids(term)
            .into_iter()
            .find(|id| self.get(*id) == Some(term))?;
        let removed = self.remove(id);
        self.compact();
        removed
    }

    /// Remove every entry whose first argument is the symbol `object`.
    pub fn eliminate(&mut self, object: Symbol) -> usize {
        let target = Term::Sym(object);
        let candidates = self.key_ids(object);
        let mut removed = 0;
        for id in candidates {
            if self.get(id).and_then(|t| t.arg(0)) == Some(&target) {
                self.remove(id);
                removed += 1;
            }
        }
        self.compact();
        removed
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.lookup(term).into_iter().any(|t| t == term)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.live = 0;
    }

    /// Replace the contents with `terms`.
    pub fn define(&mut self, terms: impl IntoIterator<Item = Term>) {
        self.clear();
        self.define_more(terms);
    }

    pub fn define_more(&mut self, terms: impl IntoIterator<Item = Term>) {
        for term in terms {
            self.insert(term);
        }
    }

    fn key_ids(&self, key: Symbol) -> Vec<EntryId> {
        if self.mode == IndexMode::None || !indexable(key) {
            return self.ids();
        }
        self.index.get(&key).cloned().unwrap_or_default()
    }

    fn bucket_len(&self, key: Symbol) -> usize {
        if !indexable(key) {
            return self.live;
        }
        self.index.get(&key).map(Vec::len).unwrap_or(0)
    }

    /// Candidate entries for `query`, in insertion order.
    pub fn lookup_ids(&self, query: &Term) -> Vec<EntryId> {
        match self.mode {
            IndexMode::None => self.ids(),
            IndexMode::Full => match self.best_key(query) {
                Some(key) => self.key_ids(key),
                None => self.ids(),
            },
            IndexMode::Rule | IndexMode::Shallow => {
                let target = match (self.mode, query.as_rule()) {
                    (IndexMode::Rule, Some((head, _))) => head,
                    _ => query,
                };
                match target.functor() {
                    Some(f) => self.key_ids(f),
                    None => self.ids(),
                }
            }
        }
    }

    pub fn lookup(&self, query: &Term) -> Vec<&Term> {
        self.lookup_ids(query)
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Like [`Theory::lookup_ids`], reading variables of `query` through
    /// `store` in environment `env`. Only full indexes make use of the
    /// bindings; an unbound variable narrows nothing.
    pub fn lookup_in(&self, query: &Term, env: EnvId, store: &Store) -> Vec<EntryId> {
        match self.mode {
            IndexMode::Full => {
                let mut best: Option<(Symbol, usize)> = None;
                self.best_key_in(query, env, store, &mut best, 0);
                match best {
                    Some((key, _)) => self.key_ids(key),
                    None => self.ids(),
                }
            }
            _ => {
                let (resolved, _) = store.resolve(query, env);
                self.lookup_ids(resolved)
            }
        }
    }

    fn best_key(&self, query: &Term) -> Option<Symbol> {
        query
            .symbols()
            .into_iter()
            .filter(|s| indexable(*s))
            .min_by_key(|s| self.bucket_len(*s))
    }

    fn best_key_in(
        &self,
        query: &Term,
        env: EnvId,
        store: &Store,
        best: &mut Option<(Symbol, usize)>,
        depth: usize,
    ) {
        if depth > epilog_ast::MAX_TERM_DEPTH {
            return;
        }
        let (term, env) = store.resolve(query, env);
        match term {
            Term::Var(_) => {}
            Term::Sym(s) => self.consider(*s, best),
            Term::Compound(f, args) => {
                self.consider(*f, best);
                for arg in args.iter() {
                    self.best_key_in(arg, env, store, best, depth + 1);
                }
            }
        }
    }

    fn consider(&self, symbol: Symbol, best: &mut Option<(Symbol, usize)>) {
        if !indexable(symbol) {
            return;
        }
        let size = self.bucket_len(symbol);
        if best.map_or(true, |(_, n)| size < n) {
            *best = Some((symbol, size));
        }
    }

    /// Is `relation` defined by at least one entry (rule heads for a rule
    /// theory)?
    pub fn defines(&self, relation: Symbol) -> bool {
        match self.mode {
            IndexMode::Rule | IndexMode::Shallow if indexable(relation) => {
                self.index.get(&relation).map_or(false, |b| !b.is_empty())
            }
            _ => self.iter().any(|t| t.operator() == Some(relation)),
        }
    }

    /// Entries whose operator is `relation`.
    pub fn sentences(&self, relation: Symbol) -> Vec<&Term> {
        self.iter().filter(|t| t.operator() == Some(relation)).collect()
    }

    /// Distinct operators of all entries, in order of first appearance.
    pub fn relations(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        for term in self.iter() {
            if let Some(op) = term.operator() {
                if !out.contains(&op) {
                    out.push(op);
                }
            }
        }
        out
    }

    /// Arity of the first fact of `relation`, 0 when there is none.
    pub fn fact_arity(&self, relation: Symbol) -> usize {
        self.iter()
            .find(|t| t.functor() == Some(relation))
            .map(Term::arity)
            .unwrap_or(0)
    }

    /// Arity of `relation` as used by the first rule or sentence defining it.
    pub fn rule_arity(&self, relation: Symbol) -> usize {
        for term in self.iter() {
            if let Some((head, _)) = term.as_rule() {
                if head.functor() == Some(relation) {
                    return head.arity();
                }
                continue;
            }
            if term.functor() == Some(relation) {
                return term.arity();
            }
        }
        0
    }
}

/// `relation(X1, ..., Xn)`
pub fn make_pattern(relation: Symbol, arity: usize) -> Term {
    let args = (1..=arity)
        .map(|i| Term::Var(Intern::new(format!("X{}", i))))
        .collect();
    Term::apply(relation, args)
}

#[cfg(test)]
#[path = "../tests/unit/theory_tests.rs"]
mod tests;
