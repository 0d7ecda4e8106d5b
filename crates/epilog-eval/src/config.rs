//! Engine configuration

use epilog_ast::Symbol;
use epilog_core::DedupPolicy;
use internment::Intern;
use std::collections::HashSet;

pub const DEFAULT_FRAME_LIMIT: usize = 100_000;
pub const DEFAULT_EXPAND_DEPTH: usize = 100;

/// Settings shared by every query an [`Engine`](crate::Engine) runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Inferences plus instantiations a single query may spend
    pub frame_limit: usize,
    /// Refuse bindings that would create cyclic terms
    pub occurs_check: bool,
    /// How `find_all` style answers are deduplicated
    pub dedup: DedupPolicy,
    /// Nesting bound for handler rewrites during updates
    pub expand_depth: usize,
    /// Relations whose goals are logged at trace level
    pub trace: HashSet<Symbol>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_limit: DEFAULT_FRAME_LIMIT,
            occurs_check: false,
            dedup: DedupPolicy::default(),
            expand_depth: DEFAULT_EXPAND_DEPTH,
            trace: HashSet::new(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_limit(mut self, frame_limit: usize) -> Self {
        self.frame_limit = frame_limit;
        self
    }

    pub fn with_occurs_check(mut self, occurs_check: bool) -> Self {
        self.occurs_check = occurs_check;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_expand_depth(mut self, expand_depth: usize) -> Self {
        self.expand_depth = expand_depth;
        self
    }

    /// Log Call/Exit/Redo/Fail events for goals on `relation`.
    pub fn with_trace(mut self, relation: &str) -> Self {
        self.trace(relation);
        self
    }

    pub fn trace(&mut self, relation: &str) {
        self.trace.insert(Intern::new(relation.to_string()));
    }

    pub fn untrace(&mut self, relation: &str) {
        self.trace.remove(&Intern::new(relation.to_string()));
    }

    pub fn untrace_all(&mut self) {
        self.trace.clear();
    }

    pub fn is_traced(&self, relation: Symbol) -> bool {
        self.trace.contains(&relation)
    }
}
