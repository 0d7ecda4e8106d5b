//! Relation dependency graph and strata
//!
//! An edge `b -> a` means some rule with head relation `a` mentions `b` in its
//! body. Strongly connected components are found with Tarjan's algorithm and
//! numbered in reverse order of completion, so relations that only feed
//! others (the sources of the graph) get the lowest strata and every relation
//! sits strictly above the components it depends on. Relations in one
//! component share a stratum.
//!
//! # Example
//!
//! ```ignore
//! // parent(a, b).
//! // ancestor(X, Y) :- parent(X, Y).
//! // ancestor(X, Z) :- parent(X, Y) & ancestor(Y, Z).
//! // parent -> 0, ancestor -> 1
//! ```

use epilog_ast::{keywords, Symbol, Term};
use log::debug;
use std::collections::HashMap;

/// Result of stratification analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stratification {
    /// Map from relation to stratum number (0 = bottom stratum)
    pub strata: HashMap<Symbol, usize>,
    /// Strongly connected components, lowest stratum first
    pub components: Vec<Vec<Symbol>>,
}

impl Stratification {
    pub fn stratum(&self, relation: Symbol) -> Option<usize> {
        self.strata.get(&relation).copied()
    }

    pub fn num_strata(&self) -> usize {
        self.components.len()
    }
}

/// Dependency graph for stratification analysis
#[derive(Debug, Clone, Default)]
struct DependencyGraph {
    /// All relations, in order of first appearance
    relations: Vec<Symbol>,
    /// Map from relation to the relations depending on it
    successors: HashMap<Symbol, Vec<Symbol>>,
}

impl DependencyGraph {
    fn add_relation(&mut self, relation: Symbol) {
        if !self.successors.contains_key(&relation) {
            self.relations.push(relation);
            self.successors.insert(relation, Vec::new());
        }
    }

    /// Add an edge `from -> to`
    fn add_dependency(&mut self, from: Symbol, to: Symbol) {
        let targets = self.successors.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }
}

fn build_dependency_graph(data: &[Term]) -> DependencyGraph {
    let mut graph = DependencyGraph::default();
    for relation in all_relations(data) {
        graph.add_relation(relation);
    }
    for datum in data {
        let Some((head, body)) = datum.as_rule() else {
            continue;
        };
        let Some(head_relation) = head.operator() else {
            continue;
        };
        for relation in all_relations(body) {
            graph.add_dependency(relation, head_relation);
        }
    }
    graph
}

/// Tarjan's strongly connected components
struct Tarjan<'a> {
    graph: &'a DependencyGraph,
    next_index: usize,
    index: HashMap<Symbol, usize>,
    low: HashMap<Symbol, usize>,
    stack: Vec<Symbol>,
    on_stack: HashMap<Symbol, bool>,
    components: Vec<Vec<Symbol>>,
}

impl<'a> Tarjan<'a> {
    fn new(graph: &'a DependencyGraph) -> Self {
        Self {
            graph,
            next_index: 0,
            index: HashMap::new(),
            low: HashMap::new(),
            stack: Vec::new(),
            on_stack: HashMap::new(),
            components: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Vec<Symbol>> {
        for &relation in &self.graph.relations {
            if !self.index.contains_key(&relation) {
                self.visit(relation);
            }
        }
        self.components
    }

    fn visit(&mut self, v: Symbol) {
        self.index.insert(v, self.next_index);
        self.low.insert(v, self.next_index);
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack.insert(v, true);

        let successors = self.graph.successors.get(&v).cloned().unwrap_or_default();
        for w in successors {
            if keywords::is_update_marker(w) || !self.graph.successors.contains_key(&w) {
                continue;
            }
            if !self.index.contains_key(&w) {
                self.visit(w);
                let low = self.low[&v].min(self.low[&w]);
                self.low.insert(v, low);
            } else if self.on_stack.get(&w).copied().unwrap_or(false) {
                let low = self.low[&v].min(self.index[&w]);
                self.low.insert(v, low);
            }
        }

        if self.low[&v] == self.index[&v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack.insert(w, false);
                component.push(w);
                if w == v {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

/// Stratify a rule set (facts may be included; only rules add edges)
pub fn stratify(data: &[Term]) -> Stratification {
    let graph = build_dependency_graph(data);
    let mut components = Tarjan::new(&graph).run();
    components.reverse();

    let mut strata = HashMap::new();
    for (stratum, component) in components.iter().enumerate() {
        for relation in component {
            strata.insert(*relation, stratum);
        }
    }
    debug!("stratified {} relations into {} strata", strata.len(), components.len());
    Stratification { strata, components }
}

/// Relations mentioned by `data`, in order of first appearance. Builtins,
/// math functions, list operators and the engine's own connectives are not
/// relations; `not`, `pos`, `neg` and aggregates are looked through.
pub fn all_relations(data: &[Term]) -> Vec<Symbol> {
    let mut out = Vec::new();
    for datum in data {
        collect_relations(datum, &mut out);
    }
    out
}

pub(crate) fn collect_relations(datum: &Term, out: &mut Vec<Symbol>) {
    let adjoin = |relation: Symbol, out: &mut Vec<Symbol>| {
        if !out.contains(&relation) {
            out.push(relation);
        }
    };
    let (functor, args) = match datum {
        Term::Var(_) => return,
        Term::Sym(s) => {
            if *s != keywords::truth() && *s != keywords::falsity() {
                adjoin(*s, out);
            }
            return;
        }
        Term::Compound(f, args) => (*f, args),
    };
    if functor == keywords::not() || keywords::is_update_marker(functor) {
        if let Some(inner) = args.first() {
            collect_relations(inner, out);
        }
    } else if functor == keywords::rule() || functor == keywords::and() || functor == keywords::or() {
        for arg in args.iter() {
            collect_relations(arg, out);
        }
    } else if keywords::is_aggregate(functor) {
        if let Some(goal) = args.get(1) {
            collect_relations(goal, out);
        }
    } else if !is_connective(functor) && !epilog_builtins::is_computed(functor.as_str()) {
        adjoin(functor, out);
    }
}

/// Goals the engine answers itself rather than from facts or rules.
pub(crate) fn is_connective(functor: Symbol) -> bool {
    [
        keywords::same(),
        keywords::distinct(),
        keywords::mutex(),
        keywords::evaluate(),
        keywords::member(),
        keywords::map(),
        keywords::truth(),
    ]
    .contains(&functor)
}

#[cfg(test)]
#[path = "../tests/unit/stratification_tests.rs"]
mod tests;
