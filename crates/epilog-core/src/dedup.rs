//! Answer deduplication policies
//!
//! `find_all` style operations collect answers in discovery order and then
//! remove duplicates. Small answer sets use a quadratic adjoin that keeps the
//! first occurrence of each answer; larger sets sort a permutation and restore
//! the original order afterwards. Counting only needs sorted distinct values.

use epilog_ast::Term;

/// How answer lists are deduplicated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Adjoin for lists of at most `small` items, sort-based above that.
    Adaptive { small: usize },
    /// Always the quadratic adjoin.
    Adjoin,
    /// Always the sort-based pass.
    Sorted,
    /// Keep duplicates.
    Keep,
}

impl Default for DedupPolicy {
    fn default() -> Self {
        DedupPolicy::Adaptive { small: 10 }
    }
}

impl DedupPolicy {
    /// Remove duplicates, keeping the first occurrence of each term in its
    /// original position.
    pub fn apply(&self, items: Vec<Term>) -> Vec<Term> {
        match *self {
            DedupPolicy::Adaptive { small } if items.len() <= small => uniquify(items),
            DedupPolicy::Adaptive { .. } | DedupPolicy::Sorted => wniquify(items),
            DedupPolicy::Adjoin => uniquify(items),
            DedupPolicy::Keep => items,
        }
    }
}

/// Order-preserving adjoin.
pub fn uniquify(items: Vec<Term>) -> Vec<Term> {
    let mut out: Vec<Term> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Sort-based order-preserving dedup.
pub fn wniquify(items: Vec<Term>) -> Vec<Term> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|a, b| items[*a].cmp(&items[*b]).then(a.cmp(b)));
    order.dedup_by(|later, earlier| items[*later] == items[*earlier]);
    order.sort_unstable();

    let mut slots: Vec<Option<Term>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// Sorted distinct items.
pub fn vniquify(mut items: Vec<Term>) -> Vec<Term> {
    items.sort();
    items.dedup();
    items
}

#[cfg(test)]
#[path = "../tests/unit/dedup_tests.rs"]
mod tests;
