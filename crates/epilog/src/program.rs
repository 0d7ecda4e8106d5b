//! Facts and rules as theories
//!
//! A program is kept in two theories: facts, fully indexed, and rules,
//! indexed by head relation. Rules here means every sentence the engine
//! reads from the rule side: rules, handlers, transitions and definitions.
//! A relation that has rules is answered from the rule theory alone, so the
//! plain facts of such a relation are stored alongside its rules.

use epilog_ast::{Symbol, Term};
use epilog_core::{IndexMode, Theory};
use log::debug;

/// Is `sentence` read from the rule side?
pub fn is_rule_sentence(sentence: &Term) -> bool {
    sentence.as_rule().is_some()
        || sentence.as_handler().is_some()
        || sentence.as_transition().is_some()
        || sentence.as_definition().is_some()
}

/// Relation whose rules `sentence` adds to, if it is a rule.
fn rule_relation(sentence: &Term) -> Option<Symbol> {
    sentence.as_rule().and_then(|(head, _)| head.functor())
}

/// Split `data` into facts and rules, moving the facts of rule defined
/// relations to the rule side.
pub fn split_program(data: Vec<Term>, facts_mode: IndexMode, rules_mode: IndexMode) -> (Theory, Theory) {
    let (rules, facts): (Vec<Term>, Vec<Term>) = data.into_iter().partition(is_rule_sentence);
    let views: Vec<Symbol> = rules.iter().filter_map(rule_relation).collect();
    let (moved, facts): (Vec<Term>, Vec<Term>) = facts
        .into_iter()
        .partition(|fact| fact.functor().map_or(false, |f| views.contains(&f)));
    if !moved.is_empty() {
        debug!("{} facts of rule defined relations kept with the rules", moved.len());
    }
    let facts = Theory::from_terms(facts_mode, facts);
    let rules = Theory::from_terms(rules_mode, rules.into_iter().chain(moved));
    (facts, rules)
}

/// Add a fact, on the rule side when its relation has rules.
pub fn insert_fact(fact: Term, facts: &mut Theory, rules: &mut Theory) -> bool {
    let view = fact.functor().map_or(false, |f| is_view(f, rules));
    if view {
        rules.save(fact)
    } else {
        facts.save(fact)
    }
}

pub fn uninsert_fact(fact: &Term, facts: &mut Theory, rules: &mut Theory) -> bool {
    if facts.uninsert(fact).is_some() {
        return true;
    }
    rules.uninsert(fact).is_some()
}

/// Add a rule sentence. Facts of the relation it defines move to the rules.
pub fn insert_rule(rule: Term, facts: &mut Theory, rules: &mut Theory) -> bool {
    if let Some(relation) = rule_relation(&rule) {
        let moved: Vec<Term> = facts
            .sentences(relation)
            .into_iter()
            .filter(|fact| fact.functor() == Some(relation))
            .cloned()
            .collect();
        for fact in moved {
            facts.drop(&fact);
            rules.save(fact);
        }
    }
    rules.save(rule)
}

pub fn uninsert_rule(rule: &Term, rules: &mut Theory) -> bool {
    rules.uninsert(rule).is_some()
}

/// Replace the facts with `data`.
pub fn define_facts(data: Vec<Term>, facts: &mut Theory) {
    facts.define(data);
}

/// Replace the rules with `data`.
pub fn define_rules(data: Vec<Term>, rules: &mut Theory) {
    rules.define(data);
}

pub fn define_more_facts(data: Vec<Term>, facts: &mut Theory) {
    facts.define_more(data);
}

pub fn define_more_rules(data: Vec<Term>, rules: &mut Theory) {
    rules.define_more(data);
}

/// Does `relation` have rules?
pub fn is_view(relation: Symbol, rules: &Theory) -> bool {
    rules
        .sentences(relation)
        .into_iter()
        .any(|sentence| rule_relation(sentence) == Some(relation))
}

/// Relations with stored facts and no rules, in order of appearance.
pub fn get_bases(facts: &Theory, rules: &Theory) -> Vec<Symbol> {
    let mut bases = Vec::new();
    let stored = facts.iter().chain(rules.iter()).filter(|t| !is_rule_sentence(t));
    for relation in stored.filter_map(Term::functor) {
        if !bases.contains(&relation) && !is_view(relation, rules) {
            bases.push(relation);
        }
    }
    bases
}

/// Relations defined by rules, in order of appearance.
pub fn get_views(rules: &Theory) -> Vec<Symbol> {
    let mut views = Vec::new();
    for relation in rules.iter().filter_map(rule_relation) {
        if !views.contains(&relation) {
            views.push(relation);
        }
    }
    views
}

#[cfg(test)]
#[path = "../tests/unit/program_tests.rs"]
mod tests;
