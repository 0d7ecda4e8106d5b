//! Safety checking for Epilog rules
//!
//! A rule is safe when every variable of its head is bound by the time the
//! body has been run left to right. The body is walked once, accumulating the
//! variables known to be bound.
//!
//! # Safety Rules
//!
//! 1. An ordinary subgoal binds all of its variables
//! 2. `same`, `distinct`, `mutex` and `not` bind nothing; their arguments must
//!    already be bound
//! 3. Builtins, math functions and list operators need every argument but the
//!    last bound, and bind the last
//! 4. `setofall(T, G, R)` and `countofall(T, G, R)` need `T` bound by `G`
//!    alone (with `G` itself safe) and bind `R`
//!
//! Facts must be ground. A transition is safe when its action only uses
//! variables bound by its condition.
//!
//! # Example
//!
//! ```ignore
//! // Safe: p(X) :- q(X) & ~r(X)
//! // Unsafe: p(X) :- q(Y)
//! // Unsafe: p(X) :- ~q(X)
//! ```

use epilog_ast::{keywords, Symbol, Term};

/// Variables bound so far, in order of binding
type Bound = Vec<Symbol>;

fn bind_all(term: &Term, bound: &mut Bound) {
    for var in term.vars() {
        if !bound.contains(&var) {
            bound.push(var);
        }
    }
}

fn grounded(term: &Term, bound: &[Symbol]) -> bool {
    term.vars().iter().all(|v| bound.contains(v))
}

/// Is `datum` safe? Symbols always are.
pub fn is_safe(datum: &Term) -> bool {
    if let Some((head, body)) = datum.as_rule() {
        return safe_rule(head, body);
    }
    if let Some((condition, action)) = datum.as_transition() {
        return safe_rule(action, std::slice::from_ref(condition));
    }
    if let Some((pattern, replacement)) = datum.as_handler() {
        return grounded(replacement, &pattern.vars());
    }
    if let Some((head, value)) = datum.as_definition() {
        return grounded(value, &head.vars());
    }
    datum.is_ground()
}

fn safe_rule(head: &Term, body: &[Term]) -> bool {
    let mut bound = Bound::new();
    for goal in body {
        if !safe_goal(goal, &mut bound) {
            return false;
        }
    }
    grounded(head, &bound)
}

/// Check one subgoal, adding the variables it binds. Returns false when the
/// subgoal needs a variable that is not yet bound.
fn safe_goal(goal: &Term, bound: &mut Bound) -> bool {
    let Term::Compound(functor, args) = goal else {
        return true;
    };
    let functor = *functor;
    let name = functor.as_str();

    if functor == keywords::not()
        || functor == keywords::same()
        || functor == keywords::distinct()
        || functor == keywords::mutex()
    {
        return grounded(goal, bound);
    }
    if functor == keywords::and() {
        return args.iter().all(|g| safe_goal(g, bound));
    }
    if keywords::is_aggregate(functor) {
        let (Some(template), Some(inner), Some(result)) = (args.first(), args.get(1), args.get(2)) else {
            return false;
        };
        if !grounded(template, &inner.vars()) || !safe_goal(inner, &mut Bound::new()) {
            return false;
        }
        bind_all(result, bound);
        return true;
    }
    if name == "matches" {
        if !args.iter().take(2).all(|a| grounded(a, bound)) {
            return false;
        }
        args.iter().skip(2).for_each(|a| bind_all(a, bound));
        return true;
    }
    if functor == keywords::member() {
        let (Some(item), Some(list)) = (args.first(), args.get(1)) else {
            return false;
        };
        if !grounded(list, bound) {
            return false;
        }
        bind_all(item, bound);
        return true;
    }
    if functor == keywords::evaluate()
        || functor == keywords::map()
        || epilog_builtins::is_computed(name)
    {
        let Some((last, inputs)) = args.split_last() else {
            return true;
        };
        if !inputs.iter().all(|a| grounded(a, bound)) {
            return false;
        }
        bind_all(last, bound);
        return true;
    }
    bind_all(goal, bound);
    true
}

#[cfg(test)]
#[path = "../tests/unit/safety_tests.rs"]
mod tests;
