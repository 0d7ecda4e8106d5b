//! Values of expressions, as used by `evaluate(Expr, Value)`

use crate::search::Context;
use epilog_ast::{keywords, Symbol, Term};
use epilog_builtins::{call_builtin, call_list_op, call_math, is_builtin, is_list_op, is_math};
use epilog_core::dedup::vniquify;
use epilog_core::{make_pattern, plug, unifier};

impl<'a> Context<'a> {
    /// Value of `expr`, or `None` when it has none.
    ///
    /// Symbols are their own value. `setofall`, `countofall`, `choose` and
    /// `if` query the sources; any other compound has its arguments
    /// evaluated and is then applied as a builtin, math function, list
    /// operator or through the `definition` sentences among the rules. A
    /// functor with no definitions at all evaluates to the term itself.
    ///
    /// `choose` is deterministic: it yields the first answer in search
    /// order rather than a random one, so repeated evaluations agree.
    pub fn value(&self, expr: &Term) -> Option<Term> {
        let (functor, args) = match expr {
            Term::Var(_) => return None,
            Term::Sym(_) => return Some(expr.clone()),
            Term::Compound(f, args) => (*f, args),
        };
        if self.budget.exhausted() {
            return None;
        }
        if functor == keywords::map() {
            let function = self.value(args.first()?)?.as_symbol()?;
            let list = self.value(args.get(1)?)?;
            let mut results = Vec::new();
            for item in list.list_items()? {
                results.push(self.apply(function, vec![item])?);
            }
            return Some(Term::list(results));
        }
        if functor == keywords::setofall() {
            return Some(Term::list(self.find_all(args.first()?, args.get(1)?)));
        }
        if functor == keywords::countofall() {
            let count = vniquify(self.collect_all(args.first()?, args.get(1)?)).len();
            return Some(Term::number(count as f64));
        }
        if functor == keywords::choose() {
            return self.find_any(args.first()?, args.get(1)?);
        }
        if functor == keywords::if_then() {
            for pair in args.chunks(2) {
                if let [condition, value] = pair {
                    if self.find_p(condition) {
                        return self.value(value);
                    }
                }
            }
            return None;
        }
        let values = args
            .iter()
            .map(|arg| self.value(arg))
            .collect::<Option<Vec<_>>>()?;
        self.apply(functor, values)
    }

    fn apply(&self, functor: Symbol, args: Vec<Term>) -> Option<Term> {
        let name = functor.as_str();
        if is_builtin(name) {
            return call_builtin(name, &args);
        }
        if is_math(name) {
            return call_math(name, &args);
        }
        if is_list_op(name) {
            return call_list_op(name, args.first()?);
        }

        let call = Term::apply(functor, args);
        let mut defined = false;
        for sentence in self.sources.rules.lookup(&make_pattern(keywords::definition(), 2)) {
            let Some((head, body)) = sentence.as_definition() else {
                continue;
            };
            if head.operator() == Some(functor) {
                defined = true;
            }
            let Some(bindings) = unifier(head, &call) else {
                continue;
            };
            self.budget.infer();
            if let Some(value) = self.value(&plug(body, &bindings)) {
                return Some(value);
            }
        }
        if defined {
            None
        } else {
            Some(call)
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/value_tests.rs"]
mod tests;
