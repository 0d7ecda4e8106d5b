//! Cons-cell lists: `cons(Head, Tail)` terminated by `nil`.

use crate::keywords;
use crate::term::Term;
use std::sync::Arc;

pub fn nil() -> Term {
    Term::Sym(keywords::nil())
}

pub fn cons(head: Term, tail: Term) -> Term {
    Term::Compound(keywords::cons(), Arc::from(vec![head, tail]))
}

impl Term {
    /// Build a proper list from items.
    pub fn list(items: Vec<Term>) -> Term {
        items
            .into_iter()
            .rev()
            .fold(nil(), |tail, head| cons(head, tail))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Sym(s) if *s == keywords::nil())
    }

    /// Head and tail of a cons cell.
    pub fn as_cons(&self) -> Option<(&Term, &Term)> {
        match self {
            Term::Compound(f, args) if *f == keywords::cons() && args.len() == 2 => {
                Some((&args[0], &args[1]))
            }
            _ => None,
        }
    }

    /// Is this a `nil`-terminated chain of cons cells?
    pub fn is_list(&self) -> bool {
        let mut current = self;
        loop {
            if current.is_nil() {
                return true;
            }
            match current.as_cons() {
                Some((_, tail)) => current = tail,
                None => return false,
            }
        }
    }

    /// Elements of a proper list, or `None` if the term is not one.
    pub fn list_items(&self) -> Option<Vec<Term>> {
        let mut items = Vec::new();
        let mut current = self;
        loop {
            if current.is_nil() {
                return Some(items);
            }
            let (head, tail) = current.as_cons()?;
            items.push(head.clone());
            current = tail;
        }
    }
}
