//! The table of call-style builtins.
//!
//! A builtin is used as `name(In1, ..., InN, Out)`: the engine evaluates the
//! inputs, calls [`Builtin::call`] and unifies the returned value with `Out`.
//! A builtin that has no value for its inputs returns `None`, which the
//! engine treats as failure.

use crate::clock::{self, DatePart};
use crate::numeric::{number_term, numberize, quotify, strip_quotes, stringize};
use crate::text;
use epilog_ast::{cons, nil, Term};
use epilog_parser::{grind, read, read_data};
use internment::Intern;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    HasType,
    Plus,
    Minus,
    Times,
    Quotient,
    Remainder,
    Symbolize,
    NewSymbolize,
    ReadString,
    Stringify,
    ReadStringAll,
    StringifyAll,
    Matches,
    Submatches,
    StringAppend,
    StringMin,
    StringJoin,
    Timestamp,
    MakeTimestamp,
    DatePart(DatePart),
    Append,
    Reverse,
    RevAppend,
    Length,
    Listify,
    Delistify,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        if let Some(part) = DatePart::from_name(name) {
            return Some(Builtin::DatePart(part));
        }
        Some(match name {
            "hastype" => Builtin::HasType,
            "plus" => Builtin::Plus,
            "minus" => Builtin::Minus,
            "times" => Builtin::Times,
            "quotient" => Builtin::Quotient,
            "remainder" => Builtin::Remainder,
            "symbolize" => Builtin::Symbolize,
            "newsymbolize" => Builtin::NewSymbolize,
            "readstring" => Builtin::ReadString,
            "stringify" => Builtin::Stringify,
            "readstringall" => Builtin::ReadStringAll,
            "stringifyall" => Builtin::StringifyAll,
            "matches" => Builtin::Matches,
            "submatches" => Builtin::Submatches,
            "stringappend" => Builtin::StringAppend,
            "stringmin" => Builtin::StringMin,
            "stringjoin" => Builtin::StringJoin,
            "timestamp" => Builtin::Timestamp,
            "maketimestamp" => Builtin::MakeTimestamp,
            "append" => Builtin::Append,
            "reverse" => Builtin::Reverse,
            "revappend" => Builtin::RevAppend,
            "length" => Builtin::Length,
            "listify" => Builtin::Listify,
            "delistify" => Builtin::Delistify,
            _ => return None,
        })
    }

    /// Value of the builtin on already evaluated inputs.
    pub fn call(self, args: &[Term]) -> Option<Term> {
        match self {
            Builtin::HasType => {
                let x = args.first()?;
                Some(Term::sym(if x.is_compound() { "funterm" } else { "symbol" }))
            }
            Builtin::Plus => sum_of(args, 0.0, |a, b| a + b),
            Builtin::Times => sum_of(args, 1.0, |a, b| a * b),
            Builtin::Minus => fold_first(args, |a, b| a - b),
            Builtin::Quotient => fold_first(args, |a, b| a / b),
            Builtin::Remainder => fold_first(args, |a, b| a % b),
            Builtin::Symbolize => Some(symbol(&text::symbolize(&text_of(args.first()?)?))),
            Builtin::NewSymbolize => Some(symbol(&text::newsymbolize(&text_of(args.first()?)?))),
            Builtin::ReadString => {
                let source = text_of(args.first()?)?;
                Some(read(strip_quotes(&source)).unwrap_or_else(|_| Term::sym("error")))
            }
            Builtin::Stringify => Some(quotify(&grind(args.first()?))),
            Builtin::ReadStringAll => {
                let source = text_of(args.first()?)?;
                Some(Term::list(read_data(strip_quotes(&source)).unwrap_or_default()))
            }
            Builtin::StringifyAll => {
                let mut out = String::new();
                let mut list = args.first()?;
                while let Some((head, tail)) = list.as_cons() {
                    out.push_str(&grind(head));
                    out.push('\n');
                    list = tail;
                }
                Some(quotify(&out))
            }
            Builtin::Matches => {
                let (text, pattern) = (args.first()?.string_text()?, args.get(1)?.string_text()?);
                let groups = text::first_match(text, pattern)?;
                Some(Term::list(groups.iter().map(|g| quotify(g)).collect()))
            }
            Builtin::Submatches => {
                let (text, pattern) = (args.first()?.string_text()?, args.get(1)?.string_text()?);
                let found = text::all_matches(text, pattern);
                if found.is_empty() {
                    return None;
                }
                Some(Term::list(found.iter().map(|m| quotify(m)).collect()))
            }
            Builtin::StringAppend => {
                let mut out = String::new();
                for arg in args {
                    out.push_str(strip_quotes(&text_of(arg)?));
                }
                Some(quotify(&out))
            }
            Builtin::StringMin => {
                let (x, y) = (args.first()?, args.get(1)?);
                Some(if text_of(y)? < text_of(x)? { y.clone() } else { x.clone() })
            }
            Builtin::StringJoin => {
                let items = args.first()?.list_items()?;
                let parts = items
                    .iter()
                    .map(|item| text_of(item).map(|t| strip_quotes(&t).to_string()))
                    .collect::<Option<Vec<_>>>()?;
                Some(quotify(&parts.join(" ")))
            }
            Builtin::Timestamp => Some(stringize(clock::now_millis() as f64)),
            Builtin::MakeTimestamp => {
                if args.len() < 6 {
                    return None;
                }
                let n: Vec<f64> = args[..6].iter().map(numberize).collect();
                let millis = clock::make_timestamp(n[0], n[1], n[2], n[3], n[4], n[5])?;
                Some(stringize(millis as f64))
            }
            Builtin::DatePart(part) => {
                let value = part.of(numberize(args.first()?))?;
                Some(stringize(value as f64))
            }
            Builtin::Append => append(args.first()?, args.get(1)?),
            Builtin::Reverse => revappend(args.first()?, nil()),
            Builtin::RevAppend => revappend(args.first()?, args.get(1)?.clone()),
            Builtin::Length => {
                let items = args.first()?.list_items()?;
                Some(stringize(items.len() as f64))
            }
            Builtin::Listify => Some(listify(args.first()?)),
            Builtin::Delistify => delistify(args.first()?),
        }
    }
}

fn symbol(text: &str) -> Term {
    Term::Sym(Intern::new(text.to_string()))
}

/// Spelling of a symbol; compound terms have none.
fn text_of(term: &Term) -> Option<String> {
    match term {
        Term::Sym(s) => Some(s.to_string()),
        _ => None,
    }
}

fn numbers(args: &[Term]) -> Option<Vec<f64>> {
    let values: Vec<f64> = args.iter().map(numberize).collect();
    if values.iter().any(|v| v.is_nan()) {
        None
    } else {
        Some(values)
    }
}

fn sum_of(args: &[Term], unit: f64, op: fn(f64, f64) -> f64) -> Option<Term> {
    let values = numbers(args)?;
    number_term(values.into_iter().fold(unit, op))
}

fn fold_first(args: &[Term], op: fn(f64, f64) -> f64) -> Option<Term> {
    let values = numbers(args)?;
    let (first, rest) = values.split_first()?;
    number_term(rest.iter().copied().fold(*first, op))
}

fn append(front: &Term, back: &Term) -> Option<Term> {
    let items = front.list_items()?;
    Some(items.into_iter().rev().fold(back.clone(), |tail, head| cons(head, tail)))
}

fn revappend(list: &Term, acc: Term) -> Option<Term> {
    let items = list.list_items()?;
    Some(items.into_iter().fold(acc, |tail, head| cons(head, tail)))
}

/// `f(a, b)` becomes `[f, a, b]`; a symbol becomes the list of its characters.
fn listify(term: &Term) -> Term {
    match term {
        Term::Compound(f, args) => {
            let mut items = Vec::with_capacity(args.len() + 1);
            items.push(Term::Sym(*f));
            items.extend(args.iter().cloned());
            Term::list(items)
        }
        Term::Sym(s) => Term::list(s.chars().map(|c| symbol(&c.to_string())).collect()),
        Term::Var(_) => term.clone(),
    }
}

/// Inverse of [`listify`] on compound terms: `[f, a, b]` becomes `f(a, b)`.
fn delistify(list: &Term) -> Option<Term> {
    let items = list.list_items()?;
    let (head, rest) = items.split_first()?;
    let functor = head.as_symbol()?;
    Some(Term::apply(functor, rest.to_vec()))
}
