//! Printer: terms to text, with the fewest parentheses that read back to the
//! same term.

use epilog_ast::{keywords, Term};

const PRECEDENCE: [&str; 9] = ["!", "#", "~", "&", "|", "==>", ":=", ":-", "::"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ctx {
    Open,
    Close,
    Op(&'static str),
}

fn rank(ctx: Ctx) -> Option<usize> {
    match ctx {
        Ctx::Op(op) => PRECEDENCE.iter().position(|p| *p == op),
        Ctx::Open | Ctx::Close => None,
    }
}

/// Does `left` bind tighter than `right`?
fn tighter(left: Ctx, right: Ctx) -> bool {
    match (rank(left), rank(right)) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        _ => false,
    }
}

fn needs_parens(lop: Ctx, op: Ctx, rop: Ctx) -> bool {
    tighter(lop, op) || !tighter(op, rop)
}

/// Render a term in the surface syntax.
pub fn grind(term: &Term) -> String {
    let mut out = String::new();
    grind_into(term, Ctx::Open, Ctx::Close, &mut out);
    out
}

/// One term per line.
pub fn grind_lines(terms: &[Term]) -> String {
    let mut out = String::new();
    for term in terms {
        out.push_str(&grind(term));
        out.push('\n');
    }
    out
}

fn grind_into(term: &Term, lop: Ctx, rop: Ctx, out: &mut String) {
    let (functor, args) = match term {
        Term::Var(name) | Term::Sym(name) => {
            if term.is_nil() {
                out.push_str("[]");
            } else if name.starts_with('_') {
                out.push('_');
            } else {
                out.push_str(name);
            }
            return;
        }
        Term::Compound(f, args) => (*f, &args[..]),
    };

    if functor == keywords::cons() && args.len() == 2 {
        grind_cons(term, lop, rop, out);
    } else if args.len() == 1 && functor == keywords::insert() {
        grind_prefix('+', &args[0], rop, out);
    } else if args.len() == 1 && functor == keywords::delete() {
        grind_prefix('-', &args[0], rop, out);
    } else if args.len() == 1 && functor == keywords::enqueue() {
        grind_prefix('*', &args[0], rop, out);
    } else if args.len() == 1 && functor == keywords::not() {
        grind_prefix('~', &args[0], rop, out);
    } else if functor == keywords::and() {
        grind_chain(args, "&", lop, rop, out);
    } else if functor == keywords::or() {
        grind_chain(args, "|", lop, rop, out);
    } else if args.len() == 2 && functor == keywords::transition() {
        grind_binary(&args[0], "==>", &args[1], lop, rop, out);
    } else if args.len() == 2 && functor == keywords::definition() {
        grind_binary(&args[0], ":=", &args[1], lop, rop, out);
    } else if args.len() == 2 && functor == keywords::handler() {
        grind_binary(&args[0], "::", &args[1], lop, rop, out);
    } else if functor == keywords::rule() {
        grind_rule(&args[0], &args[1..], lop, rop, out);
    } else {
        grind_atom(functor.as_str(), args, out);
    }
}

fn grind_cons(term: &Term, lop: Ctx, rop: Ctx, out: &mut String) {
    if let Some(items) = term.list_items() {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            grind_into(item, Ctx::Open, Ctx::Close, out);
        }
        out.push(']');
        return;
    }
    let Some((head, tail)) = term.as_cons() else {
        return;
    };
    let op = Ctx::Op("!");
    let parens = needs_parens(lop, op, rop);
    let (lop, rop) = if parens { (Ctx::Open, Ctx::Close) } else { (lop, rop) };
    if parens {
        out.push('(');
    }
    grind_into(head, lop, op, out);
    out.push('!');
    grind_into(tail, op, rop, out);
    if parens {
        out.push(')');
    }
}

fn grind_prefix(symbol: char, operand: &Term, rop: Ctx, out: &mut String) {
    out.push(symbol);
    grind_into(operand, Ctx::Op("~"), rop, out);
}

fn grind_chain(args: &[Term], symbol: &'static str, lop: Ctx, rop: Ctx, out: &mut String) {
    match args {
        [] => out.push_str("false"),
        [only] => grind_into(only, Ctx::Open, Ctx::Close, out),
        [first, rest @ ..] => {
            let op = Ctx::Op(symbol);
            let parens = needs_parens(lop, op, rop);
            let (lop, rop) = if parens { (Ctx::Open, Ctx::Close) } else { (lop, rop) };
            if parens {
                out.push('(');
            }
            grind_into(first, lop, op, out);
            for (i, arg) in rest.iter().enumerate() {
                out.push(' ');
                out.push_str(symbol);
                out.push(' ');
                let right = if i + 1 == rest.len() { rop } else { op };
                grind_into(arg, op, right, out);
            }
            if parens {
                out.push(')');
            }
        }
    }
}

fn grind_binary(left: &Term, symbol: &'static str, right: &Term, lop: Ctx, rop: Ctx, out: &mut String) {
    let op = Ctx::Op(symbol);
    let parens = needs_parens(lop, op, rop);
    let (lop, rop) = if parens { (Ctx::Open, Ctx::Close) } else { (lop, rop) };
    if parens {
        out.push('(');
    }
    grind_into(left, lop, op, out);
    out.push(' ');
    out.push_str(symbol);
    out.push(' ');
    grind_into(right, op, rop, out);
    if parens {
        out.push(')');
    }
}

fn grind_rule(head: &Term, body: &[Term], lop: Ctx, rop: Ctx, out: &mut String) {
    let op = Ctx::Op(":-");
    let parens = needs_parens(lop, op, rop);
    let (lop, rop) = if parens { (Ctx::Open, Ctx::Close) } else { (lop, rop) };
    if parens {
        out.push('(');
    }
    grind_into(head, lop, op, out);
    out.push_str(" :- ");
    match body {
        [] => out.push_str("true"),
        [only] => grind_into(only, op, rop, out),
        [first, rest @ ..] => {
            let amp = Ctx::Op("&");
            grind_into(first, op, amp, out);
            for (i, goal) in rest.iter().enumerate() {
                out.push_str(" & ");
                let right = if i + 1 == rest.len() { rop } else { amp };
                grind_into(goal, amp, right, out);
            }
        }
    }
    if parens {
        out.push(')');
    }
}

fn grind_atom(functor: &str, args: &[Term], out: &mut String) {
    out.push_str(functor);
    out.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        grind_into(arg, Ctx::Open, Ctx::Close, out);
    }
    out.push(')');
}

#[cfg(test)]
#[path = "../tests/unit/printer_tests.rs"]
mod tests;
