//! Reader: text to terms.
//!
//! Operators, tightest first: `!` (cons), `~` and the prefixes `+ - *`,
//! `&`, `|`, `==>`, `:=`, `:-`, `::`. Every infix operator is right
//! associative; `&` and `|` chains flatten into a single `and`/`or`.

use chumsky::prelude::*;
use chumsky::stream::Stream;
use epilog_ast::{cons, keywords, NameGenerator, Symbol, Term};
use internment::Intern;

use crate::error::{ReadError, ReadStage};
use crate::token::{lexer, Op, SpannedToken, Token};

type ParserError = Simple<Token>;

const ANONYMOUS: &str = "_";

fn op(op: Op) -> impl Parser<Token, Token, Error = ParserError> + Clone {
    just(Token::Op(op))
}

fn flatten(functor: Symbol, left: Term, right: Option<Term>) -> Term {
    let Some(right) = right else {
        return left;
    };
    let mut args = match left {
        Term::Compound(f, args) if f == functor => args.to_vec(),
        other => vec![other],
    };
    match right {
        Term::Compound(f, rest) if f == functor => args.extend(rest.iter().cloned()),
        other => args.push(other),
    }
    Term::Compound(functor, args.into())
}

fn binary(functor: Symbol, left: Term, right: Option<Term>) -> Term {
    match right {
        Some(right) => Term::Compound(functor, vec![left, right].into()),
        None => left,
    }
}

/// `head :- body`, spreading a conjunctive body into the rule's arguments.
fn make_rule(head: Term, body: Option<Term>) -> Term {
    match body {
        None => head,
        Some(Term::Compound(f, goals)) if f == keywords::and() => Term::rule(head, goals.to_vec()),
        Some(goal) => Term::rule(head, vec![goal]),
    }
}

fn make_prefix(op: Op, operand: Term) -> Term {
    match op {
        Op::Plus => Term::Compound(keywords::insert(), vec![operand].into()),
        Op::Star => Term::Compound(keywords::enqueue(), vec![operand].into()),
        Op::Tilde => Term::negation(operand),
        _ => match operand {
            Term::Sym(s) if epilog_ast::is_numeric_symbol(&s) => {
                let negated = match s.strip_prefix('-') {
                    Some(positive) => positive.to_string(),
                    None => format!("-{}", s.as_str()),
                };
                Term::Sym(Intern::new(negated))
            }
            other => Term::Compound(keywords::delete(), vec![other].into()),
        },
    }
}

fn expression() -> impl Parser<Token, Term, Error = ParserError> + Clone {
    let mut expr = Recursive::<Token, Term, ParserError>::declare();
    let mut cons_level = Recursive::<Token, Term, ParserError>::declare();

    let ident = select! { Token::Ident(name) => name }.labelled("identifier");

    let args = expr
        .clone()
        .separated_by(just(Token::Comma))
        .delimited_by(just(Token::LParen), just(Token::RParen));

    let atom = ident.then(args.or_not()).map(|(name, args)| match args {
        Some(args) => Term::apply(Intern::new(name), args),
        None => Term::atom(&name),
    });

    let string = select! { Token::Str(text) => Term::Sym(Intern::new(text)) };
    let anon = select! { Token::Anon(_) => Term::var(ANONYMOUS) };

    let list = expr
        .clone()
        .separated_by(just(Token::Comma))
        .delimited_by(just(Token::LBracket), just(Token::RBracket))
        .map(Term::list);

    let parens = expr
        .clone()
        .delimited_by(just(Token::LParen), just(Token::RParen));

    let primary = choice((atom, string, anon, list, parens));

    let prefix = select! {
        Token::Op(Op::Plus) => Op::Plus,
        Token::Op(Op::Minus) => Op::Minus,
        Token::Op(Op::Star) => Op::Star,
        Token::Op(Op::Tilde) => Op::Tilde,
    };

    let unary = prefix
        .then(cons_level.clone())
        .map(|(op, operand)| make_prefix(op, operand))
        .or(primary);

    cons_level.define(
        unary
            .then(op(Op::Bang).ignore_then(cons_level.clone()).or_not())
            .map(|(head, tail)| match tail {
                Some(tail) => cons(head, tail),
                None => head,
            }),
    );

    let conjunction = recursive(|conjunction| {
        cons_level
            .clone()
            .then(op(Op::Amp).ignore_then(conjunction).or_not())
            .map(|(l, r)| flatten(keywords::and(), l, r))
    });
    let disjunction = recursive(|disjunction| {
        conjunction
            .clone()
            .then(op(Op::Bar).ignore_then(disjunction).or_not())
            .map(|(l, r)| flatten(keywords::or(), l, r))
    });
    let transition = recursive(|transition| {
        disjunction
            .clone()
            .then(op(Op::Implies).ignore_then(transition).or_not())
            .map(|(l, r)| binary(keywords::transition(), l, r))
    });
    let definition = recursive(|definition| {
        transition
            .clone()
            .then(op(Op::Defines).ignore_then(definition).or_not())
            .map(|(l, r)| binary(keywords::definition(), l, r))
    });
    let rule = recursive(|rule| {
        definition
            .clone()
            .then(op(Op::If).ignore_then(rule).or_not())
            .map(|(l, r)| make_rule(l, r))
    });
    let handler = recursive(|handler| {
        rule.clone()
            .then(op(Op::Handles).ignore_then(handler).or_not())
            .map(|(l, r)| binary(keywords::handler(), l, r))
    });

    expr.define(handler);
    expr
}

fn lex(input: &str) -> Result<Vec<SpannedToken>, ReadError> {
    lexer().parse(input).map_err(|errors| {
        errors
            .first()
            .map(|e| ReadError::from_simple(ReadStage::Lex, e))
            .unwrap_or_else(|| ReadError {
                stage: ReadStage::Lex,
                message: "unreadable input".to_string(),
                span: 0..0,
            })
    })
}

fn parse_with<T>(
    parser: impl Parser<Token, T, Error = ParserError>,
    input: &str,
) -> Result<T, ReadError> {
    let tokens = lex(input)?;
    let end = input.chars().count();
    let stream = Stream::from_iter(end..end, tokens.into_iter());
    parser.parse(stream).map_err(|errors| {
        errors
            .first()
            .map(|e| ReadError::from_simple(ReadStage::Parse, e))
            .unwrap_or_else(|| ReadError {
                stage: ReadStage::Parse,
                message: "unreadable input".to_string(),
                span: end..end,
            })
    })
}

/// Give every `_` its own fresh `_<n>` name, left to right.
fn name_anonymous(term: Term, names: &mut NameGenerator) -> Term {
    match term {
        Term::Var(v) if v.as_str() == ANONYMOUS => names.fresh_anonymous(),
        Term::Compound(f, args) => Term::Compound(
            f,
            args.iter()
                .map(|a| name_anonymous(a.clone(), names))
                .collect::<Vec<_>>()
                .into(),
        ),
        other => other,
    }
}

/// Read one term. A single trailing period is allowed.
pub fn read_with(input: &str, names: &mut NameGenerator) -> Result<Term, ReadError> {
    let parser = expression()
        .then_ignore(just(Token::Period).or_not())
        .then_ignore(end());
    let term = parse_with(parser, input)?;
    Ok(name_anonymous(term, names))
}

/// Read period-separated terms.
pub fn read_data_with(input: &str, names: &mut NameGenerator) -> Result<Vec<Term>, ReadError> {
    let periods = just(Token::Period).repeated();
    let parser = periods
        .clone()
        .ignore_then(expression().then_ignore(periods).repeated())
        .then_ignore(end());
    let terms = parse_with(parser, input)?;
    Ok(terms
        .into_iter()
        .map(|t| name_anonymous(t, names))
        .collect())
}

/// Read comma-separated terms.
pub fn read_items_with(input: &str, names: &mut NameGenerator) -> Result<Vec<Term>, ReadError> {
    let parser = expression()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .then_ignore(end());
    let terms = parse_with(parser, input)?;
    Ok(terms
        .into_iter()
        .map(|t| name_anonymous(t, names))
        .collect())
}

pub fn read(input: &str) -> Result<Term, ReadError> {
    read_with(input, &mut NameGenerator::new())
}

pub fn read_data(input: &str) -> Result<Vec<Term>, ReadError> {
    read_data_with(input, &mut NameGenerator::new())
}

pub fn read_items(input: &str) -> Result<Vec<Term>, ReadError> {
    read_items_with(input, &mut NameGenerator::new())
}

/// Token stream of `input`, for callers that want to highlight source.
pub fn tokens(input: &str) -> Result<Vec<SpannedToken>, ReadError> {
    lex(input)
}

#[cfg(test)]
#[path = "../tests/unit/reader_tests.rs"]
mod tests;
