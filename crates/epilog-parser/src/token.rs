//! Lexer for the Epilog surface syntax.

use chumsky::prelude::*;
use std::fmt;
use std::ops::Range;

pub type Span = Range<usize>;
pub type SpannedToken = (Token, Span);

/// Infix and prefix operator symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Bang,
    Hash,
    Tilde,
    Amp,
    Bar,
    Plus,
    Minus,
    Star,
    Implies,
    Defines,
    If,
    Handles,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Bang => "!",
            Op::Hash => "#",
            Op::Tilde => "~",
            Op::Amp => "&",
            Op::Bar => "|",
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Implies => "==>",
            Op::Defines => ":=",
            Op::If => ":-",
            Op::Handles => "::",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Symbol or variable name, including numbers
    Ident(String),
    /// Quoted string, quotes included
    Str(String),
    /// `_` or `_name`
    Anon(String),
    Op(Op),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Period,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Str(text) => write!(f, "{}", text),
            Token::Anon(name) => write!(f, "{}", name),
            Token::Op(op) => write!(f, "{}", op.as_str()),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Period => write!(f, "."),
        }
    }
}

fn id_char(c: &char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '*' | '+' | '-' | '/' | '_')
}

fn id_start(c: &char) -> bool {
    c.is_ascii_alphanumeric() || *c == '/'
}

fn collect(first: char, rest: Vec<char>) -> String {
    let mut out = String::with_capacity(rest.len() + 1);
    out.push(first);
    out.extend(rest);
    out
}

/// A `.` belongs to an identifier only when another identifier character
/// follows it, so `3.14` and `a.b` are single tokens while `p(a).` ends with
/// a period.
fn identifier() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    let inner_dot = just('.').then_ignore(filter(id_char).rewind());
    filter(id_start)
        .then(filter(id_char).or(inner_dot).repeated())
        .map(|(first, rest)| collect(first, rest))
}

fn operator() -> impl Parser<char, Op, Error = Simple<char>> + Clone {
    choice((
        just("==>").to(Op::Implies),
        just(":=").to(Op::Defines),
        just(":-").to(Op::If),
        just("::").to(Op::Handles),
        just('!').to(Op::Bang),
        just('#').to(Op::Hash),
        just('~').to(Op::Tilde),
        just('&').to(Op::Amp),
        just('|').to(Op::Bar),
        just('+').to(Op::Plus),
        just('-').to(Op::Minus),
        just('*').to(Op::Star),
    ))
}

pub fn lexer() -> impl Parser<char, Vec<SpannedToken>, Error = Simple<char>> {
    let string = just('"')
        .ignore_then(filter(|c: &char| *c != '"').repeated().collect::<String>())
        .then_ignore(just('"'))
        .map(|body| Token::Str(format!("\"{}\"", body)))
        .labelled("string");

    let anon = just('_')
        .then(filter(id_char).repeated())
        .map(|(first, rest)| Token::Anon(collect(first, rest)));

    let punct = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('[').to(Token::LBracket),
        just(']').to(Token::RBracket),
        just(',').to(Token::Comma),
        just('.').to(Token::Period),
    ));

    let token = choice((
        operator().map(Token::Op),
        string,
        anon,
        identifier().map(Token::Ident),
        punct,
    ));

    let comment = just('%')
        .then(filter(|c: &char| *c != '\n' && *c != '\r').repeated())
        .ignored();
    let trivia = filter(|c: &char| c.is_whitespace())
        .ignored()
        .or(comment)
        .repeated();

    trivia
        .clone()
        .ignore_then(
            token
                .map_with_span(|tok, span| (tok, span))
                .then_ignore(trivia)
                .repeated(),
        )
        .then_ignore(end())
}
