//! Reserved symbols with fixed meaning to the engine and the reader.

use crate::term::Symbol;
use internment::Intern;
use std::sync::OnceLock;

macro_rules! keywords {
    ($($name:ident => $text:literal),* $(,)?) => {
        $(
            pub fn $name() -> Symbol {
                static CELL: OnceLock<Symbol> = OnceLock::new();
                *CELL.get_or_init(|| Intern::new($text.to_string()))
            }
        )*
    };
}

keywords! {
    rule => "rule",
    handler => "handler",
    transition => "transition",
    definition => "definition",
    not => "not",
    and => "and",
    or => "or",
    same => "same",
    distinct => "distinct",
    mutex => "mutex",
    evaluate => "evaluate",
    member => "member",
    truth => "true",
    falsity => "false",
    cons => "cons",
    nil => "nil",
    map => "map",
    setofall => "setofall",
    countofall => "countofall",
    choose => "choose",
    if_then => "if",
    insert => "insert",
    delete => "delete",
    enqueue => "enqueue",
    pos => "pos",
    neg => "neg",
}

/// Wrappers whose first argument is the sentence they are about.
pub fn is_wrapper(symbol: Symbol) -> bool {
    symbol == not() || symbol == rule() || symbol == definition() || symbol == handler()
}

/// Synthetic updater markers excluded from dependency analysis.
pub fn is_update_marker(symbol: Symbol) -> bool {
    symbol == pos() || symbol == neg()
}

pub fn is_aggregate(symbol: Symbol) -> bool {
    symbol == setofall() || symbol == countofall()
}
