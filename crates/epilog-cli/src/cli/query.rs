use crate::report::render_read_error;
use crate::{EngineArgs, COLOR_RED, COLOR_RESET, COLOR_YELLOW};
use epilog::{grind, read, Session, Term};
use std::path::Path;

pub struct Request<'a> {
    pub file: &'a Path,
    pub query: &'a str,
    pub template: Option<&'a str>,
    /// `None` for every answer
    pub limit: Option<usize>,
}

/// Returns whether the query could be run at all.
pub fn run(args: &EngineArgs, request: &Request<'_>) -> bool {
    let Some(session) = super::load_session(args, request.file) else {
        return false;
    };
    let Some(query) = read_argument("query", request.query) else {
        return false;
    };

    let limit_reached = match request.template {
        Some(text) => {
            let Some(template) = read_argument("template", text) else {
                return false;
            };
            print_instances(&session, &template, &query, request.limit)
        }
        None => {
            let found = session.ask(&query, request.limit);
            if found.answers.is_empty() {
                let has_vars = query.vars().iter().any(|v| !v.as_str().starts_with('_'));
                println!("{}", if has_vars { "No results." } else { "false." });
            }
            for answer in &found.answers {
                println!("{}", answer);
            }
            found.limit_reached
        }
    };
    if limit_reached {
        eprintln!(
            "{}warning:{} frame limit of {} reached, answers may be missing",
            COLOR_YELLOW,
            COLOR_RESET,
            session.engine().config().frame_limit
        );
    }
    true
}

fn print_instances(session: &Session, template: &Term, query: &Term, limit: Option<usize>) -> bool {
    let mut solutions = session
        .engine()
        .solutions(template, query, session.facts(), session.rules());
    let mut printed: Vec<Term> = Vec::new();
    for answer in solutions.by_ref() {
        if printed.contains(&answer) {
            continue;
        }
        println!("{}", grind(&answer));
        printed.push(answer);
        if limit.map_or(false, |n| printed.len() >= n) {
            break;
        }
    }
    if printed.is_empty() {
        println!("No results.");
    }
    solutions.limit_reached()
}

fn read_argument(name: &str, text: &str) -> Option<Term> {
    match read(text) {
        Ok(term) => Some(term),
        Err(err) => {
            eprintln!("{}error:{} Failed to read the {}", COLOR_RED, COLOR_RESET, name);
            eprint!("{}", render_read_error(name, text, &err));
            None
        }
    }
}
