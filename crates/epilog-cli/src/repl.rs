use epilog::program::is_rule_sentence;
use epilog::{grind, read, LoadSummary, Session, Term};

/// Kind of response produced by the REPL engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    Info,
    Output,
    Error,
}

/// Response produced after processing a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    pub kind: ResponseKind,
    pub lines: Vec<String>,
}

impl EngineResponse {
    fn info(lines: Vec<String>) -> Self {
        Self {
            kind: ResponseKind::Info,
            lines,
        }
    }

    fn output(lines: Vec<String>) -> Self {
        Self {
            kind: ResponseKind::Output,
            lines,
        }
    }

    fn error(lines: Vec<String>) -> Self {
        Self {
            kind: ResponseKind::Error,
            lines,
        }
    }

    fn error_message(message: impl Into<String>) -> Self {
        Self::error(vec![message.into()])
    }
}

pub const HELP_LINES: &[&str] = &[
    "Commands:",
    "  :help / :h   Show this help message",
    "  :quit / :q   Exit the REPL",
    "  :facts       List the stored facts",
    "  :rules       List the rules, handlers, transitions and definitions",
    "  :check       Check the program for unsafe and unstratified rules",
    "  :more        Show the next answer of the last query",
    "  ?- query     Show the first answer of a query",
    "  +fact -fact  Insert or delete a fact (any update expression works)",
    "Anything else is read as facts and rules, e.g. 'p(a).' or 'q(X) :- p(X).'",
];

/// The last query asked and how many of its answers have been shown
struct LastQuery {
    query: Term,
    shown: usize,
}

/// Line oriented front end over a [`Session`].
pub struct ReplEngine {
    session: Session,
    last: Option<LastQuery>,
}

impl Default for ReplEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplEngine {
    pub fn new() -> Self {
        Self::with_session(Session::new())
    }

    pub fn with_session(session: Session) -> Self {
        Self { session, last: None }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process a single line of input and return the resulting response.
    pub fn process_line(&mut self, input: &str) -> EngineResponse {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return EngineResponse::info(Vec::new());
        }
        match trimmed {
            ":help" | ":h" => EngineResponse::info(HELP_LINES.iter().map(|l| l.to_string()).collect()),
            ":facts" => self.list(false),
            ":rules" => self.list(true),
            ":check" => self.check(),
            ":more" => self.more(),
            _ if trimmed.starts_with("?-") => self.query(&trimmed[2..]),
            _ if trimmed.starts_with(':') => {
                EngineResponse::error_message(format!("Unknown command '{}'. Type :help for commands.", trimmed))
            }
            _ if trimmed.starts_with(['+', '-', '*']) => self.update(trimmed),
            _ => self.statements(trimmed),
        }
    }

    fn statements(&mut self, input: &str) -> EngineResponse {
        match self.session.load_str(input) {
            Ok(summary) => EngineResponse::info(vec![summary_line(summary)]),
            Err(err) => EngineResponse::error_message(format!("Read error: {}", err)),
        }
    }

    fn update(&mut self, input: &str) -> EngineResponse {
        let text = input.trim_end_matches('.');
        let seed = match read(text) {
            Ok(seed) => seed,
            Err(err) => return EngineResponse::error_message(format!("Read error: {}", err)),
        };
        let outputs = self.session.execute(&seed);
        let mut lines = vec!["Updated.".to_string()];
        lines.extend(outputs.iter().map(|o| format!("Output: {}", grind(o))));
        EngineResponse::info(lines)
    }

    fn query(&mut self, input: &str) -> EngineResponse {
        let text = input.trim().trim_end_matches('.');
        let query = match read(text) {
            Ok(query) => query,
            Err(err) => return EngineResponse::error_message(format!("Read error: {}", err)),
        };
        self.last = Some(LastQuery { query, shown: 0 });
        self.next_answer(true)
    }

    fn more(&mut self) -> EngineResponse {
        if self.last.is_none() {
            return EngineResponse::error_message("No query to continue.");
        }
        self.next_answer(false)
    }

    fn next_answer(&mut self, first: bool) -> EngineResponse {
        let Some(last) = self.last.as_mut() else {
            return EngineResponse::error_message("No query to continue.");
        };
        let found = self.session.ask(&last.query, Some(last.shown + 1));
        let mut lines = Vec::new();
        match found.answers.get(last.shown) {
            Some(answer) => {
                last.shown += 1;
                lines.push(answer.to_string());
            }
            None if first && last.query.vars().iter().all(|v| v.as_str().starts_with('_')) => {
                lines.push("false.".to_string())
            }
            None if first => lines.push("No results.".to_string()),
            None => lines.push("No more results.".to_string()),
        }
        if found.limit_reached {
            lines.push("Frame limit reached; there may be more answers.".to_string());
        }
        EngineResponse::output(lines)
    }

    fn list(&self, rules: bool) -> EngineResponse {
        let lines: Vec<String> = self
            .session
            .sentences()
            .iter()
            .filter(|s| is_rule_sentence(s) == rules)
            .map(|s| format!("{}.", grind(s)))
            .collect();
        if lines.is_empty() {
            let what = if rules { "rules" } else { "facts" };
            return EngineResponse::info(vec![format!("No {}.", what)]);
        }
        EngineResponse::output(lines)
    }

    fn check(&self) -> EngineResponse {
        let diagnostics = self.session.check();
        if diagnostics.is_empty() {
            return EngineResponse::info(vec!["No problems found.".to_string()]);
        }
        EngineResponse::error(diagnostics.iter().map(ToString::to_string).collect())
    }
}

fn summary_line(summary: LoadSummary) -> String {
    let mut parts = Vec::new();
    if summary.facts > 0 {
        parts.push(format_count("fact", summary.facts));
    }
    if summary.rules > 0 {
        parts.push(format_count("rule", summary.rules));
    }
    match parts.as_slice() {
        [] => "Nothing new.".to_string(),
        [one] => format!("Added {}.", one),
        [first, second] => format!("Added {} and {}.", first, second),
        _ => format!("Added {}.", parts.join(", ")),
    }
}

fn format_count(label: &str, count: usize) -> String {
    if count == 1 {
        format!("1 {}", label)
    } else {
        format!("{} {}s", count, label)
    }
}

#[cfg(test)]
#[path = "../tests/unit/repl_tests.rs"]
mod tests;
