use chumsky::error::{Simple, SimpleReason};
use std::fmt;
use std::hash::Hash;
use std::ops::Range;

/// Where reading failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Lex,
    Parse,
}

/// Failure to read text as terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub stage: ReadStage,
    pub message: String,
    /// Character offsets into the source text
    pub span: Range<usize>,
}

impl ReadError {
    pub(crate) fn from_simple<T: fmt::Display + Hash + Eq>(stage: ReadStage, err: &Simple<T>) -> Self {
        let message = match err.reason() {
            SimpleReason::Custom(msg) => msg.clone(),
            SimpleReason::Unclosed { delimiter, .. } => format!("unclosed {}", delimiter),
            SimpleReason::Unexpected => {
                let found = match err.found() {
                    Some(tok) => format!("unexpected '{}'", tok),
                    None => "unexpected end of input".to_string(),
                };
                let mut expected: Vec<String> = err
                    .expected()
                    .map(|e| match e {
                        Some(tok) => format!("'{}'", tok),
                        None => "end of input".to_string(),
                    })
                    .collect();
                expected.sort();
                if expected.is_empty() {
                    found
                } else {
                    format!("{}, expected {}", found, expected.join(" or "))
                }
            }
        };
        ReadError {
            stage,
            message,
            span: err.span(),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for ReadError {}
