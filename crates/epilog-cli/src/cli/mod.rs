pub mod check;
pub mod query;
pub mod repl;

use crate::report::print_load_error;
use crate::EngineArgs;
use epilog::{LoadError, Session};
use std::fs;
use std::path::Path;

/// Read `path` into a fresh session. Failures are reported on stderr.
pub(crate) fn load_session(args: &EngineArgs, path: &Path) -> Option<Session> {
    let name = path.display().to_string();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            let err = LoadError::Io {
                path: path.to_path_buf(),
                error,
            };
            print_load_error(&name, None, &err);
            return None;
        }
    };
    let mut session = args.session();
    match session.load_str(&text) {
        Ok(summary) => {
            log::info!("{}: {} facts, {} rules", name, summary.facts, summary.rules);
            Some(session)
        }
        Err(err) => {
            print_load_error(&name, Some(&text), &err);
            None
        }
    }
}
