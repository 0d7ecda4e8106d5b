use epilog_parser::ReadError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to load program text into a [`Session`](crate::Session)
#[derive(Debug)]
pub enum LoadError {
    Read(ReadError),
    Io { path: PathBuf, error: io::Error },
}

impl LoadError {
    /// The reader error, when the text was readable but malformed.
    pub fn read_error(&self) -> Option<&ReadError> {
        match self {
            LoadError::Read(err) => Some(err),
            LoadError::Io { .. } => None,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read(err) => write!(f, "{}", err),
            LoadError::Io { path, error } => write!(f, "failed to read '{}': {}", path.display(), error),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Read(err) => Some(err),
            LoadError::Io { error, .. } => Some(error),
        }
    }
}

impl From<ReadError> for LoadError {
    fn from(err: ReadError) -> Self {
        LoadError::Read(err)
    }
}
