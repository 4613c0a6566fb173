use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name}:{line} {msg}")]
    Parse {
        name: String,
        line: usize,
        msg: String,
    },
    #[error("{name}:{line} position {pos} outside of genome (length {len})")]
    Bounds {
        name: String,
        line: usize,
        pos: usize,
        len: usize,
    },
    #[error("I/O error with {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid parameter: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn parse<S: Into<String>>(name: &str, line: usize, msg: S) -> Self {
        Self::Parse {
            name: name.to_owned(),
            line,
            msg: msg.into(),
        }
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
