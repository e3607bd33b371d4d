use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read data file {path}: {source}")]
    DataIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("data file {name} was not found under {root}")]
    MissingDataFile { name: &'static str, root: PathBuf },
    #[error("{file}:{line}: {message}")]
    DataFormat {
        file: &'static str,
        line: usize,
        message: String,
    },
    #[error("unknown identifier: {token:?}")]
    ParseError { token: String },
    /// `hex` is the value as uppercase hex, at least four digits wide.
    #[error("unknown codepoint: U+{hex}")]
    UnknownCodepoint { hex: String },
    #[error("no such emoji group or subgroup: {token:?}")]
    UnknownGroup { token: String },
    #[error("invalid skin tone: {tone:?}")]
    InvalidTone { tone: String },
    #[error("no matches")]
    NoMatches,
    #[error("search: need search term")]
    NoSearchTerm,
}

impl CoreError {
    pub(crate) fn parse(token: &str) -> Self {
        CoreError::ParseError {
            token: token.to_string(),
        }
    }

    pub(crate) fn unknown_codepoint(code: u64) -> Self {
        CoreError::UnknownCodepoint {
            hex: format!("{code:04X}"),
        }
    }

    pub(crate) fn format(file: &'static str, line: usize, message: impl Into<String>) -> Self {
        CoreError::DataFormat {
            file,
            line,
            message: message.into(),
        }
    }
}
