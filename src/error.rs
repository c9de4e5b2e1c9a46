use std::io;

use mugo_parser::{LineIndex, ParseFailure};
use thiserror::Error;

/// Why a construct could not be translated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Unsupported {
    /// A declaration, statement, expression or type outside the subset.
    #[error("unsupported {what}")]
    Construct { what: String },

    /// More names, values, results or receivers than the subset handles.
    #[error("unsupported number of {what}: {count}")]
    Arity { what: &'static str, count: usize },

    /// A type name with no translation.
    #[error("unsupported type: {name}")]
    Type { name: String },

    /// A declaration initializer that is not a direct literal.
    #[error("unsupported initializer: {what}")]
    Initializer { what: String },
}

impl Unsupported {
    pub fn construct(what: impl Into<String>) -> Self {
        Self::Construct { what: what.into() }
    }

    pub fn arity(what: &'static str, count: usize) -> Self {
        Self::Arity { what, count }
    }

    pub fn typ(name: impl Into<String>) -> Self {
        Self::Type { name: name.into() }
    }

    pub fn initializer(what: impl Into<String>) -> Self {
        Self::Initializer { what: what.into() }
    }
}

/// An unsupported construct and the 1-based line it starts on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct TranslateError {
    pub line: usize,
    pub kind: Unsupported,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse: line {line}: {message}")]
    Parse {
        line: usize,
        message: String,
        #[source]
        failure: ParseFailure,
    },

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Reports the first diagnostic of `failure` against the lines of `src`.
    pub fn parse(failure: ParseFailure, src: &str) -> Self {
        let lines = LineIndex::new(src);
        let (line, message) = match failure.diags.first() {
            Some(d) => (lines.line(d.span.start), d.message.clone()),
            None => (1, "unknown error".to_owned()),
        };
        Error::Parse {
            line,
            message,
            failure,
        }
    }

    /// The translation failure, if this is one.
    pub fn unsupported(&self) -> Option<&Unsupported> {
        match self {
            Error::Translate(e) => Some(&e.kind),
            _ => None,
        }
    }
}
