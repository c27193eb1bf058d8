use crate::ast::Op;
use std::fmt;

/// The type of error that can occur when parsing a pattern or generating a string.
#[derive(Debug, PartialEq)]
pub struct Error(pub(crate) ErrorRepr);

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match &self.0 {
            ErrorRepr::Parse(_) => ErrorKind::Parse,
            ErrorRepr::Unsupported(_) => ErrorKind::UnsupportedConstruct,
            ErrorRepr::Entropy(_) => ErrorKind::EntropyUnavailable,
        }
    }

    pub(crate) fn entropy(e: impl fmt::Display) -> Self {
        Self(ErrorRepr::Entropy(e.to_string()))
    }
}

/// Broad categories of [`Error`], for callers that pick a policy per failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The pattern text is not a valid regular expression.
    Parse,
    /// Generation reached an assertion it cannot satisfy, e.g. `\b`.
    UnsupportedConstruct,
    /// The randomness source failed to produce a value.
    EntropyUnavailable,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            ErrorRepr::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum ErrorRepr {
    Parse(regex_syntax::Error),
    Unsupported(Op),
    Entropy(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorRepr::Parse(e) => e.fmt(f),
            ErrorRepr::Unsupported(op) => write!(f, "Unsupported construct: {}", op.as_str()),
            ErrorRepr::Entropy(e) => write!(f, "Entropy unavailable: {}", e),
        }
    }
}

impl From<regex_syntax::Error> for Error {
    fn from(e: regex_syntax::Error) -> Self {
        Self(ErrorRepr::Parse(e))
    }
}
