use std::fmt;

use thiserror::Error;

/// A login that failed the grammar.
///
/// The rendered message is what operators see. The `reason` is kept for logs
/// and never shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Raw-path failure; echoes the normalized input.
    #[error("Error: {input} Incorrect input/Syntax error.")]
    Input { input: String, reason: Reason },

    #[error("Error: Incorrect input/Syntax error.")]
    Generic { reason: Reason },
}

impl SyntaxError {
    pub fn reason(&self) -> &Reason {
        match self {
            SyntaxError::Input { reason, .. } | SyntaxError::Generic { reason } => reason,
        }
    }

    /// One-element message list for the form boundary.
    pub fn into_messages(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

/// Why a login was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    Empty,
    Malformed,
    UnknownCity(String),
    InvalidPoint(String),
    MissingField(&'static str),
    NotNumeric(&'static str),
    OutOfRange { field: &'static str, value: u64 },
    UnknownMode(String),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Empty => write!(f, "empty login"),
            Reason::Malformed => write!(f, "does not match the login pattern"),
            Reason::UnknownCity(city) => write!(f, "unknown city {}", city),
            Reason::InvalidPoint(point) => write!(f, "invalid point {}", point),
            Reason::MissingField(field) => write!(f, "{} is missing", field),
            Reason::NotNumeric(field) => write!(f, "{} is not a number", field),
            Reason::OutOfRange { field, value } => {
                write!(f, "{} value {} is out of range", field, value)
            }
            Reason::UnknownMode(mode) => write!(f, "unknown form type {}", mode),
        }
    }
}
