// ABOUTME: GlamError — the seven catchable/fatal error kinds

use thiserror::Error;

/// The closed set of error kinds the interpreter can raise.
///
/// Lex and parse errors are fatal at program start. The other five
/// are raised during evaluation and may be caught by `try`/`catch`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlamError {
    #[error("LexError: {message} (line {line})")]
    LexError { message: String, line: usize },

    #[error("ParseError: {message} (line {line})")]
    ParseError { message: String, line: usize },

    #[error("NameError: {message}")]
    NameError { message: String, line: Option<usize> },

    #[error("TypeError: {message}")]
    TypeError { message: String, line: Option<usize> },

    #[error("AccessError: {message}")]
    AccessError { message: String, line: Option<usize> },

    #[error("ConversionError: {message}")]
    ConversionError { message: String, line: Option<usize> },

    #[error("IndexError: {message}")]
    IndexError { message: String, line: Option<usize> },
}

impl GlamError {
    pub fn lex_error(message: impl Into<String>, line: usize) -> Self {
        GlamError::LexError {
            message: message.into(),
            line,
        }
    }

    pub fn parse_error(message: impl Into<String>, line: usize) -> Self {
        GlamError::ParseError {
            message: message.into(),
            line,
        }
    }

    pub fn name_error(message: impl Into<String>, line: Option<usize>) -> Self {
        GlamError::NameError {
            message: message.into(),
            line,
        }
    }

    pub fn type_error(message: impl Into<String>, line: Option<usize>) -> Self {
        GlamError::TypeError {
            message: message.into(),
            line,
        }
    }

    pub fn access_error(message: impl Into<String>, line: Option<usize>) -> Self {
        GlamError::AccessError {
            message: message.into(),
            line,
        }
    }

    pub fn conversion_error(message: impl Into<String>, line: Option<usize>) -> Self {
        GlamError::ConversionError {
            message: message.into(),
            line,
        }
    }

    pub fn index_error(message: impl Into<String>, line: Option<usize>) -> Self {
        GlamError::IndexError {
            message: message.into(),
            line,
        }
    }

    /// The message shown to a `catch` block, independent of kind/line.
    pub fn message(&self) -> String {
        match self {
            GlamError::LexError { message, .. }
            | GlamError::ParseError { message, .. }
            | GlamError::NameError { message, .. }
            | GlamError::TypeError { message, .. }
            | GlamError::AccessError { message, .. }
            | GlamError::ConversionError { message, .. }
            | GlamError::IndexError { message, .. } => message.clone(),
        }
    }
}
