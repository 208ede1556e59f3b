//! Error types for parsing and value access.

use crate::value::ValueType;
use thiserror::Error;

/// Errors raised by the parser and by type-checked access on a [`Value`](crate::Value).
///
/// Parse errors carry the byte offset at which they were detected. Access
/// errors (`InvalidType`, `IndexOutOfRange`) are local to the call that
/// raised them and never modify the tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    /// The input string was empty.
    #[error("input JSON string is empty")]
    EmptyInput,

    /// Input ended where a token (or the rest of one) was expected.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// A byte that cannot start or continue the expected token.
    #[error("invalid character {found:?} at offset {offset}")]
    InvalidCharacter { found: char, offset: usize },

    /// A number lexeme is missing a required digit.
    #[error("invalid number at offset {offset}")]
    InvalidNumber { offset: usize },

    /// An escape sequence other than `\n \t \r \" \\`.
    #[error("invalid escape '\\{found}' at offset {offset}")]
    InvalidEscape { found: char, offset: usize },

    /// A string with no closing quote. The offset is the opening quote.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// Wrong character where `,`, `:`, `]` or `}` was required.
    #[error("expected {expected} at offset {offset}, found {found:?}")]
    ExpectedDelimiter {
        expected: &'static str,
        found: char,
        offset: usize,
    },

    /// An object key position held something other than a string.
    #[error("expected string key at offset {offset}, found {found:?}")]
    ExpectedKey { found: char, offset: usize },

    /// The same key appeared twice in one object.
    #[error("duplicate key {key:?} at offset {offset}")]
    DuplicateKey { key: String, offset: usize },

    /// Array/object nesting went past the configured ceiling.
    #[error("maximum nesting depth {max} exceeded (depth {depth}) at offset {offset}")]
    MaxDepthExceeded {
        depth: usize,
        max: usize,
        offset: usize,
    },

    /// Non-whitespace input after the root value.
    #[error("trailing characters after JSON value at offset {offset}")]
    TrailingCharacters { offset: usize },

    /// An accessor, subscript or append was used against the wrong tag.
    #[error("invalid type: expected {expected}, found {found}")]
    InvalidType {
        expected: ValueType,
        found: ValueType,
    },

    /// Array index at or past the end.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl JsonError {
    /// Byte offset where a parse error was detected, `None` for access errors
    /// and for [`JsonError::EmptyInput`].
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonError::UnexpectedEnd { offset }
            | JsonError::InvalidCharacter { offset, .. }
            | JsonError::InvalidNumber { offset }
            | JsonError::InvalidEscape { offset, .. }
            | JsonError::UnterminatedString { offset }
            | JsonError::ExpectedDelimiter { offset, .. }
            | JsonError::ExpectedKey { offset, .. }
            | JsonError::DuplicateKey { offset, .. }
            | JsonError::MaxDepthExceeded { offset, .. }
            | JsonError::TrailingCharacters { offset } => Some(*offset),
            JsonError::EmptyInput
            | JsonError::InvalidType { .. }
            | JsonError::IndexOutOfRange { .. } => None,
        }
    }

    /// Whether this error came from the parser rather than from value access.
    pub fn is_parse_error(&self) -> bool {
        !matches!(
            self,
            JsonError::InvalidType { .. } | JsonError::IndexOutOfRange { .. }
        )
    }
}

/// Convenience alias used throughout tinyjson-core.
pub type Result<T> = std::result::Result<T, JsonError>;
