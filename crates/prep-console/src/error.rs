use thiserror::Error;

/// Errors raised by the admin console operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("invalid metric")]
    InvalidMetric,
    #[error("invalid range")]
    InvalidRange,
    #[error("user not found")]
    UserNotFound,
    #[error("username already exists")]
    DuplicateUsername,
    #[error("email already exists")]
    DuplicateEmail,
}

/// A wire string that does not name any variant of a closed enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
