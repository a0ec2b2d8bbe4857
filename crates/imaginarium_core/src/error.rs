//! Application error taxonomy.
//!
//! # Responsibility
//! - Define the typed failures the core hands to its callers.
//! - Keep low-level causes attached for logging without exposing them
//!   through `Display`.
//!
//! # Invariants
//! - `AppError` display text is always safe to show to an end user.
//! - `AppError::Internal` never carries the text of the failure it replaced.
//! - `IoFailure` display text never contains a path or an OS message.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub type AppResult<T> = Result<T, AppError>;

/// Input validation failure raised by the sanitizer and item constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No input was provided at all (for example end of input on a prompt).
    NullInput,
    /// Nothing was left once control and disallowed characters were removed.
    EmptyAfterSanitize,
    /// Cleaned input is longer than the caller's limit.
    TooLong { max_len: usize, actual_len: usize },
    /// Item id is empty after trimming.
    MissingId,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullInput => write!(f, "input is required"),
            Self::EmptyAfterSanitize => write!(f, "input cannot be empty"),
            Self::TooLong { max_len, .. } => write!(f, "input too long (max {max_len})"),
            Self::MissingId => write!(f, "item id cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Direction of a failed backing-resource access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Read,
    Write,
}

impl IoOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// Generic I/O failure reported by a `TextResource`.
///
/// The resource location and the OS error are kept for diagnostics only.
#[derive(Debug)]
pub struct IoFailure {
    operation: IoOperation,
    location: String,
    source: io::Error,
}

impl IoFailure {
    pub fn new(operation: IoOperation, location: impl Into<String>, source: io::Error) -> Self {
        Self {
            operation,
            location: location.into(),
            source,
        }
    }

    pub fn operation(&self) -> IoOperation {
        self.operation
    }

    /// Resource location, for server-side logs only.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Display for IoFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.operation {
            IoOperation::Read => write!(f, "failed to read catalog file"),
            IoOperation::Write => write!(f, "failed to write catalog file"),
        }
    }
}

impl Error for IoFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Application-level failure: the only error kind that crosses the core
/// boundary.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    NotFound(String),
    Io(IoFailure),
    /// Replacement for an unexpected failure; holds only the safe message.
    Internal(String),
}

impl AppError {
    /// Stable short code used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Io(failure) => match failure.operation() {
                IoOperation::Read => "read_failure",
                IoOperation::Write => "write_failure",
            },
            Self::Internal(_) => "internal",
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item with id `{id}` not found"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::NotFound(_) | Self::Internal(_) => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<IoFailure> for AppError {
    fn from(value: IoFailure) -> Self {
        Self::Io(value)
    }
}

/// Renders an error and its full source chain as one line.
///
/// Meant for server-side logs; never show the result to an end user.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::{error_chain, AppError, IoFailure, IoOperation, ValidationError};
    use std::io;

    #[test]
    fn io_failure_display_hides_location_and_cause() {
        let failure = IoFailure::new(
            IoOperation::Write,
            "/srv/secret/items.csv",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied (os error 13)"),
        );
        let rendered = AppError::from(failure).to_string();
        assert_eq!(rendered, "failed to write catalog file");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn error_chain_includes_sources() {
        let failure = IoFailure::new(
            IoOperation::Read,
            "items.csv",
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        let err = AppError::from(failure);
        let chain = error_chain(&err);
        assert!(chain.starts_with("failed to read catalog file: "));
        assert!(chain.contains("valid UTF-8"));
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(AppError::NotFound("x".to_string()).kind(), "not_found");
        assert_eq!(
            AppError::from(ValidationError::NullInput).kind(),
            "validation"
        );
        assert_eq!(AppError::Internal("safe".to_string()).kind(), "internal");
    }

    #[test]
    fn too_long_message_names_the_limit() {
        let err = ValidationError::TooLong {
            max_len: 10,
            actual_len: 12,
        };
        assert_eq!(err.to_string(), "input too long (max 10)");
    }
}
