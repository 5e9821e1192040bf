//! Error types and handling for hookring

use crate::hooks::EventKind;

/// Result type alias for ring buffer operations
pub type Result<T> = std::result::Result<T, RingError>;

/// Error taxonomy for ring buffer operations
///
/// Argument validation always runs first, so an `InvalidArgs` failure never
/// mutates the buffer. `Full` and `Empty` are likewise side-effect free.
/// `Event` is the only failure that may follow a partial copy: when a
/// transfer spans the wraparound boundary and the hook fails on the second
/// segment, the first segment's bytes stay in place and the cursor is not
/// advanced.
#[derive(Debug, thiserror::Error)]
pub enum RingError {
    /// A precondition on the arguments or on the context was violated
    #[error("Invalid argument: {parameter} - {message}")]
    InvalidArgs { parameter: String, message: String },

    /// A write asked for more slots than are currently unfilled
    #[error("Buffer full: requested {requested}, unfilled {available}")]
    Full { requested: usize, available: usize },

    /// A read asked for more elements than are currently filled
    #[error("Buffer empty: requested {requested}, filled {available}")]
    Empty { requested: usize, available: usize },

    /// A subscribed read or write hook reported failure
    #[error("{kind} hook failed")]
    Event {
        kind: EventKind,
        #[source]
        source: HookError,
    },
}

impl RingError {
    /// Create an invalid argument error
    pub fn invalid_args(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a buffer full error
    pub fn full(requested: usize, available: usize) -> Self {
        Self::Full {
            requested,
            available,
        }
    }

    /// Create a buffer empty error
    pub fn empty(requested: usize, available: usize) -> Self {
        Self::Empty {
            requested,
            available,
        }
    }

    /// Create a hook failure error
    pub fn event(kind: EventKind, source: HookError) -> Self {
        Self::Event { kind, source }
    }

    /// Stable status code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgs { .. } => ErrorCode::InvalidArgs,
            Self::Full { .. } => ErrorCode::Full,
            Self::Empty { .. } => ErrorCode::Empty,
            Self::Event { .. } => ErrorCode::Event,
        }
    }

    pub(crate) fn not_initialized() -> Self {
        Self::invalid_args("context", "ring buffer is not initialized")
    }
}

/// Status codes shared by the Rust and C surfaces
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Success, no error
    Ok = 0,
    /// At least one argument is invalid
    InvalidArgs = 1,
    /// Not enough unfilled slots for the write
    Full = 2,
    /// Not enough filled slots for the read
    Empty = 3,
    /// A hook reported failure
    Event = 4,
}

impl<T> From<&Result<T>> for ErrorCode {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => ErrorCode::Ok,
            Err(err) => err.code(),
        }
    }
}

/// Failure reported by a user hook
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error with a description
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The description given by the hook
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RingError::invalid_args("capacity", "must be at least 2");
        assert!(matches!(err, RingError::InvalidArgs { .. }));
        assert_eq!(err.code(), ErrorCode::InvalidArgs);

        let err = RingError::full(4, 2);
        assert!(matches!(
            err,
            RingError::Full {
                requested: 4,
                available: 2
            }
        ));
        assert_eq!(err.code(), ErrorCode::Full);

        let err = RingError::empty(1, 0);
        assert_eq!(err.code(), ErrorCode::Empty);

        let err = RingError::event(EventKind::Write, HookError::new("dma busy"));
        assert_eq!(err.code(), ErrorCode::Event);
    }

    #[test]
    fn test_error_display() {
        let err = RingError::invalid_args("element_size", "cannot be zero");
        let display = format!("{}", err);
        assert!(display.contains("Invalid argument"));
        assert!(display.contains("element_size"));

        let err = RingError::event(EventKind::Read, HookError::new("bus fault"));
        assert_eq!(format!("{}", err), "read hook failed");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("bus fault"));
    }

    #[test]
    fn test_code_from_result() {
        let ok: Result<()> = Ok(());
        assert_eq!(ErrorCode::from(&ok), ErrorCode::Ok);

        let err: Result<()> = Err(RingError::empty(3, 1));
        assert_eq!(ErrorCode::from(&err), ErrorCode::Empty);
        assert_eq!(ErrorCode::Empty as u32, 3);
    }
}
