use thiserror::Error;

/// Unified error type for release-pipeline operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Actionable failure surfaced verbatim to the operator
    #[error("{0}")]
    User(String),

    #[error(transparent)]
    VersionFormat(#[from] VersionFormatError),

    /// Workflow-consistency violation (corrupted work area or bad invocation)
    #[error("{0}")]
    IllegalState(String),

    #[error("{0}")]
    IllegalArgument(String),

    #[error("Not yet implemented: {0}")]
    NotImplemented(String),

    #[error("Undo is not supported by the {sequence} sequence")]
    UnsupportedUndo { sequence: String },

    #[error("Undefined variable '${{{name}}}' in template '{template}'")]
    UndefinedVariable { name: String, template: String },

    #[error("Operation index {index} out of range (history holds {len} operations)")]
    OutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-pipeline
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a user error
    pub fn user(msg: impl Into<String>) -> Self {
        ReleaseError::User(msg.into())
    }

    pub fn illegal_state(msg: impl Into<String>) -> Self {
        ReleaseError::IllegalState(msg.into())
    }

    pub fn illegal_argument(msg: impl Into<String>) -> Self {
        ReleaseError::IllegalArgument(msg.into())
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        ReleaseError::NotImplemented(msg.into())
    }

    /// Create the error raised when a state-changing sequence is asked to undo
    pub fn unsupported_undo(sequence: impl Into<String>) -> Self {
        ReleaseError::UnsupportedUndo {
            sequence: sequence.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Missing configuration is an operator mistake, so it is reported as a user error
    pub fn missing_setting(label: &str) -> Self {
        ReleaseError::User(format!("Missing configuration '{}'", label))
    }
}

/// Syntax errors raised while tokenizing or parsing a version literal.
///
/// Kept apart from [`ReleaseError`] so callers can tell bad syntax from
/// operational failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionFormatError {
    #[error("Empty version literal")]
    Empty,

    #[error("Invalid version '{literal}': incomplete snapshot separator at offset {offset}")]
    IncompleteSeparator { literal: String, offset: usize },

    #[error("Invalid version '{literal}': empty component at offset {offset}")]
    EmptyComponent { literal: String, offset: usize },

    #[error("Invalid version '{literal}': '{component}' is not a numeric component")]
    InvalidNumericComponent { literal: String, component: String },

    #[error("Invalid version '{literal}': unexpected {found}")]
    Unexpected { literal: String, found: String },
}
