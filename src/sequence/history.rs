use crate::error::{ReleaseError, Result};
use std::fmt;

/// Which sequence method an operation invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Execute,
    Undo,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Execute => write!(f, "execute"),
            Method::Undo => write!(f, "undo"),
        }
    }
}

/// One recorded execute or undo attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceOperation {
    pub method: Method,
    /// Name of the sequence the method was called on
    pub target: String,
    /// False when the call returned an error
    pub success: bool,
    pub state_changed: bool,
}

impl SequenceOperation {
    pub fn new(method: Method, target: impl Into<String>, success: bool, state_changed: bool) -> Self {
        SequenceOperation {
            method,
            target: target.into(),
            success,
            state_changed,
        }
    }
}

/// Append-only log of every sequence method call, in call order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionHistory {
    operations: Vec<SequenceOperation>,
}

impl ExecutionHistory {
    pub fn new() -> Self {
        ExecutionHistory::default()
    }

    pub fn record(&mut self, operation: SequenceOperation) {
        log::debug!(
            "{} {}: success={} state_changed={}",
            operation.method,
            operation.target,
            operation.success,
            operation.state_changed
        );
        self.operations.push(operation);
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The operation at `index`; an index past the end is an error, not a default
    pub fn operation(&self, index: usize) -> Result<&SequenceOperation> {
        self.operations.get(index).ok_or(ReleaseError::OutOfRange {
            index,
            len: self.operations.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceOperation> {
        self.operations.iter()
    }
}
