// ⚠️ Error Types
// Typed errors for parsing, scoring and storage

use thiserror::Error;

/// Which receipt field format failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Currency,
    Date,
    Time,
}

impl FieldKind {
    pub fn name(&self) -> &str {
        match self {
            FieldKind::Currency => "currency",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field could not be parsed in its expected format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value {input:?}: {reason}")]
pub struct FieldError {
    pub kind: FieldKind,
    pub input: String,
    pub reason: &'static str,
}

impl FieldError {
    pub fn new(kind: FieldKind, input: &str, reason: &'static str) -> Self {
        FieldError {
            kind,
            input: input.to_string(),
            reason,
        }
    }
}

/// Failure of a whole scoring computation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The total is the only mandatory field
    #[error("invalid total value: {0}")]
    InvalidTotal(#[source] FieldError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("receipt not found: {0}")]
    NotFound(String),

    #[error("receipt id already stored: {0}")]
    DuplicateId(String),
}
