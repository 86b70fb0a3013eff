use thiserror::Error;

/// Error types for the sweepcase-rs library.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Two sibling subtrees assigned the same parameter.
    #[error("Duplicate parameter: {name}")]
    DuplicateParameter { name: String },

    /// Children of a parallel combination generated different numbers of assignments.
    #[error("Length mismatch: child {child} generated {found} assignments, expected {expected}")]
    LengthMismatch {
        expected: usize,
        found: usize,
        child: usize,
    },

    /// A command-line sweep expression matched none of the supported forms.
    #[error("Invalid sweep expression '{raw}': {reason}")]
    InvalidSweepExpression { raw: String, reason: String },

    /// Error for invalid argument values.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The seed coordinate ran past the last row of the seed table.
    #[error(
        "Seed table exhausted: {requested} seeds from row {row}, column {column} exceed {rows} rows"
    )]
    SeedTableExhausted {
        row: usize,
        column: usize,
        requested: usize,
        rows: usize,
    },

    /// A structural sweep node could not be turned back into a sweep.
    #[error("Invalid sweep node: {0}")]
    InvalidNode(String),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SweepError {
    pub(crate) fn invalid_expression(raw: &str, reason: impl Into<String>) -> Self {
        SweepError::InvalidSweepExpression {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for sweepcase-rs operations.
pub type Result<T> = std::result::Result<T, SweepError>;
