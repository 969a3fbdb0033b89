//! Error types shared by every engine in the crate

use thiserror::Error;

/// Crate-wide result alias
pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Split mismatch on expense {expense_id}: splits total {actual:.2}, expense amount is {expected:.2}")]
    SplitMismatch {
        expense_id: String,
        expected: f64,
        actual: f64,
    },

    #[error("Unknown member: {0}")]
    UnknownMember(String),

    #[error("Duplicate member: {0}")]
    DuplicateMember(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Calculator schema error: {0}")]
    Schema(String),

    #[error("{field} out of range: {message}")]
    OutOfRange { field: String, message: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

impl CalcError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CalcError::InvalidInput(msg.into())
    }
}
