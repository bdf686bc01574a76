use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Malformed ratio '{0}': expected two positive integers as new:old (e.g. 1:2)")]
    MalformedRatio(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError(e.to_string())
    }
}
