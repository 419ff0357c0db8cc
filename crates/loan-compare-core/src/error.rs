use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCompareError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("No scenarios to compare: add at least one loan scenario")]
    EmptyScenarioSet,

    #[error("Scenario index {index} out of range (book holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanCompareError {
    fn from(e: serde_json::Error) -> Self {
        LoanCompareError::SerializationError(e.to_string())
    }
}
