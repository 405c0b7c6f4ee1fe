use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing required {section} field: {field}")]
    MissingField { section: String, field: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RentCalcError {
    fn from(e: serde_json::Error) -> Self {
        RentCalcError::SerializationError(e.to_string())
    }
}
