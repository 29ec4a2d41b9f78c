use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate element name '{name}'")]
    DuplicateName { name: String },
    #[error("invalid name format '{format}' for language '{language}': {reason}")]
    InvalidNameFormat {
        language: String,
        format: String,
        reason: String,
    },
}
