use form_spec::SpecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormsError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("template '{key}' is not registered")]
    MissingTemplate { key: String },
    #[error("template error in '{key}': {message}")]
    Template { key: String, message: String },
}
