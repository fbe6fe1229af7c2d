use thiserror::Error;

/// Reasons a draft is rejected before any persistence takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Submission content is empty")]
    EmptyContent,

    #[error("Drawing is not an embedded image: {0}")]
    InvalidDrawing(String),
}
