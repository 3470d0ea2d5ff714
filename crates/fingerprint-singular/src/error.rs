use fingerprint_core::InputError;

/// Errors returned by the singular point pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SingularPointError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}
