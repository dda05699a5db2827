/// Crate-wide result alias.
pub type SuperposeResult<T> = Result<T, SuperposeError>;

/// Error taxonomy for the compositing session.
///
/// `Decode` and `RemoteGeneration` are the two user-surfaced failures; both
/// leave prior session state untouched and require a new explicit action (no
/// retries). Invalid surfaces inside the render path are precondition
/// violations, not errors.
#[derive(thiserror::Error, Debug)]
pub enum SuperposeError {
    /// Malformed or unsupported encoded image bytes.
    #[error("decode error: {0}")]
    Decode(String),

    /// The composite could not be serialized to PNG.
    #[error("encode error: {0}")]
    Encode(String),

    /// Network failure, malformed remote response, or no image in response.
    #[error("remote generation error: {0}")]
    RemoteGeneration(String),

    /// An operation was invoked in a state that does not permit it.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped error from an external boundary.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SuperposeError {
    /// Build a [`SuperposeError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SuperposeError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SuperposeError::RemoteGeneration`].
    pub fn remote_generation(msg: impl Into<String>) -> Self {
        Self::RemoteGeneration(msg.into())
    }

    /// Build a [`SuperposeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
