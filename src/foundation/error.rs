/// Result alias used at the configuration and scenario boundary.
pub type RevealResult<T> = Result<T, RevealError>;

/// Errors surfaced while loading or validating inputs.
///
/// The per-frame runtime never produces these; degenerate runtime input is
/// absorbed as a no-op instead.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Input failed a structural or range check.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be read or applied.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error source.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RevealError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
