/// Convenience result type used across Frameline.
pub type FramelineResult<T> = Result<T, FramelineError>;

/// Construction-time error taxonomy.
///
/// Every variant is raised while declaring a composition. Evaluating a frame of an
/// already-built composition never fails.
#[derive(thiserror::Error, Debug)]
pub enum FramelineError {
    /// Non-positive fps, duration, width or height on a composition declaration.
    #[error("invalid composition: {0}")]
    InvalidComposition(String),

    /// Non-positive duration, negative start frame or malformed layer on a sequence.
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// Non-positive mass, stiffness, damping ratio or fps passed to the spring.
    #[error("invalid spring config: {0}")]
    InvalidSpringConfig(String),

    /// Errors when serializing or deserializing declarations.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramelineError {
    /// Build a [`FramelineError::InvalidComposition`] value.
    pub fn invalid_composition(msg: impl Into<String>) -> Self {
        Self::InvalidComposition(msg.into())
    }

    /// Build a [`FramelineError::InvalidSequence`] value.
    pub fn invalid_sequence(msg: impl Into<String>) -> Self {
        Self::InvalidSequence(msg.into())
    }

    /// Build a [`FramelineError::InvalidSpringConfig`] value.
    pub fn invalid_spring(msg: impl Into<String>) -> Self {
        Self::InvalidSpringConfig(msg.into())
    }

    /// Build a [`FramelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FramelineError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
