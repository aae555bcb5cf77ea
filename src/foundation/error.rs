/// Convenience result type used across morphcast.
pub type MorphcastResult<T> = Result<T, MorphcastError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MorphcastError {
    /// Invalid inputs handed to the core (durations, segments, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed diagram serialization produced upstream.
    #[error("diagram error: {0}")]
    Diagram(String),

    /// Paint value that is not a `#RRGGBB` triplet.
    #[error("color error: {0}")]
    Color(String),

    /// The narration collaborator reported a failure.
    #[error("narration error: {0}")]
    Narration(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while rasterizing a diagram.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphcastError {
    /// Build a [`MorphcastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphcastError::Diagram`] value.
    pub fn diagram(msg: impl Into<String>) -> Self {
        Self::Diagram(msg.into())
    }

    /// Build a [`MorphcastError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`MorphcastError::Narration`] value.
    pub fn narration(msg: impl Into<String>) -> Self {
        Self::Narration(msg.into())
    }

    /// Build a [`MorphcastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`MorphcastError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for MorphcastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
