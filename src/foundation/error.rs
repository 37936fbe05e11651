/// Crate-wide result alias.
pub type EaselResult<T> = Result<T, EaselError>;

/// Error type for all editor-core operations.
///
/// None of these are fatal to the process; each failure is scoped to the
/// operation that produced it and reported to the caller for display.
#[derive(thiserror::Error, Debug)]
pub enum EaselError {
    /// Malformed input data or request parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mutation targeted a layer id that is not in the store.
    #[error("layer not found: {0}")]
    LayerNotFound(String),

    /// Network or collaborator failure during submit, poll or save.
    #[error("transport error: {0}")]
    Transport(String),

    /// The generation backend reported the job as failed.
    #[error("generation failed: {0}")]
    JobFailed(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, preserved with its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EaselError {
    /// Build a [`EaselError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EaselError::LayerNotFound`].
    pub fn layer_not_found(id: impl Into<String>) -> Self {
        Self::LayerNotFound(id.into())
    }

    /// Build a [`EaselError::Transport`].
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`EaselError::JobFailed`].
    pub fn job_failed(msg: impl Into<String>) -> Self {
        Self::JobFailed(msg.into())
    }

    /// Build a [`EaselError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
