/// Convenience result type used across avgen.
pub type AvgenResult<T> = Result<T, AvgenError>;

/// Top-level error taxonomy used by generator and converter APIs.
#[derive(thiserror::Error, Debug)]
pub enum AvgenError {
    /// Invalid or incomplete configuration, including short converter inputs.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A plane or audio buffer could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// A computed draw range fell outside the plane bounds.
    ///
    /// The frame call that reports this leaves the planes untouched.
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// The audio worker could not be started or did not exit cleanly.
    #[error("worker error: {0}")]
    Worker(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AvgenError {
    /// Build a [`AvgenError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`AvgenError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`AvgenError::Invariant`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Build a [`AvgenError::Worker`] value.
    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
