//! Rendering failure type.

use thiserror::Error;

/// Fatal failure of one render call. Rendering has no partial-success mode:
/// a method either renders completely or the whole call fails with one of
/// these. The caller may skip the method and continue with others.
#[derive(Debug, Error)]
#[error("rendering error: {message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Malformed tree shape reaching the renderer.
    pub fn malformed(construct: &str, details: impl std::fmt::Display) -> Self {
        Self::new(format!("malformed {construct}: {details}"))
    }
}
