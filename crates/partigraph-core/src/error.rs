//! Graph error types.

use thiserror::Error;

use crate::types::ElementId;

/// Errors raised by a graph backend.
///
/// This is the only error type of the capability contract. Decorators built
/// on top of a backend pass these through untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An element with the requested id already exists
    #[error("an element with id '{id}' already exists")]
    DuplicateKey { id: ElementId },

    /// Vertex not found in graph
    #[error("vertex '{id}' not found in graph")]
    VertexNotFound { id: ElementId },

    /// Edge not found in graph
    #[error("edge '{id}' not found in graph")]
    EdgeNotFound { id: ElementId },

    /// Property key or value rejected by the backend
    #[error("invalid property '{key}': {message}")]
    InvalidProperty { key: String, message: String },

    /// The graph has been shut down
    #[error("graph has been shut down")]
    Shutdown,

    /// Backend-specific failure
    #[error("backend error: {0}")]
    Backend(String),
}

impl GraphError {
    /// Create a DuplicateKey error.
    pub fn duplicate_key(id: impl Into<ElementId>) -> Self {
        Self::DuplicateKey { id: id.into() }
    }

    /// Create a VertexNotFound error.
    pub fn vertex_not_found(id: impl Into<ElementId>) -> Self {
        Self::VertexNotFound { id: id.into() }
    }

    /// Create an EdgeNotFound error.
    pub fn edge_not_found(id: impl Into<ElementId>) -> Self {
        Self::EdgeNotFound { id: id.into() }
    }

    /// Create an InvalidProperty error.
    pub fn invalid_property(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProperty {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a Backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Whether this error reports a missing element.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::VertexNotFound { .. } | Self::EdgeNotFound { .. }
        )
    }
}
