use thiserror::Error;

/// Errors raised while building a [`Mesh`](crate::Mesh).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("face {face} references unknown vertex `{name}`")]
    InvalidMeshReference { face: usize, name: String },

    #[error("face {face} has {len} vertex reference(s), at least 2 are required")]
    DegenerateFace { face: usize, len: usize },

    #[error("vertex `{0}` is defined more than once")]
    DuplicateVertex(String),
}

/// Convenience type alias for results using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;
