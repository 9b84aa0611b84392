use thiserror::Error;

/// Top-level error type for the brush geometry kernel.
#[derive(Debug, Error)]
pub enum BrushGeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the vertex/edge/side store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("{0} is still referenced and cannot be removed")]
    StillReferenced(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation produced an empty solid")]
    EmptyResult,
}

/// Convenience type alias for results using [`BrushGeoError`].
pub type Result<T> = std::result::Result<T, BrushGeoError>;
