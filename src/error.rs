use thiserror::Error;

/// Top-level error type for the earmesh crate.
#[derive(Debug, Error)]
pub enum EarmeshError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Pre-condition violations rejected before entering the triangulation core.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("ring {ring} has {count} points, at least 3 are required")]
    TooFewPoints { ring: usize, count: usize },

    #[error("ring {ring} has a non-finite coordinate at point {index}")]
    NonFinite { ring: usize, index: usize },

    #[error("invalid triangle list: {0}")]
    InvalidTriangles(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised by measurements on degenerate geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to reading polygon sources.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read polygon source: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse polygon JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed polygon source: {0}")]
    Malformed(String),
}

/// Convenience type alias for results using [`EarmeshError`].
pub type Result<T> = std::result::Result<T, EarmeshError>;
