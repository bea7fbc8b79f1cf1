use thiserror::Error;

/// Top-level error type for the selection engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Errors raised by the geometry database boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),
}

/// Errors raised by the selection layer.
///
/// Picking, toggling and removal never fail; only misuse of the temporary
/// overlay is reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("a temporary selection is already active")]
    TemporaryAlreadyActive,
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
