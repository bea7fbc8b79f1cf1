//! Interactive selection and highlighting for a solid modeling editor.
//!
//! Turns ordered pick results into selection and hover changes, keeps a
//! solid and its selected faces and edges mutually exclusive, supports a
//! scoped temporary selection for previews, and snapshots the selection for
//! undo/redo. Geometry, rendering and picking themselves live elsewhere.

pub mod error;
pub mod materials;
pub mod math;
pub mod scene;
pub mod selection;
pub mod signals;
pub mod topology;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod testing;

pub use error::{Error, GeometryError, Result, SelectionError};
