use super::edge::EdgeId;
use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the geometry database.
    pub struct SolidId;
}

/// Data associated with a solid.
///
/// A solid owns its faces and edges; the children point back to it through
/// their `parent` key.
#[derive(Debug, Clone, Default)]
pub struct SolidData {
    /// Faces owned by this solid.
    pub faces: Vec<FaceId>,
    /// Edges owned by this solid.
    pub edges: Vec<EdgeId>,
}
