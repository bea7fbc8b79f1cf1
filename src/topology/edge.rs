use crate::materials::MaterialId;

use super::solid::SolidId;

slotmap::new_key_type! {
    /// Unique identifier for a curve edge in the geometry database.
    pub struct EdgeId;
}

/// Data associated with a curve edge of a solid.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// The solid this edge belongs to.
    pub parent: SolidId,
    /// The material the edge is currently rendered with.
    pub material: MaterialId,
}
