use crate::materials::MaterialId;

use super::solid::SolidId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the geometry database.
    pub struct FaceId;
}

/// Data associated with a face.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The solid this face belongs to.
    pub parent: SolidId,
    /// The material the face is currently rendered with.
    pub material: MaterialId,
}
