pub mod curve;
pub mod edge;
pub mod face;
pub mod solid;

pub use curve::{CurveData, CurveId, SegmentData, SegmentId};
pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use solid::{SolidData, SolidId};

use std::rc::Rc;

use slotmap::SlotMap;

use crate::error::GeometryError;
use crate::materials::{MaterialDatabase, MaterialId};
use crate::math::Point3;
use crate::selection::{PickHit, PickTarget};
use crate::signals::EditorSignals;

/// A sub-part of a solid: one of its faces or curve edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyItem {
    Face(FaceId),
    Edge(EdgeId),
}

/// A top-level object of the geometry database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceItem {
    Solid(SolidId),
    Curve(CurveId),
}

/// Arena holding the objects the selection engine refers to.
///
/// Children reference their parent via typed IDs (generational indices), so
/// the selection sets can hold plain keys without borrowing the database.
pub struct GeometryDatabase {
    solids: SlotMap<SolidId, SolidData>,
    faces: SlotMap<FaceId, FaceData>,
    edges: SlotMap<EdgeId, EdgeData>,
    curves: SlotMap<CurveId, CurveData>,
    segments: SlotMap<SegmentId, SegmentData>,
    materials: Rc<dyn MaterialDatabase>,
    signals: EditorSignals,
}

impl std::fmt::Debug for GeometryDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryDatabase")
            .field("solids", &self.solids.len())
            .field("faces", &self.faces.len())
            .field("edges", &self.edges.len())
            .field("curves", &self.curves.len())
            .field("segments", &self.segments.len())
            .finish_non_exhaustive()
    }
}

impl GeometryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new(materials: Rc<dyn MaterialDatabase>, signals: EditorSignals) -> Self {
        Self {
            solids: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            curves: SlotMap::with_key(),
            segments: SlotMap::with_key(),
            materials,
            signals,
        }
    }

    // --- Solid operations ---

    /// Inserts an empty solid and returns its ID.
    pub fn add_solid(&mut self) -> SolidId {
        self.solids.insert(SolidData::default())
    }

    /// Returns the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the database.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, GeometryError> {
        self.solids
            .get(id)
            .ok_or(GeometryError::EntityNotFound("solid"))
    }

    /// Removes a solid together with its faces and edges.
    ///
    /// `object_removed` is dispatched before anything is removed, so
    /// listeners can still resolve the solid and its children.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the database.
    pub fn remove_solid(&mut self, id: SolidId) -> Result<(), GeometryError> {
        if !self.solids.contains_key(id) {
            return Err(GeometryError::EntityNotFound("solid"));
        }
        self.signals.object_removed.dispatch(&SpaceItem::Solid(id));

        if let Some(data) = self.solids.remove(id) {
            for face in data.faces {
                self.faces.remove(face);
            }
            for edge in data.edges {
                self.edges.remove(edge);
            }
        }
        Ok(())
    }

    // --- Face operations ---

    /// Inserts a face owned by `parent` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent solid is not found.
    pub fn add_face(&mut self, parent: SolidId) -> Result<FaceId, GeometryError> {
        let materials = Rc::clone(&self.materials);
        let solid = self
            .solids
            .get_mut(parent)
            .ok_or(GeometryError::EntityNotFound("solid"))?;
        let id = self.faces.insert_with_key(|id| FaceData {
            parent,
            material: materials.lookup(TopologyItem::Face(id)),
        });
        solid.faces.push(id);
        Ok(id)
    }

    /// Returns the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the database.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, GeometryError> {
        self.faces.get(id).ok_or(GeometryError::EntityNotFound("face"))
    }

    // --- Edge operations ---

    /// Inserts a curve edge owned by `parent` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent solid is not found.
    pub fn add_edge(&mut self, parent: SolidId) -> Result<EdgeId, GeometryError> {
        let materials = Rc::clone(&self.materials);
        let solid = self
            .solids
            .get_mut(parent)
            .ok_or(GeometryError::EntityNotFound("solid"))?;
        let id = self.edges.insert_with_key(|id| EdgeData {
            parent,
            material: materials.lookup(TopologyItem::Edge(id)),
        });
        solid.edges.push(id);
        Ok(id)
    }

    /// Returns the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the database.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, GeometryError> {
        self.edges.get(id).ok_or(GeometryError::EntityNotFound("edge"))
    }

    // --- Curve operations ---

    /// Inserts an empty space curve and returns its ID.
    pub fn add_curve(&mut self) -> CurveId {
        let materials = Rc::clone(&self.materials);
        self.curves.insert_with_key(|id| CurveData {
            segments: Vec::new(),
            material: materials.line(id),
        })
    }

    /// Returns the curve data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the database.
    pub fn curve(&self, id: CurveId) -> Result<&CurveData, GeometryError> {
        self.curves
            .get(id)
            .ok_or(GeometryError::EntityNotFound("curve"))
    }

    /// Removes a curve together with its segments.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the database.
    pub fn remove_curve(&mut self, id: CurveId) -> Result<(), GeometryError> {
        if !self.curves.contains_key(id) {
            return Err(GeometryError::EntityNotFound("curve"));
        }
        self.signals.object_removed.dispatch(&SpaceItem::Curve(id));

        if let Some(data) = self.curves.remove(id) {
            for segment in data.segments {
                self.segments.remove(segment);
            }
        }
        Ok(())
    }

    // --- Segment operations ---

    /// Inserts a segment of `parent` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent curve is not found.
    pub fn add_segment(&mut self, parent: CurveId) -> Result<SegmentId, GeometryError> {
        let curve = self
            .curves
            .get_mut(parent)
            .ok_or(GeometryError::EntityNotFound("curve"))?;
        let id = self.segments.insert(SegmentData { parent });
        curve.segments.push(id);
        Ok(id)
    }

    /// Returns the segment data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the database.
    pub fn segment(&self, id: SegmentId) -> Result<&SegmentData, GeometryError> {
        self.segments
            .get(id)
            .ok_or(GeometryError::EntityNotFound("segment"))
    }

    // --- Parent lookup and appearance ---

    /// Returns the solid owning a face or edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found in the database.
    pub fn parent_of(&self, item: TopologyItem) -> Result<SolidId, GeometryError> {
        match item {
            TopologyItem::Face(face) => Ok(self.face(face)?.parent),
            TopologyItem::Edge(edge) => Ok(self.edge(edge)?.parent),
        }
    }

    /// Returns the material a face or edge is currently rendered with.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found in the database.
    pub fn lookup_topology_item(&self, item: TopologyItem) -> Result<MaterialId, GeometryError> {
        match item {
            TopologyItem::Face(face) => Ok(self.face(face)?.material),
            TopologyItem::Edge(edge) => Ok(self.edge(edge)?.material),
        }
    }

    /// Assigns the material a face or edge is rendered with.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found in the database.
    pub fn set_topology_material(
        &mut self,
        item: TopologyItem,
        material: MaterialId,
    ) -> Result<(), GeometryError> {
        let slot = match item {
            TopologyItem::Face(face) => {
                &mut self
                    .faces
                    .get_mut(face)
                    .ok_or(GeometryError::EntityNotFound("face"))?
                    .material
            }
            TopologyItem::Edge(edge) => {
                &mut self
                    .edges
                    .get_mut(edge)
                    .ok_or(GeometryError::EntityNotFound("edge"))?
                    .material
            }
        };
        *slot = material;
        Ok(())
    }

    /// Assigns the material a curve is rendered with.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve is not found in the database.
    pub fn set_curve_material(
        &mut self,
        curve: CurveId,
        material: MaterialId,
    ) -> Result<(), GeometryError> {
        self.curves
            .get_mut(curve)
            .ok_or(GeometryError::EntityNotFound("curve"))?
            .material = material;
        Ok(())
    }

    // --- Picking ---

    /// Builds a pick result for a face, tagged with its parent solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found in the database.
    pub fn pick_face(
        &self,
        face: FaceId,
        point: Point3,
        distance: f64,
    ) -> Result<PickHit, GeometryError> {
        let parent = self.face(face)?.parent;
        Ok(PickHit::new(PickTarget::Face { face, parent }, point, distance))
    }

    /// Builds a pick result for a curve edge, tagged with its parent solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found in the database.
    pub fn pick_edge(
        &self,
        edge: EdgeId,
        point: Point3,
        distance: f64,
    ) -> Result<PickHit, GeometryError> {
        let parent = self.edge(edge)?.parent;
        Ok(PickHit::new(PickTarget::Edge { edge, parent }, point, distance))
    }

    /// Builds a pick result for a curve segment, tagged with its curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not found in the database.
    pub fn pick_segment(
        &self,
        segment: SegmentId,
        point: Point3,
        distance: f64,
    ) -> Result<PickHit, GeometryError> {
        let parent = self.segment(segment)?.parent;
        Ok(PickHit::new(
            PickTarget::Segment { segment, parent },
            point,
            distance,
        ))
    }
}
