use indexmap::{IndexMap, IndexSet};

use super::ref_counter::RefCounter;
use crate::topology::{CurveId, EdgeId, FaceId, SolidId};

/// Immutable snapshot of a selection, used for undo/redo.
///
/// Holds its own copies of the sets; later changes to the state it was taken
/// from do not show up here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionMemento {
    pub(super) solids: IndexSet<SolidId>,
    pub(super) faces: IndexMap<FaceId, SolidId>,
    pub(super) edges: IndexMap<EdgeId, SolidId>,
    pub(super) curves: IndexSet<CurveId>,
    pub(super) children: RefCounter<SolidId>,
}

impl SelectionMemento {
    #[must_use]
    pub fn selected_solids(&self) -> &IndexSet<SolidId> {
        &self.solids
    }

    #[must_use]
    pub fn selected_faces(&self) -> &IndexMap<FaceId, SolidId> {
        &self.faces
    }

    #[must_use]
    pub fn selected_edges(&self) -> &IndexMap<EdgeId, SolidId> {
        &self.edges
    }

    #[must_use]
    pub fn selected_curves(&self) -> &IndexSet<CurveId> {
        &self.curves
    }

    #[must_use]
    pub fn selected_children(&self) -> &RefCounter<SolidId> {
        &self.children
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
            && self.faces.is_empty()
            && self.edges.is_empty()
            && self.curves.is_empty()
    }
}
