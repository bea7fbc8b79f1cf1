use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use super::click::ClickStrategy;
use super::hover::HoverStrategy;
use super::memento::SelectionMemento;
use super::pick::PickHit;
use super::resolver::{resolve, Resolution};
use super::state::SelectionState;
use super::{Selectable, SelectionModes};
use crate::error::Result;
use crate::materials::MaterialDatabase;
use crate::topology::{GeometryDatabase, SpaceItem, TopologyItem};

/// Runs picking events, bulk deselection and removals against a
/// [`SelectionState`].
///
/// The manager holds no selection itself, so the same instance serves the
/// live state and any temporary one.
pub struct SelectionManager {
    geometry: Rc<RefCell<GeometryDatabase>>,
    materials: Rc<dyn MaterialDatabase>,
}

impl fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager").finish_non_exhaustive()
    }
}

impl SelectionManager {
    #[must_use]
    pub fn new(
        geometry: Rc<RefCell<GeometryDatabase>>,
        materials: Rc<dyn MaterialDatabase>,
    ) -> Self {
        Self {
            geometry,
            materials,
        }
    }

    /// Toggles the selection according to the first accepted hit.
    pub fn on_click(
        &self,
        state: &mut SelectionState,
        hits: &[PickHit],
        modes: SelectionModes,
    ) -> Resolution {
        resolve(hits, modes, &mut ClickStrategy::new(state, self))
    }

    /// Updates the hovered entity according to the first accepted hit.
    pub fn on_pointer_move(
        &self,
        state: &mut SelectionState,
        hits: &[PickHit],
        modes: SelectionModes,
    ) -> Resolution {
        resolve(hits, modes, &mut HoverStrategy::new(state))
    }

    /// Empties every selection set and puts default materials back on the
    /// deselected faces, edges and curves. Returns how many entities were
    /// deselected.
    pub fn deselect_all(&self, state: &mut SelectionState) -> usize {
        let removed = state.clear();
        for target in &removed {
            self.restore_appearance(*target);
        }
        if !removed.is_empty() {
            debug!(count = removed.len(), "deselected all");
        }
        removed.len()
    }

    /// Drops every membership referring to a removed object. Unselected
    /// objects are ignored.
    pub fn delete(&self, state: &mut SelectionState, item: SpaceItem) -> usize {
        let removed = state.remove_space_item(item);
        if !removed.is_empty() {
            debug!(?item, count = removed.len(), "removed object from selection");
        }
        removed.len()
    }

    /// Selects `target` directly, without picking, once the geometry
    /// database confirms it exists. Faces and edges are filed under their
    /// parent solid. Returns whether the selection changed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EntityNotFound`](crate::GeometryError::EntityNotFound)
    /// if `target` is not in the geometry database.
    pub fn select(&self, state: &mut SelectionState, target: Selectable) -> Result<bool> {
        let geometry = self.geometry.borrow();
        let changed = match target {
            Selectable::Solid(solid) => {
                geometry.solid(solid)?;
                state.add_solid(solid)
            }
            Selectable::Face(face) => {
                let item = TopologyItem::Face(face);
                state.add_item(item, geometry.parent_of(item)?)
            }
            Selectable::Edge(edge) => {
                let item = TopologyItem::Edge(edge);
                state.add_item(item, geometry.parent_of(item)?)
            }
            Selectable::Curve(curve) => {
                geometry.curve(curve)?;
                state.add_curve(curve)
            }
        };
        trace!(?target, changed, "selected directly");
        Ok(changed)
    }

    #[must_use]
    pub fn save_to_memento(&self, state: &SelectionState) -> SelectionMemento {
        state.save()
    }

    pub fn restore_from_memento(&self, state: &mut SelectionState, memento: &SelectionMemento) {
        state.restore(memento);
        debug!(
            solids = memento.selected_solids().len(),
            faces = memento.selected_faces().len(),
            edges = memento.selected_edges().len(),
            curves = memento.selected_curves().len(),
            "restored selection"
        );
    }

    /// Puts the default material back on a deselected face, edge or curve.
    pub(crate) fn restore_appearance(&self, target: Selectable) {
        let Ok(mut geometry) = self.geometry.try_borrow_mut() else {
            warn!(?target, "geometry database busy, appearance not restored");
            return;
        };
        let result = match target {
            Selectable::Face(face) => {
                let item = TopologyItem::Face(face);
                geometry.set_topology_material(item, self.materials.lookup(item))
            }
            Selectable::Edge(edge) => {
                let item = TopologyItem::Edge(edge);
                geometry.set_topology_material(item, self.materials.lookup(item))
            }
            Selectable::Curve(curve) => {
                geometry.set_curve_material(curve, self.materials.line(curve))
            }
            Selectable::Solid(_) => Ok(()),
        };
        if let Err(error) = result {
            trace!(?target, %error, "skipped appearance restore");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::{Error, GeometryError};
    use crate::materials::MaterialId;
    use crate::selection::{Selectable, SelectionMode, SelectionModes};
    use crate::testing::{record, Fixture, DEFAULT_EDGE, DEFAULT_LINE};
    use crate::topology::{SpaceItem, TopologyItem};

    fn parts() -> SelectionModes {
        [SelectionMode::Face, SelectionMode::Edge, SelectionMode::Curve]
            .into_iter()
            .collect()
    }

    #[test]
    fn deselect_all_twice_is_idempotent() {
        let mut fx = Fixture::new();
        let (edge, segment) = (fx.shapes.edge_hit(0), fx.shapes.segment_hit());
        fx.click(&[edge], parts());
        fx.click(&[segment], parts());
        let (deselected, _sub) = record(&fx.state.signals().deselected);

        assert_eq!(fx.manager.deselect_all(&mut fx.state), 2);
        let after_first = deselected.borrow().len();
        assert_eq!(fx.manager.deselect_all(&mut fx.state), 0);

        assert_eq!(after_first, 2);
        assert_eq!(deselected.borrow().len(), 2);
        assert!(fx.state.is_empty());
        assert!(fx.state.selected_children().is_empty());
    }

    #[test]
    fn deselect_all_restores_default_materials() {
        let mut fx = Fixture::new();
        let (edge, segment) = (fx.shapes.edge_hit(0), fx.shapes.segment_hit());
        let item = TopologyItem::Edge(fx.shapes.edges[0]);
        {
            let mut geometry = fx.geometry.borrow_mut();
            geometry.set_topology_material(item, MaterialId(7)).unwrap();
            geometry.set_curve_material(fx.shapes.curve, MaterialId(8)).unwrap();
        }
        fx.click(&[edge], parts());
        fx.click(&[segment], parts());

        fx.manager.deselect_all(&mut fx.state);

        let geometry = fx.geometry.borrow();
        assert_eq!(geometry.lookup_topology_item(item).unwrap(), DEFAULT_EDGE);
        assert_eq!(geometry.curve(fx.shapes.curve).unwrap().material, DEFAULT_LINE);
    }

    #[test]
    fn deleting_solid_cascades_to_selected_face() {
        let mut fx = Fixture::new();
        let hit = fx.shapes.face_hit(0);
        fx.click(&[hit], parts());
        let (deselected, _sub) = record(&fx.state.signals().deselected);

        let removed = fx
            .manager
            .delete(&mut fx.state, SpaceItem::Solid(fx.shapes.solid));

        assert_eq!(removed, 1);
        assert!(!fx.state.has_solid(fx.shapes.solid));
        assert!(fx.state.selected_faces().is_empty());
        assert_eq!(fx.state.selected_children().count(fx.shapes.solid), 0);
        assert_eq!(
            *deselected.borrow(),
            vec![Selectable::Face(fx.shapes.faces[0])]
        );
    }

    #[test]
    fn deleting_unselected_object_is_a_no_op() {
        let mut fx = Fixture::new();
        let (deselected, _sub) = record(&fx.state.signals().deselected);

        assert_eq!(
            fx.manager
                .delete(&mut fx.state, SpaceItem::Curve(fx.shapes.curve)),
            0
        );
        assert_eq!(
            fx.manager
                .delete(&mut fx.state, SpaceItem::Solid(fx.shapes.other_solid)),
            0
        );
        assert!(deselected.borrow().is_empty());
    }

    #[test]
    fn select_files_parts_under_their_parent() {
        let mut fx = Fixture::new();
        let edge = Selectable::Edge(fx.shapes.edges[1]);

        assert!(fx.manager.select(&mut fx.state, edge).unwrap());
        assert!(!fx.manager.select(&mut fx.state, edge).unwrap());
        assert_eq!(fx.state.selected_edges()[&fx.shapes.edges[1]], fx.shapes.solid);
        assert!(!fx
            .manager
            .select(&mut fx.state, Selectable::Solid(fx.shapes.solid))
            .unwrap());
        fx.assert_invariants();
    }

    #[test]
    fn select_rejects_removed_entities() {
        let mut fx = Fixture::new();
        let face = fx.shapes.other_face;
        fx.geometry
            .borrow_mut()
            .remove_solid(fx.shapes.other_solid)
            .unwrap();

        let result = fx.manager.select(&mut fx.state, Selectable::Face(face));

        assert!(matches!(
            result,
            Err(Error::Geometry(GeometryError::EntityNotFound("face")))
        ));
        assert!(fx.state.is_empty());
    }

    #[test]
    fn memento_round_trip() {
        let mut fx = Fixture::new();
        let (face, other) = (fx.shapes.face_hit(0), fx.shapes.other_face_hit());
        fx.click(&[face], parts());
        fx.click(&[other], SelectionModes::all());

        let memento = fx.manager.save_to_memento(&fx.state);
        fx.manager.deselect_all(&mut fx.state);
        assert!(fx.state.is_empty());

        fx.manager.restore_from_memento(&mut fx.state, &memento);
        assert_eq!(fx.manager.save_to_memento(&fx.state), memento);
        assert!(fx.state.has_solid(fx.shapes.other_solid));
        assert_eq!(fx.state.selected_children().count(fx.shapes.solid), 1);
    }

    #[test]
    fn memento_ignores_later_mutation() {
        let mut fx = Fixture::new();
        let memento = fx.manager.save_to_memento(&fx.state);
        let hit = fx.shapes.face_hit(0);

        fx.click(&[hit], SelectionModes::all());

        assert!(memento.is_empty());
        assert!(fx.state.has_solid(fx.shapes.solid));
    }
}
