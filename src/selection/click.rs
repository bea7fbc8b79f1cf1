use super::manager::SelectionManager;
use super::resolver::SelectionStrategy;
use super::state::SelectionState;
use super::Selectable;
use crate::topology::{CurveId, SegmentId, SolidId, TopologyItem};

/// Click-to-select: toggles memberships in the selection sets.
pub struct ClickStrategy<'a> {
    state: &'a mut SelectionState,
    manager: &'a SelectionManager,
}

impl<'a> ClickStrategy<'a> {
    #[must_use]
    pub fn new(state: &'a mut SelectionState, manager: &'a SelectionManager) -> Self {
        Self { state, manager }
    }

    fn deselect_item(&mut self, item: TopologyItem) -> bool {
        if !self.state.remove_item(item) {
            return false;
        }
        self.manager.restore_appearance(Selectable::from(item));
        true
    }
}

impl SelectionStrategy for ClickStrategy<'_> {
    fn empty_intersection(&mut self) {
        self.manager.deselect_all(self.state);
    }

    fn solid(&mut self, item: TopologyItem, parent: SolidId) -> bool {
        if self.state.remove_solid(parent) {
            return true;
        }
        // A solid with selected parts cannot be selected; clicking one of
        // those parts again deselects it, anything else is swallowed.
        if self.state.selected_children().has(parent) {
            self.deselect_item(item);
            return true;
        }
        self.state.add_solid(parent);
        true
    }

    fn topological_item(&mut self, item: TopologyItem, parent: SolidId) -> bool {
        if !self.deselect_item(item) {
            self.state.add_item(item, parent);
        }
        true
    }

    fn curve3d(&mut self, _segment: SegmentId, parent: CurveId) -> bool {
        if self.state.remove_curve(parent) {
            self.manager.restore_appearance(Selectable::Curve(parent));
        } else {
            self.state.add_curve(parent);
        }
        true
    }

    fn invalid_intersection(&mut self) {}
}
