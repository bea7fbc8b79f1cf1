use super::resolver::SelectionStrategy;
use super::state::SelectionState;
use super::Hoverable;
use crate::topology::{CurveId, SegmentId, SolidId, TopologyItem};

/// Pointer-move hover: previews what a click at the same spot would affect.
///
/// Only the hovered entity changes; the selection sets are never touched.
pub struct HoverStrategy<'a> {
    state: &'a mut SelectionState,
}

impl<'a> HoverStrategy<'a> {
    #[must_use]
    pub fn new(state: &'a mut SelectionState) -> Self {
        Self { state }
    }
}

impl SelectionStrategy for HoverStrategy<'_> {
    fn empty_intersection(&mut self) {
        self.state.set_hovered(None);
    }

    fn solid(&mut self, item: TopologyItem, parent: SolidId) -> bool {
        let hovered = if !self.state.selected_children().has(parent) {
            Some(Hoverable::Solid(parent))
        } else if self.state.has_item(item) {
            Some(Hoverable::Topology { item, parent })
        } else {
            None
        };
        self.state.set_hovered(hovered);
        true
    }

    fn topological_item(&mut self, item: TopologyItem, parent: SolidId) -> bool {
        self.state
            .set_hovered(Some(Hoverable::Topology { item, parent }));
        true
    }

    fn curve3d(&mut self, segment: SegmentId, parent: CurveId) -> bool {
        self.state
            .set_hovered(Some(Hoverable::Segment { segment, parent }));
        true
    }

    fn invalid_intersection(&mut self) {
        self.state.set_hovered(None);
    }
}

#[cfg(test)]
mod tests {
    use crate::selection::{Hoverable, SelectionMode, SelectionModes};
    use crate::testing::{record, Fixture};
    use crate::topology::TopologyItem;

    fn without_solids() -> SelectionModes {
        let mut modes = SelectionModes::all();
        modes.remove(SelectionMode::Solid);
        modes
    }

    #[test]
    fn hover_previews_solid_without_selecting() {
        let mut fx = Fixture::new();
        let hit = fx.shapes.face_hit(0);

        fx.hover(&[hit], SelectionModes::all());

        assert_eq!(fx.state.hovered(), Some(Hoverable::Solid(fx.shapes.solid)));
        assert!(fx.state.is_empty());
    }

    #[test]
    fn hover_prefers_edge_over_face() {
        let mut fx = Fixture::new();
        let hits = [fx.shapes.face_hit(0), fx.shapes.edge_hit(0)];

        fx.hover(&hits, without_solids());

        assert_eq!(
            fx.state.hovered(),
            Some(Hoverable::Topology {
                item: TopologyItem::Edge(fx.shapes.edges[0]),
                parent: fx.shapes.solid
            })
        );
    }

    #[test]
    fn hover_on_solid_with_selected_parts() {
        let mut fx = Fixture::new();
        let (f0, f1) = (fx.shapes.face_hit(0), fx.shapes.face_hit(1));
        fx.click(&[f0], without_solids());

        fx.hover(&[f0], SelectionModes::all());
        assert_eq!(
            fx.state.hovered(),
            Some(Hoverable::Topology {
                item: TopologyItem::Face(fx.shapes.faces[0]),
                parent: fx.shapes.solid
            })
        );

        fx.hover(&[f1], SelectionModes::all());
        assert_eq!(fx.state.hovered(), None);
    }

    #[test]
    fn hover_segment_then_leave() {
        let mut fx = Fixture::new();
        let segment = fx.shapes.segment_hit();
        let (deltas, _sub) = record(&fx.state.signals().hover_delta);

        fx.hover(&[segment], SelectionModes::all());
        fx.hover(&[segment], SelectionModes::all());
        fx.hover(&[], SelectionModes::all());

        assert_eq!(deltas.borrow().len(), 2);
        assert_eq!(fx.state.hovered(), None);
    }

    #[test]
    fn unhandled_hover_clears() {
        let mut fx = Fixture::new();
        let segment = fx.shapes.segment_hit();
        fx.hover(&[segment], SelectionModes::all());

        fx.hover(&[segment], SelectionModes::empty());
        assert_eq!(fx.state.hovered(), None);
    }
}
