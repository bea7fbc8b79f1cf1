use tracing::trace;

use super::pick::{order_hits, PickHit, PickTarget};
use super::{SelectionMode, SelectionModes};
use crate::topology::{CurveId, SegmentId, SolidId, TopologyItem};

/// Reaction to a classified pick. Click and hover supply different effects
/// for the same walk.
///
/// The `bool` methods return `true` when they handled the hit, which stops
/// the walk.
pub trait SelectionStrategy {
    /// The pick produced no hits at all.
    fn empty_intersection(&mut self);

    /// A face or edge was hit while solids are selectable.
    fn solid(&mut self, item: TopologyItem, parent: SolidId) -> bool;

    /// A face or edge was hit and its own mode is enabled.
    fn topological_item(&mut self, item: TopologyItem, parent: SolidId) -> bool;

    /// A curve segment was hit while curves are selectable.
    fn curve3d(&mut self, segment: SegmentId, parent: CurveId) -> bool;

    /// There were hits but none of them was handled.
    fn invalid_intersection(&mut self);
}

/// Outcome of a [`resolve`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No hits; `empty_intersection` ran.
    Empty,
    /// The given hit was handled.
    Handled(PickTarget),
    /// No hit was handled; `invalid_intersection` ran.
    Unhandled,
}

/// Walks `hits` in resolution order and lets `strategy` react to the first
/// one it accepts.
///
/// Edge hits are tried before face hits. For a face or edge, the solid is
/// offered first when [`SelectionMode::Solid`] is on, then the item itself
/// when its mode is on. Segment hits need [`SelectionMode::Curve`].
pub fn resolve<S>(hits: &[PickHit], modes: SelectionModes, strategy: &mut S) -> Resolution
where
    S: SelectionStrategy + ?Sized,
{
    if hits.is_empty() {
        strategy.empty_intersection();
        trace!("resolved empty intersection");
        return Resolution::Empty;
    }

    for hit in order_hits(hits) {
        let handled = match hit.target {
            PickTarget::Face { face, parent } => offer_topology(
                strategy,
                modes,
                TopologyItem::Face(face),
                parent,
                SelectionMode::Face,
            ),
            PickTarget::Edge { edge, parent } => offer_topology(
                strategy,
                modes,
                TopologyItem::Edge(edge),
                parent,
                SelectionMode::Edge,
            ),
            PickTarget::Segment { segment, parent } => {
                modes.contains(SelectionMode::Curve) && strategy.curve3d(segment, parent)
            }
            PickTarget::Other => false,
        };
        if handled {
            trace!(hit = ?hit.target, distance = hit.distance, "resolved hit");
            return Resolution::Handled(hit.target);
        }
    }

    strategy.invalid_intersection();
    trace!(hits = hits.len(), "no hit handled");
    Resolution::Unhandled
}

fn offer_topology<S>(
    strategy: &mut S,
    modes: SelectionModes,
    item: TopologyItem,
    parent: SolidId,
    item_mode: SelectionMode,
) -> bool
where
    S: SelectionStrategy + ?Sized,
{
    if modes.contains(SelectionMode::Solid) && strategy.solid(item, parent) {
        return true;
    }
    modes.contains(item_mode) && strategy.topological_item(item, parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::testing::Shapes;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Empty,
        Solid(TopologyItem),
        Item(TopologyItem),
        Curve(SegmentId),
        Invalid,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        accept_solid: bool,
        accept_item: bool,
        accept_curve: bool,
    }

    impl SelectionStrategy for Recorder {
        fn empty_intersection(&mut self) {
            self.calls.push(Call::Empty);
        }

        fn solid(&mut self, item: TopologyItem, _parent: SolidId) -> bool {
            self.calls.push(Call::Solid(item));
            self.accept_solid
        }

        fn topological_item(&mut self, item: TopologyItem, _parent: SolidId) -> bool {
            self.calls.push(Call::Item(item));
            self.accept_item
        }

        fn curve3d(&mut self, segment: SegmentId, _parent: CurveId) -> bool {
            self.calls.push(Call::Curve(segment));
            self.accept_curve
        }

        fn invalid_intersection(&mut self) {
            self.calls.push(Call::Invalid);
        }
    }

    fn face_hit(shapes: &Shapes, index: usize) -> PickHit {
        PickHit::new(
            PickTarget::Face {
                face: shapes.faces[index],
                parent: shapes.solid,
            },
            Point3::origin(),
            1.0,
        )
    }

    fn edge_hit(shapes: &Shapes, index: usize) -> PickHit {
        PickHit::new(
            PickTarget::Edge {
                edge: shapes.edges[index],
                parent: shapes.solid,
            },
            Point3::origin(),
            1.0,
        )
    }

    #[test]
    fn empty_hits_call_empty_intersection() {
        let mut recorder = Recorder::default();
        let outcome = resolve(&[], SelectionModes::all(), &mut recorder);
        assert_eq!(outcome, Resolution::Empty);
        assert_eq!(recorder.calls, vec![Call::Empty]);
    }

    #[test]
    fn edge_wins_over_face_regardless_of_input_order() {
        let shapes = Shapes::new();
        let hits = [face_hit(&shapes, 0), edge_hit(&shapes, 0)];
        let mut recorder = Recorder {
            accept_item: true,
            ..Recorder::default()
        };

        let outcome = resolve(&hits, SelectionModes::all(), &mut recorder);

        let edge = TopologyItem::Edge(shapes.edges[0]);
        assert_eq!(outcome, Resolution::Handled(hits[1].target));
        assert_eq!(recorder.calls, vec![Call::Solid(edge), Call::Item(edge)]);
    }

    #[test]
    fn handled_solid_stops_before_item() {
        let shapes = Shapes::new();
        let hits = [face_hit(&shapes, 0)];
        let mut recorder = Recorder {
            accept_solid: true,
            accept_item: true,
            ..Recorder::default()
        };

        resolve(&hits, SelectionModes::all(), &mut recorder);
        assert_eq!(
            recorder.calls,
            vec![Call::Solid(TopologyItem::Face(shapes.faces[0]))]
        );
    }

    #[test]
    fn disabled_modes_are_skipped() {
        let shapes = Shapes::new();
        let hits = [
            edge_hit(&shapes, 0),
            face_hit(&shapes, 1),
            shapes.segment_hit(),
        ];
        let mut recorder = Recorder {
            accept_item: true,
            accept_curve: true,
            ..Recorder::default()
        };
        let modes: SelectionModes = [SelectionMode::Face].into_iter().collect();

        let outcome = resolve(&hits, modes, &mut recorder);

        let face = TopologyItem::Face(shapes.faces[1]);
        assert_eq!(outcome, Resolution::Handled(hits[1].target));
        assert_eq!(recorder.calls, vec![Call::Item(face)]);
    }

    #[test]
    fn unhandled_hits_call_invalid_intersection() {
        let shapes = Shapes::new();
        let hits = [
            face_hit(&shapes, 0),
            shapes.segment_hit(),
            PickHit::new(PickTarget::Other, Point3::origin(), 4.0),
        ];
        let mut recorder = Recorder::default();

        let outcome = resolve(&hits, SelectionModes::all(), &mut recorder);

        let face = TopologyItem::Face(shapes.faces[0]);
        assert_eq!(outcome, Resolution::Unhandled);
        assert_eq!(
            recorder.calls,
            vec![
                Call::Solid(face),
                Call::Item(face),
                Call::Curve(shapes.segment),
                Call::Invalid
            ]
        );
    }
}
