//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;

use crate::materials::{MaterialDatabase, MaterialId};
use crate::math::Point3;
use crate::selection::{PickHit, PickTarget, Resolution, SelectionManager, SelectionModes, SelectionState};
use crate::signals::{EditorSignals, Signal, Subscription};
use crate::topology::{CurveId, EdgeId, FaceId, GeometryDatabase, SegmentId, SolidId, TopologyItem};

pub(crate) const DEFAULT_FACE: MaterialId = MaterialId(1);
pub(crate) const DEFAULT_EDGE: MaterialId = MaterialId(2);
pub(crate) const DEFAULT_LINE: MaterialId = MaterialId(3);

pub(crate) struct FakeMaterials;

impl MaterialDatabase for FakeMaterials {
    fn lookup(&self, item: TopologyItem) -> MaterialId {
        match item {
            TopologyItem::Face(_) => DEFAULT_FACE,
            TopologyItem::Edge(_) => DEFAULT_EDGE,
        }
    }

    fn line(&self, _curve: CurveId) -> MaterialId {
        DEFAULT_LINE
    }
}

/// Surfaces `tracing` output for failing tests (`RUST_LOG=solidpick=trace`).
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Collects every value dispatched on `signal` while the subscription lives.
pub(crate) fn record<T: Clone + 'static>(signal: &Signal<T>) -> (Rc<RefCell<Vec<T>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = signal.add(move |value: &T| sink.borrow_mut().push(value.clone()));
    (seen, subscription)
}

/// Whether no selected solid has selected children and every child count
/// matches the selected faces and edges of that solid.
pub(crate) fn invariants_hold(state: &SelectionState) -> bool {
    let children = state.selected_children();
    let exclusive = state
        .selected_solids()
        .iter()
        .all(|solid| children.count(*solid) == 0);
    let counted = children.owners().all(|owner| {
        let faces = state.selected_faces().values().filter(|p| *p == owner).count();
        let edges = state.selected_edges().values().filter(|p| *p == owner).count();
        children.count(*owner) == faces + edges
    });
    let parents_counted = state
        .selected_faces()
        .values()
        .chain(state.selected_edges().values())
        .all(|parent| children.has(*parent));
    exclusive && counted && parents_counted
}

/// Two solids and a curve.
///
/// `solid` has two faces and two edges, `other_solid` a single face, and
/// `curve` a single segment.
pub(crate) struct Shapes {
    pub solid: SolidId,
    pub faces: Vec<FaceId>,
    pub edges: Vec<EdgeId>,
    pub other_solid: SolidId,
    pub other_face: FaceId,
    pub curve: CurveId,
    pub segment: SegmentId,
}

impl Shapes {
    pub fn new() -> Self {
        let mut geometry = GeometryDatabase::new(Rc::new(FakeMaterials), EditorSignals::new());
        Self::create(&mut geometry)
    }

    pub fn create(geometry: &mut GeometryDatabase) -> Self {
        let solid = geometry.add_solid();
        let faces = vec![
            geometry.add_face(solid).unwrap(),
            geometry.add_face(solid).unwrap(),
        ];
        let edges = vec![
            geometry.add_edge(solid).unwrap(),
            geometry.add_edge(solid).unwrap(),
        ];
        let other_solid = geometry.add_solid();
        let other_face = geometry.add_face(other_solid).unwrap();
        let curve = geometry.add_curve();
        let segment = geometry.add_segment(curve).unwrap();
        Self {
            solid,
            faces,
            edges,
            other_solid,
            other_face,
            curve,
            segment,
        }
    }

    pub fn face_hit(&self, index: usize) -> PickHit {
        hit(PickTarget::Face {
            face: self.faces[index],
            parent: self.solid,
        })
    }

    pub fn edge_hit(&self, index: usize) -> PickHit {
        hit(PickTarget::Edge {
            edge: self.edges[index],
            parent: self.solid,
        })
    }

    pub fn other_face_hit(&self) -> PickHit {
        hit(PickTarget::Face {
            face: self.other_face,
            parent: self.other_solid,
        })
    }

    pub fn segment_hit(&self) -> PickHit {
        hit(PickTarget::Segment {
            segment: self.segment,
            parent: self.curve,
        })
    }
}

fn hit(target: PickTarget) -> PickHit {
    PickHit::new(target, Point3::new(0.0, 0.0, 1.0), 1.0)
}

/// A manager driving a standalone state on the editor channels.
pub(crate) struct Fixture {
    pub geometry: Rc<RefCell<GeometryDatabase>>,
    pub shapes: Shapes,
    pub manager: SelectionManager,
    pub state: SelectionState,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let signals = EditorSignals::new();
        let materials: Rc<dyn MaterialDatabase> = Rc::new(FakeMaterials);
        let mut geometry = GeometryDatabase::new(Rc::clone(&materials), signals.clone());
        let shapes = Shapes::create(&mut geometry);
        let geometry = Rc::new(RefCell::new(geometry));
        Self {
            manager: SelectionManager::new(Rc::clone(&geometry), materials),
            state: SelectionState::new(signals.state_signals()),
            geometry,
            shapes,
        }
    }

    pub fn click(&mut self, hits: &[PickHit], modes: SelectionModes) -> Resolution {
        self.manager.on_click(&mut self.state, hits, modes)
    }

    pub fn hover(&mut self, hits: &[PickHit], modes: SelectionModes) -> Resolution {
        self.manager.on_pointer_move(&mut self.state, hits, modes)
    }

    /// Checks that no selected solid has selected children and that every
    /// child count matches the selected faces and edges.
    pub fn assert_invariants(&self) {
        let state = &self.state;
        assert!(invariants_hold(state));
        for solid in state.selected_solids() {
            assert_eq!(state.selected_children().count(*solid), 0);
        }
        for solid in [self.shapes.solid, self.shapes.other_solid] {
            let expected = state.selected_faces().values().filter(|p| **p == solid).count()
                + state.selected_edges().values().filter(|p| **p == solid).count();
            assert_eq!(state.selected_children().count(solid), expected);
            if expected > 0 {
                assert!(!state.has_solid(solid));
            }
        }
    }
}
