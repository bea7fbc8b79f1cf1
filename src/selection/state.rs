use indexmap::{IndexMap, IndexSet};

use super::memento::SelectionMemento;
use super::ref_counter::RefCounter;
use super::{HoverDelta, Hoverable, Selectable};
use crate::signals::StateSignals;
use crate::topology::{CurveId, EdgeId, FaceId, SolidId, SpaceItem, TopologyItem};

/// The selection sets plus the hovered entity.
///
/// Selected faces and edges remember their parent solid, and
/// `selected_children` counts them per solid. Two invariants hold after
/// every mutation and at every notification:
///
/// - a solid with selected children is never itself in `selected_solids`;
/// - `selected_children.count(s)` equals the number of selected faces and
///   edges whose parent is `s`.
///
/// All mutations go through the methods below, each of which dispatches at
/// most one notification per membership change. A state owned by a
/// [`SelectionDatabase`](super::SelectionDatabase) defers its notifications
/// until the database has released it, so listeners may read the selection.
#[derive(Debug)]
pub struct SelectionState {
    solids: IndexSet<SolidId>,
    faces: IndexMap<FaceId, SolidId>,
    edges: IndexMap<EdgeId, SolidId>,
    curves: IndexSet<CurveId>,
    children: RefCounter<SolidId>,
    hovered: Option<Hoverable>,
    signals: StateSignals,
    deferred: bool,
    pending: Vec<Notification>,
}

#[derive(Debug, Clone, Copy)]
enum Notification {
    Selected(Selectable),
    Deselected(Selectable),
    Hover(HoverDelta),
}

impl Notification {
    fn dispatch(self, signals: &StateSignals) {
        match self {
            Self::Selected(target) => signals.selected.dispatch(&target),
            Self::Deselected(target) => signals.deselected.dispatch(&target),
            Self::Hover(delta) => signals.hover_delta.dispatch(&delta),
        }
    }
}

/// Notifications taken out of a deferring state, in mutation order.
#[derive(Debug)]
#[must_use]
pub(crate) struct PendingNotifications {
    signals: StateSignals,
    queue: Vec<Notification>,
}

impl PendingNotifications {
    pub(crate) fn deliver(self) {
        for notification in self.queue {
            notification.dispatch(&self.signals);
        }
    }
}

impl SelectionState {
    /// Creates an empty state dispatching on `signals`.
    #[must_use]
    pub fn new(signals: StateSignals) -> Self {
        Self {
            solids: IndexSet::new(),
            faces: IndexMap::new(),
            edges: IndexMap::new(),
            curves: IndexSet::new(),
            children: RefCounter::new(),
            hovered: None,
            signals,
            deferred: false,
            pending: Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn selected_solids(&self) -> &IndexSet<SolidId> {
        &self.solids
    }

    /// Selected faces mapped to their parent solid.
    #[must_use]
    pub fn selected_faces(&self) -> &IndexMap<FaceId, SolidId> {
        &self.faces
    }

    /// Selected edges mapped to their parent solid.
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
    pub fn hovered(&self) -> Option<Hoverable> {
        self.hovered
    }

    #[must_use]
    pub fn signals(&self) -> &StateSignals {
        &self.signals
    }

    #[must_use]
    pub fn has_solid(&self, solid: SolidId) -> bool {
        self.solids.contains(&solid)
    }

    #[must_use]
    pub fn has_curve(&self, curve: CurveId) -> bool {
        self.curves.contains(&curve)
    }

    #[must_use]
    pub fn has_item(&self, item: TopologyItem) -> bool {
        match item {
            TopologyItem::Face(face) => self.faces.contains_key(&face),
            TopologyItem::Edge(edge) => self.edges.contains_key(&edge),
        }
    }

    /// Returns `true` if nothing is selected. Hover is not considered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
            && self.faces.is_empty()
            && self.edges.is_empty()
            && self.curves.is_empty()
    }

    // --- Solids ---

    /// Selects a solid.
    ///
    /// Refused (returns `false`) while any of its faces or edges is selected,
    /// or if it is already selected.
    pub fn add_solid(&mut self, solid: SolidId) -> bool {
        if self.children.has(solid) || !self.solids.insert(solid) {
            return false;
        }
        self.notify(Notification::Selected(Selectable::Solid(solid)));
        true
    }

    pub fn remove_solid(&mut self, solid: SolidId) -> bool {
        if !self.solids.shift_remove(&solid) {
            return false;
        }
        self.notify(Notification::Deselected(Selectable::Solid(solid)));
        true
    }

    // --- Faces and edges ---

    /// Selects a face or edge of `parent`, deselecting `parent` itself first
    /// if it was selected.
    pub fn add_item(&mut self, item: TopologyItem, parent: SolidId) -> bool {
        if self.has_item(item) {
            return false;
        }
        self.remove_solid(parent);
        match item {
            TopologyItem::Face(face) => {
                self.faces.insert(face, parent);
            }
            TopologyItem::Edge(edge) => {
                self.edges.insert(edge, parent);
            }
        }
        self.children.increment(parent);
        self.notify(Notification::Selected(Selectable::from(item)));
        true
    }

    pub fn remove_item(&mut self, item: TopologyItem) -> bool {
        let parent = match item {
            TopologyItem::Face(face) => self.faces.shift_remove(&face),
            TopologyItem::Edge(edge) => self.edges.shift_remove(&edge),
        };
        let Some(parent) = parent else {
            return false;
        };
        self.children.decrement(parent);
        self.notify(Notification::Deselected(Selectable::from(item)));
        true
    }

    pub fn add_face(&mut self, face: FaceId, parent: SolidId) -> bool {
        self.add_item(TopologyItem::Face(face), parent)
    }

    pub fn remove_face(&mut self, face: FaceId) -> bool {
        self.remove_item(TopologyItem::Face(face))
    }

    pub fn add_edge(&mut self, edge: EdgeId, parent: SolidId) -> bool {
        self.add_item(TopologyItem::Edge(edge), parent)
    }

    pub fn remove_edge(&mut self, edge: EdgeId) -> bool {
        self.remove_item(TopologyItem::Edge(edge))
    }

    // --- Curves ---

    pub fn add_curve(&mut self, curve: CurveId) -> bool {
        if !self.curves.insert(curve) {
            return false;
        }
        self.notify(Notification::Selected(Selectable::Curve(curve)));
        true
    }

    pub fn remove_curve(&mut self, curve: CurveId) -> bool {
        if !self.curves.shift_remove(&curve) {
            return false;
        }
        self.notify(Notification::Deselected(Selectable::Curve(curve)));
        true
    }

    // --- Hover ---

    /// Replaces the hovered entity, dispatching one delta if it changed.
    pub fn set_hovered(&mut self, hovered: Option<Hoverable>) -> bool {
        if self.hovered == hovered {
            return false;
        }
        let previous = std::mem::replace(&mut self.hovered, hovered);
        self.notify(Notification::Hover(HoverDelta {
            previous,
            current: hovered,
        }));
        true
    }

    // --- Bulk operations ---

    /// Drops every membership that refers to `item` or its children, and the
    /// hover if it points at them. Returns the removed memberships.
    pub fn remove_space_item(&mut self, item: SpaceItem) -> Vec<Selectable> {
        let mut removed = Vec::new();
        match item {
            SpaceItem::Solid(solid) => {
                let faces: Vec<FaceId> = self
                    .faces
                    .iter()
                    .filter(|(_, parent)| **parent == solid)
                    .map(|(face, _)| *face)
                    .collect();
                let edges: Vec<EdgeId> = self
                    .edges
                    .iter()
                    .filter(|(_, parent)| **parent == solid)
                    .map(|(edge, _)| *edge)
                    .collect();

                for edge in edges {
                    if self.remove_edge(edge) {
                        removed.push(Selectable::Edge(edge));
                    }
                }
                for face in faces {
                    if self.remove_face(face) {
                        removed.push(Selectable::Face(face));
                    }
                }
                if self.remove_solid(solid) {
                    removed.push(Selectable::Solid(solid));
                }
                self.children.remove(solid);

                if self.hovered.is_some_and(|h| h.belongs_to_solid(solid)) {
                    self.set_hovered(None);
                }
            }
            SpaceItem::Curve(curve) => {
                if self.remove_curve(curve) {
                    removed.push(Selectable::Curve(curve));
                }
                if self.hovered.is_some_and(|h| h.belongs_to_curve(curve)) {
                    self.set_hovered(None);
                }
            }
        }
        removed
    }

    /// Empties every selection set, one notification per removed entity.
    /// Returns the removed memberships. Hover is left alone.
    pub fn clear(&mut self) -> Vec<Selectable> {
        let mut removed = Vec::with_capacity(
            self.edges.len() + self.faces.len() + self.solids.len() + self.curves.len(),
        );

        while let Some((edge, parent)) = self.edges.shift_remove_index(0) {
            self.children.decrement(parent);
            self.notify(Notification::Deselected(Selectable::Edge(edge)));
            removed.push(Selectable::Edge(edge));
        }
        while let Some((face, parent)) = self.faces.shift_remove_index(0) {
            self.children.decrement(parent);
            self.notify(Notification::Deselected(Selectable::Face(face)));
            removed.push(Selectable::Face(face));
        }
        while let Some(solid) = self.solids.shift_remove_index(0) {
            self.notify(Notification::Deselected(Selectable::Solid(solid)));
            removed.push(Selectable::Solid(solid));
        }
        while let Some(curve) = self.curves.shift_remove_index(0) {
            self.notify(Notification::Deselected(Selectable::Curve(curve)));
            removed.push(Selectable::Curve(curve));
        }
        self.children.clear();
        removed
    }

    // --- Mementos ---

    /// Deep copy of the selection sets.
    #[must_use]
    pub fn save(&self) -> SelectionMemento {
        SelectionMemento {
            solids: self.solids.clone(),
            faces: self.faces.clone(),
            edges: self.edges.clone(),
            curves: self.curves.clone(),
            children: self.children.clone(),
        }
    }

    /// Replaces the selection sets wholesale. No notifications are
    /// dispatched and the hover is kept.
    pub fn restore(&mut self, memento: &SelectionMemento) {
        self.solids.clone_from(&memento.solids);
        self.faces.clone_from(&memento.faces);
        self.edges.clone_from(&memento.edges);
        self.curves.clone_from(&memento.curves);
        self.children.clone_from(&memento.children);
    }

    // --- Delivery ---

    fn notify(&mut self, notification: Notification) {
        if self.deferred {
            self.pending.push(notification);
        } else {
            notification.dispatch(&self.signals);
        }
    }

    /// Switches between queueing notifications and dispatching them on the
    /// spot. Leaving deferred mode delivers whatever is still queued.
    pub(crate) fn set_deferred(&mut self, deferred: bool) {
        self.deferred = deferred;
        if !deferred {
            self.take_pending().deliver();
        }
    }

    pub(crate) fn take_pending(&mut self) -> PendingNotifications {
        PendingNotifications {
            signals: self.signals.clone(),
            queue: std::mem::take(&mut self.pending),
        }
    }
}
