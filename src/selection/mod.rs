mod click;
mod database;
mod history;
mod hover;
mod manager;
mod memento;
mod pick;
mod ref_counter;
mod resolver;
mod state;

pub use click::ClickStrategy;
pub use database::SelectionDatabase;
pub use history::SelectionHistory;
pub use hover::HoverStrategy;
pub use manager::SelectionManager;
pub use memento::SelectionMemento;
pub use pick::{PickHit, PickTarget};
pub use ref_counter::RefCounter;
pub use resolver::{resolve, Resolution, SelectionStrategy};
pub use state::SelectionState;

use crate::topology::{CurveId, EdgeId, FaceId, SegmentId, SolidId, TopologyItem};

/// An object class that picking may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    Solid,
    Face,
    Edge,
    Curve,
}

impl SelectionMode {
    const fn bit(self) -> u8 {
        match self {
            Self::Solid => 1,
            Self::Face => 1 << 1,
            Self::Edge => 1 << 2,
            Self::Curve => 1 << 3,
        }
    }
}

/// The set of enabled [`SelectionMode`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionModes(u8);

impl SelectionModes {
    /// Every mode enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// No mode enabled; picking then never selects anything.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn contains(self, mode: SelectionMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn insert(&mut self, mode: SelectionMode) {
        self.0 |= mode.bit();
    }

    pub fn remove(&mut self, mode: SelectionMode) {
        self.0 &= !mode.bit();
    }

    /// Flips `mode` and returns whether it is now enabled.
    pub fn toggle(&mut self, mode: SelectionMode) -> bool {
        self.0 ^= mode.bit();
        self.contains(mode)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for SelectionModes {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<SelectionMode> for SelectionModes {
    fn from_iter<I: IntoIterator<Item = SelectionMode>>(iter: I) -> Self {
        let mut modes = Self::empty();
        for mode in iter {
            modes.insert(mode);
        }
        modes
    }
}

/// An entity that can be a member of a selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selectable {
    Solid(SolidId),
    Face(FaceId),
    Edge(EdgeId),
    Curve(CurveId),
}

impl From<TopologyItem> for Selectable {
    fn from(item: TopologyItem) -> Self {
        match item {
            TopologyItem::Face(face) => Self::Face(face),
            TopologyItem::Edge(edge) => Self::Edge(edge),
        }
    }
}

/// The entity under the pointer. At most one is hovered at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hoverable {
    Solid(SolidId),
    Topology { item: TopologyItem, parent: SolidId },
    Segment { segment: SegmentId, parent: CurveId },
}

impl Hoverable {
    /// Returns `true` if this hoverable is `solid` or one of its parts.
    #[must_use]
    pub fn belongs_to_solid(self, solid: SolidId) -> bool {
        match self {
            Self::Solid(id) | Self::Topology { parent: id, .. } => id == solid,
            Self::Segment { .. } => false,
        }
    }

    /// Returns `true` if this hoverable is a segment of `curve`.
    #[must_use]
    pub fn belongs_to_curve(self, curve: CurveId) -> bool {
        matches!(self, Self::Segment { parent, .. } if parent == curve)
    }
}

/// A hover transition, dispatched once per change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverDelta {
    pub previous: Option<Hoverable>,
    pub current: Option<Hoverable>,
}
