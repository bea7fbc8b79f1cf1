use indexmap::IndexSet;

use crate::selection::SelectionState;
use crate::topology::SolidId;

/// The solids to outline: every selected solid, then every solid owning a
/// selected face or edge.
///
/// A snapshot of the active selection taken when it was requested; it holds
/// no borrow, so the selection may change while it is alive. Iterating is
/// lazy and may be repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineSelection {
    solids: IndexSet<SolidId>,
    owners: Vec<SolidId>,
}

impl OutlineSelection {
    pub(crate) fn new(state: &SelectionState) -> Self {
        Self {
            solids: state.selected_solids().clone(),
            owners: state.selected_children().owners().copied().collect(),
        }
    }

    pub fn iter(&self) -> OutlineIter<'_> {
        OutlineIter {
            solids: self.solids.iter(),
            owners: self.owners.iter(),
            selected: &self.solids,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<SolidId> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a OutlineSelection {
    type Item = SolidId;
    type IntoIter = OutlineIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`OutlineSelection`].
pub struct OutlineIter<'a> {
    solids: indexmap::set::Iter<'a, SolidId>,
    owners: std::slice::Iter<'a, SolidId>,
    selected: &'a IndexSet<SolidId>,
}

impl Iterator for OutlineIter<'_> {
    type Item = SolidId;

    fn next(&mut self) -> Option<SolidId> {
        if let Some(solid) = self.solids.next() {
            return Some(*solid);
        }
        let selected = self.selected;
        self.owners
            .by_ref()
            .find(|owner| !selected.contains(*owner))
            .copied()
    }
}
