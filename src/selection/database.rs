use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use super::manager::SelectionManager;
use super::memento::SelectionMemento;
use super::pick::PickHit;
use super::resolver::Resolution;
use super::state::{PendingNotifications, SelectionState};
use super::{Hoverable, Selectable, SelectionModes};
use crate::error::{Result, SelectionError};
use crate::materials::MaterialDatabase;
use crate::signals::{EditorSignals, StateSignals, Subscription};
use crate::topology::{GeometryDatabase, SpaceItem};

struct Inner {
    live: SelectionState,
    temporary: Option<SelectionState>,
    manager: SelectionManager,
    modes: SelectionModes,
}

impl Inner {
    fn current(&self) -> &SelectionState {
        self.temporary.as_ref().unwrap_or(&self.live)
    }

    fn parts_mut(&mut self) -> (&SelectionManager, &mut SelectionState, SelectionModes) {
        let state = self.temporary.as_mut().unwrap_or(&mut self.live);
        (&self.manager, state, self.modes)
    }

    fn take_pending(&mut self) -> Vec<PendingNotifications> {
        let mut pending = vec![self.live.take_pending()];
        pending.extend(self.temporary.as_mut().map(SelectionState::take_pending));
        pending
    }
}

struct Shared {
    inner: RefCell<Inner>,
    removals: RefCell<Vec<SpaceItem>>,
}

impl Shared {
    /// Applies queued removals to every state, unless the selection is
    /// borrowed further up the stack. The last release applies them.
    fn apply_removals(&self) {
        if self.removals.borrow().is_empty() {
            return;
        }
        let Ok(mut guard) = self.inner.try_borrow_mut() else {
            debug!("selection borrowed, removal queued");
            return;
        };
        let items = std::mem::take(&mut *self.removals.borrow_mut());
        let inner = &mut *guard;
        for item in items {
            inner.manager.delete(&mut inner.live, item);
            if let Some(temporary) = inner.temporary.as_mut() {
                inner.manager.delete(temporary, item);
            }
        }
        let pending = inner.take_pending();
        drop(guard);
        pending.into_iter().for_each(PendingNotifications::deliver);
    }
}

/// Owns the live selection and, while one is installed, a temporary
/// selection that shadows it.
///
/// Every routed operation acts on the *current* state: the temporary one if
/// installed, the live one otherwise. The live state is neither read nor
/// written by picking while a temporary is installed.
///
/// This is a cheap handle; clones share the same selection. Notifications
/// are delivered after the selection is released, so listeners may read it
/// or route further operations through the database.
#[derive(Clone)]
pub struct SelectionDatabase {
    shared: Rc<Shared>,
    _removals: Rc<Subscription>,
}

impl fmt::Debug for SelectionDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionDatabase")
            .field("temporary", &self.has_temporary())
            .finish_non_exhaustive()
    }
}

impl SelectionDatabase {
    /// Creates the database and subscribes it to `object_removed`.
    #[must_use]
    pub fn new(
        geometry: Rc<RefCell<GeometryDatabase>>,
        materials: Rc<dyn MaterialDatabase>,
        signals: &EditorSignals,
    ) -> Self {
        let mut live = SelectionState::new(signals.state_signals());
        live.set_deferred(true);
        let shared = Rc::new(Shared {
            inner: RefCell::new(Inner {
                live,
                temporary: None,
                manager: SelectionManager::new(geometry, materials),
                modes: SelectionModes::default(),
            }),
            removals: RefCell::new(Vec::new()),
        });

        let weak: Weak<Shared> = Rc::downgrade(&shared);
        let removals = signals.object_removed.add(move |item| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.removals.borrow_mut().push(*item);
            shared.apply_removals();
        });

        Self {
            shared,
            _removals: Rc::new(removals),
        }
    }

    /// A fresh, empty state with private channels. It has no effect until
    /// installed through
    /// [`RenderedSceneBuilder::use_temporary`](crate::scene::RenderedSceneBuilder::use_temporary).
    #[must_use]
    pub fn make_temporary(&self) -> SelectionState {
        SelectionState::new(StateSignals::default())
    }

    #[must_use]
    pub fn has_temporary(&self) -> bool {
        self.shared.inner.borrow().temporary.is_some()
    }

    pub(crate) fn install_temporary(
        &self,
        mut state: SelectionState,
    ) -> std::result::Result<(), SelectionError> {
        self.shared.apply_removals();
        let mut inner = self.shared.inner.borrow_mut();
        if inner.temporary.is_some() {
            return Err(SelectionError::TemporaryAlreadyActive);
        }
        state.set_deferred(true);
        inner.temporary = Some(state);
        debug!("temporary selection installed");
        Ok(())
    }

    pub(crate) fn take_temporary(&self) -> Option<SelectionState> {
        self.shared.apply_removals();
        let mut state = self.shared.inner.borrow_mut().temporary.take()?;
        state.set_deferred(false);
        debug!("temporary selection removed");
        Some(state)
    }

    /// Runs `op` on the current state, then delivers its notifications once
    /// the selection is released.
    fn route<R>(
        &self,
        op: impl FnOnce(&SelectionManager, &mut SelectionState, SelectionModes) -> R,
    ) -> R {
        self.shared.apply_removals();
        let (result, pending) = {
            let mut inner = self.shared.inner.borrow_mut();
            let (manager, state, modes) = inner.parts_mut();
            let result = op(manager, &mut *state, modes);
            (result, state.take_pending())
        };
        pending.deliver();
        self.shared.apply_removals();
        result
    }

    // --- Routed operations ---

    pub fn on_click(&self, hits: &[PickHit]) -> Resolution {
        self.route(|manager, state, modes| manager.on_click(state, hits, modes))
    }

    pub fn on_pointer_move(&self, hits: &[PickHit]) -> Resolution {
        self.route(|manager, state, modes| manager.on_pointer_move(state, hits, modes))
    }

    pub fn deselect_all(&self) -> usize {
        self.route(|manager, state, _| manager.deselect_all(state))
    }

    /// Applies a removal to the current state only. Removals announced on
    /// `object_removed` already reach every state.
    pub fn delete(&self, item: SpaceItem) -> usize {
        self.route(|manager, state, _| manager.delete(state, item))
    }

    /// Selects `target` in the current state after checking it against the
    /// geometry database. Returns whether the selection changed.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if `target` is not in the geometry database.
    pub fn select(&self, target: Selectable) -> Result<bool> {
        self.route(|manager, state, _| manager.select(state, target))
    }

    #[must_use]
    pub fn save_to_memento(&self) -> SelectionMemento {
        self.shared.apply_removals();
        let inner = self.shared.inner.borrow();
        inner.manager.save_to_memento(inner.current())
    }

    pub fn restore_from_memento(&self, memento: &SelectionMemento) {
        self.route(|manager, state, _| manager.restore_from_memento(state, memento));
    }

    // --- Configuration and access ---

    #[must_use]
    pub fn modes(&self) -> SelectionModes {
        self.shared.inner.borrow().modes
    }

    pub fn set_modes(&self, modes: SelectionModes) {
        self.shared.inner.borrow_mut().modes = modes;
    }

    /// The hovered entity of the current state.
    #[must_use]
    pub fn hovered(&self) -> Option<Hoverable> {
        self.with_current(SelectionState::hovered)
    }

    /// Runs `f` on the current state.
    pub fn with_current<R>(&self, f: impl FnOnce(&SelectionState) -> R) -> R {
        self.shared.apply_removals();
        let result = f(self.shared.inner.borrow().current());
        self.shared.apply_removals();
        result
    }

    /// Runs `f` on the current state with mutable access, e.g. to select an
    /// entity directly rather than through picking.
    pub fn with_current_mut<R>(&self, f: impl FnOnce(&mut SelectionState) -> R) -> R {
        self.route(|_, state, _| f(state))
    }

    /// Runs `f` on the live state, even while a temporary is installed.
    pub fn with_live<R>(&self, f: impl FnOnce(&SelectionState) -> R) -> R {
        self.shared.apply_removals();
        let result = f(&self.shared.inner.borrow().live);
        self.shared.apply_removals();
        result
    }
}
