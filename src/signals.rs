//! Notification channels injected into the selection components.
//!
//! Everything runs on the editor's event thread, so channels are `Rc` based
//! and dispatch synchronously in registration order.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::selection::{HoverDelta, Selectable};
use crate::topology::SpaceItem;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Slots<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
}

/// A fan-out notification channel.
///
/// Cloning a signal yields another handle to the same channel.
pub struct Signal<T> {
    slots: Rc<Slots<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            slots: Rc::new(Slots {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.slots.listeners.borrow().len())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    /// Creates a channel with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It stays registered as long as the returned
    /// [`Subscription`] is alive.
    pub fn add(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.slots.next_id.get();
        self.slots.next_id.set(id + 1);
        self.slots
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let slots: Weak<Slots<T>> = Rc::downgrade(&self.slots);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    slots.listeners.borrow_mut().retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Calls every registered listener with `value`.
    ///
    /// Listeners added or removed while dispatching take effect on the next
    /// dispatch.
    pub fn dispatch(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .slots
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(value);
        }
    }

    /// Number of currently registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.slots.listeners.borrow().len()
    }

    /// Returns `true` if both handles refer to the same channel.
    #[must_use]
    pub fn same_channel(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slots, &other.slots)
    }
}

/// Token keeping a listener registered.
///
/// Dropping or disposing it removes the listener.
#[must_use = "dropping a Subscription immediately removes its listener"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Removes the listener. Calling it again does nothing.
    pub fn dispose(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    /// Keeps the listener registered for the lifetime of the channel.
    pub fn detach(mut self) {
        self.remove = None;
    }

    /// Returns `true` until the subscription has been disposed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remove.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Channels a single [`SelectionState`](crate::selection::SelectionState)
/// dispatches on.
#[derive(Debug, Clone, Default)]
pub struct StateSignals {
    /// An entity entered one of the selection sets.
    pub selected: Signal<Selectable>,
    /// An entity left one of the selection sets.
    pub deselected: Signal<Selectable>,
    /// The hovered entity changed.
    pub hover_delta: Signal<HoverDelta>,
}

/// The editor-wide channels shared by every component.
#[derive(Debug, Clone, Default)]
pub struct EditorSignals {
    pub object_selected: Signal<Selectable>,
    pub object_deselected: Signal<Selectable>,
    pub hover_delta: Signal<HoverDelta>,
    /// Fired by the geometry database before an entity is removed.
    pub object_removed: Signal<SpaceItem>,
}

impl EditorSignals {
    /// Creates a fresh set of channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles onto the editor channels, for the live selection state.
    #[must_use]
    pub fn state_signals(&self) -> StateSignals {
        StateSignals {
            selected: self.object_selected.clone(),
            deselected: self.object_deselected.clone(),
            hover_delta: self.hover_delta.clone(),
        }
    }
}
