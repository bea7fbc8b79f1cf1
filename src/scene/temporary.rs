use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::swap_highlight;
use crate::selection::{HoverDelta, Hoverable, SelectionDatabase, SelectionState};
use crate::signals::{Signal, Subscription};

/// Scoped binding of a temporary selection, returned by
/// [`RenderedSceneBuilder::use_temporary`](super::RenderedSceneBuilder::use_temporary).
///
/// Disposing it (explicitly or by dropping) stops hover forwarding, then
/// makes the live selection current again and announces the live hover. Nothing is committed: whatever
/// was selected in the temporary state is handed back and can be discarded.
pub struct TemporaryHandle {
    selection: SelectionDatabase,
    highlight: Rc<Cell<Option<Hoverable>>>,
    hover: Signal<HoverDelta>,
    bridge: Option<Subscription>,
    disposed: bool,
}

impl TemporaryHandle {
    pub(super) fn new(
        selection: SelectionDatabase,
        highlight: Rc<Cell<Option<Hoverable>>>,
        hover: Signal<HoverDelta>,
        bridge: Option<Subscription>,
    ) -> Self {
        Self {
            selection,
            highlight,
            hover,
            bridge,
            disposed: false,
        }
    }

    /// Unbinds the temporary selection and returns it. Later calls return
    /// `None` and change nothing.
    pub fn dispose(&mut self) -> Option<SelectionState> {
        if self.disposed {
            return None;
        }
        self.disposed = true;

        if let Some(mut bridge) = self.bridge.take() {
            bridge.dispose();
        }
        let temporary = self.selection.take_temporary();
        swap_highlight(&self.highlight, &self.hover, self.selection.hovered());
        debug!("temporary selection disposed");
        temporary
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for TemporaryHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for TemporaryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryHandle")
            .field("disposed", &self.disposed)
            .field("bridged", &self.bridge.is_some())
            .finish_non_exhaustive()
    }
}
