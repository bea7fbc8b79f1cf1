mod outline;
mod temporary;

pub use outline::{OutlineIter, OutlineSelection};
pub use temporary::TemporaryHandle;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SelectionError};
use crate::selection::{HoverDelta, Hoverable, SelectionDatabase, SelectionState};
use crate::signals::{EditorSignals, Signal, Subscription};

/// Derives what the renderer highlights from the current selection.
///
/// The outline is computed on demand from whichever state is current. The
/// hover highlight follows the editor's `hover_delta` channel, which a
/// temporary selection is bridged onto while it is bound. Swapping the
/// current state announces the resulting hover change on that channel too.
pub struct RenderedSceneBuilder {
    selection: SelectionDatabase,
    signals: EditorSignals,
    highlight: Rc<Cell<Option<Hoverable>>>,
    _hover: Subscription,
}

impl fmt::Debug for RenderedSceneBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedSceneBuilder")
            .field("hovered", &self.highlight.get())
            .finish_non_exhaustive()
    }
}

impl RenderedSceneBuilder {
    #[must_use]
    pub fn new(selection: SelectionDatabase, signals: EditorSignals) -> Self {
        let highlight = Rc::new(Cell::new(selection.hovered()));
        let sink = Rc::clone(&highlight);
        let hover = signals
            .hover_delta
            .add(move |delta| sink.set(delta.current));

        Self {
            selection,
            signals,
            highlight,
            _hover: hover,
        }
    }

    /// Solids to outline in the current selection.
    #[must_use]
    pub fn outline_selection(&self) -> OutlineSelection {
        self.selection.with_current(OutlineSelection::new)
    }

    /// The entity currently rendered with the hover highlight.
    #[must_use]
    pub fn hovered(&self) -> Option<Hoverable> {
        self.highlight.get()
    }

    /// Makes `state` the current selection until the returned handle is
    /// disposed, forwarding its hover changes onto the editor channel.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::TemporaryAlreadyActive`] if a temporary
    /// selection is already bound; `state` is dropped in that case.
    pub fn use_temporary(&self, state: SelectionState) -> Result<TemporaryHandle> {
        if self.selection.has_temporary() {
            return Err(SelectionError::TemporaryAlreadyActive.into());
        }

        let own_channel = &state.signals().hover_delta;
        let bridge = if own_channel.same_channel(&self.signals.hover_delta) {
            None
        } else {
            let editor = self.signals.hover_delta.clone();
            Some(own_channel.add(move |delta| editor.dispatch(delta)))
        };
        let hovered = state.hovered();

        self.selection.install_temporary(state)?;
        swap_highlight(&self.highlight, &self.signals.hover_delta, hovered);

        Ok(TemporaryHandle::new(
            self.selection.clone(),
            Rc::clone(&self.highlight),
            self.signals.hover_delta.clone(),
            bridge,
        ))
    }
}

/// Points the rendered hover at `current`, announcing the change.
fn swap_highlight(
    highlight: &Cell<Option<Hoverable>>,
    channel: &Signal<HoverDelta>,
    current: Option<Hoverable>,
) {
    let previous = highlight.replace(current);
    if previous != current {
        channel.dispatch(&HoverDelta { previous, current });
    }
}
