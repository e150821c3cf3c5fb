use tracing::debug;

use super::{SelectionEvent, SelectionState};

/// Mediates the shared selection between the two chart engines.
///
/// Exactly one chart drives the link at any moment: applying an event from
/// chart A supersedes chart B's pending selection entirely, origin included.
/// The dashboard then pushes the stored state into the counterpart engine's
/// `link_external_selection`, which never produces another event, so update
/// cycles cannot form.
#[derive(Debug, Default)]
pub struct LinkCoordinator {
    state: SelectionState,
}

impl LinkCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `event` as the driving selection and returns the updated state.
    pub fn apply(&mut self, event: SelectionEvent) -> SelectionState {
        self.state.apply(event);
        debug!(
            origin = ?event.origin,
            dim1 = ?event.dim1.attribute,
            dim2 = ?event.dim2.attribute,
            cleared = event.cleared,
            revision = self.state.revision(),
            "selection applied"
        );
        self.state
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }
}
