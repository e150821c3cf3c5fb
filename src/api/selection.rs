use serde::{Deserialize, Serialize};

use crate::core::{Attribute, Interval};

/// Which chart produced the driving selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOrigin {
    Scatter,
    Parallel,
}

impl SelectionOrigin {
    /// The chart on the receiving end of the link.
    #[must_use]
    pub fn counterpart(self) -> Self {
        match self {
            SelectionOrigin::Scatter => SelectionOrigin::Parallel,
            SelectionOrigin::Parallel => SelectionOrigin::Scatter,
        }
    }
}

/// A data-space interval tagged with the attribute it constrains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeInterval {
    pub attribute: Attribute,
    pub interval: Interval,
}

impl AttributeInterval {
    #[must_use]
    pub const fn new(attribute: Attribute, interval: Interval) -> Self {
        Self {
            attribute,
            interval,
        }
    }
}

/// One brush gesture's output, expressed entirely in data space.
///
/// Engines return these instead of invoking injected callbacks, so the
/// coordinator's routing stays a visible, testable unit and a linked restyle
/// can never be misread as a fresh gesture.
///
/// A cleared gesture (zero-extent drag, or the last active brush collapsing)
/// still reports full-domain intervals, but sets `cleared` so the receiving
/// chart returns to resting style instead of highlighting everything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub dim1: AttributeInterval,
    pub dim2: AttributeInterval,
    pub origin: SelectionOrigin,
    pub cleared: bool,
}

/// The single shared selection, exclusive between the two charts.
///
/// `revision` increases monotonically on every applied event; hosts polling
/// the state can use it to skip redundant restyles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    dim1: Option<AttributeInterval>,
    dim2: Option<AttributeInterval>,
    origin: Option<SelectionOrigin>,
    cleared: bool,
    revision: u64,
}

impl SelectionState {
    /// Replaces the driving selection wholesale. Whatever the other chart
    /// was driving is superseded, fields and origin together.
    pub fn apply(&mut self, event: SelectionEvent) {
        self.dim1 = Some(event.dim1);
        self.dim2 = Some(event.dim2);
        self.origin = Some(event.origin);
        self.cleared = event.cleared;
        self.revision += 1;
    }

    #[must_use]
    pub fn dim1(self) -> Option<AttributeInterval> {
        self.dim1
    }

    #[must_use]
    pub fn dim2(self) -> Option<AttributeInterval> {
        self.dim2
    }

    #[must_use]
    pub fn origin(self) -> Option<SelectionOrigin> {
        self.origin
    }

    /// Whether the driving gesture was a clear rather than a selection.
    #[must_use]
    pub fn cleared(self) -> bool {
        self.cleared
    }

    #[must_use]
    pub fn revision(self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.origin.is_none()
    }
}
