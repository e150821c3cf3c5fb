//! Brush state machines.
//!
//! Brushes live in pixel space; the engines inverse-scale their extents into
//! data space before anything downstream sees them. A brush with a collapsed
//! extent is never active: the gesture reads as "clear".

use serde::{Deserialize, Serialize};

/// Dragged rectangle of a 2D brush, in pixel coordinates.
///
/// Corners may arrive in any order; membership tests downstream are
/// order-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A rectangle with zero width or zero height selects nothing.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }
}

/// Dragged extent of a 1D brush along its axis, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSpan {
    pub start: f64,
    pub end: f64,
}

impl BrushSpan {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }
}

/// Two-dimensional rectangular brush owned by the scatterplot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Brush2D {
    selection: Option<BrushRect>,
    handles_visible: bool,
}

impl Brush2D {
    /// Records an ongoing drag. Returns the effective selection: `None` when
    /// the extent collapsed and the brush reads as cleared.
    pub fn drag(&mut self, rect: BrushRect) -> Option<BrushRect> {
        if rect.is_degenerate() {
            self.selection = None;
            self.handles_visible = false;
            return None;
        }
        self.selection = Some(rect);
        self.handles_visible = true;
        Some(rect)
    }

    /// Hides the drag handles without forgetting the selection; a full
    /// re-render implies the axes changed and the handles would mislead.
    pub fn hide_handles(&mut self) {
        self.handles_visible = false;
    }

    /// Drops both the selection and the handles.
    pub fn clear(&mut self) {
        self.selection = None;
        self.handles_visible = false;
    }

    #[must_use]
    pub fn selection(self) -> Option<BrushRect> {
        self.selection
    }

    #[must_use]
    pub fn handles_visible(self) -> bool {
        self.handles_visible
    }
}

/// One-dimensional horizontal brush owned by a parallel-plot axis band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Brush1D {
    selection: Option<BrushSpan>,
    active: bool,
    handles_visible: bool,
}

impl Brush1D {
    /// Records an ongoing drag. The brush is active exactly while its extent
    /// is non-degenerate; a collapsed extent deactivates it on the spot.
    pub fn drag(&mut self, span: BrushSpan) -> Option<BrushSpan> {
        if span.is_degenerate() {
            self.deactivate();
            return None;
        }
        self.selection = Some(span);
        self.active = true;
        self.handles_visible = true;
        Some(span)
    }

    /// Deactivates the brush and hides its handles; the coupling rule then
    /// treats this axis as pass-through.
    pub fn deactivate(&mut self) {
        self.selection = None;
        self.active = false;
        self.handles_visible = false;
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.active
    }

    #[must_use]
    pub fn selection(self) -> Option<BrushSpan> {
        self.selection
    }

    #[must_use]
    pub fn handles_visible(self) -> bool {
        self.handles_visible
    }
}
