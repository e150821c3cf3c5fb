use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Margins reserved around the drawable plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    #[must_use]
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Drawable region of a chart after margins are subtracted.
///
/// All mark coordinates produced by the engines are relative to this area's
/// origin; `offset_x`/`offset_y` translate them back into viewport space when
/// a frame is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PlotArea {
    pub fn from_viewport(viewport: Viewport, margin: Margin) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let horizontal = margin.left + margin.right;
        let vertical = margin.top + margin.bottom;
        if viewport.width <= horizontal || viewport.height <= vertical {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(Self {
            width: f64::from(viewport.width - horizontal),
            height: f64::from(viewport.height - vertical),
            offset_x: f64::from(margin.left),
            offset_y: f64::from(margin.top),
        })
    }
}
