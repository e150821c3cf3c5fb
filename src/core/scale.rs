use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Linear mapping from a data domain onto a pixel range.
///
/// Either end may exceed the other: a reversed domain expresses an inverted
/// axis and a reversed range expresses a Y axis growing upward. Both
/// directions invert cleanly through `invert`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> PlotResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(PlotError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(PlotError::InvalidData(
                "scale range must be finite and non-degenerate".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn set_domain(&mut self, domain_start: f64, domain_end: f64) -> PlotResult<()> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(PlotError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        self.domain_start = domain_start;
        self.domain_end = domain_end;
        Ok(())
    }

    /// Maps a data-space value to a pixel coordinate.
    ///
    /// A constant attribute yields a degenerate domain; every value then maps
    /// to the middle of the range so the marks stay visible.
    #[must_use]
    pub fn scale(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return self.range_start + (self.range_end - self.range_start) / 2.0;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel coordinate back to a data-space value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}
