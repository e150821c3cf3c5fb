use serde::{Deserialize, Serialize};

/// Checks whether `value` lies between `bound_a` and `bound_b`, inclusive on
/// both ends and insensitive to bound order.
///
/// Inverted axes and upward brush drags routinely produce intervals whose
/// nominal minimum exceeds the maximum; membership must not care.
#[must_use]
pub fn between(value: f64, bound_a: f64, bound_b: f64) -> bool {
    (value >= bound_a && value <= bound_b) || (value >= bound_b && value <= bound_a)
}

/// Closed data-space interval between two bounds, in either order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        between(value, self.start, self.end)
    }

    /// An interval whose dragged extent collapsed to a single point selects
    /// nothing and deactivates the brush that produced it.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}
