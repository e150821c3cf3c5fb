//! Fixed color encodings shared by both chart engines.
//!
//! The categorical maps and the 10-stop sequential ramp are part of the
//! visual contract: hosts may restyle axes and chrome, but mark colors come
//! from here so linked views stay comparable.

use crate::core::interval::between;
use crate::core::record::{FunctioningDay, Holiday, Season};
use crate::render::Color;

/// Neutral stroke/fill for unselected or uncategorized marks.
pub const NEUTRAL: Color = Color::rgb(0.0, 0.0, 0.0);

#[must_use]
pub fn season_color(season: Season) -> Color {
    match season {
        Season::Summer => Color::from_rgb8(0xca, 0x00, 0x20),
        Season::Autumn => Color::from_rgb8(0xf4, 0xa5, 0x82),
        Season::Winter => Color::from_rgb8(0x92, 0xc5, 0xde),
        Season::Spring => Color::from_rgb8(0x05, 0x71, 0xb0),
    }
}

#[must_use]
pub fn holiday_color(holiday: Holiday) -> Color {
    match holiday {
        Holiday::Holiday => Color::from_rgb8(0xfd, 0xe7, 0x25),
        Holiday::NoHoliday => Color::from_rgb8(0x44, 0x01, 0x54),
    }
}

/// Holidays are rare; they get a strictly larger dot.
#[must_use]
pub fn holiday_radius_factor(holiday: Holiday) -> f64 {
    match holiday {
        Holiday::Holiday => 1.7,
        Holiday::NoHoliday => 1.0,
    }
}

#[must_use]
pub fn functioning_day_color(functioning_day: FunctioningDay) -> Color {
    match functioning_day {
        FunctioningDay::No => Color::from_rgb8(0xff, 0x80, 0x00),
        FunctioningDay::Yes => Color::from_rgb8(0x21, 0x9b, 0x9d),
    }
}

/// Non-functioning days are rare; they get a strictly larger dot.
#[must_use]
pub fn functioning_day_radius_factor(functioning_day: FunctioningDay) -> f64 {
    match functioning_day {
        FunctioningDay::No => 1.7,
        FunctioningDay::Yes => 1.0,
    }
}

/// Number of stops in the sequential highlight ramp.
pub const SEQUENTIAL_STOP_COUNT: usize = 10;

/// Viridis ramp used to color selected parallel-plot segments.
pub const SEQUENTIAL_STOPS: [Color; SEQUENTIAL_STOP_COUNT] = [
    Color::from_rgb8(0x44, 0x01, 0x54),
    Color::from_rgb8(0x48, 0x28, 0x78),
    Color::from_rgb8(0x3e, 0x49, 0x89),
    Color::from_rgb8(0x31, 0x68, 0x8e),
    Color::from_rgb8(0x26, 0x82, 0x8e),
    Color::from_rgb8(0x1f, 0x9e, 0x89),
    Color::from_rgb8(0x35, 0xb7, 0x79),
    Color::from_rgb8(0x6e, 0xce, 0x58),
    Color::from_rgb8(0xb5, 0xde, 0x2b),
    Color::from_rgb8(0xfd, 0xe7, 0x25),
];

/// `count` evenly spaced values from `start` to `end`, both included.
///
/// The bounds may arrive in either order; the spacing simply runs downhill
/// when `end < start`.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Piecewise-linear color scale over the sequential ramp.
///
/// Breakpoints are `SEQUENTIAL_STOP_COUNT` linearly spaced values between the
/// requested bounds; a value falling in segment `i` interpolates between
/// stops `i` and `i + 1`. Values outside the bounds clamp to the nearest end.
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialScale {
    breakpoints: [f64; SEQUENTIAL_STOP_COUNT],
}

impl SequentialScale {
    #[must_use]
    pub fn between(start: f64, end: f64) -> Self {
        let spaced = linspace(start, end, SEQUENTIAL_STOP_COUNT);
        let mut breakpoints = [0.0; SEQUENTIAL_STOP_COUNT];
        breakpoints.copy_from_slice(&spaced);
        Self { breakpoints }
    }

    #[must_use]
    pub fn color_for(&self, value: f64) -> Color {
        let first = self.breakpoints[0];
        let last = self.breakpoints[SEQUENTIAL_STOP_COUNT - 1];
        if first == last {
            return SEQUENTIAL_STOPS[0];
        }

        for i in 0..SEQUENTIAL_STOP_COUNT - 1 {
            let lo = self.breakpoints[i];
            let hi = self.breakpoints[i + 1];
            if between(value, lo, hi) {
                let t = if hi == lo { 0.0 } else { (value - lo) / (hi - lo) };
                return SEQUENTIAL_STOPS[i].lerp(SEQUENTIAL_STOPS[i + 1], t);
            }
        }

        // Outside the ramp: clamp toward the closer end.
        if (value - first).abs() <= (value - last).abs() {
            SEQUENTIAL_STOPS[0]
        } else {
            SEQUENTIAL_STOPS[SEQUENTIAL_STOP_COUNT - 1]
        }
    }
}
