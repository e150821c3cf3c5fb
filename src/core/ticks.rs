use chrono::DateTime;

/// Picks a rounded tick step (1/2/5 times a power of ten) and returns the
/// ticks covering the domain, ordered in domain direction.
///
/// A reversed domain yields descending ticks, matching an inverted axis.
#[must_use]
pub fn linear_ticks(domain_start: f64, domain_end: f64, target_count: usize) -> Vec<f64> {
    if target_count == 0 || !domain_start.is_finite() || !domain_end.is_finite() {
        return Vec::new();
    }
    if domain_start == domain_end {
        return vec![domain_start];
    }

    let lo = domain_start.min(domain_end);
    let hi = domain_start.max(domain_end);
    let raw_step = (hi - lo) / target_count as f64;
    let magnitude = 10_f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let step = if residual >= 5.0 {
        10.0 * magnitude
    } else if residual >= 2.0 {
        5.0 * magnitude
    } else if residual >= 1.0 {
        2.0 * magnitude
    } else {
        magnitude
    };

    let first = (lo / step).ceil() * step;
    let mut ticks = Vec::new();
    let mut tick = first;
    while tick <= hi + step * 1e-9 {
        ticks.push(tick);
        tick += step;
    }

    if domain_start > domain_end {
        ticks.reverse();
    }
    ticks
}

/// Formats one tick value for display.
///
/// Date axes treat the value as unix seconds and render `dd-mm-YYYY`; numeric
/// axes drop the fraction when it is not significant.
#[must_use]
pub fn format_tick(value: f64, is_date: bool) -> String {
    if is_date {
        return DateTime::from_timestamp(value as i64, 0)
            .map(|moment| moment.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|| value.to_string());
    }

    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
