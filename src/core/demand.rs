use std::ops::RangeInclusive;

use crate::models::{Stop, TimeContext};

/// Demand multiplier applied during rush hours
pub const PEAK_MULTIPLIER: f64 = 1.5;

/// Morning and evening rush windows, inclusive on both ends
const PEAK_HOURS: [RangeInclusive<u32>; 2] = [8..=10, 17..=20];

#[inline]
pub fn is_peak_hour(hour: u32) -> bool {
    PEAK_HOURS.iter().any(|window| window.contains(&hour))
}

/// Expected demand at a stop for the given time context
///
/// Picks the weekend or weekday base and scales it by the peak multiplier.
#[inline]
pub fn demand_at(stop: &Stop, ctx: &TimeContext) -> f64 {
    let base = if ctx.is_weekend {
        stop.demand.weekend
    } else {
        stop.demand.weekday
    };

    let multiplier = if is_peak_hour(ctx.hour_of_day) { PEAK_MULTIPLIER } else { 1.0 };

    base * multiplier
}
