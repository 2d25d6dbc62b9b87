use crate::models::{GeoPoint, RawFactors, ScoreBreakdown, StatBounds, Stop, TimeContext};
use crate::core::{demand::demand_at, distance::haversine_distance};

/// Min-max normalize a value into `0.0..=1.0`
///
/// When every stop ties on a factor (`max == min`) the factor normalizes to 1
/// for all of them, so a uniform factor never penalizes a stop.
#[inline]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        1.0
    } else {
        (value - min) / (max - min)
    }
}

/// Compute the raw scoring factors of a stop relative to the driver
///
/// The `+ 1` offsets keep both inverses finite when supply or distance is 0.
#[inline]
pub fn raw_factors(stop: &Stop, driver: GeoPoint, ctx: &TimeContext) -> RawFactors {
    let distance = haversine_distance(driver, stop.location);

    RawFactors {
        demand: demand_at(stop, ctx),
        inverse_supply: 1.0 / (stop.supply + 1.0),
        inverse_distance: 1.0 / (distance + 1.0),
    }
}

/// Aggregate min/max bounds of every raw factor across the catalog
///
/// An empty catalog leaves the bounds at their infinite sentinels; callers
/// must reject it before scoring.
pub fn compute_stats(catalog: &[Stop], driver: GeoPoint, ctx: &TimeContext) -> StatBounds {
    catalog.iter().fold(StatBounds::empty(), |mut stats, stop| {
        stats.observe(&raw_factors(stop, driver, ctx));
        stats
    })
}

/// Normalized components of a stop's score
///
/// Scoring formula:
/// score = (
///     demand       # higher demand at this hour = higher
///   + scarcity     # fewer available resources = higher
///   + proximity    # closer to the driver = higher
/// )
/// Each component is min-max normalized against `stats`, giving a total in
/// `0.0..=3.0`.
pub fn score_breakdown(
    stop: &Stop,
    driver: GeoPoint,
    ctx: &TimeContext,
    stats: &StatBounds,
) -> ScoreBreakdown {
    let raw = raw_factors(stop, driver, ctx);

    ScoreBreakdown {
        demand: normalize(raw.demand, stats.min_demand, stats.max_demand),
        scarcity: normalize(raw.inverse_supply, stats.min_inverse_supply, stats.max_inverse_supply),
        proximity: normalize(
            raw.inverse_distance,
            stats.min_inverse_distance,
            stats.max_inverse_distance,
        ),
    }
}

/// Composite score of a stop, `0.0..=3.0`
#[inline]
pub fn score(stop: &Stop, driver: GeoPoint, ctx: &TimeContext, stats: &StatBounds) -> f64 {
    score_breakdown(stop, driver, ctx, stats).total()
}
