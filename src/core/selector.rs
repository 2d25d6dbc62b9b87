use chrono::{DateTime, TimeZone};
use thiserror::Error;

use crate::models::{GeoPoint, ScoredStop, Stop, TimeContext};
use crate::core::scoring::{compute_stats, score_breakdown};

/// Reasons the selector can fail to produce a stop
///
/// Both are deterministic for a given input; retrying does not help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no stops configured")]
    EmptyCatalog,

    #[error("no stop produced a comparable score")]
    NoCandidate,
}

/// Pick the best stop for a driver at a given moment
///
/// The time context is taken from the timestamp's own zone.
pub fn select_best_stop<'a, Tz: TimeZone>(
    catalog: &'a [Stop],
    driver: GeoPoint,
    timestamp: &DateTime<Tz>,
) -> Result<&'a Stop, SelectError> {
    select_for_context(catalog, driver, &TimeContext::from_datetime(timestamp))
}

/// Pick the best stop for an already resolved time context
///
/// Stops are scanned in catalog order and only a strictly greater score
/// replaces the current best, so the earliest stop wins ties.
pub fn select_for_context<'a>(
    catalog: &'a [Stop],
    driver: GeoPoint,
    ctx: &TimeContext,
) -> Result<&'a Stop, SelectError> {
    if catalog.is_empty() {
        return Err(SelectError::EmptyCatalog);
    }

    let stats = compute_stats(catalog, driver, ctx);

    let mut best: Option<&Stop> = None;
    let mut best_score = f64::NEG_INFINITY;

    for stop in catalog {
        let score = score_breakdown(stop, driver, ctx, &stats).total();
        tracing::debug!("Stop {} ({}) scored {:.4}", stop.id, stop.name, score);

        if score > best_score {
            best_score = score;
            best = Some(stop);
        }
    }

    best.ok_or(SelectError::NoCandidate)
}

/// Score every stop and sort by score, best first
///
/// The sort is stable, so stops with equal scores keep catalog order and the
/// first entry agrees with [`select_for_context`].
pub fn rank_stops<'a>(catalog: &'a [Stop], driver: GeoPoint, ctx: &TimeContext) -> Vec<ScoredStop<'a>> {
    let stats = compute_stats(catalog, driver, ctx);

    let mut ranking: Vec<ScoredStop<'a>> = catalog
        .iter()
        .map(|stop| ScoredStop {
            stop,
            breakdown: score_breakdown(stop, driver, ctx, &stats),
        })
        .collect();

    // NaN scores sink to the bottom
    ranking.sort_by(|a, b| match (a.score().is_nan(), b.score().is_nan()) {
        (false, false) => b
            .score()
            .partial_cmp(&a.score())
            .unwrap_or(std::cmp::Ordering::Equal),
        (nan_a, nan_b) => nan_a.cmp(&nan_b),
    });

    ranking
}
