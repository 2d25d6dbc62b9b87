// Core algorithm exports
pub mod demand;
pub mod distance;
pub mod scoring;
pub mod selector;

pub use demand::{demand_at, is_peak_hour, PEAK_MULTIPLIER};
pub use distance::haversine_distance;
pub use scoring::{compute_stats, normalize, raw_factors, score, score_breakdown};
pub use selector::{rank_stops, select_best_stop, select_for_context, SelectError};
