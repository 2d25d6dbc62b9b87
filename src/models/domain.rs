use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Base demand counts for a stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    pub weekday: f64,
    pub weekend: f64,
}

/// A candidate stop in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: u64,
    pub name: String,
    pub location: GeoPoint,
    pub demand: DemandProfile,
    /// Number of resources currently available at the stop
    pub supply: f64,
}

/// Calendar facts the demand model cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeContext {
    pub is_weekend: bool,
    pub hour_of_day: u32,
}

impl TimeContext {
    pub fn new(is_weekend: bool, hour_of_day: u32) -> Self {
        Self { is_weekend, hour_of_day }
    }

    /// Derive the context from a timestamp, read in the timestamp's own zone.
    pub fn from_datetime<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Self {
        let is_weekend = matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun);
        Self {
            is_weekend,
            hour_of_day: timestamp.hour(),
        }
    }
}

/// Raw, un-normalized scoring factors for a single stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFactors {
    pub demand: f64,
    pub inverse_supply: f64,
    pub inverse_distance: f64,
}

/// Request-scoped min/max bounds used to normalize raw factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBounds {
    pub min_demand: f64,
    pub max_demand: f64,
    pub min_inverse_supply: f64,
    pub max_inverse_supply: f64,
    pub min_inverse_distance: f64,
    pub max_inverse_distance: f64,
}

impl StatBounds {
    /// Bounds before any stop has been observed
    pub fn empty() -> Self {
        Self {
            min_demand: f64::INFINITY,
            max_demand: f64::NEG_INFINITY,
            min_inverse_supply: f64::INFINITY,
            max_inverse_supply: f64::NEG_INFINITY,
            min_inverse_distance: f64::INFINITY,
            max_inverse_distance: f64::NEG_INFINITY,
        }
    }

    pub fn observe(&mut self, raw: &RawFactors) {
        self.min_demand = self.min_demand.min(raw.demand);
        self.max_demand = self.max_demand.max(raw.demand);
        self.min_inverse_supply = self.min_inverse_supply.min(raw.inverse_supply);
        self.max_inverse_supply = self.max_inverse_supply.max(raw.inverse_supply);
        self.min_inverse_distance = self.min_inverse_distance.min(raw.inverse_distance);
        self.max_inverse_distance = self.max_inverse_distance.max(raw.inverse_distance);
    }
}

/// Normalized score components, each in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub demand: f64,
    pub scarcity: f64,
    pub proximity: f64,
}

impl ScoreBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.demand + self.scarcity + self.proximity
    }
}

/// A stop paired with its score for one request
#[derive(Debug, Clone, Copy)]
pub struct ScoredStop<'a> {
    pub stop: &'a Stop,
    pub breakdown: ScoreBreakdown,
}

impl ScoredStop<'_> {
    pub fn score(&self) -> f64 {
        self.breakdown.total()
    }
}
