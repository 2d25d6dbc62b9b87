// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{GeoPoint, DemandProfile, Stop, TimeContext, RawFactors, StatBounds, ScoreBreakdown, ScoredStop};
pub use requests::{NextStopRequest, LocationPayload, parse_timestamp};
pub use responses::{StopSummary, NextStopResponse, RankedStop, RankingResponse, StopsResponse, HealthResponse, ErrorResponse};
