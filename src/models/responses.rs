use serde::{Deserialize, Serialize};
use crate::models::domain::{GeoPoint, ScoreBreakdown, ScoredStop, Stop};

/// Public view of a stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSummary {
    pub id: u64,
    pub name: String,
    pub location: GeoPoint,
}

impl From<&Stop> for StopSummary {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id,
            name: stop.name.clone(),
            location: stop.location,
        }
    }
}

/// Response for the next-stop endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextStopResponse {
    #[serde(rename = "nextStop")]
    pub next_stop: StopSummary,
}

/// One entry of the ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStop {
    pub stop: StopSummary,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl From<&ScoredStop<'_>> for RankedStop {
    fn from(scored: &ScoredStop<'_>) -> Self {
        Self {
            stop: StopSummary::from(scored.stop),
            score: scored.score(),
            breakdown: scored.breakdown,
        }
    }
}

/// Response for the ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    pub ranking: Vec<RankedStop>,
}

/// Response for the catalog listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopsResponse {
    pub stops: Vec<Stop>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub stops: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
