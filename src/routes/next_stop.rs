use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, FixedOffset};
use validator::Validate;

use crate::core::{rank_stops, select_best_stop};
use crate::models::{
    GeoPoint, HealthResponse, NextStopRequest, NextStopResponse, RankedStop, RankingResponse,
    StopSummary, StopsResponse, TimeContext, parse_timestamp,
};
use crate::routes::errors::ApiError;
use crate::services::Catalog;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    /// Offset for timestamps sent without one
    pub default_offset: FixedOffset,
}

/// Configure all next-stop routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/stops", web::get().to(list_stops))
        .route("/next-stop", web::post().to(next_stop))
        .route("/next-stop/ranking", web::post().to(ranking));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        stops: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// List the configured catalog in its fixed order
async fn list_stops(state: web::Data<AppState>) -> impl Responder {
    let stops = state.catalog.to_vec();
    HttpResponse::Ok().json(StopsResponse {
        count: stops.len(),
        stops,
    })
}

/// Next stop endpoint
///
/// POST /next-stop
///
/// Request body:
/// ```json
/// {
///   "currentLocation": { "latitude": 12.9716, "longitude": 77.5946 },
///   "currentTime": "2024-01-15T09:00:00+05:30"
/// }
/// ```
async fn next_stop(
    state: web::Data<AppState>,
    req: web::Json<NextStopRequest>,
) -> Result<HttpResponse, ApiError> {
    let (driver, timestamp) = resolve_request(&req, state.default_offset)?;

    let best = select_best_stop(&state.catalog, driver, &timestamp).map_err(|e| {
        tracing::warn!("No stop selected for {:?} at {}: {}", driver, timestamp, e);
        e
    })?;

    tracing::info!(
        "Selected stop {} ({}) for driver at ({}, {}) at {}",
        best.id,
        best.name,
        driver.latitude,
        driver.longitude,
        timestamp
    );

    Ok(HttpResponse::Ok().json(NextStopResponse {
        next_stop: StopSummary::from(best),
    }))
}

/// Ranking endpoint
///
/// POST /next-stop/ranking
///
/// Same body as `/next-stop`; returns every stop with its score breakdown,
/// best first.
async fn ranking(
    state: web::Data<AppState>,
    req: web::Json<NextStopRequest>,
) -> Result<HttpResponse, ApiError> {
    let (driver, timestamp) = resolve_request(&req, state.default_offset)?;
    let ctx = TimeContext::from_datetime(&timestamp);

    let ranking: Vec<RankedStop> = rank_stops(&state.catalog, driver, &ctx)
        .iter()
        .map(RankedStop::from)
        .collect();

    tracing::debug!("Ranked {} stops for driver at {:?}", ranking.len(), driver);

    Ok(HttpResponse::Ok().json(RankingResponse { ranking }))
}

/// Validate the request body and turn it into engine inputs
fn resolve_request(
    req: &NextStopRequest,
    default_offset: FixedOffset,
) -> Result<(GeoPoint, DateTime<FixedOffset>), ApiError> {
    let location = req.current_location.as_ref().ok_or_else(|| {
        ApiError::InvalidLocation("currentLocation must be an object with latitude and longitude".to_string())
    })?;

    if let Err(errors) = location.validate() {
        tracing::info!("Rejected location {:?}: {}", location, errors);
        return Err(ApiError::InvalidLocation(errors.to_string()));
    }

    let driver = location.to_point().ok_or_else(|| {
        ApiError::InvalidLocation("latitude and longitude are required".to_string())
    })?;

    let raw_time = req.current_time.as_deref().ok_or_else(|| {
        ApiError::InvalidTimestamp("currentTime must be a timestamp string".to_string())
    })?;

    let timestamp = parse_timestamp(raw_time, default_offset).ok_or_else(|| {
        tracing::info!("Rejected timestamp {:?}", raw_time);
        ApiError::InvalidTimestamp(format!("cannot parse {:?}", raw_time))
    })?;

    Ok((driver, timestamp))
}
