use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::GeoPoint;

/// Request to pick the next stop
///
/// Fields of the wrong JSON type deserialize to `None`, so the handler
/// reports them as an invalid location or time instead of a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextStopRequest {
    #[serde(
        alias = "current_location",
        rename = "currentLocation",
        default,
        deserialize_with = "location_or_none"
    )]
    pub current_location: Option<LocationPayload>,
    #[serde(
        alias = "current_time",
        rename = "currentTime",
        default,
        deserialize_with = "string_or_none"
    )]
    pub current_time: Option<String>,
}

/// Driver location as sent by the client
///
/// Non-numeric coordinates deserialize to `None` so they are reported as an
/// invalid location rather than a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationPayload {
    #[validate(required, range(min = -90.0, max = 90.0))]
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub latitude: Option<f64>,
    #[validate(required, range(min = -180.0, max = 180.0))]
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub longitude: Option<f64>,
}

impl LocationPayload {
    /// Coordinates as a point, once both are present
    pub fn to_point(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.latitude?, self.longitude?))
    }
}

fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|v| v.is_finite()))
}

fn location_or_none<'de, D>(deserializer: D) -> Result<Option<LocationPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }))
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a client timestamp
///
/// Timestamps carrying an offset keep it; naive ones are read in
/// `default_offset`. Returns `None` when no supported form matches.
pub fn parse_timestamp(raw: &str, default_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts);
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    default_offset.from_local_datetime(&naive).single()
}
