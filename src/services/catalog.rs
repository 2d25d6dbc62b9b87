use std::collections::HashSet;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{DemandProfile, GeoPoint, Stop};

/// Errors that can occur while loading the stop catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no stops")]
    Empty,

    #[error("duplicate stop id {0}")]
    DuplicateId(u64),

    #[error("stop {id} has a non-finite {field}")]
    NonFiniteValue { id: u64, field: &'static str },

    #[error("stop {id} has a negative {field}")]
    NegativeValue { id: u64, field: &'static str },
}

/// Immutable, validated stop catalog
///
/// Built once at startup and shared read-only between workers. Cloning only
/// bumps a reference count.
#[derive(Debug, Clone)]
pub struct Catalog {
    stops: Arc<[Stop]>,
}

impl Catalog {
    /// Validate and wrap a list of stops, keeping their order
    pub fn new(stops: Vec<Stop>) -> Result<Self, CatalogError> {
        validate(&stops)?;
        Ok(Self { stops: stops.into() })
    }

    /// Parse a JSON array of stops
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let stops: Vec<Stop> = serde_json::from_str(json)?;
        Self::new(stops)
    }

    /// Load a JSON catalog file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise use the built-in sample set
    pub fn from_settings(path: Option<&str>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::sample()),
        }
    }

    /// The built-in ten-stop sample catalog
    pub fn sample() -> Self {
        Self {
            stops: sample_stops().into(),
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }
}

impl Deref for Catalog {
    type Target = [Stop];

    fn deref(&self) -> &[Stop] {
        &self.stops
    }
}

/// Reject catalogs the scoring engine cannot rank meaningfully
///
/// Non-finite values would turn into NaN scores and silently corrupt the
/// ranking of every other stop.
fn validate(stops: &[Stop]) -> Result<(), CatalogError> {
    if stops.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(stops.len());
    for stop in stops {
        if !seen.insert(stop.id) {
            return Err(CatalogError::DuplicateId(stop.id));
        }

        let fields = [
            ("latitude", stop.location.latitude),
            ("longitude", stop.location.longitude),
            ("weekday demand", stop.demand.weekday),
            ("weekend demand", stop.demand.weekend),
            ("supply", stop.supply),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(CatalogError::NonFiniteValue { id: stop.id, field });
            }
        }

        for &(field, value) in &fields[2..] {
            if value < 0.0 {
                return Err(CatalogError::NegativeValue { id: stop.id, field });
            }
        }
    }

    Ok(())
}

fn stop(id: u64, name: &str, lat: f64, lon: f64, weekday: f64, weekend: f64, supply: f64) -> Stop {
    Stop {
        id,
        name: name.to_string(),
        location: GeoPoint::new(lat, lon),
        demand: DemandProfile { weekday, weekend },
        supply,
    }
}

fn sample_stops() -> Vec<Stop> {
    vec![
        stop(1, "Stop A", 12.9716, 77.5946, 50.0, 80.0, 5.0),
        stop(2, "Stop B", 12.9352, 77.6245, 70.0, 100.0, 2.0),
        stop(3, "Stop C", 12.9141, 77.6109, 60.0, 90.0, 4.0),
        stop(4, "Stop D", 12.9784, 77.6408, 80.0, 110.0, 3.0),
        stop(5, "Stop E", 12.9857, 77.6058, 55.0, 75.0, 6.0),
        stop(6, "Stop F", 12.9304, 77.6783, 65.0, 95.0, 1.0),
        stop(7, "Stop G", 12.9250, 77.5897, 40.0, 60.0, 7.0),
        stop(8, "Stop H", 12.9279, 77.6271, 75.0, 120.0, 2.0),
        stop(9, "Stop I", 12.9568, 77.7011, 90.0, 130.0, 4.0),
        stop(10, "Stop J", 12.9165, 77.6001, 45.0, 70.0, 5.0),
    ]
}
