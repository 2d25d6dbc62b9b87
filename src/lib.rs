//! Next Stop - recommendation service for drivers
//!
//! This library scores a fixed catalog of stops on demand, supply scarcity and
//! proximity, and picks the best one for a driver's location and time.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, rank_stops, select_best_stop, select_for_context, SelectError};
pub use models::{GeoPoint, DemandProfile, Stop, TimeContext, StatBounds, NextStopRequest, NextStopResponse};
pub use services::{Catalog, CatalogError};
