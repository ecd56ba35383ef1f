//! "Near me" support.
//!
//! The query engine never asks for a position itself. Callers resolve one
//! through a [`Geolocator`] and pass it in as the query origin only when
//! the lookup succeeded.


use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Coordinate;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("timed out waiting for a location fix")]
    Timeout,
    #[error("position unavailable")]
    PositionUnavailable,
}

/// Source of the user's current position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinate, GeolocationError>;
}

/// Answers every lookup with the same outcome
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    outcome: Result<Coordinate, GeolocationError>,
}

impl FixedGeolocator {
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            outcome: Ok(coordinate),
        }
    }

    pub fn failing(reason: GeolocationError) -> Self {
        Self {
            outcome: Err(reason),
        }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        self.outcome
    }
}

/// Resolve the query origin. Failures mean "no distance filter".
pub async fn resolve_origin(geolocator: &dyn Geolocator) -> Option<Coordinate> {
    match geolocator.locate().await {
        Ok(coordinate) => {
            info!("📍 Using location {:.4}, {:.4}", coordinate.lat, coordinate.lng);
            Some(coordinate)
        }
        Err(GeolocationError::PermissionDenied) => {
            warn!("Location permission denied, searching without a radius");
            None
        }
        Err(reason) => {
            warn!("Unable to retrieve your location ({}), searching without a radius", reason);
            None
        }
    }
}
