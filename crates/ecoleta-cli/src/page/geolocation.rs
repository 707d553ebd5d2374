//! Device position lookup for centering the map.

use std::future::Future;

use ecoleta_core::Coordinate;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("position access denied")]
    Denied,
}

/// A one-shot "where is the device right now" query.
pub trait PositionProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Answers every query with the same result. The CLI has no sensor to read,
/// so the position comes from flags or `ECOLETA_DEVICE_POSITION`.
#[derive(Debug, Clone, Copy)]
pub struct StaticPosition {
    position: Option<Coordinate>,
}

impl StaticPosition {
    #[must_use]
    pub fn known(position: Coordinate) -> Self {
        Self {
            position: Some(position),
        }
    }

    #[must_use]
    pub fn denied() -> Self {
        Self { position: None }
    }
}

impl PositionProvider for StaticPosition {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.position.ok_or(GeolocationError::Denied)
    }
}
