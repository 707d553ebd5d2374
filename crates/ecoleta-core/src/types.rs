//! Shared domain types for the collection-point registration flow.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Placeholder value meaning "nothing selected yet" in the UF and city dropdowns.
pub const SENTINEL: &str = "0";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
    pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lng"` (whitespace around either number is ignored).
impl FromStr for Coordinate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidCoordinate {
            input: s.to_owned(),
            reason: reason.to_owned(),
        };

        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| invalid("expected \"lat,lng\""))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(&format!("latitude: {e}")))?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(&format!("longitude: {e}")))?;

        if !Self::LATITUDE_RANGE.contains(&latitude) {
            return Err(invalid("latitude out of range"));
        }
        if !Self::LONGITUDE_RANGE.contains(&longitude) {
            return Err(invalid("longitude out of range"));
        }

        Ok(Self::new(latitude, longitude))
    }
}

/// A recyclable-item category as served by the backend's `/items` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub title: String,
    pub image_url: String,
}

/// Body of `POST /points`. Field order matches the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub uf: String,
    pub city: String,
    pub lat: f64,
    pub long: f64,
    pub items: Vec<u32>,
}

/// Client-side navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
