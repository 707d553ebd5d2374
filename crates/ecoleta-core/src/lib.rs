pub mod app_config;
pub mod config;
pub mod form;
pub mod geo;
pub mod map;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use form::{CreatePointForm, FormData, FormField, ItemTile, SelectedItems};
pub use geo::{CityLoad, GeoSelection, SelectOption};
pub use map::MapView;
pub use types::{Coordinate, Item, PointPayload, Route, SENTINEL};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("invalid coordinate \"{input}\": {reason}")]
    InvalidCoordinate { input: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
