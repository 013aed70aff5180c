//! Core library for the `weather-etl` pipeline.
//!
//! This crate defines:
//! - The domain model (coordinates, measurement fields, records, outcomes)
//! - Collaborator clients for geocoding and current weather conditions
//! - The SQLite storage gateway
//! - The per-location orchestration with failure isolation
//!
//! It is used by `etl-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod record;
pub mod store;

pub use config::Config;
pub use error::PipelineError;
pub use geocode::{Geocoder, NominatimGeocoder};
pub use model::{Coordinate, CurrentField, Measurement, Outcome, RawSnapshot};
pub use pipeline::{LocationResolver, Pipeline, SnapshotFetcher};
pub use provider::{WeatherProvider, openmeteo::OpenMeteoProvider};
pub use record::WeatherRecord;
pub use store::WeatherStore;
