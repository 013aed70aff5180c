//! The extract-transform-load orchestration.
//!
//! One location is fully processed (resolve, fetch, normalize, append)
//! before the next begins. Failures are confined to the location that
//! caused them; only a schema failure aborts the run.

use anyhow::Context;

use crate::error::PipelineError;
use crate::geocode::Geocoder;
use crate::model::{Coordinate, CurrentField, Outcome, RawSnapshot};
use crate::provider::WeatherProvider;
use crate::record::WeatherRecord;
use crate::store::WeatherStore;

/// Name → coordinate, via the geocoding collaborator.
pub struct LocationResolver {
    geocoder: Box<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, name: &str) -> Result<Coordinate, PipelineError> {
        match self.geocoder.geocode(name).await {
            Ok(Some(coord)) => Ok(coord),
            Ok(None) => Err(PipelineError::NotFound(name.to_string())),
            Err(err) => Err(PipelineError::ResolverUnavailable(err)),
        }
    }
}

/// Coordinate → raw snapshot, via the weather collaborator.
pub struct SnapshotFetcher {
    provider: Box<dyn WeatherProvider>,
}

impl SnapshotFetcher {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// The range check runs before any collaborator call, guarding against
    /// a misbehaving resolver.
    pub async fn fetch(&self, coord: Coordinate) -> Result<RawSnapshot, PipelineError> {
        if !coord.in_range() {
            return Err(PipelineError::InvalidCoordinate {
                latitude: coord.latitude,
                longitude: coord.longitude,
            });
        }

        self.provider
            .current_conditions(coord, &CurrentField::ALL)
            .await
            .map_err(PipelineError::Fetch)
    }
}

/// Drives the batch. Collaborators and the store are injected per run;
/// there is no module-level default database.
pub struct Pipeline {
    resolver: LocationResolver,
    fetcher: SnapshotFetcher,
    store: WeatherStore,
}

impl Pipeline {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        provider: Box<dyn WeatherProvider>,
        store: WeatherStore,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
            fetcher: SnapshotFetcher::new(provider),
            store,
        }
    }

    /// Process every location in input order and return one outcome per
    /// location, in the same order. A failed location is reported and
    /// skipped; a schema failure is fatal to the whole run.
    pub async fn run(&self, locations: &[String]) -> anyhow::Result<Vec<Outcome>> {
        self.store
            .ensure_schema()
            .context("Failed to prepare the weather table")?;

        let mut outcomes = Vec::with_capacity(locations.len());
        for name in locations {
            match self.process(name).await {
                Ok(()) => {
                    tracing::info!(location = %name, "stored weather record");
                    outcomes.push(Outcome::Success { location: name.clone() });
                }
                Err(err) => {
                    tracing::warn!(location = %name, error = %err, "skipping location");
                    outcomes.push(Outcome::Failure {
                        location: name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(outcomes)
    }

    async fn process(&self, name: &str) -> Result<(), PipelineError> {
        let coord = self.resolver.resolve(name).await?;
        let raw = self.fetcher.fetch(coord).await?;
        let record = WeatherRecord::normalize(&raw, coord, name)?;
        self.store.append(&record)
    }
}
