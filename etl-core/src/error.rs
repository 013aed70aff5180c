use thiserror::Error;

/// Everything that can go wrong while processing a single location.
///
/// The orchestrator catches these at the per-location boundary and turns
/// them into a `Failure` outcome, so a bad location never aborts the batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no coordinates found for location '{0}'")]
    NotFound(String),

    #[error("geocoding service unavailable: {0:#}")]
    ResolverUnavailable(#[source] anyhow::Error),

    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("weather fetch failed: {0:#}")]
    Fetch(#[source] anyhow::Error),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
