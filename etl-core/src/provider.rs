use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Coordinate, CurrentField, RawSnapshot};

pub mod openmeteo;

/// The weather collaborator: one synchronous current-conditions request for
/// exactly the given fields. Caching and retry, if any, live behind this
/// trait; the pipeline never retries. Implementations are expected to bound
/// their own request time.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_conditions(
        &self,
        coord: Coordinate,
        fields: &[CurrentField],
    ) -> Result<RawSnapshot>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
