use std::collections::HashMap;

use crate::error::PipelineError;

/// A latitude/longitude pair resolved from a location name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are inside their valid ranges.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// The fixed set of current-conditions measurements the pipeline works with.
///
/// `ALL` is the canonical order: the provider request, the snapshot
/// extraction and the storage columns are all derived from it, so the three
/// can never disagree about which value belongs to which field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentField {
    Temperature2m,
    RelativeHumidity2m,
    ApparentTemperature,
    IsDay,
    Precipitation,
    Rain,
    Showers,
    Snowfall,
    WeatherCode,
    CloudCover,
    PressureMsl,
    SurfacePressure,
    WindSpeed10m,
    WindDirection10m,
    WindGusts10m,
}

impl CurrentField {
    pub const ALL: [CurrentField; 15] = [
        CurrentField::Temperature2m,
        CurrentField::RelativeHumidity2m,
        CurrentField::ApparentTemperature,
        CurrentField::IsDay,
        CurrentField::Precipitation,
        CurrentField::Rain,
        CurrentField::Showers,
        CurrentField::Snowfall,
        CurrentField::WeatherCode,
        CurrentField::CloudCover,
        CurrentField::PressureMsl,
        CurrentField::SurfacePressure,
        CurrentField::WindSpeed10m,
        CurrentField::WindDirection10m,
        CurrentField::WindGusts10m,
    ];

    /// Parameter name on the provider's wire format.
    pub fn api_name(&self) -> &'static str {
        match self {
            CurrentField::Temperature2m => "temperature_2m",
            CurrentField::RelativeHumidity2m => "relative_humidity_2m",
            CurrentField::ApparentTemperature => "apparent_temperature",
            CurrentField::IsDay => "is_day",
            CurrentField::Precipitation => "precipitation",
            CurrentField::Rain => "rain",
            CurrentField::Showers => "showers",
            CurrentField::Snowfall => "snowfall",
            CurrentField::WeatherCode => "weather_code",
            CurrentField::CloudCover => "cloud_cover",
            CurrentField::PressureMsl => "pressure_msl",
            CurrentField::SurfacePressure => "surface_pressure",
            CurrentField::WindSpeed10m => "wind_speed_10m",
            CurrentField::WindDirection10m => "wind_direction_10m",
            CurrentField::WindGusts10m => "wind_gusts_10m",
        }
    }

    /// Column name in the weather table.
    pub fn column(&self) -> &'static str {
        match self {
            CurrentField::Temperature2m => "current_temperature_2m",
            CurrentField::RelativeHumidity2m => "current_relative_humidity_2m",
            CurrentField::ApparentTemperature => "current_apparent_temperature",
            CurrentField::IsDay => "current_is_day",
            CurrentField::Precipitation => "current_precipitation",
            CurrentField::Rain => "current_rain",
            CurrentField::Showers => "current_showers",
            CurrentField::Snowfall => "current_snowfall",
            CurrentField::WeatherCode => "current_weather_code",
            CurrentField::CloudCover => "current_cloud_cover",
            CurrentField::PressureMsl => "current_pressure_msl",
            CurrentField::SurfacePressure => "current_surface_pressure",
            CurrentField::WindSpeed10m => "current_wind_speed_10m",
            CurrentField::WindDirection10m => "current_wind_direction_10m",
            CurrentField::WindGusts10m => "current_wind_gusts_10m",
        }
    }

    /// Day/night flag and WMO weather code are whole numbers; the rest are
    /// physical measurements.
    pub fn is_integer(&self) -> bool {
        matches!(self, CurrentField::IsDay | CurrentField::WeatherCode)
    }
}

impl std::fmt::Display for CurrentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// One point-in-time provider response, keyed by field rather than by
/// position. A provider may report a field without a value (`Some(None)`)
/// or omit the field entirely, in which case `value` fails.
#[derive(Debug, Clone, Default)]
pub struct RawSnapshot {
    values: HashMap<CurrentField, Option<f64>>,
}

impl RawSnapshot {
    pub fn from_named(values: HashMap<CurrentField, Option<f64>>) -> Self {
        Self { values }
    }

    /// Build a snapshot from a positional array, pairing value *i* with
    /// requested field *i*. A response shorter than the request leaves the
    /// tail fields absent, which normalization rejects.
    pub fn from_positional(fields: &[CurrentField], values: &[Option<f64>]) -> Self {
        Self {
            values: fields.iter().copied().zip(values.iter().copied()).collect(),
        }
    }

    pub fn value(&self, field: CurrentField) -> Result<Option<f64>, PipelineError> {
        self.values.get(&field).copied().ok_or_else(|| {
            PipelineError::MalformedSnapshot(format!("response is missing field '{field}'"))
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single measurement as it goes into storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    Real(Option<f64>),
    Integer(Option<i64>),
}

/// Per-location result of one pipeline run. Exactly one per input location,
/// in input order; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { location: String },
    Failure { location: String, reason: String },
}

impl Outcome {
    pub fn location(&self) -> &str {
        match self {
            Outcome::Success { location } | Outcome::Failure { location, .. } => location,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success { location } => {
                write!(f, "Successfully processed data for {location}.")
            }
            Outcome::Failure { location, reason } => {
                write!(f, "Failed to process data for {location}: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_range_bounds_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).in_range());
        assert!(Coordinate::new(-90.0, -180.0).in_range());
        assert!(!Coordinate::new(90.1, 0.0).in_range());
        assert!(!Coordinate::new(0.0, -180.5).in_range());
    }

    #[test]
    fn field_order_matches_the_request_list() {
        let names: Vec<&str> = CurrentField::ALL.iter().map(|f| f.api_name()).collect();
        assert_eq!(
            names,
            vec![
                "temperature_2m",
                "relative_humidity_2m",
                "apparent_temperature",
                "is_day",
                "precipitation",
                "rain",
                "showers",
                "snowfall",
                "weather_code",
                "cloud_cover",
                "pressure_msl",
                "surface_pressure",
                "wind_speed_10m",
                "wind_direction_10m",
                "wind_gusts_10m",
            ]
        );
    }

    #[test]
    fn every_field_has_a_current_prefixed_column() {
        for field in CurrentField::ALL {
            assert_eq!(field.column(), format!("current_{}", field.api_name()));
        }
    }

    #[test]
    fn only_flag_and_code_are_integers() {
        let integers: Vec<CurrentField> = CurrentField::ALL
            .into_iter()
            .filter(CurrentField::is_integer)
            .collect();
        assert_eq!(integers, vec![CurrentField::IsDay, CurrentField::WeatherCode]);
    }

    #[test]
    fn positional_snapshot_pairs_value_i_with_field_i() {
        let values: Vec<Option<f64>> = (0..15).map(|i| Some(f64::from(i))).collect();
        let snapshot = RawSnapshot::from_positional(&CurrentField::ALL, &values);

        for (i, field) in CurrentField::ALL.into_iter().enumerate() {
            assert_eq!(snapshot.value(field).unwrap(), Some(i as f64));
        }
    }

    #[test]
    fn short_positional_snapshot_leaves_tail_fields_missing() {
        let values = vec![Some(1.0), Some(2.0)];
        let snapshot = RawSnapshot::from_positional(&CurrentField::ALL, &values);

        assert_eq!(snapshot.len(), 2);
        let err = snapshot.value(CurrentField::WindGusts10m).unwrap_err();
        assert!(err.to_string().contains("wind_gusts_10m"));
    }

    #[test]
    fn outcome_reports_one_line_per_location() {
        let ok = Outcome::Success { location: "Paris".into() };
        let bad = Outcome::Failure {
            location: "Atlantis".into(),
            reason: "no coordinates found for location 'Atlantis'".into(),
        };

        assert!(ok.is_success());
        assert_eq!(ok.to_string(), "Successfully processed data for Paris.");
        assert!(!bad.is_success());
        assert!(bad.to_string().starts_with("Failed to process data for Atlantis:"));
    }
}
