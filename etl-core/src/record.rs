use crate::error::PipelineError;
use crate::model::{Coordinate, CurrentField, Measurement, RawSnapshot};

/// The flat, storage-ready representation of one snapshot.
///
/// `location_name` carries the caller's original input, not the geocoder's
/// canonical name. A value the provider reported as null stays `None`; a
/// record with a *missing* field is never constructed at all. The insertion
/// timestamp is assigned by the store, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub is_day: Option<i64>,
    pub precipitation: Option<f64>,
    pub rain: Option<f64>,
    pub showers: Option<f64>,
    pub snowfall: Option<f64>,
    pub weather_code: Option<i64>,
    pub cloud_cover: Option<f64>,
    pub pressure_msl: Option<f64>,
    pub surface_pressure: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub wind_gusts_10m: Option<f64>,
}

impl WeatherRecord {
    /// Normalize a raw snapshot into a record. Pure and deterministic.
    ///
    /// Every field is extracted through the snapshot's named accessor; the
    /// first missing field aborts with `MalformedSnapshot`, so partially
    /// populated records cannot escape.
    pub fn normalize(
        raw: &RawSnapshot,
        coord: Coordinate,
        location_name: &str,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            location_name: location_name.to_string(),
            latitude: coord.latitude,
            longitude: coord.longitude,
            temperature_2m: raw.value(CurrentField::Temperature2m)?,
            relative_humidity_2m: raw.value(CurrentField::RelativeHumidity2m)?,
            apparent_temperature: raw.value(CurrentField::ApparentTemperature)?,
            is_day: raw.value(CurrentField::IsDay)?.map(|v| v as i64),
            precipitation: raw.value(CurrentField::Precipitation)?,
            rain: raw.value(CurrentField::Rain)?,
            showers: raw.value(CurrentField::Showers)?,
            snowfall: raw.value(CurrentField::Snowfall)?,
            weather_code: raw.value(CurrentField::WeatherCode)?.map(|v| v as i64),
            cloud_cover: raw.value(CurrentField::CloudCover)?,
            pressure_msl: raw.value(CurrentField::PressureMsl)?,
            surface_pressure: raw.value(CurrentField::SurfacePressure)?,
            wind_speed_10m: raw.value(CurrentField::WindSpeed10m)?,
            wind_direction_10m: raw.value(CurrentField::WindDirection10m)?,
            wind_gusts_10m: raw.value(CurrentField::WindGusts10m)?,
        })
    }

    /// Look up one measurement by field. The store iterates
    /// `CurrentField::ALL` through this accessor when binding the insert,
    /// which keeps the column/value pairing tied to the same enumeration the
    /// fetch requested.
    pub fn measurement(&self, field: CurrentField) -> Measurement {
        match field {
            CurrentField::Temperature2m => Measurement::Real(self.temperature_2m),
            CurrentField::RelativeHumidity2m => Measurement::Real(self.relative_humidity_2m),
            CurrentField::ApparentTemperature => Measurement::Real(self.apparent_temperature),
            CurrentField::IsDay => Measurement::Integer(self.is_day),
            CurrentField::Precipitation => Measurement::Real(self.precipitation),
            CurrentField::Rain => Measurement::Real(self.rain),
            CurrentField::Showers => Measurement::Real(self.showers),
            CurrentField::Snowfall => Measurement::Real(self.snowfall),
            CurrentField::WeatherCode => Measurement::Integer(self.weather_code),
            CurrentField::CloudCover => Measurement::Real(self.cloud_cover),
            CurrentField::PressureMsl => Measurement::Real(self.pressure_msl),
            CurrentField::SurfacePressure => Measurement::Real(self.surface_pressure),
            CurrentField::WindSpeed10m => Measurement::Real(self.wind_speed_10m),
            CurrentField::WindDirection10m => Measurement::Real(self.wind_direction_10m),
            CurrentField::WindGusts10m => Measurement::Real(self.wind_gusts_10m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_snapshot() -> RawSnapshot {
        // Value i for field i, so any mismapping is visible.
        let values: Vec<Option<f64>> = (0..15).map(|i| Some(f64::from(i))).collect();
        RawSnapshot::from_positional(&CurrentField::ALL, &values)
    }

    fn paris() -> Coordinate {
        Coordinate::new(48.8566, 2.3522)
    }

    #[test]
    fn normalize_maps_each_field_to_its_requested_index() {
        let record = WeatherRecord::normalize(&full_snapshot(), paris(), "Paris").unwrap();

        assert_eq!(record.location_name, "Paris");
        assert_eq!(record.latitude, 48.8566);
        assert_eq!(record.longitude, 2.3522);

        // Exhaustive request-order to struct-field correspondence.
        assert_eq!(record.temperature_2m, Some(0.0));
        assert_eq!(record.relative_humidity_2m, Some(1.0));
        assert_eq!(record.apparent_temperature, Some(2.0));
        assert_eq!(record.is_day, Some(3));
        assert_eq!(record.precipitation, Some(4.0));
        assert_eq!(record.rain, Some(5.0));
        assert_eq!(record.showers, Some(6.0));
        assert_eq!(record.snowfall, Some(7.0));
        assert_eq!(record.weather_code, Some(8));
        assert_eq!(record.cloud_cover, Some(9.0));
        assert_eq!(record.pressure_msl, Some(10.0));
        assert_eq!(record.surface_pressure, Some(11.0));
        assert_eq!(record.wind_speed_10m, Some(12.0));
        assert_eq!(record.wind_direction_10m, Some(13.0));
        assert_eq!(record.wind_gusts_10m, Some(14.0));
    }

    #[test]
    fn measurement_accessor_agrees_with_normalization() {
        let record = WeatherRecord::normalize(&full_snapshot(), paris(), "Paris").unwrap();

        for (i, field) in CurrentField::ALL.into_iter().enumerate() {
            let expected = if field.is_integer() {
                Measurement::Integer(Some(i as i64))
            } else {
                Measurement::Real(Some(i as f64))
            };
            assert_eq!(record.measurement(field), expected, "field {field}");
        }
    }

    #[test]
    fn normalize_is_deterministic() {
        let raw = full_snapshot();
        let a = WeatherRecord::normalize(&raw, paris(), "Paris").unwrap();
        let b = WeatherRecord::normalize(&raw, paris(), "Paris").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn normalize_keeps_provider_nulls_as_none() {
        let mut values: Vec<Option<f64>> = (0..15).map(|i| Some(f64::from(i))).collect();
        values[7] = None; // snowfall
        let raw = RawSnapshot::from_positional(&CurrentField::ALL, &values);

        let record = WeatherRecord::normalize(&raw, paris(), "Paris").unwrap();
        assert_eq!(record.snowfall, None);
        assert_eq!(record.weather_code, Some(8));
    }

    #[test]
    fn normalize_rejects_incomplete_snapshots() {
        let values: Vec<Option<f64>> = (0..14).map(|i| Some(f64::from(i))).collect();
        let raw = RawSnapshot::from_positional(&CurrentField::ALL, &values);

        let err = WeatherRecord::normalize(&raw, paris(), "Paris").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedSnapshot(_)));
    }

    #[test]
    fn normalize_rejects_empty_snapshots() {
        let raw = RawSnapshot::default();
        let err = WeatherRecord::normalize(&raw, paris(), "Paris").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedSnapshot(_)));
    }
}
