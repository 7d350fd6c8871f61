// ABOUTME: Metric/imperial unit system and conversions for caller-facing values
// ABOUTME: Temperature, distance, volume and mass conversions used by settings and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unit conversion
//!
//! The formula engine works in hours, degrees Celsius, kilometres and millilitres
//! only. Imperial values are converted here before they reach it, and results
//! are converted back for display.

use ride_fuel_core::constants::units::{
    FAHRENHEIT_FREEZING_POINT, FAHRENHEIT_PER_CELSIUS, GRAMS_PER_OUNCE, KM_PER_MILE,
    ML_PER_US_FL_OZ,
};
use ride_fuel_core::models::ride::lenient_token;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::errors::AppError;

/// Unit system used for input and display
///
/// Deserializes leniently: anything other than `metric` or `imperial`
/// (including `null`) becomes `Metric`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Celsius, kilometres, millilitres, grams
    #[default]
    Metric,
    /// Fahrenheit, miles, US fluid ounces, ounces
    Imperial,
}

impl UnitSystem {
    /// Temperature unit label
    #[must_use]
    pub const fn temperature_label(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// Convert a temperature in this system to Celsius
    #[must_use]
    pub fn temperature_to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Imperial => fahrenheit_to_celsius(value),
        }
    }

    /// Convert a distance in this system to kilometres
    #[must_use]
    pub fn distance_to_km(self, value: f64) -> f64 {
        match self {
            Self::Metric => value,
            Self::Imperial => miles_to_km(value),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => f.write_str("metric"),
            Self::Imperial => f.write_str("imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(AppError::invalid_format(format!(
                "Unknown unit system '{other}', expected 'metric' or 'imperial'"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for UnitSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        let token = lenient_token("unit_system", value);
        Ok(token.parse().unwrap_or_else(|e: AppError| {
            debug!(error = %e, "Using metric units");
            Self::Metric
        }))
    }
}

/// Fahrenheit to Celsius: `(F - 32) * 5 / 9`
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - FAHRENHEIT_FREEZING_POINT) / FAHRENHEIT_PER_CELSIUS
}

/// Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius.mul_add(FAHRENHEIT_PER_CELSIUS, FAHRENHEIT_FREEZING_POINT)
}

/// Miles to kilometres
#[must_use]
pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Millilitres to US fluid ounces
#[must_use]
pub fn ml_to_fl_oz(ml: f64) -> f64 {
    ml / ML_PER_US_FL_OZ
}

/// US fluid ounces to millilitres
#[must_use]
pub fn fl_oz_to_ml(fl_oz: f64) -> f64 {
    fl_oz * ML_PER_US_FL_OZ
}

/// Grams to ounces
#[must_use]
pub fn grams_to_ounces(grams: f64) -> f64 {
    grams / GRAMS_PER_OUNCE
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_temperature_conversions() {
        assert!((fahrenheit_to_celsius(212.0) - 100.0).abs() < 1e-9);
        assert!((fahrenheit_to_celsius(77.0) - 25.0).abs() < 1e-9);
        assert!((celsius_to_fahrenheit(35.0) - 95.0).abs() < 1e-9);
        assert!((UnitSystem::Metric.temperature_to_celsius(20.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_and_volume_conversions() {
        assert!((miles_to_km(10.0) - 16.0934).abs() < 1e-9);
        assert!((fl_oz_to_ml(24.0) - 709.764).abs() < 1e-9);
        assert!((grams_to_ounces(28.3495) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_system_parsing() {
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert!("nautical".parse::<UnitSystem>().is_err());
    }

    #[test]
    fn test_unit_system_deserializes_leniently() {
        let imperial: UnitSystem = serde_json::from_str(r#""IMPERIAL""#).unwrap();
        assert_eq!(imperial, UnitSystem::Imperial);
        let unknown: UnitSystem = serde_json::from_str(r#""furlongs""#).unwrap();
        assert_eq!(unknown, UnitSystem::Metric);
        let null: UnitSystem = serde_json::from_str("null").unwrap();
        assert_eq!(null, UnitSystem::Metric);
        let number: UnitSystem = serde_json::from_str("7").unwrap();
        assert_eq!(number, UnitSystem::Metric);
    }
}
