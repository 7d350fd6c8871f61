// ABOUTME: Ride parameter model with lenient enum parsing and invariant validation
// ABOUTME: Defines sweat rate, intensity, carb ratio, adaptation and caffeine tolerance levels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::constants::schema::PARAMETER_SCHEMA_VERSION;
use crate::errors::{AppError, AppResult};

/// Normalize a user or storage supplied token for comparison
///
/// Lowercases, trims and treats `-`, `_` and spaces alike so that
/// `"Maltodextrin-Dominant"` and `"maltodextrin_dominant"` compare equal.
fn normalize_token(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Extract a token from an arbitrary stored value for lenient parsing
///
/// Strings pass through unchanged. `null`, numbers, booleans and structures
/// become an empty token, which every lenient parser maps to its default.
#[must_use]
pub fn lenient_token(field: &'static str, value: Option<Value>) -> String {
    match value {
        Some(Value::String(raw)) => raw,
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            debug!(field, value = %other, "Non-string value, using default");
            String::new()
        }
    }
}

/// Declares a three-level (low/medium/high) enumeration that parses leniently
///
/// Unknown, empty, `null` or non-string values fall back to `Medium` so that
/// parameter sets saved by older revisions, which may lack a field or use a
/// retired value, keep working.
macro_rules! level_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            /// Low level
            Low,
            /// Medium level (default)
            #[default]
            Medium,
            /// High level
            High,
        }

        impl $name {
            /// Parse a level, falling back to `Medium` for unrecognized input
            #[must_use]
            pub fn parse_lenient(raw: &str) -> Self {
                match normalize_token(raw).as_str() {
                    "low" => Self::Low,
                    "medium" => Self::Medium,
                    "high" => Self::High,
                    other => {
                        debug!(field = $field, value = other, "Unrecognized level, using medium");
                        Self::Medium
                    }
                }
            }

            /// Canonical lowercase name
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::Low => "low",
                    Self::Medium => "medium",
                    Self::High => "high",
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = Option::<Value>::deserialize(deserializer)?;
                Ok(Self::parse_lenient(&lenient_token($field, value)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

level_enum!(
    /// How heavily the rider sweats; scales the fluid requirement
    SweatRate,
    "sweat_rate"
);

level_enum!(
    /// Ride intensity; selects the hourly carbohydrate rate and estimated speed
    Intensity,
    "intensity"
);

level_enum!(
    /// Caffeine tolerance; selects the hourly caffeine rate in advanced mode
    CaffeineTolerance,
    "caffeine_tolerance"
);

level_enum!(
    /// Gut training for carbohydrate absorption
    ///
    /// Carried in the parameter schema for compatibility with saved settings; the
    /// duration-based carbohydrate ramp does not modulate intake by adaptation.
    CarbAdaptation,
    "carb_adaptation"
);

/// Maltodextrin to fructose split strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbRatioMode {
    /// 56% maltodextrin / 44% fructose
    #[default]
    MaltodextrinDominant,
    /// 50% maltodextrin / 50% fructose (advanced mode only)
    Balanced,
}

impl CarbRatioMode {
    /// Parse a ratio mode, falling back to `MaltodextrinDominant`
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match normalize_token(raw).as_str() {
            "maltodextrin_dominant" => Self::MaltodextrinDominant,
            "balanced" => Self::Balanced,
            other => {
                debug!(
                    field = "carb_ratio_mode",
                    value = other,
                    "Unrecognized carb ratio, using maltodextrin_dominant"
                );
                Self::MaltodextrinDominant
            }
        }
    }

    /// Canonical snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaltodextrinDominant => "maltodextrin_dominant",
            Self::Balanced => "balanced",
        }
    }
}

impl<'de> Deserialize<'de> for CarbRatioMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&lenient_token("carb_ratio_mode", value)))
    }
}

impl fmt::Display for CarbRatioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_schema_version() -> u32 {
    PARAMETER_SCHEMA_VERSION
}

/// Inputs to a single formula calculation
///
/// Units are fixed: hours, degrees Celsius and millilitres. Field aliases accept
/// the key names used by earlier parameter revisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideParameters {
    /// Total planned ride time (hours, > 0)
    #[serde(alias = "duration")]
    pub duration_hours: f64,
    /// Ambient temperature (°C)
    #[serde(alias = "temperature")]
    pub temperature_celsius: f64,
    /// Rider sweat rate
    #[serde(default)]
    pub sweat_rate: SweatRate,
    /// Ride intensity
    #[serde(default)]
    pub intensity: Intensity,
    /// Bottle volume (ml, > 0)
    #[serde(alias = "bottle_size")]
    pub bottle_capacity_ml: f64,
    /// Enables the advanced feature set below
    #[serde(default, alias = "is_advanced")]
    pub advanced: bool,
    /// Carbohydrate source split (advanced only)
    #[serde(default, alias = "carb_ratio")]
    pub carb_ratio_mode: CarbRatioMode,
    /// Carbohydrate gut adaptation, when the caller supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carb_adaptation: Option<CarbAdaptation>,
    /// Caffeine tolerance (advanced only)
    #[serde(default, alias = "caffeine_sensitivity")]
    pub caffeine_tolerance: CaffeineTolerance,
    /// Split into hydration and fueling bottles (advanced only)
    #[serde(default)]
    pub separate_bottles: bool,
    /// Parameter schema version
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}

impl RideParameters {
    /// Start building parameters from the three required values
    #[must_use]
    pub fn builder(
        duration_hours: f64,
        temperature_celsius: f64,
        bottle_capacity_ml: f64,
    ) -> RideParametersBuilder {
        RideParametersBuilder::new(duration_hours, temperature_celsius, bottle_capacity_ml)
    }

    /// Check the parameter invariants
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the duration or bottle capacity is not a
    /// positive finite number, or the temperature is not finite.
    pub fn validate(&self) -> AppResult<()> {
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err(AppError::invalid_parameter(
                "duration_hours",
                format!(
                    "Ride duration must be a positive number of hours, got {}",
                    self.duration_hours
                ),
            ));
        }
        if !self.bottle_capacity_ml.is_finite() || self.bottle_capacity_ml <= 0.0 {
            return Err(AppError::invalid_parameter(
                "bottle_capacity_ml",
                format!(
                    "Bottle capacity must be a positive number of millilitres, got {}",
                    self.bottle_capacity_ml
                ),
            ));
        }
        if !self.temperature_celsius.is_finite() {
            return Err(AppError::invalid_parameter(
                "temperature_celsius",
                "Temperature must be a finite number of degrees Celsius",
            ));
        }
        Ok(())
    }

    /// Whether the split-bottle strategy applies to this ride
    #[must_use]
    pub const fn wants_separate_bottles(&self) -> bool {
        self.advanced && self.separate_bottles
    }
}

/// Builder for [`RideParameters`]
#[derive(Debug, Clone)]
pub struct RideParametersBuilder {
    params: RideParameters,
}

impl RideParametersBuilder {
    /// Create a builder with medium levels and advanced mode off
    #[must_use]
    pub fn new(duration_hours: f64, temperature_celsius: f64, bottle_capacity_ml: f64) -> Self {
        Self {
            params: RideParameters {
                duration_hours,
                temperature_celsius,
                sweat_rate: SweatRate::default(),
                intensity: Intensity::default(),
                bottle_capacity_ml,
                advanced: false,
                carb_ratio_mode: CarbRatioMode::default(),
                carb_adaptation: None,
                caffeine_tolerance: CaffeineTolerance::default(),
                separate_bottles: false,
                schema_version: PARAMETER_SCHEMA_VERSION,
            },
        }
    }

    /// Set the sweat rate
    #[must_use]
    pub fn sweat_rate(mut self, sweat_rate: SweatRate) -> Self {
        self.params.sweat_rate = sweat_rate;
        self
    }

    /// Set the ride intensity
    #[must_use]
    pub fn intensity(mut self, intensity: Intensity) -> Self {
        self.params.intensity = intensity;
        self
    }

    /// Enable or disable advanced mode
    #[must_use]
    pub fn advanced(mut self, advanced: bool) -> Self {
        self.params.advanced = advanced;
        self
    }

    /// Set the carbohydrate ratio mode
    #[must_use]
    pub fn carb_ratio_mode(mut self, mode: CarbRatioMode) -> Self {
        self.params.carb_ratio_mode = mode;
        self
    }

    /// Set the carbohydrate adaptation level
    #[must_use]
    pub fn carb_adaptation(mut self, adaptation: CarbAdaptation) -> Self {
        self.params.carb_adaptation = Some(adaptation);
        self
    }

    /// Set the caffeine tolerance
    #[must_use]
    pub fn caffeine_tolerance(mut self, tolerance: CaffeineTolerance) -> Self {
        self.params.caffeine_tolerance = tolerance;
        self
    }

    /// Request separate hydration and fueling bottles
    #[must_use]
    pub fn separate_bottles(mut self, separate: bool) -> Self {
        self.params.separate_bottles = separate;
        self
    }

    /// Validate and return the parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if an invariant is violated
    pub fn build(self) -> AppResult<RideParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_level_parsing_is_lenient() {
        assert_eq!(SweatRate::parse_lenient("HIGH"), SweatRate::High);
        assert_eq!(Intensity::parse_lenient(" low "), Intensity::Low);
        assert_eq!(CaffeineTolerance::parse_lenient("extreme"), CaffeineTolerance::Medium);
        assert_eq!(CarbAdaptation::parse_lenient(""), CarbAdaptation::Medium);
    }

    #[test]
    fn test_carb_ratio_accepts_both_spellings() {
        assert_eq!(
            CarbRatioMode::parse_lenient("maltodextrin-dominant"),
            CarbRatioMode::MaltodextrinDominant
        );
        assert_eq!(CarbRatioMode::parse_lenient("Balanced"), CarbRatioMode::Balanced);
        // Retired 1:2 mode from the distance-based revision
        assert_eq!(
            CarbRatioMode::parse_lenient("fructose-dominant"),
            CarbRatioMode::MaltodextrinDominant
        );
    }

    #[test]
    fn test_deserialize_legacy_keys_and_missing_fields() {
        let json = r#"{
            "duration": 3.0,
            "temperature": 28.0,
            "sweat_rate": "sideways",
            "bottle_size": 600.0,
            "is_advanced": true,
            "carb_ratio": "balanced",
            "caffeine_sensitivity": "high"
        }"#;
        let params: RideParameters = serde_json::from_str(json).unwrap();
        assert!((params.duration_hours - 3.0).abs() < f64::EPSILON);
        assert_eq!(params.sweat_rate, SweatRate::Medium);
        assert_eq!(params.intensity, Intensity::Medium);
        assert!(params.advanced);
        assert_eq!(params.carb_ratio_mode, CarbRatioMode::Balanced);
        assert_eq!(params.caffeine_tolerance, CaffeineTolerance::High);
        assert_eq!(params.carb_adaptation, None);
        assert_eq!(params.schema_version, PARAMETER_SCHEMA_VERSION);
    }

    #[test]
    fn test_null_and_non_string_levels_take_defaults() {
        let json = r#"{
            "duration_hours": 2.0,
            "temperature_celsius": 20.0,
            "bottle_capacity_ml": 750.0,
            "sweat_rate": 2,
            "intensity": null,
            "carb_ratio_mode": false,
            "caffeine_tolerance": {"level": "high"},
            "carb_adaptation": null
        }"#;
        let params: RideParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.sweat_rate, SweatRate::Medium);
        assert_eq!(params.intensity, Intensity::Medium);
        assert_eq!(params.carb_ratio_mode, CarbRatioMode::MaltodextrinDominant);
        assert_eq!(params.caffeine_tolerance, CaffeineTolerance::Medium);
        assert_eq!(params.carb_adaptation, None);
    }

    #[test]
    fn test_levels_serialize_as_snake_case() {
        let params = RideParameters::builder(2.0, 20.0, 750.0)
            .intensity(Intensity::High)
            .carb_ratio_mode(CarbRatioMode::Balanced)
            .build()
            .unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["intensity"], "high");
        assert_eq!(json["carb_ratio_mode"], "balanced");

        let back: RideParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_builder_rejects_non_positive_values() {
        let err = RideParameters::builder(0.0, 20.0, 750.0).build().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
        assert_eq!(err.field(), Some("duration_hours"));

        let err = RideParameters::builder(2.0, 20.0, -1.0).build().unwrap_err();
        assert_eq!(err.field(), Some("bottle_capacity_ml"));

        let err = RideParameters::builder(f64::NAN, 20.0, 750.0).build().unwrap_err();
        assert_eq!(err.field(), Some("duration_hours"));
    }

    #[test]
    fn test_separate_bottles_requires_advanced() {
        let basic = RideParameters::builder(2.0, 20.0, 750.0)
            .separate_bottles(true)
            .build()
            .unwrap();
        assert!(!basic.wants_separate_bottles());

        let advanced = RideParameters::builder(2.0, 20.0, 750.0)
            .advanced(true)
            .separate_bottles(true)
            .build()
            .unwrap();
        assert!(advanced.wants_separate_bottles());
    }
}
