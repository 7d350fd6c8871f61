// ABOUTME: Formula engine configuration with empirically tuned constants
// ABOUTME: Carbohydrate, hydration, electrolyte, caffeine, osmolality and bottle-split settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Formula Engine Configuration
//!
//! Every constant used by the formula engine lives here, grouped by calculation
//! stage. `FormulaConfig::default()` reproduces the published formula exactly;
//! `FormulaConfig::load()` applies `RIDE_FUEL_*` environment overrides on top of
//! the defaults and validates the result.
//!
//! # Guidance the defaults are based on
//!
//! - Carbohydrate: 30-90 g/h depending on duration and intensity, with multiple
//!   transportable carbohydrates above ~60 g/h (Jeukendrup, 2014)
//! - Fluid: roughly 0.4-0.8 l/h, more in heat (ACSM position stand, 2007)
//! - Caffeine: ergogenic at 3-6 mg/kg, 400 mg/day upper limit for healthy adults (EFSA, 2015)

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static FORMULA_CONFIG: OnceLock<FormulaConfig> = OnceLock::new();

/// Main formula configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormulaConfig {
    /// Carbohydrate rate, heat derate and first-hours ramp
    pub carbohydrate: CarbohydrateConfig,
    /// Fluid rate and sweat scaling
    pub hydration: HydrationConfig,
    /// Sodium citrate and citric acid dosing
    pub electrolytes: ElectrolyteConfig,
    /// Caffeine rates and safety ceiling
    pub caffeine: CaffeineConfig,
    /// Osmolality estimation factors
    pub osmolality: OsmolalityConfig,
    /// Hydration/fueling bottle multipliers
    pub bottle_split: BottleSplitConfig,
    /// Distance to ride-time estimation
    pub ride_estimation: RideEstimationConfig,
}

/// Carbohydrate requirement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbohydrateConfig {
    /// Hourly carbohydrate at low intensity (g/h): 45
    pub low_intensity_g_per_hour: f64,
    /// Hourly carbohydrate at medium intensity (g/h): 60
    pub medium_intensity_g_per_hour: f64,
    /// Hourly carbohydrate at high intensity (g/h): 75
    pub high_intensity_g_per_hour: f64,
    /// Temperature above which the hourly rate is derated (°C): 25
    pub heat_threshold_celsius: f64,
    /// Derate per degree above the threshold: 0.02
    pub heat_derate_per_degree: f64,
    /// Maximum heat derate: 0.2 (reached at 35 °C)
    pub max_heat_derate: f64,
    /// Base fraction of the hourly rate taken in the first hour: 0.5
    pub first_hour_factor: f64,
    /// Base fraction of the hourly rate taken in the second hour: 0.75
    pub second_hour_factor: f64,
    /// Extra fraction added per fully elapsed ramp hour on short rides: 0.25
    pub ramp_step: f64,
    /// Maltodextrin share in maltodextrin-dominant mode: 0.56
    pub maltodextrin_dominant_fraction: f64,
    /// Maltodextrin share in balanced mode: 0.5
    pub balanced_fraction: f64,
}

/// Fluid requirement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Base fluid rate (ml/h): 667, one litre per 1.5 hours
    pub base_ml_per_hour: f64,
    /// Fluid rate at and above the top of the heat ramp (ml/h): 1000
    pub hot_ml_per_hour: f64,
    /// Temperature where the heat ramp starts (°C): 25
    pub heat_threshold_celsius: f64,
    /// Width of the heat ramp (°C): 10
    pub heat_ramp_span_celsius: f64,
    /// Multiplier for low sweat rate: 0.85
    pub low_sweat_multiplier: f64,
    /// Multiplier for high sweat rate: 1.15
    pub high_sweat_multiplier: f64,
}

/// Sodium citrate and citric acid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteConfig {
    /// Sodium citrate per litre of total fluid (g/l): 3.8
    pub sodium_citrate_g_per_liter: f64,
    /// Temperature above which sodium is increased (°C): 25
    pub heat_threshold_celsius: f64,
    /// Sodium increase per degree above the threshold: 0.025
    pub heat_increase_per_degree: f64,
    /// Maximum sodium increase: 0.25 (reached at 35 °C)
    pub max_heat_increase: f64,
    /// Carbohydrate grams balanced by one gram of citric acid: 30
    pub carb_grams_per_citric_acid_gram: f64,
}

/// Caffeine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaffeineConfig {
    /// Rate for basic mode and medium tolerance (mg/h): 60
    pub default_mg_per_hour: f64,
    /// Rate for low tolerance in advanced mode (mg/h): 40
    pub low_tolerance_mg_per_hour: f64,
    /// Rate for high tolerance in advanced mode (mg/h): 80
    pub high_tolerance_mg_per_hour: f64,
    /// Hard ceiling for the whole ride (mg): 400
    pub max_total_mg: f64,
}

/// Osmolality estimation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmolalityConfig {
    /// Contribution per gram of carbohydrate: 5
    pub carb_factor_per_gram: f64,
    /// Contribution per milligram of sodium citrate: 3
    pub sodium_citrate_factor_per_mg: f64,
}

/// Two-bottle strategy multipliers applied to the single-bottle amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleSplitConfig {
    /// Sodium citrate multiplier in the hydration bottle: 1.2
    pub hydration_sodium_multiplier: f64,
    /// Citric acid multiplier in the hydration bottle: 0.5
    pub hydration_citric_acid_multiplier: f64,
    /// Maltodextrin and fructose multiplier in the fueling bottle: 2.0
    pub fueling_carb_multiplier: f64,
    /// Citric acid multiplier in the fueling bottle: 1.5
    pub fueling_citric_acid_multiplier: f64,
}

/// Distance-based ride time estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideEstimationConfig {
    /// Average speed of a typical rider at medium intensity (km/h): 25
    pub baseline_speed_kmh: f64,
    /// Speed factor at low intensity: 0.8
    pub low_intensity_speed_factor: f64,
    /// Speed factor at high intensity: 1.2
    pub high_intensity_speed_factor: f64,
    /// Shortest ride time ever estimated (hours): 1
    pub min_ride_hours: f64,
}

impl Default for CarbohydrateConfig {
    fn default() -> Self {
        Self {
            low_intensity_g_per_hour: 45.0,
            medium_intensity_g_per_hour: 60.0,
            high_intensity_g_per_hour: 75.0,
            heat_threshold_celsius: 25.0,
            heat_derate_per_degree: 0.02,
            max_heat_derate: 0.2,
            first_hour_factor: 0.5,
            second_hour_factor: 0.75,
            ramp_step: 0.25,
            maltodextrin_dominant_fraction: 0.56,
            balanced_fraction: 0.5,
        }
    }
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            base_ml_per_hour: 667.0,
            hot_ml_per_hour: 1000.0,
            heat_threshold_celsius: 25.0,
            heat_ramp_span_celsius: 10.0,
            low_sweat_multiplier: 0.85,
            high_sweat_multiplier: 1.15,
        }
    }
}

impl Default for ElectrolyteConfig {
    fn default() -> Self {
        Self {
            sodium_citrate_g_per_liter: 3.8,
            heat_threshold_celsius: 25.0,
            heat_increase_per_degree: 0.025,
            max_heat_increase: 0.25,
            carb_grams_per_citric_acid_gram: 30.0,
        }
    }
}

impl Default for CaffeineConfig {
    fn default() -> Self {
        Self {
            default_mg_per_hour: 60.0,
            low_tolerance_mg_per_hour: 40.0,
            high_tolerance_mg_per_hour: 80.0,
            max_total_mg: 400.0,
        }
    }
}

impl Default for OsmolalityConfig {
    fn default() -> Self {
        Self {
            carb_factor_per_gram: 5.0,
            sodium_citrate_factor_per_mg: 3.0,
        }
    }
}

impl Default for BottleSplitConfig {
    fn default() -> Self {
        Self {
            hydration_sodium_multiplier: 1.2,
            hydration_citric_acid_multiplier: 0.5,
            fueling_carb_multiplier: 2.0,
            fueling_citric_acid_multiplier: 1.5,
        }
    }
}

impl Default for RideEstimationConfig {
    fn default() -> Self {
        Self {
            baseline_speed_kmh: 25.0,
            low_intensity_speed_factor: 0.8,
            high_intensity_speed_factor: 1.2,
            min_ride_hours: 1.0,
        }
    }
}

impl FormulaConfig {
    /// Get the global configuration instance
    ///
    /// Loaded once from the environment; falls back to defaults with a warning if
    /// an override is malformed or fails validation.
    pub fn global() -> &'static Self {
        FORMULA_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load formula config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from environment overrides on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any rate, fraction or multiplier is outside its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_carbohydrate()?;
        self.validate_hydration()?;
        self.validate_electrolytes()?;
        self.validate_caffeine()?;
        self.validate_split_and_estimation()
    }

    fn validate_carbohydrate(&self) -> Result<(), ConfigError> {
        let carbs = &self.carbohydrate;
        require_positive("carbohydrate.low_intensity_g_per_hour", carbs.low_intensity_g_per_hour)?;
        require_positive(
            "carbohydrate.medium_intensity_g_per_hour",
            carbs.medium_intensity_g_per_hour,
        )?;
        require_positive(
            "carbohydrate.high_intensity_g_per_hour",
            carbs.high_intensity_g_per_hour,
        )?;
        if carbs.low_intensity_g_per_hour > carbs.medium_intensity_g_per_hour
            || carbs.medium_intensity_g_per_hour > carbs.high_intensity_g_per_hour
        {
            return Err(ConfigError::InvalidRange(
                "carbohydrate rates must be ordered low <= medium <= high".to_owned(),
            ));
        }
        require_finite("carbohydrate.heat_threshold_celsius", carbs.heat_threshold_celsius)?;
        require_non_negative("carbohydrate.heat_derate_per_degree", carbs.heat_derate_per_degree)?;
        require_fraction("carbohydrate.max_heat_derate", carbs.max_heat_derate)?;
        require_fraction("carbohydrate.first_hour_factor", carbs.first_hour_factor)?;
        require_fraction("carbohydrate.second_hour_factor", carbs.second_hour_factor)?;
        require_fraction("carbohydrate.ramp_step", carbs.ramp_step)?;
        require_fraction(
            "carbohydrate.maltodextrin_dominant_fraction",
            carbs.maltodextrin_dominant_fraction,
        )?;
        require_fraction("carbohydrate.balanced_fraction", carbs.balanced_fraction)
    }

    fn validate_hydration(&self) -> Result<(), ConfigError> {
        let fluid = &self.hydration;
        require_positive("hydration.base_ml_per_hour", fluid.base_ml_per_hour)?;
        if fluid.hot_ml_per_hour < fluid.base_ml_per_hour {
            return Err(ConfigError::InvalidRange(format!(
                "hydration.hot_ml_per_hour ({}) must not be below base_ml_per_hour ({})",
                fluid.hot_ml_per_hour, fluid.base_ml_per_hour
            )));
        }
        require_finite("hydration.heat_threshold_celsius", fluid.heat_threshold_celsius)?;
        require_positive("hydration.heat_ramp_span_celsius", fluid.heat_ramp_span_celsius)?;
        require_positive("hydration.low_sweat_multiplier", fluid.low_sweat_multiplier)?;
        require_positive("hydration.high_sweat_multiplier", fluid.high_sweat_multiplier)
    }

    fn validate_electrolytes(&self) -> Result<(), ConfigError> {
        let electrolytes = &self.electrolytes;
        require_non_negative(
            "electrolytes.sodium_citrate_g_per_liter",
            electrolytes.sodium_citrate_g_per_liter,
        )?;
        require_finite(
            "electrolytes.heat_threshold_celsius",
            electrolytes.heat_threshold_celsius,
        )?;
        require_non_negative(
            "electrolytes.heat_increase_per_degree",
            electrolytes.heat_increase_per_degree,
        )?;
        require_non_negative("electrolytes.max_heat_increase", electrolytes.max_heat_increase)?;
        require_positive(
            "electrolytes.carb_grams_per_citric_acid_gram",
            electrolytes.carb_grams_per_citric_acid_gram,
        )
    }

    fn validate_caffeine(&self) -> Result<(), ConfigError> {
        let caffeine = &self.caffeine;
        require_non_negative("caffeine.default_mg_per_hour", caffeine.default_mg_per_hour)?;
        require_non_negative(
            "caffeine.low_tolerance_mg_per_hour",
            caffeine.low_tolerance_mg_per_hour,
        )?;
        require_non_negative(
            "caffeine.high_tolerance_mg_per_hour",
            caffeine.high_tolerance_mg_per_hour,
        )?;
        require_non_negative("caffeine.max_total_mg", caffeine.max_total_mg)
    }

    fn validate_split_and_estimation(&self) -> Result<(), ConfigError> {
        require_non_negative("osmolality.carb_factor_per_gram", self.osmolality.carb_factor_per_gram)?;
        require_non_negative(
            "osmolality.sodium_citrate_factor_per_mg",
            self.osmolality.sodium_citrate_factor_per_mg,
        )?;

        let split = &self.bottle_split;
        require_non_negative(
            "bottle_split.hydration_sodium_multiplier",
            split.hydration_sodium_multiplier,
        )?;
        require_non_negative(
            "bottle_split.hydration_citric_acid_multiplier",
            split.hydration_citric_acid_multiplier,
        )?;
        require_non_negative("bottle_split.fueling_carb_multiplier", split.fueling_carb_multiplier)?;
        require_non_negative(
            "bottle_split.fueling_citric_acid_multiplier",
            split.fueling_citric_acid_multiplier,
        )?;

        let estimation = &self.ride_estimation;
        require_positive("ride_estimation.baseline_speed_kmh", estimation.baseline_speed_kmh)?;
        require_positive(
            "ride_estimation.low_intensity_speed_factor",
            estimation.low_intensity_speed_factor,
        )?;
        require_positive(
            "ride_estimation.high_intensity_speed_factor",
            estimation.high_intensity_speed_factor,
        )?;
        require_positive("ride_estimation.min_ride_hours", estimation.min_ride_hours)
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: {val:?}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Carbohydrate overrides
        Self::apply_env_var(
            "RIDE_FUEL_CARB_LOW_G_PER_HOUR",
            &mut self.carbohydrate.low_intensity_g_per_hour,
        )?;
        Self::apply_env_var(
            "RIDE_FUEL_CARB_MEDIUM_G_PER_HOUR",
            &mut self.carbohydrate.medium_intensity_g_per_hour,
        )?;
        Self::apply_env_var(
            "RIDE_FUEL_CARB_HIGH_G_PER_HOUR",
            &mut self.carbohydrate.high_intensity_g_per_hour,
        )?;
        Self::apply_env_var(
            "RIDE_FUEL_CARB_MALTODEXTRIN_FRACTION",
            &mut self.carbohydrate.maltodextrin_dominant_fraction,
        )?;

        // Hydration overrides
        Self::apply_env_var(
            "RIDE_FUEL_FLUID_BASE_ML_PER_HOUR",
            &mut self.hydration.base_ml_per_hour,
        )?;
        Self::apply_env_var(
            "RIDE_FUEL_FLUID_HOT_ML_PER_HOUR",
            &mut self.hydration.hot_ml_per_hour,
        )?;

        // Electrolyte overrides
        Self::apply_env_var(
            "RIDE_FUEL_SODIUM_CITRATE_G_PER_LITER",
            &mut self.electrolytes.sodium_citrate_g_per_liter,
        )?;

        // Caffeine overrides
        Self::apply_env_var(
            "RIDE_FUEL_CAFFEINE_MG_PER_HOUR",
            &mut self.caffeine.default_mg_per_hour,
        )?;
        Self::apply_env_var(
            "RIDE_FUEL_CAFFEINE_MAX_TOTAL_MG",
            &mut self.caffeine.max_total_mg,
        )?;

        // Ride estimation overrides
        Self::apply_env_var(
            "RIDE_FUEL_BASELINE_SPEED_KMH",
            &mut self.ride_estimation.baseline_speed_kmh,
        )?;

        Ok(self)
    }
}

fn require_finite(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(format!("{name} must be finite, got {value}")))
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(format!("{name} must be positive, got {value}")))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(format!(
            "{name} must be zero or positive, got {value}"
        )))
    }
}

fn require_fraction(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )))
    }
}
