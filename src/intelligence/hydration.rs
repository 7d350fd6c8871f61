// ABOUTME: Fluid, sodium citrate and citric acid requirements for a ride
// ABOUTME: Scales the hourly fluid rate by heat and sweat rate, electrolytes by fluid volume and heat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Hydration & Electrolyte Calculator
//!
//! # Scientific References
//!
//! - Sawka, M.N., et al. (2007). American College of Sports Medicine position stand.
//!   Exercise and fluid replacement. *Medicine & Science in Sports & Exercise*, 39(2), 377-390.
//!   <https://doi.org/10.1249/mss.0b013e31802ca597>

use crate::config::{ElectrolyteConfig, HydrationConfig};
use crate::models::SweatRate;
use ride_fuel_core::constants::units::ML_PER_LITER;
use serde::{Deserialize, Serialize};

/// Fluid need for a ride
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidRequirement {
    /// Hourly fluid rate after heat and sweat scaling (ml/h)
    pub hourly_rate_ml: f64,
    /// Fluid for the whole ride (ml)
    pub total_fluid_ml: f64,
}

/// Electrolyte and acidity amounts for a ride
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrolyteRequirement {
    /// Sodium citrate (g)
    pub sodium_citrate_g: f64,
    /// Citric acid (g)
    pub citric_acid_g: f64,
}

/// Hourly fluid rate
///
/// Base rate up to the heat threshold, then a linear ramp to the hot rate over
/// `heat_ramp_span_celsius`, scaled by the sweat multiplier.
#[must_use]
pub fn hourly_fluid_rate(
    temperature_celsius: f64,
    sweat_rate: SweatRate,
    config: &HydrationConfig,
) -> f64 {
    let mut rate = config.base_ml_per_hour;
    if temperature_celsius > config.heat_threshold_celsius {
        let ramp = ((temperature_celsius - config.heat_threshold_celsius)
            / config.heat_ramp_span_celsius)
            .min(1.0);
        rate += (config.hot_ml_per_hour - config.base_ml_per_hour) * ramp;
    }

    match sweat_rate {
        SweatRate::Low => rate * config.low_sweat_multiplier,
        SweatRate::Medium => rate,
        SweatRate::High => rate * config.high_sweat_multiplier,
    }
}

/// Calculate the fluid requirement for a ride
#[must_use]
pub fn calculate_fluid_requirement(
    temperature_celsius: f64,
    sweat_rate: SweatRate,
    duration_hours: f64,
    config: &HydrationConfig,
) -> FluidRequirement {
    let hourly_rate_ml = hourly_fluid_rate(temperature_celsius, sweat_rate, config);
    FluidRequirement {
        hourly_rate_ml,
        total_fluid_ml: hourly_rate_ml * duration_hours,
    }
}

/// Calculate sodium citrate and citric acid for a ride
///
/// Sodium citrate: `g_per_liter * litres * (1 + min(max_increase, (t - threshold) * per_degree))`,
/// with no heat increase at or below the threshold.
/// Citric acid: one gram per `carb_grams_per_citric_acid_gram` of carbohydrate.
#[must_use]
pub fn calculate_sodium_and_acid(
    temperature_celsius: f64,
    total_fluid_ml: f64,
    total_carbs_g: f64,
    config: &ElectrolyteConfig,
) -> ElectrolyteRequirement {
    let heat_factor = if temperature_celsius > config.heat_threshold_celsius {
        1.0 + ((temperature_celsius - config.heat_threshold_celsius)
            * config.heat_increase_per_degree)
            .min(config.max_heat_increase)
    } else {
        1.0
    };

    ElectrolyteRequirement {
        sodium_citrate_g: config.sodium_citrate_g_per_liter
            * (total_fluid_ml / ML_PER_LITER)
            * heat_factor,
        citric_acid_g: total_carbs_g / config.carb_grams_per_citric_acid_gram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_fluid_rate_ramps_with_heat() {
        let config = HydrationConfig::default();
        assert!((hourly_fluid_rate(20.0, SweatRate::Medium, &config) - 667.0).abs() < EPS);
        assert!((hourly_fluid_rate(30.0, SweatRate::Medium, &config) - 833.5).abs() < EPS);
        assert!((hourly_fluid_rate(35.0, SweatRate::Medium, &config) - 1000.0).abs() < EPS);
        assert!((hourly_fluid_rate(40.0, SweatRate::Medium, &config) - 1000.0).abs() < EPS);
    }

    #[test]
    fn test_sweat_rate_scales_fluid() {
        let config = HydrationConfig::default();
        let low = calculate_fluid_requirement(20.0, SweatRate::Low, 1.0, &config);
        let high = calculate_fluid_requirement(20.0, SweatRate::High, 1.0, &config);
        assert!((low.total_fluid_ml - 566.95).abs() < 1e-6);
        assert!((high.total_fluid_ml - 767.05).abs() < 1e-6);
    }

    #[test]
    fn test_sodium_increase_caps_at_35_degrees() {
        let config = ElectrolyteConfig::default();
        let mild = calculate_sodium_and_acid(20.0, 1000.0, 60.0, &config);
        assert!((mild.sodium_citrate_g - 3.8).abs() < EPS);
        assert!((mild.citric_acid_g - 2.0).abs() < EPS);

        let hot = calculate_sodium_and_acid(35.0, 1000.0, 60.0, &config);
        let hotter = calculate_sodium_and_acid(45.0, 1000.0, 60.0, &config);
        assert!((hot.sodium_citrate_g - 4.75).abs() < EPS);
        assert!((hotter.sodium_citrate_g - hot.sodium_citrate_g).abs() < EPS);
    }
}
