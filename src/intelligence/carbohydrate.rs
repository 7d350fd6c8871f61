// ABOUTME: Carbohydrate requirement calculation for endurance rides
// ABOUTME: Hourly rate by intensity, heat derate, first-hours ramp and maltodextrin/fructose split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Carbohydrate Calculator
//!
//! Intake ramps up over the first two hours while gastric emptying adapts, then
//! holds the full hourly rate. Heat lowers the rate because gut blood flow drops
//! as core temperature rises.
//!
//! # Scientific References
//!
//! - Jeukendrup, A. (2014). A step towards personalized sports nutrition:
//!   carbohydrate intake during exercise. *Sports Medicine*, 44(Suppl 1), S25-S33.
//!   <https://doi.org/10.1007/s40279-014-0148-z>
//!
//! - Burke, L.M., et al. (2011). Carbohydrates for training and competition.
//!   *Journal of Sports Sciences*, 29(sup1), S17-S27.
//!   <https://doi.org/10.1080/02640414.2011.585473>

use crate::config::CarbohydrateConfig;
use crate::models::{CarbRatioMode, Intensity};
use serde::{Deserialize, Serialize};

/// Carbohydrate need for the whole ride
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbRequirement {
    /// Total carbohydrate for the ride (g)
    pub total_carbs_g: f64,
    /// Hourly rate before the heat derate (g/h)
    pub hourly_rate_g: f64,
    /// Heat derate factor applied to the hourly rate (0.8-1.0 with defaults)
    pub temperature_factor: f64,
}

/// Maltodextrin and fructose amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbSplit {
    /// Maltodextrin (g)
    pub maltodextrin_g: f64,
    /// Fructose (g)
    pub fructose_g: f64,
}

/// Hourly carbohydrate rate for an intensity
#[must_use]
pub const fn hourly_carb_rate(intensity: Intensity, config: &CarbohydrateConfig) -> f64 {
    match intensity {
        Intensity::Low => config.low_intensity_g_per_hour,
        Intensity::Medium => config.medium_intensity_g_per_hour,
        Intensity::High => config.high_intensity_g_per_hour,
    }
}

/// Heat derate factor
///
/// Formula: `1 - min(max_derate, (t - threshold) * derate_per_degree)` above the
/// threshold, otherwise 1.
#[must_use]
pub fn carb_temperature_factor(temperature_celsius: f64, config: &CarbohydrateConfig) -> f64 {
    if temperature_celsius > config.heat_threshold_celsius {
        let derate = (temperature_celsius - config.heat_threshold_celsius)
            * config.heat_derate_per_degree;
        1.0 - derate.min(config.max_heat_derate)
    } else {
        1.0
    }
}

/// Calculate the carbohydrate requirement for a ride
///
/// With `r = rate * temperature_factor`:
/// - `d <= 2`: hour one contributes `r * (0.5 + h1/4) * h1` with `h1 = min(1, d)`,
///   hour two (when `d > 1`) contributes `r * (0.75 + h2/4) * h2` with `h2 = min(1, d - 1)`
/// - `d > 2`: `r * 0.5 + r * 0.75 + r * (d - 2)`
///
/// The two branches are not continuous at exactly two hours; a two hour ride gets
/// the full ramp credit while longer rides use the flat first-hours factors.
///
/// `duration_hours` must already be validated as positive and finite.
#[must_use]
pub fn calculate_carb_requirement(
    duration_hours: f64,
    intensity: Intensity,
    temperature_celsius: f64,
    config: &CarbohydrateConfig,
) -> CarbRequirement {
    let hourly_rate_g = hourly_carb_rate(intensity, config);
    let temperature_factor = carb_temperature_factor(temperature_celsius, config);
    let effective_rate = hourly_rate_g * temperature_factor;

    let total_carbs_g = if duration_hours <= 2.0 {
        let first_hour = duration_hours.min(1.0);
        let mut total = effective_rate
            * config.ramp_step.mul_add(first_hour, config.first_hour_factor)
            * first_hour;

        if duration_hours > 1.0 {
            let second_hour = (duration_hours - 1.0).min(1.0);
            total += effective_rate
                * config.ramp_step.mul_add(second_hour, config.second_hour_factor)
                * second_hour;
        }
        total
    } else {
        effective_rate * (config.first_hour_factor + config.second_hour_factor + (duration_hours - 2.0))
    };

    CarbRequirement {
        total_carbs_g,
        hourly_rate_g,
        temperature_factor,
    }
}

/// Split a carbohydrate total into maltodextrin and fructose
///
/// 56/44 by default; 50/50 only when advanced mode selects the balanced ratio.
#[must_use]
pub fn split_carbohydrates(
    total_carbs_g: f64,
    mode: CarbRatioMode,
    advanced: bool,
    config: &CarbohydrateConfig,
) -> CarbSplit {
    let maltodextrin_fraction = if advanced && mode == CarbRatioMode::Balanced {
        config.balanced_fraction
    } else {
        config.maltodextrin_dominant_fraction
    };

    let maltodextrin_g = total_carbs_g * maltodextrin_fraction;
    CarbSplit {
        maltodextrin_g,
        fructose_g: total_carbs_g - maltodextrin_g,
    }
}
