// ABOUTME: Formula engine entry point assembling the per-bottle drink formula for a ride
// ABOUTME: Runs the carbohydrate, fluid, electrolyte and caffeine stages then distributes across bottles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Formula Calculator
//!
//! Stages run in dependency order:
//!
//! 1. Carbohydrate total and maltodextrin/fructose split
//! 2. Fluid total, then sodium citrate and citric acid from fluid and carbs
//! 3. Caffeine total
//! 4. Bottle distribution: every ride total is divided by the bottle count
//! 5. Advanced mode only: osmolality, and optionally the two-bottle split
//!
//! Per-bottle amounts are rounded only when the result is assembled; osmolality
//! and the split are derived from the unrounded per-bottle values.

use crate::config::FormulaConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{FormulaResult, RideParameters};
use ride_fuel_core::constants::energy::KCAL_PER_GRAM_CARBOHYDRATE;
use ride_fuel_core::constants::schema::RESULT_SCHEMA_VERSION;
use tracing::debug;

use super::caffeine::calculate_caffeine;
use super::carbohydrate::{calculate_carb_requirement, split_carbohydrates};
use super::hydration::{calculate_fluid_requirement, calculate_sodium_and_acid};
use super::osmolality::{estimate_osmolality, fueling_bottle, hydration_bottle, BottleContents};

/// Round grams to 0.1 g
#[must_use]
pub fn round_grams(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round milligrams to whole units
#[must_use]
pub fn round_milligrams(value: f64) -> f64 {
    value.round()
}

/// Number of bottles needed to carry `total_fluid_ml`, at least one
///
/// # Errors
///
/// Returns `InvalidParameter` for the bottle capacity when the bottle count is
/// not representable (the capacity is vanishingly small relative to the fluid)
pub fn bottles_needed(total_fluid_ml: f64, bottle_capacity_ml: f64) -> AppResult<u32> {
    let bottles = (total_fluid_ml / bottle_capacity_ml).ceil().max(1.0);
    if !bottles.is_finite() || bottles > f64::from(u32::MAX) {
        return Err(AppError::invalid_parameter(
            "bottle_capacity_ml",
            format!(
                "Bottle capacity {bottle_capacity_ml} ml is too small to carry {total_fluid_ml} ml of fluid"
            ),
        ));
    }
    // Integral and within u32 range after the checks above
    Ok(bottles as u32)
}

/// Calculate the drink formula using the built-in constants
///
/// Never reads the environment; use [`calculate_formula_with_config`] for tuned
/// constants.
///
/// # Errors
///
/// Returns `InvalidParameter` if the duration or bottle capacity is not positive
/// and finite, or the temperature is not finite.
pub fn calculate_formula(params: &RideParameters) -> AppResult<FormulaResult> {
    calculate_formula_with_config(params, &FormulaConfig::default())
}

/// Calculate the drink formula with explicit constants
///
/// # Errors
///
/// Returns `InvalidParameter` if the ride parameters violate their invariants
pub fn calculate_formula_with_config(
    params: &RideParameters,
    config: &FormulaConfig,
) -> AppResult<FormulaResult> {
    params.validate()?;

    debug!(
        duration_hours = params.duration_hours,
        temperature_celsius = params.temperature_celsius,
        sweat_rate = %params.sweat_rate,
        intensity = %params.intensity,
        bottle_capacity_ml = params.bottle_capacity_ml,
        advanced = params.advanced,
        carb_adaptation = ?params.carb_adaptation,
        "Calculating ride formula"
    );

    let carbs = calculate_carb_requirement(
        params.duration_hours,
        params.intensity,
        params.temperature_celsius,
        &config.carbohydrate,
    );
    let carb_split = split_carbohydrates(
        carbs.total_carbs_g,
        params.carb_ratio_mode,
        params.advanced,
        &config.carbohydrate,
    );

    let fluid = calculate_fluid_requirement(
        params.temperature_celsius,
        params.sweat_rate,
        params.duration_hours,
        &config.hydration,
    );
    let electrolytes = calculate_sodium_and_acid(
        params.temperature_celsius,
        fluid.total_fluid_ml,
        carbs.total_carbs_g,
        &config.electrolytes,
    );

    let total_caffeine_mg = calculate_caffeine(
        params.duration_hours,
        params.advanced,
        params.caffeine_tolerance,
        &config.caffeine,
    );

    let bottles = bottles_needed(fluid.total_fluid_ml, params.bottle_capacity_ml)?;
    let per_bottle = f64::from(bottles);
    let contents = BottleContents {
        water_ml: params.bottle_capacity_ml,
        maltodextrin_g: carb_split.maltodextrin_g / per_bottle,
        fructose_g: carb_split.fructose_g / per_bottle,
        sodium_citrate_g: electrolytes.sodium_citrate_g / per_bottle,
        citric_acid_g: electrolytes.citric_acid_g / per_bottle,
        caffeine_mg: total_caffeine_mg / per_bottle,
    };

    debug!(
        total_carbs_g = carbs.total_carbs_g,
        temperature_factor = carbs.temperature_factor,
        total_fluid_ml = fluid.total_fluid_ml,
        total_caffeine_mg,
        bottles_needed = bottles,
        "Ride totals computed"
    );

    let maltodextrin_grams = round_grams(contents.maltodextrin_g);
    let fructose_grams = round_grams(contents.fructose_g);
    let rounded_carbs = maltodextrin_grams + fructose_grams;

    let osmolality_mosm_per_kg = params.advanced.then(|| {
        estimate_osmolality(
            contents.maltodextrin_g,
            contents.fructose_g,
            contents.sodium_citrate_g,
            contents.water_ml,
            &config.osmolality,
        )
    });

    let (hydration, fueling) = if params.wants_separate_bottles() {
        (
            Some(hydration_bottle(&contents, &config.bottle_split, &config.osmolality)),
            Some(fueling_bottle(&contents, &config.bottle_split, &config.osmolality)),
        )
    } else {
        (None, None)
    };

    Ok(FormulaResult {
        water_amount_ml: params.bottle_capacity_ml,
        sodium_citrate_grams: round_grams(contents.sodium_citrate_g),
        citric_acid_grams: round_grams(contents.citric_acid_g),
        maltodextrin_grams,
        fructose_grams,
        combined_carb_grams: round_grams(rounded_carbs),
        caffeine_mg: round_milligrams(contents.caffeine_mg),
        total_ride_hours: params.duration_hours,
        total_calories_per_bottle: (rounded_carbs * KCAL_PER_GRAM_CARBOHYDRATE).round() as u32,
        bottles_needed: bottles,
        total_fluid_required_ml: fluid.total_fluid_ml,
        osmolality_mosm_per_kg,
        hydration_bottle: hydration,
        fueling_bottle: fueling,
        schema_version: RESULT_SCHEMA_VERSION,
    })
}
