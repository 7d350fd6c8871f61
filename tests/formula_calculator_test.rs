// ABOUTME: Integration tests for the formula engine entry points
// ABOUTME: Reference scenarios, result invariants, advanced outputs and parameter validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Formula engine tests
//!
//! Covers:
//! - The four reference scenarios (fluid and bottles, short-ride ramp, heat and sweat, caffeine ceiling)
//! - Bottle count, calorie and rounding invariants across a grid of rides
//! - Presence and absence of advanced-only outputs
//! - Rejection of invalid parameters

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use ride_fuel::{
    calculate_formula, calculate_formula_with_config,
    config::FormulaConfig,
    errors::ErrorCode,
    intelligence::{caffeine::calculate_caffeine, calculate_carb_requirement},
    models::{
        CaffeineTolerance, CarbAdaptation, CarbRatioMode, Intensity, RideParameters, SweatRate,
        Tonicity,
    },
};

mod common;

use common::{advanced_ride, assert_close, basic_ride, init_test_logging, ride_with_levels};

const LEVELS: [SweatRate; 3] = [SweatRate::Low, SweatRate::Medium, SweatRate::High];
const INTENSITIES: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

// ============================================================================
// REFERENCE SCENARIOS
// ============================================================================

#[test]
fn test_two_hour_ride_needs_two_bottles() {
    init_test_logging();
    let formula = calculate_formula(&basic_ride(2.0, 20.0, 750.0)).unwrap();

    assert_close(formula.total_fluid_required_ml, 1334.0, 1e-9);
    assert_eq!(formula.bottles_needed, 2);
    assert_close(formula.water_amount_ml, 750.0, 1e-9);
    assert_close(formula.total_ride_hours, 2.0, 1e-9);

    // 105 g carbs split 56/44 across two bottles
    assert_close(formula.maltodextrin_grams, 29.4, 1e-9);
    assert_close(formula.fructose_grams, 23.1, 1e-9);
    assert_close(formula.combined_carb_grams, 52.5, 1e-9);
    // 3.8 g/l * 1.334 l / 2
    assert_close(formula.sodium_citrate_grams, 2.5, 1e-9);
    // 105 / 30 / 2 = 1.75
    assert_close(formula.citric_acid_grams, 1.8, 1e-9);
    // 60 mg/h * 2 h / 2
    assert_close(formula.caffeine_mg, 60.0, 1e-9);
    assert_eq!(formula.total_calories_per_bottle, 210);
}

#[test]
fn test_half_hour_ride_uses_partial_first_hour() {
    let config = FormulaConfig::default();
    let carbs = calculate_carb_requirement(0.5, Intensity::Medium, 20.0, &config.carbohydrate);
    assert_close(carbs.total_carbs_g, 18.75, 1e-9);

    let formula = calculate_formula(&basic_ride(0.5, 20.0, 750.0)).unwrap();
    assert_eq!(formula.bottles_needed, 1);
    assert_close(formula.maltodextrin_grams + formula.fructose_grams, 18.75, 0.1);
}

#[test]
fn test_hot_ride_with_heavy_sweat() {
    let params = ride_with_levels(3.0, 35.0, SweatRate::High, Intensity::Medium, 750.0);
    let formula = calculate_formula(&params).unwrap();

    assert_close(formula.total_fluid_required_ml, 3450.0, 1e-6);
    assert_eq!(formula.bottles_needed, 5);
}

#[test]
fn test_caffeine_ceiling_for_long_advanced_ride() {
    let config = FormulaConfig::default();
    let total = calculate_caffeine(6.0, true, CaffeineTolerance::High, &config.caffeine);
    assert_close(total, 400.0, 1e-9);

    let formula =
        calculate_formula(&advanced_ride(6.0, 20.0, 750.0, CaffeineTolerance::High, false)).unwrap();
    // 4002 ml over 750 ml bottles
    assert_eq!(formula.bottles_needed, 6);
    assert_close(formula.caffeine_mg, 67.0, 1e-9);
}

// ============================================================================
// RESULT INVARIANTS
// ============================================================================

fn ride_grid() -> Vec<RideParameters> {
    let mut rides = Vec::new();
    for duration in [0.25, 0.5, 1.0, 1.5, 2.0, 2.5, 4.0, 7.5, 12.0] {
        for temperature in [-5.0, 15.0, 25.0, 28.0, 35.0, 42.0] {
            for sweat_rate in LEVELS {
                for intensity in INTENSITIES {
                    for bottle in [500.0, 750.0, 950.0] {
                        rides.push(ride_with_levels(
                            duration,
                            temperature,
                            sweat_rate,
                            intensity,
                            bottle,
                        ));
                    }
                }
            }
        }
    }
    rides
}

#[test]
fn test_bottle_count_matches_fluid_need() {
    for params in ride_grid() {
        let formula = calculate_formula(&params).unwrap();
        let expected = (formula.total_fluid_required_ml / params.bottle_capacity_ml).ceil();
        assert!(formula.bottles_needed >= 1);
        assert_close(f64::from(formula.bottles_needed), expected.max(1.0), 0.0);
    }
}

#[test]
fn test_calories_follow_rounded_carbs() {
    for params in ride_grid() {
        let formula = calculate_formula(&params).unwrap();
        let expected = ((formula.maltodextrin_grams + formula.fructose_grams) * 4.0).round();
        assert_close(f64::from(formula.total_calories_per_bottle), expected, 0.0);
    }
}

#[test]
fn test_amounts_are_non_negative_and_rounded() {
    for params in ride_grid() {
        let formula = calculate_formula(&params).unwrap();
        for grams in [
            formula.maltodextrin_grams,
            formula.fructose_grams,
            formula.sodium_citrate_grams,
            formula.citric_acid_grams,
            formula.combined_carb_grams,
        ] {
            assert!(grams >= 0.0);
            assert_close(grams * 10.0, (grams * 10.0).round(), 1e-6);
        }
        assert!(formula.caffeine_mg >= 0.0);
        assert_close(formula.caffeine_mg, formula.caffeine_mg.round(), 0.0);
    }
}

#[test]
fn test_total_caffeine_never_exceeds_ceiling() {
    let config = FormulaConfig::default();
    for duration in [0.5, 1.0, 3.0, 5.0, 6.0, 10.0, 24.0] {
        for tolerance in [
            CaffeineTolerance::Low,
            CaffeineTolerance::Medium,
            CaffeineTolerance::High,
        ] {
            for advanced in [false, true] {
                let total = calculate_caffeine(duration, advanced, tolerance, &config.caffeine);
                assert!(total <= 400.0, "{total} mg for {duration} h");
            }
        }
    }
}

#[test]
fn test_carbs_grow_with_duration_within_each_ramp_branch() {
    // One large bottle keeps the bottle count fixed at one
    for intensity in INTENSITIES {
        for branch in [
            vec![0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0],
            vec![2.25, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0],
        ] {
            let mut previous = 0.0;
            for duration in branch {
                let params = ride_with_levels(duration, 30.0, SweatRate::Medium, intensity, 10_000.0);
                let formula = calculate_formula(&params).unwrap();
                assert_eq!(formula.bottles_needed, 1);
                let carbs = formula.maltodextrin_grams + formula.fructose_grams;
                assert!(carbs >= previous, "carbs dropped at {duration} h");
                previous = carbs;
            }
        }
    }
}

#[test]
fn test_carb_adaptation_does_not_change_formula() {
    let base = basic_ride(3.0, 22.0, 750.0);
    let mut adapted = base.clone();
    adapted.carb_adaptation = Some(CarbAdaptation::High);

    let a = calculate_formula(&base).unwrap();
    let b = calculate_formula(&adapted).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// ADVANCED OUTPUTS
// ============================================================================

#[test]
fn test_basic_mode_omits_advanced_outputs() {
    let mut params = basic_ride(3.0, 30.0, 750.0);
    params.separate_bottles = true;
    params.carb_ratio_mode = CarbRatioMode::Balanced;

    let formula = calculate_formula(&params).unwrap();
    assert!(formula.osmolality_mosm_per_kg.is_none());
    assert!(formula.hydration_bottle.is_none());
    assert!(formula.fueling_bottle.is_none());
    assert!(formula.tonicity().is_none());

    // Balanced ratio is ignored outside advanced mode
    assert!(formula.maltodextrin_grams > formula.fructose_grams);

    let json = serde_json::to_value(&formula).unwrap();
    assert!(json.get("osmolality_mosm_per_kg").is_none());
    assert!(json.get("hydration_bottle").is_none());
    assert!(json.get("fueling_bottle").is_none());
}

#[test]
fn test_advanced_mode_reports_osmolality_only() {
    let formula =
        calculate_formula(&advanced_ride(2.0, 20.0, 750.0, CaffeineTolerance::Medium, false))
            .unwrap();
    let osmolality = formula.osmolality_mosm_per_kg.unwrap();
    assert!(osmolality > 0);
    assert_eq!(formula.tonicity(), Some(Tonicity::classify(osmolality)));
    assert!(!formula.has_split_bottles());
}

#[test]
fn test_split_bottles_carry_their_own_osmolality() {
    let formula =
        calculate_formula(&advanced_ride(3.0, 30.0, 750.0, CaffeineTolerance::Low, true)).unwrap();
    assert!(formula.has_split_bottles());

    let hydration = formula.hydration_bottle.as_ref().unwrap();
    let fueling = formula.fueling_bottle.as_ref().unwrap();

    assert_close(hydration.water_amount_ml, 750.0, 1e-9);
    assert_close(fueling.water_amount_ml, 750.0, 1e-9);
    assert_close(hydration.sodium_citrate_grams, formula.sodium_citrate_grams * 1.2, 0.15);
    assert_close(fueling.maltodextrin_grams, formula.maltodextrin_grams * 2.0, 0.2);
    assert_close(fueling.fructose_grams, formula.fructose_grams * 2.0, 0.2);
    assert_close(fueling.caffeine_mg, formula.caffeine_mg, 1.0);

    // Sodium-only and carb-only estimates differ from the combined mix
    let combined = formula.osmolality_mosm_per_kg.unwrap();
    assert_ne!(hydration.osmolality_mosm_per_kg, combined);
    assert_ne!(fueling.osmolality_mosm_per_kg, combined);
}

#[test]
fn test_balanced_ratio_in_advanced_mode() {
    let params = RideParameters::builder(2.0, 20.0, 750.0)
        .advanced(true)
        .carb_ratio_mode(CarbRatioMode::Balanced)
        .build()
        .unwrap();
    let formula = calculate_formula(&params).unwrap();
    assert_close(formula.maltodextrin_grams, formula.fructose_grams, 1e-9);
    assert_close(formula.maltodextrin_grams, 26.3, 1e-9);
}

// ============================================================================
// VALIDATION AND CONFIGURATION
// ============================================================================

#[test]
fn test_invalid_parameters_are_rejected() {
    let mut params = basic_ride(2.0, 20.0, 750.0);
    params.duration_hours = 0.0;
    let err = calculate_formula(&params).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParameter);
    assert_eq!(err.field(), Some("duration_hours"));

    let mut params = basic_ride(2.0, 20.0, 750.0);
    params.bottle_capacity_ml = -750.0;
    let err = calculate_formula(&params).unwrap_err();
    assert_eq!(err.field(), Some("bottle_capacity_ml"));

    let mut params = basic_ride(2.0, 20.0, 750.0);
    params.temperature_celsius = f64::NAN;
    let err = calculate_formula(&params).unwrap_err();
    assert_eq!(err.field(), Some("temperature_celsius"));
}

#[test]
fn test_tiny_bottle_capacity_is_rejected() {
    // 1e-306 overflows the bottle ratio; 1e-7 exceeds u32 bottles
    for bottle in [1e-306, 1e-7] {
        let params = basic_ride(2.0, 20.0, bottle);
        let err = calculate_formula(&params).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
        assert_eq!(err.field(), Some("bottle_capacity_ml"));
    }
}

#[test]
fn test_tuned_config_changes_result() {
    let mut config = FormulaConfig::default();
    config.carbohydrate.medium_intensity_g_per_hour = 90.0;
    config.carbohydrate.high_intensity_g_per_hour = 100.0;
    config.validate().unwrap();

    let params = basic_ride(4.0, 20.0, 750.0);
    let default = calculate_formula(&params).unwrap();
    let tuned = calculate_formula_with_config(&params, &config).unwrap();
    assert!(tuned.combined_carb_grams > default.combined_carb_grams);
    assert_eq!(tuned.bottles_needed, default.bottles_needed);
}

#[test]
fn test_legacy_parameter_json_calculates() {
    let json = r#"{"duration": 2, "temperature": 20, "bottle_size": 750,
                   "sweat_rate": "Medium", "intensity": "medium"}"#;
    let params: RideParameters = serde_json::from_str(json).unwrap();
    let formula = calculate_formula(&params).unwrap();
    assert_eq!(formula.bottles_needed, 2);
}
