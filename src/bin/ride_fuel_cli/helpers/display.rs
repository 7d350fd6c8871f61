// ABOUTME: Output formatting helpers for ride-fuel-cli
// ABOUTME: Renders formulas as text or JSON and prints remembered settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ride_fuel::{
    errors::{AppError, AppResult, ErrorResponse},
    models::FormulaResult,
    settings::RideSettings,
    units::{grams_to_ounces, ml_to_fl_oz, UnitSystem},
};
use std::path::Path;

fn volume(ml: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{ml:.0} ml"),
        UnitSystem::Imperial => format!("{:.1} fl oz ({ml:.0} ml)", ml_to_fl_oz(ml)),
    }
}

fn mass(grams: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{grams:.1} g"),
        UnitSystem::Imperial => format!("{grams:.1} g ({:.2} oz)", grams_to_ounces(grams)),
    }
}

/// Print a formula as readable text
pub fn display_formula(formula: &FormulaResult, settings: &RideSettings) {
    let units = settings.unit_system;

    println!("\nRide Fuel Formula");
    println!("{}", "=".repeat(50));
    println!(
        "Ride: {:.1} h at {:.0}{}, {} intensity, {} sweat rate",
        formula.total_ride_hours,
        settings.temperature,
        units.temperature_label(),
        settings.intensity,
        settings.sweat_rate
    );
    println!(
        "Bottles needed: {} (total fluid {})",
        formula.bottles_needed,
        volume(formula.total_fluid_required_ml, units)
    );

    println!("\nPer bottle ({}):", volume(formula.water_amount_ml, units));
    println!("   Maltodextrin:   {}", mass(formula.maltodextrin_grams, units));
    println!("   Fructose:       {}", mass(formula.fructose_grams, units));
    println!("   Sodium citrate: {}", mass(formula.sodium_citrate_grams, units));
    println!("   Citric acid:    {}", mass(formula.citric_acid_grams, units));
    println!("   Caffeine:       {:.0} mg", formula.caffeine_mg);
    println!(
        "   Carbohydrate:   {} ({} kcal)",
        mass(formula.combined_carb_grams, units),
        formula.total_calories_per_bottle
    );

    if let (Some(osmolality), Some(tonicity)) = (formula.osmolality_mosm_per_kg, formula.tonicity())
    {
        println!("   Osmolality:     {osmolality} mOsm/kg ({tonicity})");
    }

    if let Some(hydration) = &formula.hydration_bottle {
        println!("\nHydration bottle ({}):", volume(hydration.water_amount_ml, units));
        println!("   Sodium citrate: {}", mass(hydration.sodium_citrate_grams, units));
        println!("   Citric acid:    {}", mass(hydration.citric_acid_grams, units));
        println!("   Osmolality:     {} mOsm/kg", hydration.osmolality_mosm_per_kg);
    }
    if let Some(fueling) = &formula.fueling_bottle {
        println!("\nFueling bottle ({}):", volume(fueling.water_amount_ml, units));
        println!("   Maltodextrin:   {}", mass(fueling.maltodextrin_grams, units));
        println!("   Fructose:       {}", mass(fueling.fructose_grams, units));
        println!("   Citric acid:    {}", mass(fueling.citric_acid_grams, units));
        println!("   Caffeine:       {:.0} mg", fueling.caffeine_mg);
        println!("   Osmolality:     {} mOsm/kg", fueling.osmolality_mosm_per_kg);
    }

    println!("\nMixing:");
    for (step, instruction) in formula.mix_instructions().iter().enumerate() {
        println!("{}. {instruction}", step + 1);
    }
}

/// Print a formula as pretty JSON
pub fn display_formula_json(formula: &FormulaResult) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(formula)?);
    Ok(())
}

/// Render an error as the `{"error": {code, message, details}}` envelope
pub fn error_json(error: AppError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ErrorResponse::from(error))
}

/// Print an error as JSON on stdout, falling back to plain text on stderr
pub fn display_error_json(error: AppError) {
    let plain = error.to_string();
    match error_json(error) {
        Ok(body) => println!("{body}"),
        Err(e) => eprintln!("Error: {plain} (JSON rendering failed: {e})"),
    }
}

/// Print remembered settings as pretty JSON with their location
pub fn display_settings(settings: &RideSettings, path: &Path) -> AppResult<()> {
    println!("Remembered settings ({}):", path.display());
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
