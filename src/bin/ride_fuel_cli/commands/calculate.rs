// ABOUTME: Formula calculation command for ride-fuel-cli
// ABOUTME: Merges flags over remembered settings, runs the engine, prints and optionally saves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ride_fuel::{
    config::FormulaConfig,
    errors::AppResult,
    intelligence::{calculate_formula_with_config, ride_estimation::estimate_ride_hours},
    settings::{RideSettings, SettingsStore},
    units::{fl_oz_to_ml, UnitSystem},
};
use tracing::{debug, info};

use crate::helpers::display::{display_formula, display_formula_json};
use crate::CalculateArgs;

/// Calculate and print a formula
pub fn run(store: &SettingsStore, args: &CalculateArgs, json: bool) -> AppResult<()> {
    let config = FormulaConfig::global();

    let remembered = store.load()?;
    if remembered.is_some() {
        debug!("Starting from remembered settings");
    }
    let settings = merge_args(remembered.unwrap_or_default(), args, config)?;

    let params = settings.to_ride_parameters()?;
    let formula = calculate_formula_with_config(&params, config)?;

    if json {
        display_formula_json(&formula)?;
    } else {
        display_formula(&formula, &settings);
    }

    if args.save {
        store.save(&settings)?;
        info!("Remembered settings for the next run");
    }

    Ok(())
}

/// Apply command-line flags on top of remembered settings
pub(crate) fn merge_args(
    mut settings: RideSettings,
    args: &CalculateArgs,
    config: &FormulaConfig,
) -> AppResult<RideSettings> {
    if let Some(units) = args.units {
        let units = UnitSystem::from(units);
        if units != settings.unit_system {
            // Keep the remembered temperature meaningful in the new unit system
            let celsius = settings.temperature_celsius();
            settings.temperature = match units {
                UnitSystem::Metric => celsius,
                UnitSystem::Imperial => ride_fuel::units::celsius_to_fahrenheit(celsius),
            };
            settings.unit_system = units;
        }
    }

    if let Some(intensity) = args.intensity {
        settings.intensity = intensity.into();
    }
    if let Some(duration) = args.duration_hours {
        settings.duration_hours = duration;
    }
    if let Some(distance) = args.distance {
        let distance_km = settings.unit_system.distance_to_km(distance);
        settings.duration_hours =
            estimate_ride_hours(distance_km, settings.intensity, &config.ride_estimation)?;
    }
    if let Some(temperature) = args.temperature {
        settings.temperature = temperature;
    }
    if let Some(sweat_rate) = args.sweat_rate {
        settings.sweat_rate = sweat_rate.into();
    }
    if let Some(bottle_ml) = args.bottle_ml {
        settings.bottle_capacity_ml = bottle_ml;
    } else if let Some(bottle_oz) = args.bottle_oz {
        settings.bottle_capacity_ml = fl_oz_to_ml(bottle_oz);
    }
    if args.advanced {
        settings.advanced = true;
    } else if args.no_advanced {
        settings.advanced = false;
    }
    if let Some(ratio) = args.carb_ratio {
        settings.carb_ratio_mode = ratio.into();
    }
    if let Some(adaptation) = args.carb_adaptation {
        settings.carb_adaptation = Some(adaptation.into());
    }
    if let Some(tolerance) = args.caffeine_tolerance {
        settings.caffeine_tolerance = tolerance.into();
    }
    if args.separate_bottles {
        settings.separate_bottles = true;
    } else if args.no_separate_bottles {
        settings.separate_bottles = false;
    }

    Ok(settings)
}
