// ABOUTME: Ride Fuel CLI - computes sports-drink formulas from the command line
// ABOUTME: Parses ride flags, merges remembered settings, and prints the per-bottle recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Two hour ride at 20 °C with 750 ml bottles
//! ride-fuel-cli calculate --duration-hours 2 --temperature 20 --bottle-ml 750
//!
//! # Estimate time from distance, imperial input, advanced split bottles
//! ride-fuel-cli calculate --distance 60 --units imperial --temperature 90 \
//!     --advanced --separate-bottles --caffeine-tolerance high
//!
//! # Reuse the remembered settings, output JSON
//! ride-fuel-cli calculate --json
//!
//! # Remembered advanced mode off for this run, 24 fl oz bottles
//! ride-fuel-cli calculate --no-advanced --bottle-oz 24
//!
//! # Inspect or forget the remembered settings
//! ride-fuel-cli settings show
//! ride-fuel-cli settings reset
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand, ValueEnum};
use ride_fuel::{
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    models::{CaffeineTolerance, CarbAdaptation, CarbRatioMode, Intensity, SweatRate},
    settings::SettingsStore,
    units::UnitSystem,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "ride-fuel-cli",
    about = "Ride Fuel sports-drink formula calculator",
    long_about = "Computes per-bottle maltodextrin, fructose, sodium citrate, citric acid and caffeine amounts for a ride."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file override (defaults to the platform config directory)
    #[arg(long, global = true)]
    settings_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Calculate a drink formula
    Calculate(Box<CalculateArgs>),

    /// Remembered settings commands
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

/// Ride flags; any flag left out comes from the remembered settings
#[derive(clap::Args)]
struct CalculateArgs {
    /// Ride duration in hours
    #[arg(long, conflicts_with = "distance")]
    duration_hours: Option<f64>,

    /// Ride distance (km, or miles with --units imperial); duration is estimated
    #[arg(long)]
    distance: Option<f64>,

    /// Ambient temperature (°C, or °F with --units imperial)
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Sweat rate
    #[arg(long, value_enum)]
    sweat_rate: Option<LevelArg>,

    /// Ride intensity
    #[arg(long, value_enum)]
    intensity: Option<LevelArg>,

    /// Bottle volume in millilitres
    #[arg(long)]
    bottle_ml: Option<f64>,

    /// Bottle volume in US fluid ounces
    #[arg(long, conflicts_with = "bottle_ml")]
    bottle_oz: Option<f64>,

    /// Enable advanced mode (osmolality, carb ratio, caffeine tolerance, split bottles)
    #[arg(long)]
    advanced: bool,

    /// Turn advanced mode off even if remembered as on
    #[arg(long, conflicts_with = "advanced")]
    no_advanced: bool,

    /// Carbohydrate ratio (advanced)
    #[arg(long, value_enum)]
    carb_ratio: Option<CarbRatioArg>,

    /// Carbohydrate gut adaptation (advanced)
    #[arg(long, value_enum)]
    carb_adaptation: Option<LevelArg>,

    /// Caffeine tolerance (advanced)
    #[arg(long, value_enum)]
    caffeine_tolerance: Option<LevelArg>,

    /// Split into hydration and fueling bottles (advanced)
    #[arg(long)]
    separate_bottles: bool,

    /// Use a single bottle recipe even if splitting was remembered
    #[arg(long, conflicts_with = "separate_bottles")]
    no_separate_bottles: bool,

    /// Unit system for temperature and distance input and for display
    #[arg(long, value_enum)]
    units: Option<UnitsArg>,

    /// Remember these inputs for the next run
    #[arg(long)]
    save: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the remembered settings
    Show,

    /// Forget the remembered settings
    Reset,
}

/// Low/medium/high flag value
#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Low,
    Medium,
    High,
}

impl From<LevelArg> for SweatRate {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Low => Self::Low,
            LevelArg::Medium => Self::Medium,
            LevelArg::High => Self::High,
        }
    }
}

impl From<LevelArg> for Intensity {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Low => Self::Low,
            LevelArg::Medium => Self::Medium,
            LevelArg::High => Self::High,
        }
    }
}

impl From<LevelArg> for CaffeineTolerance {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Low => Self::Low,
            LevelArg::Medium => Self::Medium,
            LevelArg::High => Self::High,
        }
    }
}

impl From<LevelArg> for CarbAdaptation {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Low => Self::Low,
            LevelArg::Medium => Self::Medium,
            LevelArg::High => Self::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CarbRatioArg {
    MaltodextrinDominant,
    Balanced,
}

impl From<CarbRatioArg> for CarbRatioMode {
    fn from(ratio: CarbRatioArg) -> Self {
        match ratio {
            CarbRatioArg::MaltodextrinDominant => Self::MaltodextrinDominant,
            CarbRatioArg::Balanced => Self::Balanced,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for UnitSystem {
    fn from(units: UnitsArg) -> Self {
        match units {
            UnitsArg::Metric => Self::Metric,
            UnitsArg::Imperial => Self::Imperial,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let exit_code = ExitCode::from(u8::try_from(error.code.exit_code()).unwrap_or(1));
            if json {
                helpers::display::display_error_json(error);
            } else {
                eprintln!("Error: {error}");
                if let Some(field) = error.field() {
                    eprintln!("  field: {field}");
                }
            }
            exit_code
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    LoggingConfig::from_env()
        .with_verbose(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let store = match cli.settings_file {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::open_default()?,
    };
    debug!(path = %store.path().display(), "Using settings file");

    match cli.command {
        Command::Calculate(args) => commands::calculate::run(&store, &args, cli.json),
        Command::Settings { action } => match action {
            SettingsCommand::Show => commands::settings::show(&store),
            SettingsCommand::Reset => commands::settings::reset(&store),
        },
    }
}
