// ABOUTME: Main library entry point for the Ride Fuel formula engine
// ABOUTME: Computes per-bottle sports-drink formulas for cyclists from ride parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ride Fuel
//!
//! A formula engine that turns ride parameters (duration, temperature, sweat
//! rate, intensity, bottle size and optional advanced knobs) into a mixing
//! recipe: maltodextrin, fructose, sodium citrate, citric acid and caffeine per
//! bottle, plus bottle count, calories, osmolality and an optional split into a
//! hydration bottle and a fueling bottle.
//!
//! ## Architecture
//!
//! - **intelligence**: the pure formula engine, one module per calculation stage
//! - **config**: tunable constants with environment overrides
//! - **models / errors**: re-exported from `ride-fuel-core`
//! - **units**: metric/imperial conversion for callers
//! - **settings**: remembered inputs for the CLI
//! - **logging**: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```rust
//! use ride_fuel::errors::AppResult;
//! use ride_fuel::intelligence::calculate_formula;
//! use ride_fuel::models::{Intensity, RideParameters};
//!
//! fn main() -> AppResult<()> {
//!     let params = RideParameters::builder(2.0, 20.0, 750.0)
//!         .intensity(Intensity::Medium)
//!         .build()?;
//!     let formula = calculate_formula(&params)?;
//!     assert_eq!(formula.bottles_needed, 2);
//!     Ok(())
//! }
//! ```

/// Formula engine configuration
pub mod config;

/// Error types re-exported from the core crate
pub mod errors;

/// Formula engine stages
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Data models re-exported from the core crate
pub mod models;

/// Remembered ride settings
pub mod settings;

/// Unit conversion
pub mod units;

pub use intelligence::{calculate_formula, calculate_formula_with_config};
