// ABOUTME: Formula engine modules for carbohydrate, fluid, electrolyte and caffeine dosing
// ABOUTME: Re-exports the engine entry points and per-stage calculators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! The formula engine. Every stage is a pure function of its inputs and a
//! configuration section; [`calculate_formula`] chains them.

/// Caffeine dosing
pub mod caffeine;
/// Carbohydrate requirement and split
pub mod carbohydrate;
/// Engine entry point and bottle distribution
pub mod formula_calculator;
/// Fluid and electrolyte requirements
pub mod hydration;
/// Osmolality estimate and two-bottle split
pub mod osmolality;
/// Ride time from distance
pub mod ride_estimation;

pub use caffeine::calculate_caffeine;
pub use carbohydrate::{calculate_carb_requirement, split_carbohydrates, CarbRequirement, CarbSplit};
pub use formula_calculator::{bottles_needed, calculate_formula, calculate_formula_with_config};
pub use hydration::{
    calculate_fluid_requirement, calculate_sodium_and_acid, ElectrolyteRequirement,
    FluidRequirement,
};
pub use osmolality::{estimate_osmolality, BottleContents};
pub use ride_estimation::estimate_ride_hours;
