// ABOUTME: Data models for ride parameters and formula results
// ABOUTME: Re-exports the input and output types of the formula engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Formula result and two-bottle split types
pub mod formula;
/// Ride parameters and their level enumerations
pub mod ride;

pub use formula::{FormulaResult, FuelingBottle, HydrationBottle, Tonicity};
pub use ride::{
    CaffeineTolerance, CarbAdaptation, CarbRatioMode, Intensity, RideParameters,
    RideParametersBuilder, SweatRate,
};
