// ABOUTME: Configuration module for formula constants and their validation
// ABOUTME: Exposes FormulaConfig sections and the configuration error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Ride Fuel
//!
//! - **Formula**: constants for every calculation stage, with environment overrides
//! - **Error**: validation and parse errors raised while loading configuration
//!
//! Logging configuration lives in [`crate::logging`]; remembered ride settings
//! live in [`crate::settings`].

/// Configuration error types
pub mod error;
/// Formula engine constants and environment overrides
pub mod formula;

pub use error::ConfigError;
pub use formula::{
    BottleSplitConfig, CaffeineConfig, CarbohydrateConfig, ElectrolyteConfig, FormulaConfig,
    HydrationConfig, OsmolalityConfig, RideEstimationConfig,
};
