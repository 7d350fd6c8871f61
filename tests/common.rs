// ABOUTME: Shared test utilities for Ride Fuel integration tests
// ABOUTME: Logging setup and ride parameter fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use ride_fuel::models::{CaffeineTolerance, Intensity, RideParameters, SweatRate};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests
///
/// Set `TEST_LOG=DEBUG` to see engine stage logs.
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Basic-mode ride with medium levels
pub fn basic_ride(duration_hours: f64, temperature_celsius: f64, bottle_ml: f64) -> RideParameters {
    RideParameters::builder(duration_hours, temperature_celsius, bottle_ml)
        .build()
        .unwrap()
}

/// Fully specified basic-mode ride
pub fn ride_with_levels(
    duration_hours: f64,
    temperature_celsius: f64,
    sweat_rate: SweatRate,
    intensity: Intensity,
    bottle_ml: f64,
) -> RideParameters {
    RideParameters::builder(duration_hours, temperature_celsius, bottle_ml)
        .sweat_rate(sweat_rate)
        .intensity(intensity)
        .build()
        .unwrap()
}

/// Advanced-mode ride
pub fn advanced_ride(
    duration_hours: f64,
    temperature_celsius: f64,
    bottle_ml: f64,
    tolerance: CaffeineTolerance,
    separate_bottles: bool,
) -> RideParameters {
    RideParameters::builder(duration_hours, temperature_celsius, bottle_ml)
        .advanced(true)
        .caffeine_tolerance(tolerance)
        .separate_bottles(separate_bottles)
        .build()
        .unwrap()
}

/// Approximate float equality for computed quantities
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}
