// ABOUTME: Ride duration estimate from planned distance and intensity
// ABOUTME: Used by callers that plan by distance rather than by time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::RideEstimationConfig;
use crate::errors::{AppError, AppResult};
use crate::models::Intensity;
use tracing::debug;

/// Expected average speed for an intensity (km/h)
#[must_use]
pub fn estimated_speed_kmh(intensity: Intensity, config: &RideEstimationConfig) -> f64 {
    let factor = match intensity {
        Intensity::Low => config.low_intensity_speed_factor,
        Intensity::Medium => 1.0,
        Intensity::High => config.high_intensity_speed_factor,
    };
    config.baseline_speed_kmh * factor
}

/// Estimate ride hours from a distance
///
/// `max(min_ride_hours, round1(distance / speed))`
///
/// # Errors
///
/// Returns `InvalidParameter` if the distance is not a positive finite number
pub fn estimate_ride_hours(
    distance_km: f64,
    intensity: Intensity,
    config: &RideEstimationConfig,
) -> AppResult<f64> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(AppError::invalid_parameter(
            "distance_km",
            format!("Distance must be a positive number of kilometres, got {distance_km}"),
        ));
    }

    let speed = estimated_speed_kmh(intensity, config);
    let hours = ((distance_km / speed) * 10.0).round() / 10.0;
    let hours = hours.max(config.min_ride_hours);
    debug!(distance_km, speed_kmh = speed, hours, "Estimated ride time from distance");
    Ok(hours)
}
