// ABOUTME: Caffeine dosing for a ride with tolerance-based rates and a hard ceiling
// ABOUTME: Basic mode uses one fixed hourly rate; advanced mode selects by tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::CaffeineConfig;
use crate::models::CaffeineTolerance;

/// Hourly caffeine rate (mg/h)
#[must_use]
pub const fn hourly_caffeine_rate(
    advanced: bool,
    tolerance: CaffeineTolerance,
    config: &CaffeineConfig,
) -> f64 {
    if !advanced {
        return config.default_mg_per_hour;
    }
    match tolerance {
        CaffeineTolerance::Low => config.low_tolerance_mg_per_hour,
        CaffeineTolerance::Medium => config.default_mg_per_hour,
        CaffeineTolerance::High => config.high_tolerance_mg_per_hour,
    }
}

/// Total caffeine for the ride, never above `max_total_mg`
#[must_use]
pub fn calculate_caffeine(
    duration_hours: f64,
    advanced: bool,
    tolerance: CaffeineTolerance,
    config: &CaffeineConfig,
) -> f64 {
    (hourly_caffeine_rate(advanced, tolerance, config) * duration_hours).min(config.max_total_mg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_ignored_in_basic_mode() {
        let config = CaffeineConfig::default();
        let total = calculate_caffeine(2.0, false, CaffeineTolerance::High, &config);
        assert!((total - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ceiling_applies() {
        let config = CaffeineConfig::default();
        let total = calculate_caffeine(6.0, true, CaffeineTolerance::High, &config);
        assert!((total - 400.0).abs() < f64::EPSILON);
        let low = calculate_caffeine(6.0, true, CaffeineTolerance::Low, &config);
        assert!((low - 240.0).abs() < f64::EPSILON);
    }
}
