// ABOUTME: Unit conversion and schema constants shared across the workspace
// ABOUTME: Provides named constants to eliminate magic numbers in calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Unit conversion factors
pub mod units {
    /// Millilitres per litre
    pub const ML_PER_LITER: f64 = 1000.0;

    /// Milligrams per gram
    pub const MG_PER_GRAM: f64 = 1000.0;

    /// Grams per kilogram of water (osmolality is expressed per kg)
    pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

    /// Kilometres per statute mile
    pub const KM_PER_MILE: f64 = 1.60934;

    /// Millilitres per US fluid ounce
    pub const ML_PER_US_FL_OZ: f64 = 29.5735;

    /// Grams per avoirdupois ounce
    pub const GRAMS_PER_OUNCE: f64 = 28.3495;

    /// Fahrenheit degrees per Celsius degree
    pub const FAHRENHEIT_PER_CELSIUS: f64 = 9.0 / 5.0;

    /// Fahrenheit value of 0 °C
    pub const FAHRENHEIT_FREEZING_POINT: f64 = 32.0;
}

/// Energy density constants
pub mod energy {
    /// Kilocalories per gram of carbohydrate (Atwater factor)
    pub const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;
}

/// Parameter and result schema versions
pub mod schema {
    /// Current version of the ride parameter shape (duration based)
    ///
    /// Version 1 was the distance-based shape without split carbohydrates.
    pub const PARAMETER_SCHEMA_VERSION: u32 = 2;

    /// Current version of the formula result shape
    pub const RESULT_SCHEMA_VERSION: u32 = 2;
}

/// Settings persistence constants
pub mod storage {
    /// Fixed key under which the last-used ride settings are remembered
    pub const SETTINGS_KEY: &str = "ride-fuel-calculator-settings";

    /// Application directory name inside the platform config directory
    pub const APP_DIR_NAME: &str = "ride-fuel";
}
