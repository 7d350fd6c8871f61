// ABOUTME: Remembered ride settings persisted as JSON between CLI runs
// ABOUTME: Stores the last-used inputs under a fixed key in the platform config directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Remembered settings
//!
//! The formula engine never touches storage. Callers pass an explicit
//! [`RideSettings`] value in and out of a [`SettingsStore`].

use chrono::{DateTime, Utc};
use ride_fuel_core::constants::storage::{APP_DIR_NAME, SETTINGS_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::models::{
    CaffeineTolerance, CarbAdaptation, CarbRatioMode, Intensity, RideParameters, SweatRate,
};
use crate::units::UnitSystem;

/// Last-used ride inputs
///
/// `temperature` is stored in the unit system the rider chose, so that a rider
/// entering Fahrenheit sees Fahrenheit again. Durations and bottle sizes are
/// always hours and millilitres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideSettings {
    /// Ride duration (hours)
    pub duration_hours: f64,
    /// Ambient temperature in `unit_system` units
    pub temperature: f64,
    /// Rider sweat rate
    pub sweat_rate: SweatRate,
    /// Ride intensity
    pub intensity: Intensity,
    /// Bottle volume (ml)
    pub bottle_capacity_ml: f64,
    /// Display and input unit system
    pub unit_system: UnitSystem,
    /// Advanced mode
    pub advanced: bool,
    /// Carbohydrate split (advanced only)
    pub carb_ratio_mode: CarbRatioMode,
    /// Carbohydrate gut adaptation (advanced only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb_adaptation: Option<CarbAdaptation>,
    /// Caffeine tolerance (advanced only)
    pub caffeine_tolerance: CaffeineTolerance,
    /// Two-bottle strategy (advanced only)
    pub separate_bottles: bool,
    /// When the settings were last saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for RideSettings {
    fn default() -> Self {
        Self {
            duration_hours: 2.0,
            temperature: 20.0,
            sweat_rate: SweatRate::Medium,
            intensity: Intensity::Medium,
            bottle_capacity_ml: 750.0,
            unit_system: UnitSystem::Metric,
            advanced: false,
            carb_ratio_mode: CarbRatioMode::MaltodextrinDominant,
            carb_adaptation: None,
            caffeine_tolerance: CaffeineTolerance::Medium,
            separate_bottles: false,
            saved_at: None,
        }
    }
}

impl RideSettings {
    /// Temperature in Celsius regardless of the chosen unit system
    #[must_use]
    pub fn temperature_celsius(&self) -> f64 {
        self.unit_system.temperature_to_celsius(self.temperature)
    }

    /// Convert to engine parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the stored values violate the parameter invariants
    pub fn to_ride_parameters(&self) -> AppResult<RideParameters> {
        let mut builder = RideParameters::builder(
            self.duration_hours,
            self.temperature_celsius(),
            self.bottle_capacity_ml,
        )
        .sweat_rate(self.sweat_rate)
        .intensity(self.intensity)
        .advanced(self.advanced)
        .carb_ratio_mode(self.carb_ratio_mode)
        .caffeine_tolerance(self.caffeine_tolerance)
        .separate_bottles(self.separate_bottles);

        if let Some(adaptation) = self.carb_adaptation {
            builder = builder.carb_adaptation(adaptation);
        }
        builder.build()
    }
}

/// JSON file store for [`RideSettings`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by an explicit file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/ride-fuel/ride-fuel-calculator-settings.json`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the platform has no config directory
    pub fn default_path() -> AppResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            AppError::storage("No configuration directory available on this platform")
        })?;
        Ok(base.join(APP_DIR_NAME).join(format!("{SETTINGS_KEY}.json")))
    }

    /// Store at the default location
    ///
    /// # Errors
    ///
    /// Returns a storage error if the platform has no config directory
    pub fn open_default() -> AppResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the remembered settings
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read, or a serialization
    /// error if it is not valid settings JSON
    pub fn load(&self) -> AppResult<Option<RideSettings>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No remembered settings");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let settings = serde_json::from_str(&contents).map_err(|e| {
            AppError::serialization(format!(
                "Remembered settings at {} are corrupt: {e}",
                self.path.display()
            ))
            .with_source(e)
        })?;
        Ok(Some(settings))
    }

    /// Save settings, stamping `saved_at` and creating parent directories
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file or its directory cannot be written
    pub fn save(&self, settings: &RideSettings) -> AppResult<RideSettings> {
        let mut stamped = settings.clone();
        stamped.saved_at = Some(Utc::now());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&stamped)?;
        fs::write(&self.path, json)?;

        info!(path = %self.path.display(), "Saved ride settings");
        Ok(stamped)
    }

    /// Delete the remembered settings
    ///
    /// Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be removed
    pub fn clear(&self) -> AppResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Cleared ride settings");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
