// ABOUTME: Remembered settings commands for ride-fuel-cli
// ABOUTME: Shows or deletes the settings file used to prefill calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ride_fuel::{errors::AppResult, settings::SettingsStore};

use crate::helpers::display::display_settings;

/// Print the remembered settings
pub fn show(store: &SettingsStore) -> AppResult<()> {
    match store.load()? {
        Some(settings) => display_settings(&settings, store.path())?,
        None => println!("No remembered settings at {}", store.path().display()),
    }
    Ok(())
}

/// Delete the remembered settings
pub fn reset(store: &SettingsStore) -> AppResult<()> {
    if store.clear()? {
        println!("Removed remembered settings at {}", store.path().display());
    } else {
        println!("No remembered settings at {}", store.path().display());
    }
    Ok(())
}
