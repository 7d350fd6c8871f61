// ABOUTME: Formula result model returned by the ride fuel engine
// ABOUTME: Per-bottle ingredient amounts, ride totals, osmolality and the optional two-bottle split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Osmolality band of a drink relative to blood plasma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tonicity {
    /// Below 270 mOsm/kg
    Hypotonic,
    /// 270-290 mOsm/kg, plasma matched
    Isotonic,
    /// Above 290 mOsm/kg
    Hypertonic,
}

impl Tonicity {
    /// Upper bound of the hypotonic band (exclusive)
    pub const ISOTONIC_LOWER_MOSM: u32 = 270;
    /// Upper bound of the isotonic band (inclusive)
    pub const ISOTONIC_UPPER_MOSM: u32 = 290;

    /// Classify an osmolality value for display
    #[must_use]
    pub const fn classify(osmolality_mosm_per_kg: u32) -> Self {
        if osmolality_mosm_per_kg < Self::ISOTONIC_LOWER_MOSM {
            Self::Hypotonic
        } else if osmolality_mosm_per_kg <= Self::ISOTONIC_UPPER_MOSM {
            Self::Isotonic
        } else {
            Self::Hypertonic
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hypotonic => "hypotonic",
            Self::Isotonic => "isotonic",
            Self::Hypertonic => "hypertonic",
        }
    }
}

impl fmt::Display for Tonicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Electrolyte-only bottle of the two-bottle strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationBottle {
    /// Water volume (ml)
    pub water_amount_ml: f64,
    /// Sodium citrate (g, 0.1 g precision)
    pub sodium_citrate_grams: f64,
    /// Citric acid (g, 0.1 g precision)
    pub citric_acid_grams: f64,
    /// Estimated osmolality from this bottle's own sodium citrate
    pub osmolality_mosm_per_kg: u32,
}

/// Carbohydrate and caffeine bottle of the two-bottle strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelingBottle {
    /// Water volume (ml)
    pub water_amount_ml: f64,
    /// Maltodextrin (g, 0.1 g precision)
    pub maltodextrin_grams: f64,
    /// Fructose (g, 0.1 g precision)
    pub fructose_grams: f64,
    /// Caffeine (mg, whole units)
    pub caffeine_mg: f64,
    /// Citric acid (g, 0.1 g precision)
    pub citric_acid_grams: f64,
    /// Estimated osmolality from this bottle's own carbohydrates
    pub osmolality_mosm_per_kg: u32,
}

/// Complete formula for one ride
///
/// Ingredient amounts are per single bottle; `total_fluid_required_ml` and
/// `bottles_needed` describe the whole ride. Advanced-only outputs are `None`
/// when they were not computed and are omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaResult {
    /// Water per bottle (ml), equal to the bottle capacity
    pub water_amount_ml: f64,
    /// Sodium citrate per bottle (g)
    pub sodium_citrate_grams: f64,
    /// Citric acid per bottle (g)
    pub citric_acid_grams: f64,
    /// Maltodextrin per bottle (g)
    pub maltodextrin_grams: f64,
    /// Fructose per bottle (g)
    pub fructose_grams: f64,
    /// Maltodextrin plus fructose per bottle (g)
    pub combined_carb_grams: f64,
    /// Caffeine per bottle (mg)
    pub caffeine_mg: f64,
    /// Echo of the ride duration (hours)
    pub total_ride_hours: f64,
    /// Carbohydrate energy per bottle (kcal)
    pub total_calories_per_bottle: u32,
    /// Number of bottles required to carry the total fluid need
    pub bottles_needed: u32,
    /// Fluid need for the whole ride (ml)
    pub total_fluid_required_ml: f64,
    /// Estimated osmolality of one bottle (advanced mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osmolality_mosm_per_kg: Option<u32>,
    /// Electrolyte bottle (advanced mode with separate bottles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydration_bottle: Option<HydrationBottle>,
    /// Fueling bottle (advanced mode with separate bottles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fueling_bottle: Option<FuelingBottle>,
    /// Result schema version
    pub schema_version: u32,
}

impl FormulaResult {
    /// Tonicity band of the single-bottle mix, when osmolality was computed
    #[must_use]
    pub fn tonicity(&self) -> Option<Tonicity> {
        self.osmolality_mosm_per_kg.map(Tonicity::classify)
    }

    /// Whether the two-bottle split is present
    #[must_use]
    pub const fn has_split_bottles(&self) -> bool {
        self.hydration_bottle.is_some() && self.fueling_bottle.is_some()
    }

    /// Preparation steps for one bottle
    #[must_use]
    pub fn mix_instructions(&self) -> Vec<String> {
        vec![
            "Measure all ingredients precisely".to_owned(),
            format!("Add to your {:.0} ml bottle", self.water_amount_ml),
            "Shake thoroughly until dissolved".to_owned(),
            "Best consumed cold".to_owned(),
        ]
    }
}
