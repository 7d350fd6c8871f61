// ABOUTME: Osmolality estimation and the hydration/fueling two-bottle split
// ABOUTME: Derives each split bottle's ingredients and osmolality from the single-bottle amounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Osmolality Estimator & Dual-Bottle Splitter
//!
//! The estimate is a linear approximation: every gram of carbohydrate and every
//! milligram of sodium citrate contributes a fixed number of milliosmoles, and the
//! sum is normalized to one kilogram of water. It is good enough to place a mix in
//! its tonicity band, not to replace a lab measurement.

use crate::config::{BottleSplitConfig, OsmolalityConfig};
use crate::models::{FuelingBottle, HydrationBottle};
use ride_fuel_core::constants::units::{GRAMS_PER_KILOGRAM, MG_PER_GRAM};

use super::formula_calculator::{round_grams, round_milligrams};

/// Unrounded single-bottle amounts the split is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottleContents {
    /// Water volume (ml)
    pub water_ml: f64,
    /// Maltodextrin (g)
    pub maltodextrin_g: f64,
    /// Fructose (g)
    pub fructose_g: f64,
    /// Sodium citrate (g)
    pub sodium_citrate_g: f64,
    /// Citric acid (g)
    pub citric_acid_g: f64,
    /// Caffeine (mg)
    pub caffeine_mg: f64,
}

/// Estimate the osmolality of a mix (mOsm/kg)
///
/// Formula: `round(((m + f) * carb_factor + sc * 1000 * sodium_factor) / water * 1000)`
///
/// `water_ml` must be positive.
#[must_use]
pub fn estimate_osmolality(
    maltodextrin_g: f64,
    fructose_g: f64,
    sodium_citrate_g: f64,
    water_ml: f64,
    config: &OsmolalityConfig,
) -> u32 {
    let carb_contribution = (maltodextrin_g + fructose_g) * config.carb_factor_per_gram;
    let electrolyte_contribution =
        sodium_citrate_g * MG_PER_GRAM * config.sodium_citrate_factor_per_mg;
    let mosm = ((carb_contribution + electrolyte_contribution) / water_ml * GRAMS_PER_KILOGRAM)
        .round();
    mosm.max(0.0) as u32
}

/// Build the electrolyte-only bottle
///
/// Sodium and citric acid are scaled; osmolality reflects its own sodium only.
#[must_use]
pub fn hydration_bottle(
    contents: &BottleContents,
    split: &BottleSplitConfig,
    osmolality: &OsmolalityConfig,
) -> HydrationBottle {
    let sodium_citrate_g = contents.sodium_citrate_g * split.hydration_sodium_multiplier;
    let citric_acid_g = contents.citric_acid_g * split.hydration_citric_acid_multiplier;

    HydrationBottle {
        water_amount_ml: contents.water_ml,
        sodium_citrate_grams: round_grams(sodium_citrate_g),
        citric_acid_grams: round_grams(citric_acid_g),
        osmolality_mosm_per_kg: estimate_osmolality(
            0.0,
            0.0,
            sodium_citrate_g,
            contents.water_ml,
            osmolality,
        ),
    }
}

/// Build the carbohydrate and caffeine bottle
///
/// Carbohydrates are concentrated, all caffeine moves here, and no sodium is
/// added; osmolality reflects its own carbohydrates only.
#[must_use]
pub fn fueling_bottle(
    contents: &BottleContents,
    split: &BottleSplitConfig,
    osmolality: &OsmolalityConfig,
) -> FuelingBottle {
    let maltodextrin_g = contents.maltodextrin_g * split.fueling_carb_multiplier;
    let fructose_g = contents.fructose_g * split.fueling_carb_multiplier;
    let citric_acid_g = contents.citric_acid_g * split.fueling_citric_acid_multiplier;

    FuelingBottle {
        water_amount_ml: contents.water_ml,
        maltodextrin_grams: round_grams(maltodextrin_g),
        fructose_grams: round_grams(fructose_g),
        caffeine_mg: round_milligrams(contents.caffeine_mg),
        citric_acid_grams: round_grams(citric_acid_g),
        osmolality_mosm_per_kg: estimate_osmolality(
            maltodextrin_g,
            fructose_g,
            0.0,
            contents.water_ml,
            osmolality,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contents() -> BottleContents {
        BottleContents {
            water_ml: 750.0,
            maltodextrin_g: 30.0,
            fructose_g: 20.0,
            sodium_citrate_g: 2.0,
            citric_acid_g: 1.0,
            caffeine_mg: 60.0,
        }
    }

    #[test]
    fn test_osmolality_formula() {
        let config = OsmolalityConfig::default();
        // (50 * 5 + 2 * 1000 * 3) / 750 * 1000 = 8333.33
        assert_eq!(estimate_osmolality(30.0, 20.0, 2.0, 750.0, &config), 8333);
        assert_eq!(estimate_osmolality(0.0, 0.0, 0.0, 750.0, &config), 0);
    }

    #[test]
    fn test_split_moves_carbs_and_caffeine_to_fueling_bottle() {
        let contents = sample_contents();
        let split = BottleSplitConfig::default();
        let osmo = OsmolalityConfig::default();

        let hydration = hydration_bottle(&contents, &split, &osmo);
        assert!((hydration.sodium_citrate_grams - 2.4).abs() < 1e-9);
        assert!((hydration.citric_acid_grams - 0.5).abs() < 1e-9);
        assert_eq!(hydration.osmolality_mosm_per_kg, 9600);

        let fueling = fueling_bottle(&contents, &split, &osmo);
        assert!((fueling.maltodextrin_grams - 60.0).abs() < 1e-9);
        assert!((fueling.fructose_grams - 40.0).abs() < 1e-9);
        assert!((fueling.citric_acid_grams - 1.5).abs() < 1e-9);
        assert!((fueling.caffeine_mg - 60.0).abs() < 1e-9);
        // 100 * 5 / 750 * 1000
        assert_eq!(fueling.osmolality_mosm_per_kg, 667);
    }
}
