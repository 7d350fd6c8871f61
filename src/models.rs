// ABOUTME: Re-exports ride parameter and formula result models from ride-fuel-core
// ABOUTME: Lets callers depend on the root crate alone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models, re-exported from `ride_fuel_core::models`

pub use ride_fuel_core::models::*;
