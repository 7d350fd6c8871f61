// ABOUTME: Re-exports the unified error types from ride-fuel-core
// ABOUTME: Keeps `ride_fuel::errors::*` paths stable for library callers and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Error types, re-exported from `ride_fuel_core::errors`

pub use ride_fuel_core::errors::*;
