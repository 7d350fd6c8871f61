// ABOUTME: Core types and constants for the Ride Fuel formula engine
// ABOUTME: Foundation crate with error handling, ride/formula models, and unit constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ride Fuel Core
//!
//! Foundation crate providing the shared types of the Ride Fuel formula engine.
//! It changes infrequently and carries no calculation logic, so callers that only
//! need to build parameters or read results can depend on it alone.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Unit conversion factors and schema constants
//! - **models**: Ride parameters, formula results, and their enumerations

/// Unified error handling system with standard error codes
pub mod errors;

/// Unit conversion factors and schema constants
pub mod constants;

/// Ride parameter and formula result models
pub mod models;
