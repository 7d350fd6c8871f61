// ABOUTME: Configuration error types for formula constant validation
// ABOUTME: Defines error variants for invalid ranges, parse failures and out-of-range values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for formula constant validation.

use crate::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Ordered pair of bounds is inverted (e.g. low rate above high rate)
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Failed to parse an environment override
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}
