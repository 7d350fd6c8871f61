// ABOUTME: Command modules for ride-fuel-cli
// ABOUTME: Formula calculation and remembered settings management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod calculate;
pub mod settings;
