// ABOUTME: Helper modules for ride-fuel-cli
// ABOUTME: Output formatting for formulas and settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
