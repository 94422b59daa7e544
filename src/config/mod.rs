// ABOUTME: Configuration management module for safety engine settings
// ABOUTME: Rule thresholds and audit switch loaded from defaults and environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit
//! Configuration module for the TransFit safety engine
//!
//! - **Safety**: Rule time windows, binding limits, and the audit switch
//!
//! Logging is configured separately in [`crate::logging`].

/// Safety rule thresholds and audit configuration
pub mod safety;

pub use safety::{ConfigError, RuleThresholds, SafetyConfig};
