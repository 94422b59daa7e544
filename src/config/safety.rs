// ABOUTME: Safety engine configuration: rule time windows, binding limits, and audit switch
// ABOUTME: Defaults overridable from TRANSFIT_* environment variables, validated before use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! Safety Configuration Module
//!
//! Rule conditions read their windows from [`RuleThresholds`] instead of hard-coding
//! them, so a clinical review can tighten a window without touching the catalog.
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export TRANSFIT_TOP_SURGERY_RESTRICTION_WEEKS=8
//!    export TRANSFIT_LONG_BINDING_HOURS=6
//!    export TRANSFIT_SAFETY_AUDIT=0   # true/false, 1/0, yes/no, on/off
//!    ```
//!
//! 2. Default values (if env vars not set)
//!
//! # Examples
//!
//! ```rust
//! use transfit_safety::config::safety::SafetyConfig;
//!
//! let config = SafetyConfig::default();
//! assert_eq!(config.thresholds.post_op_block_weeks, 2);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::warn;

use crate::errors::{AppError, ErrorCode};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::Parse(_) => ErrorCode::ConfigError,
            ConfigError::InvalidRange(_) | ConfigError::ValueOutOfRange(_) => {
                ErrorCode::ConfigInvalid
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Time windows and limits consulted by rule conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Weeks after any surgery during which no plan is produced without clearance
    pub post_op_block_weeks: i64,
    /// Weeks after chest surgery with chest and overhead loading excluded
    pub top_surgery_restriction_weeks: i64,
    /// Weeks after pelvic surgery with pelvic floor loading excluded
    pub bottom_surgery_restriction_weeks: i64,
    /// Weeks after any surgery with reduced load and clearance checkpoint
    pub post_op_recovery_weeks: i64,
    /// Daily binding hours at or above which heavy-binding rules fire
    pub long_binding_hours: f32,
    /// Months after starting testosterone with conservative progression
    pub hrt_early_phase_months: i64,
    /// Months after starting any HRT with a provider checkpoint
    pub hrt_checkpoint_months: i64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            post_op_block_weeks: 2,
            top_surgery_restriction_weeks: 6,
            bottom_surgery_restriction_weeks: 12,
            post_op_recovery_weeks: 12,
            long_binding_hours: 8.0,
            hrt_early_phase_months: 6,
            hrt_checkpoint_months: 3,
        }
    }
}

/// Safety engine configuration container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Rule windows
    #[serde(default)]
    pub thresholds: RuleThresholds,
    /// Emit a structured log record for every fired rule
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

const fn default_audit_enabled() -> bool {
    true
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            thresholds: RuleThresholds::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

/// Global configuration singleton
static SAFETY_CONFIG: OnceLock<SafetyConfig> = OnceLock::new();

impl SafetyConfig {
    /// Get the global configuration instance
    ///
    /// Loaded from the environment on first access; invalid values fall back to
    /// defaults with a warning.
    pub fn global() -> &'static Self {
        SAFETY_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load safety config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Check window ordering and value ranges
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;

        if t.post_op_block_weeks < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "post_op_block_weeks must not be negative",
            ));
        }

        if t.post_op_block_weeks >= t.top_surgery_restriction_weeks
            || t.post_op_block_weeks >= t.bottom_surgery_restriction_weeks
        {
            return Err(ConfigError::InvalidRange(
                "post_op_block_weeks must be shorter than each surgery restriction window",
            ));
        }

        if t.top_surgery_restriction_weeks > t.post_op_recovery_weeks
            || t.bottom_surgery_restriction_weeks > t.post_op_recovery_weeks
        {
            return Err(ConfigError::InvalidRange(
                "surgery restriction windows must not exceed post_op_recovery_weeks",
            ));
        }

        if !(t.long_binding_hours > 0.0 && t.long_binding_hours <= 24.0) {
            return Err(ConfigError::ValueOutOfRange(
                "long_binding_hours must be within (0, 24]",
            ));
        }

        if t.hrt_checkpoint_months < 0 || t.hrt_early_phase_months < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "hrt month windows must not be negative",
            ));
        }

        if t.hrt_checkpoint_months > t.hrt_early_phase_months {
            return Err(ConfigError::InvalidRange(
                "hrt_checkpoint_months must not exceed hrt_early_phase_months",
            ));
        }

        Ok(())
    }

    /// Apply `TRANSFIT_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns a parse error naming the offending variable
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        let t = &mut self.thresholds;
        apply_env_var("TRANSFIT_POST_OP_BLOCK_WEEKS", &mut t.post_op_block_weeks)?;
        apply_env_var(
            "TRANSFIT_TOP_SURGERY_RESTRICTION_WEEKS",
            &mut t.top_surgery_restriction_weeks,
        )?;
        apply_env_var(
            "TRANSFIT_BOTTOM_SURGERY_RESTRICTION_WEEKS",
            &mut t.bottom_surgery_restriction_weeks,
        )?;
        apply_env_var(
            "TRANSFIT_POST_OP_RECOVERY_WEEKS",
            &mut t.post_op_recovery_weeks,
        )?;
        apply_env_var("TRANSFIT_LONG_BINDING_HOURS", &mut t.long_binding_hours)?;
        apply_env_var(
            "TRANSFIT_HRT_EARLY_PHASE_MONTHS",
            &mut t.hrt_early_phase_months,
        )?;
        apply_env_var(
            "TRANSFIT_HRT_CHECKPOINT_MONTHS",
            &mut t.hrt_checkpoint_months,
        )?;
        apply_env_flag("TRANSFIT_SAFETY_AUDIT", &mut self.audit_enabled)?;
        Ok(self)
    }
}

/// Overwrite `target` from `name` when set
fn apply_env_var<T: FromStr>(name: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(val) = env::var(name) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {name}: {val}")))?;
    }
    Ok(())
}

/// Overwrite a boolean `target` from `name`, accepting the usual on/off spellings
fn apply_env_flag(name: &str, target: &mut bool) -> Result<(), ConfigError> {
    if let Ok(val) = env::var(name) {
        *target = parse_flag(&val)
            .ok_or_else(|| ConfigError::Parse(format!("Invalid {name}: {val}")))?;
    }
    Ok(())
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
