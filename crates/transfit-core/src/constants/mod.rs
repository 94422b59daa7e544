// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Service names and the shared contraindication tag vocabulary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! Constants module
//!
//! Constants are grouped by domain. The contraindication vocabulary is shared by
//! the exercise library and the rule catalog; a tag spelled differently on either
//! side silently disables an exclusion, so both sides reference these constants.

/// Service identification for structured logging
pub mod service_names {
    /// Service name reported in log records
    pub const TRANSFIT_SAFETY: &str = "transfit-safety";
}

/// Contraindication tags carried by exercise records
pub mod contraindications {
    /// Unsafe while wearing a binder
    pub const BINDING: &str = "binding";
    /// Unsafe under heavy or prolonged binding (deep breathing demand, rib loading)
    pub const HEAVY_BINDING: &str = "heavy_binding";
    /// Loads the chest wall or compresses the rib cage
    pub const CHEST_COMPRESSION: &str = "chest_compression";
    /// Unsafe during chest surgery recovery
    pub const POST_OP_CHEST: &str = "post_op_chest";
    /// Arms-overhead loading (pulls on chest incisions)
    pub const OVERHEAD: &str = "overhead";
    /// Unsafe during pelvic surgery recovery
    pub const POST_OP_PELVIC: &str = "post_op_pelvic";
    /// High intra-abdominal pressure or bearing down
    pub const PELVIC_FLOOR_LOAD: &str = "pelvic_floor_load";
    /// Jumping, sprinting, and other impact work
    pub const HIGH_IMPACT: &str = "high_impact";
}

/// Plan parameter keys written by `modify_parameters` actions
pub mod plan_parameters {
    /// Maximum session length in minutes
    pub const MAX_SESSION_MINUTES: &str = "max_session_minutes";
    /// Multiplier applied to rest intervals
    pub const REST_INTERVAL_MULTIPLIER: &str = "rest_interval_multiplier";
    /// Cardio intensity ceiling (`low`, `moderate`, `high`)
    pub const CARDIO_INTENSITY: &str = "cardio_intensity";
    /// Maximum load as a percentage of normal working weight
    pub const MAX_LOAD_PERCENT: &str = "max_load_percent";
    /// Progression rate (`conservative`, `standard`)
    pub const PROGRESSION_RATE: &str = "progression_rate";
    /// Minimum rest days between sessions hitting the same muscle group
    pub const RECOVERY_DAYS_BETWEEN_SESSIONS: &str = "recovery_days_between_sessions";
    /// Maximum week-over-week load increase, percent
    pub const MAX_WEEKLY_LOAD_INCREASE_PERCENT: &str = "max_weekly_load_increase_percent";
}
