// ABOUTME: Integration tests for environment-driven safety configuration loading
// ABOUTME: Serialized because they mutate TRANSFIT_* process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use transfit_safety::config::{ConfigError, SafetyConfig};
use transfit_safety::errors::{AppError, ErrorCode};

const VARS: &[&str] = &[
    "TRANSFIT_POST_OP_BLOCK_WEEKS",
    "TRANSFIT_TOP_SURGERY_RESTRICTION_WEEKS",
    "TRANSFIT_BOTTOM_SURGERY_RESTRICTION_WEEKS",
    "TRANSFIT_POST_OP_RECOVERY_WEEKS",
    "TRANSFIT_LONG_BINDING_HOURS",
    "TRANSFIT_HRT_EARLY_PHASE_MONTHS",
    "TRANSFIT_HRT_CHECKPOINT_MONTHS",
    "TRANSFIT_SAFETY_AUDIT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    clear_env();

    let config = SafetyConfig::load().unwrap();

    assert_eq!(config, SafetyConfig::default());
}

#[test]
#[serial]
fn test_env_overrides_apply() {
    clear_env();
    env::set_var("TRANSFIT_TOP_SURGERY_RESTRICTION_WEEKS", "8");
    env::set_var("TRANSFIT_LONG_BINDING_HOURS", " 6.5 ");
    env::set_var("TRANSFIT_SAFETY_AUDIT", "false");

    let config = SafetyConfig::load().unwrap();
    clear_env();

    assert_eq!(config.thresholds.top_surgery_restriction_weeks, 8);
    assert!((config.thresholds.long_binding_hours - 6.5).abs() < f32::EPSILON);
    assert!(!config.audit_enabled);
    assert_eq!(config.thresholds.post_op_block_weeks, 2);
}

#[test]
#[serial]
fn test_audit_flag_accepts_numeric_and_word_forms() {
    clear_env();
    env::set_var("TRANSFIT_SAFETY_AUDIT", "0");
    env::set_var("TRANSFIT_TOP_SURGERY_RESTRICTION_WEEKS", "8");

    let disabled = SafetyConfig::load().unwrap();
    env::set_var("TRANSFIT_SAFETY_AUDIT", "yes");
    let enabled = SafetyConfig::load().unwrap();
    clear_env();

    assert!(!disabled.audit_enabled);
    assert_eq!(disabled.thresholds.top_surgery_restriction_weeks, 8);
    assert!(enabled.audit_enabled);
    assert_eq!(enabled.thresholds.top_surgery_restriction_weeks, 8);
}

#[test]
#[serial]
fn test_unrecognized_audit_flag_is_parse_error() {
    clear_env();
    env::set_var("TRANSFIT_SAFETY_AUDIT", "sometimes");

    let result = SafetyConfig::load();
    clear_env();

    assert!(
        matches!(&result, Err(ConfigError::Parse(message)) if message.contains("TRANSFIT_SAFETY_AUDIT")),
        "{result:?}"
    );
}

#[test]
#[serial]
fn test_unparseable_value_names_variable() {
    clear_env();
    env::set_var("TRANSFIT_POST_OP_RECOVERY_WEEKS", "twelve");

    let result = SafetyConfig::load();
    clear_env();

    match result {
        Err(ConfigError::Parse(message)) => {
            assert!(message.contains("TRANSFIT_POST_OP_RECOVERY_WEEKS"));
            assert!(message.contains("twelve"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_inconsistent_windows_fail_validation() {
    clear_env();
    env::set_var("TRANSFIT_BOTTOM_SURGERY_RESTRICTION_WEEKS", "16");

    let result = SafetyConfig::load();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
#[serial]
fn test_checkpoint_window_must_fit_early_phase() {
    clear_env();
    env::set_var("TRANSFIT_HRT_CHECKPOINT_MONTHS", "9");

    let result = SafetyConfig::load();
    clear_env();

    let error: AppError = result.unwrap_err().into();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_negative_window_is_out_of_range() {
    clear_env();
    env::set_var("TRANSFIT_POST_OP_BLOCK_WEEKS", "-1");

    let result = SafetyConfig::load();
    clear_env();

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
#[serial]
fn test_config_round_trips_through_json() {
    let json = serde_json::json!({
        "thresholds": {
            "post_op_block_weeks": 3,
            "top_surgery_restriction_weeks": 6,
            "bottom_surgery_restriction_weeks": 10,
            "post_op_recovery_weeks": 12,
            "long_binding_hours": 8.0,
            "hrt_early_phase_months": 6,
            "hrt_checkpoint_months": 3
        }
    });

    let config: SafetyConfig = serde_json::from_value(json).unwrap();

    assert!(config.audit_enabled);
    assert_eq!(config.thresholds.bottom_surgery_restriction_weeks, 10);
    assert!(config.validate().is_ok());
}
