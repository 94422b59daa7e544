// ABOUTME: Shared fixtures for safety engine integration tests
// ABOUTME: Fixed clock, profile builders, and a small tagged exercise library
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `transfit_safety`

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use transfit_safety::config::SafetyConfig;
use transfit_safety::models::{
    BinderType, BindingFrequency, BindingStatus, Exercise, HrtStatus, HrtType, MovementPattern,
    SafetyProfile, SurgeryRecord, SurgeryType,
};
use transfit_safety::safety::{AuditSink, NullAuditSink, RuleEngine};
use uuid::Uuid;

/// Evaluation clock used by every rule test
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

pub fn weeks_ago(weeks: i64) -> NaiveDate {
    (fixed_now() - Duration::weeks(weeks)).date_naive()
}

pub fn months_ago(months: i64) -> NaiveDate {
    (fixed_now() - Duration::days(30 * months)).date_naive()
}

pub fn baseline_profile() -> SafetyProfile {
    SafetyProfile::baseline(Uuid::new_v4())
}

/// Daily binder with a commercial binder
pub fn binding_profile(hours_per_day: f32, binds_during_exercise: bool) -> SafetyProfile {
    let mut profile = baseline_profile();
    profile.binding = BindingStatus {
        binds: true,
        frequency: BindingFrequency::Daily,
        hours_per_day: Some(hours_per_day),
        binder_type: Some(BinderType::Commercial),
        binds_during_exercise,
    };
    profile
}

pub fn with_surgery(
    mut profile: SafetyProfile,
    surgery_type: SurgeryType,
    weeks: i64,
    surgeon_cleared: bool,
) -> SafetyProfile {
    profile.surgeries.push(SurgeryRecord {
        surgery_type,
        surgery_date: weeks_ago(weeks),
        surgeon_cleared,
    });
    profile
}

pub fn with_hrt(mut profile: SafetyProfile, hrt_type: HrtType, months: i64) -> SafetyProfile {
    profile.hrt = Some(HrtStatus {
        hrt_type,
        start_date: Some(months_ago(months)),
    });
    profile
}

/// Small library covering every contraindication tag and safety flag
pub fn exercise_library() -> Vec<Exercise> {
    let mut overhead_press = Exercise::new("overhead_press", "Overhead Press")
        .with_pattern(MovementPattern::Push)
        .with_contraindications(["binding", "overhead"]);
    overhead_press.post_op_safe_weeks = Some(12);

    let bench_press = Exercise::new("bench_press", "Bench Press")
        .with_pattern(MovementPattern::Push)
        .with_contraindications(["chest_compression", "post_op_chest"]);

    let mut incline_push_up = Exercise::new("incline_push_up", "Incline Push-Up")
        .with_pattern(MovementPattern::Push);
    incline_push_up.binder_aware = true;
    incline_push_up.post_op_safe_weeks = Some(8);

    let mut wall_slide =
        Exercise::new("wall_slide", "Wall Slide").with_pattern(MovementPattern::Mobility);
    wall_slide.binder_aware = true;
    wall_slide.post_op_safe_weeks = Some(2);

    let goblet_squat = Exercise::new("goblet_squat", "Goblet Squat")
        .with_pattern(MovementPattern::Squat);

    let mut glute_bridge = Exercise::new("glute_bridge", "Glute Bridge")
        .with_pattern(MovementPattern::Hinge);
    glute_bridge.pelvic_floor_safe = true;
    glute_bridge.binder_aware = true;

    let kettlebell_swing = Exercise::new("kettlebell_swing", "Kettlebell Swing")
        .with_pattern(MovementPattern::Hinge)
        .with_contraindications(["pelvic_floor_load"]);

    let jump_rope = Exercise::new("jump_rope", "Jump Rope")
        .with_pattern(MovementPattern::Cardio)
        .with_contraindications(["high_impact"]);

    let mut stationary_bike = Exercise::new("stationary_bike", "Stationary Bike")
        .with_pattern(MovementPattern::Cardio);
    stationary_bike.binder_aware = true;
    stationary_bike.heavy_binding_safe = true;
    stationary_bike.pelvic_floor_safe = true;

    let mut rowing_intervals = Exercise::new("rowing_intervals", "Rowing Intervals")
        .with_pattern(MovementPattern::Cardio);
    rowing_intervals.binder_aware = true;

    let mut dead_bug = Exercise::new("dead_bug", "Dead Bug").with_pattern(MovementPattern::Core);
    dead_bug.binder_aware = true;
    dead_bug.heavy_binding_safe = true;
    dead_bug.pelvic_floor_safe = true;

    vec![
        overhead_press,
        bench_press,
        incline_push_up,
        wall_slide,
        goblet_squat,
        glute_bridge,
        kettlebell_swing,
        jump_rope,
        stationary_bike,
        rowing_intervals,
        dead_bug,
    ]
}

/// Default catalog with default thresholds and no audit output
pub fn quiet_engine() -> RuleEngine {
    RuleEngine::with_config(&SafetyConfig::default()).with_sink(Arc::new(NullAuditSink))
}

/// Default catalog with default thresholds recording into `sink`
pub fn engine_with_sink(sink: Arc<dyn AuditSink>) -> RuleEngine {
    RuleEngine::with_config(&SafetyConfig::default()).with_sink(sink)
}
