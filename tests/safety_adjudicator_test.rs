// ABOUTME: Integration tests for the safety adjudication facade and its async data source boundary
// ABOUTME: Exercises query screening, per-user evaluation, missing data, and concurrent callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use common::{
    baseline_profile, binding_profile, exercise_library, fixed_now, quiet_engine, with_surgery,
};
use std::sync::Arc;
use transfit_safety::errors::{AppError, AppResult, ErrorCode};
use transfit_safety::models::{Exercise, SafetyProfile, SurgeryType};
use transfit_safety::safety::{
    InMemorySafetyDataSource, RedFlagCategory, SafetyAdjudicator, SafetyDataSource,
};
use uuid::Uuid;

/// Source whose exercise library is unreachable
struct UnavailableLibrary {
    profile: SafetyProfile,
}

#[async_trait]
impl SafetyDataSource for UnavailableLibrary {
    async fn fetch_profile(&self, _user_id: Uuid) -> AppResult<SafetyProfile> {
        Ok(self.profile.clone())
    }

    async fn fetch_exercise_pool(&self, _user_id: Uuid) -> AppResult<Vec<Exercise>> {
        Err(AppError::unavailable("exercise library"))
    }
}

async fn adjudicator_with(
    profile: SafetyProfile,
) -> SafetyAdjudicator<InMemorySafetyDataSource> {
    let source = Arc::new(InMemorySafetyDataSource::new(exercise_library()));
    source.upsert_profile(profile).await;
    SafetyAdjudicator::with_engine(source, quiet_engine())
}

#[tokio::test]
async fn test_screen_query_attaches_crisis_resources() {
    let adjudicator = adjudicator_with(baseline_profile()).await;

    let screening = adjudicator.screen_query("I think I overdosed");

    assert!(screening.must_deflect());
    assert_eq!(
        screening.result.category,
        Some(RedFlagCategory::MedicalEmergency)
    );
    let numbers: Vec<&str> = screening.resources.iter().map(|r| r.number).collect();
    assert!(numbers.contains(&"911"));
    assert!(numbers.contains(&"988"));

    let json = serde_json::to_value(&screening).unwrap();
    assert_eq!(json["isRedFlag"], true);
    assert_eq!(json["category"], "medical_emergency");
    assert!(json["resources"].as_array().is_some_and(|r| !r.is_empty()));
}

#[tokio::test]
async fn test_screen_query_passes_coaching_questions() {
    let adjudicator = adjudicator_with(baseline_profile()).await;

    let screening = adjudicator.screen_query("how many sets of rows should I do");

    assert!(!screening.must_deflect());
    assert!(screening.resources.is_empty());
    assert!(screening.result.matched_keywords.is_empty());
}

#[tokio::test]
async fn test_acute_symptoms_point_to_emergency_services_only() {
    let adjudicator = adjudicator_with(baseline_profile()).await;

    let screening = adjudicator.screen_query("I fainted at the gym yesterday");

    assert_eq!(
        screening.result.category,
        Some(RedFlagCategory::AcuteSymptoms)
    );
    assert_eq!(screening.resources.len(), 1);
    assert_eq!(screening.resources[0].number, "911");
}

#[tokio::test]
async fn test_evaluate_for_user_uses_stored_profile() {
    let profile = binding_profile(4.0, false);
    let user_id = profile.user_id;
    let adjudicator = adjudicator_with(profile).await;

    let safety = adjudicator
        .evaluate_for_user_at(user_id, fixed_now())
        .await
        .unwrap();

    assert!(safety.is_excluded("overhead_press"));
    assert!(safety.is_excluded("bench_press"));
    assert!(safety
        .rules_applied
        .iter()
        .all(|a| a.context.user_id == user_id));
}

#[tokio::test]
async fn test_missing_profile_is_not_found() {
    let adjudicator = adjudicator_with(baseline_profile()).await;
    let stranger = Uuid::new_v4();

    let error = adjudicator
        .evaluate_for_user_at(stranger, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.context.user_id, Some(stranger));
}

#[tokio::test]
async fn test_library_replacement_changes_pool() {
    let profile = with_surgery(baseline_profile(), SurgeryType::TopSurgery, 4, false);
    let user_id = profile.user_id;
    let source = Arc::new(InMemorySafetyDataSource::new(Vec::new()));
    source.upsert_profile(profile).await;
    let adjudicator = SafetyAdjudicator::with_engine(Arc::clone(&source), quiet_engine());

    let before = adjudicator
        .evaluate_for_user_at(user_id, fixed_now())
        .await
        .unwrap();
    assert!(before.excluded_exercise_ids.is_empty());
    assert!(!before.rules_applied.is_empty());

    source.replace_library(exercise_library()).await;
    let after = adjudicator
        .evaluate_for_user_at(user_id, fixed_now())
        .await
        .unwrap();
    assert!(after.is_excluded("bench_press"));
    assert_eq!(after.rules_applied, before.rules_applied);
}

#[tokio::test]
async fn test_data_source_errors_propagate() {
    let profile = baseline_profile();
    let user_id = profile.user_id;
    let adjudicator =
        SafetyAdjudicator::with_engine(Arc::new(UnavailableLibrary { profile }), quiet_engine());

    let error = adjudicator
        .evaluate_for_user_at(user_id, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceUnavailable);
}

#[tokio::test]
async fn test_rule_errors_carry_user_id() {
    let profile = with_surgery(baseline_profile(), SurgeryType::Hysterectomy, -1, false);
    let user_id = profile.user_id;
    let adjudicator = adjudicator_with(profile).await;

    let error = adjudicator
        .evaluate_for_user_at(user_id, fixed_now())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::RuleEvaluationFailed);
    assert_eq!(error.context.user_id, Some(user_id));
}

#[tokio::test]
async fn test_concurrent_evaluations_agree() {
    let profile = with_surgery(binding_profile(9.0, true), SurgeryType::Vaginoplasty, 5, false);
    let user_id = profile.user_id;
    let adjudicator = Arc::new(adjudicator_with(profile).await);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let adjudicator = Arc::clone(&adjudicator);
            tokio::spawn(async move {
                adjudicator
                    .evaluate_for_user_at(user_id, fixed_now())
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(!results[0].excluded_exercise_ids.is_empty());
}
