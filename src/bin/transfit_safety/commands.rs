// ABOUTME: Subcommand implementations for the TransFit safety CLI
// ABOUTME: Reads JSON inputs, runs the classifier or adjudicator, and prints JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use transfit_safety::models::{Exercise, SafetyProfile};
use transfit_safety::safety::red_flags::PATTERN_CATALOG_VERSION;
use transfit_safety::safety::{
    classify as classify_query, crisis_resources, crisis_resources_for, InMemorySafetyDataSource,
    RuleEngine, SafetyAdjudicator,
};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid {what} JSON in {}", path.display()))
}

pub fn classify(text: &str, with_resources: bool) -> Result<()> {
    let result = classify_query(text);
    if with_resources {
        let resources = crisis_resources_for(result.category);
        print_json(&json!({ "result": result, "resources": resources }))
    } else {
        print_json(&result)
    }
}

pub async fn evaluate(
    profile_path: &Path,
    exercises_path: &Path,
    now: Option<DateTime<Utc>>,
) -> Result<()> {
    let profile: SafetyProfile = read_json(profile_path, "profile")?;
    let library: Vec<Exercise> = read_json(exercises_path, "exercise library")?;
    let user_id = profile.user_id;
    info!(user.id = %user_id, library.size = library.len(), "Evaluating profile");

    let source = Arc::new(InMemorySafetyDataSource::new(library));
    source.upsert_profile(profile).await;
    let adjudicator = SafetyAdjudicator::new(source);

    let safety = adjudicator
        .evaluate_for_user_at(user_id, now.unwrap_or_else(Utc::now))
        .await
        .context("safety evaluation failed")?;
    print_json(&safety)
}

pub fn catalog() -> Result<()> {
    let engine = RuleEngine::new();
    let catalog = engine.catalog();
    let rules: Vec<_> = catalog
        .rules()
        .iter()
        .map(|rule| {
            json!({
                "rule_id": rule.rule_id,
                "category": rule.category,
                "action": rule.action.kind(),
                "description": rule.description,
            })
        })
        .collect();
    print_json(&json!({
        "rule_catalog_version": catalog.version(),
        "pattern_catalog_version": PATTERN_CATALOG_VERSION,
        "thresholds": engine.thresholds(),
        "rules": rules,
    }))
}

pub fn resources() -> Result<()> {
    print_json(&crisis_resources())
}
