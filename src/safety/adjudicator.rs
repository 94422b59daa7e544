// ABOUTME: Safety adjudication facade pairing query screening with per-user rule evaluation
// ABOUTME: Async data source trait is the only suspension point; evaluation stays synchronous
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! # Safety Adjudicator
//!
//! Chat handlers call [`SafetyAdjudicator::screen_query`]; plan generation calls
//! [`SafetyAdjudicator::evaluate_for_user`]. The two paths share nothing beyond
//! the facade: a deflected query never triggers rule evaluation and vice versa.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::red_flags::{classify, RedFlagResult};
use super::resources::{crisis_resources_for, CrisisResource};
use super::rules::{RuleEngine, SafetyContext};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, SafetyProfile};

/// Storage collaborator supplying profiles and candidate pools
#[async_trait]
pub trait SafetyDataSource: Send + Sync {
    /// Profile for `user_id`
    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<SafetyProfile>;

    /// Candidate exercises for `user_id`, in the order the plan generator will score them
    async fn fetch_exercise_pool(&self, user_id: Uuid) -> AppResult<Vec<Exercise>>;
}

/// In-process data source backed by a shared exercise library
#[derive(Debug, Default)]
pub struct InMemorySafetyDataSource {
    profiles: RwLock<HashMap<Uuid, SafetyProfile>>,
    library: RwLock<Vec<Exercise>>,
}

impl InMemorySafetyDataSource {
    /// Source with no profiles and `library` as every user's pool
    #[must_use]
    pub fn new(library: Vec<Exercise>) -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            library: RwLock::new(library),
        }
    }

    /// Insert or replace a profile
    pub async fn upsert_profile(&self, profile: SafetyProfile) {
        self.profiles.write().await.insert(profile.user_id, profile);
    }

    /// Replace the exercise library
    pub async fn replace_library(&self, library: Vec<Exercise>) {
        *self.library.write().await = library;
    }
}

#[async_trait]
impl SafetyDataSource for InMemorySafetyDataSource {
    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<SafetyProfile> {
        self.profiles
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("safety profile {user_id}")))
    }

    async fn fetch_exercise_pool(&self, _user_id: Uuid) -> AppResult<Vec<Exercise>> {
        Ok(self.library.read().await.clone())
    }
}

/// Classifier verdict plus the contacts to show with it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryScreening {
    /// Classifier output
    #[serde(flatten)]
    pub result: RedFlagResult,
    /// Crisis contacts for the winning category (empty when safe)
    pub resources: &'static [CrisisResource],
}

impl QueryScreening {
    /// Whether automated handling must stop
    #[must_use]
    pub const fn must_deflect(&self) -> bool {
        self.result.is_red_flag
    }
}

/// Facade over the classifier and the rule engine
pub struct SafetyAdjudicator<S> {
    source: Arc<S>,
    engine: RuleEngine,
}

impl<S: SafetyDataSource> SafetyAdjudicator<S> {
    /// Facade over `source` with the default engine
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self::with_engine(source, RuleEngine::new())
    }

    /// Facade over `source` with a preconfigured engine
    #[must_use]
    pub fn with_engine(source: Arc<S>, engine: RuleEngine) -> Self {
        Self { source, engine }
    }

    /// Engine used for evaluation
    #[must_use]
    pub const fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Classify `text` and attach crisis contacts for its category
    // Classification needs no facade state; it lives here so chat handlers hold one handle
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn screen_query(&self, text: &str) -> QueryScreening {
        let result = classify(text);
        let resources = crisis_resources_for(result.category);
        QueryScreening { result, resources }
    }

    /// Fetch the user's profile and pool, then evaluate the rule catalog now
    ///
    /// # Errors
    ///
    /// Returns data source errors, or the first rule evaluation error
    pub async fn evaluate_for_user(&self, user_id: Uuid) -> AppResult<SafetyContext> {
        self.evaluate_for_user_at(user_id, Utc::now()).await
    }

    /// Fetch the user's profile and pool, then evaluate at `evaluated_at`
    ///
    /// # Errors
    ///
    /// Returns data source errors, or the first rule evaluation error
    #[instrument(skip(self), fields(user.id = %user_id))]
    pub async fn evaluate_for_user_at(
        &self,
        user_id: Uuid,
        evaluated_at: DateTime<Utc>,
    ) -> AppResult<SafetyContext> {
        let profile = self
            .source
            .fetch_profile(user_id)
            .await
            .map_err(|e| e.with_user_id(user_id))?;
        let pool = self.source.fetch_exercise_pool(user_id).await?;
        debug!(pool.size = pool.len(), "Evaluating safety rules");
        self.engine
            .evaluate_at(&profile, &pool, evaluated_at)
            .map_err(|e| e.with_user_id(user_id))
    }
}
