// ABOUTME: Rule evaluation engine folding fired catalog rules into one SafetyContext
// ABOUTME: Synchronous, deterministic ordered-list interpreter with an injected audit sink
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! # Rule Evaluation Engine
//!
//! Evaluates every catalog rule, in declaration order, against one profile and
//! candidate pool:
//!
//! - `critical_block` and `inject_checkpoint` append (duplicates kept)
//! - `exclude_exercises` adds pool ids; exclusions never retract
//! - `modify_parameters` shallow-merges, later rules winning on shared keys
//! - `soft_filter` only produces an audit record
//!
//! A condition or predicate error stops evaluation and is returned unchanged.
//! The engine holds no per-call state and is safe to share across threads.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use super::{
    default_catalog, Action, AuditContext, EvaluationContext, Rule, RuleApplication,
    RuleCatalog, SafetyContext, SoftFilterCriteria,
};
use crate::config::safety::{RuleThresholds, SafetyConfig};
use crate::errors::AppResult;
use crate::models::{Exercise, SafetyProfile};
use crate::safety::audit::{AuditSink, NullAuditSink, TracingAuditSink};

/// Ordered rule interpreter
#[derive(Clone)]
pub struct RuleEngine {
    catalog: Arc<RuleCatalog>,
    thresholds: RuleThresholds,
    sink: Arc<dyn AuditSink>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Engine over the default catalog using the global configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SafetyConfig::global())
    }

    /// Engine over the default catalog using `config`
    #[must_use]
    pub fn with_config(config: &SafetyConfig) -> Self {
        let sink: Arc<dyn AuditSink> = if config.audit_enabled {
            Arc::new(TracingAuditSink)
        } else {
            Arc::new(NullAuditSink)
        };
        Self {
            catalog: default_catalog(),
            thresholds: config.thresholds.clone(),
            sink,
        }
    }

    /// Engine over a custom catalog with a tracing sink
    #[must_use]
    pub fn with_catalog(catalog: Arc<RuleCatalog>, thresholds: RuleThresholds) -> Self {
        Self {
            catalog,
            thresholds,
            sink: Arc::new(TracingAuditSink),
        }
    }

    /// Replace the audit sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Catalog this engine evaluates
    #[must_use]
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Thresholds handed to rule conditions
    #[must_use]
    pub const fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Evaluate at the current time
    ///
    /// # Errors
    ///
    /// Returns the first rule condition or exclusion predicate error
    pub fn evaluate(&self, profile: &SafetyProfile, pool: &[Exercise]) -> AppResult<SafetyContext> {
        self.evaluate_at(profile, pool, Utc::now())
    }

    /// Evaluate with an explicit timestamp for every date comparison
    ///
    /// # Errors
    ///
    /// Returns the first rule condition or exclusion predicate error
    pub fn evaluate_at(
        &self,
        profile: &SafetyProfile,
        pool: &[Exercise],
        evaluated_at: DateTime<Utc>,
    ) -> AppResult<SafetyContext> {
        let ctx = EvaluationContext {
            profile,
            pool,
            evaluated_at,
            thresholds: &self.thresholds,
        };
        let audit = AuditContext {
            user_id: profile.user_id,
            evaluated_at,
        };
        let mut safety = SafetyContext::default();

        for rule in self.catalog.rules() {
            let fired = (rule.condition)(&ctx).inspect_err(|e| {
                warn!(rule.id = %rule.rule_id, user.id = %profile.user_id, "Rule condition failed: {e}");
            })?;
            if !fired {
                continue;
            }

            Self::apply(rule, &ctx, &mut safety).inspect_err(|e| {
                warn!(rule.id = %rule.rule_id, user.id = %profile.user_id, "Rule action failed: {e}");
            })?;

            let application = RuleApplication {
                rule_id: rule.rule_id.clone(),
                category: rule.category,
                action_taken: rule.action.kind(),
                context: audit,
            };
            self.sink.record(&application);
            safety.rules_applied.push(application);
        }

        Ok(safety)
    }

    fn apply(
        rule: &Rule,
        ctx: &EvaluationContext<'_>,
        safety: &mut SafetyContext,
    ) -> AppResult<()> {
        match &rule.action {
            Action::CriticalBlock(criteria) => safety.critical_blocks.push(criteria.clone()),
            Action::ExcludeExercises(criteria) => {
                for exercise in ctx.pool {
                    if criteria.excludes(exercise, ctx)? {
                        safety.excluded_exercise_ids.insert(exercise.id.clone());
                    }
                }
            }
            Action::ModifyParameters(overrides) => {
                for (key, value) in overrides {
                    safety.modified_parameters.insert(key.clone(), value.clone());
                }
            }
            Action::InjectCheckpoint(checkpoint) => {
                safety.required_checkpoints.push(checkpoint.clone());
            }
            Action::SoftFilter(_) => {}
        }
        Ok(())
    }

    /// Resolve the soft filters that fired in `safety` against this engine's catalog
    ///
    /// Returned in firing order for the exercise-scoring stage.
    #[must_use]
    pub fn soft_filters<'a>(
        &'a self,
        safety: &'a SafetyContext,
    ) -> Vec<(&'a str, &'a SoftFilterCriteria)> {
        safety
            .soft_filter_rule_ids()
            .filter_map(|rule_id| match self.catalog.get(rule_id).map(|r| &r.action) {
                Some(Action::SoftFilter(criteria)) => Some((rule_id, criteria)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BinderType, BindingFrequency, BindingStatus};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn quiet_engine() -> RuleEngine {
        RuleEngine::with_config(&SafetyConfig::default()).with_sink(Arc::new(NullAuditSink))
    }

    #[test]
    fn test_baseline_profile_fires_nothing() {
        let profile = SafetyProfile::baseline(Uuid::new_v4());
        let pool = vec![Exercise::new("squat", "Goblet Squat")];
        let result = quiet_engine()
            .evaluate_at(&profile, &pool, fixed_now())
            .unwrap_or_default();
        assert_eq!(result, SafetyContext::default());
    }

    #[test]
    fn test_unsafe_binder_blocks_plan() {
        let mut profile = SafetyProfile::baseline(Uuid::new_v4());
        profile.binding = BindingStatus {
            binds: true,
            frequency: BindingFrequency::Daily,
            binder_type: Some(BinderType::AceBandage),
            ..BindingStatus::default()
        };
        let result = quiet_engine()
            .evaluate_at(&profile, &[], fixed_now())
            .unwrap_or_default();
        assert!(!result.allows_plan());
        assert_eq!(result.critical_blocks[0].code, "unsafe_binder");
    }

    #[test]
    fn test_soft_filters_resolve_through_catalog() {
        let mut profile = SafetyProfile::baseline(Uuid::new_v4());
        profile.binding = BindingStatus {
            binds: true,
            frequency: BindingFrequency::Occasionally,
            ..BindingStatus::default()
        };
        let engine = quiet_engine();
        let result = engine
            .evaluate_at(&profile, &[], fixed_now())
            .unwrap_or_default();
        let filters = engine.soft_filters(&result);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].1.preference, "prefer_binder_aware");
    }
}
