// ABOUTME: Exercise safety rule types: rules, actions, evaluation input and the merged decision
// ABOUTME: Shared by the rule catalog, the evaluation engine, and plan generators consuming results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! # Exercise Safety Rules
//!
//! A [`Rule`] pairs a condition over an [`EvaluationContext`] with an [`Action`].
//! The [`engine::RuleEngine`] walks a [`catalog::RuleCatalog`] in declaration order
//! and folds every fired action into one [`SafetyContext`].
//!
//! Plan generators consuming a [`SafetyContext`] must:
//! - produce no plan when [`SafetyContext::allows_plan`] is false
//! - drop excluded exercises before scoring ([`SafetyContext::filter_candidates`])
//! - overlay [`SafetyContext::modified_parameters`] on their defaults
//! - require confirmation of every entry in [`SafetyContext::required_checkpoints`]

/// Default rule catalog
pub mod catalog;
/// Ordered rule interpreter
pub mod engine;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use uuid::Uuid;

use crate::config::safety::RuleThresholds;
use crate::errors::AppResult;
use crate::models::{Exercise, SafetyProfile};

pub use catalog::{default_catalog, RuleCatalog, RULE_CATALOG_VERSION};
pub use engine::RuleEngine;

// ============================================================================
// Rule Definition
// ============================================================================

/// Domain a rule belongs to; also the grouping of the default catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Chest binding
    BindingSafety,
    /// Surgical recovery
    PostOperative,
    /// Hormone therapy
    HrtAdjustment,
}

impl RuleCategory {
    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BindingSafety => "binding_safety",
            Self::PostOperative => "post_operative",
            Self::HrtAdjustment => "hrt_adjustment",
        }
    }
}

/// Rule trigger condition
pub type Condition = fn(&EvaluationContext<'_>) -> AppResult<bool>;

/// Per-exercise exclusion predicate
pub type ExercisePredicate = fn(&Exercise, &EvaluationContext<'_>) -> AppResult<bool>;

/// Declarative condition/action pair
#[derive(Clone)]
pub struct Rule {
    /// Unique id within a catalog
    pub rule_id: String,
    /// Domain
    pub category: RuleCategory,
    /// Human-readable summary for listings
    pub description: String,
    /// Trigger condition
    pub condition: Condition,
    /// Effect when the condition holds
    pub action: Action,
}

impl Rule {
    /// Build a rule with an empty description
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        category: RuleCategory,
        condition: Condition,
        action: Action,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            description: String::new(),
            condition,
            action,
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("rule_id", &self.rule_id)
            .field("category", &self.category)
            .field("action", &self.action.kind())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Effect of a fired rule
#[derive(Debug, Clone)]
pub enum Action {
    /// No plan may be produced
    CriticalBlock(BlockCriteria),
    /// Remove matching exercises from the candidate pool
    ExcludeExercises(ExclusionCriteria),
    /// Key/value overrides for plan parameters
    ModifyParameters(BTreeMap<String, Value>),
    /// Human confirmation gate
    InjectCheckpoint(Checkpoint),
    /// Advisory preference for the scoring stage; the engine only audits it
    SoftFilter(SoftFilterCriteria),
}

impl Action {
    /// Tag of this action
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::CriticalBlock(_) => ActionKind::CriticalBlock,
            Self::ExcludeExercises(_) => ActionKind::ExcludeExercises,
            Self::ModifyParameters(_) => ActionKind::ModifyParameters,
            Self::InjectCheckpoint(_) => ActionKind::InjectCheckpoint,
            Self::SoftFilter(_) => ActionKind::SoftFilter,
        }
    }

    /// `ModifyParameters` from `(key, value)` pairs
    #[must_use]
    pub fn parameters<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::ModifyParameters(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Action tag as recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// See [`Action::CriticalBlock`]
    CriticalBlock,
    /// See [`Action::ExcludeExercises`]
    ExcludeExercises,
    /// See [`Action::ModifyParameters`]
    ModifyParameters,
    /// See [`Action::InjectCheckpoint`]
    InjectCheckpoint,
    /// See [`Action::SoftFilter`]
    SoftFilter,
}

impl ActionKind {
    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalBlock => "critical_block",
            Self::ExcludeExercises => "exclude_exercises",
            Self::ModifyParameters => "modify_parameters",
            Self::InjectCheckpoint => "inject_checkpoint",
            Self::SoftFilter => "soft_filter",
        }
    }
}

/// Why no plan may be produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCriteria {
    /// Stable machine-readable code
    pub code: String,
    /// Explanation shown to the user
    pub reason: String,
}

impl BlockCriteria {
    /// Build block criteria
    #[must_use]
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
        }
    }
}

/// Which exercises an `ExcludeExercises` action removes
///
/// An exercise is excluded when any of its contraindication tags is in
/// `contraindications`, or when `predicate` returns true for it.
#[derive(Clone, Default)]
pub struct ExclusionCriteria {
    /// Tags that exclude on intersection
    pub contraindications: &'static [&'static str],
    /// Optional per-exercise check
    pub predicate: Option<ExercisePredicate>,
}

impl ExclusionCriteria {
    /// Exclude by tag only
    #[must_use]
    pub const fn tags(contraindications: &'static [&'static str]) -> Self {
        Self {
            contraindications,
            predicate: None,
        }
    }

    /// Add a predicate
    #[must_use]
    pub const fn with_predicate(mut self, predicate: ExercisePredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Whether `exercise` is excluded under these criteria
    ///
    /// # Errors
    ///
    /// Propagates the predicate's error unchanged
    pub fn excludes(&self, exercise: &Exercise, ctx: &EvaluationContext<'_>) -> AppResult<bool> {
        if exercise.has_any_contraindication(self.contraindications) {
            return Ok(true);
        }
        self.predicate
            .map_or(Ok(false), |predicate| predicate(exercise, ctx))
    }
}

impl fmt::Debug for ExclusionCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusionCriteria")
            .field("contraindications", &self.contraindications)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Human confirmation gate inserted into the plan flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Stable id; the same checkpoint may be injected by several rules
    pub checkpoint_id: String,
    /// Prompt shown to the user
    pub message: String,
}

impl Checkpoint {
    /// Build a checkpoint
    #[must_use]
    pub fn new(checkpoint_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            checkpoint_id: checkpoint_id.into(),
            message: message.into(),
        }
    }
}

/// Advisory ranking preference read by the exercise-scoring stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftFilterCriteria {
    /// Preference key understood by the scorer
    pub preference: String,
    /// Tags the scorer should rank lower
    pub deprioritize_tags: Vec<String>,
}

impl SoftFilterCriteria {
    /// Build soft filter criteria
    #[must_use]
    pub fn new(preference: impl Into<String>, deprioritize_tags: &[&str]) -> Self {
        Self {
            preference: preference.into(),
            deprioritize_tags: deprioritize_tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

// ============================================================================
// Evaluation Input
// ============================================================================

/// Read-only snapshot handed to every condition and predicate in one pass
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Profile under evaluation
    pub profile: &'a SafetyProfile,
    /// Candidate pool, in caller order
    pub pool: &'a [Exercise],
    /// Timestamp every date comparison uses
    pub evaluated_at: DateTime<Utc>,
    /// Validated rule windows
    pub thresholds: &'a RuleThresholds,
}

// ============================================================================
// Evaluation Output
// ============================================================================

/// Minimal snapshot stored with each audit record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditContext {
    /// User the evaluation ran for
    pub user_id: Uuid,
    /// Evaluation timestamp
    pub evaluated_at: DateTime<Utc>,
}

/// Audit record of one fired rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleApplication {
    /// Rule id
    pub rule_id: String,
    /// Rule domain
    pub category: RuleCategory,
    /// Action tag applied
    pub action_taken: ActionKind,
    /// Who and when
    pub context: AuditContext,
}

/// Merged safety decision for one profile and pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyContext {
    /// Reasons no plan may be produced, in firing order; duplicates kept
    pub critical_blocks: Vec<BlockCriteria>,
    /// Ids from the evaluated pool that must not be scheduled
    pub excluded_exercise_ids: BTreeSet<String>,
    /// Parameter overrides; later rules overwrite earlier keys
    pub modified_parameters: BTreeMap<String, Value>,
    /// Confirmation gates, in firing order; duplicates kept
    pub required_checkpoints: Vec<Checkpoint>,
    /// One record per fired rule, in catalog order
    pub rules_applied: Vec<RuleApplication>,
}

impl SafetyContext {
    /// False when any critical block fired
    #[must_use]
    pub fn allows_plan(&self) -> bool {
        self.critical_blocks.is_empty()
    }

    /// Whether `exercise_id` was excluded
    #[must_use]
    pub fn is_excluded(&self, exercise_id: &str) -> bool {
        self.excluded_exercise_ids.contains(exercise_id)
    }

    /// Candidates that survive exclusion, in their original order
    #[must_use]
    pub fn filter_candidates<'p>(&self, pool: &'p [Exercise]) -> Vec<&'p Exercise> {
        pool.iter().filter(|e| !self.is_excluded(&e.id)).collect()
    }

    /// Overlay the overrides onto a plan generator's default parameters
    pub fn apply_parameter_overrides(&self, parameters: &mut Map<String, Value>) {
        for (key, value) in &self.modified_parameters {
            parameters.insert(key.clone(), value.clone());
        }
    }

    /// Ids of fired soft filter rules, for the scoring stage to resolve
    pub fn soft_filter_rule_ids(&self) -> impl Iterator<Item = &str> {
        self.rules_applied
            .iter()
            .filter(|a| a.action_taken == ActionKind::SoftFilter)
            .map(|a| a.rule_id.as_str())
    }
}
