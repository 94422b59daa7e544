// ABOUTME: Default exercise safety rule catalog: binding, post-operative, then HRT rules
// ABOUTME: Declaration order is the precedence chain for parameter overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! Rule catalog.
//!
//! The default catalog declares binding safety rules first, then post-operative
//! rules, then HRT adjustment rules. A later rule that writes a parameter key an
//! earlier rule already wrote wins, so moving a rule changes behavior: bump
//! [`RULE_CATALOG_VERSION`] whenever rules are added, removed, or reordered.

// Conditions and predicates share one fallible fn-pointer signature
#![allow(clippy::unnecessary_wraps)]

use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::error;

use super::{
    Action, BlockCriteria, Checkpoint, EvaluationContext, ExclusionCriteria, Rule, RuleCategory,
    SoftFilterCriteria,
};
use crate::constants::{contraindications as tags, plan_parameters as params};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, HrtType, MovementPattern, SurgeryRecord, SurgeryRegion};

/// Version of the default rule catalog
pub const RULE_CATALOG_VERSION: &str = "2025.3";

/// Ordered, immutable rule list with unique ids
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    version: String,
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Build a catalog, rejecting empty or duplicate rule ids
    ///
    /// # Errors
    ///
    /// Returns `RuleCatalogInvalid` naming the offending id
    pub fn new(version: impl Into<String>, rules: Vec<Rule>) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if rule.rule_id.trim().is_empty() {
                return Err(AppError::rule_catalog("rule id must not be empty"));
            }
            if !seen.insert(rule.rule_id.as_str()) {
                return Err(AppError::rule_catalog(format!(
                    "duplicate rule id: {}",
                    rule.rule_id
                ))
                .with_resource_id(rule.rule_id.clone()));
            }
        }
        Ok(Self {
            version: version.into(),
            rules,
        })
    }

    /// Catalog version string
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rules in declaration order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rule by id
    #[must_use]
    pub fn get(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.rule_id == rule_id)
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the catalog has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

static DEFAULT_CATALOG: LazyLock<Arc<RuleCatalog>> = LazyLock::new(|| {
    let catalog = RuleCatalog::new(RULE_CATALOG_VERSION, default_rules()).unwrap_or_else(|e| {
        // Every default rule stays enforced; only the id invariant is lost
        error!(error = %e, "Default rule catalog failed validation");
        RuleCatalog {
            version: RULE_CATALOG_VERSION.to_owned(),
            rules: default_rules(),
        }
    });
    Arc::new(catalog)
});

/// Shared handle to the default catalog
#[must_use]
pub fn default_catalog() -> Arc<RuleCatalog> {
    Arc::clone(&DEFAULT_CATALOG)
}

// ============================================================================
// Shared Checks
// ============================================================================

/// Weeks since `record`, failing on surgeries dated after the evaluation
fn checked_weeks_since(
    rule_id: &str,
    record: &SurgeryRecord,
    ctx: &EvaluationContext<'_>,
) -> AppResult<i64> {
    let today = ctx.evaluated_at.date_naive();
    if record.surgery_date > today {
        return Err(AppError::rule_evaluation(
            rule_id,
            format!(
                "surgery dated {} is after evaluation date {today}",
                record.surgery_date
            ),
        )
        .with_user_id(ctx.profile.user_id));
    }
    Ok(record.weeks_since(ctx.evaluated_at))
}

/// Uncleared surgery in `region` (any region when `None`) within `window_weeks`
///
/// Every matching record is checked, so a malformed record fails the rule even
/// when another record already satisfies it.
fn uncleared_surgery_within(
    rule_id: &str,
    ctx: &EvaluationContext<'_>,
    region: Option<SurgeryRegion>,
    window_weeks: i64,
) -> AppResult<bool> {
    let mut found = false;
    for record in &ctx.profile.surgeries {
        if region.is_some_and(|r| record.surgery_type.region() != r) {
            continue;
        }
        let weeks = checked_weeks_since(rule_id, record, ctx)?;
        found |= !record.surgeon_cleared && weeks < window_weeks;
    }
    Ok(found)
}

/// Weeks since the most recent uncleared chest surgery, if any
fn weeks_since_chest_surgery(ctx: &EvaluationContext<'_>) -> AppResult<Option<i64>> {
    let mut most_recent: Option<i64> = None;
    for record in ctx.profile.surgeries_in(SurgeryRegion::Chest) {
        if record.surgeon_cleared {
            continue;
        }
        let weeks = checked_weeks_since(POST_OP_CHEST_RESTRICTION, record, ctx)?;
        most_recent = Some(most_recent.map_or(weeks, |w| w.min(weeks)));
    }
    Ok(most_recent)
}

/// Months on HRT, failing on start dates after the evaluation
fn checked_months_on_therapy(
    rule_id: &str,
    ctx: &EvaluationContext<'_>,
) -> AppResult<Option<(HrtType, i64)>> {
    let Some(hrt) = &ctx.profile.hrt else {
        return Ok(None);
    };
    let today = ctx.evaluated_at.date_naive();
    if let Some(start) = hrt.start_date.filter(|start| *start > today) {
        return Err(AppError::rule_evaluation(
            rule_id,
            format!("hrt start date {start} is after evaluation date {today}"),
        )
        .with_user_id(ctx.profile.user_id));
    }
    Ok(hrt
        .months_on_therapy(ctx.evaluated_at)
        .map(|months| (hrt.hrt_type, months)))
}

fn is_high_exertion(exercise: &Exercise) -> bool {
    matches!(
        exercise.pattern,
        MovementPattern::Cardio | MovementPattern::Plyometric
    )
}

fn loads_pelvic_floor(exercise: &Exercise) -> bool {
    matches!(
        exercise.pattern,
        MovementPattern::Squat
            | MovementPattern::Hinge
            | MovementPattern::Lunge
            | MovementPattern::Carry
            | MovementPattern::Plyometric
    )
}

// ============================================================================
// Binding Safety
// ============================================================================

const BINDING_UNSAFE_BINDER: &str = "BND-001";
const BINDING_EXCLUSIONS: &str = "BND-002";
const BINDING_LONG_HOURS: &str = "BND-003";
const BINDING_DURING_EXERCISE: &str = "BND-004";
const BINDING_BREAK_CHECKPOINT: &str = "BND-005";
const BINDING_PREFER_AWARE: &str = "BND-006";

fn binds_with_unsafe_binder(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    let binding = &ctx.profile.binding;
    Ok(binding.is_currently_binding()
        && binding
            .binder_type
            .is_some_and(|binder| binder.is_unsafe_for_exercise()))
}

fn is_currently_binding(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    Ok(ctx.profile.binding.is_currently_binding())
}

fn binds_long_hours(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    let binding = &ctx.profile.binding;
    Ok(binding.is_currently_binding()
        && binding
            .hours_per_day
            .is_some_and(|hours| hours >= ctx.thresholds.long_binding_hours))
}

fn binds_during_exercise(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    let binding = &ctx.profile.binding;
    Ok(binding.is_currently_binding() && binding.binds_during_exercise)
}

/// High-exertion work not reviewed for binders, when the binder stays on
fn unreviewed_exertion_while_bound(
    exercise: &Exercise,
    ctx: &EvaluationContext<'_>,
) -> AppResult<bool> {
    Ok(ctx.profile.binding.binds_during_exercise
        && !exercise.binder_aware
        && is_high_exertion(exercise))
}

fn not_heavy_binding_safe(exercise: &Exercise, _ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    Ok(!exercise.heavy_binding_safe && is_high_exertion(exercise))
}

fn binding_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            BINDING_UNSAFE_BINDER,
            RuleCategory::BindingSafety,
            binds_with_unsafe_binder,
            Action::CriticalBlock(BlockCriteria::new(
                "unsafe_binder",
                "Ace bandages and improvised binders restrict breathing and can injure \
                 your ribs during exercise. Switch to a purpose-made binder or train \
                 without binding before starting a plan.",
            )),
        )
        .with_description("Block plans while binding with ace bandages or DIY binders"),
        Rule::new(
            BINDING_EXCLUSIONS,
            RuleCategory::BindingSafety,
            is_currently_binding,
            Action::ExcludeExercises(
                ExclusionCriteria::tags(&[tags::BINDING, tags::CHEST_COMPRESSION])
                    .with_predicate(unreviewed_exertion_while_bound),
            ),
        )
        .with_description("Exclude binding-contraindicated and chest-compressing exercises"),
        Rule::new(
            BINDING_LONG_HOURS,
            RuleCategory::BindingSafety,
            binds_long_hours,
            Action::ExcludeExercises(
                ExclusionCriteria::tags(&[tags::HEAVY_BINDING])
                    .with_predicate(not_heavy_binding_safe),
            ),
        )
        .with_description("Exclude high-exertion work not reviewed for long binding days"),
        Rule::new(
            BINDING_DURING_EXERCISE,
            RuleCategory::BindingSafety,
            binds_during_exercise,
            Action::parameters([
                (params::MAX_SESSION_MINUTES, json!(45)),
                (params::REST_INTERVAL_MULTIPLIER, json!(1.5)),
                (params::CARDIO_INTENSITY, json!("moderate")),
            ]),
        )
        .with_description("Shorter sessions and longer rests when training in a binder"),
        Rule::new(
            BINDING_BREAK_CHECKPOINT,
            RuleCategory::BindingSafety,
            binds_long_hours,
            Action::InjectCheckpoint(Checkpoint::new(
                "binder_break",
                "Confirm you will take regular binder breaks and keep total binding \
                 time, including workouts, within the daily limit your binder maker \
                 and provider recommend.",
            )),
        )
        .with_description("Binder break confirmation for long binding days"),
        Rule::new(
            BINDING_PREFER_AWARE,
            RuleCategory::BindingSafety,
            is_currently_binding,
            Action::SoftFilter(SoftFilterCriteria::new(
                "prefer_binder_aware",
                &[tags::HIGH_IMPACT],
            )),
        )
        .with_description("Rank binder-aware, low-impact exercises higher"),
    ]
}

// ============================================================================
// Post-Operative
// ============================================================================

const POST_OP_RECENT_BLOCK: &str = "POP-001";
const POST_OP_CHEST_RESTRICTION: &str = "POP-002";
const POST_OP_PELVIC_RESTRICTION: &str = "POP-003";
const POST_OP_CLEARANCE_CHECKPOINT: &str = "POP-004";
const POST_OP_RECOVERY_PARAMETERS: &str = "POP-005";
const POST_OP_PREFER_LOW_IMPACT: &str = "POP-006";

fn recent_uncleared_surgery(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    uncleared_surgery_within(
        POST_OP_RECENT_BLOCK,
        ctx,
        None,
        ctx.thresholds.post_op_block_weeks,
    )
}

fn chest_surgery_recovery(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    uncleared_surgery_within(
        POST_OP_CHEST_RESTRICTION,
        ctx,
        Some(SurgeryRegion::Chest),
        ctx.thresholds.top_surgery_restriction_weeks,
    )
}

fn pelvic_surgery_recovery(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    uncleared_surgery_within(
        POST_OP_PELVIC_RESTRICTION,
        ctx,
        Some(SurgeryRegion::Pelvic),
        ctx.thresholds.bottom_surgery_restriction_weeks,
    )
}

fn needs_surgeon_clearance(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    uncleared_surgery_within(
        POST_OP_CLEARANCE_CHECKPOINT,
        ctx,
        None,
        ctx.thresholds.post_op_recovery_weeks,
    )
}

fn in_post_op_recovery(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    uncleared_surgery_within(
        POST_OP_RECOVERY_PARAMETERS,
        ctx,
        None,
        ctx.thresholds.post_op_recovery_weeks,
    )
}

fn in_post_op_recovery_for_scoring(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    uncleared_surgery_within(
        POST_OP_PREFER_LOW_IMPACT,
        ctx,
        None,
        ctx.thresholds.post_op_recovery_weeks,
    )
}

/// Exercise reviewed as safe only from a later week than the current recovery week
fn not_yet_post_op_safe(exercise: &Exercise, ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    let Some(safe_from) = exercise.post_op_safe_weeks else {
        return Ok(false);
    };
    Ok(weeks_since_chest_surgery(ctx)?.is_some_and(|weeks| weeks < i64::from(safe_from)))
}

fn not_pelvic_floor_safe(exercise: &Exercise, _ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    Ok(!exercise.pelvic_floor_safe && loads_pelvic_floor(exercise))
}

fn post_operative_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            POST_OP_RECENT_BLOCK,
            RuleCategory::PostOperative,
            recent_uncleared_surgery,
            Action::CriticalBlock(BlockCriteria::new(
                "recent_surgery",
                "You had surgery very recently. Training plans are paused until your \
                 surgeon clears you for exercise.",
            )),
        )
        .with_description("Block plans in the first weeks after any uncleared surgery"),
        Rule::new(
            POST_OP_CHEST_RESTRICTION,
            RuleCategory::PostOperative,
            chest_surgery_recovery,
            Action::ExcludeExercises(
                ExclusionCriteria::tags(&[tags::POST_OP_CHEST, tags::OVERHEAD])
                    .with_predicate(not_yet_post_op_safe),
            ),
        )
        .with_description("Exclude chest and overhead loading after chest surgery"),
        Rule::new(
            POST_OP_PELVIC_RESTRICTION,
            RuleCategory::PostOperative,
            pelvic_surgery_recovery,
            Action::ExcludeExercises(
                ExclusionCriteria::tags(&[tags::POST_OP_PELVIC, tags::PELVIC_FLOOR_LOAD])
                    .with_predicate(not_pelvic_floor_safe),
            ),
        )
        .with_description("Exclude pelvic floor loading after pelvic surgery"),
        Rule::new(
            POST_OP_CLEARANCE_CHECKPOINT,
            RuleCategory::PostOperative,
            needs_surgeon_clearance,
            Action::InjectCheckpoint(Checkpoint::new(
                "surgeon_clearance",
                "Confirm your surgeon has cleared you for this level of activity.",
            )),
        )
        .with_description("Surgeon clearance confirmation during recovery"),
        Rule::new(
            POST_OP_RECOVERY_PARAMETERS,
            RuleCategory::PostOperative,
            in_post_op_recovery,
            Action::parameters([
                (params::MAX_LOAD_PERCENT, json!(50)),
                (params::PROGRESSION_RATE, json!("conservative")),
                (params::CARDIO_INTENSITY, json!("low")),
            ]),
        )
        .with_description("Reduced load and low-intensity cardio during recovery"),
        Rule::new(
            POST_OP_PREFER_LOW_IMPACT,
            RuleCategory::PostOperative,
            in_post_op_recovery_for_scoring,
            Action::SoftFilter(SoftFilterCriteria::new(
                "prefer_low_impact",
                &[tags::HIGH_IMPACT],
            )),
        )
        .with_description("Rank low-impact exercises higher during recovery"),
    ]
}

// ============================================================================
// HRT Adjustment
// ============================================================================

const HRT_ESTROGEN_RECOVERY: &str = "HRT-001";
const HRT_TESTOSTERONE_EARLY_PHASE: &str = "HRT-002";
const HRT_TENDON_LOADING: &str = "HRT-003";
const HRT_PROVIDER_CHECKPOINT: &str = "HRT-004";

fn on_feminizing_hrt(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    Ok(ctx
        .profile
        .hrt
        .as_ref()
        .is_some_and(|hrt| matches!(hrt.hrt_type, HrtType::Estrogen | HrtType::AntiAndrogen)))
}

fn testosterone_early_phase(rule_id: &str, ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    Ok(checked_months_on_therapy(rule_id, ctx)?.is_some_and(|(hrt_type, months)| {
        hrt_type == HrtType::Testosterone && months < ctx.thresholds.hrt_early_phase_months
    }))
}

fn early_testosterone_progression(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    testosterone_early_phase(HRT_TESTOSTERONE_EARLY_PHASE, ctx)
}

fn early_testosterone_tendons(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    testosterone_early_phase(HRT_TENDON_LOADING, ctx)
}

fn recently_started_hrt(ctx: &EvaluationContext<'_>) -> AppResult<bool> {
    Ok(checked_months_on_therapy(HRT_PROVIDER_CHECKPOINT, ctx)?
        .is_some_and(|(_, months)| months < ctx.thresholds.hrt_checkpoint_months))
}

fn hrt_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            HRT_ESTROGEN_RECOVERY,
            RuleCategory::HrtAdjustment,
            on_feminizing_hrt,
            Action::parameters([
                (params::RECOVERY_DAYS_BETWEEN_SESSIONS, json!(2)),
                (params::MAX_WEEKLY_LOAD_INCREASE_PERCENT, json!(5)),
            ]),
        )
        .with_description("Longer recovery and gentler load increases on feminizing HRT"),
        Rule::new(
            HRT_TESTOSTERONE_EARLY_PHASE,
            RuleCategory::HrtAdjustment,
            early_testosterone_progression,
            Action::parameters([
                (params::PROGRESSION_RATE, json!("conservative")),
                (params::MAX_WEEKLY_LOAD_INCREASE_PERCENT, json!(5)),
            ]),
        )
        .with_description("Conservative progression while tendons adapt to testosterone"),
        Rule::new(
            HRT_TENDON_LOADING,
            RuleCategory::HrtAdjustment,
            early_testosterone_tendons,
            Action::SoftFilter(SoftFilterCriteria::new(
                "limit_tendon_loading",
                &[tags::HIGH_IMPACT],
            )),
        )
        .with_description("Rank plyometric and high-impact work lower early on testosterone"),
        Rule::new(
            HRT_PROVIDER_CHECKPOINT,
            RuleCategory::HrtAdjustment,
            recently_started_hrt,
            Action::InjectCheckpoint(Checkpoint::new(
                "hrt_provider_check",
                "Confirm your prescribing provider knows you are starting a new \
                 training program.",
            )),
        )
        .with_description("Provider confirmation in the first months of HRT"),
    ]
}

fn default_rules() -> Vec<Rule> {
    let mut rules = binding_rules();
    rules.extend(post_operative_rules());
    rules.extend(hrt_rules());
    rules
}
