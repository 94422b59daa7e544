// ABOUTME: Red flag classifier that deflects medical and crisis queries away from automated coaching
// ABOUTME: Scans normalized text category by category in fixed severity order and returns the first hit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! # Red Flag Classifier
//!
//! Decides whether a free-text user query must be deflected to human or medical
//! care instead of being answered by automated coaching.
//!
//! ## Priority
//!
//! Categories are scanned most severe first:
//!
//! 1. `medical_emergency`
//! 2. `acute_symptoms`
//! 3. `medication_dosing`
//! 4. `surgical_clearance`
//! 5. `diagnosis_seeking`
//!
//! The first category with at least one matching trigger wins and scanning stops.
//! A query mentioning both chest pain and self-harm is therefore always a medical
//! emergency, whose message is the only one carrying crisis line numbers.
//!
//! ## Example
//!
//! ```rust
//! use transfit_safety::safety::red_flags::{classify, RedFlagCategory};
//!
//! let result = classify("I have sharp chest pain and want to hurt myself");
//! assert!(result.is_red_flag);
//! assert_eq!(result.category, Some(RedFlagCategory::MedicalEmergency));
//! assert!(result.deflection_message.contains("911"));
//! ```

/// Static trigger catalog
pub mod patterns;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, error};

use crate::errors::{AppError, AppResult};

pub use patterns::{
    triggers_for, CategoryPatterns, TriggerPattern, PATTERN_CATALOG, PATTERN_CATALOG_VERSION,
};

// ============================================================================
// Categories and Messages
// ============================================================================

/// Reason a query is deflected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagCategory {
    /// Symptoms that need prompt medical attention (chest pain, fainting, infection)
    AcuteSymptoms,
    /// Life-threatening situations, including self-harm
    MedicalEmergency,
    /// Questions about hormone or medication doses
    MedicationDosing,
    /// Requests to identify a condition
    DiagnosisSeeking,
    /// Questions only a surgeon can answer (return to training after surgery)
    SurgicalClearance,
}

/// Fallback message for queries with no category
pub const GENERAL_DEFLECTION_MESSAGE: &str = "I'm not able to help with that here. For medical \
     questions, please reach out to your doctor or another qualified healthcare provider.";

impl RedFlagCategory {
    /// Scan order, most severe first
    pub const PRIORITY_ORDER: [Self; 5] = [
        Self::MedicalEmergency,
        Self::AcuteSymptoms,
        Self::MedicationDosing,
        Self::SurgicalClearance,
        Self::DiagnosisSeeking,
    ];

    /// Position in [`Self::PRIORITY_ORDER`] (0 is most severe)
    #[must_use]
    pub const fn priority(&self) -> usize {
        match self {
            Self::MedicalEmergency => 0,
            Self::AcuteSymptoms => 1,
            Self::MedicationDosing => 2,
            Self::SurgicalClearance => 3,
            Self::DiagnosisSeeking => 4,
        }
    }

    /// Wire string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcuteSymptoms => "acute_symptoms",
            Self::MedicalEmergency => "medical_emergency",
            Self::MedicationDosing => "medication_dosing",
            Self::DiagnosisSeeking => "diagnosis_seeking",
            Self::SurgicalClearance => "surgical_clearance",
        }
    }

    /// Parse from the wire string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "acute_symptoms" => Some(Self::AcuteSymptoms),
            "medical_emergency" => Some(Self::MedicalEmergency),
            "medication_dosing" => Some(Self::MedicationDosing),
            "diagnosis_seeking" => Some(Self::DiagnosisSeeking),
            "surgical_clearance" => Some(Self::SurgicalClearance),
            _ => None,
        }
    }

    /// Canonical deflection message for this category
    ///
    /// Emergency numbers are part of the text contract and must stay verbatim.
    #[must_use]
    pub const fn deflection_message(&self) -> &'static str {
        match self {
            Self::MedicalEmergency => {
                "This sounds like it could be an emergency. If you are in immediate danger \
                 or having a medical emergency, call 911 now. If you are thinking about \
                 hurting yourself, call or text 988 (Suicide & Crisis Lifeline) or call \
                 Trans Lifeline at 877-565-8860. You deserve support right now."
            }
            Self::AcuteSymptoms => {
                "I can't help with symptoms like these. Please stop exercising and contact \
                 your healthcare provider. If your symptoms are severe or getting worse, \
                 call 911 or go to the nearest emergency room."
            }
            Self::MedicationDosing => {
                "I can't give advice about hormone or medication doses. Please talk to your \
                 prescribing provider before changing anything about your medication."
            }
            Self::SurgicalClearance => {
                "Only your surgeon can clear you for exercise after surgery. Please check \
                 with your surgical team before starting or changing your training."
            }
            Self::DiagnosisSeeking => {
                "I can't diagnose health conditions. Please talk to a doctor or another \
                 qualified healthcare provider about what you're experiencing."
            }
        }
    }
}

/// Deflection message for `category`, or the general fallback when `None`
#[must_use]
pub const fn deflection_message(category: Option<RedFlagCategory>) -> &'static str {
    match category {
        Some(category) => category.deflection_message(),
        None => GENERAL_DEFLECTION_MESSAGE,
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Outcome of classifying one query
///
/// `deflection_message` is populated even when `is_red_flag` is false so callers
/// always have something to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagResult {
    /// Whether the query must be deflected
    pub is_red_flag: bool,
    /// Winning category
    pub category: Option<RedFlagCategory>,
    /// Every fragment of the normalized text matched by the winning category
    pub matched_keywords: Vec<String>,
    /// Message to surface verbatim
    pub deflection_message: String,
}

impl RedFlagResult {
    /// Result for a query with no red flag
    #[must_use]
    pub fn safe() -> Self {
        Self {
            is_red_flag: false,
            category: None,
            matched_keywords: Vec::new(),
            deflection_message: GENERAL_DEFLECTION_MESSAGE.to_owned(),
        }
    }
}

/// A category's triggers, compiled
struct CompiledCategory {
    category: RedFlagCategory,
    matchers: Vec<Regex>,
}

/// Compiled catalog, built on first use and read-only afterwards
static COMPILED_CATALOG: LazyLock<AppResult<Vec<CompiledCategory>>> =
    LazyLock::new(|| compile_catalog(PATTERN_CATALOG));

/// Compile every trigger of `catalog`; one bad pattern fails the whole catalog
fn compile_catalog(catalog: &[CategoryPatterns]) -> AppResult<Vec<CompiledCategory>> {
    catalog
        .iter()
        .map(|group| {
            let matchers = group
                .triggers
                .iter()
                .map(|trigger| {
                    Regex::new(trigger.pattern).map_err(|e| {
                        AppError::internal(format!(
                            "red flag pattern for {} failed to compile: {}",
                            group.category.as_str(),
                            trigger.pattern
                        ))
                        .with_resource_id(group.category.as_str())
                        .with_source(e)
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;
            Ok(CompiledCategory {
                category: group.category,
                matchers,
            })
        })
        .collect()
}

/// Confirm the pattern catalog compiled
///
/// Hosts call this at startup so a broken trigger stops the process instead of
/// surfacing later as a deflect-everything classifier.
///
/// # Errors
///
/// Returns `InternalError` naming the category and pattern that failed to compile
pub fn ensure_catalog_compiled() -> AppResult<()> {
    match &*COMPILED_CATALOG {
        Ok(_) => Ok(()),
        Err(e) => {
            let mut error = AppError::new(e.code, e.message.clone());
            error.context = e.context.clone();
            Err(error)
        }
    }
}

/// Lowercase and trim; nothing else
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Fragments of `normalized` matched by `category`'s triggers, in trigger order
fn matches_for(
    compiled: &[CompiledCategory],
    category: RedFlagCategory,
    normalized: &str,
) -> Vec<String> {
    compiled
        .iter()
        .filter(|compiled| compiled.category == category)
        .flat_map(|compiled| compiled.matchers.iter())
        .flat_map(|matcher| matcher.find_iter(normalized))
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Classify a free-text query
///
/// Never fails. Empty or whitespace-only input is not a red flag.
///
/// If the pattern catalog failed to compile, every non-empty query is deflected
/// with the general message and no category; see [`ensure_catalog_compiled`].
#[must_use]
pub fn classify(text: &str) -> RedFlagResult {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return RedFlagResult::safe();
    }

    let compiled = match &*COMPILED_CATALOG {
        Ok(compiled) => compiled,
        Err(e) => {
            error!(error = %e, "Red flag catalog unavailable, deflecting query");
            return RedFlagResult {
                is_red_flag: true,
                ..RedFlagResult::safe()
            };
        }
    };

    for category in RedFlagCategory::PRIORITY_ORDER {
        let matched_keywords = matches_for(compiled, category, &normalized);
        if !matched_keywords.is_empty() {
            debug!(
                red_flag.category = category.as_str(),
                red_flag.fragments = matched_keywords.len(),
                "Query deflected"
            );
            return RedFlagResult {
                is_red_flag: true,
                category: Some(category),
                matched_keywords,
                deflection_message: category.deflection_message().to_owned(),
            };
        }
    }

    RedFlagResult::safe()
}

/// True when `text` needs no deflection
#[must_use]
pub fn is_safe_query(text: &str) -> bool {
    !classify(text).is_red_flag
}
