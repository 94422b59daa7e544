// ABOUTME: Exercise library record as consumed by the safety rule engine
// ABOUTME: Carries contraindication tags and binder, pelvic floor, and post-op safety flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Primary movement pattern of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Horizontal or vertical pushing
    Push,
    /// Horizontal or vertical pulling
    Pull,
    /// Knee-dominant lower body
    Squat,
    /// Hip-dominant lower body
    Hinge,
    /// Single-leg lower body
    Lunge,
    /// Loaded carries
    Carry,
    /// Trunk and bracing work
    Core,
    /// Conditioning
    Cardio,
    /// Jumping and explosive work
    Plyometric,
    /// Stretching and mobility drills
    Mobility,
    /// Unclassified
    #[default]
    Other,
}

impl MovementPattern {
    /// Parse from the library string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "push" => Self::Push,
            "pull" => Self::Pull,
            "squat" => Self::Squat,
            "hinge" => Self::Hinge,
            "lunge" => Self::Lunge,
            "carry" => Self::Carry,
            "core" => Self::Core,
            "cardio" => Self::Cardio,
            "plyometric" | "plyo" => Self::Plyometric,
            "mobility" => Self::Mobility,
            _ => Self::Other,
        }
    }
}

/// Difficulty level of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    /// Suitable for beginners
    #[default]
    Beginner,
    /// Requires some training history
    Intermediate,
    /// For experienced lifters
    Advanced,
}

/// One exercise candidate
///
/// Safety flags default to `false` when a record omits them, so an unreviewed
/// record is never treated as safe for binding or pelvic floor loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier within the library
    pub id: String,
    /// Display name
    pub name: String,
    /// Primary movement pattern
    #[serde(default)]
    pub pattern: MovementPattern,
    /// Difficulty level
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    /// Conditions under which this exercise is unsafe (e.g. `binding`, `post_op_chest`)
    #[serde(default)]
    pub contraindications: BTreeSet<String>,
    /// Reviewed as reasonable while wearing a binder
    #[serde(default)]
    pub binder_aware: bool,
    /// Reviewed as reasonable under heavy or all-day binding
    #[serde(default)]
    pub heavy_binding_safe: bool,
    /// Reviewed as low pelvic floor load
    #[serde(default)]
    pub pelvic_floor_safe: bool,
    /// Earliest week after surgery the exercise may be programmed, if reviewed
    #[serde(default)]
    pub post_op_safe_weeks: Option<u32>,
}

impl Exercise {
    /// Minimal record with no flags and no contraindications
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pattern: MovementPattern::default(),
            difficulty: DifficultyLevel::default(),
            contraindications: BTreeSet::new(),
            binder_aware: false,
            heavy_binding_safe: false,
            pelvic_floor_safe: false,
            post_op_safe_weeks: None,
        }
    }

    /// Builder-style helper adding contraindication tags
    #[must_use]
    pub fn with_contraindications<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contraindications
            .extend(tags.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper setting the movement pattern
    #[must_use]
    pub fn with_pattern(mut self, pattern: MovementPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// True if any tag in `tags` is one of this exercise's contraindications
    #[must_use]
    pub fn has_any_contraindication(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.contraindications.contains(*tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contraindication_intersection() {
        let press = Exercise::new("ex-1", "Overhead Press").with_contraindications(["binding"]);
        assert!(press.has_any_contraindication(&["post_op_chest", "binding"]));
        assert!(!press.has_any_contraindication(&["pelvic_floor_load"]));
        assert!(!press.has_any_contraindication(&[]));
    }

    #[test]
    fn test_pattern_parse_falls_back_to_other() {
        assert_eq!(MovementPattern::parse("Hinge"), MovementPattern::Hinge);
        assert_eq!(MovementPattern::parse("plyo"), MovementPattern::Plyometric);
        assert_eq!(MovementPattern::parse("isometric"), MovementPattern::Other);
    }

    #[test]
    fn test_missing_flags_default_to_unsafe() {
        let json = serde_json::json!({ "id": "ex-2", "name": "Jumping Jack" });
        let exercise: Exercise =
            serde_json::from_value(json).unwrap_or_else(|_| Exercise::new("invalid", "invalid"));
        assert_eq!(exercise.id, "ex-2");
        assert!(!exercise.heavy_binding_safe);
        assert!(!exercise.pelvic_floor_safe);
        assert_eq!(exercise.pattern, MovementPattern::Other);
    }
}
