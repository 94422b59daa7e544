// ABOUTME: Safety adjudication engine: red flag classifier, exercise safety rules, and facade
// ABOUTME: Deterministic gatekeeping of user queries and training plans before they reach a user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! # Safety Adjudication
//!
//! Two independent subsystems:
//!
//! - [`red_flags`]: decides whether a free-text query must be deflected to human
//!   or medical care
//! - [`rules`]: folds a declarative rule catalog over a user's profile and an
//!   exercise pool into a [`rules::SafetyContext`]
//!
//! [`adjudicator::SafetyAdjudicator`] exposes both to callers, with async data
//! fetching as the only suspension point.

/// Facade and async data source boundary
pub mod adjudicator;
/// Audit sinks for fired rules
pub mod audit;
/// Red flag classifier and pattern catalog
pub mod red_flags;
/// Crisis resource registry
pub mod resources;
/// Rule types, catalog, and engine
pub mod rules;

pub use adjudicator::{
    InMemorySafetyDataSource, QueryScreening, SafetyAdjudicator, SafetyDataSource,
};
pub use audit::{AuditSink, MemoryAuditSink, NullAuditSink, TracingAuditSink};
pub use red_flags::{
    classify, deflection_message, ensure_catalog_compiled, is_safe_query, RedFlagCategory,
    RedFlagResult,
};
pub use resources::{crisis_resources, crisis_resources_for, CrisisResource};
pub use rules::{RuleEngine, SafetyContext};
