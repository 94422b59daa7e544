// ABOUTME: Main library entry point for the TransFit safety adjudication engine
// ABOUTME: Red flag query classification and exercise safety rule evaluation for plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

#![deny(unsafe_code)]

//! # TransFit Safety
//!
//! Deterministic safety gatekeeping for a fitness coaching product serving trans
//! and gender-diverse users.
//!
//! ## Features
//!
//! - **Red flag classifier**: deflects emergencies, acute symptoms, dosing,
//!   surgical clearance, and diagnosis questions to human care
//! - **Exercise safety rules**: binding, post-operative, and HRT rules producing
//!   exclusions, parameter overrides, checkpoints, and critical blocks
//! - **Audit trail**: one record per fired rule, delivered to an injected sink
//!
//! ## Example Usage
//!
//! ```rust
//! use transfit_safety::config::safety::SafetyConfig;
//! use transfit_safety::models::{BindingFrequency, BindingStatus, Exercise, SafetyProfile};
//! use transfit_safety::safety::{classify, RuleEngine};
//! use uuid::Uuid;
//!
//! assert!(classify("how much T should I take").is_red_flag);
//!
//! let mut profile = SafetyProfile::baseline(Uuid::new_v4());
//! profile.binding = BindingStatus {
//!     binds: true,
//!     frequency: BindingFrequency::Daily,
//!     ..BindingStatus::default()
//! };
//! let pool = vec![Exercise::new("ohp", "Overhead Press").with_contraindications(["binding"])];
//!
//! let engine = RuleEngine::with_config(&SafetyConfig::default());
//! let safety = engine.evaluate(&profile, &pool)?;
//! assert!(safety.is_excluded("ohp"));
//! # Ok::<(), transfit_safety::errors::AppError>(())
//! ```

/// Configuration management
pub mod config;

/// Structured logging setup
pub mod logging;

/// Red flag classification, safety rules, and the adjudication facade
pub mod safety;

/// Unified error handling system with standard error codes
pub use transfit_core::errors;

/// Profile and exercise records consumed by the rule engine
pub use transfit_core::models;

/// Application constants organized by domain
pub use transfit_core::constants;
