// ABOUTME: Data models consumed by the safety adjudication engine
// ABOUTME: Re-exports user safety profiles and exercise library records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! # Data Models
//!
//! The engine consumes these records but never owns or persists them. Profiles and
//! exercise pools are fetched by a storage collaborator and handed to the rule
//! engine as read-only snapshots.
//!
//! ## Core Models
//!
//! - `SafetyProfile`: binding, HRT, and surgical state of one user
//! - `Exercise`: one exercise library record with its safety flags and contraindications

mod exercise;
mod profile;

pub use exercise::{DifficultyLevel, Exercise, MovementPattern};
pub use profile::{
    BinderType, BindingFrequency, BindingStatus, HrtStatus, HrtType, SafetyProfile,
    SurgeryRecord, SurgeryRegion, SurgeryType,
};
