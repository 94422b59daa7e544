// ABOUTME: Core types and constants for the TransFit safety adjudication engine
// ABOUTME: Foundation crate with error handling, profile/exercise models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

#![deny(unsafe_code)]

//! # TransFit Core
//!
//! Foundation crate providing shared types for the safety adjudication engine.
//! Records here change rarely; the classifier and rule engine build on them.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: User safety profiles and exercise records consumed by the rule engine
//! - **constants**: Service names and safety-domain constants

/// Unified error handling system with standard error codes
pub mod errors;

/// Profile and exercise records (consumed, never owned, by the engine)
pub mod models;

/// Application constants organized by domain
pub mod constants;
