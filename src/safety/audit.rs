// ABOUTME: Audit sinks receiving one structured record per fired safety rule
// ABOUTME: Tracing-backed sink for production, null and in-memory sinks for embedding and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

use std::sync::{Mutex, PoisonError};
use tracing::info;

use super::rules::RuleApplication;

/// Receives audit records as the engine fires rules
///
/// Sinks observe; they never influence evaluation results.
pub trait AuditSink: Send + Sync {
    /// Record one fired rule
    fn record(&self, application: &RuleApplication);
}

/// Emits each record as a structured `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, application: &RuleApplication) {
        info!(
            rule.id = %application.rule_id,
            rule.category = application.category.as_str(),
            rule.action = application.action_taken.as_str(),
            user.id = %application.context.user_id,
            evaluated_at = %application.context.evaluated_at,
            "Safety rule applied"
        );
    }
}

/// Discards every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _application: &RuleApplication) {}
}

/// Keeps every record in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<RuleApplication>>,
}

impl MemoryAuditSink {
    /// Empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the records received so far
    #[must_use]
    pub fn records(&self) -> Vec<RuleApplication> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop all records
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, application: &RuleApplication) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(application.clone());
    }
}
