// ABOUTME: Criterion benchmarks for the red flag classifier and the safety rule engine
// ABOUTME: Measures classification latency per query shape and evaluation cost per pool size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! Criterion benchmarks for safety adjudication.
//!
//! Classification runs on every chat message and evaluation on every plan
//! request, so both are measured against realistic input sizes.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;
use transfit_safety::config::SafetyConfig;
use transfit_safety::models::{
    BinderType, BindingFrequency, BindingStatus, Exercise, HrtStatus, HrtType, MovementPattern,
    SafetyProfile, SurgeryRecord, SurgeryType,
};
use transfit_safety::safety::{
    classify, InMemorySafetyDataSource, NullAuditSink, RuleEngine, SafetyAdjudicator,
};
use uuid::Uuid;

const PATTERNS: [MovementPattern; 8] = [
    MovementPattern::Push,
    MovementPattern::Pull,
    MovementPattern::Squat,
    MovementPattern::Hinge,
    MovementPattern::Lunge,
    MovementPattern::Core,
    MovementPattern::Cardio,
    MovementPattern::Plyometric,
];

const TAGS: [&str; 5] = [
    "binding",
    "chest_compression",
    "post_op_chest",
    "pelvic_floor_load",
    "high_impact",
];

/// Library of `size` exercises with a spread of patterns, tags and flags
fn generate_library(size: usize) -> Vec<Exercise> {
    (0..size)
        .map(|i| {
            let mut exercise = Exercise::new(format!("ex-{i}"), format!("Exercise {i}"))
                .with_pattern(PATTERNS[i % PATTERNS.len()]);
            if i % 3 == 0 {
                exercise = exercise.with_contraindications([TAGS[i % TAGS.len()]]);
            }
            exercise.binder_aware = i % 2 == 0;
            exercise.heavy_binding_safe = i % 4 == 0;
            exercise.pelvic_floor_safe = i % 5 == 0;
            exercise.post_op_safe_weeks = (i % 7 == 0).then_some(8);
            exercise
        })
        .collect()
}

/// Profile that fires a rule from every domain as of `now`
fn loaded_profile(now: DateTime<Utc>) -> SafetyProfile {
    let today = now.date_naive();
    SafetyProfile {
        user_id: Uuid::new_v4(),
        binding: BindingStatus {
            binds: true,
            frequency: BindingFrequency::Daily,
            hours_per_day: Some(10.0),
            binder_type: Some(BinderType::Commercial),
            binds_during_exercise: true,
        },
        hrt: Some(HrtStatus {
            hrt_type: HrtType::Testosterone,
            start_date: Some(today - Duration::days(60)),
        }),
        surgeries: vec![
            SurgeryRecord {
                surgery_type: SurgeryType::TopSurgery,
                surgery_date: today - Duration::weeks(4),
                surgeon_cleared: false,
            },
            SurgeryRecord {
                surgery_type: SurgeryType::Hysterectomy,
                surgery_date: today - Duration::weeks(30),
                surgeon_cleared: true,
            },
        ],
    }
}

fn quiet_engine() -> RuleEngine {
    RuleEngine::with_config(&SafetyConfig::default()).with_sink(Arc::new(NullAuditSink))
}

/// Benchmark classification of safe, flagged, and long queries
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let long_safe = "what's a good warm up before running and how many sets should I do "
        .repeat(20);
    let queries = [
        ("safe_short", "how do I do a squat".to_owned()),
        ("emergency", "I have sharp chest pain and want to hurt myself".to_owned()),
        ("diagnosis_last", "i found a lump near my hip".to_owned()),
        ("safe_long", long_safe),
    ];

    for (name, query) in &queries {
        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, query| {
            b.iter(|| classify(black_box(query)));
        });
    }

    group.finish();
}

/// Benchmark rule evaluation against growing candidate pools
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let engine = quiet_engine();
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let profile = loaded_profile(now);

    for size in [10_usize, 100, 1_000, 5_000] {
        let pool = generate_library(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("loaded_profile", size), &pool, |b, pool| {
            b.iter(|| {
                engine
                    .evaluate_at(black_box(&profile), black_box(pool), now)
                    .unwrap()
            });
        });
    }

    let baseline = SafetyProfile::baseline(Uuid::new_v4());
    let pool = generate_library(1_000);
    group.bench_function("baseline_profile/1000", |b| {
        b.iter(|| {
            engine
                .evaluate_at(black_box(&baseline), black_box(&pool), now)
                .unwrap()
        });
    });

    group.finish();
}

/// Benchmark the async facade including data source reads
fn bench_adjudicator(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("adjudicator");

    let profile = loaded_profile(Utc::now());
    let user_id = profile.user_id;
    let source = Arc::new(InMemorySafetyDataSource::new(generate_library(500)));
    rt.block_on(source.upsert_profile(profile));
    let adjudicator = SafetyAdjudicator::with_engine(source, quiet_engine());

    group.bench_function("evaluate_for_user/500", |b| {
        b.iter(|| {
            rt.block_on(async {
                adjudicator
                    .evaluate_for_user(black_box(user_id))
                    .await
                    .unwrap()
            })
        });
    });

    group.bench_function("screen_query", |b| {
        b.iter(|| adjudicator.screen_query(black_box("should I skip my injection")));
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_evaluate, bench_adjudicator);
criterion_main!(benches);
