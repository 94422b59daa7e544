// ABOUTME: Red flag pattern catalog: per-category regex triggers with a sample phrase each
// ABOUTME: Pure data; compiled once by the classifier and scanned in category priority order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

//! Red flag pattern catalog.
//!
//! Patterns are matched against lowercased, trimmed text, so they are written in
//! lowercase. Each trigger carries an `example` phrase that must classify as its own
//! category when submitted alone; the test suite enforces this, so a new trigger that
//! overlaps a higher-priority category is caught before release.
//!
//! Bump [`PATTERN_CATALOG_VERSION`] whenever a trigger is added, removed, or moved
//! between categories.

use super::RedFlagCategory;

/// Version of the pattern catalog, reported alongside classifier output
pub const PATTERN_CATALOG_VERSION: &str = "2025.4";

/// One detection pattern
#[derive(Debug, Clone, Copy)]
pub struct TriggerPattern {
    /// Regex source, matched against normalized text
    pub pattern: &'static str,
    /// Representative phrase this pattern must catch on its own
    pub example: &'static str,
}

/// All triggers belonging to one category
#[derive(Debug, Clone, Copy)]
pub struct CategoryPatterns {
    /// Category the triggers deflect to
    pub category: RedFlagCategory,
    /// Ordered triggers; every match contributes a fragment
    pub triggers: &'static [TriggerPattern],
}

const MEDICAL_EMERGENCY: &[TriggerPattern] = &[
    TriggerPattern {
        pattern: r"\bsuicid(?:e|al)\b",
        example: "i feel suicidal",
    },
    TriggerPattern {
        pattern: r"\b(?:(?:want(?:ed)?|going|trying|planning|tempted) to|thinking (?:about|of)|thoughts of) (?:kill|hurt|harm|cut)(?:ing)? myself\b",
        example: "i want to hurt myself",
    },
    TriggerPattern {
        pattern: r"\b(?:kill|hurt|harm|cut)(?:ing)? myself on purpose\b",
        example: "sometimes i hurt myself on purpose",
    },
    TriggerPattern {
        pattern: r"\bself[- ]?harm(?:ing)?\b",
        example: "thoughts of self-harm",
    },
    TriggerPattern {
        pattern: r"\bend(?:ing)? (?:my life|it all)\b",
        example: "thinking about ending it all",
    },
    TriggerPattern {
        pattern: r"\b(?:can'?t|can’t|cannot) breathe\b",
        example: "i can't breathe",
    },
    TriggerPattern {
        pattern: r"\b(?:heart attack|having a stroke|seizure)\b",
        example: "am i having a heart attack",
    },
    TriggerPattern {
        pattern: r"\boverdos(?:e|ed|ing)\b",
        example: "i think i overdosed",
    },
    TriggerPattern {
        pattern: r"\b(?:call(?:ing)? 911|emergency room)\b",
        example: "should i go to the emergency room",
    },
];

const ACUTE_SYMPTOMS: &[TriggerPattern] = &[
    TriggerPattern {
        pattern: r"\bchest (?:pain|tightness|pressure)\b",
        example: "chest pain during my workout",
    },
    TriggerPattern {
        pattern: r"\b(?:sharp|severe|stabbing|shooting) pain\b",
        example: "sharp pain in my knee",
    },
    TriggerPattern {
        pattern: r"\bshort(?:ness)? of breath\b",
        example: "i get short of breath",
    },
    TriggerPattern {
        pattern: r"\b(?:dizzy|dizziness|light-?headed)\b",
        example: "i feel dizzy",
    },
    TriggerPattern {
        pattern: r"\b(?:fainted|fainting|passed out|blacked out)\b",
        example: "i fainted at the gym",
    },
    TriggerPattern {
        pattern: r"\b(?:heart (?:racing|pounding)|palpitations?)\b",
        example: "heart palpitations after cardio",
    },
    TriggerPattern {
        pattern: r"\b(?:numb|numbness|tingling)\b",
        example: "numbness in my arm",
    },
    TriggerPattern {
        pattern: r"\b(?:infected|infection|pus|oozing|bleeding)\b",
        example: "my incision looks infected",
    },
    TriggerPattern {
        pattern: r"\brib (?:pain|injury|fracture)\b|\b(?:cracked|bruised|broken) ribs?\b",
        example: "rib pain from binding",
    },
];

const MEDICATION_DOSING: &[TriggerPattern] = &[
    TriggerPattern {
        pattern: r"\bhow (?:much|many|often) (?:testosterone|estrogen|estradiol|spiro|spironolactone|progesterone|hormones?|hrt|mg|ml|pills?|injections?)\b",
        example: "how much testosterone should i take",
    },
    TriggerPattern {
        // Bare "t"/"e" only count when a dosing verb follows ("how much e-bike" does not)
        pattern: r"\bhow (?:much|often) (?:t|e) (?:should|do|can|to|per)\b",
        example: "how much e should i take",
    },
    TriggerPattern {
        pattern: r"\b(?:t|e|testosterone|estrogen|estradiol|hormone|hrt) (?:shots?|injections?)\b",
        example: "can i lift the day of my t shot",
    },
    TriggerPattern {
        pattern: r"\b(?:dose|doses|dosage|dosing)\b",
        example: "what dosage is right for me",
    },
    TriggerPattern {
        pattern: r"\b(?:increase|decrease|raise|lower|change|adjust|double|skip|stop) my (?:t|e|testosterone|estrogen|estradiol|hormones?|hrt|dose|shot|injection|meds|medication|spiro)\b",
        example: "should i skip my injection",
    },
    TriggerPattern {
        pattern: r"\b\d+(?:\.\d+)?\s?(?:mg|ml|mcg|cc)\b",
        example: "is 100mg too much",
    },
    TriggerPattern {
        pattern: r"\bmicrodos(?:e|es|ing)\b",
        example: "is microdosing better for lifting",
    },
    TriggerPattern {
        pattern: r"\bhow (?:often )?(?:should|do) i inject\b",
        example: "how often should i inject",
    },
];

const SURGICAL_CLEARANCE: &[TriggerPattern] = &[
    TriggerPattern {
        pattern: r"\b(?:after|since|following) (?:my )?(?:top |bottom )?surgery\b",
        example: "can i lift after surgery",
    },
    TriggerPattern {
        pattern: r"\b(?:top|bottom) surgery\b",
        example: "i just had top surgery",
    },
    TriggerPattern {
        pattern: r"\b(?:mastectomy|vaginoplasty|phalloplasty|metoidioplasty|orchiectomy|hysterectomy|augmentation|ffs)\b",
        example: "two weeks after my vaginoplasty",
    },
    TriggerPattern {
        pattern: r"\bpost[- ]?op(?:erative)?\b",
        example: "is it safe to squat post-op",
    },
    TriggerPattern {
        pattern: r"\b(?:cleared|clearance) (?:to|for) (?:lift|lifting|exercise|train|training|work out|workout|run|running)\b",
        example: "when will i be cleared to lift",
    },
    TriggerPattern {
        pattern: r"\bsurgeon\b",
        example: "should i ask my surgeon first",
    },
    TriggerPattern {
        pattern: r"\b(?:incisions?|scar tissue)\b|\b(?:my|surgical) (?:stitches|sutures|drains?)\b|\b(?:stitches|sutures|drains) (?:out|removed)\b",
        example: "can i train with my stitches in",
    },
];

const DIAGNOSIS_SEEKING: &[TriggerPattern] = &[
    TriggerPattern {
        pattern: r"\bdo i have (?:a |an )?(?:condition|disease|disorder|syndrome|infection|hernia|fracture|tear|sprain|injury|arthritis|[a-z]+itis)\b",
        example: "do i have tendonitis",
    },
    TriggerPattern {
        pattern: r"\bwhat(?:'s| is) wrong with (?:me|my)\b",
        example: "what is wrong with my shoulder",
    },
    TriggerPattern {
        pattern: r"\bdiagnos(?:e|is|ed)\b",
        example: "can you diagnose this",
    },
    TriggerPattern {
        pattern: r"\bis (?:this|it|that) (?:serious|cancer|a tumor|a hernia|broken|torn|fractured|sprained)\b",
        example: "is it broken",
    },
    TriggerPattern {
        pattern: r"\bsymptoms? of\b",
        example: "what are the symptoms of a hernia",
    },
    TriggerPattern {
        pattern: r"\b(?:lump|rash|mole|cyst)\b",
        example: "i found a lump",
    },
];

/// Pattern catalog, one group per category
///
/// Declared in priority order for readability; the classifier scans by
/// [`RedFlagCategory::PRIORITY_ORDER`], not by position in this slice.
pub const PATTERN_CATALOG: &[CategoryPatterns] = &[
    CategoryPatterns {
        category: RedFlagCategory::MedicalEmergency,
        triggers: MEDICAL_EMERGENCY,
    },
    CategoryPatterns {
        category: RedFlagCategory::AcuteSymptoms,
        triggers: ACUTE_SYMPTOMS,
    },
    CategoryPatterns {
        category: RedFlagCategory::MedicationDosing,
        triggers: MEDICATION_DOSING,
    },
    CategoryPatterns {
        category: RedFlagCategory::SurgicalClearance,
        triggers: SURGICAL_CLEARANCE,
    },
    CategoryPatterns {
        category: RedFlagCategory::DiagnosisSeeking,
        triggers: DIAGNOSIS_SEEKING,
    },
];

/// Triggers declared for `category` (empty if the category has no group)
#[must_use]
pub fn triggers_for(category: RedFlagCategory) -> &'static [TriggerPattern] {
    PATTERN_CATALOG
        .iter()
        .find(|group| group.category == category)
        .map_or(&[], |group| group.triggers)
}
