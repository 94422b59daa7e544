// ABOUTME: Static registry of crisis and emergency contacts surfaced alongside deflections
// ABOUTME: Maps red flag categories to the subset of resources a caller should display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

use serde::Serialize;

use super::red_flags::RedFlagCategory;

/// One crisis or emergency contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisResource {
    /// Service name
    pub name: &'static str,
    /// Phone number, exactly as it must be displayed
    pub number: &'static str,
    /// Short description of when to use it
    pub description: &'static str,
}

const EMERGENCY_SERVICES: CrisisResource = CrisisResource {
    name: "Emergency Services",
    number: "911",
    description: "Immediate danger or a medical emergency",
};

const CRISIS_LIFELINE: CrisisResource = CrisisResource {
    name: "988 Suicide & Crisis Lifeline",
    number: "988",
    description: "24/7 call or text support for anyone in emotional distress",
};

const TRANS_LIFELINE: CrisisResource = CrisisResource {
    name: "Trans Lifeline",
    number: "877-565-8860",
    description: "Peer support run by and for trans people",
};

const TREVOR_PROJECT: CrisisResource = CrisisResource {
    name: "The Trevor Project",
    number: "1-866-488-7386",
    description: "24/7 crisis support for LGBTQ+ young people",
};

static ALL_RESOURCES: [CrisisResource; 4] = [
    EMERGENCY_SERVICES,
    CRISIS_LIFELINE,
    TRANS_LIFELINE,
    TREVOR_PROJECT,
];

static ACUTE_RESOURCES: [CrisisResource; 1] = [EMERGENCY_SERVICES];

/// Every registered resource, emergency services first
#[must_use]
pub fn crisis_resources() -> &'static [CrisisResource] {
    &ALL_RESOURCES
}

/// Resources to show with a deflection for `category`
///
/// Only emergencies and acute symptoms carry contacts; the other categories point
/// the user at their own provider through the deflection message.
#[must_use]
pub fn crisis_resources_for(category: Option<RedFlagCategory>) -> &'static [CrisisResource] {
    match category {
        Some(RedFlagCategory::MedicalEmergency) => &ALL_RESOURCES,
        Some(RedFlagCategory::AcuteSymptoms) => &ACUTE_RESOURCES,
        Some(
            RedFlagCategory::MedicationDosing
            | RedFlagCategory::SurgicalClearance
            | RedFlagCategory::DiagnosisSeeking,
        )
        | None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_gets_every_resource() {
        let resources = crisis_resources_for(Some(RedFlagCategory::MedicalEmergency));
        assert_eq!(resources.len(), crisis_resources().len());
        assert!(resources.iter().any(|r| r.number == "988"));
    }

    #[test]
    fn test_acute_gets_emergency_services_only() {
        let resources = crisis_resources_for(Some(RedFlagCategory::AcuteSymptoms));
        assert_eq!(resources, &[EMERGENCY_SERVICES]);
    }

    #[test]
    fn test_non_urgent_categories_get_none() {
        assert!(crisis_resources_for(Some(RedFlagCategory::MedicationDosing)).is_empty());
        assert!(crisis_resources_for(None).is_empty());
    }

    #[test]
    fn test_emergency_message_numbers_are_registered() {
        let message = RedFlagCategory::MedicalEmergency.deflection_message();
        for number in ["911", "988", "877-565-8860"] {
            assert!(message.contains(number));
            assert!(crisis_resources().iter().any(|r| r.number == number));
        }
    }
}
