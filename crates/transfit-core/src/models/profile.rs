// ABOUTME: User safety profile model: binding, hormone therapy, and surgical history
// ABOUTME: Read-only snapshot of the physiological state the safety rules inspect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Physiological and medical state of one user, as captured during onboarding
///
/// # Examples
///
/// ```rust
/// use transfit_core::models::{BindingFrequency, BindingStatus, SafetyProfile};
/// use uuid::Uuid;
///
/// let profile = SafetyProfile {
///     user_id: Uuid::new_v4(),
///     binding: BindingStatus {
///         binds: true,
///         frequency: BindingFrequency::Daily,
///         ..BindingStatus::default()
///     },
///     hrt: None,
///     surgeries: Vec::new(),
/// };
/// assert!(profile.binding.is_currently_binding());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyProfile {
    /// User the profile belongs to
    pub user_id: Uuid,
    /// Chest binding habits
    #[serde(default)]
    pub binding: BindingStatus,
    /// Hormone replacement therapy, if any
    #[serde(default)]
    pub hrt: Option<HrtStatus>,
    /// Gender-affirming or other surgeries, in any order
    #[serde(default)]
    pub surgeries: Vec<SurgeryRecord>,
}

impl SafetyProfile {
    /// Profile with no binding, no HRT, and no surgical history
    #[must_use]
    pub fn baseline(user_id: Uuid) -> Self {
        Self {
            user_id,
            binding: BindingStatus::default(),
            hrt: None,
            surgeries: Vec::new(),
        }
    }

    /// Surgeries affecting the given body region
    pub fn surgeries_in(&self, region: SurgeryRegion) -> impl Iterator<Item = &SurgeryRecord> {
        self.surgeries
            .iter()
            .filter(move |s| s.surgery_type.region() == region)
    }
}

/// How often the user binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BindingFrequency {
    /// Does not bind
    #[default]
    Never,
    /// Binds on some days
    Occasionally,
    /// Binds most days
    Daily,
}

/// Type of binder the user wears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinderType {
    /// Purpose-made commercial binder
    Commercial,
    /// Sports bra or compression top
    SportsCompression,
    /// Kinesiology / trans tape
    Tape,
    /// Elastic (ace) bandage
    AceBandage,
    /// Improvised binding (duct tape, plastic wrap, layered garments)
    Diy,
    /// Anything else
    Other,
}

impl BinderType {
    /// Binding methods that restrict breathing and ribs regardless of exercise choice
    #[must_use]
    pub const fn is_unsafe_for_exercise(&self) -> bool {
        matches!(self, Self::AceBandage | Self::Diy)
    }

    /// Database/API string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::SportsCompression => "sports_compression",
            Self::Tape => "tape",
            Self::AceBandage => "ace_bandage",
            Self::Diy => "diy",
            Self::Other => "other",
        }
    }
}

/// Chest binding habits
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BindingStatus {
    /// Whether the user binds at all
    #[serde(default)]
    pub binds: bool,
    /// How often
    #[serde(default)]
    pub frequency: BindingFrequency,
    /// Typical hours bound per day
    #[serde(default)]
    pub hours_per_day: Option<f32>,
    /// Binder in use
    #[serde(default)]
    pub binder_type: Option<BinderType>,
    /// Whether the user keeps the binder on while training
    #[serde(default)]
    pub binds_during_exercise: bool,
}

impl BindingStatus {
    /// True when the user reports binding and a non-zero frequency
    #[must_use]
    pub fn is_currently_binding(&self) -> bool {
        self.binds && self.frequency != BindingFrequency::Never
    }
}

/// Hormone replacement therapy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrtType {
    /// Estradiol-based feminizing therapy
    Estrogen,
    /// Masculinizing testosterone therapy
    Testosterone,
    /// Blockers or anti-androgens without estrogen
    AntiAndrogen,
}

/// Hormone replacement therapy status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrtStatus {
    /// Therapy type
    pub hrt_type: HrtType,
    /// First dose date, when known
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl HrtStatus {
    /// Whole months on therapy at `now`, or `None` when the start date is unknown
    ///
    /// A start date after `now` yields a negative count; callers decide whether
    /// that is malformed.
    #[must_use]
    pub fn months_on_therapy(&self, now: DateTime<Utc>) -> Option<i64> {
        self.start_date
            .map(|start| (now.date_naive() - start).num_days() / 30)
    }
}

/// Surgery type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurgeryType {
    /// Double incision, keyhole, or other masculinizing chest surgery
    TopSurgery,
    /// Breast augmentation
    BreastAugmentation,
    /// Vaginoplasty
    Vaginoplasty,
    /// Phalloplasty
    Phalloplasty,
    /// Metoidioplasty
    Metoidioplasty,
    /// Orchiectomy
    Orchiectomy,
    /// Hysterectomy
    Hysterectomy,
    /// Facial feminization surgery
    FacialFeminization,
    /// Any other procedure
    Other,
}

/// Body region a surgery affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurgeryRegion {
    /// Chest and upper body
    Chest,
    /// Pelvis and lower abdomen
    Pelvic,
    /// Face and neck
    Face,
    /// Unspecified
    Other,
}

impl SurgeryType {
    /// Region whose loading is restricted during recovery
    #[must_use]
    pub const fn region(&self) -> SurgeryRegion {
        match self {
            Self::TopSurgery | Self::BreastAugmentation => SurgeryRegion::Chest,
            Self::Vaginoplasty
            | Self::Phalloplasty
            | Self::Metoidioplasty
            | Self::Orchiectomy
            | Self::Hysterectomy => SurgeryRegion::Pelvic,
            Self::FacialFeminization => SurgeryRegion::Face,
            Self::Other => SurgeryRegion::Other,
        }
    }
}

/// One surgery in the user's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurgeryRecord {
    /// Procedure
    pub surgery_type: SurgeryType,
    /// Date of the procedure
    pub surgery_date: NaiveDate,
    /// Whether the surgeon has cleared the user for unrestricted training
    #[serde(default)]
    pub surgeon_cleared: bool,
}

impl SurgeryRecord {
    /// Whole weeks since the procedure at `now` (negative if dated in the future)
    #[must_use]
    pub fn weeks_since(&self, now: DateTime<Utc>) -> i64 {
        (now.date_naive() - self.surgery_date).num_weeks()
    }
}
