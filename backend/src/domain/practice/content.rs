//! Public practice content and the practitioner's own profile.

use practice_data::{PracticeContentSeed, PractitionerProfileSeed};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Identity;

const DEFAULT_SPECIALIZATION: &str = "Homeopathic Physician";

/// Marketing copy for the home and about pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeContent {
    /// Practice name.
    #[schema(example = "CareAndCure")]
    pub practice_name: String,
    /// Strapline.
    pub tagline: String,
    /// Mission statement.
    pub mission: String,
    /// Services offered.
    pub services: Vec<String>,
    /// Practice values.
    pub values: Vec<String>,
}

impl From<PracticeContentSeed> for PracticeContent {
    fn from(seed: PracticeContentSeed) -> Self {
        Self {
            practice_name: seed.practice_name,
            tagline: seed.tagline,
            mission: seed.mission,
            services: seed.services,
            values: seed.values,
        }
    }
}

/// Opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WorkingHours {
    /// Lower-case weekday name.
    pub day: String,
    /// Display hours or `Closed`.
    pub hours: String,
}

/// Profile screen: the signed-in identity merged over the practice profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerProfile {
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Profile image, if one is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Specialization; falls back to the practice default.
    pub specialization: String,
    /// Biography.
    pub about: String,
    /// Certifications.
    pub qualifications: Vec<String>,
    /// Years in practice.
    pub experience: String,
    /// Spoken languages.
    pub languages: Vec<String>,
    /// Practice address.
    pub address: String,
    /// Practice phone.
    pub phone: String,
    /// Practice website.
    pub website: String,
    /// Areas of focus.
    pub focus_areas: Vec<String>,
    /// Weekly opening hours.
    pub working_hours: Vec<WorkingHours>,
}

/// Merge `identity` over the practice-level profile.
#[must_use]
pub fn practitioner_profile(identity: &Identity, practice: PractitionerProfileSeed) -> PractitionerProfile {
    PractitionerProfile {
        name: identity.name().to_string(),
        email: identity.email().to_string(),
        profile_image: identity.profile_image().map(str::to_owned),
        specialization: identity
            .specialization()
            .unwrap_or(DEFAULT_SPECIALIZATION)
            .to_owned(),
        about: practice.about,
        qualifications: practice.qualifications,
        experience: practice.experience,
        languages: practice.languages,
        address: practice.address,
        phone: practice.phone,
        website: practice.website,
        focus_areas: practice.focus_areas,
        working_hours: practice
            .working_hours
            .into_iter()
            .map(|slot| WorkingHours {
                day: slot.day,
                hours: slot.hours,
            })
            .collect(),
    }
}
