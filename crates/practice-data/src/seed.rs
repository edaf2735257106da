//! Fixture record types.
//!
//! These records mirror the bundled JSON registry one-to-one. They are plain
//! data carriers and deliberately independent of backend domain types; the
//! backend converts them into its own read models at the adapter boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Treatment status of a patient as recorded in the fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatusSeed {
    /// Treatment is ongoing.
    Active,
    /// Treatment has finished.
    Completed,
    /// The patient is waiting for treatment to begin.
    Pending,
}

/// Patient summary shown on the dashboard and the patient directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSeed {
    /// Stable patient identifier, unique within the registry.
    pub id: String,
    /// Full patient name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Presenting condition.
    pub condition: String,
    /// Date of the most recent visit, if the patient has been seen.
    pub last_visit: Option<NaiveDate>,
    /// Date of the next booked appointment, if any.
    pub next_appointment: Option<NaiveDate>,
    /// Treatment status.
    pub status: PatientStatusSeed,
    /// Treatment progress as a percentage in `0..=100`.
    pub progress: u8,
}

/// Kind of a booked appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentKindSeed {
    /// First appointment with a new patient.
    Initial,
    /// Follow-up on an ongoing treatment.
    FollowUp,
    /// General consultation.
    Consultation,
}

/// Booked appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSeed {
    /// Appointment identifier.
    pub id: String,
    /// Identifier of the patient the appointment belongs to.
    pub patient_id: String,
    /// Appointment date.
    pub date: NaiveDate,
    /// Display time, e.g. `09:30 AM`.
    pub time: String,
    /// Appointment kind.
    pub kind: AppointmentKindSeed,
}

/// Attachment kind stored against a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKindSeed {
    /// PDF or other document.
    Document,
    /// Photograph or scan.
    Image,
}

/// File attached to a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSeed {
    /// Attachment identifier.
    pub id: String,
    /// File name shown to the practitioner.
    pub name: String,
    /// Attachment kind.
    pub kind: AttachmentKindSeed,
}

/// Treatment note recorded for a single visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitSeed {
    /// Visit identifier.
    pub id: String,
    /// Visit date.
    pub date: NaiveDate,
    /// Visit kind label, e.g. `Follow-up`.
    pub kind: String,
    /// Free-text clinical notes.
    pub notes: String,
    /// Symptoms reported during the visit.
    pub symptoms: Vec<String>,
    /// Prescribed remedy and posology.
    pub prescription: String,
    /// Files attached to the visit.
    #[serde(default)]
    pub files: Vec<AttachmentSeed>,
}

/// One side of a before/after comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPhotoSeed {
    /// Image location.
    pub url: String,
    /// Date the photo was taken.
    pub date: NaiveDate,
    /// Caption shown under the photo.
    pub caption: String,
}

/// Before/after comparison attached to a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressImageSeed {
    /// Comparison identifier.
    pub id: String,
    /// Grouping label, e.g. `Physical Appearance`.
    pub category: String,
    /// Narrative describing the change.
    pub description: String,
    /// Photo taken before treatment.
    pub before: ProgressPhotoSeed,
    /// Photo taken after treatment.
    pub after: ProgressPhotoSeed,
}

/// Detailed record for a single patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecordSeed {
    /// Identifier of the patient this record extends.
    pub patient_id: String,
    /// Gender as recorded at intake.
    pub gender: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Occupation.
    pub occupation: String,
    /// First day of treatment.
    pub start_date: NaiveDate,
    /// Known allergies.
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Relevant medical history.
    pub medical_history: String,
    /// Visits in chronological order.
    #[serde(default)]
    pub visits: Vec<VisitSeed>,
    /// Before/after comparisons.
    #[serde(default)]
    pub progress_images: Vec<ProgressImageSeed>,
}

/// Anonymised patient shown on a case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePatientSeed {
    /// Abbreviated name, e.g. `Sarah J.`.
    pub name: String,
    /// Age at treatment.
    pub age: u32,
    /// Gender.
    pub gender: String,
}

/// Published before/after case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudySeed {
    /// Case identifier.
    pub id: String,
    /// Case title.
    pub title: String,
    /// Anonymised patient.
    pub patient: CasePatientSeed,
    /// Treated condition.
    pub condition: String,
    /// Treatment length label, e.g. `6 months`.
    pub duration: String,
    /// Date treatment started.
    pub treatment_date: NaiveDate,
    /// Remedies used during treatment.
    pub remedies: Vec<String>,
    /// Case narrative.
    pub description: String,
    /// Reported success rate as a percentage in `0..=100`.
    pub success_rate: u8,
    /// Image taken before treatment.
    pub before_image: String,
    /// Image taken after treatment.
    pub after_image: String,
    /// Free-form tags used by gallery search.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursSeed {
    /// Lower-case weekday name.
    pub day: String,
    /// Display hours or `Closed`.
    pub hours: String,
}

/// Practice-level profile details merged into the practitioner profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerProfileSeed {
    /// Biography paragraph.
    pub about: String,
    /// Professional qualifications.
    pub qualifications: Vec<String>,
    /// Experience label.
    pub experience: String,
    /// Spoken languages.
    pub languages: Vec<String>,
    /// Practice address.
    pub address: String,
    /// Practice phone number.
    pub phone: String,
    /// Practice website.
    pub website: String,
    /// Clinical focus areas.
    pub focus_areas: Vec<String>,
    /// Weekly opening hours.
    pub working_hours: Vec<WorkingHoursSeed>,
}

/// Static marketing content for the public pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeContentSeed {
    /// Practice brand name.
    pub practice_name: String,
    /// Home page tagline.
    pub tagline: String,
    /// About page mission statement.
    pub mission: String,
    /// Services offered by the platform.
    pub services: Vec<String>,
    /// Practice values.
    pub values: Vec<String>,
}
