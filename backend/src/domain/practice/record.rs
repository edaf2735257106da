//! Patient record screen.

use chrono::NaiveDate;
use practice_data::{AttachmentKindSeed, PatientRecordSeed, ProgressImageSeed, VisitSeed};
use serde::Serialize;
use utoipa::ToSchema;

use super::PatientSummary;
use crate::domain::ports::PatientFile;

const DAYS_PER_MONTH: i64 = 30;

/// Human-readable treatment length between `start` and `today`.
///
/// Whole days are divided into 30-day months and rounded up.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use careandcure::domain::practice::treatment_duration_label;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 15).expect("date");
/// let today = NaiveDate::from_ymd_opt(2024, 2, 1).expect("date");
/// assert_eq!(treatment_duration_label(start, today), "1 month");
/// ```
#[must_use]
pub fn treatment_duration_label(start: NaiveDate, today: NaiveDate) -> String {
    let days = (today - start).num_days().abs();
    let months = (days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH;
    let unit = if months == 1 { "month" } else { "months" };
    format!("{months} {unit}")
}

/// File attached to a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment identifier.
    pub id: String,
    /// File name.
    pub name: String,
    /// `document` or `image`.
    #[schema(example = "document")]
    pub kind: String,
}

/// Visit note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Visit identifier.
    pub id: String,
    /// Visit date.
    pub date: NaiveDate,
    /// Visit type label.
    pub kind: String,
    /// Practitioner notes.
    pub notes: String,
    /// Reported symptoms.
    pub symptoms: Vec<String>,
    /// Prescribed remedies.
    pub prescription: String,
    /// Attached files.
    pub files: Vec<Attachment>,
}

impl From<&VisitSeed> for Visit {
    fn from(seed: &VisitSeed) -> Self {
        Self {
            id: seed.id.clone(),
            date: seed.date,
            kind: seed.kind.clone(),
            notes: seed.notes.clone(),
            symptoms: seed.symptoms.clone(),
            prescription: seed.prescription.clone(),
            files: seed
                .files
                .iter()
                .map(|file| Attachment {
                    id: file.id.clone(),
                    name: file.name.clone(),
                    kind: match file.kind {
                        AttachmentKindSeed::Document => "document",
                        AttachmentKindSeed::Image => "image",
                    }
                    .to_owned(),
                })
                .collect(),
        }
    }
}

/// One side of a progress comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPhoto {
    /// Image location.
    pub url: String,
    /// Capture date.
    pub date: NaiveDate,
    /// Caption.
    pub caption: String,
}

/// Before/after comparison within a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressImage {
    /// Comparison identifier.
    pub id: String,
    /// Grouping label.
    pub category: String,
    /// What the comparison shows.
    pub description: String,
    /// Before treatment.
    pub before: ProgressPhoto,
    /// After treatment.
    pub after: ProgressPhoto,
}

impl From<&ProgressImageSeed> for ProgressImage {
    fn from(seed: &ProgressImageSeed) -> Self {
        let photo = |p: &practice_data::ProgressPhotoSeed| ProgressPhoto {
            url: p.url.clone(),
            date: p.date,
            caption: p.caption.clone(),
        };
        Self {
            id: seed.id.clone(),
            category: seed.category.clone(),
            description: seed.description.clone(),
            before: photo(&seed.before),
            after: photo(&seed.after),
        }
    }
}

/// Contact and history details captured at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    /// Gender as recorded.
    pub gender: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Occupation.
    pub occupation: String,
    /// Date treatment began.
    pub start_date: NaiveDate,
    /// Treatment length so far, e.g. `3 months`.
    pub treatment_duration: String,
    /// Known allergies.
    pub allergies: Vec<String>,
    /// Relevant history.
    pub medical_history: String,
}

/// Patient record screen.
///
/// Patients without a captured record show the summary alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Directory entry.
    pub summary: PatientSummary,
    /// Intake details, when captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<PatientDetails>,
    /// Visits, newest first.
    pub visits: Vec<Visit>,
    /// Progress comparisons.
    pub progress_images: Vec<ProgressImage>,
}

impl PatientRecord {
    /// Assemble the record screen for `file` as of `today`.
    #[must_use]
    pub fn from_file(file: &PatientFile, today: NaiveDate) -> Self {
        let summary = PatientSummary::from(&file.summary);
        let Some(record) = file.record.as_ref() else {
            return Self {
                summary,
                details: None,
                visits: Vec::new(),
                progress_images: Vec::new(),
            };
        };

        let mut visits: Vec<Visit> = record.visits.iter().map(Visit::from).collect();
        visits.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            summary,
            details: Some(details(record, today)),
            visits,
            progress_images: record.progress_images.iter().map(ProgressImage::from).collect(),
        }
    }
}

fn details(record: &PatientRecordSeed, today: NaiveDate) -> PatientDetails {
    PatientDetails {
        gender: record.gender.clone(),
        email: record.email.clone(),
        phone: record.phone.clone(),
        address: record.address.clone(),
        occupation: record.occupation.clone(),
        start_date: record.start_date,
        treatment_duration: treatment_duration_label(record.start_date, today),
        allergies: record.allergies.clone(),
        medical_history: record.medical_history.clone(),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for record assembly.
    use super::*;
    use practice_data::PracticeRegistry;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    #[case(date(2024, 1, 15), date(2024, 1, 15), "0 months")]
    #[case(date(2024, 1, 15), date(2024, 1, 16), "1 month")]
    #[case(date(2024, 1, 15), date(2024, 2, 14), "1 month")]
    #[case(date(2024, 1, 15), date(2024, 2, 15), "2 months")]
    #[case(date(2024, 3, 1), date(2024, 1, 1), "2 months")]
    fn duration_labels(#[case] start: NaiveDate, #[case] today: NaiveDate, #[case] expected: &str) {
        assert_eq!(treatment_duration_label(start, today), expected);
    }

    fn file(id: &str) -> PatientFile {
        let registry = PracticeRegistry::bundled().expect("bundled registry");
        PatientFile {
            summary: registry.find_patient(id).expect("patient").clone(),
            record: registry.find_record(id).cloned(),
        }
    }

    #[test]
    fn visits_are_newest_first() {
        let record = PatientRecord::from_file(&file("1"), date(2024, 4, 15));
        let dates: Vec<_> = record.visits.iter().map(|v| v.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 3, 15), date(2024, 2, 5), date(2024, 1, 15)]
        );
        assert_eq!(
            record.details.as_ref().map(|d| d.treatment_duration.as_str()),
            Some("4 months")
        );
        assert_eq!(record.progress_images.len(), 1);
    }

    #[test]
    fn patient_without_record_has_summary_only() {
        let record = PatientRecord::from_file(&file("2"), date(2025, 1, 1));
        assert_eq!(record.summary.name, "Michael Brown");
        assert!(record.details.is_none());
        assert!(record.visits.is_empty());
    }
}
