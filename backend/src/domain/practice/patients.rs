//! Patient directory listing.

use chrono::NaiveDate;
use practice_data::{PatientSeed, PatientStatusSeed};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SortDirection, contains_folded, fold_needle};

/// Treatment status of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    /// Under treatment.
    Active,
    /// Treatment finished.
    Completed,
    /// Awaiting a first visit.
    Pending,
}

impl From<PatientStatusSeed> for PatientStatus {
    fn from(value: PatientStatusSeed) -> Self {
        match value {
            PatientStatusSeed::Active => Self::Active,
            PatientStatusSeed::Completed => Self::Completed,
            PatientStatusSeed::Pending => Self::Pending,
        }
    }
}

/// Row in the patient directory and dashboard overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    /// Patient identifier.
    #[schema(example = "1")]
    pub id: String,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Presenting condition.
    pub condition: String,
    /// Date of the most recent visit.
    pub last_visit: Option<NaiveDate>,
    /// Date of the next booked visit.
    pub next_appointment: Option<NaiveDate>,
    /// Treatment status.
    pub status: PatientStatus,
    /// Treatment progress percentage.
    pub progress: u8,
}

impl From<&PatientSeed> for PatientSummary {
    fn from(seed: &PatientSeed) -> Self {
        Self {
            id: seed.id.clone(),
            name: seed.name.clone(),
            age: seed.age,
            condition: seed.condition.clone(),
            last_visit: seed.last_visit,
            next_appointment: seed.next_appointment,
            status: seed.status.into(),
            progress: seed.progress,
        }
    }
}

/// Sortable directory columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PatientSortField {
    /// Alphabetical by name.
    #[default]
    Name,
    /// By most recent visit; patients never seen sort first ascending.
    LastVisit,
    /// By treatment progress.
    Progress,
}

/// Filters and ordering for the patient directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDirectoryQuery {
    /// Case-insensitive match against name and condition.
    pub search: Option<String>,
    /// Only patients with this status.
    pub status: Option<PatientStatus>,
    /// Sort column.
    pub sort: PatientSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Filter and sort patients for the directory.
///
/// Ties keep registry order.
#[must_use]
pub fn patient_directory(
    patients: &[PatientSeed],
    query: &PatientDirectoryQuery,
) -> Vec<PatientSummary> {
    let needle = fold_needle(query.search.as_deref());
    let mut rows: Vec<PatientSummary> = patients
        .iter()
        .map(PatientSummary::from)
        .filter(|p| query.status.is_none_or(|status| p.status == status))
        .filter(|p| contains_folded(&p.name, &needle) || contains_folded(&p.condition, &needle))
        .collect();

    rows.sort_by(|a, b| {
        let ordering = match query.sort {
            PatientSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            PatientSortField::LastVisit => a.last_visit.cmp(&b.last_visit),
            PatientSortField::Progress => a.progress.cmp(&b.progress),
        };
        query.direction.apply(ordering)
    });
    rows
}
