//! Practice screens: patient directory, patient records, case gallery,
//! dashboard and profile view models.
//!
//! The functions here are pure transformations over the fixture records
//! returned by [`PracticeRepository`](crate::domain::ports::PracticeRepository);
//! [`PracticeService`] wires them to the repository and the clock.

mod cases;
mod content;
mod dashboard;
mod patients;
mod record;
mod service;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use cases::{CaseGallery, CaseGalleryQuery, CaseSortField, CasePatient, CaseStudy, case_gallery};
pub use content::{PracticeContent, PractitionerProfile, WorkingHours, practitioner_profile};
pub use dashboard::{AppointmentKind, Dashboard, PracticeStats, UpcomingAppointment, dashboard};
pub use patients::{
    PatientDirectoryQuery, PatientSortField, PatientStatus, PatientSummary, patient_directory,
};
pub use record::{
    Attachment, PatientDetails, PatientRecord, ProgressImage, ProgressPhoto, Visit, treatment_duration_label,
};
pub use service::PracticeService;

/// Ordering applied to a sorted list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

fn fold_needle(search: Option<&str>) -> String {
    search.map(str::trim).unwrap_or_default().to_lowercase()
}
