//! Driven port for the practice's patient and case fixtures.
//!
//! Screens read patients, appointments, visit records and case studies
//! through this port. The only adapter today serves the bundled registry.

use async_trait::async_trait;
use practice_data::{
    AppointmentSeed, CaseStudySeed, PatientRecordSeed, PatientSeed, PracticeContentSeed,
    PractitionerProfileSeed,
};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by practice repository adapters.
    pub enum PracticeRepositoryError {
        /// The backing data could not be loaded.
        Unavailable { message: String } => "practice data unavailable: {message}",
    }
}

/// Patient summary joined with the detailed record, when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientFile {
    /// Directory entry for the patient.
    pub summary: PatientSeed,
    /// Visit history and contact details, if captured.
    pub record: Option<PatientRecordSeed>,
}

/// Read access to the practice fixtures.
#[async_trait]
pub trait PracticeRepository: Send + Sync {
    /// Public marketing content.
    async fn content(&self) -> Result<PracticeContentSeed, PracticeRepositoryError>;

    /// Practice-level practitioner profile.
    async fn practitioner_profile(&self)
    -> Result<PractitionerProfileSeed, PracticeRepositoryError>;

    /// All patients in directory order.
    async fn patients(&self) -> Result<Vec<PatientSeed>, PracticeRepositoryError>;

    /// All booked appointments.
    async fn appointments(&self) -> Result<Vec<AppointmentSeed>, PracticeRepositoryError>;

    /// Patient file for `patient_id`, or `None` when no such patient exists.
    async fn patient_file(
        &self,
        patient_id: &str,
    ) -> Result<Option<PatientFile>, PracticeRepositoryError>;

    /// Published case studies.
    async fn case_studies(&self) -> Result<Vec<CaseStudySeed>, PracticeRepositoryError>;
}
