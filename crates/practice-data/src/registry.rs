//! Practice registry parsing and lookup.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{
    AppointmentSeed, CaseStudySeed, PatientRecordSeed, PatientSeed, PracticeContentSeed,
    PractitionerProfileSeed,
};

/// The registry version this crate understands.
const SUPPORTED_VERSION: u32 = 1;

/// Upper bound for percentage fields.
const PERCENT_MAX: u8 = 100;

static BUNDLED_REGISTRY: &str = include_str!("../data/practice.json");

/// Validated collection of practice fixtures.
///
/// ## Invariants
/// - At least one patient exists and every patient id is non-empty and unique.
/// - Every appointment and record references a known patient.
/// - `progress` and `successRate` values lie within `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRegistry {
    content: PracticeContentSeed,
    practitioner: PractitionerProfileSeed,
    patients: Vec<PatientSeed>,
    appointments: Vec<AppointmentSeed>,
    records: Vec<PatientRecordSeed>,
    case_studies: Vec<CaseStudySeed>,
}

impl PracticeRegistry {
    /// Parses the registry bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the bundled data fails validation, which
    /// indicates a packaging defect.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_REGISTRY)
    }

    /// Parses a registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or misses required fields
    /// - The version is unsupported
    /// - Patient ids are empty or duplicated
    /// - An appointment or record references an unknown patient
    /// - A percentage is out of range
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawPracticeRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawPracticeRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.patients.is_empty() {
            return Err(RegistryError::EmptyPatients);
        }

        let mut known = HashSet::with_capacity(raw.patients.len());
        for (index, patient) in raw.patients.iter().enumerate() {
            if patient.id.trim().is_empty() {
                return Err(RegistryError::EmptyPatientId { index });
            }
            if !known.insert(patient.id.as_str()) {
                return Err(RegistryError::DuplicatePatientId {
                    id: patient.id.clone(),
                });
            }
            check_percentage("progress", &patient.id, patient.progress)?;
        }

        for appointment in &raw.appointments {
            if !known.contains(appointment.patient_id.as_str()) {
                return Err(RegistryError::UnknownPatient {
                    owner: "appointment",
                    owner_id: appointment.id.clone(),
                    patient_id: appointment.patient_id.clone(),
                });
            }
        }

        for record in &raw.records {
            if !known.contains(record.patient_id.as_str()) {
                return Err(RegistryError::UnknownPatient {
                    owner: "record",
                    owner_id: record.patient_id.clone(),
                    patient_id: record.patient_id.clone(),
                });
            }
        }

        for case in &raw.case_studies {
            check_percentage("successRate", &case.id, case.success_rate)?;
        }

        Ok(Self {
            content: raw.content,
            practitioner: raw.practitioner,
            patients: raw.patients,
            appointments: raw.appointments,
            records: raw.records,
            case_studies: raw.case_studies,
        })
    }

    /// Returns the public marketing content.
    #[must_use]
    pub const fn content(&self) -> &PracticeContentSeed {
        &self.content
    }

    /// Returns the practice-level practitioner profile.
    #[must_use]
    pub const fn practitioner(&self) -> &PractitionerProfileSeed {
        &self.practitioner
    }

    /// Returns all patient summaries in registry order.
    #[must_use]
    pub fn patients(&self) -> &[PatientSeed] {
        &self.patients
    }

    /// Returns all booked appointments in registry order.
    #[must_use]
    pub fn appointments(&self) -> &[AppointmentSeed] {
        &self.appointments
    }

    /// Returns all published case studies in registry order.
    #[must_use]
    pub fn case_studies(&self) -> &[CaseStudySeed] {
        &self.case_studies
    }

    /// Finds a patient summary by id.
    #[must_use]
    pub fn find_patient(&self, id: &str) -> Option<&PatientSeed> {
        self.patients.iter().find(|patient| patient.id == id)
    }

    /// Finds the detailed record for a patient, when one has been captured.
    #[must_use]
    pub fn find_record(&self, patient_id: &str) -> Option<&PatientRecordSeed> {
        self.records
            .iter()
            .find(|record| record.patient_id == patient_id)
    }
}

fn check_percentage(field: &'static str, id: &str, value: u8) -> Result<(), RegistryError> {
    if value > PERCENT_MAX {
        return Err(RegistryError::PercentageOutOfRange {
            field,
            id: id.to_owned(),
            value,
        });
    }
    Ok(())
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPracticeRegistry {
    version: u32,
    content: PracticeContentSeed,
    practitioner: PractitionerProfileSeed,
    patients: Vec<PatientSeed>,
    #[serde(default)]
    appointments: Vec<AppointmentSeed>,
    #[serde(default)]
    records: Vec<PatientRecordSeed>,
    #[serde(default)]
    case_studies: Vec<CaseStudySeed>,
}
