//! Bundled fixture data for the CareAndCure practice screens.
//!
//! The practice backend has no persistence layer; every patient, appointment,
//! visit note, and case study shown by the practitioner screens comes from a
//! versioned JSON registry embedded in this crate. The crate validates the
//! registry's referential integrity once at load time so consumers can index
//! into it without further checks.
//!
//! # Example
//!
//! ```
//! use practice_data::PracticeRegistry;
//!
//! let registry = PracticeRegistry::bundled().expect("bundled registry is valid");
//! let sarah = registry.find_patient("1").expect("patient 1 exists");
//!
//! assert_eq!(sarah.name, "Sarah Johnson");
//! ```

mod error;
mod registry;
mod seed;

pub use error::RegistryError;
pub use registry::PracticeRegistry;
pub use seed::{
    AppointmentKindSeed, AppointmentSeed, AttachmentKindSeed, AttachmentSeed, CasePatientSeed,
    CaseStudySeed, PatientRecordSeed, PatientSeed, PatientStatusSeed, PracticeContentSeed,
    PractitionerProfileSeed, ProgressImageSeed, ProgressPhotoSeed, VisitSeed, WorkingHoursSeed,
};
