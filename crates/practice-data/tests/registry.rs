//! Integration coverage for the bundled practice registry.

use practice_data::{AppointmentKindSeed, PatientStatusSeed, PracticeRegistry};
use rstest::{fixture, rstest};

#[fixture]
fn registry() -> PracticeRegistry {
    PracticeRegistry::bundled().expect("bundled registry parses")
}

#[rstest]
fn every_appointment_resolves_to_a_patient(registry: PracticeRegistry) {
    for appointment in registry.appointments() {
        assert!(
            registry.find_patient(&appointment.patient_id).is_some(),
            "appointment {} should resolve",
            appointment.id
        );
    }
}

#[rstest]
fn completed_patients_have_full_progress(registry: PracticeRegistry) {
    let completed: Vec<_> = registry
        .patients()
        .iter()
        .filter(|patient| patient.status == PatientStatusSeed::Completed)
        .collect();

    assert!(!completed.is_empty());
    assert!(completed.iter().all(|patient| patient.progress == 100));
}

#[rstest]
fn initial_appointment_belongs_to_new_patient(registry: PracticeRegistry) {
    let initial = registry
        .appointments()
        .iter()
        .find(|appointment| appointment.kind == AppointmentKindSeed::Initial)
        .expect("an initial appointment is booked");
    let patient = registry
        .find_patient(&initial.patient_id)
        .expect("patient exists");

    assert!(patient.last_visit.is_none());
}

#[rstest]
fn record_visits_are_chronological(registry: PracticeRegistry) {
    let record = registry.find_record("1").expect("record exists");
    let dates: Vec<_> = record.visits.iter().map(|visit| visit.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();

    assert_eq!(dates, sorted);
}
