//! Practitioner dashboard.

use chrono::{Days, NaiveDate, NaiveTime};
use practice_data::{AppointmentKindSeed, AppointmentSeed, CaseStudySeed, PatientSeed};
use serde::Serialize;
use utoipa::ToSchema;

use super::{PatientStatus, PatientSummary};

const WEEK: Days = Days::new(7);

/// Appointment kind as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentKind {
    /// First visit.
    Initial,
    /// Follow-up on ongoing treatment.
    FollowUp,
    /// General consultation.
    Consultation,
}

impl From<AppointmentKindSeed> for AppointmentKind {
    fn from(value: AppointmentKindSeed) -> Self {
        match value {
            AppointmentKindSeed::Initial => Self::Initial,
            AppointmentKindSeed::FollowUp => Self::FollowUp,
            AppointmentKindSeed::Consultation => Self::Consultation,
        }
    }
}

/// Appointment row joined with the patient's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAppointment {
    /// Appointment identifier.
    pub id: String,
    /// Patient identifier.
    pub patient_id: String,
    /// Patient name.
    pub patient_name: String,
    /// Appointment date.
    pub date: NaiveDate,
    /// Display time, e.g. `09:30 AM`.
    pub time: String,
    /// Appointment kind.
    pub kind: AppointmentKind,
}

/// Headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeStats {
    /// Patients on the books.
    pub total_patients: usize,
    /// Patients under treatment.
    pub active_patients: usize,
    /// Patients whose treatment finished.
    pub completed_treatments: usize,
    /// Appointments from today through the next six days.
    pub appointments_this_week: usize,
    /// Mean case success rate, rounded; zero with no cases.
    pub success_rate: u8,
}

/// Dashboard screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Name used in the welcome line.
    pub greeting_name: String,
    /// Headline figures.
    pub stats: PracticeStats,
    /// Patient overview in registry order.
    pub patients: Vec<PatientSummary>,
    /// Appointments, earliest first.
    pub upcoming_appointments: Vec<UpcomingAppointment>,
}

/// Build the dashboard as of `today`.
#[must_use]
pub fn dashboard(
    greeting_name: &str,
    patients: &[PatientSeed],
    appointments: &[AppointmentSeed],
    cases: &[CaseStudySeed],
    today: NaiveDate,
) -> Dashboard {
    let summaries: Vec<PatientSummary> = patients.iter().map(PatientSummary::from).collect();
    let count = |status: PatientStatus| summaries.iter().filter(|p| p.status == status).count();
    let week_end = today.checked_add_days(WEEK).unwrap_or(NaiveDate::MAX);

    let stats = PracticeStats {
        total_patients: summaries.len(),
        active_patients: count(PatientStatus::Active),
        completed_treatments: count(PatientStatus::Completed),
        appointments_this_week: appointments
            .iter()
            .filter(|a| a.date >= today && a.date < week_end)
            .count(),
        success_rate: mean_success_rate(cases),
    };

    let mut upcoming: Vec<UpcomingAppointment> = appointments
        .iter()
        .map(|a| UpcomingAppointment {
            id: a.id.clone(),
            patient_id: a.patient_id.clone(),
            patient_name: patients
                .iter()
                .find(|p| p.id == a.patient_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            date: a.date,
            time: a.time.clone(),
            kind: a.kind.into(),
        })
        .collect();
    upcoming.sort_by_key(|a| (a.date, parse_time(&a.time)));

    Dashboard {
        greeting_name: greeting_name.to_owned(),
        stats,
        patients: summaries,
        upcoming_appointments: upcoming,
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%I:%M %p").ok()
}

fn mean_success_rate(cases: &[CaseStudySeed]) -> u8 {
    if cases.is_empty() {
        return 0;
    }
    let total: usize = cases.iter().map(|c| usize::from(c.success_rate)).sum();
    let mean = (total + cases.len() / 2) / cases.len();
    u8::try_from(mean).unwrap_or(u8::MAX)
}
