//! Practice screens service over the repository port and the clock.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;

use super::{
    CaseGallery, CaseGalleryQuery, Dashboard, PatientDirectoryQuery, PatientRecord,
    PatientSummary, PracticeContent, PractitionerProfile, case_gallery, dashboard,
    patient_directory, practitioner_profile,
};
use crate::domain::ports::{PracticeRepository, PracticeRepositoryError};
use crate::domain::{Error, Identity};

/// Builds practice view models from the repository.
#[derive(Clone)]
pub struct PracticeService {
    repository: Arc<dyn PracticeRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PracticeService {
    /// Create a service reading from `repository` with "today" taken from
    /// `clock`.
    pub fn new(
        repository: Arc<dyn PracticeRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self { repository, clock }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    fn map_repository_error(error: PracticeRepositoryError) -> Error {
        match error {
            PracticeRepositoryError::Unavailable { message } => {
                Error::service_unavailable(format!("practice data unavailable: {message}"))
            }
        }
    }

    /// Home and about page content.
    pub async fn content(&self) -> Result<PracticeContent, Error> {
        self.repository
            .content()
            .await
            .map(PracticeContent::from)
            .map_err(Self::map_repository_error)
    }

    /// Dashboard greeting `identity`.
    pub async fn dashboard(&self, identity: &Identity) -> Result<Dashboard, Error> {
        let patients = self
            .repository
            .patients()
            .await
            .map_err(Self::map_repository_error)?;
        let appointments = self
            .repository
            .appointments()
            .await
            .map_err(Self::map_repository_error)?;
        let cases = self
            .repository
            .case_studies()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(dashboard(
            identity.name().as_str(),
            &patients,
            &appointments,
            &cases,
            self.today(),
        ))
    }

    /// Filtered patient directory.
    pub async fn patients(
        &self,
        query: &PatientDirectoryQuery,
    ) -> Result<Vec<PatientSummary>, Error> {
        let patients = self
            .repository
            .patients()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(patient_directory(&patients, query))
    }

    /// Record screen for one patient.
    pub async fn patient_record(&self, patient_id: &str) -> Result<PatientRecord, Error> {
        let file = self
            .repository
            .patient_file(patient_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("patient {patient_id} not found")))?;
        Ok(PatientRecord::from_file(&file, self.today()))
    }

    /// Filtered case gallery.
    pub async fn case_gallery(&self, query: &CaseGalleryQuery) -> Result<CaseGallery, Error> {
        let studies = self
            .repository
            .case_studies()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(case_gallery(&studies, query))
    }

    /// Profile screen for `identity`.
    pub async fn profile(&self, identity: &Identity) -> Result<PractitionerProfile, Error> {
        let practice = self
            .repository
            .practitioner_profile()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(practitioner_profile(identity, practice))
    }
}

#[cfg(test)]
mod tests {
    //! Service wiring with a failing repository.
    use super::*;
    use crate::domain::ErrorCode;
    use async_trait::async_trait;
    use chrono::{DateTime, Local, Utc};
    use practice_data::{
        AppointmentSeed, CaseStudySeed, PatientSeed, PracticeContentSeed, PractitionerProfileSeed,
    };
    use crate::domain::ports::PatientFile;

    struct OfflineRepository;

    #[async_trait]
    impl PracticeRepository for OfflineRepository {
        async fn content(&self) -> Result<PracticeContentSeed, PracticeRepositoryError> {
            Err(PracticeRepositoryError::unavailable("offline"))
        }

        async fn practitioner_profile(
            &self,
        ) -> Result<PractitionerProfileSeed, PracticeRepositoryError> {
            Err(PracticeRepositoryError::unavailable("offline"))
        }

        async fn patients(&self) -> Result<Vec<PatientSeed>, PracticeRepositoryError> {
            Err(PracticeRepositoryError::unavailable("offline"))
        }

        async fn appointments(&self) -> Result<Vec<AppointmentSeed>, PracticeRepositoryError> {
            Err(PracticeRepositoryError::unavailable("offline"))
        }

        async fn patient_file(
            &self,
            _patient_id: &str,
        ) -> Result<Option<PatientFile>, PracticeRepositoryError> {
            Err(PracticeRepositoryError::unavailable("offline"))
        }

        async fn case_studies(&self) -> Result<Vec<CaseStudySeed>, PracticeRepositoryError> {
            Err(PracticeRepositoryError::unavailable("offline"))
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[tokio::test]
    async fn repository_outage_maps_to_service_unavailable() {
        let service = PracticeService::new(
            Arc::new(OfflineRepository),
            Arc::new(FixedClock(Utc::now())),
        );

        let err = service
            .patients(&PatientDirectoryQuery::default())
            .await
            .expect_err("repository is offline");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
