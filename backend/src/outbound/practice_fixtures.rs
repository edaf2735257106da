//! `PracticeRepository` adapter over the bundled `practice-data` registry.

use std::sync::Arc;

use async_trait::async_trait;
use practice_data::{
    AppointmentSeed, CaseStudySeed, PracticeContentSeed, PracticeRegistry, PractitionerProfileSeed,
    PatientSeed, RegistryError,
};

use crate::domain::ports::{PatientFile, PracticeRepository, PracticeRepositoryError};

/// Serves practice screens from a validated in-memory registry.
#[derive(Debug, Clone)]
pub struct BundledPracticeRepository {
    registry: Arc<PracticeRegistry>,
}

impl BundledPracticeRepository {
    /// Wrap an already parsed registry.
    pub fn new(registry: Arc<PracticeRegistry>) -> Self {
        Self { registry }
    }

    /// Parse the registry compiled into `practice-data`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the bundled JSON fails validation.
    pub fn bundled() -> Result<Self, RegistryError> {
        PracticeRegistry::bundled().map(|registry| Self::new(Arc::new(registry)))
    }
}

#[async_trait]
impl PracticeRepository for BundledPracticeRepository {
    async fn content(&self) -> Result<PracticeContentSeed, PracticeRepositoryError> {
        Ok(self.registry.content().clone())
    }

    async fn practitioner_profile(
        &self,
    ) -> Result<PractitionerProfileSeed, PracticeRepositoryError> {
        Ok(self.registry.practitioner().clone())
    }

    async fn patients(&self) -> Result<Vec<PatientSeed>, PracticeRepositoryError> {
        Ok(self.registry.patients().to_vec())
    }

    async fn appointments(&self) -> Result<Vec<AppointmentSeed>, PracticeRepositoryError> {
        Ok(self.registry.appointments().to_vec())
    }

    async fn patient_file(
        &self,
        patient_id: &str,
    ) -> Result<Option<PatientFile>, PracticeRepositoryError> {
        Ok(self
            .registry
            .find_patient(patient_id)
            .map(|summary| PatientFile {
                summary: summary.clone(),
                record: self.registry.find_record(patient_id).cloned(),
            }))
    }

    async fn case_studies(&self) -> Result<Vec<CaseStudySeed>, PracticeRepositoryError> {
        Ok(self.registry.case_studies().to_vec())
    }
}

#[cfg(test)]
mod tests {
    //! Lookups against the bundled registry.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> BundledPracticeRepository {
        BundledPracticeRepository::bundled().expect("bundled registry")
    }

    #[rstest]
    #[tokio::test]
    async fn patient_file_joins_the_record(repository: BundledPracticeRepository) {
        let file = repository
            .patient_file("1")
            .await
            .expect("lookup succeeds")
            .expect("patient 1 exists");

        assert_eq!(file.summary.name, "Sarah Johnson");
        assert!(file.record.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_patient_is_absent(repository: BundledPracticeRepository) {
        let file = repository.patient_file("999").await.expect("lookup succeeds");

        assert!(file.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn lists_follow_registry_order(repository: BundledPracticeRepository) {
        let patients = repository.patients().await.expect("patients");
        let cases = repository.case_studies().await.expect("cases");

        assert_eq!(patients.len(), 6);
        assert_eq!(cases.first().map(|c| c.id.as_str()), Some("1"));
    }
}
