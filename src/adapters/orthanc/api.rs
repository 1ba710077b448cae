//! Orthanc API trait definition
//!
//! The `OrthancApi` trait abstracts the subset of the Orthanc REST API the
//! lookup and modification logic relies on, so that logic can run against
//! the real server or an in-memory stand-in.

use super::models::{FindRequest, InstanceTags, ModifyRequest, ModifyResponse, SystemInfo};
use crate::domain::ids::OrthancId;
use crate::domain::resources::{Instance, Patient, ResourceLevel, Series, Study};
use crate::domain::Result;
use async_trait::async_trait;

/// Operations offered by an Orthanc server
///
/// # Example
///
/// ```no_run
/// use study_inspector::adapters::orthanc::{FindRequest, OrthancApi, OrthancClient};
/// use study_inspector::config::OrthancConfig;
///
/// # async fn example() -> study_inspector::domain::Result<()> {
/// let client = OrthancClient::new(OrthancConfig::default())?;
/// let patients = client.find_patients(&FindRequest::patients_by_id("A034518")).await?;
/// for patient in &patients {
///     let studies = client.patient_studies(&patient.id).await?;
///     println!("{} has {} studies", patient.id, studies.len());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait OrthancApi: Send + Sync {
    /// Server identification (`GET /system`)
    async fn system(&self) -> Result<SystemInfo>;

    /// Patients matching a query (`POST /tools/find`)
    async fn find_patients(&self, query: &FindRequest) -> Result<Vec<Patient>>;

    /// Studies of a patient (`GET /patients/{id}/studies`)
    async fn patient_studies(&self, patient: &OrthancId) -> Result<Vec<Study>>;

    /// Series of a study (`GET /studies/{id}/series`)
    async fn study_series(&self, study: &OrthancId) -> Result<Vec<Series>>;

    /// Instances of a series (`GET /series/{id}/instances`)
    async fn series_instances(&self, series: &OrthancId) -> Result<Vec<Instance>>;

    /// Full tag dump of an instance (`GET /instances/{id}/tags`)
    async fn instance_tags(&self, instance: &OrthancId) -> Result<InstanceTags>;

    /// Raw DICOM file of an instance (`GET /instances/{id}/file`)
    async fn instance_file(&self, instance: &OrthancId) -> Result<Vec<u8>>;

    /// Modifies a resource (`POST /{level}/{id}/modify`)
    async fn modify(
        &self,
        level: ResourceLevel,
        id: &OrthancId,
        request: &ModifyRequest,
    ) -> Result<ModifyResponse>;

    /// Base URL of the server
    fn base_url(&self) -> &str;
}
