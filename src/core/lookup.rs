//! Instance lookup and report assembly
//!
//! Walks the Orthanc hierarchy from a DICOM PatientID down to a single
//! instance and turns what it finds into an [`InstanceInfo`].

use super::pixels::{statistics_from_dicom, PixelStatistics};
use crate::adapters::orthanc::{FindRequest, InstanceTags, OrthancApi};
use crate::domain::resources::{Instance, Patient, Series, Study};
use crate::domain::{InspectorError, InstanceInfo, LookupError, Result};
use chrono::{Datelike, NaiveDate};

/// A resolved patient/study/series/instance chain
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedInstance {
    pub patient: Patient,
    pub study: Study,
    pub series: Series,
    pub instance: Instance,
    /// Number of series in `study`
    pub num_series: usize,
}

/// Locates an instance by PatientID, SeriesNumber and InstanceNumber
///
/// The first matching patient and that patient's first study are used.
/// Series and instance are selected by exact tag equality.
///
/// # Errors
///
/// Returns a [`LookupError`] when any level has no match, or the
/// underlying API error.
pub async fn locate(
    api: &dyn OrthancApi,
    patient_id: &str,
    series_number: i64,
    instance_number: i64,
) -> Result<LocatedInstance> {
    crate::log_lookup_start!(patient_id, series_number, instance_number);

    let patient = api
        .find_patients(&FindRequest::patients_by_id(patient_id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::PatientNotFound(patient_id.to_string()))?;

    let study = api
        .patient_studies(&patient.id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::NoStudies(patient_id.to_string()))?;

    let all_series = api.study_series(&study.id).await?;
    let num_series = all_series.len();

    let series = all_series
        .into_iter()
        .find(|s| s.series_number() == Some(series_number))
        .ok_or_else(|| LookupError::SeriesNotFound {
            study: study.id.to_string(),
            series_number,
        })?;

    let instance = api
        .series_instances(&series.id)
        .await?
        .into_iter()
        .find(|i| i.instance_number() == Some(instance_number))
        .ok_or_else(|| LookupError::InstanceNotFound {
            series: series.id.to_string(),
            instance_number,
        })?;

    tracing::info!(
        patient = %patient.id,
        study = %study.id,
        series = %series.id,
        instance = %instance.id,
        num_series,
        "Instance located"
    );

    Ok(LocatedInstance {
        patient,
        study,
        series,
        instance,
        num_series,
    })
}

/// Age in whole years at `today`
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(before_birthday)
}

/// Resolves the patient's age
///
/// Uses the birth date when present, otherwise the instance's PatientAge
/// tag as stored (e.g. `061Y`).
pub async fn resolve_age(
    api: &dyn OrthancApi,
    located: &LocatedInstance,
    today: NaiveDate,
) -> Result<Option<String>> {
    if let Some(birth) = located.patient.birth_date() {
        return Ok(Some(calculate_age(birth, today).to_string()));
    }

    tracing::debug!(
        instance = %located.instance.id,
        "No usable PatientBirthDate, falling back to PatientAge"
    );
    let tags: InstanceTags = api.instance_tags(&located.instance.id).await?;
    Ok(tags
        .string_value(InstanceTags::PATIENT_AGE)
        .map(str::to_string))
}

/// Combines located resources, age and pixel statistics into a report
pub fn assemble_report(
    located: &LocatedInstance,
    age: Option<String>,
    stats: &PixelStatistics,
) -> Result<InstanceInfo> {
    let patient_id = located
        .patient
        .patient_id()
        .ok_or_else(|| {
            InspectorError::Validation(format!("Patient {} has no PatientID", located.patient.id))
        })?
        .to_string();
    let study_instance_uid = located
        .study
        .study_instance_uid()
        .ok_or_else(|| {
            InspectorError::Validation(format!("Study {} has no StudyInstanceUID", located.study.id))
        })?
        .to_string();

    Ok(InstanceInfo {
        age,
        sex: located.patient.sex().map(str::to_string),
        study_description: located.study.description().map(str::to_string),
        modality: located.series.modality().map(str::to_string),
        manufacturer: located.series.manufacturer().map(str::to_string),
        patient_id,
        num_series: located.num_series,
        study_instance_uid,
        num_rows: stats.rows,
        num_cols: stats.columns,
        min_pixel_val: stats.min,
        max_pixel_val: stats.max,
        mean_pixel_val: stats.mean,
    })
}

/// Builds the full report for a located instance
///
/// Downloads the instance file to compute pixel statistics.
pub async fn build_report(
    api: &dyn OrthancApi,
    located: &LocatedInstance,
    today: NaiveDate,
) -> Result<InstanceInfo> {
    let age = resolve_age(api, located, today).await?;
    let bytes = api.instance_file(&located.instance.id).await?;
    let stats = statistics_from_dicom(&bytes)?;
    assemble_report(located, age, &stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(date(1947, 2, 14), date(2024, 2, 13), 76 ; "day before birthday")]
    #[test_case(date(1947, 2, 14), date(2024, 2, 14), 77 ; "on birthday")]
    #[test_case(date(1947, 2, 14), date(2024, 12, 31), 77 ; "after birthday")]
    #[test_case(date(2000, 2, 29), date(2023, 2, 28), 22 ; "leap day birthday")]
    #[test_case(date(2024, 5, 1), date(2024, 5, 1), 0 ; "born today")]
    fn test_calculate_age(birth: NaiveDate, today: NaiveDate, expected: i32) {
        assert_eq!(calculate_age(birth, today), expected);
    }
}
