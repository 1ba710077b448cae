//! Tag modification of located resources
//!
//! A [`ModificationPlan`] holds the replacement tags for the series, study
//! and patient of a [`LocatedInstance`]. Replacement values are templates:
//! `{student_id}` and `{derived_study_uid}` are substituted when the plan is
//! built.
//!
//! Orthanc never edits in place. Each `/modify` call creates a new resource
//! (and, with `KeepSource`, leaves the original untouched), so the plan is
//! applied bottom-up: series first, then study, then patient.

use super::lookup::LocatedInstance;
use crate::adapters::orthanc::{ModifyRequest, ModifyResponse, OrthancApi};
use crate::config::ModifyConfig;
use crate::domain::resources::ResourceLevel;
use crate::domain::{InspectorError, OrthancId, Result, StudentId};
use std::collections::BTreeMap;

const STUDENT_ID_PLACEHOLDER: &str = "{student_id}";
const DERIVED_UID_PLACEHOLDER: &str = "{derived_study_uid}";

/// Derives a study instance UID from an existing one and a student ID
///
/// Keeps as many leading characters of `original` as the student ID has
/// digits, then appends the student ID.
///
/// ```
/// use study_inspector::core::modify::derive_study_uid;
/// use study_inspector::domain::StudentId;
///
/// let student = StudentId::new(12345678).unwrap();
/// assert_eq!(derive_study_uid("1.3.6.1.4.1.14519", student), "1.3.6.1.12345678");
/// ```
pub fn derive_study_uid(original: &str, student: StudentId) -> String {
    let student = student.to_string();
    let prefix: String = original.chars().take(student.chars().count()).collect();
    format!("{prefix}{student}")
}

/// Replacement tags per level, with shared modification options
#[derive(Debug, Clone, PartialEq)]
pub struct ModificationPlan {
    pub patient_replace: BTreeMap<String, String>,
    pub study_replace: BTreeMap<String, String>,
    pub series_replace: BTreeMap<String, String>,
    pub force: bool,
    pub keep_source: bool,
}

impl ModificationPlan {
    /// Builds a plan from `[modify]` settings for a located instance
    ///
    /// # Errors
    ///
    /// Returns a validation error if the located study has no
    /// StudyInstanceUID to derive from.
    pub fn from_config(config: &ModifyConfig, located: &LocatedInstance) -> Result<Self> {
        let original_uid = located.study.study_instance_uid().ok_or_else(|| {
            InspectorError::Validation(format!(
                "Study {} has no StudyInstanceUID",
                located.study.id
            ))
        })?;
        let derived = derive_study_uid(original_uid, config.student_id);
        let student = config.student_id.to_string();

        let render = |replace: &BTreeMap<String, String>| -> BTreeMap<String, String> {
            replace
                .iter()
                .map(|(tag, value)| {
                    let value = value
                        .replace(STUDENT_ID_PLACEHOLDER, &student)
                        .replace(DERIVED_UID_PLACEHOLDER, &derived);
                    (tag.clone(), value)
                })
                .collect()
        };

        Ok(Self {
            patient_replace: render(&config.patient_replace),
            study_replace: render(&config.study_replace),
            series_replace: render(&config.series_replace),
            force: config.force,
            keep_source: config.keep_source,
        })
    }

    /// Non-empty steps in application order
    pub fn steps<'a>(
        &'a self,
        located: &'a LocatedInstance,
    ) -> Vec<(ResourceLevel, &'a OrthancId, &'a BTreeMap<String, String>)> {
        [
            (ResourceLevel::Series, &located.series.id, &self.series_replace),
            (ResourceLevel::Study, &located.study.id, &self.study_replace),
            (ResourceLevel::Patient, &located.patient.id, &self.patient_replace),
        ]
        .into_iter()
        .filter(|(_, _, replace)| !replace.is_empty())
        .collect()
    }

    fn request(&self, replace: &BTreeMap<String, String>) -> ModifyRequest {
        ModifyRequest {
            replace: replace.clone(),
            force: self.force,
            keep_source: self.keep_source,
        }
    }
}

/// Sends the plan to Orthanc and returns the created resources
///
/// Stops at the first failing level; earlier modifications are not rolled
/// back.
pub async fn apply(
    api: &dyn OrthancApi,
    located: &LocatedInstance,
    plan: &ModificationPlan,
) -> Result<Vec<(ResourceLevel, ModifyResponse)>> {
    let mut results = Vec::new();

    for (level, id, replace) in plan.steps(located) {
        let response = api.modify(level, id, &plan.request(replace)).await?;
        tracing::info!(
            level = %level,
            source = %id,
            created = %response.id,
            "Resource modified"
        );
        results.push((level, response));
    }

    Ok(results)
}
