//! Orthanc resource models
//!
//! Orthanc stores DICOM data in a four level hierarchy: patient, study,
//! series and instance. The expanded JSON form of each level carries the
//! resource's Orthanc ID, its `MainDicomTags` and the IDs of its children.

use super::ids::OrthancId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Level of the Orthanc resource hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceLevel {
    Patient,
    Study,
    Series,
    Instance,
}

impl ResourceLevel {
    /// REST path segment for this level (`/patients`, `/studies`, ...)
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceLevel::Patient => "patients",
            ResourceLevel::Study => "studies",
            ResourceLevel::Series => "series",
            ResourceLevel::Instance => "instances",
        }
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceLevel::Patient => "Patient",
            ResourceLevel::Study => "Study",
            ResourceLevel::Series => "Series",
            ResourceLevel::Instance => "Instance",
        };
        write!(f, "{name}")
    }
}

/// `MainDicomTags` block keyed by DICOM keyword
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MainDicomTags(BTreeMap<String, serde_json::Value>);

impl MainDicomTags {
    /// Returns the trimmed string value of a tag, `None` when absent or blank
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.0
            .get(keyword)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Parses a tag holding an integer string (IS value representation)
    pub fn get_int(&self, keyword: &str) -> Option<i64> {
        match self.0.get(keyword)? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Inserts or replaces a tag value
    pub fn insert(&mut self, keyword: impl Into<String>, value: impl Into<String>) {
        self.0
            .insert(keyword.into(), serde_json::Value::String(value.into()));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MainDicomTags {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tags = MainDicomTags::default();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

/// Patient resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "ID")]
    pub id: OrthancId,

    #[serde(rename = "MainDicomTags", default)]
    pub main_dicom_tags: MainDicomTags,

    #[serde(rename = "Studies", default)]
    pub studies: Vec<OrthancId>,
}

impl Patient {
    /// DICOM PatientID
    pub fn patient_id(&self) -> Option<&str> {
        self.main_dicom_tags.get("PatientID")
    }

    /// DICOM PatientSex
    pub fn sex(&self) -> Option<&str> {
        self.main_dicom_tags.get("PatientSex")
    }

    /// PatientBirthDate parsed from the DICOM DA format (`YYYYMMDD`)
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.main_dicom_tags
            .get("PatientBirthDate")
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok())
    }
}

/// Study resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    #[serde(rename = "ID")]
    pub id: OrthancId,

    #[serde(rename = "MainDicomTags", default)]
    pub main_dicom_tags: MainDicomTags,

    #[serde(rename = "Series", default)]
    pub series: Vec<OrthancId>,

    #[serde(rename = "ParentPatient", default)]
    pub parent_patient: Option<OrthancId>,
}

impl Study {
    /// DICOM StudyInstanceUID
    pub fn study_instance_uid(&self) -> Option<&str> {
        self.main_dicom_tags.get("StudyInstanceUID")
    }

    /// DICOM StudyDescription
    pub fn description(&self) -> Option<&str> {
        self.main_dicom_tags.get("StudyDescription")
    }
}

/// Series resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "ID")]
    pub id: OrthancId,

    #[serde(rename = "MainDicomTags", default)]
    pub main_dicom_tags: MainDicomTags,

    #[serde(rename = "Instances", default)]
    pub instances: Vec<OrthancId>,

    #[serde(rename = "ParentStudy", default)]
    pub parent_study: Option<OrthancId>,
}

impl Series {
    /// DICOM SeriesNumber
    pub fn series_number(&self) -> Option<i64> {
        self.main_dicom_tags.get_int("SeriesNumber")
    }

    /// DICOM Modality
    pub fn modality(&self) -> Option<&str> {
        self.main_dicom_tags.get("Modality")
    }

    /// DICOM Manufacturer
    pub fn manufacturer(&self) -> Option<&str> {
        self.main_dicom_tags.get("Manufacturer")
    }
}

/// Instance resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "ID")]
    pub id: OrthancId,

    #[serde(rename = "MainDicomTags", default)]
    pub main_dicom_tags: MainDicomTags,

    #[serde(rename = "ParentSeries", default)]
    pub parent_series: Option<OrthancId>,
}

impl Instance {
    /// DICOM InstanceNumber
    pub fn instance_number(&self) -> Option<i64> {
        self.main_dicom_tags.get_int("InstanceNumber")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENT_JSON: &str = r#"{
        "ID": "da39a3ee-5e6b4b0d-3255bfef-95601890-afd80709",
        "IsStable": true,
        "MainDicomTags": {
            "PatientBirthDate": "19470214",
            "PatientID": "A034518",
            "PatientName": "Anonymous",
            "PatientSex": "F "
        },
        "Studies": ["2c58a4b9-8bd0d2ab-cb7f8b5e-6a3ff0d4-0bd1f6c0"],
        "Type": "Patient"
    }"#;

    #[test]
    fn test_patient_deserialization() {
        let patient: Patient = serde_json::from_str(PATIENT_JSON).unwrap();
        assert_eq!(patient.patient_id(), Some("A034518"));
        assert_eq!(patient.sex(), Some("F"));
        assert_eq!(patient.studies.len(), 1);
        assert_eq!(
            patient.birth_date(),
            Some(NaiveDate::from_ymd_opt(1947, 2, 14).unwrap())
        );
    }

    #[test]
    fn test_birth_date_missing_or_invalid() {
        let mut patient: Patient = serde_json::from_str(PATIENT_JSON).unwrap();
        patient.main_dicom_tags.insert("PatientBirthDate", "");
        assert_eq!(patient.birth_date(), None);
        patient.main_dicom_tags.insert("PatientBirthDate", "1947-02-14");
        assert_eq!(patient.birth_date(), None);
    }

    #[test]
    fn test_series_number_parsing() {
        let series: Series = serde_json::from_str(
            r#"{"ID": "s1", "MainDicomTags": {"SeriesNumber": " 4 ", "Modality": "CT"}, "Instances": []}"#,
        )
        .unwrap();
        assert_eq!(series.series_number(), Some(4));
        assert_eq!(series.modality(), Some("CT"));
        assert_eq!(series.manufacturer(), None);
    }

    #[test]
    fn test_negative_and_missing_instance_number() {
        let tags: MainDicomTags = [("InstanceNumber", "-1")].into_iter().collect();
        let instance = Instance {
            id: OrthancId::new("i1").unwrap(),
            main_dicom_tags: tags,
            parent_series: None,
        };
        assert_eq!(instance.instance_number(), Some(-1));

        let empty = Instance {
            main_dicom_tags: MainDicomTags::default(),
            ..instance
        };
        assert_eq!(empty.instance_number(), None);
    }

    #[test]
    fn test_resource_level_path_segment() {
        assert_eq!(ResourceLevel::Patient.path_segment(), "patients");
        assert_eq!(ResourceLevel::Study.path_segment(), "studies");
        assert_eq!(ResourceLevel::Series.path_segment(), "series");
        assert_eq!(ResourceLevel::Instance.path_segment(), "instances");
        assert_eq!(ResourceLevel::Study.to_string(), "Study");
    }
}
