//! Orthanc REST API request and response models

use crate::domain::ids::OrthancId;
use crate::domain::resources::ResourceLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /tools/find`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindRequest {
    #[serde(rename = "Level")]
    pub level: ResourceLevel,

    #[serde(rename = "Query")]
    pub query: BTreeMap<String, String>,

    #[serde(rename = "Expand")]
    pub expand: bool,
}

impl FindRequest {
    /// Expanded patient-level query on DICOM PatientID
    pub fn patients_by_id(patient_id: &str) -> Self {
        let mut query = BTreeMap::new();
        query.insert("PatientID".to_string(), patient_id.to_string());
        Self {
            level: ResourceLevel::Patient,
            query,
            expand: true,
        }
    }
}

/// Body of `POST /{level}/{id}/modify`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyRequest {
    #[serde(rename = "Replace")]
    pub replace: BTreeMap<String, String>,

    #[serde(rename = "Force")]
    pub force: bool,

    #[serde(rename = "KeepSource")]
    pub keep_source: bool,
}

/// Answer of a modification: the newly created resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyResponse {
    #[serde(rename = "ID")]
    pub id: OrthancId,

    #[serde(rename = "Path")]
    pub path: String,

    #[serde(rename = "PatientID", default)]
    pub patient_id: Option<String>,

    #[serde(rename = "Type", default)]
    pub resource_type: Option<String>,
}

/// Answer of `GET /system`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Version")]
    pub version: String,

    #[serde(rename = "ApiVersion", default)]
    pub api_version: Option<u32>,

    #[serde(rename = "DicomAet", default)]
    pub dicom_aet: Option<String>,

    #[serde(rename = "DicomPort", default)]
    pub dicom_port: Option<u16>,

    #[serde(rename = "HttpPort", default)]
    pub http_port: Option<u16>,
}

/// One entry of `GET /instances/{id}/tags`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Type", default)]
    pub value_type: String,

    #[serde(rename = "Value", default)]
    pub value: serde_json::Value,
}

/// Full tag dump of an instance, keyed by `gggg,eeee`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceTags(BTreeMap<String, TagEntry>);

impl InstanceTags {
    /// PatientAge (0010,1010)
    pub const PATIENT_AGE: &'static str = "0010,1010";

    /// Trimmed string value of a tag, `None` when absent, blank or not a string
    pub fn string_value(&self, tag: &str) -> Option<&str> {
        self.0
            .get(&tag.to_lowercase())
            .and_then(|entry| entry.value.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Inserts a string tag
    pub fn insert(&mut self, tag: &str, name: &str, value: &str) {
        self.0.insert(
            tag.to_lowercase(),
            TagEntry {
                name: name.to_string(),
                value_type: "String".to_string(),
                value: serde_json::Value::String(value.to_string()),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_request_serialization() {
        let request = FindRequest::patients_by_id("A034518");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Level": "Patient",
                "Query": {"PatientID": "A034518"},
                "Expand": true
            })
        );
    }

    #[test]
    fn test_modify_request_serialization() {
        let mut replace = BTreeMap::new();
        replace.insert("PatientSex".to_string(), "O".to_string());
        let request = ModifyRequest {
            replace,
            force: true,
            keep_source: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Replace"]["PatientSex"], "O");
        assert_eq!(json["Force"], true);
        assert_eq!(json["KeepSource"], false);
    }

    #[test]
    fn test_instance_tags_patient_age() {
        let tags: InstanceTags = serde_json::from_str(
            r#"{
                "0010,1010": {"Name": "PatientAge", "Type": "String", "Value": "061Y"},
                "7fe0,0010": {"Name": "PixelData", "Type": "Null", "Value": null}
            }"#,
        )
        .unwrap();
        assert_eq!(tags.string_value(InstanceTags::PATIENT_AGE), Some("061Y"));
        assert_eq!(tags.string_value("7FE0,0010"), None);
        assert_eq!(tags.string_value("0008,0060"), None);
    }

    #[test]
    fn test_system_info_deserialization() {
        let info: SystemInfo = serde_json::from_str(
            r#"{"Name": "ORTHANC", "Version": "1.12.3", "ApiVersion": 22,
                "DicomAet": "ORTHANC", "DicomPort": 4242, "HttpPort": 8042}"#,
        )
        .unwrap();
        assert_eq!(info.version, "1.12.3");
        assert_eq!(info.dicom_port, Some(4242));
        assert_eq!(info.http_port, Some(8042));
    }
}
