//! Instance report model

use serde::{Deserialize, Serialize};

/// Summary of one located DICOM instance
///
/// Field names match the JSON report format consumed by the grader, so the
/// serialized form is stable and uses the DICOM-style capitalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceInfo {
    /// Age in whole years, or the raw PatientAge tag (e.g. `061Y`)
    #[serde(rename = "Age")]
    pub age: Option<String>,

    #[serde(rename = "Sex")]
    pub sex: Option<String>,

    #[serde(rename = "StudyDescription")]
    pub study_description: Option<String>,

    #[serde(rename = "Modality")]
    pub modality: Option<String>,

    #[serde(rename = "Manufacturer")]
    pub manufacturer: Option<String>,

    #[serde(rename = "PatientID")]
    pub patient_id: String,

    /// Number of series in the study
    #[serde(rename = "NumSeries")]
    pub num_series: usize,

    #[serde(rename = "StudyInstanceUID")]
    pub study_instance_uid: String,

    #[serde(rename = "NumRows")]
    pub num_rows: u32,

    #[serde(rename = "NumCols")]
    pub num_cols: u32,

    #[serde(rename = "MinPixelVal")]
    pub min_pixel_val: f64,

    #[serde(rename = "MaxPixelVal")]
    pub max_pixel_val: f64,

    #[serde(rename = "MeanPixelVal")]
    pub mean_pixel_val: f64,
}
