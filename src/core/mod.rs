//! Core inspection logic
//!
//! # Workflow
//!
//! 1. [`lookup::locate`] resolves a PatientID, SeriesNumber and
//!    InstanceNumber to Orthanc resources
//! 2. [`lookup::build_report`] downloads the instance and assembles an
//!    [`InstanceInfo`](crate::domain::InstanceInfo) using [`pixels`]
//! 3. [`report::save_report`] writes the report as JSON
//! 4. [`modify::apply`] sends tag replacements back to Orthanc
//! 5. [`grading::grade_answers`] scores a saved report against an answer key

pub mod grading;
pub mod lookup;
pub mod modify;
pub mod pixels;
pub mod report;
