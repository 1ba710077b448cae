//! External system adapters
//!
//! - [`orthanc`] - Orthanc PACS REST API

pub mod orthanc;
