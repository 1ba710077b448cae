//! Orthanc adapter implementation
//!
//! Integration with the Orthanc PACS server's REST API: the API trait, the
//! HTTP client and the request/response models.

pub mod api;
pub mod client;
pub mod models;

pub use api::OrthancApi;
pub use client::OrthancClient;
pub use models::{FindRequest, InstanceTags, ModifyRequest, ModifyResponse, SystemInfo, TagEntry};
