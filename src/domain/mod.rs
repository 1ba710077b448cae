//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`OrthancId`], [`StudentId`])
//! - **Orthanc resources** ([`Patient`], [`Study`], [`Series`], [`Instance`])
//! - **The instance report** ([`InstanceInfo`])
//! - **Error types** ([`InspectorError`], [`OrthancError`], [`LookupError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, InspectorError>`]:
//!
//! ```rust
//! use study_inspector::domain::{InspectorError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = study_inspector::config::load_config("study-inspector.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod report;
pub mod resources;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{InspectorError, LookupError, OrthancError};
pub use ids::{OrthancId, StudentId};
pub use report::InstanceInfo;
pub use resources::{Instance, MainDicomTags, Patient, ResourceLevel, Series, Study};
pub use result::Result;
