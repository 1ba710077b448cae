//! Domain identifier types with validation
//!
//! Newtype wrappers keep Orthanc resource identifiers and student
//! identifiers from being mixed with arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Orthanc resource identifier
///
/// Orthanc addresses every patient, study, series and instance by a
/// server-generated hash such as `6816cb19-844d5aee-85245eba-28e841e6-2414fae2`.
///
/// # Examples
///
/// ```
/// use study_inspector::domain::ids::OrthancId;
/// use std::str::FromStr;
///
/// let id = OrthancId::from_str("6816cb19-844d5aee-85245eba-28e841e6-2414fae2").unwrap();
/// assert_eq!(id.as_str(), "6816cb19-844d5aee-85245eba-28e841e6-2414fae2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrthancId(String);

impl OrthancId {
    /// Creates a new OrthancId, rejecting blank values and path separators
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Orthanc ID cannot be empty".to_string());
        }
        if id.contains('/') {
            return Err(format!("Orthanc ID cannot contain '/': {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrthancId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrthancId> for String {
    fn from(id: OrthancId) -> Self {
        id.0
    }
}

impl fmt::Display for OrthancId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrthancId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for OrthancId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Eight digit student identifier
///
/// Valid values lie in `10000000..=99999999`.
///
/// # Examples
///
/// ```
/// use study_inspector::domain::ids::StudentId;
///
/// let id = StudentId::new(12345678).unwrap();
/// assert_eq!(id.to_string(), "12345678");
/// assert!(StudentId::new(1234).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StudentId(u32);

impl StudentId {
    /// Smallest accepted identifier
    pub const MIN: u32 = 10_000_000;
    /// Largest accepted identifier
    pub const MAX: u32 = 99_999_999;

    /// Creates a new StudentId
    pub fn new(id: u32) -> Result<Self, String> {
        if !(Self::MIN..=Self::MAX).contains(&id) {
            return Err(format!(
                "Student ID must be an 8-digit number between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                id
            ));
        }
        Ok(Self(id))
    }

    /// Returns the numeric value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for StudentId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentId> for u32 {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("Student ID must be numeric, got '{s}'"))?;
        Self::new(value)
    }
}
