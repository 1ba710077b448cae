//! Report persistence

use crate::domain::{InspectorError, InstanceInfo, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

/// Serializes a report as JSON indented with `indent` spaces
pub fn render_report(info: &InstanceInfo, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    info.serialize(&mut serializer)?;

    String::from_utf8(buffer)
        .map_err(|e| InspectorError::Serialization(format!("Report is not valid UTF-8: {e}")))
}

/// Writes a report to `path`, creating parent directories as needed
pub fn save_report(info: &InstanceInfo, path: impl AsRef<Path>, indent: usize) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = render_report(info, indent)?;
    std::fs::write(path, json)?;

    tracing::info!(path = %path.display(), "Report saved");
    Ok(())
}
