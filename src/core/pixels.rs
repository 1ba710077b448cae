//! Pixel statistics over decoded DICOM pixel data
//!
//! Statistics are computed over stored values: no modality LUT or
//! rescale slope/intercept is applied, which matches what a raw pixel
//! array read of the file yields.

use crate::domain::{InspectorError, Result};
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::file::ReadPreamble;
use dicom_object::{DefaultDicomObject, OpenFileOptions};
use dicom_pixeldata::PixelDecoder;

/// Geometry and encoding of a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub rows: u32,
    pub columns: u32,
    pub frames: u32,
    pub samples_per_pixel: u16,
    pub bits_allocated: u16,
    pub bits_stored: u16,
    /// PixelRepresentation = 1
    pub signed: bool,
}

impl PixelLayout {
    /// Number of samples the buffer must hold
    pub fn sample_count(&self) -> usize {
        self.rows as usize
            * self.columns as usize
            * self.frames as usize
            * self.samples_per_pixel as usize
    }

    fn bytes_per_sample(&self) -> Result<usize> {
        match self.bits_allocated {
            8 => Ok(1),
            16 => Ok(2),
            32 => Ok(4),
            other => Err(InspectorError::Dicom(format!(
                "Unsupported BitsAllocated: {other}"
            ))),
        }
    }
}

/// Image size and stored value statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStatistics {
    pub rows: u32,
    pub columns: u32,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Computes statistics over a little-endian native pixel buffer
///
/// Bytes past the expected sample count (e.g. the padding byte of odd
/// length pixel data) are ignored.
pub fn statistics_from_bytes(data: &[u8], layout: &PixelLayout) -> Result<PixelStatistics> {
    let width = layout.bytes_per_sample()?;
    let count = layout.sample_count();
    if count == 0 {
        return Err(InspectorError::Dicom("Image has no pixels".to_string()));
    }

    let needed = count * width;
    if data.len() < needed {
        return Err(InspectorError::Dicom(format!(
            "Pixel data truncated: expected {needed} bytes, found {}",
            data.len()
        )));
    }

    let bits_stored = layout.bits_stored.clamp(1, layout.bits_allocated) as u32;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0_f64;

    for chunk in data[..needed].chunks_exact(width) {
        let raw: u32 = match width {
            1 => chunk[0] as u32,
            2 => u16::from_le_bytes([chunk[0], chunk[1]]) as u32,
            _ => u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
        };
        let value = if layout.signed {
            sign_extend(raw, bits_stored) as f64
        } else {
            raw as f64
        };

        min = min.min(value);
        max = max.max(value);
        sum += value;
    }

    Ok(PixelStatistics {
        rows: layout.rows,
        columns: layout.columns,
        min,
        max,
        mean: sum / count as f64,
    })
}

/// Interprets the low `bits` bits of `raw` as a two's complement value
fn sign_extend(raw: u32, bits: u32) -> i64 {
    if bits >= 32 {
        return raw as i32 as i64;
    }
    let shift = 32 - bits;
    (((raw << shift) as i32) >> shift) as i64
}

/// Parses a DICOM file and computes statistics over its pixel data
///
/// The preamble is auto-detected, so both Part 10 files and bare datasets
/// with file meta information are accepted. Compressed transfer syntaxes are
/// decoded first.
pub fn statistics_from_dicom(bytes: &[u8]) -> Result<PixelStatistics> {
    let obj = OpenFileOptions::new()
        .read_preamble(ReadPreamble::Auto)
        .from_reader(bytes)
        .map_err(|e| InspectorError::Dicom(format!("Failed to parse DICOM: {e}")))?;

    let layout = read_layout(&obj)?;

    let decoded = obj
        .decode_pixel_data()
        .map_err(|e| InspectorError::Dicom(format!("Failed to decode pixel data: {e}")))?;

    tracing::debug!(
        rows = layout.rows,
        columns = layout.columns,
        frames = layout.frames,
        bits_allocated = layout.bits_allocated,
        signed = layout.signed,
        "Decoded pixel data"
    );

    statistics_from_bytes(decoded.data(), &layout)
}

fn read_layout(obj: &DefaultDicomObject) -> Result<PixelLayout> {
    let required = |tag: Tag, name: &str| -> Result<u32> {
        obj.element(tag)
            .map_err(|e| InspectorError::Dicom(format!("Missing {name}: {e}")))?
            .to_int::<u32>()
            .map_err(|e| InspectorError::Dicom(format!("Invalid {name}: {e}")))
    };
    let optional = |tag: Tag, default: u32| -> u32 {
        obj.element(tag)
            .ok()
            .and_then(|e| e.to_int::<u32>().ok())
            .unwrap_or(default)
    };

    let rows = required(tags::ROWS, "Rows")?;
    let columns = required(tags::COLUMNS, "Columns")?;
    let bits_allocated = required(tags::BITS_ALLOCATED, "BitsAllocated")? as u16;
    let bits_stored = optional(tags::BITS_STORED, bits_allocated as u32) as u16;

    Ok(PixelLayout {
        rows,
        columns,
        frames: optional(tags::NUMBER_OF_FRAMES, 1).max(1),
        samples_per_pixel: optional(tags::SAMPLES_PER_PIXEL, 1) as u16,
        bits_allocated,
        bits_stored,
        signed: optional(tags::PIXEL_REPRESENTATION, 0) == 1,
    })
}
