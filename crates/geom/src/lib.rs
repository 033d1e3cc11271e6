//! Geometry and attribute value types used across trellis.
//!
//! All quantities are in layout-resolved device units (`f32`). Every type
//! here parses from and formats to a plain text form, so the same types
//! double as attribute values in the widget attribute protocol.

/// Alignment policies.
mod align;
/// Error types for geometry operations.
mod error;
/// Displacement type.
mod offset;
/// Four-sided inset.
mod padding;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;

pub use align::{Align, AlignPair};
pub use error::{Error, Result};
pub use offset::Offset;
pub use padding::Padding;
pub use point::Point;
pub use rect::Rect;
pub use size::Size;

/// Comparison slack for device-unit sizes. Assignments that move an edge by
/// less than this are treated as no-ops so resize notifications can't loop.
pub const EPSILON: f32 = 1.0;

/// True if two device-unit values are within [`EPSILON`] of each other.
pub fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Parse a whitespace-separated list of device-unit values.
pub(crate) fn parse_units(s: &str) -> Result<Vec<f32>> {
    s.split_whitespace()
        .map(|part| {
            part.parse::<f32>()
                .map_err(|_| Error::Parse(format!("bad unit value {:?}", part)))
        })
        .collect()
}

/// Parse exactly two whitespace-separated device-unit values.
pub(crate) fn parse_pair(s: &str) -> Result<(f32, f32)> {
    match parse_units(s)?.as_slice() {
        [a, b] => Ok((*a, *b)),
        other => Err(Error::Parse(format!(
            "expected 2 values, got {}",
            other.len()
        ))),
    }
}
