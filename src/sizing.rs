//! Integer pixel dimensions of an SVG document.
//!
//! The trace wrapper and the XML surface need a width and a height in whole
//! pixels.  These are computed with the same rules that librsvg's legacy C API
//! uses for `rsvg_handle_get_dimensions()`: from the `width`, `height` and
//! `viewBox` of the toplevel `<svg>` element if possible, or else by measuring
//! the ink extents of the whole document.
//!
//! See <https://www.w3.org/TR/css-images-3/#sizing-terms> for terminology.

use float_cmp::approx_eq;
use rsvg::{CairoRenderer, IntrinsicDimensions, LengthUnit, RenderingError};
use thiserror::Error;

/// Why the dimensions of a document could not be determined.
#[derive(Debug, Error)]
pub enum SizeError {
    /// Measuring the document's extents failed.
    #[error(transparent)]
    Rendering(#[from] RenderingError),

    /// The size is negative, not a number, or does not fit in a cairo surface.
    #[error("the document size is out of range ({width} x {height} pixels)")]
    OutOfRange { width: f64, height: f64 },
}

/// Pixel dimensions of a document, rounded to whole pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    /// Whether there is anything to render at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// A viewport at the origin with these dimensions.
    pub fn viewport(&self) -> cairo::Rectangle {
        cairo::Rectangle::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Computes the document size in pixels, without rounding.
///
/// The rules, in order:
///
/// * `width` and `height` that can be resolved to pixels are used as-is.
///
/// * If both are `100%` (which is also the computed value of `auto`) and there is a
///   `viewBox`, the `viewBox` size is used.  This gives a size with the right aspect
///   ratio, which is the best we can do without a viewport to resolve percentages
///   against.
///
/// * Otherwise the ink extents of all the objects in the document are measured.
pub fn legacy_document_size(
    renderer: &CairoRenderer<'_>,
) -> Result<(f64, f64), RenderingError> {
    let size_from_intrinsic_dimensions = renderer.intrinsic_size_in_pixels().or_else(|| {
        size_in_pixels_from_percentage_width_and_height(&renderer.intrinsic_dimensions())
    });

    if let Some(dim) = size_from_intrinsic_dimensions {
        Ok(dim)
    } else {
        let (ink_r, _) = renderer.geometry_for_layer(None, &unit_rectangle())?;
        Ok((ink_r.width(), ink_r.height()))
    }
}

/// Computes the document's dimensions rounded to whole pixels.
pub fn document_dimensions(renderer: &CairoRenderer<'_>) -> Result<Dimensions, SizeError> {
    let (width, height) = legacy_document_size(renderer)?;
    round_to_pixels(width, height)
}

/// Rounds a floating-point size to the nearest whole pixels.
pub fn round_to_pixels(width: f64, height: f64) -> Result<Dimensions, SizeError> {
    match (checked_i32(width.round()), checked_i32(height.round())) {
        (Some(w), Some(h)) => Ok(Dimensions {
            width: w,
            height: h,
        }),
        _ => Err(SizeError::OutOfRange { width, height }),
    }
}

fn checked_i32(x: f64) -> Option<i32> {
    cast::i32(x).ok().filter(|v| *v >= 0)
}

fn unit_rectangle() -> cairo::Rectangle {
    cairo::Rectangle::new(0.0, 0.0, 1.0, 1.0)
}

/// If the width and height are in percentage units, computes a size equal to the
/// `viewBox`'s size if it exists, or else returns None.
///
/// For example, a `viewBox="0 0 100 200"` will yield `Some(100.0, 200.0)`.
///
/// Only `100%` is accepted for both; other percentages cannot be resolved without a
/// viewport, so they fall through to measuring the document.
fn size_in_pixels_from_percentage_width_and_height(
    dim: &IntrinsicDimensions,
) -> Option<(f64, f64)> {
    let IntrinsicDimensions {
        width,
        height,
        vbox,
    } = *dim;

    let vbox = vbox?;

    if width.unit == LengthUnit::Percent
        && height.unit == LengthUnit::Percent
        && approx_eq!(f64, width.length, 1.0)
        && approx_eq!(f64, height.length, 1.0)
    {
        Some((vbox.width(), vbox.height()))
    } else {
        None
    }
}
