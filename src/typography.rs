//! Font sizing shared by the editor overlay, the preview, and document export.
//!
//! Font size is a fixed fraction of a field's height, clamped to a legible
//! range. The input height must always be measured in the image's natural
//! frame ([`natural_pixels`](crate::natural_pixels)), never in the displayed
//! frame. That fixed reference frame is what makes the result independent of
//! zoom, window size and page size; the formula itself is never rescaled.
//!
//! ```
//! use fieldfit::{FieldLimits, ImageExtent, NormalizedRect, TextMetrics};
//!
//! let field = NormalizedRect::new(10.0, 10.0, 20.0, 10.0);
//! let m = TextMetrics::for_field(&field, ImageExtent::new(1000, 250), &FieldLimits::STANDARD).unwrap();
//! assert_eq!(m.font_size, 15.0); // 25px tall × 0.6
//! ```

use crate::containment::ImageExtent;
use crate::error::GeometryError;
use crate::rect::{FieldLimits, NormalizedRect};
use crate::transform::{natural_pixels, to_pixels};

/// Font size as a fraction of field height.
pub const FONT_SIZE_RATIO: f64 = 0.6;
/// Smallest font size any renderer draws.
pub const MIN_FONT_SIZE: f64 = 10.0;
/// Largest font size any renderer draws.
pub const MAX_FONT_SIZE: f64 = 20.0;
/// Line height as a multiple of font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Font size for a field `pixel_height` tall (natural frame).
///
/// Non-finite heights fall back to [`MIN_FONT_SIZE`].
pub fn font_size_for_height(pixel_height: f64) -> f64 {
    if !pixel_height.is_finite() {
        return MIN_FONT_SIZE;
    }
    (pixel_height * FONT_SIZE_RATIO).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Line advance for a given font size.
pub fn line_height_for_font_size(font_size: f64) -> f64 {
    font_size * LINE_HEIGHT_RATIO
}

/// Font size and line height for one field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextMetrics {
    /// Font size in the units of the frame it was measured in.
    pub font_size: f64,
    /// Baseline-to-baseline advance, same units.
    pub line_height: f64,
}

impl TextMetrics {
    /// Metrics for a field of the given natural-frame height.
    pub fn from_height(pixel_height: f64) -> Self {
        let font_size = font_size_for_height(pixel_height);
        Self {
            font_size,
            line_height: line_height_for_font_size(font_size),
        }
    }

    /// Metrics for a stored field, measured against the image's natural
    /// resolution.
    ///
    /// The rect is clamped on read first, exactly as the overlay and export
    /// paths do, so an undersized stored rect gets the same font everywhere.
    pub fn for_field(
        rect: &NormalizedRect,
        image: ImageExtent,
        limits: &FieldLimits,
    ) -> Result<Self, GeometryError> {
        let natural = natural_pixels(&rect.clamp_to_bounds(limits), image)?;
        Ok(Self::from_height(natural.height))
    }

    /// Metrics for a stored field in an arbitrary `frame_w × frame_h` frame.
    ///
    /// Document export measures on the page; when the page is the image's
    /// natural frame this equals [`for_field`](Self::for_field).
    pub fn in_frame(
        rect: &NormalizedRect,
        frame_w: f64,
        frame_h: f64,
        limits: &FieldLimits,
    ) -> Result<Self, GeometryError> {
        let px = to_pixels(&rect.clamp_to_bounds(limits), frame_w, frame_h)?;
        Ok(Self::from_height(px.height))
    }

    /// The same metrics expressed in another frame's units.
    ///
    /// Renderers that draw over a scaled image (display frame) multiply by
    /// the displayed-per-natural pixel ratio so text keeps its proportion to
    /// the field. The clamped natural value is what gets scaled; the clamp is
    /// never reapplied in the target frame.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            font_size: self.font_size * factor,
            line_height: self.line_height * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── formula ─────────────────────────────────────────────────────────

    #[test]
    fn clamps_small_heights_up() {
        assert_eq!(font_size_for_height(5.0), 10.0);
        assert_eq!(font_size_for_height(0.0), 10.0);
    }

    #[test]
    fn clamps_large_heights_down() {
        assert_eq!(font_size_for_height(50.0), 20.0);
        assert_eq!(font_size_for_height(10_000.0), 20.0);
    }

    #[test]
    fn proportional_in_range() {
        assert_eq!(font_size_for_height(20.0), 12.0);
        assert_eq!(font_size_for_height(25.0), 15.0);
    }

    #[test]
    fn non_finite_height_is_minimum() {
        assert_eq!(font_size_for_height(f64::NAN), MIN_FONT_SIZE);
        assert_eq!(font_size_for_height(f64::INFINITY), MIN_FONT_SIZE);
    }

    #[test]
    fn line_height_is_fixed_multiple() {
        assert_eq!(line_height_for_font_size(10.0), 12.0);
        assert_eq!(line_height_for_font_size(20.0), 24.0);
    }

    // ── natural frame ───────────────────────────────────────────────────

    #[test]
    fn field_metrics_ignore_display_size() {
        let field = NormalizedRect::new(10.0, 10.0, 20.0, 10.0);
        let image = ImageExtent::new(1000, 1000);
        // 10% of 1000 = 100px → clamped to 20.
        let m = TextMetrics::for_field(&field, image, &FieldLimits::STANDARD).unwrap();
        assert_eq!(m.font_size, 20.0);
        assert_eq!(m.line_height, 24.0);
    }

    #[test]
    fn unknown_image_is_an_error() {
        let field = NormalizedRect::new(10.0, 10.0, 20.0, 10.0);
        assert!(TextMetrics::for_field(&field, ImageExtent::new(1000, 0), &FieldLimits::STANDARD).is_err());
    }

    #[test]
    fn undersized_field_is_measured_at_minimum_height() {
        // 2.5% stored, read back as 3% → 30px → 18.
        let field = NormalizedRect::new(10.0, 10.0, 20.0, 2.5);
        let image = ImageExtent::new(1000, 1000);
        let m = TextMetrics::for_field(&field, image, &FieldLimits::STANDARD).unwrap();
        assert_eq!(m.font_size, 18.0);
        let relaxed = FieldLimits::new().min_height(1.0);
        assert_eq!(TextMetrics::for_field(&field, image, &relaxed).unwrap().font_size, 15.0);
    }

    #[test]
    fn in_natural_frame_matches_for_field() {
        let field = NormalizedRect::new(5.0, 50.0, 40.0, 2.0);
        let image = ImageExtent::new(1240, 1754);
        assert_eq!(
            TextMetrics::in_frame(&field, 1240.0, 1754.0, &FieldLimits::STANDARD),
            TextMetrics::for_field(&field, image, &FieldLimits::STANDARD)
        );
    }

    #[test]
    fn scaled_keeps_ratio() {
        let m = TextMetrics::from_height(25.0).scaled(2.0);
        assert_eq!(m.font_size, 30.0);
        assert_eq!(m.line_height, 36.0);
    }
}
