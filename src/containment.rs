//! Containment layout: fit an image inside a container, preserve aspect
//! ratio, center on the slack axis.
//!
//! This reproduces the "contain" image-fit mode exactly, so overlays drawn
//! from a [`DisplayLayout`] line up with a natively fitted image.
//!
//! # Example
//!
//! ```
//! use fieldfit::{ContainerExtent, DisplayLayout, ImageExtent, compute_display_layout};
//!
//! let layout = compute_display_layout(
//!     ContainerExtent::new(1000.0, 1000.0),
//!     ImageExtent::new(800, 400),
//! )
//! .unwrap();
//!
//! // Width constrains; the image is letterboxed vertically.
//! assert_eq!(layout, DisplayLayout::new(1000.0, 500.0, 0.0, 250.0));
//! ```

use crate::error::GeometryError;
use crate::rect::{NormalizedRect, PercentPoint, PixelRect};
use crate::transform;

/// True pixel resolution of a template's background image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageExtent {
    /// Natural width in pixels.
    pub natural_width: u32,
    /// Natural height in pixels.
    pub natural_height: u32,
}

impl ImageExtent {
    /// Create a new extent.
    pub const fn new(natural_width: u32, natural_height: u32) -> Self {
        Self {
            natural_width,
            natural_height,
        }
    }

    /// Build from optional stored dimensions. `None` unless both are present.
    pub fn from_optional(width: Option<u32>, height: Option<u32>) -> Option<Self> {
        Some(Self::new(width?, height?))
    }

    /// Whether both dimensions are non-zero.
    pub fn is_known(&self) -> bool {
        self.natural_width > 0 && self.natural_height > 0
    }

    /// Width over height. Only meaningful when [`is_known`](Self::is_known).
    pub fn aspect_ratio(&self) -> f64 {
        self.natural_width as f64 / self.natural_height as f64
    }

    /// The natural frame as `(width, height)` in pixels.
    pub fn frame(&self) -> (f64, f64) {
        (self.natural_width as f64, self.natural_height as f64)
    }
}

/// Pixel size of whatever viewport hosts the image right now.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerExtent {
    pub width: f64,
    pub height: f64,
}

impl ContainerExtent {
    /// Create a new extent.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_known(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Placement of the fitted image inside its container.
///
/// `offset_x` / `offset_y` are the letterbox margins on the left and top;
/// at most one of them is non-zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplayLayout {
    /// Width of the displayed image in container pixels.
    pub display_width: f64,
    /// Height of the displayed image in container pixels.
    pub display_height: f64,
    /// Left margin between container and image.
    pub offset_x: f64,
    /// Top margin between container and image.
    pub offset_y: f64,
}

impl DisplayLayout {
    /// Create a layout from raw values.
    pub const fn new(display_width: f64, display_height: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            display_width,
            display_height,
            offset_x,
            offset_y,
        }
    }

    /// The display frame as `(width, height)`.
    pub fn frame(&self) -> (f64, f64) {
        (self.display_width, self.display_height)
    }

    /// Rectangle the image occupies, in container pixels.
    pub fn image_rect(&self) -> PixelRect {
        PixelRect::new(
            self.offset_x,
            self.offset_y,
            self.display_width,
            self.display_height,
        )
    }

    /// Whether the image covers the whole container (aspect ratios match).
    pub fn fills_container(&self) -> bool {
        self.offset_x == 0.0 && self.offset_y == 0.0
    }

    /// Displayed pixels per natural image pixel.
    ///
    /// Text metrics derived in the natural frame are multiplied by this to be
    /// drawn over the displayed image at the same proportion as on the page.
    pub fn natural_scale(&self, image: ImageExtent) -> f64 {
        if !image.is_known() {
            return 1.0;
        }
        self.display_width / image.natural_width as f64
    }

    /// A field's rectangle in container pixels (display frame plus letterbox offset).
    pub fn field_rect(&self, rect: &NormalizedRect) -> PixelRect {
        let (w, h) = self.frame();
        let display = match transform::to_pixels(rect, w, h) {
            Ok(r) => r,
            Err(e) => {
                debug_assert!(false, "display layout with unusable frame: {e}");
                log::warn!("{e}; drawing field unscaled");
                PixelRect::new(rect.x, rect.y, rect.width, rect.height)
            }
        };
        display.translate(self.offset_x, self.offset_y)
    }

    /// Convert a container-pixel movement into a percentage movement.
    ///
    /// The inverse of [`field_rect`](Self::field_rect)'s scaling, without the
    /// letterbox offset.
    pub fn delta_to_percent(&self, dx: f64, dy: f64) -> PercentPoint {
        let (w, h) = self.frame();
        match transform::to_normalized(&PixelRect::new(dx, dy, 0.0, 0.0), w, h) {
            Ok(r) => r.origin(),
            Err(e) => {
                debug_assert!(false, "display layout with unusable frame: {e}");
                log::warn!("{e}; treating pointer movement as percent");
                PercentPoint::new(dx, dy)
            }
        }
    }

    /// Convert a container-pixel position into image percentages.
    ///
    /// The result is not clamped; positions in the letterbox margins or
    /// outside the container map below 0 or above 100.
    pub fn point_to_percent(&self, px: f64, py: f64) -> PercentPoint {
        self.delta_to_percent(px - self.offset_x, py - self.offset_y)
    }
}

/// Fit `image` inside `container`, preserving aspect ratio, centered.
///
/// Returns [`GeometryError::IndeterminateLayout`] when either extent has a
/// zero or non-finite dimension; callers defer rendering until both are
/// known.
pub fn compute_display_layout(
    container: ContainerExtent,
    image: ImageExtent,
) -> Result<DisplayLayout, GeometryError> {
    if !container.is_known() || !image.is_known() {
        log::debug!(
            "deferring layout: container {}x{}, image {}x{}",
            container.width,
            container.height,
            image.natural_width,
            image.natural_height
        );
        return Err(GeometryError::IndeterminateLayout {
            container_width: container.width,
            container_height: container.height,
            image_width: image.natural_width,
            image_height: image.natural_height,
        });
    }

    let (cw, ch) = (container.width, container.height);
    let (iw, ih) = image.frame();

    // Cross-multiplied aspect comparison: cw/ch > iw/ih.
    let layout = if cw * ih > ch * iw {
        // Container is relatively wider: height constrains.
        let display_width = ch * iw / ih;
        DisplayLayout {
            display_width,
            display_height: ch,
            offset_x: (cw - display_width) / 2.0,
            offset_y: 0.0,
        }
    } else {
        // Width constrains (also the equal-aspect case).
        let display_height = cw * ih / iw;
        DisplayLayout {
            display_width: cw,
            display_height,
            offset_x: 0.0,
            offset_y: (ch - display_height) / 2.0,
        }
    };
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(cw: f64, ch: f64, iw: u32, ih: u32) -> DisplayLayout {
        compute_display_layout(ContainerExtent::new(cw, ch), ImageExtent::new(iw, ih)).unwrap()
    }

    // ── fitting ─────────────────────────────────────────────────────────

    #[test]
    fn same_aspect_fills_container() {
        let l = layout(1000.0, 500.0, 800, 400);
        assert_eq!(l, DisplayLayout::new(1000.0, 500.0, 0.0, 0.0));
        assert!(l.fills_container());
    }

    #[test]
    fn square_container_letterboxes_landscape_image() {
        let l = layout(1000.0, 1000.0, 800, 400);
        assert_eq!(l, DisplayLayout::new(1000.0, 500.0, 0.0, 250.0));
    }

    #[test]
    fn wide_container_pillarboxes_portrait_image() {
        // 600×800 (3:4) into 1000×400 → height constrains → 300×400
        let l = layout(1000.0, 400.0, 600, 800);
        assert_eq!(l, DisplayLayout::new(300.0, 400.0, 350.0, 0.0));
    }

    #[test]
    fn upscales_small_image() {
        let l = layout(1000.0, 500.0, 100, 100);
        assert_eq!(l, DisplayLayout::new(500.0, 500.0, 250.0, 0.0));
    }

    #[test]
    fn fractional_container() {
        let l = layout(333.5, 1000.0, 1000, 1000);
        assert_eq!(l.display_width, 333.5);
        assert_eq!(l.display_height, 333.5);
        assert_eq!(l.offset_y, (1000.0 - 333.5) / 2.0);
    }

    // ── indeterminate ───────────────────────────────────────────────────

    #[test]
    fn zero_container_is_indeterminate() {
        let e = compute_display_layout(ContainerExtent::new(0.0, 500.0), ImageExtent::new(800, 400))
            .unwrap_err();
        assert!(e.is_deferrable());
    }

    #[test]
    fn zero_image_is_indeterminate() {
        let e = compute_display_layout(ContainerExtent::new(1000.0, 500.0), ImageExtent::new(800, 0))
            .unwrap_err();
        assert_eq!(
            e,
            GeometryError::IndeterminateLayout {
                container_width: 1000.0,
                container_height: 500.0,
                image_width: 800,
                image_height: 0,
            }
        );
    }

    #[test]
    fn nan_container_is_indeterminate() {
        assert!(
            compute_display_layout(ContainerExtent::new(f64::NAN, 500.0), ImageExtent::new(8, 4))
                .is_err()
        );
    }

    #[test]
    fn missing_dimension_yields_no_extent() {
        assert_eq!(ImageExtent::from_optional(Some(800), None), None);
        assert_eq!(
            ImageExtent::from_optional(Some(800), Some(600)),
            Some(ImageExtent::new(800, 600))
        );
    }

    // ── field mapping ───────────────────────────────────────────────────

    #[test]
    fn field_rect_includes_letterbox_offset() {
        let l = layout(1000.0, 1000.0, 800, 400);
        let r = l.field_rect(&NormalizedRect::new(10.0, 10.0, 20.0, 10.0));
        assert_eq!(r, PixelRect::new(100.0, 300.0, 200.0, 50.0));
    }

    #[test]
    fn point_to_percent_removes_offset() {
        let l = layout(1000.0, 1000.0, 800, 400);
        let p = l.point_to_percent(500.0, 500.0);
        assert_eq!(p, PercentPoint::new(50.0, 50.0));
        // Inside the top letterbox band → negative percent.
        assert!(l.point_to_percent(0.0, 100.0).y < 0.0);
    }

    #[test]
    fn delta_to_percent_uses_display_frame() {
        let l = layout(1000.0, 1000.0, 800, 400);
        assert_eq!(l.delta_to_percent(100.0, 50.0), PercentPoint::new(10.0, 10.0));
    }

    #[test]
    fn pointer_mapping_inverts_field_rect() {
        for l in [layout(1000.0, 1000.0, 800, 400), layout(777.0, 431.0, 1240, 1754)] {
            for field in [
                NormalizedRect::new(10.0, 10.0, 20.0, 10.0),
                NormalizedRect::new(63.3, 2.5, 30.0, 40.0),
            ] {
                let r = l.field_rect(&field);
                let p = l.point_to_percent(r.x, r.y);
                assert!((p.x - field.x).abs() < 1e-9 && (p.y - field.y).abs() < 1e-9);
                let d = l.delta_to_percent(r.width, r.height);
                assert!((d.x - field.width).abs() < 1e-9 && (d.y - field.height).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn natural_scale_is_display_over_natural() {
        let l = layout(1000.0, 1000.0, 2000, 1000);
        assert_eq!(l.natural_scale(ImageExtent::new(2000, 1000)), 0.5);
    }
}
