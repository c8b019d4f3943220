//! Interactive zoom/pan on top of the display frame.
//!
//! Field geometry and field text scale with zoom. Fixed-size chrome (labels,
//! resize handles, empty-field icons) is divided by the zoom scale so it keeps
//! the same apparent size. The transform is always passed in explicitly; the
//! core never owns or mutates it.

use crate::rect::PixelRect;

/// Live zoom scale and pan translation, supplied by the gesture layer.
///
/// Maps container coordinates to screen coordinates as
/// `screen = container × scale + translate`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportTransform {
    /// Zoom factor; `1.0` is unzoomed.
    pub scale: f64,
    /// Horizontal pan in screen pixels.
    pub translate_x: f64,
    /// Vertical pan in screen pixels.
    pub translate_y: f64,
}

impl ViewportTransform {
    /// No zoom, no pan.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Create a transform. Degenerate scales are tolerated, see
    /// [`effective_scale`](Self::effective_scale).
    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// The scale, or `1.0` if it is zero, negative or non-finite.
    ///
    /// A gesture library can briefly report a degenerate scale mid-pinch;
    /// treating it as unzoomed avoids dividing by zero.
    pub fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Container point → screen point.
    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        let s = self.effective_scale();
        (x * s + self.translate_x, y * s + self.translate_y)
    }

    /// Screen point → container point.
    pub fn invert_point(&self, x: f64, y: f64) -> (f64, f64) {
        let s = self.effective_scale();
        ((x - self.translate_x) / s, (y - self.translate_y) / s)
    }

    /// Container rect → screen rect. Size scales with zoom.
    pub fn apply_rect(&self, rect: PixelRect) -> PixelRect {
        let s = self.effective_scale();
        let (x, y) = self.apply_point(rect.x, rect.y);
        PixelRect::new(x, y, rect.width * s, rect.height * s)
    }

    /// Screen-space pointer movement → container-space movement.
    pub fn unscale_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        let s = self.effective_scale();
        (dx / s, dy / s)
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Size to draw chrome at so it appears `base_size` on screen.
///
/// Never use this for the field rectangle or field text.
pub fn compensate(base_size: f64, viewport: &ViewportTransform) -> f64 {
    base_size / viewport.effective_scale()
}

/// Base (unzoomed) sizes of per-field overlay chrome, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayChrome {
    /// Font size of the field label.
    pub label_font_size: f64,
    /// Edge length of a corner resize handle.
    pub handle_size: f64,
    /// Edge length of the placeholder icon shown in empty fields.
    pub icon_size: f64,
}

impl OverlayChrome {
    /// 12px labels, 10px handles, 16px icons.
    pub const STANDARD: Self = Self {
        label_font_size: 12.0,
        handle_size: 10.0,
        icon_size: 16.0,
    };

    /// Standard chrome sizes.
    pub const fn new() -> Self {
        Self::STANDARD
    }

    pub fn label_font_size(mut self, size: f64) -> Self {
        self.label_font_size = size;
        self
    }

    pub fn handle_size(mut self, size: f64) -> Self {
        self.handle_size = size;
        self
    }

    pub fn icon_size(mut self, size: f64) -> Self {
        self.icon_size = size;
        self
    }

    /// Sizes to draw at in container space under `viewport`.
    pub fn compensated(&self, viewport: &ViewportTransform) -> Self {
        Self {
            label_font_size: compensate(self.label_font_size, viewport),
            handle_size: compensate(self.handle_size, viewport),
            icon_size: compensate(self.icon_size, viewport),
        }
    }
}

impl Default for OverlayChrome {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensate_divides_by_scale() {
        let v = ViewportTransform::new(2.0, 30.0, -10.0);
        assert_eq!(compensate(12.0, &v), 6.0);
        assert_eq!(compensate(12.0, &ViewportTransform::IDENTITY), 12.0);
    }

    #[test]
    fn compensated_chrome_is_constant_on_screen() {
        for scale in [0.25, 0.5, 1.0, 3.0, 8.0] {
            let v = ViewportTransform::new(scale, 0.0, 0.0);
            let c = OverlayChrome::STANDARD.compensated(&v);
            assert!((c.handle_size * scale - 10.0).abs() < 1e-9);
            assert!((c.label_font_size * scale - 12.0).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_scale_is_unzoomed() {
        let v = ViewportTransform::new(0.0, 5.0, 5.0);
        assert_eq!(compensate(10.0, &v), 10.0);
        assert_eq!(v.unscale_delta(4.0, 4.0), (4.0, 4.0));
        let v = ViewportTransform::new(f64::NAN, 0.0, 0.0);
        assert_eq!(v.effective_scale(), 1.0);
    }

    #[test]
    fn rect_scales_with_zoom() {
        let v = ViewportTransform::new(2.0, 10.0, 20.0);
        let r = v.apply_rect(PixelRect::new(5.0, 5.0, 50.0, 25.0));
        assert_eq!(r, PixelRect::new(20.0, 30.0, 100.0, 50.0));
    }

    #[test]
    fn invert_undoes_apply() {
        let v = ViewportTransform::new(1.5, -40.0, 12.0);
        let (sx, sy) = v.apply_point(100.0, 60.0);
        let (x, y) = v.invert_point(sx, sy);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn screen_delta_shrinks_under_zoom() {
        let v = ViewportTransform::new(4.0, 0.0, 0.0);
        assert_eq!(v.unscale_delta(40.0, -8.0), (10.0, -2.0));
    }

    #[test]
    fn chrome_builder() {
        let c = OverlayChrome::new().handle_size(14.0).icon_size(20.0);
        assert_eq!(c.handle_size, 14.0);
        assert_eq!(c.icon_size, 20.0);
        assert_eq!(c.label_font_size, 12.0);
    }
}
