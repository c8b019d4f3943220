//! Percent ↔ pixel transforms.
//!
//! Both directions are linear scalings parametrised by a frame size. The
//! frame is whatever the caller needs: the display frame for interactive
//! placement, the image's natural frame for font sizing, or a document page
//! for export. Nothing here assumes screen coordinates.

use crate::containment::ImageExtent;
use crate::error::GeometryError;
use crate::rect::{NormalizedRect, PERCENT_MAX, PixelRect};

/// Scale a percentage rect into a `frame_w × frame_h` pixel frame.
///
/// ```
/// use fieldfit::{NormalizedRect, PixelRect, to_pixels};
///
/// let px = to_pixels(&NormalizedRect::new(10.0, 20.0, 50.0, 25.0), 800.0, 400.0).unwrap();
/// assert_eq!(px, PixelRect::new(80.0, 80.0, 400.0, 100.0));
/// ```
pub fn to_pixels(
    rect: &NormalizedRect,
    frame_w: f64,
    frame_h: f64,
) -> Result<PixelRect, GeometryError> {
    check_frame(frame_w, frame_h)?;
    Ok(PixelRect {
        x: rect.x * frame_w / PERCENT_MAX,
        y: rect.y * frame_h / PERCENT_MAX,
        width: rect.width * frame_w / PERCENT_MAX,
        height: rect.height * frame_h / PERCENT_MAX,
    })
}

/// Inverse of [`to_pixels`]: express a pixel rect as percentages of the frame.
pub fn to_normalized(
    rect: &PixelRect,
    frame_w: f64,
    frame_h: f64,
) -> Result<NormalizedRect, GeometryError> {
    check_frame(frame_w, frame_h)?;
    Ok(NormalizedRect {
        x: rect.x * PERCENT_MAX / frame_w,
        y: rect.y * PERCENT_MAX / frame_h,
        width: rect.width * PERCENT_MAX / frame_w,
        height: rect.height * PERCENT_MAX / frame_h,
    })
}

/// A field rect in the image's natural (unscaled) pixel frame.
///
/// This is the reference frame for resolution-invariant measurements such
/// as font size.
pub fn natural_pixels(
    rect: &NormalizedRect,
    image: ImageExtent,
) -> Result<PixelRect, GeometryError> {
    let (w, h) = image.frame();
    to_pixels(rect, w, h)
}

fn check_frame(frame_w: f64, frame_h: f64) -> Result<(), GeometryError> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(frame_w) && usable(frame_h) {
        Ok(())
    } else {
        Err(GeometryError::InvalidFrame {
            width: frame_w,
            height: frame_h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &NormalizedRect, b: &NormalizedRect) {
        let eps = 1e-9;
        assert!(
            (a.x - b.x).abs() < eps
                && (a.y - b.y).abs() < eps
                && (a.width - b.width).abs() < eps
                && (a.height - b.height).abs() < eps,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn scales_each_axis_by_its_own_dimension() {
        let r = NormalizedRect::new(25.0, 50.0, 50.0, 10.0);
        let px = to_pixels(&r, 400.0, 1000.0).unwrap();
        assert_eq!(px, PixelRect::new(100.0, 500.0, 200.0, 100.0));
    }

    #[test]
    fn inverse_divides() {
        let px = PixelRect::new(100.0, 500.0, 200.0, 100.0);
        let r = to_normalized(&px, 400.0, 1000.0).unwrap();
        assert_eq!(r, NormalizedRect::new(25.0, 50.0, 50.0, 10.0));
    }

    #[test]
    fn round_trip_across_frames() {
        let rects = [
            NormalizedRect::new(0.0, 0.0, 100.0, 100.0),
            NormalizedRect::new(12.345, 67.89, 5.0, 3.0),
            NormalizedRect::new(33.333333, 66.666666, 33.333333, 10.1),
            NormalizedRect::new(99.0, 0.5, 1.0, 99.5),
        ];
        let frames = [(1.0, 1.0), (595.0, 842.0), (1920.0, 1080.0), (333.3, 7.7)];
        for r in &rects {
            for &(w, h) in &frames {
                let back = to_normalized(&to_pixels(r, w, h).unwrap(), w, h).unwrap();
                assert_close(&back, r);
            }
        }
    }

    #[test]
    fn zero_frame_is_invalid() {
        let r = NormalizedRect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(
            to_pixels(&r, 0.0, 100.0),
            Err(GeometryError::InvalidFrame {
                width: 0.0,
                height: 100.0
            })
        );
        let px = PixelRect::new(1.0, 1.0, 1.0, 1.0);
        assert!(to_normalized(&px, 100.0, 0.0).is_err());
        assert!(to_normalized(&px, f64::INFINITY, 10.0).is_err());
        assert!(to_pixels(&r, -5.0, 10.0).is_err());
    }

    #[test]
    fn natural_frame_uses_image_resolution() {
        let r = NormalizedRect::new(10.0, 10.0, 20.0, 10.0);
        let px = natural_pixels(&r, ImageExtent::new(2000, 1000)).unwrap();
        assert_eq!(px, PixelRect::new(200.0, 100.0, 400.0, 100.0));
    }

    #[test]
    fn natural_frame_rejects_unknown_image() {
        let r = NormalizedRect::new(10.0, 10.0, 20.0, 10.0);
        assert!(natural_pixels(&r, ImageExtent::new(0, 1000)).is_err());
    }
}
