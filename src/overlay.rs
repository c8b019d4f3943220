//! Per-field render geometry for the interactive editor and the read-only
//! preview.
//!
//! Both surfaces compute their field rectangles from the same
//! [`DisplayLayout`] and their text metrics from the image's natural frame,
//! so they agree with each other and with document export at any container
//! size. The editor additionally applies a [`ViewportTransform`]; the
//! preview uses the identity.

use crate::containment::{ContainerExtent, DisplayLayout, ImageExtent, compute_display_layout};
use crate::error::GeometryError;
use crate::gesture::{FieldEditor, GestureTarget, hit_test};
use crate::rect::{FieldLimits, NormalizedRect, PixelRect};
use crate::typography::TextMetrics;
use crate::viewport::{OverlayChrome, ViewportTransform};

/// Everything needed to paint one field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldOverlay {
    /// The field (after clamp-on-read) in percent.
    pub field: NormalizedRect,
    /// Field rectangle in container pixels, before zoom/pan.
    pub rect: PixelRect,
    /// Field rectangle on screen, after zoom/pan.
    pub screen_rect: PixelRect,
    /// Font metrics in the natural frame. Identical for every surface.
    pub natural_text: TextMetrics,
    /// Font metrics in container pixels, before zoom/pan.
    pub text: TextMetrics,
    /// Chrome sizes in container pixels, compensated for zoom.
    pub chrome: OverlayChrome,
}

/// One rendering of a template image inside a container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlaySurface {
    layout: DisplayLayout,
    image: ImageExtent,
    viewport: ViewportTransform,
    chrome: OverlayChrome,
    limits: FieldLimits,
}

impl OverlaySurface {
    /// Lay the image out in `container`.
    ///
    /// Fails with [`GeometryError::IndeterminateLayout`] until both extents
    /// are known; show a loading state meanwhile.
    pub fn new(container: ContainerExtent, image: ImageExtent) -> Result<Self, GeometryError> {
        let layout = compute_display_layout(container, image)?;
        Ok(Self {
            layout,
            image,
            viewport: ViewportTransform::IDENTITY,
            chrome: OverlayChrome::STANDARD,
            limits: FieldLimits::STANDARD,
        })
    }

    /// Set the live zoom/pan (editor only).
    pub fn viewport(mut self, viewport: ViewportTransform) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set base chrome sizes.
    pub fn chrome(mut self, chrome: OverlayChrome) -> Self {
        self.chrome = chrome;
        self
    }

    /// Set field size floors used for clamp-on-read and editing.
    pub fn limits(mut self, limits: FieldLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn layout(&self) -> &DisplayLayout {
        &self.layout
    }

    pub fn image(&self) -> ImageExtent {
        self.image
    }

    /// Paint geometry for one field.
    pub fn field(&self, field: &NormalizedRect) -> FieldOverlay {
        let field = field.clamp_to_bounds(&self.limits);
        let rect = self.layout.field_rect(&field);
        let natural_text = match TextMetrics::for_field(&field, self.image, &self.limits) {
            Ok(m) => m,
            Err(e) => {
                debug_assert!(false, "surface built from an unknown image: {e}");
                TextMetrics::from_height(0.0)
            }
        };
        FieldOverlay {
            field,
            rect,
            screen_rect: self.viewport.apply_rect(rect),
            natural_text,
            text: natural_text.scaled(self.layout.natural_scale(self.image)),
            chrome: self.chrome.compensated(&self.viewport),
        }
    }

    /// What a screen-space pointer hits on `field`, if anything.
    pub fn hit(&self, field: &NormalizedRect, screen_x: f64, screen_y: f64) -> Option<GestureTarget> {
        let overlay = self.field(field);
        let (x, y) = self.viewport.invert_point(screen_x, screen_y);
        hit_test(&overlay.rect, x, y, overlay.chrome.handle_size)
    }

    /// Screen-space pointer → container space, ready for the gesture editor.
    pub fn to_container(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        self.viewport.invert_point(screen_x, screen_y)
    }

    /// A gesture editor bound to this surface's layout and limits.
    pub fn editor(&self) -> FieldEditor {
        FieldEditor::new(self.layout, self.limits)
    }
}
