//! Field geometry for image-backed form templates.
//!
//! Fields are stored as percentages of the template image, so one stored
//! rectangle renders identically in an interactive editor, a read-only
//! preview and an exported document, whatever the container size, zoom
//! level or image resolution.
//!
//! Pure geometry, no rendering. `no_std` compatible; the template and export
//! modules need `alloc`.
//!
//! # Modules
//!
//! - [`containment`] — aspect-preserving "fit inside" layout of the image in its container
//! - [`transform`] — percent ↔ pixel conversion in any frame
//! - [`typography`] — font size from field height, shared by every renderer
//! - [`viewport`] — zoom/pan, and constant-size overlay chrome
//! - [`gesture`] — drag and corner-resize state machine
//! - [`overlay`] — per-field paint geometry for editor and preview
//! - [`template`] — field positions keyed by id, JSON contract
//! - [`export`] — text placement on a document page
//!
//! # Example
//!
//! ```
//! use fieldfit::{ContainerExtent, FieldLimits, ImageExtent, NormalizedRect, OverlaySurface, TextMetrics};
//!
//! let image = ImageExtent::new(1240, 1754);
//! let field = NormalizedRect::new(12.0, 30.0, 40.0, 3.0);
//!
//! let small = OverlaySurface::new(ContainerExtent::new(400.0, 600.0), image).unwrap();
//! let large = OverlaySurface::new(ContainerExtent::new(1600.0, 1200.0), image).unwrap();
//!
//! // Same text size relative to the field, regardless of container.
//! let a = small.field(&field);
//! let b = large.field(&field);
//! assert_eq!(a.natural_text, b.natural_text);
//! assert_eq!(a.natural_text, TextMetrics::for_field(&field, image, &FieldLimits::STANDARD).unwrap());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod containment;
pub mod error;
pub mod gesture;
pub mod overlay;
pub mod rect;
pub mod transform;
pub mod typography;
pub mod viewport;

#[cfg(feature = "alloc")]
pub mod export;
#[cfg(feature = "alloc")]
pub mod template;

pub use containment::{ContainerExtent, DisplayLayout, ImageExtent, compute_display_layout};
pub use error::GeometryError;
pub use gesture::{
    Corner, FieldEditor, GestureContext, GestureState, GestureTarget, PointerEvent, RectChange,
    Transition, drag, hit_test, resize,
};
pub use overlay::{FieldOverlay, OverlaySurface};
pub use rect::{FieldLimits, NormalizedRect, PERCENT_MAX, PercentPoint, PixelRect};
pub use transform::{natural_pixels, to_normalized, to_pixels};
pub use typography::{
    FONT_SIZE_RATIO, LINE_HEIGHT_RATIO, MAX_FONT_SIZE, MIN_FONT_SIZE, TextMetrics,
    font_size_for_height, line_height_for_font_size,
};
pub use viewport::{OverlayChrome, ViewportTransform, compensate};

#[cfg(feature = "alloc")]
pub use export::{
    DocumentPlan, ExportOptions, FieldText, PageFrame, PageSize, PlacedLine, place_text,
    plan_document,
};
#[cfg(feature = "alloc")]
pub use template::{FieldKind, FieldSpec, TemplateLayout};
