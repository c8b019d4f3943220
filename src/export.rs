//! Text placement for document export.
//!
//! The page is sized to the template image's natural resolution, one image
//! pixel per page unit, so field boxes map with the same percent transform
//! the editor uses. Page units have a bottom-left origin. Font sizes come
//! from the natural frame, identical to the on-screen surfaces; there is no
//! zoom concept here.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use fieldfit::{ExportOptions, FieldKind, FieldSpec, ImageExtent, NormalizedRect, TemplateLayout, plan_document};
//!
//! let template = TemplateLayout::new(ImageExtent::new(1000, 500))
//!     .with_field(FieldSpec::new("name", FieldKind::Text), NormalizedRect::new(10.0, 10.0, 50.0, 5.0));
//! let mut values = BTreeMap::new();
//! values.insert("name".to_string(), "Ada Lovelace".to_string());
//!
//! let plan = plan_document(&template, &values, &ExportOptions::default()).unwrap();
//! let field = &plan.fields[0];
//! // 5% of 500 = 25 page units tall → 15.
//! assert_eq!(field.metrics.font_size, 15.0);
//! assert_eq!(field.lines[0].text, "Ada Lovelace");
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use num_traits::Float;

use crate::containment::ImageExtent;
use crate::error::GeometryError;
use crate::rect::{FieldLimits, NormalizedRect, PixelRect};
use crate::template::{FieldKind, TemplateLayout};
use crate::transform::to_pixels;
use crate::typography::TextMetrics;

/// Page size used when the template has no stored image resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageSize {
    /// 595 × 842 units.
    #[default]
    A4,
    /// 612 × 792 units.
    Letter,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// `(width, height)` in page units.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            Self::A4 => (595.0, 842.0),
            Self::Letter => (612.0, 792.0),
            Self::Custom { width, height } => (width, height),
        }
    }
}

/// Export tuning. Typography itself is not configurable here; see
/// [`typography`](crate::typography).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportOptions {
    /// Gap between the field's left/top edge and its text, in page units.
    pub text_inset: f64,
    /// Assumed average glyph width as a fraction of font size, for truncation.
    pub char_width_ratio: f64,
    /// Hard cap on characters per line of multi-line text.
    pub max_line_chars: usize,
    /// Page size when the image resolution is unknown.
    pub fallback_page: PageSize,
    /// Floors applied when reading stored positions.
    pub limits: FieldLimits,
}

impl ExportOptions {
    /// 5pt inset, A4 fallback, standard field limits.
    pub const STANDARD: Self = Self {
        text_inset: 5.0,
        char_width_ratio: 0.5,
        max_line_chars: 100,
        fallback_page: PageSize::A4,
        limits: FieldLimits::STANDARD,
    };

    /// Same as [`STANDARD`](Self::STANDARD).
    pub const fn new() -> Self {
        Self::STANDARD
    }

    pub fn text_inset(mut self, inset: f64) -> Self {
        self.text_inset = inset;
        self
    }

    pub fn char_width_ratio(mut self, ratio: f64) -> Self {
        self.char_width_ratio = ratio;
        self
    }

    pub fn max_line_chars(mut self, chars: usize) -> Self {
        self.max_line_chars = chars;
        self
    }

    pub fn fallback_page(mut self, page: PageSize) -> Self {
        self.fallback_page = page;
        self
    }

    pub fn limits(mut self, limits: FieldLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Document page in page units, origin bottom-left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageFrame {
    /// Page width in page units.
    pub width: f64,
    /// Page height in page units.
    pub height: f64,
}

impl PageFrame {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Page for a template image: its natural resolution.
    ///
    /// A zero dimension falls back to `fallback`, see
    /// [`for_dimensions`](Self::for_dimensions).
    pub fn for_image(image: ImageExtent, fallback: PageSize) -> Self {
        Self::for_dimensions(
            Some(image.natural_width),
            Some(image.natural_height),
            fallback,
        )
    }

    /// Page for stored image dimensions.
    ///
    /// Each missing or zero dimension is taken from `fallback` on its own,
    /// so a known width with an unknown height keeps the width. An unusable
    /// custom fallback degrades to A4.
    pub fn for_dimensions(width: Option<u32>, height: Option<u32>, fallback: PageSize) -> Self {
        let known = |v: Option<u32>| v.filter(|&v| v > 0).map(f64::from);
        match (known(width), known(height)) {
            (Some(w), Some(h)) => Self::new(w, h),
            (w, h) => {
                let (fw, fh) = usable_page(fallback);
                Self::new(w.unwrap_or(fw), h.unwrap_or(fh))
            }
        }
    }

    /// A field's box in page units, top-left origin (before the flip).
    pub fn field_box(&self, field: &NormalizedRect) -> Result<PixelRect, GeometryError> {
        to_pixels(field, self.width, self.height)
    }

    /// Top-down `y` → page `y` (bottom-up).
    pub fn flip_y(&self, y: f64) -> f64 {
        self.height - y
    }
}

/// One line of text at its baseline, in page units (bottom-left origin).
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Left edge of the text.
    pub x: f64,
    /// Baseline height above the page bottom.
    pub baseline: f64,
    pub text: String,
}

/// Text for one field, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldText {
    /// Field id the text belongs to.
    pub id: String,
    /// Font metrics in page units.
    pub metrics: TextMetrics,
    /// Field box in page units, top-left origin.
    pub field_box: PixelRect,
    /// Lines in drawing order, top first.
    pub lines: Vec<PlacedLine>,
}

/// Everything to draw on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentPlan {
    /// Page the fields are placed on.
    pub page: PageFrame,
    /// Placed fields, in template order.
    pub fields: Vec<FieldText>,
}

/// Lay out `value` inside `field` on `page`.
///
/// `metrics` must be measured on the page ([`TextMetrics::in_frame`]),
/// which for a known image is its natural frame, so the page matches the
/// editor. Returns the placed lines, possibly empty.
pub fn place_text(
    kind: &FieldKind,
    field: &NormalizedRect,
    value: &str,
    page: &PageFrame,
    metrics: TextMetrics,
    options: &ExportOptions,
) -> Result<Vec<PlacedLine>, GeometryError> {
    let bx = page.field_box(field)?;
    let top = page.flip_y(bx.y);
    let x = bx.x + options.text_inset;

    let mut lines = Vec::new();
    if kind.is_multiline() && value.contains('\n') {
        let bottom = top - bx.height;
        for (i, line) in value.split('\n').enumerate() {
            let baseline = top - options.text_inset - i as f64 * metrics.line_height;
            if baseline <= bottom {
                break;
            }
            let line = truncate_chars(line.trim_end_matches('\r'), options.max_line_chars);
            if !line.is_empty() {
                lines.push(PlacedLine {
                    x,
                    baseline,
                    text: line.into(),
                });
            }
        }
    } else {
        // Single line, vertically centered.
        let baseline = top - bx.height / 2.0 - metrics.font_size / 2.0;
        let glyph = metrics.font_size * options.char_width_ratio;
        let max_chars = if glyph > 0.0 {
            Float::floor(Float::max(bx.width / glyph, 0.0)) as usize
        } else {
            0
        };
        let flat: String = value
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let text = truncate_chars(&flat, max_chars);
        if !text.is_empty() {
            lines.push(PlacedLine {
                x,
                baseline,
                text: text.into(),
            });
        }
    }
    Ok(lines)
}

/// Plan every filled field of `template` onto one page.
///
/// Fields without a value or without a position are skipped. Each field is
/// placed independently of the others.
pub fn plan_document(
    template: &TemplateLayout,
    values: &BTreeMap<String, String>,
    options: &ExportOptions,
) -> Result<DocumentPlan, GeometryError> {
    let page = PageFrame::for_dimensions(
        template.image_width,
        template.image_height,
        options.fallback_page,
    );

    let mut fields = Vec::new();
    for spec in &template.fields {
        let Some(value) = values.get(&spec.id).filter(|v| !v.is_empty()) else {
            continue;
        };
        let Some(field) = template.position(&spec.id, &options.limits) else {
            log::debug!("field {} has a value but no position", spec.id);
            continue;
        };
        let metrics = TextMetrics::in_frame(&field, page.width, page.height, &options.limits)?;
        let lines = place_text(&spec.kind, &field, value, &page, metrics, options)?;
        fields.push(FieldText {
            id: spec.id.clone(),
            metrics,
            field_box: page.field_box(&field)?,
            lines,
        });
    }

    log::debug!(
        "planned {} of {} fields on {}x{} page",
        fields.len(),
        template.fields.len(),
        page.width,
        page.height
    );
    Ok(DocumentPlan { page, fields })
}

fn usable_page(size: PageSize) -> (f64, f64) {
    let (w, h) = size.dimensions();
    if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
        (w, h)
    } else {
        log::warn!("fallback page {w}x{h} unusable, using A4");
        PageSize::A4.dimensions()
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
