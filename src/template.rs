//! Template geometry: image resolution plus the field-id → rect map.
//!
//! Under the `serde` feature this reads the stored template shape:
//! `image_width` / `image_height` as optional integers, `fields` as a list
//! of `{ "id", "label", "type" }`, and `field_positions` as
//! `{ "<id>": { "x", "y", "width", "height" } }` with percentage floats.
//! Those keys are written back with the same names and values, including
//! field types this crate does not know. Any other keys (template name,
//! `required`, `options`, ...) are not geometry and are not carried; merge
//! the written geometry into the stored record rather than replacing it.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::containment::{ContainerExtent, DisplayLayout, ImageExtent, compute_display_layout};
use crate::error::GeometryError;
use crate::gesture::RectChange;
use crate::overlay::OverlaySurface;
use crate::rect::{FieldLimits, NormalizedRect};

/// Input widget a field is filled with.
///
/// Geometry ignores the kind; document export only uses it to decide
/// whether a value may span several lines. Serialized as its lowercase tag;
/// tags this crate does not distinguish are kept verbatim in `Other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Number,
    Date,
    Select,
    /// Any other tag, as stored.
    Other(String),
}

impl FieldKind {
    /// The stored tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::Other(tag) => tag,
        }
    }

    /// Whether values may contain line breaks that are kept on export.
    pub fn is_multiline(&self) -> bool {
        *self == Self::Textarea
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "date" => Self::Date,
            "select" => Self::Select,
            _ => Self::Other(tag),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(tag) => tag,
            known => known.as_str().into(),
        }
    }
}

/// A field definition, as far as geometry cares.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSpec {
    /// Key into the template's positions and the export values.
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Unlabelled field of `kind`.
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            kind,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Geometry of one template.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateLayout {
    /// Natural image width; `None` until the image is uploaded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_width: Option<u32>,
    /// Natural image height; `None` until the image is uploaded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_height: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Vec<FieldSpec>,
    /// Field positions keyed by field id.
    #[cfg_attr(feature = "serde", serde(rename = "field_positions", default))]
    pub positions: BTreeMap<String, NormalizedRect>,
}

impl TemplateLayout {
    /// Empty template for an image of the given resolution.
    pub fn new(image: ImageExtent) -> Self {
        Self {
            image_width: Some(image.natural_width),
            image_height: Some(image.natural_height),
            ..Self::default()
        }
    }

    /// Add a field and its position.
    pub fn with_field(mut self, spec: FieldSpec, rect: NormalizedRect) -> Self {
        self.positions.insert(spec.id.clone(), rect);
        self.fields.push(spec);
        self
    }

    /// The image extent, if both dimensions are stored.
    pub fn image(&self) -> Option<ImageExtent> {
        ImageExtent::from_optional(self.image_width, self.image_height)
    }

    /// A field's position, clamped on read.
    pub fn position(&self, id: &str, limits: &FieldLimits) -> Option<NormalizedRect> {
        self.positions.get(id).map(|r| r.clamp_to_bounds(limits))
    }

    /// Containment layout for `container`. A missing image is indeterminate.
    pub fn display_layout(&self, container: ContainerExtent) -> Result<DisplayLayout, GeometryError> {
        compute_display_layout(container, self.image_or_unknown())
    }

    /// Editor/preview surface for `container`.
    pub fn surface(&self, container: ContainerExtent) -> Result<OverlaySurface, GeometryError> {
        OverlaySurface::new(container, self.image_or_unknown())
    }

    /// Write a gesture result back to the field it belongs to.
    ///
    /// Live, committed and abandoned changes are all applied: every one of
    /// them is a valid rect, and an abandoned gesture keeps its last state.
    /// Returns `false` if `id` has no position.
    pub fn apply(&mut self, id: &str, change: RectChange) -> bool {
        match self.positions.get_mut(id) {
            Some(slot) => {
                *slot = change.rect();
                true
            }
            None => false,
        }
    }

    fn image_or_unknown(&self) -> ImageExtent {
        self.image().unwrap_or(ImageExtent::new(0, 0))
    }
}
