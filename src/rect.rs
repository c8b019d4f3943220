//! Rectangle types shared by every frame.
//!
//! [`NormalizedRect`] is the only persisted geometry: percentages of the
//! template image's width (`x`, `width`) and height (`y`, `height`).
//! [`PixelRect`] is always derived, in whatever frame the caller asked for.

/// Upper bound of the percentage space.
pub const PERCENT_MAX: f64 = 100.0;

/// Slack allowed on the far edges when checking validity, so that
/// `(100 - w) + w` rounding one ulp past 100 is not treated as out of range.
const EDGE_EPSILON: f64 = 1e-9;

/// Field rectangle in percentages of the reference image.
///
/// Valid rectangles satisfy `0 ≤ x`, `0 ≤ y`, `x + width ≤ 100`,
/// `y + height ≤ 100`, plus the [`FieldLimits`] minimums.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedRect {
    /// Left edge, percent of image width.
    pub x: f64,
    /// Top edge, percent of image height.
    pub y: f64,
    /// Width, percent of image width.
    pub width: f64,
    /// Height, percent of image height.
    pub height: f64,
}

impl NormalizedRect {
    /// Create a new rect. No validation; see [`clamp_to_bounds`](Self::clamp_to_bounds).
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge in percent.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge in percent.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the rect satisfies every invariant for the given limits.
    pub fn is_valid(&self, limits: &FieldLimits) -> bool {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        finite
            && self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= PERCENT_MAX + EDGE_EPSILON
            && self.bottom() <= PERCENT_MAX + EDGE_EPSILON
            && self.width >= limits.min_width
            && self.height >= limits.min_height
    }

    /// Pull an out-of-range rect back inside `[0, 100]`.
    ///
    /// Size is clamped first (to `[min, 100]`), then the origin is clamped so
    /// the far edge stays inside the image. Non-finite components are treated
    /// as zero. A rect that is already valid is returned unchanged.
    pub fn clamp_to_bounds(self, limits: &FieldLimits) -> Self {
        if self.is_valid(limits) {
            return self;
        }
        let width = clamp_range(finite_or_zero(self.width), limits.min_width, PERCENT_MAX);
        let height = clamp_range(finite_or_zero(self.height), limits.min_height, PERCENT_MAX);
        let x = clamp_range(finite_or_zero(self.x), 0.0, PERCENT_MAX - width);
        let y = clamp_range(finite_or_zero(self.y), 0.0, PERCENT_MAX - height);
        let clamped = Self {
            x,
            y,
            width,
            height,
        };
        log::warn!(
            "field geometry out of range, clamped {:?} -> {:?}",
            self, clamped
        );
        clamped
    }

    /// Top-left corner.
    pub fn origin(&self) -> PercentPoint {
        PercentPoint::new(self.x, self.y)
    }
}

/// A point in percentage space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PercentPoint {
    /// Percent of image width.
    pub x: f64,
    /// Percent of image height.
    pub y: f64,
}

impl PercentPoint {
    /// Create a new point. Not clamped.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to `[0, 100]`.
    pub fn clamp_to_bounds(self) -> Self {
        Self {
            x: clamp_range(finite_or_zero(self.x), 0.0, PERCENT_MAX),
            y: clamp_range(finite_or_zero(self.y), 0.0, PERCENT_MAX),
        }
    }
}

/// Axis-aligned rectangle in absolute units of some frame.
///
/// The frame is implied by the producer: display pixels, natural image
/// pixels, container pixels, screen pixels, or document page units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PixelRect {
    /// Left edge.
    pub x: f64,
    /// Top edge (y grows downward).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shift the rect by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Whether `(px, py)` lies inside the rect (edges inclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Usability floor for field size, in percent.
///
/// Width and height carry separate floors; the defaults keep a field wide
/// enough for a few characters and tall enough for one line.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldLimits {
    /// Minimum width, percent of image width.
    pub min_width: f64,
    /// Minimum height, percent of image height.
    pub min_height: f64,
}

impl FieldLimits {
    /// Default floors: 5% wide, 3% tall.
    pub const STANDARD: Self = Self {
        min_width: 5.0,
        min_height: 3.0,
    };

    /// Standard floors.
    pub const fn new() -> Self {
        Self::STANDARD
    }

    /// Set the minimum width. Clamped to `[0, 100]`.
    pub fn min_width(mut self, min_width: f64) -> Self {
        self.min_width = clamp_range(finite_or_zero(min_width), 0.0, PERCENT_MAX);
        self
    }

    /// Set the minimum height. Clamped to `[0, 100]`.
    pub fn min_height(mut self, min_height: f64) -> Self {
        self.min_height = clamp_range(finite_or_zero(min_height), 0.0, PERCENT_MAX);
        self
    }
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// `v` clamped to `[lo, hi]`. Never panics: an inverted range collapses to `lo`.
pub(crate) fn clamp_range(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
