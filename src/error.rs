//! Error taxonomy for the geometry core.
//!
//! Only [`GeometryError::IndeterminateLayout`] is meant to reach callers as a
//! state ("still loading"). [`GeometryError::InvalidFrame`] is a programmer
//! error. Out-of-range persisted rectangles are never an error: they are
//! clamped on read by [`NormalizedRect::clamp_to_bounds`](crate::NormalizedRect::clamp_to_bounds).

use thiserror::Error;

/// Geometry computation error.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// Container or image extent is zero, negative, non-finite or missing.
    /// Rendering must be deferred until both are known.
    #[error(
        "indeterminate layout: container {container_width}x{container_height}, image {image_width}x{image_height}"
    )]
    IndeterminateLayout {
        /// Container width in pixels (0 when unknown).
        container_width: f64,
        /// Container height in pixels (0 when unknown).
        container_height: f64,
        /// Natural image width (0 when unknown).
        image_width: u32,
        /// Natural image height (0 when unknown).
        image_height: u32,
    },

    /// A percent/pixel transform was given a zero, negative or non-finite frame.
    #[error("invalid frame {width}x{height}")]
    InvalidFrame {
        /// Frame width as passed.
        width: f64,
        /// Frame height as passed.
        height: f64,
    },
}

impl GeometryError {
    /// Whether the caller should show a loading state and retry later.
    pub fn is_deferrable(&self) -> bool {
        matches!(self, Self::IndeterminateLayout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_indeterminate_layout_defers() {
        let layout = GeometryError::IndeterminateLayout {
            container_width: 0.0,
            container_height: 300.0,
            image_width: 800,
            image_height: 600,
        };
        let frame = GeometryError::InvalidFrame {
            width: 0.0,
            height: 0.0,
        };
        assert!(layout.is_deferrable());
        assert!(!frame.is_deferrable());
    }

    #[cfg(feature = "std")]
    #[test]
    fn messages_name_the_dimensions() {
        let e = GeometryError::InvalidFrame {
            width: 0.0,
            height: 42.0,
        };
        assert_eq!(e.to_string(), "invalid frame 0x42");
    }
}
