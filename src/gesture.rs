//! Move and corner-resize of a field's percentage rectangle.
//!
//! Modelled as an explicit state machine with a pure transition function,
//! `(state, event) -> (state, change)`:
//!
//! ```text
//!   Idle ──press body──▶ Dragging ──release/cancel──▶ Idle
//!   Idle ──press handle─▶ Resizing(corner) ──release/cancel──▶ Idle
//! ```
//!
//! Pointer positions are container pixels (see
//! [`ViewportTransform::invert_point`](crate::ViewportTransform::invert_point)
//! for screen input). Every move yields a valid rectangle; out-of-range
//! pointers are clamped, never rejected. A cancelled gesture keeps the last
//! rectangle it produced.
//!
//! # Example
//!
//! ```
//! use fieldfit::{
//!     DisplayLayout, FieldLimits, GestureContext, GestureState, GestureTarget, NormalizedRect,
//!     PointerEvent, RectChange,
//! };
//!
//! let ctx = GestureContext::new(DisplayLayout::new(1000.0, 500.0, 0.0, 0.0), FieldLimits::STANDARD);
//! let rect = NormalizedRect::new(70.0, 10.0, 20.0, 10.0);
//!
//! let t = GestureState::Idle.transition(PointerEvent::press(GestureTarget::Body, 750.0, 75.0), rect, &ctx);
//! let t = t.state.transition(PointerEvent::moved(1000.0, 75.0), rect, &ctx);
//! // 25% to the right would overshoot; x stops at 100 - width.
//! assert_eq!(t.change, Some(RectChange::Live(NormalizedRect::new(80.0, 10.0, 20.0, 10.0))));
//! ```

use num_traits::Float;

use crate::containment::DisplayLayout;
use crate::rect::{FieldLimits, NormalizedRect, PERCENT_MAX, PercentPoint, PixelRect, clamp_range};

/// A rectangle corner, named by compass direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    /// All corners, in hit-test priority order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// The corner that stays fixed while this one is dragged.
    pub fn opposite(self) -> Self {
        match self {
            Self::NorthWest => Self::SouthEast,
            Self::NorthEast => Self::SouthWest,
            Self::SouthWest => Self::NorthEast,
            Self::SouthEast => Self::NorthWest,
        }
    }

    fn moves_left_edge(self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }

    fn moves_top_edge(self) -> bool {
        matches!(self, Self::NorthWest | Self::NorthEast)
    }

    /// Position of this corner of a percentage rect.
    pub fn of(self, rect: &NormalizedRect) -> PercentPoint {
        let x = if self.moves_left_edge() { rect.x } else { rect.right() };
        let y = if self.moves_top_edge() { rect.y } else { rect.bottom() };
        PercentPoint::new(x, y)
    }

    /// Position of this corner of a pixel rect.
    pub fn of_pixels(self, rect: &PixelRect) -> (f64, f64) {
        let x = if self.moves_left_edge() { rect.x } else { rect.right() };
        let y = if self.moves_top_edge() { rect.y } else { rect.bottom() };
        (x, y)
    }
}

/// What a pointer-down landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    /// The field body: starts a move.
    Body,
    /// A corner handle: starts a resize.
    Handle(Corner),
}

/// Find what a container-space pointer hits on a field drawn at `field`.
///
/// Handles are `handle_size` squares centered on each corner and win over
/// the body. Pass a zoom-compensated size (see
/// [`OverlayChrome::compensated`](crate::OverlayChrome::compensated)) so the
/// grab area matches what is drawn.
pub fn hit_test(field: &PixelRect, x: f64, y: f64, handle_size: f64) -> Option<GestureTarget> {
    let half = handle_size.max(0.0) / 2.0;
    for corner in Corner::ALL {
        let (cx, cy) = corner.of_pixels(field);
        if Float::abs(x - cx) <= half && Float::abs(y - cy) <= half {
            return Some(GestureTarget::Handle(corner));
        }
    }
    field.contains(x, y).then_some(GestureTarget::Body)
}

/// Raw pointer input, in container pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer-down over a field or one of its handles.
    Press { target: GestureTarget, x: f64, y: f64 },
    /// Pointer moved while pressed.
    Move { x: f64, y: f64 },
    /// Pointer-up: the gesture completes.
    Release,
    /// The gesture was interrupted (focus loss, pointer capture lost).
    Cancel,
}

impl PointerEvent {
    /// Pointer-down on `target` at container pixel `(x, y)`.
    pub fn press(target: GestureTarget, x: f64, y: f64) -> Self {
        Self::Press { target, x, y }
    }

    /// Pointer moved to container pixel `(x, y)`.
    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move { x, y }
    }
}

/// Gesture state. `Idle` is both initial and terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        /// Container-pixel position of the press.
        grab: (f64, f64),
        /// Field rect when the press happened.
        origin: NormalizedRect,
        /// Last rect produced by this gesture.
        current: NormalizedRect,
    },
    Resizing {
        corner: Corner,
        origin: NormalizedRect,
        current: NormalizedRect,
    },
}

/// A rectangle the owning field should take.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RectChange {
    /// Intermediate result while the pointer moves.
    Live(NormalizedRect),
    /// Gesture completed; persist this rect.
    Committed(NormalizedRect),
    /// Gesture interrupted; keep this rect in place (it is the last live one).
    Abandoned(NormalizedRect),
}

impl RectChange {
    /// The rect carried by any variant.
    pub fn rect(&self) -> NormalizedRect {
        match *self {
            Self::Live(r) | Self::Committed(r) | Self::Abandoned(r) => r,
        }
    }

    /// Whether the gesture is over.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Live(_))
    }
}

/// Result of one transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// State to hold until the next event.
    pub state: GestureState,
    /// Rect the field should take, if this event produced one.
    pub change: Option<RectChange>,
}

impl Transition {
    fn stay(state: GestureState) -> Self {
        Self {
            state,
            change: None,
        }
    }
}

/// Everything a transition needs besides the state and the event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureContext {
    /// Where the image sits in the container; pointer pixels map through it.
    pub layout: DisplayLayout,
    /// Minimum field size enforced while resizing.
    pub limits: FieldLimits,
}

impl GestureContext {
    pub const fn new(layout: DisplayLayout, limits: FieldLimits) -> Self {
        Self { layout, limits }
    }
}

impl GestureState {
    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Advance the state machine.
    ///
    /// `field` is the owning field's current rect; it is only read when a
    /// gesture starts. Presses during an active gesture and moves/releases
    /// while idle are ignored.
    pub fn transition(
        self,
        event: PointerEvent,
        field: NormalizedRect,
        ctx: &GestureContext,
    ) -> Transition {
        match (self, event) {
            (Self::Idle, PointerEvent::Press { target, x, y }) => {
                let origin = field.clamp_to_bounds(&ctx.limits);
                let state = match target {
                    GestureTarget::Body => Self::Dragging {
                        grab: (x, y),
                        origin,
                        current: origin,
                    },
                    GestureTarget::Handle(corner) => Self::Resizing {
                        corner,
                        origin,
                        current: origin,
                    },
                };
                log::debug!("gesture start {target:?} on {origin:?}");
                Transition::stay(state)
            }

            (
                Self::Dragging {
                    grab,
                    origin,
                    current: _,
                },
                PointerEvent::Move { x, y },
            ) => {
                let delta = ctx.layout.delta_to_percent(x - grab.0, y - grab.1);
                let current = drag(&origin, delta);
                log::trace!("drag to {current:?}");
                Transition {
                    state: Self::Dragging {
                        grab,
                        origin,
                        current,
                    },
                    change: Some(RectChange::Live(current)),
                }
            }

            (
                Self::Resizing {
                    corner,
                    origin,
                    current: _,
                },
                PointerEvent::Move { x, y },
            ) => {
                let pointer = ctx.layout.point_to_percent(x, y).clamp_to_bounds();
                let current = resize(&origin, corner, pointer, &ctx.limits);
                log::trace!("resize {corner:?} to {current:?}");
                Transition {
                    state: Self::Resizing {
                        corner,
                        origin,
                        current,
                    },
                    change: Some(RectChange::Live(current)),
                }
            }

            (
                Self::Dragging { current, .. } | Self::Resizing { current, .. },
                PointerEvent::Release,
            ) => {
                log::debug!("gesture committed {current:?}");
                Transition {
                    state: Self::Idle,
                    change: Some(RectChange::Committed(current)),
                }
            }

            (
                Self::Dragging { current, .. } | Self::Resizing { current, .. },
                PointerEvent::Cancel,
            ) => {
                log::debug!("gesture abandoned at {current:?}");
                Transition {
                    state: Self::Idle,
                    change: Some(RectChange::Abandoned(current)),
                }
            }

            (state, _) => Transition::stay(state),
        }
    }
}

/// Translate `origin` by `delta` percent, keeping it inside the image.
pub fn drag(origin: &NormalizedRect, delta: PercentPoint) -> NormalizedRect {
    NormalizedRect {
        x: clamp_range(origin.x + delta.x, 0.0, PERCENT_MAX - origin.width),
        y: clamp_range(origin.y + delta.y, 0.0, PERCENT_MAX - origin.height),
        ..*origin
    }
}

/// Move `corner` of `origin` to `pointer`, anchoring the opposite corner.
///
/// `pointer` is expected in `[0, 100]`. The dragged edge stops `min` short of
/// the anchored edge on each axis.
pub fn resize(
    origin: &NormalizedRect,
    corner: Corner,
    pointer: PercentPoint,
    limits: &FieldLimits,
) -> NormalizedRect {
    let (x, width) = resize_axis(
        origin.x,
        origin.right(),
        pointer.x,
        corner.moves_left_edge(),
        limits.min_width,
    );
    let (y, height) = resize_axis(
        origin.y,
        origin.bottom(),
        pointer.y,
        corner.moves_top_edge(),
        limits.min_height,
    );
    NormalizedRect {
        x,
        y,
        width,
        height,
    }
}

/// One axis of a resize. Returns the new `(start, length)`.
fn resize_axis(low: f64, high: f64, pointer: f64, moves_low: bool, min: f64) -> (f64, f64) {
    if moves_low {
        // `high` is anchored.
        let length = clamp_range(high - pointer, min, high);
        (high - length, length)
    } else {
        // `low` is anchored.
        let length = clamp_range(pointer - low, min, PERCENT_MAX - low);
        (low, length)
    }
}

/// A field editor: the state machine plus its context, for callers that
/// prefer a mutable handle over threading state through.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldEditor {
    state: GestureState,
    ctx: GestureContext,
}

impl FieldEditor {
    /// An idle editor over `layout`.
    pub fn new(layout: DisplayLayout, limits: FieldLimits) -> Self {
        Self {
            state: GestureState::Idle,
            ctx: GestureContext::new(layout, limits),
        }
    }

    /// Current gesture state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Replace the display layout after a container resize.
    pub fn set_layout(&mut self, layout: DisplayLayout) {
        self.ctx.layout = layout;
    }

    /// Feed one pointer event. Returns the rect the field should take, if any.
    pub fn handle(&mut self, event: PointerEvent, field: NormalizedRect) -> Option<RectChange> {
        let t = self.state.transition(event, field, &self.ctx);
        self.state = t.state;
        t.change
    }
}
