// SPDX-License-Identifier: MIT

//!
//! Pointer drag gestures
//!

use crate::{TrackLayout, WindowGeometry};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// What part of the window a gesture started on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragKind {
    /// The left handle (resizes, right edge stays put)
    Left,

    /// The right handle (resizes, left edge stays put)
    Right,

    /// The body of the window (moves, width stays put)
    Move,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragKind),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}

/// Where the window was, and where the pointer was, when the gesture started
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureStart {
    kind: DragKind,
    x: f64,
    left: f64,
    width: f64,
}

/// Turns pointer positions into new [`WindowGeometry`].
///
/// All positions are measured from the gesture start snapshot, so the result
/// depends only on how far the pointer has moved since the gesture began and
/// not on the path it took.  This includes the left handle, whose right edge
/// is pinned at `start_left + start_width` for the whole gesture.
#[derive(Debug, Default, Clone)]
pub struct DragController {
    gesture: Option<GestureStart>,
}

impl DragController {
    pub fn state(&self) -> DragState {
        match self.gesture {
            Some(gesture) => DragState::Dragging(gesture.kind),
            None => DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Begin a gesture.  Returns `false` (and does nothing) if a gesture is
    /// already in progress - the first gesture wins.
    pub fn start(&mut self, kind: DragKind, pointer_x: f64, geometry: &WindowGeometry) -> bool {
        if self.gesture.is_some() || !pointer_x.is_finite() {
            return false;
        }
        self.gesture = Some(GestureStart {
            kind,
            x: pointer_x,
            left: geometry.left(),
            width: geometry.width(),
        });
        true
    }

    /// The geometry for the pointer's current position.  `None` if there's no
    /// gesture in progress or the update is rejected (it would not leave a
    /// valid window), in which case the window should stay where it is.
    pub fn update(&self, pointer_x: f64, layout: &TrackLayout) -> Option<WindowGeometry> {
        let gesture = self.gesture?;
        if !pointer_x.is_finite() {
            return None;
        }
        let dx = pointer_x - gesture.x;

        let (left, width) = match gesture.kind {
            DragKind::Left => {
                let right = gesture.left + gesture.width;
                let left = (gesture.left + dx)
                    .max(layout.min_x())
                    .min(right - layout.handle_width());
                (left, right - left)
            }
            DragKind::Right => {
                let width = (gesture.width + dx)
                    .min(layout.max_x() - gesture.left)
                    .max(layout.handle_width());
                (gesture.left, width)
            }
            DragKind::Move => {
                let left = (gesture.left + dx)
                    .max(layout.min_x())
                    .min(layout.max_x() - gesture.width);
                (left, gesture.width)
            }
        };

        if width <= 0.0 {
            return None;
        }
        WindowGeometry::from(left, width, layout)
    }

    /// End the gesture.  Returns whether there was one to end.
    pub fn end(&mut self) -> bool {
        self.gesture.take().is_some()
    }
}
