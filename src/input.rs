//! Drag gesture state machine
//!
//! Mouse and touch events are unified by the host into canvas-space samples;
//! this module turns a press/move/release sequence into charged spin and a
//! slingshot launch. Keeping it DOM-free makes the whole gesture testable.

use glam::Vec2;

use crate::consts::{DRAG_LAUNCH_SCALE, SPIN_LIMIT, SPIN_PER_PIXEL};
use crate::sim::Launch;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    Idle,
    Dragging {
        start: Vec2,
        /// Last sampled x, for per-move spin deltas
        last_x: f32,
        spin: f32,
    },
}

/// Tracks one drag gesture from press to release.
///
/// While the ball is in flight every sample is ignored; a new drag can only
/// begin once the ball has settled back at the spawn point.
#[derive(Debug, Clone, Copy)]
pub struct DragTracker {
    phase: DragPhase,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Charged spin of the in-progress drag (zero when idle).
    pub fn spin(&self) -> f32 {
        match self.phase {
            DragPhase::Dragging { spin, .. } => spin,
            DragPhase::Idle => 0.0,
        }
    }

    /// Pointer/touch down. Starts a drag and zeroes the spin charge, unless
    /// the ball is still in flight.
    pub fn press(&mut self, at: Vec2, ball_moving: bool) {
        if ball_moving {
            return;
        }
        self.phase = DragPhase::Dragging {
            start: at,
            last_x: at.x,
            spin: 0.0,
        };
    }

    /// Pointer/touch move. Horizontal motion since the last sample charges
    /// spin; the ball itself stays put until release.
    pub fn movement(&mut self, at: Vec2, ball_moving: bool) {
        if ball_moving {
            return;
        }
        if let DragPhase::Dragging { last_x, spin, .. } = &mut self.phase {
            *spin = (*spin + (at.x - *last_x) * SPIN_PER_PIXEL).clamp(-SPIN_LIMIT, SPIN_LIMIT);
            *last_x = at.x;
        }
    }

    /// Pointer/touch up. Converts the full drag vector into a launch:
    /// dragging down-left fires up-right. A zero-length drag launches with
    /// zero velocity and simply falls.
    pub fn release(&mut self, at: Vec2, ball_moving: bool) -> Option<Launch> {
        let DragPhase::Dragging { start, spin, .. } = self.phase else {
            return None;
        };
        self.phase = DragPhase::Idle;
        if ball_moving {
            return None;
        }
        Some(Launch {
            vel: -(at - start) * DRAG_LAUNCH_SCALE,
            spin,
        })
    }
}
