//! Pan/Zoom Transform
//!
//! Stateful 2D affine transform (translate + uniform scale) driven by
//! pointer, pinch, and wheel gestures. Content and screen space relate by
//! `screen = content * scale + translation`. Zoom gestures hold the content
//! point under their reference (cursor or pinch midpoint) fixed on screen,
//! up to scale clamping.

use eframe::egui::{Pos2, Vec2};

/// Default scale limits
pub const MIN_SCALE: f32 = 0.6;
pub const MAX_SCALE: f32 = 5.0;

/// Multiplicative scale step per wheel event
const WHEEL_STEP: f32 = 0.2;

/// A tracked pointer (mouse button or touch contact)
#[derive(Debug, Clone, Copy)]
struct Pointer {
    id: u64,
    pos: Pos2,
}

/// Active one-pointer pan: translation follows the pointer's screen delta
#[derive(Debug, Clone, Copy)]
struct PanState {
    start: Pos2,
    translation: Vec2,
}

/// Active two-pointer pinch: scale follows the distance ratio, the content
/// point under the initial midpoint stays pinned to the current midpoint
#[derive(Debug, Clone, Copy)]
struct PinchState {
    start_dist: f32,
    start_scale: f32,
    anchor: Pos2,
}

/// Pan/zoom state machine for the seat map canvas
#[derive(Debug)]
pub struct PanZoom {
    scale: f32,
    translation: Vec2,
    min_scale: f32,
    max_scale: f32,

    /// Active pointers in press order; press order picks the pinch pair
    pointers: Vec<Pointer>,
    pan: Option<PanState>,
    pinch: Option<PinchState>,
}

impl Default for PanZoom {
    fn default() -> Self {
        Self::new()
    }
}

impl PanZoom {
    pub fn new() -> Self {
        Self::with_limits(MIN_SCALE, MAX_SCALE)
    }

    pub fn with_limits(min_scale: f32, max_scale: f32) -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::ZERO,
            min_scale,
            max_scale,
            pointers: Vec::new(),
            pan: None,
            pinch: None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Number of currently tracked pointers
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Back to identity (scale 1, no translation); active gestures dropped
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.translation = Vec2::ZERO;
        self.pointers.clear();
        self.pan = None;
        self.pinch = None;
    }

    /// Map a content-space point to screen space
    pub fn to_screen(&self, content: Pos2) -> Pos2 {
        Pos2::new(
            content.x * self.scale + self.translation.x,
            content.y * self.scale + self.translation.y,
        )
    }

    /// Map a screen-space point to content space
    pub fn to_content(&self, screen: Pos2) -> Pos2 {
        Pos2::new(
            (screen.x - self.translation.x) / self.scale,
            (screen.y - self.translation.y) / self.scale,
        )
    }

    /// Translate by a raw screen-space delta (mouse-drag pan path)
    pub fn pan_by(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// One wheel event: fixed multiplicative step against the scroll sign,
    /// clamped, with the content point under the cursor held fixed.
    pub fn wheel(&mut self, cursor: Pos2, delta_y: f32) {
        if delta_y == 0.0 {
            return;
        }
        let anchor = self.to_content(cursor);
        self.scale = (self.scale * (1.0 - delta_y.signum() * WHEEL_STEP))
            .clamp(self.min_scale, self.max_scale);
        self.translation = cursor.to_vec2() - anchor.to_vec2() * self.scale;
    }

    /// Register a pointer press. The first pointer arms a pan; the second
    /// converts it into a pinch anchored at the content point under the
    /// midpoint of the two.
    pub fn pointer_down(&mut self, id: u64, pos: Pos2) {
        if let Some(p) = self.pointers.iter_mut().find(|p| p.id == id) {
            p.pos = pos;
        } else {
            self.pointers.push(Pointer { id, pos });
        }

        match self.pointers.len() {
            1 => {
                self.pan = Some(PanState {
                    start: pos,
                    translation: self.translation,
                });
            }
            _ => self.arm_pinch(),
        }
    }

    /// (Re)baseline a pinch from the first two tracked pointers at the
    /// current transform. Called whenever the pointer set changes while two
    /// or more pointers remain, so the driving pair can swap without a jump.
    fn arm_pinch(&mut self) {
        let (a, b) = (self.pointers[0].pos, self.pointers[1].pos);
        let mid = a + (b - a) / 2.0;
        self.pinch = Some(PinchState {
            start_dist: a.distance(b).max(f32::EPSILON),
            start_scale: self.scale,
            anchor: self.to_content(mid),
        });
        self.pan = None;
    }

    /// Update a tracked pointer's position, advancing the active gesture.
    /// Unknown pointer ids are ignored.
    pub fn pointer_move(&mut self, id: u64, pos: Pos2) {
        let Some(p) = self.pointers.iter_mut().find(|p| p.id == id) else {
            return;
        };
        p.pos = pos;

        if self.pointers.len() == 1 {
            if let Some(pan) = self.pan {
                self.translation = pan.translation + (pos - pan.start);
            }
        } else if let Some(pinch) = self.pinch {
            let (a, b) = (self.pointers[0].pos, self.pointers[1].pos);
            let s = (pinch.start_scale * (a.distance(b) / pinch.start_dist))
                .clamp(self.min_scale, self.max_scale);
            self.scale = s;
            let mid = a + (b - a) / 2.0;
            self.translation = mid.to_vec2() - pinch.anchor.to_vec2() * s;
        }
    }

    /// Release a pointer. Dropping from two pointers to one demotes the
    /// pinch to a pan re-anchored at the survivor's current position, so the
    /// transform continues without a jump. Unknown ids are ignored, keeping
    /// malformed event sequences harmless.
    pub fn pointer_up(&mut self, id: u64) {
        let Some(idx) = self.pointers.iter().position(|p| p.id == id) else {
            return;
        };
        self.pointers.remove(idx);

        match self.pointers.len() {
            0 => {
                self.pan = None;
                self.pinch = None;
            }
            1 => {
                self.pan = Some(PanState {
                    start: self.pointers[0].pos,
                    translation: self.translation,
                });
                self.pinch = None;
            }
            _ => self.arm_pinch(),
        }
    }

    /// Abnormal pointer loss takes the same path as a release, so a tracked
    /// pointer can never leak into a stuck gesture.
    pub fn pointer_cancel(&mut self, id: u64) {
        self.pointer_up(id);
    }
}
