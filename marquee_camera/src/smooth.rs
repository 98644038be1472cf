// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

use crate::{Camera, CameraTarget};

/// Fraction of the remaining distance covered per second at speed `1.0`.
const BASE_RATE: f64 = 4.0;

/// Distance below which the camera snaps onto its target.
const SETTLE_EPSILON: f64 = 1e-3;

/// Reference camera that eases toward its target.
///
/// `SmoothCamera` tracks a viewport size, a current uniform scale and screen
/// offset, and a [`CameraTarget`]. Each [`SmoothCamera::advance`] moves the
/// current state a fraction of the way toward the target, proportional to
/// elapsed time and the target's speed factor.
///
/// Direct user gestures ([`SmoothCamera::pan_by`],
/// [`SmoothCamera::zoom_about_screen_point`]) move both the current state and
/// the target so that a gesture is never undone by a pending animation.
#[derive(Clone, Debug)]
pub struct SmoothCamera {
    viewport: Size,
    scale: f64,
    offset: Vec2,
    target: CameraTarget,
    min_scale: f64,
    max_scale: f64,
}

impl SmoothCamera {
    /// Creates a camera over a viewport of `viewport` pixels.
    ///
    /// - Initial scale is `1.0` and initial offset is zero.
    /// - Scale is clamped to `[0.05, 20.0]` by default.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            scale: 1.0,
            offset: Vec2::ZERO,
            target: CameraTarget::new(1.0, Vec2::ZERO, 1.0),
            min_scale: 0.05,
            max_scale: 20.0,
        }
    }

    /// Resizes the viewport. Scale and offset are left untouched.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Sets the scale limits, normalizing so that `min <= max`.
    ///
    /// Both the current and target scale are clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.scale = self.clamp_scale(self.scale);
        self.target.scale = self.clamp_scale(self.target.scale);
    }

    /// Moves the current state directly onto `target`, skipping animation.
    pub fn jump_to(&mut self, target: CameraTarget) {
        self.set_target(target);
        self.scale = self.target.scale;
        self.offset = self.target.offset;
    }

    /// Advances the animation by `dt_ms` milliseconds.
    ///
    /// Returns `true` while the camera is still moving.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        if self.is_settled() {
            return false;
        }
        let dt = dt_ms as f64 / 1000.0;
        let t = (BASE_RATE * self.target.speed.max(0.0) * dt).min(1.0);
        self.scale += (self.target.scale - self.scale) * t;
        self.offset += (self.target.offset - self.offset) * t;
        if self.distance_to_target() < SETTLE_EPSILON {
            self.scale = self.target.scale;
            self.offset = self.target.offset;
        }
        !self.is_settled()
    }

    /// Returns `true` when the current state equals the target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.scale == self.target.scale && self.offset == self.target.offset
    }

    /// Pans by a screen-space delta, moving the target along with it.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.offset += delta;
        self.target.offset += delta;
    }

    /// Zooms by `factor` around a screen-space anchor that stays fixed.
    ///
    /// The target is replaced by the resulting state.
    pub fn zoom_about_screen_point(&mut self, anchor: Point, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let old = self.scale;
        let new = self.clamp_scale(old * factor);
        if (new - old).abs() < f64::EPSILON {
            return;
        }
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) * (new / old);
        self.scale = new;
        self.target.scale = self.scale;
        self.target.offset = self.offset;
    }

    /// Returns the current target.
    #[must_use]
    pub fn target(&self) -> CameraTarget {
        self.target
    }

    /// Snapshot of the camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> SmoothCameraDebugInfo {
        SmoothCameraDebugInfo {
            viewport: self.viewport,
            scale: self.scale,
            offset: self.offset,
            target: self.target,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            settled: self.is_settled(),
        }
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    fn distance_to_target(&self) -> f64 {
        // Offsets are in pixels; weight the scale error by the viewport so both
        // terms are comparable.
        let ds = (self.target.scale - self.scale).abs() * self.viewport.width.max(1.0);
        let d = self.target.offset - self.offset;
        ds.max(d.x.abs()).max(d.y.abs())
    }
}

impl Camera for SmoothCamera {
    fn set_target(&mut self, target: CameraTarget) {
        self.target = CameraTarget {
            scale: self.clamp_scale(target.scale),
            ..target
        };
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn offset(&self) -> Vec2 {
        self.offset
    }

    fn target_scale(&self) -> f64 {
        self.target.scale
    }

    fn target_offset(&self) -> Vec2 {
        self.target.offset
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

/// Debug snapshot of a [`SmoothCamera`].
#[derive(Clone, Copy, Debug)]
pub struct SmoothCameraDebugInfo {
    /// Viewport size in screen pixels.
    pub viewport: Size,
    /// Current scale.
    pub scale: f64,
    /// Current offset.
    pub offset: Vec2,
    /// Active target.
    pub target: CameraTarget,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// Whether the camera has reached its target.
    pub settled: bool,
}
