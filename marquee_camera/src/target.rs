// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size, Vec2};

/// A camera command: where the camera should end up and how fast to get there.
///
/// Targets are produced by the scheduler, the manual override controller and
/// the snap-to-content guard. Nothing on the render path produces them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
    /// Target uniform scale.
    pub scale: f64,
    /// Target offset in screen pixels.
    pub offset: Vec2,
    /// Interpolation speed factor; `1.0` is the camera's nominal speed.
    pub speed: f64,
}

impl CameraTarget {
    /// Creates a target from raw parts.
    #[must_use]
    pub const fn new(scale: f64, offset: Vec2, speed: f64) -> Self {
        Self {
            scale,
            offset,
            speed,
        }
    }

    /// Target that centers `rect` in a viewport of size `viewport` at `scale`.
    #[must_use]
    pub fn center_on(rect: Rect, scale: f64, viewport: Size, speed: f64) -> Self {
        let view_center = Vec2::new(viewport.width * 0.5, viewport.height * 0.5);
        let offset = view_center - rect.center().to_vec2() * scale;
        Self::new(scale, offset, speed)
    }

    /// Target that centers `rect` and scales it to occupy `fill` of the viewport
    /// along its tighter axis.
    #[must_use]
    pub fn fill(rect: Rect, viewport: Size, fill: f64, speed: f64) -> Self {
        let scale = fill_scale(rect.size(), viewport, fill);
        Self::center_on(rect, scale, viewport, speed)
    }

    /// Target that fits `bounds` into the viewport with `fill` coverage and
    /// shifts the result vertically by `vertical_bias` viewport heights.
    ///
    /// A positive bias moves content down the screen, leaving room above it.
    #[must_use]
    pub fn fit(bounds: Rect, viewport: Size, fill: f64, vertical_bias: f64, speed: f64) -> Self {
        let mut target = Self::fill(bounds, viewport, fill, speed);
        target.offset.y += vertical_bias * viewport.height;
        target
    }
}

/// Scale that makes `content` cover `fill` of `viewport` without overflowing
/// either axis. Degenerate axes are ignored; fully degenerate content maps to
/// scale `1.0`.
fn fill_scale(content: Size, viewport: Size, fill: f64) -> f64 {
    let sx = (content.width > 0.0).then(|| viewport.width * fill / content.width);
    let sy = (content.height > 0.0).then(|| viewport.height * fill / content.height);
    match (sx, sy) {
        (Some(sx), Some(sy)) => sx.min(sy),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    }
}
