// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::CameraTarget;

/// Command/query surface of a pan/zoom camera.
///
/// Implementors own interpolation and any device-specific state. The kiosk
/// core only issues [`CameraTarget`]s and reads back the values below.
pub trait Camera {
    /// Commands the camera to move toward `target`.
    fn set_target(&mut self, target: CameraTarget);

    /// Current (possibly mid-animation) scale.
    fn scale(&self) -> f64;

    /// Current (possibly mid-animation) offset in screen pixels.
    fn offset(&self) -> Vec2;

    /// Scale the camera is heading toward.
    fn target_scale(&self) -> f64;

    /// Offset the camera is heading toward.
    fn target_offset(&self) -> Vec2;

    /// Size of the canvas in screen pixels.
    fn viewport(&self) -> Size;

    /// Maps a screen point into world space using the current state.
    fn screen_to_world(&self, pt: Point) -> Point {
        let scale = self.scale();
        ((pt.to_vec2() - self.offset()) / scale).to_point()
    }

    /// Maps a world point into screen space using the current state.
    fn world_to_screen(&self, pt: Point) -> Point {
        (pt.to_vec2() * self.scale() + self.offset()).to_point()
    }

    /// World rectangle visible with the current state.
    fn visible_world_rect(&self) -> Rect {
        visible_world_rect(self.scale(), self.offset(), self.viewport())
    }

    /// World rectangle that will be visible once the camera reaches its target.
    ///
    /// Consistency checks use this rather than [`Camera::visible_world_rect`]
    /// so that they do not race in-flight animations.
    fn target_visible_world_rect(&self) -> Rect {
        visible_world_rect(self.target_scale(), self.target_offset(), self.viewport())
    }
}

/// World rectangle covered by a `viewport` under `scale` and `offset`.
///
/// Non-positive scales yield an empty rectangle at the origin.
#[must_use]
pub fn visible_world_rect(scale: f64, offset: Vec2, viewport: Size) -> Rect {
    if scale <= 0.0 {
        return Rect::ZERO;
    }
    let min = (-offset / scale).to_point();
    Rect::from_origin_size(min, viewport / scale)
}
