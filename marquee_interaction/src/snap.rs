// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use marquee_camera::{Camera, CameraTarget};
use marquee_layout::{ContentItem, Partition};
use tracing::debug;

/// Options for [`SnapToContentGuard`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SnapConfig {
    /// Quiet window after a user interaction.
    pub cooldown_ms: u64,
    /// Time a correction is given to finish before the guard checks again.
    pub settle_ms: u64,
    /// Camera speed factor for corrections.
    pub speed: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1_000,
            settle_ms: 1_500,
            speed: 1.0,
        }
    }
}

/// Watchdog that recenters the camera when it ends up showing no content.
///
/// Visibility is judged against the camera's *target* state, so a correction
/// is never issued against a frame that is still animating toward content.
/// User input always wins: [`SnapToContentGuard::record_interaction`] clears
/// any pending correction and restarts the cooldown.
#[derive(Clone, Debug)]
pub struct SnapToContentGuard {
    config: SnapConfig,
    last_interaction: Option<u64>,
    settle_until: Option<u64>,
}

impl SnapToContentGuard {
    /// Creates an idle guard.
    #[must_use]
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            last_interaction: None,
            settle_until: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Notes a user interaction at `now`.
    pub fn record_interaction(&mut self, now: u64) {
        self.last_interaction = Some(now);
        self.settle_until = None;
    }

    /// Returns `true` while a previously issued correction is settling.
    #[must_use]
    pub fn is_correcting(&self, now: u64) -> bool {
        self.settle_until.is_some_and(|until| now < until)
    }

    /// Returns `true` inside the cooldown window after an interaction.
    #[must_use]
    pub fn in_cooldown(&self, now: u64) -> bool {
        self.last_interaction
            .is_some_and(|at| now < at.saturating_add(self.config.cooldown_ms))
    }

    /// Returns a correction when no item would be visible once the camera
    /// settles.
    ///
    /// The correction centers the member, in the cell nearest the view
    /// center, whose secondary-axis center is nearest the view center. The
    /// current target scale is kept.
    pub fn check(
        &mut self,
        now: u64,
        camera: &impl Camera,
        items: &[ContentItem],
        partition: &Partition,
    ) -> Option<CameraTarget> {
        if items.is_empty() || self.in_cooldown(now) || self.is_correcting(now) {
            return None;
        }
        let visible = camera.target_visible_world_rect();
        if items.iter().any(|item| intersects(item.bounds, visible)) {
            return None;
        }

        let axis = partition.orientation();
        let center = visible.center();
        let cell = partition.nearest_cell(axis.primary(center))?;
        let secondary = axis.secondary(center);
        let member = cell
            .members
            .iter()
            .filter_map(|&i| items.get(i))
            .min_by(|a, b| {
                let da = (axis.secondary(a.bounds.center()) - secondary).abs();
                let db = (axis.secondary(b.bounds.center()) - secondary).abs();
                da.total_cmp(&db)
            })?;

        let scale = match camera.target_scale() {
            s if s > 0.0 && s.is_finite() => s,
            _ => 1.0,
        };
        self.settle_until = Some(now.saturating_add(self.config.settle_ms));
        debug!(item = %member.id, cell = cell.index, "camera drifted off content; snapping back");
        Some(CameraTarget::center_on(
            member.bounds,
            scale,
            camera.viewport(),
            self.config.speed,
        ))
    }
}

/// Open-interval overlap: rectangles that only touch do not intersect.
fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::intersects;

    #[test]
    fn touching_is_not_overlapping() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(intersects(a, Rect::new(5.0, 5.0, 20.0, 20.0)));
        assert!(!intersects(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!intersects(a, Rect::new(30.0, 30.0, 40.0, 40.0)));
    }
}
