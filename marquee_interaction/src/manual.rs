// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};
use marquee_camera::{Camera, CameraTarget};
use marquee_layout::{ContentItem, ItemId};
use marquee_timing::Timer;
use tracing::debug;

use crate::link::normalize_link;

/// Pointer button that produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button (left click, tap).
    Primary,
    /// Context button (right click, long press).
    Secondary,
}

/// A pointer press in canvas-element coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in screen pixels relative to the canvas element.
    pub position: Point,
    /// Button pressed.
    pub button: PointerButton,
}

impl PointerEvent {
    /// Primary press at `position`.
    #[must_use]
    pub fn primary(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            button: PointerButton::Primary,
        }
    }

    /// Secondary press at `position`.
    #[must_use]
    pub fn secondary(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            button: PointerButton::Secondary,
        }
    }
}

/// Outcome of a pointer event.
#[derive(Clone, Debug, PartialEq)]
pub enum OverrideAction {
    /// Nothing was hit, or the hit item has nothing to open.
    None,
    /// Manual mode is active on `index`; move the camera to `target`.
    Focus {
        /// Index of the selected item.
        index: usize,
        /// Camera target filling the viewport with the item.
        target: CameraTarget,
    },
    /// Open this (normalized) external link.
    OpenLink(String),
}

/// Options for [`ManualOverrideController`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct OverrideConfig {
    /// Idle time after which manual mode reverts to automatic.
    pub inactivity_timeout_ms: u64,
    /// Fraction of the viewport a selected item fills.
    pub focus_fill: f64,
    /// Camera speed factor for manual targets.
    pub speed: f64,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_ms: 30_000,
            focus_fill: 0.8,
            speed: 1.0,
        }
    }
}

/// Turns pointer input into item selections and owns the inactivity timer
/// that hands control back to the automatic scheduler.
#[derive(Clone, Debug)]
pub struct ManualOverrideController {
    config: OverrideConfig,
    timer: Timer,
    selected: Option<ItemId>,
    canvas_transform: Option<Affine>,
}

impl ManualOverrideController {
    /// Creates a controller in automatic mode.
    #[must_use]
    pub fn new(config: OverrideConfig) -> Self {
        Self {
            config,
            timer: Timer::new(),
            selected: None,
            canvas_transform: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OverrideConfig {
        &self.config
    }

    /// Sets the decorative transform applied to the canvas element.
    ///
    /// Pointer positions are mapped through its inverse before the camera
    /// mapping. Singular transforms are ignored.
    ///
    /// Only affine transforms are corrected. A host that tilts the canvas
    /// with a projective (3D perspective) transform must pass an affine
    /// approximation, and hits drift towards the foreshortened edges.
    pub fn set_canvas_transform(&mut self, transform: Option<Affine>) {
        self.canvas_transform = transform;
    }

    /// Decorative canvas transform, if any.
    #[must_use]
    pub fn canvas_transform(&self) -> Option<Affine> {
        self.canvas_transform
    }

    /// Index of the item under `screen`, if any.
    ///
    /// Later items are drawn on top, so the last hit in iteration order wins.
    #[must_use]
    pub fn hit_test(
        &self,
        screen: Point,
        camera: &impl Camera,
        items: &[ContentItem],
    ) -> Option<usize> {
        let canvas = match self.canvas_transform {
            Some(t) if t.determinant().abs() > f64::EPSILON => t.inverse() * screen,
            _ => screen,
        };
        let world = camera.screen_to_world(canvas);
        if !world.is_finite() {
            return None;
        }
        items.iter().rposition(|item| item.bounds.contains(world))
    }

    /// Handles a pointer press.
    ///
    /// A primary hit enters (or stays in) manual mode on the hit item and
    /// restarts the inactivity timer. A secondary hit opens the item's link
    /// without changing mode.
    pub fn on_pointer(
        &mut self,
        event: PointerEvent,
        now: u64,
        camera: &impl Camera,
        items: &[ContentItem],
    ) -> OverrideAction {
        let hit = self.hit_test(event.position, camera, items);
        match (event.button, hit) {
            (PointerButton::Primary, Some(index)) => {
                let target = CameraTarget::fill(
                    items[index].bounds,
                    camera.viewport(),
                    self.config.focus_fill,
                    self.config.speed,
                );
                let id = &items[index].id;
                if self.selected.is_none() {
                    debug!(index, id = id.as_str(), "entering manual mode");
                }
                self.selected = Some(id.clone());
                self.timer.schedule(now, self.config.inactivity_timeout_ms);
                OverrideAction::Focus { index, target }
            }
            (PointerButton::Primary, None) => {
                self.record_activity(now);
                OverrideAction::None
            }
            (PointerButton::Secondary, Some(index)) => items[index]
                .link
                .as_deref()
                .map_or(OverrideAction::None, |link| {
                    OverrideAction::OpenLink(normalize_link(link))
                }),
            (PointerButton::Secondary, None) => OverrideAction::None,
        }
    }

    /// Returns `true` once when the inactivity timer fires and manual mode
    /// ends.
    pub fn poll(&mut self, now: u64) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        debug!(selected = ?self.selected, "manual mode timed out");
        self.selected = None;
        true
    }

    /// Leaves manual mode immediately. Returns `true` if it was active.
    pub fn exit_manual(&mut self) -> bool {
        self.timer.cancel();
        let was_manual = self.selected.take().is_some();
        if was_manual {
            debug!("manual mode exited");
        }
        was_manual
    }

    /// Follows a content refresh. Leaves manual mode when the selected item is
    /// no longer in `items`; returns `true` if that happened.
    pub fn sync_items(&mut self, items: &[ContentItem]) -> bool {
        let gone = self
            .selected
            .as_ref()
            .is_some_and(|id| !items.iter().any(|item| &item.id == id));
        if gone {
            debug!(selected = ?self.selected, "selected item disappeared");
        }
        gone && self.exit_manual()
    }

    /// Restarts the inactivity timer while in manual mode.
    pub fn record_activity(&mut self, now: u64) {
        if self.selected.is_some() {
            self.timer.schedule(now, self.config.inactivity_timeout_ms);
        }
    }

    /// Returns `true` while manual mode is active.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.selected.is_some()
    }

    /// Id of the item selected in manual mode.
    #[must_use]
    pub fn selected(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    /// Position of the selected item in `items`, looked up by id.
    #[must_use]
    pub fn selected_index(&self, items: &[ContentItem]) -> Option<usize> {
        let id = self.selected.as_ref()?;
        items.iter().position(|item| &item.id == id)
    }

    /// When manual mode will revert if nothing else happens.
    #[must_use]
    pub fn inactivity_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }
}
