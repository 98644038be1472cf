// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Interaction: the human side of an unattended kiosk.
//!
//! - [`ManualOverrideController`]: hit-tests pointer presses against item
//!   bounds, enters manual mode on a primary press, and reverts after an
//!   inactivity timeout. Secondary presses open the item's link through
//!   [`normalize_link`].
//! - [`SnapToContentGuard`]: when the camera would settle on empty canvas and
//!   nobody has touched the screen recently, recenters on the nearest item.
//!
//! Both are driven with host timestamps and a [`Camera`](marquee_camera::Camera)
//! implementation; neither touches the camera directly. They return
//! [`CameraTarget`](marquee_camera::CameraTarget)s for the host to apply.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use marquee_camera::SmoothCamera;
//! use marquee_interaction::{
//!     ManualOverrideController, OverrideAction, OverrideConfig, PointerEvent,
//! };
//! use marquee_layout::ContentItem;
//!
//! let mut card = ContentItem::new("a");
//! card.bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
//! let items = [card];
//! let camera = SmoothCamera::new(Size::new(800.0, 600.0));
//!
//! let mut manual = ManualOverrideController::new(OverrideConfig {
//!     inactivity_timeout_ms: 5_000,
//!     ..OverrideConfig::default()
//! });
//! let action = manual.on_pointer(PointerEvent::primary((10.0, 10.0)), 0, &camera, &items);
//! assert!(matches!(action, OverrideAction::Focus { index: 0, .. }));
//! assert!(manual.is_manual());
//!
//! assert!(!manual.poll(4_999));
//! assert!(manual.poll(5_000));
//! assert!(!manual.is_manual());
//! ```

mod link;
mod manual;
mod snap;

pub use link::normalize_link;
pub use manual::{
    ManualOverrideController, OverrideAction, OverrideConfig, PointerButton, PointerEvent,
};
pub use snap::{SnapConfig, SnapToContentGuard};
