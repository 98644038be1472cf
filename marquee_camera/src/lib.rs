// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Camera: the narrow command/query surface between the kiosk core
//! and whatever pans and zooms the canvas.
//!
//! The kiosk core never touches a camera's internals. It talks to it through
//! the [`Camera`] trait:
//! - Commands go out as a [`CameraTarget`] (target scale, target offset and an
//!   interpolation speed factor) via [`Camera::set_target`].
//! - Queries read the current and target scale/offset, the viewport size and
//!   the screen↔world mapping.
//!
//! The mapping is axis-aligned with a uniform scale:
//! `screen = world * scale + offset`, with `offset` expressed in screen pixels.
//!
//! [`SmoothCamera`] is a small reference implementation that eases toward its
//! target each time the host calls [`SmoothCamera::advance`]. Hosts with their
//! own viewport primitive implement [`Camera`] for it instead.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use marquee_camera::{Camera, CameraTarget, SmoothCamera};
//!
//! let mut camera = SmoothCamera::new(Size::new(800.0, 600.0));
//!
//! // Center a 100x50 card at scale 2.
//! let card = Rect::new(400.0, 300.0, 500.0, 350.0);
//! camera.set_target(CameraTarget::center_on(card, 2.0, camera.viewport(), 1.0));
//!
//! // The target is visible immediately; the current state eases toward it.
//! assert!(camera.target_visible_world_rect().contains(card.center()));
//! while camera.advance(16) {}
//! assert!((camera.scale() - 2.0).abs() < 1e-6);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
mod smooth;
mod target;

pub use camera::{Camera, visible_world_rect};
pub use smooth::{SmoothCamera, SmoothCameraDebugInfo};
pub use target::CameraTarget;
