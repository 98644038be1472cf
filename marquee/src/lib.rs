// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee: an unattended kiosk that presents a timeline of content cards on
//! a pan/zoom canvas.
//!
//! [`KioskSession`] owns one instance of every component and wires them to a
//! single [`Camera`](marquee_camera::Camera):
//!
//! - [`layout`]: buckets items by calendar day into axis cells and assigns
//!   their world geometry.
//! - [`schedule`]: cycles between an overview and focused items, showing new
//!   items first.
//! - [`interaction`]: pointer presses take manual control until an
//!   inactivity timeout, and a guard recenters a camera that drifted onto
//!   empty canvas.
//! - [`render`]: per-frame culling, one high-resolution fetch per URL, LOD
//!   forwarding and style dispatch.
//!
//! The session never reads a clock. Hosts pass their monotonic time in
//! milliseconds to every call that depends on it.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use marquee::{KioskSession, Mode, SessionConfig};
//! use marquee::camera::SmoothCamera;
//! use marquee::interaction::PointerEvent;
//! use marquee::layout::ContentItem;
//! use marquee::schedule::KioskMode;
//!
//! let mut config = SessionConfig::default();
//! config.schedule.article_duration_ms = 1_000;
//! config.validate().unwrap();
//!
//! let camera = SmoothCamera::new(Size::new(1920.0, 1080.0));
//! let mut session: KioskSession<_, ()> = KioskSession::new(config, camera);
//! session.set_items(
//!     vec![
//!         ContentItem::new("a").with_timestamp("2024-05-01T09:00:00Z"),
//!         ContentItem::new("b").with_timestamp("2024-05-01T10:00:00Z"),
//!     ],
//!     0,
//! );
//! session.start(0);
//! assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(0)));
//!
//! session.tick(1_000);
//! assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(1)));
//! ```

mod config;
mod session;

pub use marquee_camera as camera;
pub use marquee_interaction as interaction;
pub use marquee_layout as layout;
pub use marquee_render as render;
pub use marquee_schedule as schedule;
pub use marquee_timing as timing;

pub use config::{ConfigError, SessionConfig};
pub use session::{KioskSession, Mode};
