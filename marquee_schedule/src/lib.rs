// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Schedule: the unattended presentation state machine.
//!
//! [`KioskScheduler`] alternates between an overview of all content and a
//! focused view of one item at a time:
//!
//! - `Overview → Focused` after `overview_duration_ms`. Starts at index `0`
//!   (sequential) or a drawn index (weighted random).
//! - `Focused → Focused | Overview` after `article_duration_ms`. A queued
//!   priority item always wins; otherwise the overview is shown once
//!   `articles_before_overview` items have been seen, and the active
//!   [`Strategy`] picks the next index.
//! - Ids that appear in [`KioskScheduler::sync_items`] but were not known
//!   before are queued as priority items, so new content is shown next.
//!
//! The scheduler is driven by the host: pass the current time to
//! [`KioskScheduler::poll`] on every tick and forward any returned
//! [`CameraTarget`](marquee_camera::CameraTarget) to the camera. Manual
//! override and kiosk disabling go through [`KioskScheduler::suspend`] and
//! [`KioskScheduler::set_enabled`]; both cancel the pending transition
//! synchronously.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use marquee_layout::{ContentItem, ContentPartitioner, PartitionConfig};
//! use marquee_schedule::{KioskMode, KioskScheduler, Scene, ScheduleConfig};
//!
//! let mut items: Vec<ContentItem> = (0..3)
//!     .map(|i| ContentItem::new(i.to_string()).with_timestamp("2024-05-01"))
//!     .collect();
//! let partition = ContentPartitioner::new(PartitionConfig::default()).partition(&mut items);
//! let scene = Scene::new(&items, &partition, Size::new(1920.0, 1080.0));
//!
//! let mut kiosk = KioskScheduler::new(ScheduleConfig {
//!     article_duration_ms: 1_000,
//!     overview_duration_ms: 500,
//!     articles_before_overview: 2,
//!     ..ScheduleConfig::default()
//! });
//!
//! assert!(kiosk.start(0, &scene).is_some());
//! assert_eq!(kiosk.mode(), KioskMode::Focused(0));
//!
//! assert!(kiosk.poll(999, &scene).is_none());
//! assert!(kiosk.poll(1_000, &scene).is_some());
//! assert_eq!(kiosk.mode(), KioskMode::Focused(1));
//!
//! kiosk.poll(2_000, &scene);
//! assert_eq!(kiosk.mode(), KioskMode::Overview);
//!
//! kiosk.poll(2_500, &scene);
//! assert_eq!(kiosk.mode(), KioskMode::Focused(0));
//! ```

mod config;
mod scheduler;
mod state;
mod strategy;

pub use config::{InitialMode, ScheduleConfig, Strategy};
pub use scheduler::{KioskScheduler, Scene};
pub use state::{KioskMode, KioskState};
