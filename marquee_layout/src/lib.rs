// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Layout: content items and day-bucketed axis partitioning.
//!
//! A kiosk canvas shows a stream of cards grouped by calendar day. This crate
//! owns the two halves of that:
//!
//! - [`ContentItem`]: one card as supplied by the content source, plus the
//!   world-space [`bounds`](ContentItem::bounds) the layout assigns to it.
//! - [`ContentPartitioner`]: turns a flat item list into a sequence of
//!   [`AxisCell`]s (day columns or rows) that stay readable no matter how many
//!   items land on one day.
//!
//! Partitioning runs in these steps:
//! 1. Bucket items by calendar day. Items without a usable timestamp go into
//!    the [`DayKey::Unknown`] bucket, which sorts as the oldest day.
//! 2. Order buckets chronologically ([`TimeOrder`]).
//! 3. When `min_per_group > 1`, fold undersized days into a neighbour
//!    ([`MergeToward`]) until every day meets the minimum or only one is left.
//! 4. Split days holding more than `max_per_group` items into
//!    `ceil(n / max)` evenly sized parts.
//! 5. Place cells along the primary axis and stack members along the
//!    secondary axis below a header band. Parts of one day sit closer together
//!    than ordinary days; split days get a doubled gap on both sides.
//!
//! The partitioner holds no time-based state: a recomputation is a pure
//! function of the items and the [`PartitionConfig`].
//!
//! ## Minimal example
//!
//! ```rust
//! use marquee_layout::{ContentItem, ContentPartitioner, PartitionConfig};
//!
//! let mut items = vec![
//!     ContentItem::new("a").with_timestamp("2024-05-01T09:00:00Z"),
//!     ContentItem::new("b").with_timestamp("2024-05-01T12:00:00Z"),
//!     ContentItem::new("c").with_timestamp("2024-05-02T08:00:00Z"),
//!     ContentItem::new("d"), // no timestamp: lands in the "unknown" cell
//! ];
//!
//! let partitioner = ContentPartitioner::new(PartitionConfig {
//!     utc_offset_minutes: Some(0),
//!     ..PartitionConfig::default()
//! });
//! let partition = partitioner.partition(&mut items);
//!
//! assert_eq!(partition.cells().len(), 3);
//! assert_eq!(partition.total_count(), items.len());
//! // Every item now has geometry inside the content bounds.
//! assert!(items.iter().all(|i| partition.bounds().contains(i.bounds.center())));
//! ```

mod config;
mod day;
mod item;
mod partition;

pub use config::{MergeToward, Orientation, PartitionConfig, TimeOrder};
pub use day::DayKey;
pub use item::{ContentItem, ImageKind, ItemId, SentimentTone};
pub use partition::{AxisCell, ContentPartitioner, Partition, SplitPart};
