// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Which screen axis the day cells are laid out along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Orientation {
    /// Cells are columns laid out left to right; members stack downwards.
    #[default]
    Horizontal,
    /// Cells are rows laid out top to bottom; members run rightwards.
    Vertical,
}

impl Orientation {
    /// Coordinate of `pt` along the axis the cells are laid out on.
    #[must_use]
    pub fn primary(self, pt: Point) -> f64 {
        match self {
            Self::Horizontal => pt.x,
            Self::Vertical => pt.y,
        }
    }

    /// Coordinate of `pt` along the axis members stack on.
    #[must_use]
    pub fn secondary(self, pt: Point) -> f64 {
        match self {
            Self::Horizontal => pt.y,
            Self::Vertical => pt.x,
        }
    }
}

/// Chronological direction of the cell sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TimeOrder {
    /// Oldest day first.
    #[default]
    OldestFirst,
    /// Newest day first.
    NewestFirst,
}

/// Which neighbour an undersized day is merged into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MergeToward {
    /// Merge into the next newer day, or the older one at the newest end.
    #[default]
    Newer,
    /// Merge into the next older day, or the newer one at the oldest end.
    Older,
}

/// Options for [`ContentPartitioner`](crate::ContentPartitioner).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PartitionConfig {
    /// Axis the cells are laid out along.
    pub orientation: Orientation,
    /// Chronological direction of the cells.
    pub order: TimeOrder,
    /// Merge direction for undersized days.
    pub merge_toward: MergeToward,
    /// Days with fewer members are merged into a neighbour. `0` and `1` disable merging.
    pub min_per_group: usize,
    /// Days with more members are split into evenly sized parts.
    pub max_per_group: usize,
    /// Card width in world units.
    pub item_width: f64,
    /// Card height in world units.
    pub item_height: f64,
    /// Gap between consecutive members of one cell.
    pub item_gap: f64,
    /// Gap between two ordinary days; doubled around split days.
    pub group_gap: f64,
    /// Gap between two parts of the same split day.
    pub split_gap: f64,
    /// Size of the header band that precedes the members on the secondary axis.
    pub header_size: f64,
    /// Fixed UTC offset for calendar days. `None` uses the host local zone.
    pub utc_offset_minutes: Option<i32>,
    /// `strftime` pattern for day labels.
    pub label_format: String,
    /// Label of the sentinel bucket.
    pub unknown_label: String,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            order: TimeOrder::OldestFirst,
            merge_toward: MergeToward::Newer,
            min_per_group: 1,
            max_per_group: 20,
            item_width: 320.0,
            item_height: 220.0,
            item_gap: 16.0,
            group_gap: 48.0,
            split_gap: 12.0,
            header_size: 64.0,
            utc_offset_minutes: None,
            label_format: "%b %-d".into(),
            unknown_label: "Undated".into(),
        }
    }
}
