// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Write as _;
use std::collections::BTreeMap;

use kurbo::Rect;
use tracing::debug;

use crate::config::{MergeToward, Orientation, PartitionConfig, TimeOrder};
use crate::day::{DayKey, Stamp, Zone, parse_timestamp};
use crate::item::ContentItem;

/// Position of a cell within a day that was split into several cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SplitPart {
    /// Zero-based part index in display order.
    pub index: usize,
    /// Total number of parts the day was split into.
    pub count: usize,
}

/// One time-bucketed group on the canvas: a day column or row.
///
/// Cells are rebuilt from scratch by every [`ContentPartitioner::partition`]
/// call and never updated incrementally.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisCell {
    /// Day this cell represents. Merged cells keep the receiving day.
    pub key: DayKey,
    /// Display label.
    pub label: String,
    /// Primary-axis offset in world units.
    pub offset: f64,
    /// Primary-axis size in world units.
    pub size: f64,
    /// Secondary-axis length occupied by the members, excluding the header.
    pub extent: f64,
    /// Number of member items.
    pub event_count: usize,
    /// Ordinal position in the cell sequence.
    pub index: usize,
    /// Set when this cell is one part of a split day.
    pub part: Option<SplitPart>,
    /// Days whose members were merged into this cell.
    pub merged_days: Vec<DayKey>,
    /// Indices of the member items, in display order.
    pub members: Vec<usize>,
}

impl AxisCell {
    /// Primary-axis coordinate of the cell's center.
    #[must_use]
    pub fn primary_center(&self) -> f64 {
        self.offset + self.size * 0.5
    }

    /// Returns `true` for the second and later parts of a split day.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.part.is_some_and(|p| p.index > 0)
    }
}

/// Result of one partition pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    cells: Vec<AxisCell>,
    bounds: Rect,
    orientation: Orientation,
    cell_of: Vec<usize>,
}

impl Partition {
    /// Cells in display order.
    #[must_use]
    pub fn cells(&self) -> &[AxisCell] {
        &self.cells
    }

    /// Content bounds including the header band, for camera fitting.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Orientation the cells were laid out with.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns `true` when no items were partitioned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sum of member counts over all cells.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.cells.iter().map(|c| c.event_count).sum()
    }

    /// Cell containing the item at `item_index`.
    #[must_use]
    pub fn cell_of(&self, item_index: usize) -> Option<&AxisCell> {
        self.cell_of
            .get(item_index)
            .and_then(|&cell| self.cells.get(cell))
    }

    /// Cell whose primary-axis center is nearest to `primary`.
    #[must_use]
    pub fn nearest_cell(&self, primary: f64) -> Option<&AxisCell> {
        self.cells.iter().min_by(|a, b| {
            let da = (a.primary_center() - primary).abs();
            let db = (b.primary_center() - primary).abs();
            da.total_cmp(&db)
        })
    }
}

#[derive(Debug)]
struct Group {
    key: DayKey,
    absorbed: Vec<DayKey>,
    members: Vec<usize>,
    part: Option<SplitPart>,
}

impl Group {
    fn absorb(&mut self, source: Self, source_is_older: bool) {
        let Self {
            key,
            absorbed,
            mut members,
            ..
        } = source;
        if source_is_older {
            members.append(&mut self.members);
            self.members = members;
        } else {
            self.members.append(&mut members);
        }
        self.absorbed.push(key);
        self.absorbed.extend(absorbed);
    }
}

/// Groups content items into readable, time-ordered axis cells and assigns
/// each item its world-space geometry.
///
/// The partitioner holds only configuration; [`ContentPartitioner::partition`]
/// is a pure function of the items and that configuration, apart from writing
/// each item's [`ContentItem::bounds`].
#[derive(Clone, Debug)]
pub struct ContentPartitioner {
    config: PartitionConfig,
    zone: Zone,
}

impl ContentPartitioner {
    /// Creates a partitioner.
    #[must_use]
    pub fn new(config: PartitionConfig) -> Self {
        let zone = Zone::from_offset_minutes(config.utc_offset_minutes);
        Self { config, zone }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Partitions `items` into cells and writes each item's bounds.
    ///
    /// Every item ends up in exactly one cell.
    pub fn partition(&self, items: &mut [ContentItem]) -> Partition {
        let mut groups = self.merge_small(self.group_by_day(items));
        if self.config.order == TimeOrder::NewestFirst {
            groups.reverse();
            for group in &mut groups {
                group.members.reverse();
            }
        }
        let groups = self.split_large(groups);
        let partition = self.place(groups, items);
        debug!(
            items = items.len(),
            cells = partition.cells.len(),
            "partitioned content"
        );
        partition
    }

    /// Buckets items by calendar day, oldest first, members in time order.
    fn group_by_day(&self, items: &[ContentItem]) -> Vec<Group> {
        let stamps: Vec<Option<Stamp>> = items
            .iter()
            .map(|item| {
                item.timestamp
                    .as_deref()
                    .and_then(|raw| parse_timestamp(raw, self.zone))
            })
            .collect();

        let mut by_day: BTreeMap<DayKey, Vec<usize>> = BTreeMap::new();
        for (index, stamp) in stamps.iter().enumerate() {
            let key = stamp.map_or(DayKey::Unknown, |s| DayKey::Day(s.day));
            by_day.entry(key).or_default().push(index);
        }
        if let Some(unknown) = by_day.get(&DayKey::Unknown) {
            debug!(count = unknown.len(), "items without a usable timestamp");
        }

        by_day
            .into_iter()
            .map(|(key, mut members)| {
                // Stable: undated members keep their source order.
                members.sort_by_key(|&i| stamps[i].map_or(i64::MIN, |s| s.millis));
                Group {
                    key,
                    absorbed: Vec::new(),
                    members,
                    part: None,
                }
            })
            .collect()
    }

    /// Folds undersized days into a neighbour until every remaining group
    /// meets the minimum or only one group is left.
    fn merge_small(&self, mut groups: Vec<Group>) -> Vec<Group> {
        let min = self.config.min_per_group;
        if min <= 1 {
            return groups;
        }
        // Each iteration removes one group, so this terminates.
        while groups.len() > 1 {
            let Some(i) = groups.iter().position(|g| g.members.len() < min) else {
                break;
            };
            let into_newer = match self.config.merge_toward {
                MergeToward::Newer => i + 1 < groups.len(),
                MergeToward::Older => i == 0,
            };
            let source = groups.remove(i);
            let target = if into_newer {
                &mut groups[i]
            } else {
                &mut groups[i - 1]
            };
            target.absorb(source, into_newer);
        }
        groups
    }

    /// Splits oversized groups into `ceil(n / max)` parts whose sizes differ
    /// by at most one, larger parts first.
    fn split_large(&self, groups: Vec<Group>) -> Vec<Group> {
        let max = self.config.max_per_group.max(1);
        let mut out = Vec::with_capacity(groups.len());
        for group in groups {
            let n = group.members.len();
            if n <= max {
                out.push(group);
                continue;
            }
            let count = n.div_ceil(max);
            let base = n / count;
            let extra = n % count;
            let mut rest = group.members.as_slice();
            for index in 0..count {
                let (head, tail) = rest.split_at(base + usize::from(index < extra));
                rest = tail;
                out.push(Group {
                    key: group.key,
                    absorbed: group.absorbed.clone(),
                    members: head.to_vec(),
                    part: Some(SplitPart { index, count }),
                });
            }
        }
        out
    }

    fn gap_between(&self, a: &Group, b: &Group) -> f64 {
        match (a.part, b.part) {
            (Some(_), Some(_)) if a.key == b.key => self.config.split_gap,
            (None, None) => self.config.group_gap,
            _ => 2.0 * self.config.group_gap,
        }
    }

    fn place(&self, groups: Vec<Group>, items: &mut [ContentItem]) -> Partition {
        let cfg = &self.config;
        let (primary_size, secondary_size) = match cfg.orientation {
            Orientation::Horizontal => (cfg.item_width, cfg.item_height),
            Orientation::Vertical => (cfg.item_height, cfg.item_width),
        };
        let gaps: Vec<f64> = groups
            .windows(2)
            .map(|w| self.gap_between(&w[0], &w[1]))
            .collect();

        let mut cells = Vec::with_capacity(groups.len());
        let mut cell_of = vec![0; items.len()];
        let mut content: Option<Rect> = None;
        let mut cursor = 0.0;

        for (index, group) in groups.into_iter().enumerate() {
            if index > 0 {
                cursor += gaps[index - 1];
            }
            for (slot, &member) in group.members.iter().enumerate() {
                let secondary = cfg.header_size + slot as f64 * (secondary_size + cfg.item_gap);
                let origin = match cfg.orientation {
                    Orientation::Horizontal => (cursor, secondary),
                    Orientation::Vertical => (secondary, cursor),
                };
                let rect = Rect::from_origin_size(origin, (cfg.item_width, cfg.item_height));
                items[member].bounds = rect;
                cell_of[member] = index;
                content = Some(content.map_or(rect, |c| c.union(rect)));
            }

            let n = group.members.len();
            let extent = n as f64 * secondary_size + n.saturating_sub(1) as f64 * cfg.item_gap;
            cells.push(AxisCell {
                label: self.label(&group),
                key: group.key,
                offset: cursor,
                size: primary_size,
                extent,
                event_count: n,
                index,
                part: group.part,
                merged_days: group.absorbed,
                members: group.members,
            });
            cursor += primary_size;
        }

        let header = cfg.header_size;
        let bounds = match (content, cfg.orientation) {
            (Some(r), Orientation::Horizontal) => Rect::new(r.x0, r.y0 - header, r.x1, r.y1),
            (Some(r), Orientation::Vertical) => Rect::new(r.x0 - header, r.y0, r.x1, r.y1),
            (None, Orientation::Horizontal) => Rect::new(0.0, 0.0, 0.0, header),
            (None, Orientation::Vertical) => Rect::new(0.0, 0.0, header, 0.0),
        };

        Partition {
            cells,
            bounds,
            orientation: cfg.orientation,
            cell_of,
        }
    }

    fn label(&self, group: &Group) -> String {
        let mut label = if group.absorbed.is_empty() {
            self.day_label(group.key)
        } else {
            let keys = || core::iter::once(group.key).chain(group.absorbed.iter().copied());
            let first = keys().min().unwrap_or(group.key);
            let last = keys().max().unwrap_or(group.key);
            if first == last {
                self.day_label(first)
            } else {
                format!("{} - {}", self.day_label(first), self.day_label(last))
            }
        };
        if let Some(part) = group.part {
            let _ = write!(label, " ({}/{})", part.index + 1, part.count);
        }
        label
    }

    fn day_label(&self, key: DayKey) -> String {
        match key {
            DayKey::Unknown => self.config.unknown_label.clone(),
            DayKey::Day(date) => {
                let mut out = String::new();
                if write!(out, "{}", date.format(&self.config.label_format)).is_err() {
                    // Malformed pattern: fall back to the ISO date.
                    out = key.to_string();
                }
                out
            }
        }
    }
}
