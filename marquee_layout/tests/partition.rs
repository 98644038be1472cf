// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ContentPartitioner`: day bucketing, merge and split passes,
//! geometry and the gap policy.

use kurbo::Rect;
use marquee_layout::{
    ContentItem, ContentPartitioner, DayKey, Orientation, PartitionConfig, SplitPart, TimeOrder,
};
use proptest::prelude::*;

fn config() -> PartitionConfig {
    PartitionConfig {
        item_width: 100.0,
        item_height: 50.0,
        item_gap: 10.0,
        group_gap: 40.0,
        split_gap: 8.0,
        header_size: 30.0,
        utc_offset_minutes: Some(0),
        ..PartitionConfig::default()
    }
}

fn on_day(id: &str, day: u32, hour: u32) -> ContentItem {
    ContentItem::new(id).with_timestamp(format!("2024-05-{day:02}T{hour:02}:00:00Z"))
}

fn day_items(prefix: &str, day: u32, n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| on_day(&format!("{prefix}{i}"), day, u32::try_from(i % 24).unwrap()))
        .collect()
}

fn may(day: u32) -> DayKey {
    DayKey::Day(chrono::NaiveDate::from_ymd_opt(2024, 5, day).unwrap())
}

#[test]
fn same_day_items_share_one_cell() {
    let mut items = day_items("a", 3, 3);
    let partition = ContentPartitioner::new(config()).partition(&mut items);

    assert_eq!(partition.cells().len(), 1);
    let cell = &partition.cells()[0];
    assert_eq!(cell.event_count, 3);
    assert_eq!(cell.key, may(3));
    assert_eq!(cell.label, "May 3");
    assert_eq!(cell.part, None);
}

#[test]
fn undersized_day_merges_into_newer_neighbour() {
    let mut items = day_items("a", 1, 1);
    items.extend(day_items("b", 2, 5));
    let partitioner = ContentPartitioner::new(PartitionConfig {
        min_per_group: 2,
        ..config()
    });
    let partition = partitioner.partition(&mut items);

    assert_eq!(partition.cells().len(), 1);
    let cell = &partition.cells()[0];
    assert_eq!(cell.event_count, 6);
    assert_eq!(cell.key, may(2));
    assert_eq!(cell.merged_days, vec![may(1)]);
    assert_eq!(cell.label, "May 1 - May 2");
    // The older day's member comes first.
    assert_eq!(cell.members[0], 0);
}

#[test]
fn oversized_day_splits_with_tight_inner_gap() {
    let mut items = day_items("b", 1, 1);
    items.extend(day_items("c", 2, 21));
    items.extend(day_items("d", 3, 1));
    let partitioner = ContentPartitioner::new(PartitionConfig {
        max_per_group: 20,
        ..config()
    });
    let partition = partitioner.partition(&mut items);
    let cells = partition.cells();

    let counts: Vec<usize> = cells.iter().map(|c| c.event_count).collect();
    assert_eq!(counts, vec![1, 11, 10, 1]);
    assert_eq!(cells[1].part, Some(SplitPart { index: 0, count: 2 }));
    assert_eq!(cells[2].part, Some(SplitPart { index: 1, count: 2 }));
    assert_eq!(cells[1].label, "May 2 (1/2)");
    assert_eq!(cells[2].label, "May 2 (2/2)");
    assert!(cells[2].is_continuation());
    assert!(!cells[1].is_continuation());

    let gap = |a: usize, b: usize| cells[b].offset - (cells[a].offset + cells[a].size);
    assert_eq!(gap(0, 1), 80.0, "doubled gap before a split day");
    assert_eq!(gap(1, 2), 8.0, "split gap between parts");
    assert_eq!(gap(2, 3), 80.0, "doubled gap after a split day");
    assert!(gap(1, 2) < gap(0, 1));
}

#[test]
fn ordinary_days_use_the_normal_gap() {
    let mut items = day_items("a", 1, 2);
    items.extend(day_items("b", 2, 2));
    let partition = ContentPartitioner::new(config()).partition(&mut items);
    let cells = partition.cells();
    assert_eq!(cells[1].offset - (cells[0].offset + cells[0].size), 40.0);
    assert_eq!(cells[0].index, 0);
    assert_eq!(cells[1].index, 1);
}

#[test]
fn empty_input_degenerates_to_header() {
    let mut items: Vec<ContentItem> = Vec::new();
    let partition = ContentPartitioner::new(config()).partition(&mut items);
    assert!(partition.is_empty());
    assert_eq!(partition.bounds(), Rect::new(0.0, 0.0, 0.0, 30.0));

    let vertical = ContentPartitioner::new(PartitionConfig {
        orientation: Orientation::Vertical,
        ..config()
    })
    .partition(&mut items);
    assert_eq!(vertical.bounds(), Rect::new(0.0, 0.0, 30.0, 0.0));
}

#[test]
fn undated_items_form_the_oldest_bucket() {
    let mut items = vec![
        on_day("dated", 4, 10),
        ContentItem::new("none"),
        ContentItem::new("garbage").with_timestamp("not a date"),
    ];
    let partition = ContentPartitioner::new(config()).partition(&mut items);
    let cells = partition.cells();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0].key, DayKey::Unknown);
    assert_eq!(cells[0].label, "Undated");
    assert_eq!(cells[0].members, vec![1, 2], "source order is kept");

    let newest_first = ContentPartitioner::new(PartitionConfig {
        order: TimeOrder::NewestFirst,
        ..config()
    })
    .partition(&mut items);
    assert_eq!(newest_first.cells()[1].key, DayKey::Unknown);
}

#[test]
fn members_are_placed_chronologically_below_the_header() {
    let mut items = vec![on_day("late", 1, 18), on_day("early", 1, 6), on_day("noon", 1, 12)];
    let partition = ContentPartitioner::new(config()).partition(&mut items);
    let cell = &partition.cells()[0];
    assert_eq!(cell.members, vec![1, 2, 0]);

    assert_eq!(items[1].bounds, Rect::new(0.0, 30.0, 100.0, 80.0));
    assert_eq!(items[2].bounds, Rect::new(0.0, 90.0, 100.0, 140.0));
    assert_eq!(items[0].bounds, Rect::new(0.0, 150.0, 100.0, 200.0));
    assert_eq!(cell.extent, 170.0);
    assert_eq!(partition.bounds(), Rect::new(0.0, 0.0, 100.0, 200.0));
}

#[test]
fn newest_first_reverses_cells_and_members() {
    let mut items = vec![on_day("a", 1, 6), on_day("b", 1, 9), on_day("c", 2, 6)];
    let partition = ContentPartitioner::new(PartitionConfig {
        order: TimeOrder::NewestFirst,
        ..config()
    })
    .partition(&mut items);
    let cells = partition.cells();
    assert_eq!(cells[0].key, may(2));
    assert_eq!(cells[1].members, vec![1, 0]);
}

#[test]
fn vertical_orientation_swaps_axes() {
    let mut items = day_items("a", 1, 2);
    items.extend(day_items("b", 2, 1));
    let partition = ContentPartitioner::new(PartitionConfig {
        orientation: Orientation::Vertical,
        ..config()
    })
    .partition(&mut items);

    // Rows run top to bottom with a primary size of one card height.
    assert_eq!(partition.cells()[1].offset, 90.0);
    assert_eq!(items[0].bounds, Rect::new(30.0, 0.0, 130.0, 50.0));
    assert_eq!(items[1].bounds, Rect::new(140.0, 0.0, 240.0, 50.0));
    assert_eq!(items[2].bounds, Rect::new(30.0, 90.0, 130.0, 140.0));
    assert_eq!(partition.bounds().x0, 0.0);
}

#[test]
fn lookups_resolve_cells() {
    let mut items = day_items("a", 1, 2);
    items.extend(day_items("b", 2, 2));
    let partition = ContentPartitioner::new(config()).partition(&mut items);
    assert_eq!(partition.cell_of(3).map(|c| c.key), Some(may(2)));
    assert!(partition.cell_of(99).is_none());
    assert_eq!(partition.nearest_cell(-500.0).map(|c| c.index), Some(0));
    assert_eq!(partition.nearest_cell(1e6).map(|c| c.index), Some(1));
}

fn arb_items() -> impl Strategy<Value = Vec<ContentItem>> {
    prop::collection::vec((prop::option::weighted(0.9, 1_u32..=10), 0_u32..24), 0..120).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (day, hour))| match day {
                    Some(day) => on_day(&i.to_string(), day, hour),
                    None => ContentItem::new(i.to_string()),
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_item_lands_in_exactly_one_cell(
        mut items in arb_items(),
        min in 1_usize..6,
        max in 1_usize..25,
    ) {
        let partition = ContentPartitioner::new(PartitionConfig {
            min_per_group: min,
            max_per_group: max,
            ..config()
        })
        .partition(&mut items);

        prop_assert_eq!(partition.total_count(), items.len());
        let mut seen: Vec<usize> = partition
            .cells()
            .iter()
            .flat_map(|c| c.members.iter().copied())
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..items.len()).collect::<Vec<_>>());
        for cell in partition.cells() {
            prop_assert_eq!(cell.event_count, cell.members.len());
            prop_assert!(cell.event_count <= max);
        }
    }

    #[test]
    fn merged_cells_meet_the_minimum(
        mut items in arb_items(),
        min in 2_usize..6,
        extra in 0_usize..10,
    ) {
        // Keep max large enough that splitting cannot undo the merge pass.
        let max = 2 * min + extra;
        let partition = ContentPartitioner::new(PartitionConfig {
            min_per_group: min,
            max_per_group: max,
            ..config()
        })
        .partition(&mut items);

        let cells = partition.cells();
        if cells.len() > 1 {
            for cell in cells {
                prop_assert!(
                    cell.event_count >= min,
                    "cell {} has {} < {min}", cell.index, cell.event_count
                );
            }
        }
    }

    #[test]
    fn split_parts_are_even_and_ordered(
        n in 1_usize..90,
        max in 1_usize..30,
    ) {
        let mut items = day_items("x", 7, n);
        let partition = ContentPartitioner::new(PartitionConfig {
            max_per_group: max,
            ..config()
        })
        .partition(&mut items);

        let cells = partition.cells();
        prop_assert_eq!(cells.len(), n.div_ceil(max));
        let sizes: Vec<usize> = cells.iter().map(|c| c.event_count).collect();
        let lo = sizes.iter().copied().min().unwrap_or(0);
        let hi = sizes.iter().copied().max().unwrap_or(0);
        prop_assert!(hi - lo <= 1);

        let stamps: Vec<&str> = cells
            .iter()
            .flat_map(|c| c.members.iter())
            .map(|&i| items[i].timestamp.as_deref().unwrap_or_default())
            .collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }
}
