// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use marquee_layout::{ContentItem, ContentPartitioner, PartitionConfig};

/// `len` items spread over about `len / per_day` days, some undated.
fn feed(len: usize, per_day: usize) -> Vec<ContentItem> {
    (0..len)
        .map(|i| {
            let item = ContentItem::new(format!("item-{i}"));
            if i % 97 == 0 {
                return item;
            }
            let day = i / per_day;
            let (month, dom) = (1 + (day / 28) % 12, 1 + day % 28);
            item.with_timestamp(format!(
                "2024-{month:02}-{dom:02}T{:02}:{:02}:00Z",
                i % 24,
                i % 60
            ))
        })
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    let partitioner = ContentPartitioner::new(PartitionConfig {
        min_per_group: 3,
        max_per_group: 12,
        utc_offset_minutes: Some(0),
        ..PartitionConfig::default()
    });

    // Dense days exercise splitting, sparse days exercise merging.
    for (label, per_day) in [("dense", 40usize), ("sparse", 2)] {
        for len in [256usize, 2_048, 16_384] {
            let items = feed(len, per_day);
            group.throughput(Throughput::Elements(len as u64));
            group.bench_with_input(BenchmarkId::new(label, len), &items, |b, items| {
                b.iter_batched(
                    || items.clone(),
                    |mut items| {
                        black_box(partitioner.partition(&mut items));
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
