// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use marquee_layout::{ContentItem, ImageKind};
use marquee_render::{
    CardDraw, FrameView, ImageLoader, LinearLod, RenderConfig, RenderPipeline, RendererSet,
    Resolution,
};

struct NullLoader;

impl ImageLoader for NullLoader {
    type Image = ();

    fn thumbnail(&self, _url: &str) -> Option<&()> {
        Some(&())
    }

    fn load(&mut self, _url: &str, _resolution: Resolution) {}
}

/// A `cols` x `rows` grid of image cards, 320 x 220 with 16px gaps.
fn grid(cols: usize, rows: usize) -> Vec<ContentItem> {
    let mut items = Vec::with_capacity(cols * rows);
    for col in 0..cols {
        for row in 0..rows {
            let mut item = ContentItem::new(format!("{col}:{row}"))
                .with_image(format!("https://img.example/{col}/{row}.jpg"), ImageKind::Photo);
            let (x, y) = (col as f64 * 336.0, row as f64 * 236.0);
            item.bounds = Rect::new(x, y, x + 320.0, y + 220.0);
            items.push(item);
        }
    }
    items
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    let viewport = Size::new(1920.0, 1080.0);

    // Overview shows everything; focused culls nearly everything.
    for cols in [32usize, 256, 1_024] {
        let items = grid(cols, 20);
        group.throughput(Throughput::Elements(items.len() as u64));

        for (label, scale) in [("overview", 0.05), ("focused", 2.0)] {
            let view = FrameView {
                scale,
                offset: Vec2::ZERO,
                viewport,
            };
            let mut pipeline = RenderPipeline::new(RenderConfig::default());
            let mut renderers = RendererSet::new(|card: &CardDraw<'_, ()>| {
                black_box(card.screen_bounds);
            });
            let mut lod = LinearLod::default();
            group.bench_with_input(BenchmarkId::new(label, cols), &items, |b, items| {
                b.iter(|| {
                    black_box(pipeline.render_frame(
                        &view,
                        items,
                        &mut NullLoader,
                        &mut lod,
                        &mut renderers,
                    ))
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_render_frame);
criterion_main!(benches);
