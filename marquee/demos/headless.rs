// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless kiosk simulation.
//!
//! Runs two simulated minutes of a kiosk with a visitor tap, a late-arriving
//! item and a flaky image host, logging what happens. Try
//! `RUST_LOG=debug cargo run -p marquee --example headless`.

use kurbo::Size;
use marquee::camera::{Camera, SmoothCamera};
use marquee::interaction::PointerEvent;
use marquee::layout::{ContentItem, ImageKind};
use marquee::render::{CardDraw, FetchError, ImageLoader, LinearLod, RendererSet, Resolution};
use marquee::{KioskSession, Mode, SessionConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME_MS: u64 = 16;
const RUN_MS: u64 = 120_000;

/// Pretends to fetch images; every third URL fails.
#[derive(Default)]
struct SimLoader {
    pending: Vec<String>,
    requested: usize,
}

impl ImageLoader for SimLoader {
    type Image = Resolution;

    fn thumbnail(&self, _url: &str) -> Option<&Resolution> {
        None
    }

    fn load(&mut self, url: &str, _resolution: Resolution) {
        self.requested += 1;
        self.pending.push(url.to_owned());
    }
}

fn content() -> Vec<ContentItem> {
    (0..12)
        .map(|i| {
            let day = 1 + i / 5;
            let kind = if i % 4 == 0 {
                ImageKind::Screenshot
            } else {
                ImageKind::Photo
            };
            ContentItem::new(format!("post-{i}"))
                .with_timestamp(format!("2024-05-{day:02}T{:02}:00:00Z", 8 + i % 10))
                .with_sentiment(((i % 5) as f32 - 2.0) / 2.0)
                .with_link(format!("https://example.com/posts/{i}"))
                .with_image(format!("https://img.example.com/{i}.jpg"), kind)
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = SessionConfig::default();
    config.schedule.seed = Some(7);
    config.partition.utc_offset_minutes = Some(0);
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        return;
    }

    let camera = SmoothCamera::new(Size::new(1920.0, 1080.0));
    let mut session: KioskSession<_, Resolution> = KioskSession::new(config, camera);
    session.set_items(content(), 0);
    session.start(0);

    let mut loader = SimLoader::default();
    let mut renderers = RendererSet::new(|_card: &CardDraw<'_, Resolution>| {});
    let mut lod = LinearLod::default();
    let mut last_mode = session.mode();
    let mut completed = 0_usize;

    let mut now = 0;
    while now <= RUN_MS {
        if now == 20_000 {
            let center = session.camera().world_to_screen(session.items()[3].bounds.center());
            session.pointer(PointerEvent::primary(center), now);
        }
        if now == 70_000 {
            let mut items = content();
            items.push(
                ContentItem::new("breaking")
                    .with_timestamp("2024-05-03T20:00:00Z")
                    .with_style("headline"),
            );
            let fresh = session.set_items(items, now);
            info!(fresh, "content refreshed");
        }

        session.tick(now);
        session.camera_mut().advance(FRAME_MS);
        session.render(&mut loader, &mut lod, &mut renderers);

        for url in std::mem::take(&mut loader.pending) {
            completed += 1;
            let result = if completed % 3 == 0 {
                Err(FetchError::Request("503 Service Unavailable".into()))
            } else {
                Ok(Resolution { width: 1_200 })
            };
            session.finish_fetch(&url, result);
        }

        let mode = session.mode();
        if mode != last_mode {
            match mode {
                Mode::Automatic(kiosk) => info!(at = now, ?kiosk, "automatic"),
                Mode::Manual(index) => info!(at = now, index, "manual"),
            }
            last_mode = mode;
        }
        now += FRAME_MS;
    }

    info!(
        fetches = loader.requested,
        failed = session.pipeline().in_flight().failed_count(),
        "simulation finished"
    );
}
