// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::ToOwned;
use alloc::string::String;

use hashbrown::{HashMap, HashSet};
use kurbo::{Rect, Size, Vec2};
use marquee_camera::{Camera, visible_world_rect};
use marquee_layout::{ContentItem, ImageKind};
use tracing::{trace, warn};

use crate::inflight::InFlightSet;
use crate::lod::LodModel;
use crate::renderer::{CardDraw, FetchError, ImageLoader, RendererSet, Resolution};

/// Options for [`RenderPipeline`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RenderConfig {
    /// Extra screen pixels kept around the viewport when culling.
    pub cull_margin: f64,
    /// Camera scale at and above which high-resolution images are requested.
    pub hi_res_threshold: f64,
    /// Fetch width for photos.
    pub photo_width: u32,
    /// Fetch width for screenshots.
    pub screenshot_width: u32,
    /// Style used by items without an explicit one.
    pub default_style: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cull_margin: 200.0,
            hi_res_threshold: 1.5,
            photo_width: 1_200,
            screenshot_width: 2_400,
            default_style: "standard".into(),
        }
    }
}

impl RenderConfig {
    /// Fetch resolution for an image of the given kind.
    #[must_use]
    pub fn resolution_for(&self, kind: ImageKind) -> Resolution {
        let width = match kind {
            ImageKind::Photo => self.photo_width,
            ImageKind::Screenshot => self.screenshot_width,
        };
        Resolution { width }
    }
}

/// Camera state a frame is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameView {
    /// Current scale.
    pub scale: f64,
    /// Current offset in screen pixels.
    pub offset: Vec2,
    /// Canvas size in screen pixels.
    pub viewport: Size,
}

impl FrameView {
    /// Captures the camera's current, possibly mid-animation, state.
    #[must_use]
    pub fn from_camera(camera: &impl Camera) -> Self {
        Self {
            scale: camera.scale(),
            offset: camera.offset(),
            viewport: camera.viewport(),
        }
    }

    /// World rectangle covered by the canvas.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        visible_world_rect(self.scale, self.offset, self.viewport)
    }

    /// Maps a world rectangle to screen space.
    #[must_use]
    pub fn to_screen(&self, rect: Rect) -> Rect {
        let min = rect.origin().to_vec2() * self.scale + self.offset;
        Rect::from_origin_size(min.to_point(), rect.size() * self.scale)
    }
}

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Items handed to a renderer.
    pub drawn: usize,
    /// Items skipped by culling.
    pub culled: usize,
    /// High-resolution fetches started this frame.
    pub fetches_started: usize,
    /// Drawn items that had no image available.
    pub missing_images: usize,
}

/// Per-frame coordination: culling, LOD forwarding, high-resolution fetch
/// deduplication and renderer dispatch.
///
/// The pipeline never issues camera commands. It owns the in-flight and
/// failed URL sets and the cache of completed high-resolution images.
#[derive(Debug)]
pub struct RenderPipeline<I> {
    config: RenderConfig,
    in_flight: InFlightSet,
    hi_res: HashMap<String, I>,
}

impl<I> RenderPipeline<I> {
    /// Creates a pipeline with empty caches.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            in_flight: InFlightSet::new(),
            hi_res: HashMap::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draws every item that intersects the view.
    ///
    /// At and above the hi-res threshold, visible items whose image is not
    /// cached, not in flight and not failed get exactly one fetch started.
    pub fn render_frame<L, M>(
        &mut self,
        view: &FrameView,
        items: &[ContentItem],
        loader: &mut L,
        lod: &mut M,
        renderers: &mut RendererSet<I>,
    ) -> FrameStats
    where
        L: ImageLoader<Image = I>,
        M: LodModel + ?Sized,
    {
        let mut stats = FrameStats::default();
        let margin = if view.scale > 0.0 {
            self.config.cull_margin / view.scale
        } else {
            0.0
        };
        let cull = view.visible_world_rect().inflate(margin, margin);
        let wants_hi_res = view.scale >= self.config.hi_res_threshold;

        for (index, item) in items.iter().enumerate() {
            if !intersects(item.bounds, cull) {
                stats.culled += 1;
                continue;
            }

            let url = item.image_url.as_deref();
            if wants_hi_res
                && let Some(url) = url
                && !self.hi_res.contains_key(url)
                && self.in_flight.try_begin(url)
            {
                loader.load(url, self.config.resolution_for(item.image_kind));
                stats.fetches_started += 1;
            }
            let image = url.and_then(|u| self.hi_res.get(u).or_else(|| loader.thumbnail(u)));
            if image.is_none() {
                stats.missing_images += 1;
            }

            let screen_bounds = view.to_screen(item.bounds);
            let factors = lod.lod(&item.id, screen_bounds.width());
            let style = item.style.as_deref().unwrap_or(&self.config.default_style);
            renderers.get_mut(style).render(&CardDraw {
                item,
                index,
                style,
                bounds: item.bounds,
                screen_bounds,
                image,
                lod: factors,
            });
            stats.drawn += 1;
        }

        trace!(
            drawn = stats.drawn,
            culled = stats.culled,
            fetches = stats.fetches_started,
            in_flight = self.in_flight.in_flight_count(),
            "frame rendered"
        );
        stats
    }

    /// Completes a fetch started by [`RenderPipeline::render_frame`].
    ///
    /// Success caches the image; failure records the URL so it is not
    /// fetched again until [`RenderPipeline::retry_failed`]. Completions for
    /// URLs that are not in flight are ignored.
    pub fn finish_fetch(&mut self, url: &str, result: Result<I, FetchError>) {
        if !self.in_flight.is_in_flight(url) {
            warn!(url, "ignoring completion for a fetch that is not in flight");
            return;
        }
        match result {
            Ok(image) => {
                self.in_flight.finish(url);
                self.hi_res.insert(url.to_owned(), image);
            }
            Err(err) => {
                warn!(url, %err, "high-resolution image fetch failed");
                self.in_flight.fail(url);
            }
        }
    }

    /// Allows a failed URL to be fetched again on the next frame.
    pub fn retry_failed(&mut self, url: &str) -> bool {
        self.in_flight.retry_failed(url)
    }

    /// Drops cached images and recorded failures whose URL no longer
    /// appears in `items`. Outstanding fetches are left to complete.
    pub fn prune(&mut self, items: &[ContentItem]) {
        let live: HashSet<&str> = items.iter().filter_map(|i| i.image_url.as_deref()).collect();
        self.hi_res.retain(|url, _| live.contains(url.as_str()));
        self.in_flight.retain_failed(|url| live.contains(url));
    }

    /// Cached high-resolution image for `url`.
    #[must_use]
    pub fn hi_res_image(&self, url: &str) -> Option<&I> {
        self.hi_res.get(url)
    }

    /// Fetch bookkeeping.
    #[must_use]
    pub fn in_flight(&self) -> &InFlightSet {
        &self.in_flight
    }
}

fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}
