// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Render: per-frame coordination between the camera, the item set
//! and host-provided drawing.
//!
//! [`RenderPipeline::render_frame`] runs once per frame:
//! 1. Cull items whose bounds miss the visible world rectangle expanded by
//!    [`RenderConfig::cull_margin`].
//! 2. At or above [`RenderConfig::hi_res_threshold`], start at most one
//!    high-resolution fetch per URL through the host's [`ImageLoader`]. The
//!    [`InFlightSet`] refuses URLs that are in flight or have failed.
//! 3. Ask the host's [`LodModel`] for image-height and text-opacity factors.
//! 4. Resolve the card style (item override, else the default) and hand a
//!    [`CardDraw`] to the matching [`CardRenderer`] in a [`RendererSet`].
//!
//! Fetch completion re-enters through [`RenderPipeline::finish_fetch`]; a
//! failed URL stays failed until [`RenderPipeline::retry_failed`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size, Vec2};
//! use marquee_layout::ContentItem;
//! use marquee_render::{
//!     CardDraw, FrameView, ImageLoader, LinearLod, RenderConfig, RenderPipeline, RendererSet,
//!     Resolution,
//! };
//!
//! #[derive(Default)]
//! struct Loader {
//!     requested: Vec<String>,
//! }
//!
//! impl ImageLoader for Loader {
//!     type Image = ();
//!     fn thumbnail(&self, _url: &str) -> Option<&()> {
//!         None
//!     }
//!     fn load(&mut self, url: &str, _resolution: Resolution) {
//!         self.requested.push(url.into());
//!     }
//! }
//!
//! let mut card = ContentItem::new("a").with_image("https://img.example/a.jpg", Default::default());
//! card.bounds = Rect::new(0.0, 0.0, 100.0, 60.0);
//! let items = [card];
//!
//! let mut pipeline = RenderPipeline::new(RenderConfig::default());
//! let mut renderers = RendererSet::new(|_card: &CardDraw<'_, ()>| {});
//! let mut loader = Loader::default();
//! let view = FrameView { scale: 2.0, offset: Vec2::ZERO, viewport: Size::new(800.0, 600.0) };
//!
//! for _ in 0..3 {
//!     pipeline.render_frame(&view, &items, &mut loader, &mut LinearLod::default(), &mut renderers);
//! }
//! // Three frames, one fetch.
//! assert_eq!(loader.requested.len(), 1);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Its item model comes from
//! `marquee_layout`, which still needs `std` for date handling.

#![no_std]

extern crate alloc;

mod inflight;
mod lod;
mod pipeline;
mod renderer;

pub use inflight::InFlightSet;
pub use lod::{LinearLod, LodModel, LodState, TEXT_OPACITY_EPSILON};
pub use pipeline::{FrameStats, FrameView, RenderConfig, RenderPipeline};
pub use renderer::{CardDraw, CardRenderer, FetchError, ImageLoader, RendererSet, Resolution};
