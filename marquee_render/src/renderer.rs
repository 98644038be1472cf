// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Rect;
use marquee_layout::ContentItem;

use crate::lod::LodState;

/// Width of a high-resolution fetch, chosen from the image classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Target width in pixels.
    pub width: u32,
}

/// Why a high-resolution fetch failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The transport reported an error.
    #[error("image request failed: {0}")]
    Request(String),
    /// The response could not be decoded into an image.
    #[error("image could not be decoded: {0}")]
    Decode(String),
    /// The request was abandoned before it completed.
    #[error("image request was cancelled")]
    Cancelled,
}

/// Host-side image access.
///
/// `load` starts an asynchronous fetch and returns immediately; the host
/// reports completion through
/// [`RenderPipeline::finish_fetch`](crate::RenderPipeline::finish_fetch).
/// Calling it twice for one URL is harmless but wasteful, and the pipeline
/// never does so while a fetch is outstanding.
pub trait ImageLoader {
    /// Decoded image handle.
    type Image;

    /// Low-resolution image for `url`, if one is already available.
    fn thumbnail(&self, url: &str) -> Option<&Self::Image>;

    /// Starts a high-resolution fetch of `url`.
    fn load(&mut self, url: &str, resolution: Resolution);
}

/// Everything a card renderer gets for one visible item.
#[derive(Debug)]
pub struct CardDraw<'a, I> {
    /// The item being drawn.
    pub item: &'a ContentItem,
    /// Index of the item in the frame's item slice.
    pub index: usize,
    /// Effective style tag.
    pub style: &'a str,
    /// World-space bounds.
    pub bounds: Rect,
    /// Screen-space bounds under the frame's camera.
    pub screen_bounds: Rect,
    /// Best image available, high resolution first.
    pub image: Option<&'a I>,
    /// LOD factors for this frame.
    pub lod: LodState,
}

/// Draws one card. How pixels are produced is up to the implementor.
///
/// Implementors should skip text layout when
/// [`LodState::draws_text`] is `false`.
pub trait CardRenderer<I> {
    /// Draws `card`.
    fn render(&mut self, card: &CardDraw<'_, I>);
}

impl<I, F> CardRenderer<I> for F
where
    F: FnMut(&CardDraw<'_, I>),
{
    fn render(&mut self, card: &CardDraw<'_, I>) {
        self(card);
    }
}

/// Card renderers keyed by style tag, with a fallback for unknown styles.
pub struct RendererSet<I> {
    by_style: HashMap<String, Box<dyn CardRenderer<I>>>,
    fallback: Box<dyn CardRenderer<I>>,
}

impl<I> RendererSet<I> {
    /// Creates a set that sends every style to `fallback`.
    #[must_use]
    pub fn new(fallback: impl CardRenderer<I> + 'static) -> Self {
        Self {
            by_style: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Registers `renderer` for `style`, replacing any previous one.
    pub fn insert(&mut self, style: impl Into<String>, renderer: impl CardRenderer<I> + 'static) {
        self.by_style.insert(style.into(), Box::new(renderer));
    }

    /// Builder form of [`RendererSet::insert`].
    #[must_use]
    pub fn with(mut self, style: impl Into<String>, renderer: impl CardRenderer<I> + 'static) -> Self {
        self.insert(style, renderer);
        self
    }

    /// Returns `true` if `style` has its own renderer.
    #[must_use]
    pub fn contains(&self, style: &str) -> bool {
        self.by_style.contains_key(style)
    }

    /// Renderer for `style`, or the fallback.
    pub fn get_mut(&mut self, style: &str) -> &mut dyn CardRenderer<I> {
        match self.by_style.get_mut(style) {
            Some(renderer) => renderer.as_mut(),
            None => self.fallback.as_mut(),
        }
    }
}

impl<I> fmt::Debug for RendererSet<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut styles: Vec<&str> = self.by_style.keys().map(String::as_str).collect();
        styles.sort_unstable();
        f.debug_struct("RendererSet").field("styles", &styles).finish_non_exhaustive()
    }
}
