// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::borrow::Borrow;
use core::fmt;

use kurbo::Rect;

/// Stable identity of a content item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content classification of an item's image, used to pick a fetch resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ImageKind {
    /// Ordinary photograph.
    #[default]
    Photo,
    /// Screenshot or other text-heavy capture that needs a wider fetch.
    Screenshot,
}

/// Coarse classification of a sentiment score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SentimentTone {
    /// Score at or below `-0.2`.
    Negative,
    /// Score strictly between the bands, or no score at all.
    Neutral,
    /// Score at or above `0.2`.
    Positive,
}

/// One card on the kiosk canvas.
///
/// Everything except [`ContentItem::bounds`] comes from the content source and
/// is never modified by the kiosk core. `bounds` is assigned by
/// [`ContentPartitioner`](crate::ContentPartitioner) on every recomputation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentItem {
    /// Stable identity.
    pub id: ItemId,
    /// Raw timestamp as supplied by the source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: Option<String>,
    /// Sentiment score in `-1.0..=1.0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sentiment: Option<f32>,
    /// Explicit card style overriding the global default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: Option<String>,
    /// External link opened on secondary action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub link: Option<String>,
    /// Image URL, if the card has one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_url: Option<String>,
    /// Classification of the image.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_kind: ImageKind,
    /// World-space geometry, owned by the partitioner.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub bounds: Rect,
}

impl ContentItem {
    /// Creates an item with only an id.
    #[must_use]
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            timestamp: None,
            sentiment: None,
            style: None,
            link: None,
            image_url: None,
            image_kind: ImageKind::Photo,
            bounds: Rect::ZERO,
        }
    }

    /// Sets the raw timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Sets the sentiment score.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: f32) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Sets the explicit style tag.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets the external link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the image URL and its classification.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>, kind: ImageKind) -> Self {
        self.image_url = Some(url.into());
        self.image_kind = kind;
        self
    }

    /// Classifies the sentiment score.
    #[must_use]
    pub fn sentiment_tone(&self) -> SentimentTone {
        match self.sentiment {
            Some(s) if s <= -0.2 => SentimentTone::Negative,
            Some(s) if s >= 0.2 => SentimentTone::Positive,
            _ => SentimentTone::Neutral,
        }
    }
}
