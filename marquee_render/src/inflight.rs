// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::ToOwned;
use alloc::string::String;

use hashbrown::HashSet;

/// Bookkeeping for high-resolution fetches.
///
/// A URL is either idle, in flight, or failed. [`InFlightSet::try_begin`] is
/// the only way into the in-flight state and refuses URLs that are already
/// there or have failed, which caps outstanding fetches at one per URL and
/// keeps failed URLs from being retried on every frame.
#[derive(Clone, Debug, Default)]
pub struct InFlightSet {
    in_flight: HashSet<String>,
    failed: HashSet<String>,
}

impl InFlightSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` in flight. Returns `false` (and changes nothing) if it is
    /// already in flight or known to have failed.
    pub fn try_begin(&mut self, url: &str) -> bool {
        if self.failed.contains(url) || self.in_flight.contains(url) {
            return false;
        }
        self.in_flight.insert(url.to_owned())
    }

    /// Clears the in-flight marker after a successful fetch.
    ///
    /// Returns `false` if `url` was not in flight.
    pub fn finish(&mut self, url: &str) -> bool {
        self.in_flight.remove(url)
    }

    /// Clears the in-flight marker and records `url` as failed.
    pub fn fail(&mut self, url: &str) {
        self.in_flight.remove(url);
        self.failed.insert(url.to_owned());
    }

    /// Returns `true` while a fetch for `url` is outstanding.
    #[must_use]
    pub fn is_in_flight(&self, url: &str) -> bool {
        self.in_flight.contains(url)
    }

    /// Returns `true` if a fetch for `url` failed and was not retried.
    #[must_use]
    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// Forgets a failure so the next frame may fetch `url` again.
    ///
    /// Returns `true` if `url` had failed.
    pub fn retry_failed(&mut self, url: &str) -> bool {
        self.failed.remove(url)
    }

    /// Forgets failures for URLs that `keep` rejects.
    pub fn retain_failed(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.failed.retain(|url| keep(url));
    }

    /// Number of outstanding fetches.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Number of failed URLs.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}
