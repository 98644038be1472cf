// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-effort repair of double-encoded external links.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

const RAW_MARKERS: [&str; 2] = ["https://", "http://"];
const ENCODED_MARKERS: [&str; 2] = ["https%3a%2f%2f", "http%3a%2f%2f"];

/// Normalizes an external link before it is opened.
///
/// Feeds sometimes wrap one absolute URL inside another, either verbatim
/// (`https://https://example.com`) or percent-encoded in a redirect query
/// (`https://t.example/?u=https%3A%2F%2Fexample.com`). The innermost URL is
/// extracted and decoded, `https://` is prefixed when no scheme is present,
/// and the result is validated.
///
/// When any step fails the input is returned unchanged, so navigation is
/// never blocked by a malformed link.
///
/// ```rust
/// use marquee_interaction::normalize_link;
///
/// assert_eq!(
///     normalize_link("https://news.example/https://example.com/story"),
///     "https://example.com/story",
/// );
/// assert_eq!(normalize_link("example.com/a"), "https://example.com/a");
/// assert_eq!(normalize_link("not a link"), "not a link");
/// ```
#[must_use]
pub fn normalize_link(raw: &str) -> String {
    match try_normalize(raw.trim()) {
        Some(link) => link,
        None => {
            debug!(link = raw, "link left as-is");
            raw.to_owned()
        }
    }
}

fn try_normalize(link: &str) -> Option<String> {
    if link.is_empty() {
        return None;
    }
    let candidate = extract_embedded(link).unwrap_or(Cow::Borrowed(link));
    let url = Url::parse(&candidate)
        .ok()
        .filter(Url::has_host)
        .or_else(|| {
            if candidate.contains(char::is_whitespace) {
                return None;
            }
            Url::parse(&format!("https://{candidate}"))
                .ok()
                .filter(|u| u.host_str().is_some_and(|h| h.contains('.')))
        })?;
    Some(url.into())
}

/// Finds the first absolute URL that starts after position zero.
fn extract_embedded(link: &str) -> Option<Cow<'_, str>> {
    let lower = link.to_ascii_lowercase();
    let first_after_start = |markers: &[&str]| {
        markers
            .iter()
            .filter_map(|m| lower.match_indices(m).map(|(i, _)| i).find(|&i| i > 0))
            .min()
    };
    let raw = first_after_start(&RAW_MARKERS[..]);
    let encoded = first_after_start(&ENCODED_MARKERS[..]);

    match (raw, encoded) {
        (Some(r), Some(e)) if r < e => Some(Cow::Borrowed(&link[r..])),
        (Some(r), None) => Some(Cow::Borrowed(&link[r..])),
        (_, Some(e)) => {
            let tail = &link[e..];
            // An encoded URL cannot contain a bare `&`; what follows belongs
            // to the outer query.
            let end = tail.find('&').unwrap_or(tail.len());
            percent_decode_str(&tail[..end]).decode_utf8().ok()
        }
        (None, None) => None,
    }
}
