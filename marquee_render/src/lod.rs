// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use marquee_layout::ItemId;

/// Opacity below which renderers should skip text layout entirely.
pub const TEXT_OPACITY_EPSILON: f64 = 0.01;

/// Per-item level-of-detail factors for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodState {
    /// Fraction of the card height given to the image, in `[0, 1]`.
    pub image_height: f64,
    /// Opacity of the card's text, in `[0, 1]`.
    pub text_opacity: f64,
}

impl LodState {
    /// Full image, full text.
    pub const FULL: Self = Self {
        image_height: 1.0,
        text_opacity: 1.0,
    };

    /// Creates a state with both factors clamped into `[0, 1]`.
    ///
    /// NaN inputs map to `0`.
    #[must_use]
    pub fn new(image_height: f64, text_opacity: f64) -> Self {
        Self {
            image_height: unit(image_height),
            text_opacity: unit(text_opacity),
        }
    }

    /// Returns `false` when text is too faint to be worth laying out.
    #[must_use]
    pub fn draws_text(self) -> bool {
        self.text_opacity >= TEXT_OPACITY_EPSILON
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Source of LOD factors, keyed by item and on-screen width in pixels.
///
/// The pipeline only feeds inputs and forwards outputs; the curve belongs to
/// the implementor.
pub trait LodModel {
    /// LOD factors for `id` drawn `screen_width` pixels wide.
    fn lod(&mut self, id: &ItemId, screen_width: f64) -> LodState;
}

/// A stateless [`LodModel`] for hosts without one of their own.
///
/// Text fades in over `[text_start_px, text_end_px]` with a smoothstep, and
/// the image shrinks from full height to `min_image_height` as it does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearLod {
    /// Width at which text starts to appear.
    pub text_start_px: f64,
    /// Width at which text is fully opaque.
    pub text_end_px: f64,
    /// Image height fraction once text is fully shown.
    pub min_image_height: f64,
}

impl Default for LinearLod {
    fn default() -> Self {
        Self {
            text_start_px: 120.0,
            text_end_px: 240.0,
            min_image_height: 0.55,
        }
    }
}

impl LodModel for LinearLod {
    fn lod(&mut self, _id: &ItemId, screen_width: f64) -> LodState {
        let text = smoothstep(self.text_start_px, self.text_end_px, screen_width);
        let image = 1.0 - (1.0 - self.min_image_height) * text;
        LodState::new(image, text)
    }
}

fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use marquee_layout::ItemId;

    use super::{LinearLod, LodModel, LodState, smoothstep};

    #[test]
    fn factors_are_clamped() {
        let s = LodState::new(1.5, f64::NAN);
        assert_eq!(s, LodState::new(1.0, 0.0));
        assert!(!s.draws_text());
        assert!(LodState::FULL.draws_text());
    }

    #[test]
    fn linear_lod_fades_text_in() {
        let mut lod = LinearLod::default();
        let id = ItemId::new("a");
        let small = lod.lod(&id, 60.0);
        let mid = lod.lod(&id, 180.0);
        let large = lod.lod(&id, 600.0);

        assert_eq!(small, LodState::new(1.0, 0.0));
        assert!((mid.text_opacity - 0.5).abs() < 1e-12);
        assert_eq!(large.text_opacity, 1.0);
        assert!((large.image_height - 0.55).abs() < 1e-12);
        assert!(small.image_height > mid.image_height);
    }

    #[test]
    fn degenerate_ramp_is_a_step() {
        assert_eq!(smoothstep(10.0, 10.0, 9.0), 0.0);
        assert_eq!(smoothstep(10.0, 10.0, 10.0), 1.0);
    }
}
