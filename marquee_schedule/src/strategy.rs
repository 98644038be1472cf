// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index selection for the two strategies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Strategy;

/// Picks focused indices. Owns the random source so runs can be reproduced
/// from a seed.
#[derive(Debug)]
pub(crate) struct Selector {
    rng: StdRng,
    decay: f64,
    exclude_current: bool,
}

impl Selector {
    pub(crate) fn new(seed: Option<u64>, decay: f64, exclude_current: bool) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            rng,
            decay,
            exclude_current,
        }
    }

    /// Index to focus when leaving the overview.
    pub(crate) fn first(&mut self, strategy: Strategy, len: usize) -> usize {
        match strategy {
            Strategy::Sequential => 0,
            Strategy::WeightedRandom => self.weighted(len, None),
        }
    }

    /// Index to focus after `current`.
    pub(crate) fn next(&mut self, strategy: Strategy, current: usize, len: usize) -> usize {
        match strategy {
            Strategy::Sequential => sequential_next(current, len),
            Strategy::WeightedRandom => {
                let exclude = self.exclude_current.then_some(current);
                self.weighted(len, exclude)
            }
        }
    }

    fn weighted(&mut self, len: usize, exclude: Option<usize>) -> usize {
        let weights = decay_weights(len, self.decay, exclude);
        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return 0;
        }
        let mut draw = self.rng.r#gen::<f64>() * total;
        for (index, w) in weights.iter().enumerate() {
            if draw < *w {
                return index;
            }
            draw -= w;
        }
        // Rounding can leave a sliver past the last bucket.
        weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
    }
}

pub(crate) fn sequential_next(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// `exp(-decay * i)` per index. The excluded index gets zero weight unless it
/// is the only one.
fn decay_weights(len: usize, decay: f64, exclude: Option<usize>) -> Vec<f64> {
    (0..len)
        .map(|i| {
            if len > 1 && exclude == Some(i) {
                0.0
            } else {
                (-decay * i as f64).exp()
            }
        })
        .collect()
}
