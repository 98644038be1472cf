// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How the next focused item is chosen when no priority item is pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Strategy {
    /// Cyclic linear traversal: `(current + 1) mod len`.
    #[default]
    Sequential,
    /// Draw proportional to `exp(-decay * index)`, favouring index 0 (newest).
    WeightedRandom,
}

/// Mode the scheduler enters on [`start`](crate::KioskScheduler::start).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum InitialMode {
    /// Start on the content overview.
    Overview,
    /// Start focused on the first item.
    #[default]
    Focused,
}

/// Options for [`KioskScheduler`](crate::KioskScheduler).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScheduleConfig {
    /// Time spent on the overview before focusing an item.
    pub overview_duration_ms: u64,
    /// Time spent on each focused item.
    pub article_duration_ms: u64,
    /// Items shown between two overviews.
    pub articles_before_overview: usize,
    /// Selection strategy at start-up.
    pub strategy: Strategy,
    /// Decay constant of the weighted-random strategy.
    pub decay: f64,
    /// Never let the weighted-random strategy pick the item already shown.
    pub exclude_current: bool,
    /// Mode entered by `start`.
    pub initial_mode: InitialMode,
    /// Scale used when focusing an item.
    pub focus_scale: f64,
    /// Fraction of the viewport the overview fills.
    pub overview_fill: f64,
    /// Vertical shift of the overview in viewport heights.
    pub overview_vertical_bias: f64,
    /// Camera speed factor for scheduler targets.
    pub speed: f64,
    /// Seed for the weighted-random strategy. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            overview_duration_ms: 8_000,
            article_duration_ms: 12_000,
            articles_before_overview: 5,
            strategy: Strategy::Sequential,
            decay: 0.15,
            exclude_current: false,
            initial_mode: InitialMode::Focused,
            focus_scale: 1.75,
            overview_fill: 0.9,
            overview_vertical_bias: 0.05,
            speed: 1.0,
            seed: None,
        }
    }
}
