// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use marquee_interaction::{OverrideConfig, SnapConfig};
use marquee_layout::PartitionConfig;
use marquee_render::RenderConfig;
use marquee_schedule::ScheduleConfig;

/// A configuration value that cannot drive a session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A duration or count that must be positive is zero.
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
    /// A numeric option is outside its valid range or not finite.
    #[error("`{field}` must be in {range}, got {value}")]
    OutOfRange {
        /// Dotted path of the option.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Human-readable valid range.
        range: &'static str,
    },
}

/// Options for every component of a [`KioskSession`](crate::KioskSession).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SessionConfig {
    /// Day bucketing and geometry.
    pub partition: PartitionConfig,
    /// Automatic cycling.
    pub schedule: ScheduleConfig,
    /// Manual override.
    pub manual: OverrideConfig,
    /// Snap-to-content guard.
    pub snap: SnapConfig,
    /// Render coordination.
    pub render: RenderConfig,
}

impl SessionConfig {
    /// Checks values the components cannot work with.
    ///
    /// Components never panic on bad values; they degrade instead. This
    /// catches the mistakes that would make them degrade silently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.schedule;
        non_zero("schedule.overview_duration_ms", s.overview_duration_ms)?;
        non_zero("schedule.article_duration_ms", s.article_duration_ms)?;
        non_zero(
            "schedule.articles_before_overview",
            s.articles_before_overview as u64,
        )?;
        positive("schedule.focus_scale", s.focus_scale)?;
        positive("schedule.speed", s.speed)?;
        unit_interval("schedule.overview_fill", s.overview_fill)?;
        if !(s.decay.is_finite() && s.decay >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "schedule.decay",
                value: s.decay,
                range: "[0, inf)",
            });
        }

        let p = &self.partition;
        non_zero("partition.max_per_group", p.max_per_group as u64)?;
        positive("partition.item_width", p.item_width)?;
        positive("partition.item_height", p.item_height)?;

        non_zero("manual.inactivity_timeout_ms", self.manual.inactivity_timeout_ms)?;
        unit_interval("manual.focus_fill", self.manual.focus_fill)?;
        positive("manual.speed", self.manual.speed)?;

        positive("snap.speed", self.snap.speed)?;

        positive("render.hi_res_threshold", self.render.hi_res_threshold)?;
        non_zero("render.photo_width", u64::from(self.render.photo_width))?;
        non_zero("render.screenshot_width", u64::from(self.render.screenshot_width))?;
        if !(self.render.cull_margin.is_finite() && self.render.cull_margin >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "render.cull_margin",
                value: self.render.cull_margin,
                range: "[0, inf)",
            });
        }
        Ok(())
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Zero(field))
    } else {
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "(0, inf)",
        })
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "(0, 1]",
        })
    }
}
