// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashSet;
use kurbo::Size;
use marquee_camera::CameraTarget;
use marquee_layout::{ContentItem, ItemId, Partition};
use marquee_timing::Timer;
use tracing::{debug, trace};

use crate::config::{InitialMode, ScheduleConfig, Strategy};
use crate::state::{KioskMode, KioskState};
use crate::strategy::Selector;

/// What the scheduler needs to know about the canvas to compute targets.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Current item list, with geometry assigned.
    pub items: &'a [ContentItem],
    /// Partition the geometry came from.
    pub partition: &'a Partition,
    /// Viewport size in screen pixels.
    pub viewport: Size,
}

impl<'a> Scene<'a> {
    /// Bundles the inputs.
    #[must_use]
    pub fn new(items: &'a [ContentItem], partition: &'a Partition, viewport: Size) -> Self {
        Self {
            items,
            partition,
            viewport,
        }
    }
}

/// The automatic cycling state machine.
///
/// One [`Timer`] drives every transition; any change that matters cancels and
/// re-arms it, so at most one transition is pending at a time. While
/// suspended or disabled the timer is disarmed and nothing happens.
#[derive(Debug)]
pub struct KioskScheduler {
    config: ScheduleConfig,
    state: KioskState,
    timer: Timer,
    selector: Selector,
    known: HashSet<ItemId>,
    seeded: bool,
    suspended: bool,
    enabled: bool,
}

impl KioskScheduler {
    /// Creates an idle scheduler. Call [`KioskScheduler::start`] to begin cycling.
    #[must_use]
    pub fn new(config: ScheduleConfig) -> Self {
        let selector = Selector::new(config.seed, config.decay, config.exclude_current);
        let state = KioskState::new(KioskMode::Overview, config.strategy);
        Self {
            config,
            state,
            timer: Timer::new(),
            selector,
            known: HashSet::new(),
            seeded: false,
            suspended: false,
            enabled: true,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Enters the configured initial mode and arms the timer.
    pub fn start(&mut self, now: u64, scene: &Scene<'_>) -> Option<CameraTarget> {
        let (mode, shown) = match self.config.initial_mode {
            InitialMode::Overview => (KioskMode::Overview, 0),
            InitialMode::Focused => (KioskMode::Focused(0), 1),
        };
        self.state.mode = mode;
        self.state.shown_since_overview = shown;
        self.revalidate(scene.items.len());
        debug!(mode = ?self.state.mode, "kiosk started");
        self.rearm(now);
        self.running_target(scene)
    }

    /// Records the current item ids and queues the ones not seen before.
    ///
    /// New ids go to the front of the priority queue as one batch, keeping
    /// their order in `items`. The first non-empty list only seeds the known
    /// set, so content that arrives after [`KioskScheduler::start`] is not
    /// treated as new. Returns the number of ids queued.
    pub fn sync_items(&mut self, items: &[ContentItem]) -> usize {
        if !self.seeded {
            self.known = items.iter().map(|i| i.id.clone()).collect();
            self.seeded = !items.is_empty();
            return 0;
        }
        let fresh: Vec<ItemId> = items
            .iter()
            .filter(|i| !self.known.contains(&i.id))
            .map(|i| i.id.clone())
            .collect();
        for id in fresh.iter().rev() {
            self.state.queue.push_front(id.clone());
        }
        if !fresh.is_empty() {
            debug!(count = fresh.len(), "new items queued for priority display");
        }
        self.known = items.iter().map(|i| i.id.clone()).collect();
        fresh.len()
    }

    /// Queues `id` behind any pending priority ids.
    pub fn enqueue_priority(&mut self, id: impl Into<ItemId>) {
        self.state.queue.push_back(id.into());
    }

    /// Runs the pending transition if its deadline has passed.
    ///
    /// Returns the camera target for the new state.
    pub fn poll(&mut self, now: u64, scene: &Scene<'_>) -> Option<CameraTarget> {
        if !self.timer.poll(now) {
            return None;
        }
        self.revalidate(scene.items.len());
        self.advance(scene.items);
        trace!(
            mode = ?self.state.mode,
            shown = self.state.shown_since_overview,
            "kiosk transition"
        );
        self.rearm(now);
        self.target(scene)
    }

    /// Cancels the pending transition until [`KioskScheduler::resume`].
    pub fn suspend(&mut self) {
        if !self.suspended {
            debug!("kiosk suspended");
        }
        self.suspended = true;
        self.timer.cancel();
    }

    /// Lifts a suspension and continues from the last mode with a fresh timer.
    ///
    /// Returns a target back to that mode when the scheduler is now running.
    pub fn resume(&mut self, now: u64, scene: &Scene<'_>) -> Option<CameraTarget> {
        if !self.suspended {
            return None;
        }
        self.suspended = false;
        debug!(mode = ?self.state.mode, "kiosk resumed");
        self.revalidate(scene.items.len());
        self.rearm(now);
        self.running_target(scene)
    }

    /// Turns automatic cycling on or off.
    ///
    /// Disabling cancels the timer synchronously. Enabling resumes from the
    /// last mode unless a suspension is still in effect.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        now: u64,
        scene: &Scene<'_>,
    ) -> Option<CameraTarget> {
        if enabled == self.enabled {
            return None;
        }
        self.enabled = enabled;
        debug!(enabled, "kiosk mode toggled");
        self.revalidate(scene.items.len());
        self.rearm(now);
        self.running_target(scene)
    }

    /// Switches strategy, resets the cadence counter and returns focus to the
    /// first item.
    pub fn set_strategy(
        &mut self,
        strategy: Strategy,
        now: u64,
        scene: &Scene<'_>,
    ) -> Option<CameraTarget> {
        self.state.strategy = strategy;
        self.state.shown_since_overview = 0;
        self.state.mode = if scene.items.is_empty() {
            KioskMode::Overview
        } else {
            KioskMode::Focused(0)
        };
        debug!(?strategy, "kiosk strategy changed");
        self.rearm(now);
        self.running_target(scene)
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> KioskMode {
        self.state.mode
    }

    /// Full scheduler state.
    #[must_use]
    pub fn state(&self) -> &KioskState {
        &self.state
    }

    /// Returns `true` while a manual override holds the scheduler.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Returns `true` unless kiosk mode was disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Deadline of the pending transition.
    #[must_use]
    pub fn next_transition_at(&self) -> Option<u64> {
        self.timer.deadline()
    }

    fn is_running(&self) -> bool {
        self.enabled && !self.suspended
    }

    fn rearm(&mut self, now: u64) {
        if !self.is_running() {
            self.timer.cancel();
            return;
        }
        let delay = match self.state.mode {
            KioskMode::Overview => self.config.overview_duration_ms,
            KioskMode::Focused(_) => self.config.article_duration_ms,
        };
        self.timer.schedule(now, delay);
    }

    /// Keeps the focused index inside the current list.
    fn revalidate(&mut self, len: usize) {
        if let KioskMode::Focused(index) = self.state.mode {
            if len == 0 {
                debug!("item list emptied; falling back to overview");
                self.state.mode = KioskMode::Overview;
                self.state.shown_since_overview = 0;
            } else if index >= len {
                debug!(index, len, "focused index clamped");
                self.state.mode = KioskMode::Focused(len - 1);
            }
        }
    }

    fn advance(&mut self, items: &[ContentItem]) {
        if let Some(index) = self.pop_priority(items) {
            // Priority items do not count toward the overview cadence.
            if self.state.mode == KioskMode::Overview {
                self.state.shown_since_overview = 0;
            }
            self.state.mode = KioskMode::Focused(index);
            return;
        }
        let len = items.len();
        if len == 0 {
            self.state.mode = KioskMode::Overview;
            self.state.shown_since_overview = 0;
            return;
        }
        let strategy = self.state.strategy;
        match self.state.mode {
            KioskMode::Overview => {
                let index = self.selector.first(strategy, len);
                self.state.mode = KioskMode::Focused(index);
                self.state.shown_since_overview = 1;
            }
            KioskMode::Focused(_)
                if self.state.shown_since_overview >= self.config.articles_before_overview =>
            {
                self.state.mode = KioskMode::Overview;
                self.state.shown_since_overview = 0;
            }
            KioskMode::Focused(current) => {
                let index = self.selector.next(strategy, current, len);
                self.state.mode = KioskMode::Focused(index);
                self.state.shown_since_overview += 1;
            }
        }
    }

    /// Pops queued ids until one still exists in `items`.
    fn pop_priority(&mut self, items: &[ContentItem]) -> Option<usize> {
        while let Some(id) = self.state.queue.pop_front() {
            if let Some(index) = items.iter().position(|i| i.id == id) {
                debug!(%id, index, "showing priority item");
                return Some(index);
            }
            debug!(%id, "dropping priority item that is no longer present");
        }
        None
    }

    fn running_target(&self, scene: &Scene<'_>) -> Option<CameraTarget> {
        if self.is_running() {
            self.target(scene)
        } else {
            None
        }
    }

    fn target(&self, scene: &Scene<'_>) -> Option<CameraTarget> {
        let cfg = &self.config;
        match self.state.mode {
            KioskMode::Overview => Some(CameraTarget::fit(
                scene.partition.bounds(),
                scene.viewport,
                cfg.overview_fill,
                cfg.overview_vertical_bias,
                cfg.speed,
            )),
            KioskMode::Focused(index) => scene.items.get(index).map(|item| {
                CameraTarget::center_on(item.bounds, cfg.focus_scale, scene.viewport, cfg.speed)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use marquee_layout::{ContentItem, Partition};

    use super::{KioskScheduler, Scene};
    use crate::config::ScheduleConfig;
    use crate::state::KioskMode;

    fn items(n: usize) -> Vec<ContentItem> {
        (0..n).map(|i| ContentItem::new(i.to_string())).collect()
    }

    #[test]
    fn shrinking_list_clamps_focus() {
        let partition = Partition::default();
        let list = items(5);
        let mut s = KioskScheduler::new(ScheduleConfig::default());
        s.start(0, &Scene::new(&list, &partition, Size::new(800.0, 600.0)));
        s.state.mode = KioskMode::Focused(4);

        s.revalidate(2);
        assert_eq!(s.mode(), KioskMode::Focused(1));
        s.revalidate(0);
        assert_eq!(s.mode(), KioskMode::Overview);
    }

    #[test]
    fn stale_priority_ids_are_dropped() {
        let list = items(3);
        let mut s = KioskScheduler::new(ScheduleConfig::default());
        s.enqueue_priority("gone");
        s.enqueue_priority("2");
        assert_eq!(s.pop_priority(&list), Some(2));
        assert!(s.state().queue().is_empty());
    }
}
