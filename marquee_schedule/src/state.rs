// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;

use marquee_layout::ItemId;

use crate::config::Strategy;

/// Presentation mode of the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KioskMode {
    /// Whole content fitted into the viewport.
    Overview,
    /// Camera centered on the item at this index.
    Focused(usize),
}

impl KioskMode {
    /// Focused index, if any.
    #[must_use]
    pub fn focused(self) -> Option<usize> {
        match self {
            Self::Overview => None,
            Self::Focused(i) => Some(i),
        }
    }
}

/// Everything the scheduler's transition rules read and write.
///
/// Only [`KioskScheduler`](crate::KioskScheduler) mutates this; hosts observe
/// it through [`KioskScheduler::state`](crate::KioskScheduler::state).
#[derive(Clone, Debug, PartialEq)]
pub struct KioskState {
    pub(crate) mode: KioskMode,
    pub(crate) strategy: Strategy,
    pub(crate) shown_since_overview: usize,
    pub(crate) queue: VecDeque<ItemId>,
}

impl KioskState {
    pub(crate) fn new(mode: KioskMode, strategy: Strategy) -> Self {
        Self {
            mode,
            strategy,
            shown_since_overview: 0,
            queue: VecDeque::new(),
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> KioskMode {
        self.mode
    }

    /// Active selection strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Items shown since the last overview.
    #[must_use]
    pub fn shown_since_overview(&self) -> usize {
        self.shown_since_overview
    }

    /// Pending priority ids, head first.
    #[must_use]
    pub fn queue(&self) -> &VecDeque<ItemId> {
        &self.queue
    }
}
