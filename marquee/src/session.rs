// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Affine;
use marquee_camera::{Camera, CameraTarget};
use marquee_interaction::{
    ManualOverrideController, OverrideAction, PointerEvent, SnapToContentGuard,
};
use marquee_layout::{ContentItem, ContentPartitioner, Partition};
use marquee_render::{
    FetchError, FrameStats, FrameView, ImageLoader, LodModel, RenderPipeline, RendererSet,
};
use marquee_schedule::{KioskMode, KioskScheduler, Scene, Strategy};
use tracing::{debug, info};

use crate::config::SessionConfig;

/// Who is driving the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The scheduler, in the given mode.
    Automatic(KioskMode),
    /// A visitor, who selected the given item.
    Manual(usize),
}

/// One kiosk presentation: items, their layout, and every component that
/// acts on them, wired to a single camera.
///
/// All methods take the host's monotonic time in milliseconds. Call
/// [`KioskSession::tick`] on every host tick and [`KioskSession::render`] on
/// every frame.
#[derive(Debug)]
pub struct KioskSession<C, I> {
    camera: C,
    partitioner: ContentPartitioner,
    items: Vec<ContentItem>,
    partition: Partition,
    scheduler: KioskScheduler,
    manual: ManualOverrideController,
    snap: SnapToContentGuard,
    pipeline: RenderPipeline<I>,
}

impl<C: Camera, I> KioskSession<C, I> {
    /// Creates a session with no items. Automatic cycling begins at
    /// [`KioskSession::start`].
    #[must_use]
    pub fn new(config: SessionConfig, camera: C) -> Self {
        let SessionConfig {
            partition,
            schedule,
            manual,
            snap,
            render,
        } = config;
        Self {
            camera,
            partitioner: ContentPartitioner::new(partition),
            items: Vec::new(),
            partition: Partition::default(),
            scheduler: KioskScheduler::new(schedule),
            manual: ManualOverrideController::new(manual),
            snap: SnapToContentGuard::new(snap),
            pipeline: RenderPipeline::new(render),
        }
    }

    /// Starts automatic cycling.
    pub fn start(&mut self, now: u64) -> Option<CameraTarget> {
        let scene = Scene::new(&self.items, &self.partition, self.camera.viewport());
        let target = self.scheduler.start(now, &scene);
        info!(items = self.items.len(), "kiosk session started");
        self.apply(target)
    }

    /// Replaces the item list.
    ///
    /// Geometry is recomputed and new ids are queued for priority display
    /// before this returns, so the next transition already sees them. A
    /// visitor's selection follows its item id; manual mode ends if that id
    /// is gone. Returns the number of newly queued ids.
    pub fn set_items(&mut self, mut items: Vec<ContentItem>, now: u64) -> usize {
        self.partition = self.partitioner.partition(&mut items);
        self.items = items;
        let fresh = self.scheduler.sync_items(&self.items);
        self.pipeline.prune(&self.items);

        if self.manual.sync_items(&self.items) {
            debug!("leaving manual mode after refresh");
            self.resume_automatic(now);
        }
        fresh
    }

    /// Advances every timer-driven component.
    ///
    /// The inactivity timeout runs first, then the scheduler, then the snap
    /// guard. Returns the last target applied to the camera.
    pub fn tick(&mut self, now: u64) -> Option<CameraTarget> {
        let mut applied = None;
        if self.manual.poll(now) {
            applied = self.resume_automatic(now).or(applied);
        }

        let scene = Scene::new(&self.items, &self.partition, self.camera.viewport());
        let scheduled = self.scheduler.poll(now, &scene);
        applied = self.apply(scheduled).or(applied);

        let snapped = self
            .snap
            .check(now, &self.camera, &self.items, &self.partition);
        self.apply(snapped).or(applied)
    }

    /// Handles a pointer press. Returns a link the host should open.
    pub fn pointer(&mut self, event: PointerEvent, now: u64) -> Option<String> {
        self.snap.record_interaction(now);
        match self.manual.on_pointer(event, now, &self.camera, &self.items) {
            OverrideAction::None => None,
            OverrideAction::Focus { target, .. } => {
                self.scheduler.suspend();
                self.camera.set_target(target);
                None
            }
            OverrideAction::OpenLink(link) => Some(link),
        }
    }

    /// Notes non-press input such as panning or wheel zooming.
    pub fn record_activity(&mut self, now: u64) {
        self.snap.record_interaction(now);
        self.manual.record_activity(now);
    }

    /// Turns automatic cycling on or off.
    ///
    /// Turning it on while a visitor is in control ends manual mode at once.
    pub fn set_kiosk_enabled(&mut self, enabled: bool, now: u64) -> Option<CameraTarget> {
        let mut applied = None;
        if enabled && self.manual.exit_manual() {
            applied = self.resume_automatic(now);
        }
        let scene = Scene::new(&self.items, &self.partition, self.camera.viewport());
        let target = self.scheduler.set_enabled(enabled, now, &scene);
        self.apply(target).or(applied)
    }

    /// Changes the selection strategy and restarts the cadence.
    pub fn set_strategy(&mut self, strategy: Strategy, now: u64) -> Option<CameraTarget> {
        let scene = Scene::new(&self.items, &self.partition, self.camera.viewport());
        let target = self.scheduler.set_strategy(strategy, now, &scene);
        self.apply(target)
    }

    /// Sets the decorative transform applied to the canvas element.
    pub fn set_canvas_transform(&mut self, transform: Option<Affine>) {
        self.manual.set_canvas_transform(transform);
    }

    /// Draws one frame with the camera's current state.
    pub fn render<L, M>(
        &mut self,
        loader: &mut L,
        lod: &mut M,
        renderers: &mut RendererSet<I>,
    ) -> FrameStats
    where
        L: ImageLoader<Image = I>,
        M: LodModel + ?Sized,
    {
        let view = FrameView::from_camera(&self.camera);
        self.pipeline
            .render_frame(&view, &self.items, loader, lod, renderers)
    }

    /// Completes a high-resolution fetch started during [`KioskSession::render`].
    pub fn finish_fetch(&mut self, url: &str, result: Result<I, FetchError>) {
        self.pipeline.finish_fetch(url, result);
    }

    /// Who is driving the camera.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self.manual.selected_index(&self.items) {
            Some(index) => Mode::Manual(index),
            None => Mode::Automatic(self.scheduler.mode()),
        }
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// The camera, for animation and viewport updates.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Current items with their assigned bounds.
    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Layout of the current items.
    #[must_use]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// The automatic scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &KioskScheduler {
        &self.scheduler
    }

    /// The manual override controller.
    #[must_use]
    pub fn manual(&self) -> &ManualOverrideController {
        &self.manual
    }

    /// The snap-to-content guard.
    #[must_use]
    pub fn snap(&self) -> &SnapToContentGuard {
        &self.snap
    }

    /// The render pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &RenderPipeline<I> {
        &self.pipeline
    }

    /// Mutable render pipeline, for retrying failed URLs.
    pub fn pipeline_mut(&mut self) -> &mut RenderPipeline<I> {
        &mut self.pipeline
    }

    fn resume_automatic(&mut self, now: u64) -> Option<CameraTarget> {
        let scene = Scene::new(&self.items, &self.partition, self.camera.viewport());
        let target = self.scheduler.resume(now, &scene);
        self.apply(target)
    }

    fn apply(&mut self, target: Option<CameraTarget>) -> Option<CameraTarget> {
        if let Some(target) = target {
            self.camera.set_target(target);
        }
        target
    }
}
