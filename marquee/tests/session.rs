// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The session wiring: manual override against the scheduler, new-item
//! priority, the snap guard and configuration loading.

use kurbo::{Size, Vec2};
use marquee::camera::{Camera, CameraTarget, SmoothCamera};
use marquee::interaction::PointerEvent;
use marquee::layout::{ContentItem, PartitionConfig};
use marquee::render::{CardDraw, ImageLoader, LinearLod, RendererSet, Resolution};
use marquee::schedule::{KioskMode, Strategy};
use marquee::{ConfigError, KioskSession, Mode, SessionConfig};

const VIEW: Size = Size::new(800.0, 600.0);

fn config() -> SessionConfig {
    let mut config = SessionConfig {
        partition: PartitionConfig {
            item_width: 100.0,
            item_height: 50.0,
            item_gap: 10.0,
            group_gap: 40.0,
            header_size: 30.0,
            utc_offset_minutes: Some(0),
            ..PartitionConfig::default()
        },
        ..SessionConfig::default()
    };
    config.schedule.overview_duration_ms = 500;
    config.schedule.article_duration_ms = 1_000;
    config.schedule.focus_scale = 2.0;
    config.manual.inactivity_timeout_ms = 10_000;
    config
}

fn item(id: &str, hour: u32) -> ContentItem {
    ContentItem::new(id).with_timestamp(format!("2024-05-01T{hour:02}:00:00Z"))
}

/// Three cards stacked in one day cell:
/// a at y 30..80, b at y 90..140, c at y 150..200, all at x 0..100.
fn items() -> Vec<ContentItem> {
    vec![item("a", 9), item("b", 10), item("c", 11)]
}

fn session_with(config: SessionConfig) -> KioskSession<SmoothCamera, ()> {
    let mut session = KioskSession::new(config, SmoothCamera::new(VIEW));
    session.set_items(items(), 0);
    session.start(0);
    session
}

fn session() -> KioskSession<SmoothCamera, ()> {
    session_with(config())
}

#[test]
fn start_focuses_the_first_item() {
    let session = session();
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(0)));
    let expected = CameraTarget::center_on(session.items()[0].bounds, 2.0, VIEW, 1.0);
    assert_eq!(session.camera().target(), expected);
}

#[test]
fn click_takes_over_until_the_inactivity_timeout() {
    let mut session = session();

    // The camera has not moved yet, so screen and world coincide.
    assert_eq!(session.pointer(PointerEvent::primary((50.0, 115.0)), 200), None);
    assert_eq!(session.mode(), Mode::Manual(1));
    assert!(session.scheduler().is_suspended());
    assert_eq!(session.scheduler().next_transition_at(), None);
    // 100px card in an 800px viewport at 80% fill.
    assert!((session.camera().target_scale() - 6.4).abs() < 1e-9);

    assert_eq!(session.tick(5_000), None);
    assert_eq!(session.tick(10_199), None);
    assert_eq!(session.mode(), Mode::Manual(1));

    let resumed = session.tick(10_200);
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(0)));
    assert_eq!(
        resumed,
        Some(CameraTarget::center_on(session.items()[0].bounds, 2.0, VIEW, 1.0))
    );
    assert_eq!(session.scheduler().next_transition_at(), Some(11_200));

    session.tick(11_200);
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(1)));
}

#[test]
fn new_items_are_shown_at_the_next_transition() {
    let mut session = session();
    let mut next = items();
    next.push(item("d", 12));

    assert_eq!(session.set_items(next, 500), 1);
    session.tick(1_000);
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(3)));
    assert_eq!(session.items()[3].id.as_str(), "d");
}

#[test]
fn re_enabling_kiosk_mode_exits_manual_mode_at_once() {
    let mut session = session();
    session.pointer(PointerEvent::primary((50.0, 55.0)), 100);
    assert_eq!(session.mode(), Mode::Manual(0));

    assert_eq!(session.set_kiosk_enabled(false, 300), None);
    assert_eq!(session.mode(), Mode::Manual(0));

    let target = session.set_kiosk_enabled(true, 400);
    assert!(target.is_some());
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(0)));
    assert_eq!(session.manual().inactivity_deadline(), None);
    assert_eq!(session.scheduler().next_transition_at(), Some(1_400));
}

#[test]
fn enabling_an_enabled_kiosk_still_ends_manual_mode() {
    let mut session = session();
    session.pointer(PointerEvent::primary((50.0, 175.0)), 100);
    assert_eq!(session.mode(), Mode::Manual(2));

    assert!(session.set_kiosk_enabled(true, 400).is_some());
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(0)));
}

#[test]
fn secondary_press_returns_the_normalized_link() {
    let mut session = KioskSession::<_, ()>::new(config(), SmoothCamera::new(VIEW));
    session.set_items(vec![item("a", 9).with_link("example.com/story")], 0);
    session.start(0);
    session.camera_mut().jump_to(CameraTarget::new(1.0, Vec2::ZERO, 1.0));

    let link = session.pointer(PointerEvent::secondary((50.0, 55.0)), 100);
    assert_eq!(link.as_deref(), Some("https://example.com/story"));
    assert!(matches!(session.mode(), Mode::Automatic(_)), "links do not take over");
}

#[test]
fn removing_the_selected_item_ends_manual_mode() {
    let mut session = session();
    session.pointer(PointerEvent::primary((50.0, 175.0)), 100);
    assert_eq!(session.mode(), Mode::Manual(2));

    session.set_items(vec![item("a", 9)], 200);
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(0)));
    assert!(!session.scheduler().is_suspended());
}

#[test]
fn selection_is_tracked_by_id_across_refreshes() {
    let mut session = session();
    let mut four = items();
    four.push(item("d", 12));
    session.set_items(four, 0);

    let c = session.items()[2].bounds.center();
    session.pointer(PointerEvent::primary(c), 100);
    assert_eq!(session.mode(), Mode::Manual(2));

    // "a" goes away: "c" is now at index 1 and still selected.
    session.set_items(vec![item("b", 10), item("c", 11), item("d", 12)], 200);
    assert_eq!(session.mode(), Mode::Manual(1));

    // Same length as before, but "c" is gone.
    let swapped = vec![item("a", 9), item("b", 10), item("d", 12), item("e", 13)];
    session.set_items(swapped, 300);
    assert!(matches!(session.mode(), Mode::Automatic(_)));
    assert!(!session.manual().is_manual());
    assert!(!session.scheduler().is_suspended());
}

#[test]
fn first_content_after_an_empty_start_is_not_queued() {
    let mut session = KioskSession::<_, ()>::new(config(), SmoothCamera::new(VIEW));
    assert_eq!(session.set_items(Vec::new(), 0), 0);
    session.start(0);

    let six = (0..6).map(|i| item(&format!("late-{i}"), 9 + i)).collect();
    assert_eq!(session.set_items(six, 100), 0);
    assert!(session.scheduler().state().queue().is_empty());

    let mut seven = session.items().to_vec();
    seven.push(item("later", 16));
    assert_eq!(session.set_items(seven, 200), 1);
}

#[test]
fn drifting_off_content_snaps_back() {
    let mut config = config();
    config.schedule.article_duration_ms = 60_000;
    let mut session = session_with(config);
    session
        .camera_mut()
        .jump_to(CameraTarget::new(1.0, Vec2::new(-5_000.0, 0.0), 1.0));

    // Nearest member to the view's vertical center (y = 300) is c.
    let snapped = session.tick(100);
    assert_eq!(
        snapped,
        Some(CameraTarget::center_on(session.items()[2].bounds, 1.0, VIEW, 1.0))
    );
    assert!(session.snap().is_correcting(100));
    assert_eq!(session.tick(200), None, "settling");
}

#[test]
fn recent_input_holds_the_snap_guard_off() {
    let mut config = config();
    config.schedule.article_duration_ms = 60_000;
    let mut session = session_with(config);
    session
        .camera_mut()
        .jump_to(CameraTarget::new(1.0, Vec2::new(-5_000.0, 0.0), 1.0));

    session.record_activity(100);
    assert_eq!(session.tick(500), None);
    assert!(session.tick(1_100).is_some());
}

#[test]
fn strategy_changes_restart_from_the_first_item() {
    let mut session = session();
    session.tick(1_000);
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(1)));

    assert!(session.set_strategy(Strategy::WeightedRandom, 1_200).is_some());
    assert_eq!(session.mode(), Mode::Automatic(KioskMode::Focused(0)));
    assert_eq!(session.scheduler().state().shown_since_overview(), 0);
    assert_eq!(session.scheduler().next_transition_at(), Some(2_200));
}

#[test]
fn render_draws_what_the_camera_sees() {
    struct NoImages;
    impl ImageLoader for NoImages {
        type Image = ();
        fn thumbnail(&self, _url: &str) -> Option<&()> {
            None
        }
        fn load(&mut self, _url: &str, _resolution: Resolution) {}
    }

    let mut session = session();
    session
        .camera_mut()
        .jump_to(CameraTarget::new(1.0, Vec2::ZERO, 1.0));
    let mut renderers = RendererSet::new(|_card: &CardDraw<'_, ()>| {});
    let stats = session.render(&mut NoImages, &mut LinearLod::default(), &mut renderers);
    assert_eq!(stats.drawn, 3);
    assert_eq!(stats.culled, 0);
    assert_eq!(stats.fetches_started, 0);
}

#[test]
fn config_loads_from_json_with_defaults() {
    let json = r#"{
        "schedule": { "article_duration_ms": 2500, "strategy": "weighted_random" },
        "manual": { "inactivity_timeout_ms": 45000 },
        "partition": { "orientation": "vertical" }
    }"#;
    let config: SessionConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.schedule.article_duration_ms, 2_500);
    assert_eq!(config.schedule.strategy, Strategy::WeightedRandom);
    assert_eq!(config.manual.inactivity_timeout_ms, 45_000);
    assert_eq!(
        config.schedule.overview_duration_ms,
        SessionConfig::default().schedule.overview_duration_ms
    );
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn validation_names_the_offending_field() {
    let mut config = config();
    config.partition.max_per_group = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::Zero("partition.max_per_group"))
    );
}
