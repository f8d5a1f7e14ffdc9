//! Integration tests for the page motion layer
//!
//! These drive a mounted `PageSession` with host events and frames and check:
//! - The cursor converges on the pointer without unbounded overshoot
//! - Scroll mappings clamp and interpolate
//! - One-shot reveals ignore later visibility changes
//! - The overlay settles after open/close and rapid toggling
//! - Cursor variants follow enter/leave with last-entered-wins
//! - Loops are periodic in elapsed time
//! - Card accents resolve content color tokens, with a default for unknown ones

use nexus_core::Event;
use nexus_motion::{
    ContentTable, CursorVariant, Frame, LoopAnimator, MotionConfig, OverlayPhase, PageSession,
    Rgba, ScrollMapping,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn mount() -> PageSession {
    let mut session = PageSession::mount(MotionConfig::default(), ContentTable::default())
        .expect("default config is valid");
    session.handle_event(Event::resize(1280.0, 800.0));
    session
}

/// Run frames for `ms` starting after `now`, returning the last frame
fn run(session: &mut PageSession, now: &mut f64, ms: f64) -> Frame {
    let end = *now + ms;
    let mut last = session.frame(*now).expect("mounted");
    while *now < end {
        *now += FRAME_MS;
        last = session.frame(*now).expect("mounted");
    }
    last
}

#[test]
fn test_cursor_converges_on_pointer_within_overshoot_bound() {
    let mut session = mount();
    let mut now = 0.0;
    session.handle_event(Event::pointer_move(600.0, 300.0));

    let bound = MotionConfig::default().cursor.follow.overshoot_bound();
    let mut max_x: f32 = 0.0;
    let mut frame = run(&mut session, &mut now, 0.0);
    for _ in 0..180 {
        now += FRAME_MS;
        frame = session.frame(now).unwrap();
        max_x = max_x.max(frame.cursor.x + frame.cursor.width / 2.0);
    }

    let centre_x = frame.cursor.x + frame.cursor.width / 2.0;
    let centre_y = frame.cursor.y + frame.cursor.height / 2.0;
    assert!((centre_x - 600.0).abs() < 0.5);
    assert!((centre_y - 300.0).abs() < 0.5);
    assert!(max_x <= 600.0 + 600.0 * (bound + 0.02));
}

#[test]
fn test_backgrounded_tab_does_not_blow_up() {
    let mut session = mount();
    let mut now = 0.0;
    session.handle_event(Event::pointer_move(500.0, 500.0));
    run(&mut session, &mut now, 50.0);

    now += 600_000.0;
    let frame = session.frame(now).unwrap();
    assert!(frame.cursor.x.is_finite() && frame.cursor.y.is_finite());
    assert!(frame.cursor.x < 600.0);
}

#[test]
fn test_parallax_clamps_and_interpolates() {
    let mut session = mount();
    let mut now = 0.0;

    session.handle_event(Event::scroll(250.0));
    let frame = run(&mut session, &mut now, 0.0);
    let lime = &frame.parallax[0].properties;
    assert_eq!(lime.translate_y, Some(100.0));
    assert_eq!(lime.rotate, Some(22.5));

    session.handle_event(Event::scroll(5_000.0));
    let frame = run(&mut session, &mut now, FRAME_MS);
    assert_eq!(frame.parallax[0].properties.translate_y, Some(200.0));
    assert_eq!(frame.parallax[1].properties.translate_y, Some(-150.0));

    session.handle_event(Event::scroll(-80.0));
    let frame = run(&mut session, &mut now, FRAME_MS);
    assert_eq!(frame.parallax[0].properties.translate_y, Some(0.0));

    let mapping = ScrollMapping::new([0.0, 500.0], [0.0, 200.0]);
    assert_eq!(mapping.map(-1.0), mapping.map(0.0));
    assert_eq!(mapping.map(501.0), mapping.map(500.0));
}

#[test]
fn test_one_shot_reveal_is_inert_after_firing() {
    let mut session = mount();
    let mut now = 0.0;
    let card = session.target("project-0").unwrap();
    let reveal = session.reveal("project-0").unwrap();

    session.handle_event(Event::intersection(card, 0.4));
    assert!(session.reveals().has_fired(reveal));
    let frame = run(&mut session, &mut now, 1000.0);
    let shown = frame
        .reveals
        .iter()
        .find(|r| r.name == "project-0")
        .unwrap()
        .properties;
    assert_eq!(shown.opacity, Some(1.0));

    for fraction in [0.0, 1.0, 0.0, 0.7] {
        session.handle_event(Event::intersection(card, fraction));
    }
    let frame = run(&mut session, &mut now, 1000.0);
    let after = frame
        .reveals
        .iter()
        .find(|r| r.name == "project-0")
        .unwrap()
        .properties;
    assert_eq!(after, shown);
    assert_eq!(session.reveals().entry(reveal).unwrap().transitions_started(), 1);
    assert!(!session.reveals().is_observing(reveal));
}

#[test]
fn test_reveal_from_layout_and_scroll() {
    let mut session = mount();
    let mut now = 0.0;
    let bar = session.target("skill-bar").unwrap();
    let reveal = session.reveal("skill-bar").unwrap();

    session.handle_event(Event::layout(bar, 2_400.0, 40.0));
    run(&mut session, &mut now, FRAME_MS);
    assert!(!session.reveals().has_fired(reveal));

    session.handle_event(Event::scroll(1_800.0));
    run(&mut session, &mut now, 2_000.0);
    assert!(session.reveals().has_fired(reveal));
    assert_eq!(
        session.reveals().properties(reveal).unwrap().width_pct,
        Some(85.0)
    );
}

#[test]
fn test_overlay_open_then_close_ends_closed() {
    let mut session = mount();
    let mut now = 0.0;
    let open = session.target("menu-button").unwrap();
    let close = session.target("menu-close").unwrap();

    session.handle_event(Event::click(open));
    let frame = run(&mut session, &mut now, 2_000.0);
    assert_eq!(frame.overlay.phase, OverlayPhase::Open);
    assert_eq!(frame.overlay.items.len(), 5);

    session.handle_event(Event::click(close));
    let frame = run(&mut session, &mut now, 2_000.0);
    assert_eq!(frame.overlay.phase, OverlayPhase::Closed);
    assert!(!frame.overlay.visible);
    assert_eq!(session.overlay().state_machine().states().len(), 4);
}

#[test]
fn test_overlay_rapid_toggling_settles() {
    let mut session = mount();
    let mut now = 0.0;
    let open = session.target("menu-button").unwrap();
    let close = session.target("menu-close").unwrap();

    for i in 0..20 {
        let target = if i % 2 == 0 { open } else { close };
        session.handle_event(Event::click(target));
        run(&mut session, &mut now, 50.0);
    }
    let frame = run(&mut session, &mut now, 3_000.0);
    assert!(matches!(
        frame.overlay.phase,
        OverlayPhase::Open | OverlayPhase::Closed
    ));
}

#[test]
fn test_selecting_a_menu_item_closes_the_menu() {
    let mut session = mount();
    let mut now = 0.0;
    session.handle_event(Event::click(session.target("menu-button").unwrap()));
    run(&mut session, &mut now, 2_000.0);

    let item = session.target("menu-item-3").unwrap();
    session.handle_event(Event::pointer_enter(item));
    assert_eq!(session.cursor().variant(), CursorVariant::Text);
    session.handle_event(Event::click(item));
    assert_eq!(session.overlay().phase(), OverlayPhase::Closing);
    assert_eq!(session.overlay().selected_item(), Some(3));
}

#[test]
fn test_cursor_enter_leave() {
    let mut session = mount();
    let logo = session.target("logo").unwrap();

    session.handle_event(Event::pointer_enter(logo));
    assert_eq!(session.cursor().variant(), CursorVariant::Hover);
    session.handle_event(Event::pointer_leave(logo));
    assert_eq!(session.cursor().variant(), CursorVariant::Default);
}

#[test]
fn test_cursor_last_entered_wins() {
    let mut session = mount();
    let a = session.target("menu-button").unwrap();
    let b = session.target("menu-item-0").unwrap();

    session.handle_event(Event::pointer_enter(a));
    session.handle_event(Event::pointer_enter(b));
    assert_eq!(session.cursor().variant(), CursorVariant::Text);
    session.handle_event(Event::pointer_leave(b));
    assert_eq!(session.cursor().variant(), CursorVariant::Default);

    session.handle_event(Event::pointer_enter(a));
    session.handle_event(Event::pointer_enter(b));
    session.handle_event(Event::pointer_leave(a));
    assert_eq!(session.cursor().variant(), CursorVariant::Text);
}

#[test]
fn test_cursor_morph_shows_in_frames() {
    let mut session = mount();
    let mut now = 0.0;
    session.handle_event(Event::pointer_enter(session.target("insert-coin").unwrap()));
    let frame = run(&mut session, &mut now, 3_000.0);
    assert_eq!(frame.cursor.variant, CursorVariant::Hover);
    assert!((frame.cursor.scale - 2.5).abs() < 1e-3);
    assert!(frame.cursor.show_dot);
}

#[test]
fn test_loops_are_periodic_in_elapsed_time() {
    let mut session = mount();
    let mut now = 0.0;
    let frame = run(&mut session, &mut now, 1_234.0);

    let loops = LoopAnimator::page(&session.config().loops);
    assert_eq!(frame.loops, loops.sample(frame.elapsed_ms));
    for binding in loops.bindings() {
        let period = binding.timeline.duration_ms as f64;
        let a = binding.value_at(frame.elapsed_ms);
        let b = binding.value_at(frame.elapsed_ms + 3.0 * period);
        assert!((a - b).abs() < 1e-3, "{} drifted", binding.name);
    }
}

#[test]
fn test_frame_snapshot_is_consistent() {
    let mut session = mount();
    session.handle_event(Event::scroll(100.0));
    session.handle_event(Event::pointer_move(10.0, 20.0));
    let frame = session.frame(0.0).unwrap();
    assert_eq!(frame.scroll_y, 100.0);
    let y = frame.parallax[0].properties.translate_y.unwrap();
    assert!((y - 40.0).abs() < 1e-4);
    assert_eq!(frame.frame, 1);

    let json = serde_json::to_string(&frame).unwrap();
    assert!(json.contains("\"parallax\""));
}

#[test]
fn test_card_accents_reach_the_frame() {
    let mut content = ContentTable::default();
    content.projects[1].color = Some("bg-ultraviolet-950".to_string());
    let mut session = PageSession::mount(MotionConfig::default(), content).unwrap();
    let frame = session.frame(0.0).unwrap();

    let accent = |name: &str| {
        frame
            .reveals
            .iter()
            .find(|r| r.name == name)
            .and_then(|r| r.accent)
    };
    assert_eq!(accent("project-0"), Some(Rgba::from_hex(0x9333ea)));
    assert_eq!(accent("project-1"), Some(Rgba::BLACK));
    assert_eq!(accent("skill-2"), Some(Rgba::from_hex(0xf9a8d4)));
    assert_eq!(accent("skill-bar"), None);

    let json = serde_json::to_string(&frame.reveals).unwrap();
    assert!(json.contains("\"accent\""));
}

#[test]
fn test_unmount_ignores_later_input() {
    let mut session = mount();
    let scroll = session.scroll_signal();
    session.handle_event(Event::scroll(120.0));
    session.unmount();

    assert!(!scroll.is_live());
    assert!(!session.handle_event(Event::scroll(999.0)));
    assert_eq!(scroll.get(), 120.0);
    assert!(session.frame(100.0).is_none());
    assert!(!session.is_mounted());
}
