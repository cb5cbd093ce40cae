//! Pointer streams replayed through a desk with several panels.

use floatpane_core::{
    AxisRule, Desk, DragStatus, Edge, PanelConfig, PanelEvent, PanelId, PointerEvent,
};
use kurbo::{Point, Size, Vec2};

const EPS: f64 = 1e-9;

fn config_at(x: f64, y: f64) -> PanelConfig {
    PanelConfig::default()
        .with_position(Point::new(x, y))
        .with_min_size(Size::new(100.0, 100.0))
}

fn events_for(events: &[(PanelId, PanelEvent<u8>)], id: PanelId) -> Vec<PanelEvent<u8>> {
    events
        .iter()
        .filter(|(owner, _)| *owner == id)
        .map(|(_, event)| event.clone())
        .collect()
}

#[test]
fn test_move_round_trip_through_desk() {
    let mut desk = Desk::new();
    let (id, el) = desk.add_panel(&config_at(50.0, 50.0), 1u8);
    let press = Point::new(100.0, 100.0);

    desk.dispatch(&PointerEvent::down(el.header, press));
    let path = [
        Point::new(101.0, 99.0),
        Point::new(140.0, 160.0),
        Point::new(70.0, 20.0),
        Point::new(130.0, 90.0),
    ];
    for p in path {
        let events = desk.dispatch(&PointerEvent::moved(p));
        let expected = Point::new(50.0, 50.0) + (p - press);
        let moving = PanelEvent::Moving {
            position: expected,
            data: 1,
        };
        assert_eq!(events, vec![(id, moving)]);
        assert_eq!(desk.panel(id).unwrap().position(), Point::new(50.0, 50.0));
    }

    desk.dispatch(&PointerEvent::up(Point::new(130.0, 90.0)));
    let panel = desk.panel(id).unwrap();
    assert_eq!(panel.position(), Point::new(80.0, 40.0));
    assert_eq!(panel.geometry().offset, Vec2::ZERO);
    assert!(!desk.is_dragging());
}

#[test]
fn test_left_resize_keeps_right_edge_fixed() {
    let mut desk = Desk::new();
    let (id, el) = desk.add_panel(&config_at(200.0, 0.0), 0u8);
    let right = 200.0 + 240.0;
    let press = Point::new(200.0, 120.0);

    desk.dispatch(&PointerEvent::down(el.handle(Edge::Left), press));
    for dx in [-150.0, -40.5, -0.1, 0.0, 12.25, 80.0, 139.0] {
        desk.dispatch(&PointerEvent::moved(press + Vec2::new(dx, 7.0)));
        let panel = desk.panel(id).unwrap();
        let rect = panel.displayed_rect();
        assert!((rect.width() - (240.0 - dx)).abs() < EPS);
        assert!((rect.x0 - (200.0 + dx)).abs() < EPS);
        assert!((rect.x1 - right).abs() < EPS);
        assert!((rect.height() - 240.0).abs() < EPS);
    }
    desk.dispatch(&PointerEvent::up(press));
    let panel = desk.panel(id).unwrap();
    assert!((panel.position().x + panel.size().width - right).abs() < EPS);
}

#[test]
fn test_clamp_holds_for_every_handle() {
    for edge in Edge::ALL {
        let mut desk = Desk::new();
        let (id, el) = desk.add_panel(&config_at(0.0, 0.0), 0u8);
        let press = Point::new(500.0, 500.0);
        desk.dispatch(&PointerEvent::down(el.handle(edge), press));

        // Far enough in the shrinking direction of both axes.
        let shrink = Vec2::new(
            -edge.horizontal().dimension_delta(10_000.0),
            -edge.vertical().dimension_delta(10_000.0),
        );
        desk.dispatch(&PointerEvent::moved(press + shrink));
        let panel = desk.panel(id).unwrap();
        let expected_w = if edge.horizontal() == AxisRule::Fixed { 240.0 } else { 100.0 };
        let expected_h = if edge.vertical() == AxisRule::Fixed { 240.0 } else { 100.0 };
        assert!((panel.width() - expected_w).abs() < EPS, "{edge} width");
        assert!((panel.height() - expected_h).abs() < EPS, "{edge} height");

        desk.dispatch(&PointerEvent::up(press + shrink));
        let panel = desk.panel(id).unwrap();
        assert_eq!(panel.size(), Size::new(expected_w, expected_h), "{edge}");
        // The far edges never move, whichever handle shrank the panel.
        let right = panel.position().x + panel.size().width;
        let bottom = panel.position().y + panel.size().height;
        if edge.horizontal() != AxisRule::Trailing {
            assert!((right - 240.0).abs() < EPS, "{edge} right edge");
        }
        if edge.vertical() != AxisRule::Trailing {
            assert!((bottom - 240.0).abs() < EPS, "{edge} bottom edge");
        }
    }
}

#[test]
fn test_second_drag_refused_across_panels() {
    let mut desk = Desk::new();
    let (a, a_el) = desk.add_panel(&config_at(0.0, 0.0), 1u8);
    let (b, b_el) = desk.add_panel(&config_at(400.0, 0.0), 2u8);

    desk.dispatch(&PointerEvent::down(a_el.handle(Edge::Right), Point::new(240.0, 10.0)));
    assert_eq!(desk.panel(a).unwrap().resize_status(Edge::Right), DragStatus::Dragging);

    let events = desk.dispatch(&PointerEvent::down(b_el.header, Point::new(450.0, 5.0)));
    assert_eq!(events_for(&events, b), vec![PanelEvent::Selected]);
    assert_eq!(desk.panel(b).unwrap().move_status(), DragStatus::Idle);

    let events = desk.dispatch(&PointerEvent::moved(Point::new(260.0, 10.0)));
    assert!(events_for(&events, b).is_empty());
    assert!((desk.panel(a).unwrap().width() - 260.0).abs() < EPS);
    assert_eq!(desk.panel(b).unwrap().position(), Point::new(400.0, 0.0));

    desk.dispatch(&PointerEvent::up(Point::new(260.0, 10.0)));
    assert_eq!(desk.panel(a).unwrap().size(), Size::new(260.0, 240.0));

    // Once released, the other panel can drag.
    let events = desk.dispatch(&PointerEvent::down(b_el.header, Point::new(450.0, 5.0)));
    assert!(events_for(&events, b).iter().any(|e| matches!(e, PanelEvent::MoveStart { .. })));
}

#[test]
fn test_removed_panel_does_not_react() {
    let mut desk = Desk::new();
    let (gone, gone_el) = desk.add_panel(&config_at(0.0, 0.0), 1u8);
    let (kept, kept_el) = desk.add_panel(&config_at(300.0, 300.0), 2u8);
    let before = desk.surface().listener_count();

    let removed = desk.remove_panel(gone).unwrap();
    assert_eq!(desk.surface().listener_count(), before - 29);
    assert_eq!(desk.surface().panel_listener_count(gone), 0);

    let stream = [
        PointerEvent::down(gone_el.header, Point::ZERO),
        PointerEvent::moved(Point::new(50.0, 50.0)),
        PointerEvent::up(Point::new(50.0, 50.0)),
        PointerEvent::down(kept_el.header, Point::ZERO),
        PointerEvent::moved(Point::new(10.0, 20.0)),
        PointerEvent::up(Point::new(10.0, 20.0)),
    ];
    let mut all = Vec::new();
    for event in stream {
        all.extend(desk.dispatch(&event));
    }
    assert!(events_for(&all, gone).is_empty());
    assert_eq!(removed.position(), Point::ZERO);
    assert_eq!(desk.panel(kept).unwrap().position(), Point::new(310.0, 320.0));
}

#[test]
fn test_cancel_unsticks_a_lost_drag() {
    let mut desk = Desk::new();
    let (a, a_el) = desk.add_panel(&config_at(0.0, 0.0), 1u8);
    let (b, b_el) = desk.add_panel(&config_at(400.0, 0.0), 2u8);

    desk.dispatch(&PointerEvent::down(a_el.header, Point::ZERO));
    desk.dispatch(&PointerEvent::moved(Point::new(30.0, 30.0)));
    // Release never arrives; the platform reports the capture loss instead.
    let events = desk.dispatch(&PointerEvent::Cancel);
    let ended = PanelEvent::MoveEnd {
        position: Point::ZERO,
        data: 1,
    };
    assert_eq!(events, vec![(a, ended)]);
    assert!(!desk.is_dragging());

    desk.dispatch(&PointerEvent::down(b_el.handle(Edge::Bottom), Point::new(500.0, 240.0)));
    assert_eq!(desk.panel(b).unwrap().active_edge(), Some(Edge::Bottom));
}

#[test]
fn test_minimized_panel_ignores_handles_but_still_moves() {
    let mut desk = Desk::new();
    let config = PanelConfig {
        header_height: 28.0,
        ..config_at(0.0, 0.0)
    };
    let (id, el) = desk.add_panel(&config, 0u8);
    let events = desk.toggle_minimized(id).unwrap();
    assert_eq!(events, vec![PanelEvent::Minified(true)]);
    assert!((desk.panel(id).unwrap().height() - 28.0).abs() < EPS);

    let events = desk.dispatch(&PointerEvent::down(el.handle(Edge::RightBottom), Point::ZERO));
    assert!(events.is_empty());

    desk.dispatch(&PointerEvent::down(el.header, Point::ZERO));
    desk.dispatch(&PointerEvent::moved(Point::new(15.0, 0.0)));
    desk.dispatch(&PointerEvent::up(Point::new(15.0, 0.0)));
    assert_eq!(desk.panel(id).unwrap().position(), Point::new(15.0, 0.0));
}
