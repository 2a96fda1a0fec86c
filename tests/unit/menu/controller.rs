use super::*;
use crate::{
    document::memory::MemoryDocument,
    foundation::core::{Point, Rect},
};

fn menu() -> OverlayMenuController {
    OverlayMenuController::new(MenuConfig::default(), Viewport::new(1280.0, 800.0))
}

fn settle(m: &mut OverlayMenuController) {
    for _ in 0..20 {
        m.advance(0.125);
    }
}

#[test]
fn open_then_close_cycle() {
    let mut m = menu();
    let reader = m.scroll_lock();
    assert_eq!(m.state(), MenuState::Closed);
    assert!(!reader.is_locked());

    assert_eq!(m.toggle(), ToggleOutcome::Accepted(MenuState::Opening));
    assert!(reader.is_locked());
    assert!(m.is_overlay_displayed());

    assert_eq!(m.advance(0.125), None);
    assert_eq!(m.advance(0.125), Some(MenuState::Open));
    assert_eq!(m.state(), MenuState::Open);
    assert!(m.clip_geometry().covers(Viewport::new(1280.0, 800.0)));

    assert_eq!(m.toggle(), ToggleOutcome::Accepted(MenuState::Closing));
    assert!(reader.is_locked(), "lock held until the clip has closed");
    assert_eq!(m.advance(0.125), None);
    assert!(reader.is_locked());
    assert!(m.is_overlay_displayed());
    assert_eq!(m.advance(0.125), Some(MenuState::Closed));
    assert!(!reader.is_locked());
    assert!(!m.is_overlay_displayed());
}

#[test]
fn toggles_mid_transition_are_ignored() {
    let mut m = menu();
    m.toggle();
    assert_eq!(m.toggle(), ToggleOutcome::Ignored(MenuState::Opening));
    assert_eq!(m.state(), MenuState::Opening);
    settle(&mut m);
    assert_eq!(m.state(), MenuState::Open);

    m.toggle();
    m.advance(0.1);
    assert_eq!(m.toggle(), ToggleOutcome::Ignored(MenuState::Closing));
    assert!(m.is_scroll_locked());
    settle(&mut m);
    assert_eq!(m.state(), MenuState::Closed);
    assert!(!m.is_scroll_locked());
}

#[test]
fn item_timeline_does_not_drive_state() {
    let mut m = menu();
    m.toggle();
    m.advance(0.25);
    assert_eq!(m.state(), MenuState::Open);
    // Items take 0.5s plus stagger, so the last one is still waiting.
    let items = m.item_props();
    assert_eq!(items.len(), 5);
    assert_eq!(items[4], m.config().item_from);
    settle(&mut m);
    assert!(m.item_props().iter().all(|p| *p == Props::IDENTITY));
}

#[test]
fn selecting_a_link_closes_the_open_menu() {
    let mut m = menu();
    m.toggle();
    settle(&mut m);

    let sel = m.select_item(1).expect("in range");
    assert_eq!(sel.target, MenuTarget::Section(ElementId::new("skills")));
    assert_eq!(sel.outcome, ToggleOutcome::Accepted(MenuState::Closing));
    settle(&mut m);
    assert_eq!(m.state(), MenuState::Closed);
}

#[test]
fn home_link_closes_the_open_menu() {
    let mut m = menu();
    let sel = m.select_home();
    assert_eq!(sel.target, MenuTarget::Section(ElementId::new("home")));
    assert_eq!(sel.outcome, ToggleOutcome::Ignored(MenuState::Closed));

    m.toggle();
    settle(&mut m);
    assert_eq!(
        m.select_home().outcome,
        ToggleOutcome::Accepted(MenuState::Closing)
    );
    settle(&mut m);
    assert_eq!(m.state(), MenuState::Closed);
    assert!(!m.is_scroll_locked());
    assert!(!m.is_overlay_displayed());
}

#[test]
fn resume_link_is_last_item() {
    let mut m = menu();
    let sel = m.select_resume().expect("resume");
    assert_eq!(sel.target, MenuTarget::External("/Resume.pdf".to_owned()));
    assert_eq!(sel.outcome, ToggleOutcome::Ignored(MenuState::Closed));
    assert!(m.select_item(99).is_none());
}

#[test]
fn render_writes_overlay_styles() {
    let mut doc = MemoryDocument::default();
    let cfg = MenuConfig::default();
    doc.insert(cfg.overlay.clone(), Rect::new(0.0, 0.0, 1280.0, 800.0), &[]);
    for id in cfg.item_ids() {
        doc.insert(id, Rect::new(0.0, 0.0, 100.0, 20.0), &[]);
    }
    let overlay = cfg.overlay.clone();

    let mut m = menu();
    m.toggle();
    m.render(&mut doc);
    assert!(doc.is_scroll_locked());
    let style = doc.style(&overlay).expect("overlay style");
    assert_eq!(style.displayed, Some(true));
    assert_eq!(style.clip_path.as_deref(), Some("circle(30px at 1310px -30px)"));

    settle(&mut m);
    m.render(&mut doc);
    let style = doc.style(&overlay).expect("overlay style");
    assert_eq!(style.clip_path.as_deref(), Some("circle(1800px at 40px 40px)"));

    m.toggle();
    settle(&mut m);
    m.render(&mut doc);
    assert!(!doc.is_scroll_locked());
    assert_eq!(doc.style(&overlay).expect("overlay style").displayed, Some(false));
}

#[test]
fn resize_moves_clip_endpoints() {
    let mut m = menu();
    m.resize(Viewport::new(400.0, 300.0));
    assert_eq!(m.clip_geometry().center, Point::new(430.0, -30.0));
}
