use super::*;
use crate::document::memory::MemoryDocument;
use crate::foundation::core::{Rect, Viewport};

fn id(s: &str) -> ElementId {
    ElementId::new(s)
}

fn page() -> MemoryDocument {
    let mut d = MemoryDocument::new(Viewport::new(1280.0, 800.0), 2000.0);
    d.insert("header", Rect::new(0.0, 0.0, 1280.0, 80.0), &[]);
    d.insert("home", Rect::new(0.0, 0.0, 1280.0, 100.0), &[]);
    d.insert("about", Rect::new(0.0, 100.0, 1280.0, 500.0), &[]);
    d.insert("skills", Rect::new(0.0, 500.0, 1280.0, 900.0), &[]);
    d
}

fn tracker() -> ActiveSectionTracker {
    ActiveSectionTracker::new(
        id("header"),
        vec![id("home"), id("about"), id("skills")],
        100.0,
    )
}

#[test]
fn header_edge_inside_about() {
    let doc = page();
    let mut t = tracker();
    // Header bottom edge at 370 + 80 = 450.
    let change = t.evaluate(370.0, &doc).unwrap();
    assert_eq!(change.to, id("about"));
    assert_eq!(t.active(), &id("about"));
}

#[test]
fn shared_edge_goes_to_later_section() {
    let doc = page();
    let mut t = tracker();
    t.evaluate(420.0, &doc);
    assert_eq!(t.active(), &id("skills"));
}

#[test]
fn pick_active_prefers_last_registered() {
    let b = vec![
        SectionBoundary {
            id: id("a"),
            top: 0.0,
            bottom: 100.0,
        },
        SectionBoundary {
            id: id("b"),
            top: 50.0,
            bottom: 150.0,
        },
    ];
    assert_eq!(pick_active(&b, 75.0).unwrap().id, id("b"));
    assert_eq!(pick_active(&b, 25.0).unwrap().id, id("a"));
    assert!(pick_active(&b, 200.0).is_none());
}

#[test]
fn no_match_keeps_current_section() {
    let doc = page();
    let mut t = tracker();
    t.evaluate(370.0, &doc);
    assert!(t.evaluate(5000.0, &doc).is_none());
    assert_eq!(t.active(), &id("about"));
}

#[test]
fn throttle_keeps_first_evaluation_in_window() {
    let doc = page();
    let mut t = tracker();
    assert!(t.mount(0.0, 0.0, &doc).is_none());
    assert_eq!(t.active(), &id("home"));

    assert!(t.on_scroll(10.0, 370.0, &doc).is_none());
    assert_eq!(t.active(), &id("home"));

    let change = t.on_scroll(100.0, 370.0, &doc).unwrap();
    assert_eq!(change.from, id("home"));
    assert_eq!(change.to, id("about"));
}

#[test]
fn mount_evaluates_immediately() {
    let doc = page();
    let mut t = tracker();
    t.on_scroll(0.0, 0.0, &doc);
    let change = t.mount(1.0, 500.0, &doc).unwrap();
    assert_eq!(change.to, id("skills"));
}

#[test]
fn missing_header_or_sections_are_tolerated() {
    let mut doc = page();
    doc.remove(&id("about"));
    let mut t = tracker();
    t.evaluate(370.0, &doc);
    assert_eq!(t.active(), &id("home"));
    assert_eq!(t.boundaries(&doc).len(), 2);

    doc.remove(&id("header"));
    assert!(t.evaluate(450.0, &doc).is_none());
}

#[test]
fn click_sets_active_directly() {
    let mut t = tracker();
    assert!(t.set_active(id("home")).is_none());
    assert_eq!(t.set_active(id("skills")).unwrap().to, id("skills"));
}
