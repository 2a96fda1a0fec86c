use super::*;
use crate::document::memory::MemoryDocument;
use crate::foundation::core::{Rect, Viewport};

const VH: f64 = 800.0;

fn page() -> MemoryDocument {
    let mut d = MemoryDocument::new(Viewport::new(400.0, VH), 4000.0);
    d.insert("hero", Rect::new(0.0, 100.0, 400.0, 300.0), &["Fade_In"]);
    d.insert("card1", Rect::new(0.0, 1000.0, 400.0, 1200.0), &["Fade_Up"]);
    d.insert("card2", Rect::new(0.0, 1050.0, 400.0, 1250.0), &["Fade_Up"]);
    d.insert("card3", Rect::new(0.0, 1100.0, 400.0, 1300.0), &["Fade_Up"]);
    d.insert("late", Rect::new(0.0, 3000.0, 400.0, 3100.0), &["Fade_Up"]);
    d.insert("plain", Rect::new(0.0, 200.0, 400.0, 300.0), &["card"]);
    d
}

fn tick(frame: u64, delta_ms: f64) -> FrameTick {
    FrameTick {
        frame,
        now_ms: frame as f64 * 16.0,
        delta_ms,
    }
}

fn id(s: &str) -> ElementId {
    ElementId::new(s)
}

fn setup() -> (ScrollAnimator, MemoryDocument) {
    let mut doc = page();
    let mut anim = ScrollAnimator::new(PresetTable::default());
    assert_eq!(anim.register_marked(&mut doc), 5);
    (anim, doc)
}

#[test]
fn registration_applies_from_state_and_skips_unmarked() {
    let (anim, doc) = setup();
    assert_eq!(doc.props(&id("card1")).unwrap().opacity, 0.0);
    assert_eq!(doc.props(&id("card1")).unwrap().y, 50.0);
    assert!(doc.style(&id("plain")).is_none());
    assert!(anim.entry(&id("plain")).is_none());
    assert_eq!(anim.unrevealed_count(), 5);
}

#[test]
fn nothing_happens_without_a_scroll_update() {
    let (mut anim, mut doc) = setup();
    assert!(anim.on_frame(&tick(1, 16.0), &mut doc).is_empty());
}

#[test]
fn trigger_line_respects_offset() {
    let (mut anim, mut doc) = setup();

    // Viewport bottom at 1050; Fade_Up line is 950, card1 top is 1000.
    anim.observe(ScrollState::new(250.0, VH, 4000.0));
    let events = anim.on_frame(&tick(1, 16.0), &mut doc);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id("hero"));

    // Viewport bottom at 1110; line at 1010 reaches card1 only.
    anim.observe(ScrollState::new(310.0, VH, 4000.0));
    let events = anim.on_frame(&tick(2, 16.0), &mut doc);
    assert_eq!(events.iter().map(|e| e.id.clone()).collect::<Vec<_>>(), vec![id("card1")]);
}

#[test]
fn batch_indices_restart_each_tick() {
    let (mut anim, mut doc) = setup();

    anim.observe(ScrollState::new(310.0, VH, 4000.0));
    anim.on_frame(&tick(1, 16.0), &mut doc);

    anim.observe(ScrollState::new(500.0, VH, 4000.0));
    let events = anim.on_frame(&tick(2, 16.0), &mut doc);
    let batch: Vec<(ElementId, usize)> = events
        .iter()
        .map(|e| (e.id.clone(), e.batch_index))
        .collect();
    assert_eq!(batch, vec![(id("card2"), 0), (id("card3"), 1)]);
    assert!(events[0].delay_s < events[1].delay_s);
    assert!((events[1].delay_s - 0.15).abs() < 1e-12);
}

#[test]
fn reveal_is_idempotent() {
    let (mut anim, mut doc) = setup();
    let state = ScrollState::new(0.0, VH, 4000.0);

    anim.observe(state);
    assert_eq!(anim.on_frame(&tick(1, 16.0), &mut doc).len(), 1);
    assert!(anim.is_revealed(&id("hero")));

    // Run the 1s FadeIn transition to completion.
    for f in 2..100 {
        anim.on_frame(&tick(f, 16.0), &mut doc);
    }
    assert_eq!(anim.running_count(), 0);
    assert_eq!(doc.props(&id("hero")), Some(Props::IDENTITY));
    let writes = doc.style(&id("hero")).unwrap().writes;

    for f in 100..110 {
        anim.observe(state);
        assert!(anim.on_frame(&tick(f, 16.0), &mut doc).is_empty());
    }
    assert_eq!(doc.style(&id("hero")).unwrap().writes, writes);
}

#[test]
fn scrolling_back_up_does_not_hide_revealed_elements() {
    let (mut anim, mut doc) = setup();
    anim.observe(ScrollState::new(600.0, VH, 4000.0));
    anim.on_frame(&tick(1, 16.0), &mut doc);
    anim.observe(ScrollState::new(0.0, VH, 4000.0));
    anim.on_frame(&tick(2, 16.0), &mut doc);
    assert!(anim.is_revealed(&id("card3")));
    assert!(!anim.is_revealed(&id("late")));
}

#[test]
fn stagger_delays_hold_later_elements_back() {
    let (mut anim, mut doc) = setup();
    anim.observe(ScrollState::new(500.0, VH, 4000.0));
    anim.on_frame(&tick(1, 0.0), &mut doc);
    anim.on_frame(&tick(2, 100.0), &mut doc);

    let first = doc.props(&id("card1")).unwrap().opacity;
    let second = doc.props(&id("card2")).unwrap().opacity;
    let third = doc.props(&id("card3")).unwrap().opacity;
    assert!(first > 0.0);
    assert_eq!(second, 0.0);
    assert_eq!(third, 0.0);
}

#[test]
fn missing_element_is_skipped_silently() {
    let (mut anim, mut doc) = setup();
    doc.remove(&id("card2"));
    anim.observe(ScrollState::new(500.0, VH, 4000.0));
    let events = anim.on_frame(&tick(1, 16.0), &mut doc);
    assert!(events.iter().all(|e| e.id != id("card2")));
    assert!(!anim.is_revealed(&id("card2")));
}

#[test]
fn duplicate_registration_and_unregister() {
    let (mut anim, mut doc) = setup();
    assert!(!anim.register(id("hero"), Preset::PopIn, &mut doc));
    assert!(anim.unregister(&id("hero")));
    assert!(anim.entry(&id("hero")).is_none());
    assert!(!anim.unregister(&id("hero")));
}
