use super::*;

fn doc() -> MemoryDocument {
    let mut d = MemoryDocument::new(Viewport::new(400.0, 800.0), 3000.0);
    d.insert("a", Rect::new(0.0, 100.0, 400.0, 200.0), &["Fade_Up"]);
    d.insert("b", Rect::new(0.0, 300.0, 400.0, 400.0), &["Fade_In", "card"]);
    d.insert("c", Rect::new(0.0, 500.0, 400.0, 600.0), &["Fade_Up"]);
    d
}

#[test]
fn class_query_keeps_document_order() {
    let d = doc();
    assert_eq!(
        d.elements_with_class("Fade_Up"),
        vec![ElementId::new("a"), ElementId::new("c")]
    );
    assert!(d.elements_with_class("Pop_In").is_empty());
}

#[test]
fn writes_to_missing_elements_are_dropped() {
    let mut d = doc();
    let ghost = ElementId::new("ghost");
    d.apply(&ghost, &Props::IDENTITY);
    assert!(!d.set_progress_width(&ghost, 50.0));
    assert!(d.style(&ghost).is_none());
}

#[test]
fn apply_counts_writes() {
    let mut d = doc();
    let a = ElementId::new("a");
    d.apply(&a, &Props::IDENTITY.opacity(0.0));
    d.apply(&a, &Props::IDENTITY);
    let style = d.style(&a).unwrap();
    assert_eq!(style.writes, 2);
    assert_eq!(style.props, Some(Props::IDENTITY));
}

#[test]
fn reinsert_keeps_original_position() {
    let mut d = doc();
    d.insert("a", Rect::new(0.0, 900.0, 400.0, 950.0), &["Fade_Up"]);
    assert_eq!(d.elements_with_class("Fade_Up")[0], ElementId::new("a"));
    assert!(d.remove(&ElementId::new("a")));
    assert_eq!(d.elements_with_class("Fade_Up"), vec![ElementId::new("c")]);
}
