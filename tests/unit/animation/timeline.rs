use super::*;
use crate::animation::tween::Props;

#[test]
fn paused_timeline_does_not_move() {
    let mut tl = Timeline::new(1.0);
    assert_eq!(tl.advance(0.5), None);
    assert_eq!(tl.progress(), 0.0);
}

#[test]
fn forward_completion_fires_once() {
    let mut tl = Timeline::new(0.25);
    tl.play();
    assert_eq!(tl.advance(0.1), None);
    assert_eq!(tl.advance(0.2), Some(TimelineEvent::Completed));
    assert_eq!(tl.progress(), 1.0);
    assert_eq!(tl.advance(0.2), None);
}

#[test]
fn reverse_from_midpoint_completes_at_start() {
    let mut tl = Timeline::new(1.0);
    tl.play();
    tl.advance(0.4);
    tl.reverse();
    assert_eq!(tl.advance(0.3), None);
    assert!((tl.progress() - 0.1).abs() < 1e-9);
    assert_eq!(tl.advance(0.3), Some(TimelineEvent::ReverseCompleted));
    assert_eq!(tl.progress(), 0.0);
}

#[test]
fn zero_duration_completes_on_next_advance() {
    let mut tl = Timeline::new(0.0);
    tl.play();
    assert_eq!(tl.advance(0.0), Some(TimelineEvent::Completed));
    assert_eq!(tl.progress(), 1.0);
    tl.reverse();
    assert_eq!(tl.advance(0.0), Some(TimelineEvent::ReverseCompleted));
    assert_eq!(tl.progress(), 0.0);
}

#[test]
fn staggered_items_start_in_order() {
    let tween = Tween::new(
        Props::IDENTITY.opacity(0.0),
        Props::IDENTITY,
        0.5,
        Ease::Linear,
    );
    let mut st = StaggeredTimeline::new(tween, 0.1, 3);
    assert!((st.head().duration_s() - 0.7).abs() < 1e-9);

    st.play();
    st.advance(0.15);
    let items = st.items();
    assert!(items[0].opacity > items[1].opacity);
    assert_eq!(items[2].opacity, 0.0);
    assert!(st.item(3).is_none());
}

#[test]
fn staggered_reverse_signals_after_last_item() {
    let tween = Tween::new(0.0, 1.0, 0.5, Ease::Linear);
    let mut st = StaggeredTimeline::new(tween, 0.1, 2);
    st.play();
    assert_eq!(st.advance(1.0), Some(TimelineEvent::Completed));
    st.reverse();
    assert_eq!(st.advance(0.5), None);
    assert_eq!(st.advance(0.5), Some(TimelineEvent::ReverseCompleted));
    assert_eq!(st.items(), vec![0.0, 0.0]);
}

#[test]
fn eased_progress_applies_curve() {
    let mut tl = Timeline::new(1.0);
    tl.play();
    tl.advance(0.5);
    assert!((eased_progress(&tl, Ease::Power1Out) - 0.75).abs() < 1e-9);
}
