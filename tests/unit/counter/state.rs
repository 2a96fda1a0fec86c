use super::*;

#[test]
fn inert_until_triggered() {
    let mut c = CounterState::new(50, 1500.0);
    assert_eq!(c.tick(10_000.0), 0);
    assert!(!c.started);
    assert_eq!(c.start_ms, None);
}

#[test]
fn counts_from_zero_to_target_exactly() {
    let mut c = CounterState::new(50, 1500.0);
    assert!(c.trigger(1000.0));
    assert_eq!(c.tick(1000.0), 0);
    assert_eq!(c.tick(1750.0), 25);
    assert_eq!(c.tick(2500.0), 50);
    assert!(c.is_complete());
    assert_eq!(c.tick(9000.0), 50);
}

#[test]
fn count_is_non_decreasing() {
    let mut c = CounterState::new(97, 1500.0);
    c.trigger(0.0);
    let mut prev = 0;
    let mut t = 0.0;
    while t <= 1600.0 {
        let v = c.tick(t);
        assert!(v >= prev);
        prev = v;
        t += 7.0;
    }
    assert_eq!(prev, 97);
}

#[test]
fn retrigger_after_completion_is_a_no_op() {
    let mut c = CounterState::new(12, 1000.0);
    c.trigger(0.0);
    c.tick(1000.0);
    assert!(!c.trigger(5000.0));
    assert_eq!(c.start_ms, Some(0.0));
    assert_eq!(c.tick(5001.0), 12);
}

#[test]
fn earlier_timestamp_does_not_count_backwards() {
    let mut c = CounterState::new(100, 1000.0);
    c.trigger(0.0);
    assert_eq!(c.tick(500.0), 50);
    assert_eq!(c.tick(100.0), 50);
}

#[test]
fn zero_target_and_zero_duration() {
    let mut zero = CounterState::new(0, 1000.0);
    zero.trigger(0.0);
    assert_eq!(zero.tick(10.0), 0);
    assert!(zero.is_complete());

    let mut instant = CounterState::new(8, 0.0);
    instant.trigger(0.0);
    assert_eq!(instant.tick(0.0), 8);
}
