use super::*;
use std::cell::Cell;

#[test]
fn emits_in_subscription_order() {
    let list = SubscriberList::<u32>::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l1 = Rc::clone(&log);
    let _a = list.subscribe(move |v| l1.borrow_mut().push(("a", *v)));
    let l2 = Rc::clone(&log);
    let _b = list.subscribe(move |v| l2.borrow_mut().push(("b", *v)));

    list.emit(&7);
    assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
}

#[test]
fn dropping_subscription_stops_delivery() {
    let list = SubscriberList::<()>::new();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let sub = list.subscribe(move |_| h.set(h.get() + 1));

    list.emit(&());
    drop(sub);
    list.emit(&());
    assert_eq!(hits.get(), 1);
    assert!(list.is_empty());
}

#[test]
fn explicit_unsubscribe_then_drop_is_harmless() {
    let list = SubscriberList::<()>::new();
    let sub = list.subscribe(|_| {});
    assert!(list.unsubscribe(sub.id()));
    assert!(!list.unsubscribe(sub.id()));
    drop(sub);
    assert_eq!(list.len(), 0);
}

#[test]
fn hooks_fire_on_first_and_empty() {
    let starts = Rc::new(Cell::new(0));
    let stops = Rc::new(Cell::new(0));
    let (s1, s2) = (Rc::clone(&starts), Rc::clone(&stops));
    let list = SubscriberList::<()>::with_hooks(move || s1.set(s1.get() + 1), move || {
        s2.set(s2.get() + 1)
    });

    let a = list.subscribe(|_| {});
    let b = list.subscribe(|_| {});
    assert_eq!(starts.get(), 1);
    drop(a);
    assert_eq!(stops.get(), 0);
    drop(b);
    assert_eq!(stops.get(), 1);
}

#[test]
fn subscriber_removed_mid_emit_is_skipped() {
    let list = SubscriberList::<()>::new();
    let second_hits = Rc::new(Cell::new(0));

    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let v = Rc::clone(&victim);
    let _first = list.subscribe(move |_| {
        v.borrow_mut().take();
    });
    let h = Rc::clone(&second_hits);
    *victim.borrow_mut() = Some(list.subscribe(move |_| h.set(h.get() + 1)));

    list.emit(&());
    assert_eq!(second_hits.get(), 0);
    assert_eq!(list.len(), 1);
}

#[test]
fn subscriber_added_mid_emit_waits_for_next_emit() {
    let list = SubscriberList::<()>::new();
    let late_hits = Rc::new(Cell::new(0));
    let holder: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

    let (l, h, hold) = (list.clone(), Rc::clone(&late_hits), Rc::clone(&holder));
    let _adder = list.subscribe(move |_| {
        if hold.borrow().is_empty() {
            let h = Rc::clone(&h);
            hold.borrow_mut().push(l.subscribe(move |_| h.set(h.get() + 1)));
        }
    });

    list.emit(&());
    assert_eq!(late_hits.get(), 0);
    list.emit(&());
    assert_eq!(late_hits.get(), 1);
    holder.borrow_mut().clear();
}
