use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

type Callback<E> = Rc<RefCell<dyn FnMut(&E)>>;
type Hook = Rc<dyn Fn()>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<E>)>,
    on_first: Option<Hook>,
    on_empty: Option<Hook>,
}

impl<E> Registry<E> {
    fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|(e, _)| *e == id)
    }
}

/// Ordered callback registry shared by the frame clock and scroll emitters.
///
/// Callbacks run in subscription order. A callback added during [`emit`](Self::emit)
/// first runs on the next emit; one removed during an emit is skipped for the
/// rest of it.
pub struct SubscriberList<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for SubscriberList<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for SubscriberList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl<E: 'static> Default for SubscriberList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> SubscriberList<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
                on_first: None,
                on_empty: None,
            })),
        }
    }

    /// Hooks fired when the list goes from empty to non-empty and back.
    pub(crate) fn with_hooks(on_first: impl Fn() + 'static, on_empty: impl Fn() + 'static) -> Self {
        let list = Self::new();
        {
            let mut reg = list.inner.borrow_mut();
            reg.on_first = Some(Rc::new(on_first));
            reg.on_empty = Some(Rc::new(on_empty));
        }
        list
    }

    pub fn subscribe(&self, callback: impl FnMut(&E) + 'static) -> Subscription {
        let (id, hook) = {
            let mut reg = self.inner.borrow_mut();
            let id = SubscriptionId(reg.next_id);
            reg.next_id += 1;
            let was_empty = reg.entries.is_empty();
            reg.entries.push((id, Rc::new(RefCell::new(callback))));
            (id, if was_empty { reg.on_first.clone() } else { None })
        };
        if let Some(hook) = hook {
            hook();
        }

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    remove(&inner, id);
                }
            })),
        }
    }

    /// Remove a subscriber by id. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        remove(&self.inner, id)
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner.borrow().contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(SubscriptionId, Callback<E>)> = self.inner.borrow().entries.clone();
        for (id, callback) in snapshot {
            if !self.inner.borrow().contains(id) {
                continue;
            }
            // A callback that re-enters `emit` does not see itself again.
            let Ok(mut f) = callback.try_borrow_mut() else {
                tracing::trace!(id = id.0, "skipping re-entrant subscriber");
                continue;
            };
            (*f)(event);
        }
    }
}

fn remove<E>(inner: &Rc<RefCell<Registry<E>>>, id: SubscriptionId) -> bool {
    let (removed, hook) = {
        let mut reg = inner.borrow_mut();
        let before = reg.entries.len();
        reg.entries.retain(|(e, _)| *e != id);
        let removed = reg.entries.len() != before;
        let hook = if removed && reg.entries.is_empty() {
            reg.on_empty.clone()
        } else {
            None
        };
        (removed, hook)
    };
    if let Some(hook) = hook {
        hook();
    }
    removed
}

/// Scoped registration. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: SubscriptionId,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscription").field(&self.id.0).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/subscribers.rs"]
mod tests;
