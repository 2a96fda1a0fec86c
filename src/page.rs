use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    collections::{BTreeMap, VecDeque},
    rc::Rc,
};

use crate::{
    clock::{
        frame_clock::{FrameClock, FrameScheduler, FrameTick},
        subscribers::Subscription,
    },
    config::MotionConfig,
    counter::animator::CounterAnimator,
    document::Document,
    foundation::{core::ElementId, error::RevealResult},
    menu::controller::{MenuSelection, MenuState, MenuTarget, OverlayMenuController, ToggleOutcome},
    nav::tracker::{ActiveSectionTracker, SectionChange},
    reveal::animator::{RevealEvent, ScrollAnimator},
    scroll::{progress::ProgressIndicator, smooth::SmoothScrollEngine, state::ScrollState},
};

/// A numeric stat that counts up when it first scrolls into view.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CounterSpec {
    pub element: ElementId,
    pub target: u64,
    /// Falls back to the configured counter duration.
    #[serde(default)]
    pub duration_ms: Option<f64>,
}

/// Observable page state after a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageSnapshot {
    pub frame: u64,
    pub now_ms: f64,
    pub scroll: ScrollState,
    pub scroll_target: f64,
    pub active_section: ElementId,
    pub revealed: Vec<ElementId>,
    pub counters: BTreeMap<ElementId, u64>,
    pub menu: MenuState,
    pub clip_path: String,
    pub scroll_locked: bool,
}

/// Per-kind bound of the page event log.
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Things that happened since the last [`Page::take_events`].
///
/// The host drains the log with `take_events`, typically once per frame. A
/// log that is never drained keeps the newest [`EVENT_LOG_CAPACITY`] entries
/// of each kind and counts the evicted ones in `dropped`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PageEvents {
    pub reveals: VecDeque<RevealEvent>,
    pub section_changes: VecDeque<SectionChange>,
    pub menu_states: VecDeque<MenuState>,
    pub dropped: u64,
}

impl PageEvents {
    pub fn is_empty(&self) -> bool {
        self.reveals.is_empty() && self.section_changes.is_empty() && self.menu_states.is_empty()
    }

    /// Move everything from `other` to the end of this log, without a bound.
    pub fn append(&mut self, mut other: PageEvents) {
        self.reveals.append(&mut other.reveals);
        self.section_changes.append(&mut other.section_changes);
        self.menu_states.append(&mut other.menu_states);
        self.dropped += other.dropped;
    }

    fn push_reveal(&mut self, event: RevealEvent) {
        push_capped(&mut self.reveals, &mut self.dropped, event);
    }

    fn push_section_change(&mut self, change: SectionChange) {
        push_capped(&mut self.section_changes, &mut self.dropped, change);
    }

    fn push_menu_state(&mut self, state: MenuState) {
        push_capped(&mut self.menu_states, &mut self.dropped, state);
    }
}

fn push_capped<T>(log: &mut VecDeque<T>, dropped: &mut u64, item: T) {
    if log.len() == EVENT_LOG_CAPACITY {
        log.pop_front();
        *dropped += 1;
        if *dropped == 1 {
            tracing::warn!(
                capacity = EVENT_LOG_CAPACITY,
                "page event log full; drain it with take_events"
            );
        }
    }
    log.push_back(item);
}

/// One mounted page: a single frame clock driving every animation component.
///
/// The engine is subscribed first so every other component sees this frame's
/// scroll position. Dropping the page (or calling [`unmount`](Self::unmount))
/// releases every subscription, which stops the clock.
pub struct Page<D: Document + 'static> {
    clock: FrameClock,
    doc: Rc<RefCell<D>>,
    engine: Rc<RefCell<SmoothScrollEngine>>,
    animator: Rc<RefCell<ScrollAnimator>>,
    tracker: Rc<RefCell<ActiveSectionTracker>>,
    counters: Rc<RefCell<Vec<CounterAnimator>>>,
    menu: Rc<RefCell<OverlayMenuController>>,
    events: Rc<RefCell<PageEvents>>,
    now_ms: Rc<Cell<f64>>,
    subscriptions: Vec<Subscription>,
}

impl<D: Document + 'static> Page<D> {
    /// Validate `config`, build every component against `doc` and subscribe
    /// them to a fresh clock on `scheduler`.
    pub fn mount(
        config: &MotionConfig,
        doc: D,
        counters: &[CounterSpec],
        scheduler: impl FrameScheduler + 'static,
        now_ms: f64,
    ) -> RevealResult<Self> {
        config.validate()?;

        let viewport = doc.viewport();
        let document_height = doc.document_height();
        let doc = Rc::new(RefCell::new(doc));

        let menu = OverlayMenuController::new(config.menu.clone(), viewport);
        let engine = SmoothScrollEngine::new(config.smooth_scroll, viewport.height, document_height)
            .with_lock(menu.scroll_lock());
        let initial = engine.state();

        let mut animator = ScrollAnimator::new(config.preset_table());
        let registered = animator.register_marked(&mut *doc.borrow_mut());
        animator.observe(initial);

        let mut events = PageEvents::default();
        let mut tracker = ActiveSectionTracker::new(
            config.tracker.header.clone(),
            config.tracker.sections.clone(),
            config.tracker.throttle_ms,
        );
        if let Some(change) = tracker.mount(now_ms, initial.scroll_top, &*doc.borrow()) {
            events.push_section_change(change);
        }

        let counters: Vec<CounterAnimator> = counters
            .iter()
            .map(|c| {
                CounterAnimator::new(
                    c.element.clone(),
                    c.target,
                    c.duration_ms.unwrap_or(config.counter.duration_ms),
                )
            })
            .collect();

        let progress = ProgressIndicator::new(config.progress_element.clone());
        progress.update(&mut *doc.borrow_mut(), &initial);
        menu.render(&mut *doc.borrow_mut());

        let clock = FrameClock::new(scheduler).with_lag_smoothing(config.lag_smoothing);
        let mut page = Self {
            clock,
            doc,
            engine: Rc::new(RefCell::new(engine)),
            animator: Rc::new(RefCell::new(animator)),
            tracker: Rc::new(RefCell::new(tracker)),
            counters: Rc::new(RefCell::new(counters)),
            menu: Rc::new(RefCell::new(menu)),
            events: Rc::new(RefCell::new(events)),
            now_ms: Rc::new(Cell::new(now_ms)),
            subscriptions: Vec::new(),
        };
        page.subscribe_all(progress);

        tracing::debug!(
            registered,
            counters = page.counters.borrow().len(),
            sections = config.tracker.sections.len(),
            "page mounted"
        );
        Ok(page)
    }

    fn subscribe_all(&mut self, progress: ProgressIndicator) {
        self.subscriptions
            .push(SmoothScrollEngine::mount(&self.engine, &self.clock));

        let (animator, tracker, counters, doc, events) = (
            Rc::clone(&self.animator),
            Rc::clone(&self.tracker),
            Rc::clone(&self.counters),
            Rc::clone(&self.doc),
            Rc::clone(&self.events),
        );
        self.subscriptions
            .push(self.engine.borrow().on_scroll(move |ev| {
                animator.borrow_mut().observe(ev.state);
                {
                    let d = doc.borrow();
                    let change =
                        tracker
                            .borrow_mut()
                            .on_scroll(ev.timestamp_ms, ev.state.scroll_top, &*d);
                    if let Some(change) = change {
                        events.borrow_mut().push_section_change(change);
                    }
                    for counter in counters.borrow_mut().iter_mut() {
                        counter.observe(&ev.state, &*d, ev.timestamp_ms);
                    }
                }
                progress.update(&mut *doc.borrow_mut(), &ev.state);
            }));

        let (animator, doc, events) = (
            Rc::clone(&self.animator),
            Rc::clone(&self.doc),
            Rc::clone(&self.events),
        );
        self.subscriptions.push(self.clock.subscribe(move |tick| {
            let reveals = animator
                .borrow_mut()
                .on_frame(tick, &mut *doc.borrow_mut());
            let mut log = events.borrow_mut();
            for reveal in reveals {
                log.push_reveal(reveal);
            }
        }));

        let counters = Rc::clone(&self.counters);
        self.subscriptions.push(self.clock.subscribe(move |tick| {
            for counter in counters.borrow_mut().iter_mut() {
                counter.on_frame(tick.now_ms);
            }
        }));

        let (menu, doc, events) = (
            Rc::clone(&self.menu),
            Rc::clone(&self.doc),
            Rc::clone(&self.events),
        );
        self.subscriptions.push(self.clock.subscribe(move |tick| {
            let mut m = menu.borrow_mut();
            if let Some(state) = m.advance(tick.delta_s()) {
                events.borrow_mut().push_menu_state(state);
            }
            m.render(&mut *doc.borrow_mut());
        }));
    }

    /// Host frame callback. `None` once the page is unmounted.
    pub fn frame(&self, now_ms: f64) -> Option<FrameTick> {
        let tick = self.clock.tick(now_ms)?;
        self.now_ms.set(now_ms);
        Some(tick)
    }

    /// Wheel or touch input; `false` while the menu holds the scroll lock.
    pub fn wheel(&self, delta: f64) -> bool {
        self.engine.borrow_mut().wheel(delta)
    }

    pub fn scroll_to(&self, target: f64, immediate: bool) {
        self.engine.borrow_mut().scroll_to(target, immediate);
    }

    /// Nav-link click: mark `section` active right away and glide to it.
    pub fn navigate(&self, section: &ElementId) -> Option<SectionChange> {
        let top = self.doc.borrow().element_bounds(section).map(|r| r.y0);
        let Some(top) = top else {
            tracing::trace!(%section, "navigation target missing");
            return None;
        };
        self.engine.borrow_mut().scroll_to(top, false);
        let change = self.tracker.borrow_mut().set_active(section.clone());
        if let Some(change) = &change {
            self.events.borrow_mut().push_section_change(change.clone());
        }
        change
    }

    /// Hamburger click.
    pub fn toggle_menu(&self) -> ToggleOutcome {
        let outcome = self.menu.borrow_mut().toggle();
        if let ToggleOutcome::Accepted(state) = outcome {
            self.events.borrow_mut().push_menu_state(state);
        }
        outcome
    }

    /// Overlay link click. Section links also navigate.
    pub fn select_menu_item(&self, index: usize) -> Option<MenuSelection> {
        let selection = self.menu.borrow_mut().select_item(index)?;
        if let ToggleOutcome::Accepted(state) = selection.outcome {
            self.events.borrow_mut().push_menu_state(state);
        }
        if let MenuTarget::Section(section) = &selection.target {
            self.navigate(section);
        }
        Some(selection)
    }

    /// Logo click: closes an open overlay and glides back to the home section.
    pub fn select_home(&self) -> MenuSelection {
        let selection = self.menu.borrow_mut().select_home();
        if let ToggleOutcome::Accepted(state) = selection.outcome {
            self.events.borrow_mut().push_menu_state(state);
        }
        if let MenuTarget::Section(section) = &selection.target {
            self.navigate(section);
        }
        selection
    }

    /// Re-read viewport and document height after the host changed layout.
    pub fn refresh_layout(&self) {
        let (viewport, document_height) = {
            let d = self.doc.borrow();
            (d.viewport(), d.document_height())
        };
        self.engine
            .borrow_mut()
            .resize(viewport.height, document_height);
        self.menu.borrow_mut().resize(viewport);
        let state = self.engine.borrow().state();
        self.animator.borrow_mut().observe(state);
        tracing::debug!(?viewport, document_height, "layout refreshed");
    }

    pub fn document(&self) -> Ref<'_, D> {
        self.doc.borrow()
    }

    /// Mutable access for layout changes; follow with [`refresh_layout`](Self::refresh_layout).
    pub fn document_mut(&self) -> RefMut<'_, D> {
        self.doc.borrow_mut()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.borrow().state()
    }

    pub fn active_section(&self) -> ElementId {
        self.tracker.borrow().active().clone()
    }

    pub fn counter_value(&self, element: &ElementId) -> Option<u64> {
        self.counters
            .borrow()
            .iter()
            .find(|c| c.element() == element)
            .map(CounterAnimator::value)
    }

    pub fn is_revealed(&self, id: &ElementId) -> bool {
        self.animator.borrow().is_revealed(id)
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Drain the event log. Hosts call this every frame, or at least often
    /// enough that no kind outgrows [`EVENT_LOG_CAPACITY`].
    pub fn take_events(&self) -> PageEvents {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Observable state as of the last frame.
    pub fn snapshot(&self) -> PageSnapshot {
        let engine = self.engine.borrow();
        let menu = self.menu.borrow();
        PageSnapshot {
            frame: self.clock.frame_count(),
            now_ms: self.now_ms.get(),
            scroll: engine.state(),
            scroll_target: engine.target(),
            active_section: self.tracker.borrow().active().clone(),
            revealed: self
                .animator
                .borrow()
                .entries()
                .filter(|e| e.revealed)
                .map(|e| e.id.clone())
                .collect(),
            counters: self
                .counters
                .borrow()
                .iter()
                .map(|c| (c.element().clone(), c.value()))
                .collect(),
            menu: menu.state(),
            clip_path: menu.clip_geometry().to_css(),
            scroll_locked: menu.is_scroll_locked(),
        }
    }

    /// Release every clock and scroll subscription. Further frames are ignored.
    pub fn unmount(&mut self) {
        let n = self.subscriptions.len();
        for sub in self.subscriptions.drain(..) {
            sub.cancel();
        }
        if n > 0 {
            tracing::debug!(subscriptions = n, "page unmounted");
        }
    }
}

impl<D: Document + 'static> Drop for Page<D> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<D: Document + 'static> std::fmt::Debug for Page<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("clock", &self.clock)
            .field("engine", &*self.engine.borrow())
            .field("menu", &self.menu_state())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
