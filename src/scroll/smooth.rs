use std::{cell::RefCell, rc::Rc};

use crate::{
    clock::{
        frame_clock::{FrameClock, FrameTick},
        subscribers::{SubscriberList, Subscription},
    },
    foundation::math::EPSILON,
    scroll::{
        lock::ScrollLockReader,
        state::{ScrollState, scroll_limit},
    },
};

/// Inertial scroll tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Fraction of the remaining distance covered each tick, in `(0, 1]`.
    pub damping: f64,
    pub wheel_multiplier: f64,
    /// Distance (px) below which the virtual position snaps to the target.
    /// Must be positive; the engine never snaps closer than [`EPSILON`].
    pub snap_threshold: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            damping: 0.1,
            wheel_multiplier: 1.0,
            snap_threshold: 0.5,
        }
    }
}

/// Payload of the engine's `scroll` event.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollEvent {
    pub state: ScrollState,
    /// Virtual position change during this tick, px.
    pub velocity: f64,
    pub timestamp_ms: f64,
}

/// Inertial scroll emulation.
///
/// Raw input moves a target; every frame the virtual position eases toward it
/// with `virtual += (target - virtual) * damping`, and a [`ScrollEvent`] is
/// published to listeners.
pub struct SmoothScrollEngine {
    config: SmoothScrollConfig,
    target: f64,
    current: f64,
    viewport_height: f64,
    document_height: f64,
    velocity: f64,
    lock: Option<ScrollLockReader>,
    listeners: SubscriberList<ScrollEvent>,
}

impl SmoothScrollEngine {
    pub fn new(config: SmoothScrollConfig, viewport_height: f64, document_height: f64) -> Self {
        Self {
            config,
            target: 0.0,
            current: 0.0,
            viewport_height,
            document_height,
            velocity: 0.0,
            lock: None,
            listeners: SubscriberList::new(),
        }
    }

    /// Ignore wheel input while `lock` reads engaged.
    pub fn with_lock(mut self, lock: ScrollLockReader) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Drive `engine` from `clock`: one step and one `scroll` event per tick.
    pub fn mount(engine: &Rc<RefCell<Self>>, clock: &FrameClock) -> Subscription {
        let engine = Rc::clone(engine);
        clock.subscribe(move |tick| {
            let (event, listeners) = {
                let mut e = engine.borrow_mut();
                (e.step(tick), e.listeners.clone())
            };
            listeners.emit(&event);
        })
    }

    /// Listen for the per-tick `scroll` event.
    pub fn on_scroll(&self, listener: impl FnMut(&ScrollEvent) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    /// Largest reachable scroll offset.
    pub fn limit(&self) -> f64 {
        scroll_limit(self.viewport_height, self.document_height)
    }

    /// Where the engine is gliding to.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current virtual scroll offset.
    pub fn position(&self) -> f64 {
        self.current
    }

    pub fn is_locked(&self) -> bool {
        self.lock.as_ref().is_some_and(ScrollLockReader::is_locked)
    }

    /// `true` until the virtual position has snapped to the target.
    pub fn is_scrolling(&self) -> bool {
        self.target != self.current
    }

    pub fn state(&self) -> ScrollState {
        ScrollState::new(self.current, self.viewport_height, self.document_height)
    }

    /// Wheel / touch delta in px. Returns `false` if the input was dropped.
    pub fn wheel(&mut self, delta: f64) -> bool {
        if self.is_locked() {
            tracing::trace!(delta, "wheel ignored while scroll is locked");
            return false;
        }
        if !delta.is_finite() {
            return false;
        }
        self.target = (self.target + delta * self.config.wheel_multiplier).clamp(0.0, self.limit());
        true
    }

    /// Programmatic scroll, clamped to the range. Non-finite targets are ignored.
    pub fn scroll_to(&mut self, target: f64, immediate: bool) {
        if !target.is_finite() {
            return;
        }
        self.target = target.clamp(0.0, self.limit());
        if immediate {
            self.current = self.target;
        }
    }

    /// Adopt a position reported by the native scroller (anchor jumps, restore).
    pub fn native_scroll(&mut self, position: f64) {
        self.scroll_to(position, true);
    }

    /// New layout; target and position are re-clamped.
    pub fn resize(&mut self, viewport_height: f64, document_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        self.document_height = document_height.max(0.0);
        let limit = self.limit();
        self.target = self.target.clamp(0.0, limit);
        self.current = self.current.clamp(0.0, limit);
    }

    /// Advance the virtual position one tick. Does not notify listeners.
    pub fn step(&mut self, tick: &FrameTick) -> ScrollEvent {
        let before = self.current;
        let diff = self.target - self.current;
        if diff.abs() < self.config.snap_threshold.max(EPSILON) {
            self.current = self.target;
        } else {
            self.current += diff * self.config.damping;
        }
        self.velocity = self.current - before;
        ScrollEvent {
            state: self.state(),
            velocity: self.velocity,
            timestamp_ms: tick.now_ms,
        }
    }
}

impl std::fmt::Debug for SmoothScrollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoothScrollEngine")
            .field("target", &self.target)
            .field("current", &self.current)
            .field("limit", &self.limit())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
