use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::{
    clock::subscribers::{SubscriberList, Subscription, SubscriptionId},
    foundation::math::ms_to_secs,
};

/// The host's per-frame primitive (a `requestAnimationFrame` loop or a test driver).
///
/// The clock calls `start` when its first subscriber arrives and `stop` when the
/// last one leaves; while started, the host calls [`FrameClock::tick`] once per frame.
pub trait FrameScheduler {
    /// Begin delivering frames.
    fn start(&mut self);
    /// Stop delivering frames.
    fn stop(&mut self);
}

/// Scheduler for headless runs: only records whether the loop should be running.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    running: Rc<Cell<bool>>,
    starts: Rc<Cell<u32>>,
}

impl ManualScheduler {
    /// A stopped scheduler. Clones share state, so keep one to inspect.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// How many times the loop was (re)started.
    pub fn start_count(&self) -> u32 {
        self.starts.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(&mut self) {
        self.running.set(true);
        self.starts.set(self.starts.get() + 1);
    }

    fn stop(&mut self) {
        self.running.set(false);
    }
}

/// One rendering frame as seen by subscribers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameTick {
    pub frame: u64,
    pub now_ms: f64,
    pub delta_ms: f64,
}

impl FrameTick {
    pub fn delta_s(&self) -> f64 {
        ms_to_secs(self.delta_ms)
    }
}

/// Replaces deltas above `threshold_ms` with `adjusted_ms` (tab switches, long GC pauses).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LagSmoothing {
    pub threshold_ms: f64,
    pub adjusted_ms: f64,
}

struct ClockState {
    scheduler: Box<dyn FrameScheduler>,
    running: bool,
    last_ms: Option<f64>,
    frame: u64,
    lag: Option<LagSmoothing>,
}

impl ClockState {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last_ms = None;
            self.scheduler.start();
            tracing::debug!("frame clock started");
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.last_ms = None;
            self.scheduler.stop();
            tracing::debug!(frames = self.frame, "frame clock stopped");
        }
    }
}

/// Single shared per-frame clock.
///
/// Cloning yields another handle to the same clock; every component subscribes
/// through one of these handles, so there is exactly one scheduling loop.
#[derive(Clone)]
pub struct FrameClock {
    subscribers: SubscriberList<FrameTick>,
    state: Rc<RefCell<ClockState>>,
}

impl FrameClock {
    pub fn new(scheduler: impl FrameScheduler + 'static) -> Self {
        let state = Rc::new(RefCell::new(ClockState {
            scheduler: Box::new(scheduler),
            running: false,
            last_ms: None,
            frame: 0,
            lag: None,
        }));

        let on_first: Weak<RefCell<ClockState>> = Rc::downgrade(&state);
        let on_empty = on_first.clone();
        let subscribers = SubscriberList::with_hooks(
            move || {
                if let Some(s) = on_first.upgrade() {
                    s.borrow_mut().start();
                }
            },
            move || {
                if let Some(s) = on_empty.upgrade() {
                    s.borrow_mut().stop();
                }
            },
        );

        Self { subscribers, state }
    }

    pub fn with_lag_smoothing(self, lag: Option<LagSmoothing>) -> Self {
        self.state.borrow_mut().lag = lag;
        self
    }

    pub fn subscribe(&self, callback: impl FnMut(&FrameTick) + 'static) -> Subscription {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn frame_count(&self) -> u64 {
        self.state.borrow().frame
    }

    /// Run one frame at host timestamp `now_ms`. A stopped clock ignores ticks.
    pub fn tick(&self, now_ms: f64) -> Option<FrameTick> {
        let tick = {
            let mut st = self.state.borrow_mut();
            if !st.running {
                return None;
            }
            let mut delta_ms = st.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
            if let Some(lag) = st.lag
                && delta_ms > lag.threshold_ms
            {
                delta_ms = lag.adjusted_ms;
            }
            st.last_ms = Some(now_ms);
            st.frame += 1;
            FrameTick {
                frame: st.frame,
                now_ms,
                delta_ms,
            }
        };
        self.subscribers.emit(&tick);
        Some(tick)
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.state.borrow();
        f.debug_struct("FrameClock")
            .field("running", &st.running)
            .field("frame", &st.frame)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/frame_clock.rs"]
mod tests;
