use crate::{
    counter::state::CounterState,
    document::Geometry,
    foundation::core::ElementId,
    scroll::state::ScrollState,
};

pub const DEFAULT_COUNTER_DURATION_MS: f64 = 1500.0;

/// A [`CounterState`] bound to the element whose first appearance starts it.
#[derive(Clone, Debug)]
pub struct CounterAnimator {
    element: ElementId,
    state: CounterState,
}

impl CounterAnimator {
    pub fn new(element: ElementId, target: u64, duration_ms: f64) -> Self {
        Self {
            element,
            state: CounterState::new(target, duration_ms),
        }
    }

    pub fn element(&self) -> &ElementId {
        &self.element
    }

    pub fn state(&self) -> &CounterState {
        &self.state
    }

    pub fn value(&self) -> u64 {
        self.state.current
    }

    /// Start the count the first time any part of the element is on screen.
    pub fn observe(&mut self, scroll: &ScrollState, geometry: &dyn Geometry, now_ms: f64) -> bool {
        if self.state.started {
            return false;
        }
        let Some(bounds) = geometry.element_bounds(&self.element) else {
            return false;
        };
        let visible = bounds.y1 > scroll.scroll_top && bounds.y0 < scroll.viewport_bottom();
        if visible && self.state.trigger(now_ms) {
            tracing::debug!(element = %self.element, target = self.state.target, "counter started");
            return true;
        }
        false
    }

    pub fn on_frame(&mut self, now_ms: f64) -> u64 {
        let was_complete = self.state.is_complete();
        let value = self.state.tick(now_ms);
        if !was_complete && self.state.is_complete() {
            tracing::debug!(element = %self.element, value, "counter finished");
        }
        value
    }
}
