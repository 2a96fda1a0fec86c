/// One-shot count-up from 0 to `target`.
///
/// Inert until [`trigger`](Self::trigger); from then on
/// `current = floor(clamp((now - start) / duration, 0, 1) * target)`.
/// There is no restart.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CounterState {
    pub target: u64,
    pub duration_ms: f64,
    pub start_ms: Option<f64>,
    pub current: u64,
    pub started: bool,
}

impl CounterState {
    pub fn new(target: u64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            start_ms: None,
            current: 0,
            started: false,
        }
    }

    /// Start counting at `now_ms`. Returns `false` if already started.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.start_ms = Some(now_ms);
        true
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        let Some(start) = self.start_ms else {
            return 0.0;
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.started && self.current == self.target
    }

    /// Advance to `now_ms` and return the displayed value.
    pub fn tick(&mut self, now_ms: f64) -> u64 {
        if !self.started || self.is_complete() {
            return self.current;
        }
        let value = (self.progress(now_ms) * self.target as f64).floor() as u64;
        // Clock skew must never count backwards.
        self.current = value.min(self.target).max(self.current);
        self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/counter/state.rs"]
mod tests;
