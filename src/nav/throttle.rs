/// Leading-edge throttle: the first call in each window runs, the rest are dropped.
#[derive(Clone, Debug)]
pub struct Throttle {
    window_ms: f64,
    blocked_until: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            blocked_until: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// `true` if a call at `now_ms` may run; opens a new window when it does.
    pub fn try_acquire(&mut self, now_ms: f64) -> bool {
        if let Some(until) = self.blocked_until
            && now_ms < until
        {
            return false;
        }
        self.blocked_until = Some(now_ms + self.window_ms);
        true
    }

    pub fn reset(&mut self) {
        self.blocked_until = None;
    }
}
