use crate::foundation::math::{EPSILON, clamp01};

/// Scroll geometry for one frame. Recomputed every tick, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    /// `scroll_top / (document_height - viewport_height)` clamped to `[0, 1]`.
    pub progress: f64,
}

impl ScrollState {
    pub fn new(scroll_top: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            document_height,
            progress: scroll_progress(scroll_top, viewport_height, document_height),
        }
    }

    /// Largest reachable `scroll_top`.
    pub fn limit(&self) -> f64 {
        scroll_limit(self.viewport_height, self.document_height)
    }

    /// Document-space y of the viewport's bottom edge.
    pub fn viewport_bottom(&self) -> f64 {
        self.scroll_top + self.viewport_height
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }
}

pub fn scroll_limit(viewport_height: f64, document_height: f64) -> f64 {
    (document_height - viewport_height).max(0.0)
}

/// Content that fits the viewport has no scrollable range and reports 0.
pub fn scroll_progress(scroll_top: f64, viewport_height: f64, document_height: f64) -> f64 {
    let range = scroll_limit(viewport_height, document_height);
    if range <= EPSILON {
        return 0.0;
    }
    clamp01(scroll_top / range)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/state.rs"]
mod tests;
