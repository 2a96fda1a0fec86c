use crate::{document::StyleSink, foundation::core::ElementId, scroll::state::ScrollState};

pub const DEFAULT_PROGRESS_ELEMENT: &str = "scrollProgress";

/// Mirrors scroll progress into the width of a bar element.
#[derive(Clone, Debug)]
pub struct ProgressIndicator {
    element: ElementId,
}

impl ProgressIndicator {
    pub fn new(element: ElementId) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &ElementId {
        &self.element
    }

    /// Returns `false` when the bar element is absent; the update is skipped.
    pub fn update(&self, sink: &mut dyn StyleSink, state: &ScrollState) -> bool {
        sink.set_progress_width(&self.element, state.progress_percent())
    }
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new(ElementId::new(DEFAULT_PROGRESS_ELEMENT))
    }
}
