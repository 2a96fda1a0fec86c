use crate::{
    document::Geometry,
    foundation::core::ElementId,
    nav::throttle::Throttle,
};

/// A section's vertical extent in document coordinates, read fresh per evaluation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionBoundary {
    pub id: ElementId,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBoundary {
    pub fn contains(&self, y: f64) -> bool {
        self.top <= y && y <= self.bottom
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionChange {
    pub from: ElementId,
    pub to: ElementId,
}

/// The boundary containing `line`. When sections overlap, the one registered
/// last wins.
pub fn pick_active(boundaries: &[SectionBoundary], line: f64) -> Option<&SectionBoundary> {
    boundaries.iter().rev().find(|b| b.contains(line))
}

/// Maps scroll offset to the navigation section under the header's lower edge.
#[derive(Clone, Debug)]
pub struct ActiveSectionTracker {
    header: ElementId,
    sections: Vec<ElementId>,
    active: ElementId,
    throttle: Throttle,
}

impl ActiveSectionTracker {
    pub fn new(header: ElementId, sections: Vec<ElementId>, throttle_ms: f64) -> Self {
        let active = sections
            .first()
            .cloned()
            .unwrap_or_else(|| ElementId::new("home"));
        Self {
            header,
            sections,
            active,
            throttle: Throttle::new(throttle_ms),
        }
    }

    pub fn active(&self) -> &ElementId {
        &self.active
    }

    pub fn sections(&self) -> &[ElementId] {
        &self.sections
    }

    /// Evaluate once right away so the active link is right before any scroll.
    pub fn mount(
        &mut self,
        now_ms: f64,
        scroll_top: f64,
        geometry: &dyn Geometry,
    ) -> Option<SectionChange> {
        self.throttle.reset();
        self.on_scroll(now_ms, scroll_top, geometry)
    }

    /// Throttled scroll handler.
    pub fn on_scroll(
        &mut self,
        now_ms: f64,
        scroll_top: f64,
        geometry: &dyn Geometry,
    ) -> Option<SectionChange> {
        if !self.throttle.try_acquire(now_ms) {
            return None;
        }
        self.evaluate(scroll_top, geometry)
    }

    /// Unthrottled evaluation.
    pub fn evaluate(&mut self, scroll_top: f64, geometry: &dyn Geometry) -> Option<SectionChange> {
        let Some(header) = geometry.element_bounds(&self.header) else {
            tracing::trace!(header = %self.header, "header missing; active section unchanged");
            return None;
        };
        let line = scroll_top + header.height();
        let boundaries = self.boundaries(geometry);
        let next = pick_active(&boundaries, line)?.id.clone();
        self.set_active(next)
    }

    /// Current boundaries of every registered section that exists on the page.
    pub fn boundaries(&self, geometry: &dyn Geometry) -> Vec<SectionBoundary> {
        self.sections
            .iter()
            .filter_map(|id| {
                geometry.element_bounds(id).map(|r| SectionBoundary {
                    id: id.clone(),
                    top: r.y0,
                    bottom: r.y1,
                })
            })
            .collect()
    }

    /// Set the active section directly (a nav link was clicked).
    pub fn set_active(&mut self, id: ElementId) -> Option<SectionChange> {
        if id == self.active {
            return None;
        }
        let from = std::mem::replace(&mut self.active, id.clone());
        tracing::debug!(%from, to = %id, "active section changed");
        Some(SectionChange { from, to: id })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/tracker.rs"]
mod tests;
