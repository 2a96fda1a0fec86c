use std::collections::BTreeMap;

use crate::{
    animation::tween::Props,
    document::{Geometry, StyleSink},
    foundation::core::{ElementId, Rect, Viewport},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoryElement {
    pub bounds: Rect,
    #[serde(default)]
    pub classes: Vec<String>,
}

/// Last written style values of one element.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AppliedStyle {
    pub props: Option<Props>,
    pub width_percent: Option<f64>,
    pub clip_path: Option<String>,
    pub displayed: Option<bool>,
    /// Number of `apply` calls received.
    pub writes: u32,
}

/// In-memory page used by the simulator and the test-suite.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    viewport: Viewport,
    document_height: f64,
    order: Vec<ElementId>,
    elements: BTreeMap<ElementId, MemoryElement>,
    styles: BTreeMap<ElementId, AppliedStyle>,
    scroll_locked: bool,
}

impl MemoryDocument {
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        Self {
            viewport,
            document_height,
            ..Self::default()
        }
    }

    /// Insert or replace an element. Order of first insertion is document order.
    pub fn insert(&mut self, id: impl Into<ElementId>, bounds: Rect, classes: &[&str]) {
        let id = id.into();
        if !self.elements.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.elements.insert(
            id,
            MemoryElement {
                bounds,
                classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            },
        );
    }

    pub fn insert_element(&mut self, id: ElementId, element: MemoryElement) {
        if !self.elements.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.elements.insert(id, element);
    }

    pub fn remove(&mut self, id: &ElementId) -> bool {
        self.order.retain(|e| e != id);
        self.elements.remove(id).is_some()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_document_height(&mut self, height: f64) {
        self.document_height = height.max(0.0);
    }

    pub fn style(&self, id: &ElementId) -> Option<&AppliedStyle> {
        self.styles.get(id)
    }

    pub fn props(&self, id: &ElementId) -> Option<Props> {
        self.styles.get(id).and_then(|s| s.props)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn style_mut(&mut self, id: &ElementId) -> Option<&mut AppliedStyle> {
        if !self.elements.contains_key(id) {
            tracing::trace!(%id, "style write to missing element dropped");
            return None;
        }
        Some(self.styles.entry(id.clone()).or_default())
    }
}

impl Geometry for MemoryDocument {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn element_bounds(&self, id: &ElementId) -> Option<Rect> {
        self.elements.get(id).map(|e| e.bounds)
    }

    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .filter(|id| {
                self.elements
                    .get(*id)
                    .is_some_and(|e| e.classes.iter().any(|c| c == class))
            })
            .cloned()
            .collect()
    }
}

impl StyleSink for MemoryDocument {
    fn apply(&mut self, id: &ElementId, props: &Props) {
        if let Some(style) = self.style_mut(id) {
            style.props = Some(*props);
            style.writes += 1;
        }
    }

    fn set_progress_width(&mut self, id: &ElementId, percent: f64) -> bool {
        match self.style_mut(id) {
            Some(style) => {
                style.width_percent = Some(percent);
                true
            }
            None => false,
        }
    }

    fn set_clip_path(&mut self, id: &ElementId, css: &str) {
        if let Some(style) = self.style_mut(id) {
            style.clip_path = Some(css.to_owned());
        }
    }

    fn set_displayed(&mut self, id: &ElementId, displayed: bool) {
        if let Some(style) = self.style_mut(id) {
            style.displayed = Some(displayed);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/memory.rs"]
mod tests;
