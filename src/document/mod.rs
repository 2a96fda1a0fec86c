//! Seams to the host page: layout queries in, style writes out.
//!
//! Nothing in the animation layer reads or writes a real DOM. Hosts implement
//! [`Geometry`] and [`StyleSink`]; [`MemoryDocument`] implements both for
//! headless runs and tests.

pub(crate) mod memory;

use crate::{
    animation::tween::Props,
    foundation::core::{ElementId, Rect, Viewport},
};

/// Read-only layout provider.
pub trait Geometry {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Full scrollable height in px.
    fn document_height(&self) -> f64;

    /// Element box in document coordinates, `None` if the element does not exist.
    fn element_bounds(&self, id: &ElementId) -> Option<Rect>;

    /// Ids of elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<ElementId>;
}

/// Write side of the page. Writes to missing elements are dropped.
pub trait StyleSink {
    /// Write opacity, vertical offset and scale.
    fn apply(&mut self, id: &ElementId, props: &Props);

    /// Set an element's width as a percentage. Returns `false` if it is missing.
    fn set_progress_width(&mut self, id: &ElementId, percent: f64) -> bool;

    /// Set a CSS `clip-path` value.
    fn set_clip_path(&mut self, id: &ElementId, css: &str);

    /// Toggle between `display: block` and `display: none`.
    fn set_displayed(&mut self, id: &ElementId, displayed: bool);

    /// Lock or unlock native scrolling of the page body.
    fn set_scroll_locked(&mut self, locked: bool);
}

/// A page that can be both measured and styled.
pub trait Document: Geometry + StyleSink {}

impl<T: Geometry + StyleSink + ?Sized> Document for T {}
