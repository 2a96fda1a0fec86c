use std::collections::BTreeMap;

use crate::{
    animation::tween::{Props, Tween},
    clock::frame_clock::FrameTick,
    document::{Document, StyleSink},
    foundation::core::ElementId,
    reveal::preset::{Preset, PresetTable},
    scroll::state::ScrollState,
};

/// One registered element. `revealed` flips to `true` exactly once.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementEntry {
    pub id: ElementId,
    pub preset: Preset,
    pub revealed: bool,
}

/// Emitted when an element enters its reveal transition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealEvent {
    pub id: ElementId,
    pub preset: Preset,
    /// Position within the batch that became visible on this tick.
    pub batch_index: usize,
    pub delay_s: f64,
    pub frame: u64,
}

#[derive(Debug)]
struct ActiveReveal {
    id: ElementId,
    tween: Tween<Props>,
    elapsed_s: f64,
}

/// Batched, once-only reveal-on-scroll.
///
/// Scroll updates are only recorded by [`observe`](Self::observe); intersection
/// is evaluated at most once per frame in [`on_frame`](Self::on_frame), against
/// the latest recorded state.
#[derive(Debug, Default)]
pub struct ScrollAnimator {
    table: PresetTable,
    groups: BTreeMap<Preset, Vec<ElementEntry>>,
    pending: Option<ScrollState>,
    active: Vec<ActiveReveal>,
}

impl ScrollAnimator {
    pub fn new(table: PresetTable) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    pub fn table(&self) -> &PresetTable {
        &self.table
    }

    /// Register one element under `preset` and put it in the preset's `from` state.
    /// Registering an id twice is a no-op.
    pub fn register(&mut self, id: ElementId, preset: Preset, sink: &mut dyn StyleSink) -> bool {
        if self.entry(&id).is_some() {
            return false;
        }
        sink.apply(&id, &self.table.get(preset).from);
        self.groups.entry(preset).or_default().push(ElementEntry {
            id,
            preset,
            revealed: false,
        });
        true
    }

    /// Register every element carrying a preset marker class (or the bare preset
    /// name). Returns how many were added.
    pub fn register_marked(&mut self, doc: &mut dyn Document) -> usize {
        let mut added = 0;
        for preset in Preset::ALL {
            for class in [preset.marker(), preset.name()] {
                for id in doc.elements_with_class(class) {
                    if self.register(id, preset, doc) {
                        added += 1;
                    }
                }
            }
        }
        tracing::debug!(added, "registered marked reveal elements");
        added
    }

    /// Forget an element (it was removed from the page).
    pub fn unregister(&mut self, id: &ElementId) -> bool {
        self.active.retain(|a| &a.id != id);
        let mut removed = false;
        for entries in self.groups.values_mut() {
            let before = entries.len();
            entries.retain(|e| &e.id != id);
            removed |= entries.len() != before;
        }
        removed
    }

    pub fn entry(&self, id: &ElementId) -> Option<&ElementEntry> {
        self.groups.values().flatten().find(|e| &e.id == id)
    }

    pub fn is_revealed(&self, id: &ElementId) -> bool {
        self.entry(id).is_some_and(|e| e.revealed)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ElementEntry> {
        self.groups.values().flatten()
    }

    pub fn unrevealed_count(&self) -> usize {
        self.entries().filter(|e| !e.revealed).count()
    }

    pub fn running_count(&self) -> usize {
        self.active.len()
    }

    /// Record the latest scroll state; evaluated on the next frame.
    pub fn observe(&mut self, state: ScrollState) {
        self.pending = Some(state);
    }

    /// Advance running transitions, then reveal the batch that crossed its
    /// trigger line since the last frame.
    pub fn on_frame(&mut self, tick: &FrameTick, doc: &mut dyn Document) -> Vec<RevealEvent> {
        self.advance(tick.delta_s(), doc);
        match self.pending.take() {
            Some(state) => self.evaluate(&state, tick.frame, doc),
            None => Vec::new(),
        }
    }

    fn advance(&mut self, dt_s: f64, sink: &mut dyn StyleSink) {
        if self.active.is_empty() {
            return;
        }
        for reveal in &mut self.active {
            reveal.elapsed_s += dt_s;
            sink.apply(&reveal.id, &reveal.tween.sample(reveal.elapsed_s));
        }
        self.active.retain(|r| !r.tween.is_done(r.elapsed_s));
    }

    fn evaluate(
        &mut self,
        state: &ScrollState,
        frame: u64,
        doc: &mut dyn Document,
    ) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        for (preset, entries) in &mut self.groups {
            let rule = self.table.get(*preset);
            let trigger_line = state.viewport_bottom() - rule.trigger_offset;
            let mut batch_index = 0usize;

            for entry in entries.iter_mut().filter(|e| !e.revealed) {
                let Some(bounds) = doc.element_bounds(&entry.id) else {
                    tracing::trace!(id = %entry.id, "reveal target missing from page");
                    continue;
                };
                if bounds.y0 > trigger_line {
                    continue;
                }

                entry.revealed = true;
                let delay_s = rule.delay_for(batch_index);
                let tween = Tween::new(rule.from, rule.to, rule.duration_s, rule.ease)
                    .with_delay(delay_s);
                doc.apply(&entry.id, &tween.sample(0.0));
                self.active.push(ActiveReveal {
                    id: entry.id.clone(),
                    tween,
                    elapsed_s: 0.0,
                });
                events.push(RevealEvent {
                    id: entry.id.clone(),
                    preset: *preset,
                    batch_index,
                    delay_s,
                    frame,
                });
                batch_index += 1;
            }

            if batch_index > 0 {
                tracing::debug!(%preset, count = batch_index, frame, "reveal batch");
            }
        }
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/animator.rs"]
mod tests;
