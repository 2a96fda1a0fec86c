use std::{collections::BTreeSet, fs::File, io::BufReader, path::Path};

use crate::{
    clock::frame_clock::ManualScheduler,
    config::MotionConfig,
    document::memory::{MemoryDocument, MemoryElement},
    foundation::{
        core::{ElementId, Rect, Viewport},
        error::{RevealError, RevealResult},
    },
    page::{CounterSpec, Page, PageEvents, PageSnapshot},
};

/// One laid-out element of a scenario document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioElement {
    pub id: ElementId,
    pub bounds: Rect,
    /// Marker classes such as `Fade_Up`.
    #[serde(default)]
    pub classes: Vec<String>,
}

/// Host input replayed at a timestamp.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    Wheel {
        delta: f64,
    },
    ScrollTo {
        target: f64,
        #[serde(default)]
        immediate: bool,
    },
    Navigate {
        section: ElementId,
    },
    ToggleMenu,
    SelectItem {
        index: usize,
    },
    SelectHome,
    Resize {
        width: f64,
        height: f64,
        #[serde(default)]
        document_height: Option<f64>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedInput {
    pub at_ms: f64,
    #[serde(flatten)]
    pub input: Input,
}

/// A headless page run: layout, counters and a scripted input timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    pub viewport: Viewport,
    pub document_height: f64,
    #[serde(default)]
    pub elements: Vec<ScenarioElement>,
    #[serde(default)]
    pub counters: Vec<CounterSpec>,
    #[serde(default)]
    pub inputs: Vec<TimedInput>,
    pub duration_ms: f64,
    #[serde(default = "default_fps")]
    pub fps: f64,
}

/// Upper bound on the frames one scenario may run (one hour at 60fps).
pub const MAX_SCENARIO_FRAMES: f64 = 216_000.0;

fn default_fps() -> f64 {
    60.0
}

/// Sampled snapshots plus every event of the run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScenarioTrace {
    pub frames: Vec<PageSnapshot>,
    pub events: PageEvents,
}

impl Scenario {
    pub fn from_reader<R: std::io::Read>(r: R) -> RevealResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RevealError::validation(format!("parse scenario JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RevealError::validation(format!("open scenario JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject layouts, rates or timelines that cannot be replayed.
    pub fn validate(&self) -> RevealResult<()> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(RevealError::validation("viewport must have a positive size"));
        }
        if !(self.document_height.is_finite() && self.document_height >= 0.0) {
            return Err(RevealError::validation("document_height must be >= 0"));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(RevealError::validation("fps must be > 0"));
        }
        if !(self.duration_ms.is_finite() && self.duration_ms >= 0.0) {
            return Err(RevealError::validation("duration_ms must be >= 0"));
        }
        let frames = self.duration_ms * self.fps / 1000.0;
        if frames > MAX_SCENARIO_FRAMES {
            return Err(RevealError::validation(format!(
                "scenario spans {frames:.0} frames, more than the {MAX_SCENARIO_FRAMES} allowed"
            )));
        }
        let mut ids = BTreeSet::new();
        for e in &self.elements {
            if !ids.insert(&e.id) {
                return Err(RevealError::validation(format!(
                    "duplicate element id '{}'",
                    e.id
                )));
            }
        }
        for c in &self.counters {
            if !ids.contains(&c.element) {
                return Err(RevealError::validation(format!(
                    "counter element '{}' is not declared",
                    c.element
                )));
            }
        }
        if let Some(i) = self.inputs.iter().find(|i| !i.at_ms.is_finite()) {
            return Err(RevealError::validation(format!(
                "input {:?} has a non-finite timestamp",
                i.input
            )));
        }
        Ok(())
    }

    pub fn document(&self) -> MemoryDocument {
        let mut doc = MemoryDocument::new(self.viewport, self.document_height);
        for e in &self.elements {
            doc.insert_element(
                e.id.clone(),
                MemoryElement {
                    bounds: e.bounds,
                    classes: e.classes.clone(),
                },
            );
        }
        doc
    }

    /// Run the scenario at its frame rate, keeping every `every`-th snapshot
    /// plus the last one.
    #[tracing::instrument(skip_all, fields(duration_ms = self.duration_ms, fps = self.fps))]
    pub fn run(&self, config: &MotionConfig, every: usize) -> RevealResult<ScenarioTrace> {
        self.validate()?;
        if every == 0 {
            return Err(RevealError::validation("snapshot interval must be >= 1"));
        }

        let page = Page::mount(
            config,
            self.document(),
            &self.counters,
            ManualScheduler::new(),
            0.0,
        )?;

        let mut inputs: Vec<&TimedInput> = self.inputs.iter().collect();
        inputs.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        let mut pending = inputs.into_iter().peekable();

        let frame_ms = 1000.0 / self.fps;
        let last = (self.duration_ms / frame_ms).ceil() as u64;
        let mut frames = Vec::new();
        let mut events = PageEvents::default();

        for i in 0..=last {
            let now_ms = i as f64 * frame_ms;
            while let Some(input) = pending.next_if(|input| input.at_ms <= now_ms) {
                apply(&page, &input.input);
            }
            page.frame(now_ms);
            events.append(page.take_events());
            if i as usize % every == 0 || i == last {
                frames.push(page.snapshot());
            }
        }

        tracing::debug!(
            frames = frames.len(),
            reveals = events.reveals.len(),
            "scenario finished"
        );
        Ok(ScenarioTrace { frames, events })
    }
}

fn apply(page: &Page<MemoryDocument>, input: &Input) {
    match input {
        Input::Wheel { delta } => {
            page.wheel(*delta);
        }
        Input::ScrollTo { target, immediate } => page.scroll_to(*target, *immediate),
        Input::Navigate { section } => {
            page.navigate(section);
        }
        Input::ToggleMenu => {
            page.toggle_menu();
        }
        Input::SelectItem { index } => {
            page.select_menu_item(*index);
        }
        Input::SelectHome => {
            page.select_home();
        }
        Input::Resize {
            width,
            height,
            document_height,
        } => {
            {
                let mut doc = page.document_mut();
                doc.set_viewport(Viewport::new(*width, *height));
                if let Some(h) = document_height {
                    doc.set_document_height(*h);
                }
            }
            page.refresh_layout();
        }
    }
}
