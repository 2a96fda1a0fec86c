use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::{
    clock::frame_clock::LagSmoothing,
    counter::animator::DEFAULT_COUNTER_DURATION_MS,
    foundation::{
        core::ElementId,
        error::{RevealError, RevealResult},
    },
    menu::controller::MenuConfig,
    reveal::preset::{Preset, PresetTable, RuleOverride},
    scroll::{progress::DEFAULT_PROGRESS_ELEMENT, smooth::SmoothScrollConfig},
};

/// Active-section tracking.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub throttle_ms: f64,
    /// Element whose height is added to the scroll offset to find the reading line.
    pub header: ElementId,
    /// Navigation sections, in registration order.
    pub sections: Vec<ElementId>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 100.0,
            header: ElementId::new("header"),
            sections: ["home", "about", "skills", "projects", "contact"]
                .into_iter()
                .map(ElementId::new)
                .collect(),
        }
    }
}

/// Count-up stats.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_COUNTER_DURATION_MS,
        }
    }
}

/// Every tunable of a page. A partial JSON document overrides only the
/// fields it names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub presets: BTreeMap<Preset, RuleOverride>,
    pub smooth_scroll: SmoothScrollConfig,
    /// Disabled unless set.
    pub lag_smoothing: Option<LagSmoothing>,
    pub tracker: TrackerConfig,
    pub counter: CounterConfig,
    pub menu: MenuConfig,
    pub progress_element: ElementId,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            presets: BTreeMap::new(),
            smooth_scroll: SmoothScrollConfig::default(),
            lag_smoothing: None,
            tracker: TrackerConfig::default(),
            counter: CounterConfig::default(),
            menu: MenuConfig::default(),
            progress_element: ElementId::new(DEFAULT_PROGRESS_ELEMENT),
        }
    }
}

impl MotionConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RevealResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RevealError::config(format!("parse motion config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> RevealResult<Self> {
        let f = File::open(path).map_err(|e| {
            RevealError::config(format!("open motion config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(overrides = cfg.presets.len(), "motion config loaded");
        Ok(cfg)
    }

    /// Resolved preset rules with overrides applied.
    pub fn preset_table(&self) -> PresetTable {
        PresetTable::with_overrides(&self.presets)
    }

    pub fn validate(&self) -> RevealResult<()> {
        self.preset_table().validate()?;

        let s = &self.smooth_scroll;
        if !(s.damping > 0.0 && s.damping <= 1.0) {
            return Err(RevealError::validation(format!(
                "smooth_scroll.damping must be in (0, 1], got {}",
                s.damping
            )));
        }
        positive("smooth_scroll.wheel_multiplier", s.wheel_multiplier)?;
        positive("smooth_scroll.snap_threshold", s.snap_threshold)?;

        if let Some(lag) = self.lag_smoothing {
            positive("lag_smoothing.threshold_ms", lag.threshold_ms)?;
            positive("lag_smoothing.adjusted_ms", lag.adjusted_ms)?;
        }

        positive("tracker.throttle_ms", self.tracker.throttle_ms)?;
        let mut seen = std::collections::BTreeSet::new();
        for id in &self.tracker.sections {
            if id.as_str().is_empty() {
                return Err(RevealError::validation("tracker.sections: empty section id"));
            }
            if !seen.insert(id) {
                return Err(RevealError::validation(format!(
                    "tracker.sections: duplicate section id '{id}'"
                )));
            }
        }

        positive("counter.duration_ms", self.counter.duration_ms)?;

        let m = &self.menu;
        positive("menu.clip_duration_s", m.clip_duration_s)?;
        positive("menu.item_duration_s", m.item_duration_s)?;
        non_negative("menu.item_stagger_s", m.item_stagger_s)?;
        non_negative("menu.clip.closed_radius", m.clip.closed_radius)?;
        if m.overlay.as_str().is_empty() {
            return Err(RevealError::validation("menu.overlay: empty element id"));
        }
        Ok(())
    }
}

fn positive(field: &str, v: f64) -> RevealResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(RevealError::validation(format!("{field} must be > 0, got {v}")))
    }
}

fn non_negative(field: &str, v: f64) -> RevealResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(RevealError::validation(format!("{field} must be >= 0, got {v}")))
    }
}
