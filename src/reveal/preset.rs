use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{
    animation::{ease::Ease, tween::Props},
    foundation::error::{RevealError, RevealResult},
};

/// Named reveal animation. Elements opt in through a marker class.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Preset {
    Stagger,
    FadeUp,
    FadeDown,
    FadeIn,
    SpringUp,
    PopIn,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Stagger,
        Preset::FadeUp,
        Preset::FadeDown,
        Preset::FadeIn,
        Preset::SpringUp,
        Preset::PopIn,
    ];

    /// Marker class name used in page markup.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Stagger => "Fade_Stagger",
            Self::FadeUp => "Fade_Up",
            Self::FadeDown => "Fade_Down",
            Self::FadeIn => "Fade_In",
            Self::SpringUp => "Spring_Up",
            Self::PopIn => "Pop_In",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Stagger => "Stagger",
            Self::FadeUp => "FadeUp",
            Self::FadeDown => "FadeDown",
            Self::FadeIn => "FadeIn",
            Self::SpringUp => "SpringUp",
            Self::PopIn => "PopIn",
        }
    }

    /// Accepts either the marker class or the preset name.
    pub fn from_marker(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.marker() == s || p.name() == s)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = RevealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_marker(s)
            .ok_or_else(|| RevealError::validation(format!("unknown reveal preset '{s}'")))
    }
}

/// One reveal transition: `from -> to`, played once per element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationRule {
    pub from: Props,
    pub to: Props,
    pub duration_s: f64,
    pub ease: Ease,
    /// Delay between consecutive elements of one batch.
    pub stagger_s: f64,
    /// Delay applied to the whole batch.
    pub delay_s: f64,
    /// Element tops must cross `viewport_bottom - trigger_offset` (px).
    pub trigger_offset: f64,
    pub once: bool,
}

impl AnimationRule {
    /// `delay_i = delay + i * stagger` for the `i`-th element revealed in a batch.
    pub fn delay_for(&self, batch_index: usize) -> f64 {
        self.delay_s + batch_index as f64 * self.stagger_s
    }

    pub fn validate(&self, preset: Preset) -> RevealResult<()> {
        let bad = |what: &str| RevealError::validation(format!("preset {preset}: {what}"));
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(bad("duration must be > 0"));
        }
        if !(self.stagger_s.is_finite() && self.stagger_s >= 0.0) {
            return Err(bad("stagger must be >= 0"));
        }
        if !(self.delay_s.is_finite() && self.delay_s >= 0.0) {
            return Err(bad("delay must be >= 0"));
        }
        if !self.trigger_offset.is_finite() {
            return Err(bad("trigger offset must be finite"));
        }
        if !self.once {
            return Err(bad("reveals are one-shot; `once` must be true"));
        }
        Ok(())
    }
}

pub const STAGGER: AnimationRule = AnimationRule {
    from: Props::IDENTITY.opacity(0.0).y(50.0),
    to: Props::IDENTITY,
    duration_s: 1.125,
    ease: Ease::Power2Out,
    stagger_s: 0.125,
    delay_s: 0.125,
    trigger_offset: 0.0,
    once: true,
};

pub const FADE_UP: AnimationRule = AnimationRule {
    from: Props::IDENTITY.opacity(0.0).y(50.0),
    to: Props::IDENTITY,
    duration_s: 1.0,
    ease: Ease::Power1Out,
    stagger_s: 0.15,
    delay_s: 0.0,
    trigger_offset: 100.0,
    once: true,
};

pub const FADE_DOWN: AnimationRule = AnimationRule {
    from: Props::IDENTITY.opacity(0.0).y(-50.0),
    to: Props::IDENTITY,
    duration_s: 1.0,
    ease: Ease::Power2Out,
    stagger_s: 0.15,
    delay_s: 0.25,
    trigger_offset: 100.0,
    once: true,
};

pub const FADE_IN: AnimationRule = AnimationRule {
    from: Props::IDENTITY.opacity(0.0),
    to: Props::IDENTITY,
    duration_s: 1.0,
    ease: Ease::Power1Out,
    stagger_s: 0.125,
    delay_s: 0.0,
    trigger_offset: 0.0,
    once: true,
};

pub const SPRING_UP: AnimationRule = AnimationRule {
    from: Props::IDENTITY.opacity(0.0).scale(0.75),
    to: Props::IDENTITY,
    duration_s: 1.5,
    ease: Ease::SPRING,
    stagger_s: 0.15,
    delay_s: 0.0,
    trigger_offset: 0.0,
    once: true,
};

pub const POP_IN: AnimationRule = AnimationRule {
    from: Props::IDENTITY.opacity(0.0).scale(0.85).hidden(),
    to: Props::IDENTITY,
    duration_s: 1.2,
    ease: Ease::Power3Out,
    stagger_s: 0.0,
    delay_s: 0.4,
    trigger_offset: 100.0,
    once: true,
};

/// Partial override of a preset; unset fields keep the built-in value.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleOverride {
    pub from: Option<Props>,
    pub to: Option<Props>,
    pub duration_s: Option<f64>,
    pub ease: Option<Ease>,
    pub stagger_s: Option<f64>,
    pub delay_s: Option<f64>,
    pub trigger_offset: Option<f64>,
}

impl RuleOverride {
    pub fn apply_to(&self, rule: &mut AnimationRule) {
        if let Some(v) = self.from {
            rule.from = v;
        }
        if let Some(v) = self.to {
            rule.to = v;
        }
        if let Some(v) = self.duration_s {
            rule.duration_s = v;
        }
        if let Some(v) = self.ease {
            rule.ease = v;
        }
        if let Some(v) = self.stagger_s {
            rule.stagger_s = v;
        }
        if let Some(v) = self.delay_s {
            rule.delay_s = v;
        }
        if let Some(v) = self.trigger_offset {
            rule.trigger_offset = v;
        }
    }
}

/// The six presets, each resolvable to exactly one rule.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PresetTable {
    rules: BTreeMap<Preset, AnimationRule>,
}

impl PresetTable {
    pub fn builtin(preset: Preset) -> AnimationRule {
        match preset {
            Preset::Stagger => STAGGER,
            Preset::FadeUp => FADE_UP,
            Preset::FadeDown => FADE_DOWN,
            Preset::FadeIn => FADE_IN,
            Preset::SpringUp => SPRING_UP,
            Preset::PopIn => POP_IN,
        }
    }

    pub fn with_overrides(overrides: &BTreeMap<Preset, RuleOverride>) -> Self {
        let mut table = Self::default();
        for (preset, o) in overrides {
            if let Some(rule) = table.rules.get_mut(preset) {
                o.apply_to(rule);
            }
        }
        table
    }

    pub fn get(&self, preset: Preset) -> AnimationRule {
        self.rules
            .get(&preset)
            .copied()
            .unwrap_or_else(|| Self::builtin(preset))
    }

    pub fn set(&mut self, preset: Preset, rule: AnimationRule) {
        self.rules.insert(preset, rule);
    }

    pub fn validate(&self) -> RevealResult<()> {
        for (preset, rule) in &self.rules {
            rule.validate(*preset)?;
        }
        Ok(())
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self {
            rules: Preset::ALL
                .into_iter()
                .map(|p| (p, Self::builtin(p)))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/preset.rs"]
mod tests;
