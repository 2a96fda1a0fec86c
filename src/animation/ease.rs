use std::f64::consts::TAU;

/// Easing curves used by reveal presets and the overlay menu.
///
/// `PowerNOut` follow the usual "powerN.out" family: `Power1Out` is a quadratic
/// ease-out and the default curve for presets that do not name one.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    #[default]
    Power1Out,
    Power2Out,
    Power3Out,
    /// Decaying sine overshoot. `amplitude < 1` shortens the period.
    ElasticOut { amplitude: f64, period: f64 },
    /// Overshoots the target by `overshoot` before settling.
    BackOut { overshoot: f64 },
}

impl Ease {
    pub const SPRING: Self = Self::ElasticOut {
        amplitude: 0.6,
        period: 0.14,
    };

    pub const BACK: Self = Self::BackOut { overshoot: 1.7 };

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
            Self::BackOut { overshoot } => {
                let q = t - 1.0;
                q * q * ((overshoot + 1.0) * q + overshoot) + 1.0
            }
        }
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    let a = if amplitude >= 1.0 { amplitude } else { 1.0 };
    let period = if period > 0.0 { period } else { 0.3 };
    let span = period / if amplitude < 1.0 && amplitude > 0.0 { amplitude } else { 1.0 };
    let phase = span / TAU * (1.0 / a).asin();
    let freq = TAU / span;
    a * 2f64.powf(-10.0 * t) * ((t - phase) * freq).sin() + 1.0
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
