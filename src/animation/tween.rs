use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Circle, Point},
        math::lerp,
    },
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp(*a, *b, t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Circle {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Circle::new(
            <Point as Lerp>::lerp(&a.center, &b.center, t),
            <f64 as Lerp>::lerp(&a.radius, &b.radius, t),
        )
    }
}

/// Animated visual properties of one element.
///
/// Fields a preset does not mention keep their identity value
/// (`opacity 1`, `y 0`, `scale 1`, visible).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Props {
    pub opacity: f64,
    /// Vertical offset in px; positive moves down.
    pub y: f64,
    pub scale: f64,
    pub visible: bool,
}

impl Props {
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        y: 0.0,
        scale: 1.0,
        visible: true,
    };

    pub const fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl Default for Props {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Lerp for Props {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Visibility is discrete: it takes the end value once the tween has begun.
        let visible = if t <= 0.0 { a.visible } else { b.visible };
        Self {
            opacity: lerp(a.opacity, b.opacity, t),
            y: lerp(a.y, b.y, t),
            scale: lerp(a.scale, b.scale, t),
            visible,
        }
    }
}

/// A one-shot `from -> to` transition sampled by elapsed seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub delay_s: f64,
    pub duration_s: f64,
    pub ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, duration_s: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            delay_s: 0.0,
            duration_s,
            ease,
        }
    }

    pub fn with_delay(mut self, delay_s: f64) -> Self {
        self.delay_s = delay_s.max(0.0);
        self
    }

    pub fn end_s(&self) -> f64 {
        self.delay_s + self.duration_s.max(0.0)
    }

    pub fn is_done(&self, elapsed_s: f64) -> bool {
        elapsed_s >= self.end_s()
    }

    /// Linear progress in `[0, 1]`, before easing.
    pub fn progress(&self, elapsed_s: f64) -> f64 {
        let local = elapsed_s - self.delay_s;
        if local <= 0.0 {
            return 0.0;
        }
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        (local / self.duration_s).min(1.0)
    }

    pub fn sample(&self, elapsed_s: f64) -> T {
        let t = self.progress(elapsed_s);
        if t <= 0.0 {
            return self.from.clone();
        }
        if t >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
