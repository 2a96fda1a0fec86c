use crate::{
    animation::tween::Lerp,
    foundation::core::{Circle, Point, Viewport},
};

/// Circular clip mask of the overlay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipGeometry {
    pub center: Point,
    pub radius: f64,
}

/// Constants that place the closed and open circles relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Radius of the parked circle.
    pub closed_radius: f64,
    /// How far outside the top-right corner the parked circle sits.
    pub closed_offset: f64,
    /// Anchor of the expanded circle, from the top-left corner.
    pub open_anchor: Point,
    /// Added to `2 * viewport height` for the expanded radius.
    pub open_radius_margin: f64,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            closed_radius: 30.0,
            closed_offset: 30.0,
            open_anchor: Point::new(40.0, 40.0),
            open_radius_margin: 200.0,
        }
    }
}

impl ClipGeometry {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Small circle parked just outside the top-right corner.
    pub fn closed(viewport: Viewport, cfg: &ClipConfig) -> Self {
        Self::new(
            Point::new(viewport.width + cfg.closed_offset, -cfg.closed_offset),
            cfg.closed_radius,
        )
    }

    /// Circle from the top-left anchor large enough to cover the viewport.
    pub fn open(viewport: Viewport, cfg: &ClipConfig) -> Self {
        Self::new(
            cfg.open_anchor,
            viewport.height * 2.0 + cfg.open_radius_margin,
        )
    }

    pub fn to_circle(self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    /// Whether every viewport corner lies inside the circle.
    pub fn covers(self, viewport: Viewport) -> bool {
        [
            Point::new(0.0, 0.0),
            Point::new(viewport.width, 0.0),
            Point::new(0.0, viewport.height),
            Point::new(viewport.width, viewport.height),
        ]
        .into_iter()
        .all(|p| p.distance(self.center) <= self.radius)
    }

    /// CSS `clip-path` value.
    pub fn to_css(self) -> String {
        format!(
            "circle({}px at {}px {}px)",
            fmt_px(self.radius),
            fmt_px(self.center.x),
            fmt_px(self.center.y)
        )
    }
}

impl Lerp for ClipGeometry {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            center: a.center.lerp(b.center, t),
            radius: (a.radius + (b.radius - a.radius) * t).max(0.0),
        }
    }
}

fn fmt_px(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/menu/geometry.rs"]
mod tests;
