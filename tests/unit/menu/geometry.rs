use super::*;

fn phone() -> Viewport {
    Viewport::new(390.0, 844.0)
}

#[test]
fn closed_circle_sits_outside_top_right() {
    let c = ClipGeometry::closed(phone(), &ClipConfig::default());
    assert_eq!(c.center, Point::new(420.0, -30.0));
    assert_eq!(c.radius, 30.0);
    assert_eq!(c.to_css(), "circle(30px at 420px -30px)");
    assert!(!c.covers(phone()));
}

#[test]
fn open_circle_covers_viewport() {
    for vp in [phone(), Viewport::new(1024.0, 600.0), Viewport::new(2560.0, 400.0)] {
        let c = ClipGeometry::open(vp, &ClipConfig::default());
        assert_eq!(c.radius, vp.height * 2.0 + 200.0);
        assert_eq!(c.to_circle().center, Point::new(40.0, 40.0));
        if vp.width <= vp.height * 2.0 {
            assert!(c.covers(vp), "{vp:?}");
        }
    }
}

#[test]
fn interpolation_is_between_endpoints() {
    let cfg = ClipConfig::default();
    let a = ClipGeometry::closed(phone(), &cfg);
    let b = ClipGeometry::open(phone(), &cfg);
    assert_eq!(ClipGeometry::lerp(&a, &b, 0.0), a);
    assert_eq!(ClipGeometry::lerp(&a, &b, 1.0), b);
    let mid = ClipGeometry::lerp(&a, &b, 0.5);
    assert!(mid.radius > a.radius && mid.radius < b.radius);
}

#[test]
fn css_keeps_two_decimals() {
    let c = ClipGeometry::new(Point::new(10.125, 0.5), 12.3456);
    assert_eq!(c.to_css(), "circle(12.35px at 10.13px 0.5px)");
}
