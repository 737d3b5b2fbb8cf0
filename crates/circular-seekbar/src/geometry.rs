use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point on the arc rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orb {
    pub x: i32,
    pub y: i32,
}

impl Orb {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Padding in layout direction terms; `start` is the leading edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub start: f64,
    pub top: f64,
    pub end: f64,
    pub bottom: f64,
}

impl Insets {
    pub fn new(start: f64, top: f64, end: f64, bottom: f64) -> Self {
        Self {
            start,
            top,
            end,
            bottom,
        }
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.start * factor,
            self.top * factor,
            self.end * factor,
            self.bottom * factor,
        )
    }
}

impl std::ops::Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets::new(
            self.start + rhs.start,
            self.top + rhs.top,
            self.end + rhs.end,
            self.bottom + rhs.bottom,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn inset(&self, insets: &Insets) -> Self {
        Self::new(
            self.left + insets.start,
            self.top + insets.top,
            self.right - insets.end,
            self.bottom - insets.bottom,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Wraps any angle into `[0, 360)`.
///
/// Written as `(360 + a % 360) % 360` rather than `rem_euclid`, which can
/// yield exactly `360.0` for tiny negative inputs.
pub fn normalize_degrees(angle: f64) -> f64 {
    (360.0 + angle % 360.0) % 360.0
}

/// `x²/a² + y²/b² <= 1`, with `x` and `y` relative to the ellipse centre.
pub fn inside_ellipse(x: f64, y: f64, a: f64, b: f64) -> bool {
    1.0 >= (x * x) / (a * a) + (y * y) / (b * b)
}

/// The ellipse the arc is drawn on, plus the touch band around it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orbit {
    pub bounds: Rect,
    pub padding: Insets,
    pub start_angle: f64,
    pub touch_radius: f64,
}

impl Orbit {
    /// Lays the arc out inside a view of `size`, keeping `touch_radius` of
    /// clearance so the thumb and stroke never clip at the edges.
    pub fn new(size: Size, padding: Insets, touch_radius: f64, start_angle: f64) -> Self {
        let bounds = Rect::new(
            touch_radius + padding.start,
            touch_radius + padding.top,
            size.width - touch_radius - padding.end,
            size.height - touch_radius - padding.bottom,
        );
        Self {
            bounds,
            padding,
            start_angle,
            touch_radius,
        }
    }

    pub fn point(&self, angle: f64) -> Orb {
        let theta = (angle + self.start_angle).to_radians();
        let x = self.bounds.width() / 2.0 * theta.cos() + self.bounds.center_x();
        let y = self.bounds.height() / 2.0 * theta.sin() + self.bounds.center_y();
        Orb::new((x + 0.5).floor() as i32, (y + 0.5).floor() as i32)
    }

    /// Clockwise angle of `p` measured from the start of the arc.
    pub fn angle(&self, p: Point) -> f64 {
        let dx = p.x - self.bounds.center_x();
        let dy = p.y - self.bounds.center_y();
        normalize_degrees(dy.atan2(dx).to_degrees() - self.start_angle)
    }

    /// Whether `p` lands in the touch-responsive region. Without
    /// `touch_inside` only the band around the arc counts.
    pub fn contains(&self, p: Point, touch_inside: bool) -> bool {
        let dx = p.x - self.bounds.center_x();
        let dy = p.y - self.bounds.center_y();
        let a = self.bounds.center_x() - self.padding.start;
        let b = self.bounds.center_y() - self.padding.top;

        let outer = inside_ellipse(dx, dy, a, b);
        let inner = inside_ellipse(
            dx,
            dy,
            a - self.touch_radius * 2.0,
            b - self.touch_radius * 2.0,
        );
        outer && !(inner && !touch_inside)
    }

    pub fn near(&self, p: Point, orb: Orb) -> bool {
        inside_ellipse(
            p.x - orb.x as f64,
            p.y - orb.y as f64,
            self.touch_radius,
            self.touch_radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit(start_angle: f64) -> Orbit {
        Orbit::new(Size::new(256.0, 256.0), Insets::default(), 12.0, start_angle)
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-15), 0.0);
    }

    #[test]
    fn test_bounds_leave_touch_clearance() {
        let orbit = Orbit::new(
            Size::new(200.0, 100.0),
            Insets::new(4.0, 2.0, 6.0, 8.0),
            10.0,
            0.0,
        );
        assert_eq!(orbit.bounds, Rect::new(14.0, 12.0, 184.0, 82.0));
    }

    #[test]
    fn test_point_on_ellipse() {
        let orbit = orbit(0.0);
        assert_eq!(orbit.point(0.0), Orb::new(244, 128));
        assert_eq!(orbit.point(90.0), Orb::new(128, 244));
        assert_eq!(orbit.point(180.0), Orb::new(12, 128));
    }

    #[test]
    fn test_start_angle_rotates_arc() {
        let rotated = orbit(90.0);
        assert_eq!(rotated.point(0.0), Orb::new(128, 244));
        assert_eq!(rotated.point(90.0), Orb::new(12, 128));
    }

    #[test]
    fn test_angle_of_point_round_trip() {
        let orbit = orbit(90.0);
        for angle in (0..360).step_by(7).map(f64::from) {
            let orb = orbit.point(angle);
            let back = orbit.angle(Point::new(orb.x as f64, orb.y as f64));
            let diff = (back - angle).abs();
            assert!(
                diff < 0.5 || diff > 359.5,
                "angle {angle} came back as {back}"
            );
        }
    }

    #[test]
    fn test_inside_ellipse() {
        assert!(inside_ellipse(0.0, 0.0, 1.0, 1.0));
        assert!(inside_ellipse(3.0, 0.0, 3.0, 1.0));
        assert!(!inside_ellipse(3.0, 0.5, 3.0, 1.0));
    }

    #[test]
    fn test_orbit_annulus() {
        let orbit = orbit(0.0);
        let center = Point::new(128.0, 128.0);
        let on_arc = Point::new(244.0, 128.0);
        let outside = Point::new(255.9, 255.9);

        assert!(orbit.contains(center, true));
        assert!(!orbit.contains(center, false));
        assert!(orbit.contains(on_arc, false));
        assert!(!orbit.contains(outside, true));
    }

    #[test]
    fn test_near_orb() {
        let orbit = orbit(0.0);
        let orb = Orb::new(100, 100);
        assert!(orbit.near(Point::new(108.0, 108.0), orb));
        assert!(!orbit.near(Point::new(110.0, 110.0), orb));
    }
}
