//! 2D geometry helpers
//!
//! Headings use the course's compass convention: 0° points along +y (north,
//! toward the upwind gate) and angles grow clockwise. Everything that turns
//! a heading into a vector must go through [`to_radians`].

use glam::DVec2;

/// A point on the course (course units, +y is north)
pub type Point = DVec2;

/// Rectangle given by two opposite corners
pub type Box2 = (Point, Point);

#[inline]
pub fn add(a: Point, b: Point) -> Point {
    a + b
}

#[inline]
pub fn sub(a: Point, b: Point) -> Point {
    a - b
}

#[inline]
pub fn neg(p: Point) -> Point {
    -p
}

#[inline]
pub fn scale(s: f64, p: Point) -> Point {
    p * s
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Convert a compass heading (degrees) to a math angle (radians)
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    (90.0 - degrees) * std::f64::consts::PI / 180.0
}

/// True if `p` lies strictly inside the box; points on an edge are outside
pub fn in_box(p: Point, (c1, c2): Box2) -> bool {
    let min = c1.min(c2);
    let max = c1.max(c2);
    p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
}

/// Corners of a `w` by `h` box centered on `center` (max corner first)
pub fn to_box(center: Point, w: f64, h: f64) -> Box2 {
    (
        DVec2::new(center.x + w / 2.0, center.y + h / 2.0),
        DVec2::new(center.x - w / 2.0, center.y - h / 2.0),
    )
}

/// Advance `p` for `delta` seconds at `velocity` along compass `heading`
pub fn move_point(p: Point, delta: f64, velocity: f64, heading: f64) -> Point {
    let angle = to_radians(heading);
    DVec2::new(
        p.x + delta * velocity * angle.cos(),
        p.y + delta * velocity * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        distance(a, b) < 1e-9
    }

    #[test]
    fn test_point_arithmetic() {
        let a = DVec2::new(1.0, 2.0);
        let b = DVec2::new(3.0, -1.0);
        assert_eq!(add(a, b), DVec2::new(4.0, 1.0));
        assert_eq!(sub(a, b), DVec2::new(-2.0, 3.0));
        assert_eq!(neg(a), DVec2::new(-1.0, -2.0));
        assert_eq!(scale(2.0, b), DVec2::new(6.0, -2.0));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(DVec2::ZERO, DVec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_in_box_is_strict() {
        let bounds = to_box(DVec2::ZERO, 100.0, 50.0);
        assert!(in_box(DVec2::new(0.0, 0.0), bounds));
        assert!(in_box(DVec2::new(49.9, 24.9), bounds));
        // Edges and corners are outside
        assert!(!in_box(DVec2::new(50.0, 0.0), bounds));
        assert!(!in_box(DVec2::new(-50.0, -25.0), bounds));
        assert!(!in_box(DVec2::new(0.0, 26.0), bounds));
    }

    #[test]
    fn test_in_box_corner_order() {
        let (max, min) = to_box(DVec2::new(10.0, 10.0), 4.0, 4.0);
        assert!(in_box(DVec2::new(10.0, 10.0), (max, min)));
        assert!(in_box(DVec2::new(10.0, 10.0), (min, max)));
    }

    #[test]
    fn test_to_box() {
        let (max, min) = to_box(DVec2::new(1.0, 2.0), 10.0, 4.0);
        assert_eq!(max, DVec2::new(6.0, 4.0));
        assert_eq!(min, DVec2::new(-4.0, 0.0));
    }

    #[test]
    fn test_move_point_compass_convention() {
        // 0° moves north (+y), 90° moves east (+x)
        let north = move_point(DVec2::ZERO, 1.0, 10.0, 0.0);
        assert!(close(north, DVec2::new(0.0, 10.0)));

        let east = move_point(DVec2::ZERO, 1.0, 10.0, 90.0);
        assert!(close(east, DVec2::new(10.0, 0.0)));

        let south = move_point(DVec2::new(5.0, 5.0), 0.5, 4.0, 180.0);
        assert!(close(south, DVec2::new(5.0, 3.0)));

        let west = move_point(DVec2::ZERO, 2.0, 1.0, 270.0);
        assert!(close(west, DVec2::new(-2.0, 0.0)));
    }

    #[test]
    fn test_move_point_zero_delta() {
        let p = DVec2::new(3.0, -7.0);
        assert_eq!(move_point(p, 0.0, 25.0, 123.0), p);
    }
}
