//! Soft-follow camera
//!
//! The camera keeps still while the boat moves around the middle of the
//! screen and only tracks it, one to one, inside a margin band along the
//! visible edges.

use glam::DVec2;

use crate::consts::{CAMERA_MARGIN_X, CAMERA_MARGIN_Y};
use crate::geo::Point;

/// Camera coordinate on one axis after the boat moves from `n` to `n_new`
///
/// `c` is the current camera coordinate, `d` the viewport size on this axis.
pub fn refocus(n: f64, n_new: f64, c: f64, d: f64, margin: f64) -> f64 {
    let max = c + d / 2.0;
    let min = c - d / 2.0;
    let mmax = max - margin;
    let mmin = min + margin;

    if n < min || n > max {
        // Boat off screen (dragged away): leave the camera where the user put it
        c
    } else if n < mmin {
        if n_new < n { c - (n - n_new) } else { c }
    } else if n > mmax {
        if n_new > n { c + (n_new - n) } else { c }
    } else if n_new < mmin {
        c - (n - n_new)
    } else if n_new > mmax {
        c + (n_new - n)
    } else {
        c
    }
}

/// Camera center after the boat moves from `from` to `to`
pub fn center_after_move(from: Point, to: Point, center: Point, viewport: DVec2) -> Point {
    DVec2::new(
        refocus(from.x, to.x, center.x, viewport.x, viewport.x * CAMERA_MARGIN_X),
        refocus(from.y, to.y, center.y, viewport.y, viewport.y * CAMERA_MARGIN_Y),
    )
}

/// Camera center while the pointer is dragged from `drag` to `mouse`
///
/// Pointer coordinates are screen pixels with y pointing down.
pub fn center_after_drag(center: Point, drag: Point, mouse: Point) -> Point {
    center - DVec2::new(mouse.x - drag.x, drag.y - mouse.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: DVec2 = DVec2::new(1000.0, 500.0);

    #[test]
    fn test_dead_zone_keeps_center() {
        // Right edge at 500, margin band starts at 300
        let center = DVec2::ZERO;
        let moved = center_after_move(DVec2::new(100.0, 0.0), DVec2::new(110.0, 0.0), center, VIEWPORT);
        assert_eq!(moved, center);
    }

    #[test]
    fn test_margin_band_tracks_one_to_one() {
        let center = DVec2::new(0.0, 0.0);
        let moved = center_after_move(DVec2::new(350.0, 0.0), DVec2::new(357.5, 0.0), center, VIEWPORT);
        assert_eq!(moved.x, 7.5);
        assert_eq!(moved.y, 0.0);
    }

    #[test]
    fn test_margin_band_ignores_retreat() {
        let center = DVec2::ZERO;
        let moved = center_after_move(DVec2::new(350.0, 0.0), DVec2::new(340.0, 0.0), center, VIEWPORT);
        assert_eq!(moved, center);
    }

    #[test]
    fn test_leaving_dead_zone_tracks_whole_step() {
        assert_eq!(refocus(295.0, 305.0, 0.0, 1000.0, 200.0), 10.0);
        assert_eq!(refocus(-295.0, -305.0, 0.0, 1000.0, 200.0), -10.0);
    }

    #[test]
    fn test_vertical_margin() {
        // Top edge at 250, margin 200, band starts at 50
        let center = DVec2::ZERO;
        let moved = center_after_move(DVec2::new(0.0, 60.0), DVec2::new(0.0, 64.0), center, VIEWPORT);
        assert_eq!(moved.y, 4.0);
        let moved = center_after_move(DVec2::new(0.0, 40.0), DVec2::new(0.0, 44.0), center, VIEWPORT);
        assert_eq!(moved.y, 0.0);
    }

    #[test]
    fn test_off_screen_boat_keeps_center() {
        assert_eq!(refocus(900.0, 910.0, 0.0, 1000.0, 200.0), 0.0);
    }

    #[test]
    fn test_drag_pans_against_pointer() {
        let center = DVec2::new(10.0, 10.0);
        // Pointer moved 5px right and 3px down on screen
        let panned = center_after_drag(center, DVec2::new(100.0, 100.0), DVec2::new(105.0, 103.0));
        assert_eq!(panned, DVec2::new(5.0, 13.0));
    }
}
