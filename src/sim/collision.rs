//! Obstacle and gate line checks
//!
//! A boat is blocked by the course edge, islands and gate marks. Race
//! progress comes from crossing gate lines between two consecutive
//! positions.

use crate::geo::{Point, distance};

use super::state::{Course, Gate, NextGate, Player};

/// True if the boat cannot occupy `p`
///
/// Gate marks block regardless of race state.
pub fn is_stuck(p: Point, course: &Course) -> bool {
    let out_of_bounds = !course.within_bounds(p);
    let on_island = course
        .islands
        .iter()
        .any(|island| distance(island.location, p) <= island.radius);
    let on_mark = course
        .gate_marks()
        .iter()
        .any(|&mark| distance(mark, p) <= course.mark_radius);
    out_of_bounds || on_mark || on_island
}

/// True if the step between `from` and `to` meets the gate line between
/// its marks
///
/// Only called once the two points are known to lie on opposite sides of
/// (or on) the gate line, so `to.y != from.y`.
fn crosses_between_marks(gate: &Gate, from: Point, to: Point) -> bool {
    let t = (gate.y - from.y) / (to.y - from.y);
    let x = from.x + (to.x - from.x) * t;
    x.abs() <= gate.width / 2.0
}

/// Crossed the gate line heading south
pub fn gate_passed_from_north(gate: &Gate, from: Point, to: Point) -> bool {
    from.y > gate.y && to.y <= gate.y && crosses_between_marks(gate, from, to)
}

/// Crossed the gate line heading north
pub fn gate_passed_from_south(gate: &Gate, from: Point, to: Point) -> bool {
    from.y < gate.y && to.y >= gate.y && crosses_between_marks(gate, from, to)
}

/// What a step did to race progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// The target gate was crossed in the right direction
    Passed,
    /// The previously passed gate was crossed back
    Regressed,
}

/// Check the step `from -> to` against the player's current target gate
pub fn gate_event(
    next: Option<NextGate>,
    course: &Course,
    from: Point,
    to: Point,
) -> Option<GateEvent> {
    match next? {
        NextGate::StartLine => {
            gate_passed_from_south(&course.downwind, from, to).then_some(GateEvent::Passed)
        }
        NextGate::Downwind => {
            if gate_passed_from_north(&course.downwind, from, to) {
                Some(GateEvent::Passed)
            } else if gate_passed_from_north(&course.upwind, from, to) {
                Some(GateEvent::Regressed)
            } else {
                None
            }
        }
        NextGate::Upwind => {
            if gate_passed_from_south(&course.upwind, from, to) {
                Some(GateEvent::Passed)
            } else if gate_passed_from_south(&course.downwind, from, to) {
                Some(GateEvent::Regressed)
            } else {
                None
            }
        }
    }
}

/// Passed gates after the step `from -> to` at server time `now`
pub fn passed_gates_after_step(
    player: &Player,
    now: f64,
    course: &Course,
    from: Point,
    to: Point,
) -> Vec<f64> {
    let mut passed = player.passed_gates.clone();
    match gate_event(player.next_gate(course.laps), course, from, to) {
        Some(GateEvent::Passed) => {
            log::info!("Gate {} passed at {now}", passed.len() + 1);
            passed.insert(0, now);
        }
        Some(GateEvent::Regressed) => {
            log::info!("Gate {} crossed back at {now}", passed.len());
            if !passed.is_empty() {
                passed.remove(0);
            }
        }
        None => {}
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Island;
    use glam::DVec2;

    fn course() -> Course {
        Course {
            upwind: Gate { y: 500.0, width: 100.0 },
            downwind: Gate { y: -100.0, width: 100.0 },
            laps: 2,
            mark_radius: 5.0,
            islands: vec![Island {
                location: DVec2::new(200.0, 200.0),
                radius: 30.0,
            }],
            bounds: (DVec2::new(400.0, 700.0), DVec2::new(-400.0, -300.0)),
        }
    }

    fn player_with_gates(count: usize) -> Player {
        Player {
            passed_gates: (0..count).map(|i| i as f64).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stuck_bounds() {
        let course = course();
        // Corners and edges are in bounds
        assert!(!is_stuck(DVec2::new(400.0, 700.0), &course));
        assert!(!is_stuck(DVec2::new(-400.0, -300.0), &course));
        // One unit outside any edge is stuck
        assert!(is_stuck(DVec2::new(401.0, 0.0), &course));
        assert!(is_stuck(DVec2::new(-401.0, 0.0), &course));
        assert!(is_stuck(DVec2::new(0.0, 701.0), &course));
        assert!(is_stuck(DVec2::new(0.0, -301.0), &course));
        assert!(!is_stuck(DVec2::new(0.0, 0.0), &course));
    }

    #[test]
    fn test_stuck_on_island() {
        let course = course();
        assert!(is_stuck(DVec2::new(200.0, 200.0), &course));
        assert!(is_stuck(DVec2::new(230.0, 200.0), &course));
        assert!(!is_stuck(DVec2::new(231.0, 200.0), &course));
    }

    #[test]
    fn test_stuck_on_mark() {
        let course = course();
        assert!(is_stuck(DVec2::new(50.0, 500.0), &course));
        assert!(is_stuck(DVec2::new(-53.0, -96.0), &course));
        assert!(!is_stuck(DVec2::new(56.0, 500.0), &course));
    }

    #[test]
    fn test_gate_passed_from_north() {
        let gate = Gate { y: 0.0, width: 100.0 };
        assert!(gate_passed_from_north(&gate, DVec2::new(10.0, 5.0), DVec2::new(12.0, -5.0)));
        // Landing exactly on the line counts
        assert!(gate_passed_from_north(&gate, DVec2::new(0.0, 5.0), DVec2::new(0.0, 0.0)));
        // Wrong direction
        assert!(!gate_passed_from_north(&gate, DVec2::new(10.0, -5.0), DVec2::new(12.0, 5.0)));
        // Outside the marks
        assert!(!gate_passed_from_north(&gate, DVec2::new(60.0, 5.0), DVec2::new(60.0, -5.0)));
        // Diagonal step whose intercept is inside the marks
        assert!(gate_passed_from_north(&gate, DVec2::new(60.0, 5.0), DVec2::new(40.0, -5.0)));
    }

    #[test]
    fn test_gate_passed_from_south() {
        let gate = Gate { y: 100.0, width: 20.0 };
        assert!(gate_passed_from_south(&gate, DVec2::new(0.0, 95.0), DVec2::new(1.0, 105.0)));
        assert!(!gate_passed_from_south(&gate, DVec2::new(0.0, 105.0), DVec2::new(1.0, 95.0)));
        assert!(!gate_passed_from_south(&gate, DVec2::new(-30.0, 95.0), DVec2::new(-30.0, 105.0)));
        // Vertical step exactly at a mark's x
        assert!(gate_passed_from_south(&gate, DVec2::new(10.0, 95.0), DVec2::new(10.0, 105.0)));
    }

    #[test]
    fn test_start_line_passage() {
        let course = course();
        let player = player_with_gates(0);
        let gates = passed_gates_after_step(
            &player,
            42.0,
            &course,
            DVec2::new(0.0, -105.0),
            DVec2::new(0.0, -95.0),
        );
        assert_eq!(gates, vec![42.0]);
    }

    #[test]
    fn test_downwind_passage_and_regression() {
        let course = course();
        let north = DVec2::new(0.0, -95.0);
        let south = DVec2::new(0.0, -105.0);

        // Crossing the downwind gate heading south records `now`, newest first
        let player = player_with_gates(1);
        let gates = passed_gates_after_step(&player, 77.0, &course, north, south);
        assert_eq!(gates, vec![77.0, 0.0]);

        // Crossing back north regresses
        let player = Player {
            passed_gates: gates,
            ..Default::default()
        };
        let gates = passed_gates_after_step(&player, 78.0, &course, south, north);
        assert_eq!(gates, vec![0.0]);
    }

    #[test]
    fn test_upwind_passage() {
        let course = course();
        let player = player_with_gates(2);
        let gates = passed_gates_after_step(
            &player,
            90.0,
            &course,
            DVec2::new(0.0, 495.0),
            DVec2::new(0.0, 505.0),
        );
        assert_eq!(gates.len(), 3);
        assert_eq!(gates[0], 90.0);
    }

    #[test]
    fn test_downwind_leg_upwind_crossed_back() {
        let course = course();
        let player = player_with_gates(3);
        let event = gate_event(
            player.next_gate(course.laps),
            &course,
            DVec2::new(0.0, 505.0),
            DVec2::new(0.0, 495.0),
        );
        assert_eq!(event, Some(GateEvent::Regressed));
    }

    #[test]
    fn test_finished_ignores_gates() {
        let course = course();
        let player = player_with_gates(5);
        let gates = passed_gates_after_step(
            &player,
            99.0,
            &course,
            DVec2::new(0.0, -95.0),
            DVec2::new(0.0, -105.0),
        );
        assert_eq!(gates.len(), 5);
    }

    #[test]
    fn test_no_crossing_without_movement() {
        let course = course();
        let p = DVec2::new(0.0, -100.0);
        assert_eq!(gate_event(Some(NextGate::Downwind), &course, p, p), None);
    }
}
