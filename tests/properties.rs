//! Property tests for the angle helpers, the polar and the step engine

use glam::DVec2;
use proptest::prelude::*;

use shift_master::consts::WAKE_LENGTH;
use shift_master::geo::in_box;
use shift_master::polar::{angle_to_wind, ensure360, player_velocity, polar_velocity};
use shift_master::protocol::RaceInput;
use shift_master::sim::{
    Arrows, Course, GameState, Gate, Input, KeyboardInput, Wind, is_stuck, step_game,
};

proptest! {
    #[test]
    fn ensure360_is_normalized_and_idempotent(x in -1.0e6..1.0e6f64) {
        let once = ensure360(x);
        prop_assert!((0.0..360.0).contains(&once));
        prop_assert_eq!(once.fract(), 0.0);
        prop_assert_eq!(ensure360(once), once);
    }

    #[test]
    fn angle_to_wind_is_signed_half_turn(direction in 0.0..360.0f64, origin in 0.0..360.0f64) {
        let angle = angle_to_wind(direction, origin);
        prop_assert!(angle > -180.0 && angle <= 180.0);
    }

    #[test]
    fn player_velocity_closes_the_gap(
        speed in 0.0..25.0f64,
        angle in -180.0..=180.0f64,
        previous in 0.0..80.0f64,
    ) {
        let target = polar_velocity(speed, angle.abs());
        let next = player_velocity(speed, angle, previous);
        prop_assert!((target - next).abs() <= (target - previous).abs());
        prop_assert!(next >= previous.min(target) && next <= previous.max(target));
    }

    #[test]
    fn corners_are_never_strictly_inside(
        x1 in -500.0..500.0f64, y1 in -500.0..500.0f64,
        x2 in -500.0..500.0f64, y2 in -500.0..500.0f64,
    ) {
        let c1 = DVec2::new(x1, y1);
        let c2 = DVec2::new(x2, y2);
        prop_assert!(!in_box(c1, (c1, c2)));
        prop_assert!(!in_box(c2, (c1, c2)));
    }

    #[test]
    fn steering_keeps_state_consistent(
        keys in prop::collection::vec((-1i32..=1, -1i32..=1, any::<bool>(), any::<bool>()), 1..120),
        wind_origin in 0.0..360.0f64,
        wind_speed in 0.0..25.0f64,
    ) {
        let course = Course {
            upwind: Gate { y: 800.0, width: 200.0 },
            downwind: Gate { y: -100.0, width: 200.0 },
            laps: 2,
            mark_radius: 5.0,
            islands: Vec::new(),
            bounds: (DVec2::new(1000.0, 1000.0), DVec2::new(-1000.0, -1000.0)),
        };
        let race = RaceInput {
            course: Some(course.clone()),
            wind: Wind { origin: wind_origin, speed: wind_speed, gusts: Vec::new() },
            ..RaceInput::empty(10.0, 0.0)
        };

        let mut state = GameState::new();
        for (x, y, tack, fine_turn) in keys {
            let input = Input {
                keyboard: KeyboardInput {
                    arrows: Arrows::new(x, y),
                    tack,
                    fine_turn,
                    ..Default::default()
                },
                ..Input::new(race.clone())
            };
            let next = step_game(&input, &state);
            let player = &next.player;

            prop_assert!((0.0..360.0).contains(&player.direction));
            prop_assert!(player.wind_angle > -180.0 && player.wind_angle <= 180.0);
            prop_assert!(player.wake.len() <= WAKE_LENGTH);
            prop_assert!(!is_stuck(player.position, &course));
            prop_assert!(player.passed_gates.len() as u64 <= course.finish_count());
            // Same input, same result
            prop_assert_eq!(&step_game(&input, &state), &next);
            state = next;
        }
    }
}
