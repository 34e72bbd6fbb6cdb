//! Seeded demo race
//!
//! Stands in for the race server when running headless: a random course,
//! a shifting wind with drifting gusts, a start countdown and a couple of
//! opponents on fixed headings. The same seed always gives the same race.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::geo::move_point;
use crate::polar::{ensure360, wrap360};
use crate::protocol::RaceInput;
use crate::sim::state::{Course, Gate, Gust, Island, Opponent, Wind};

/// Seconds of countdown before the start signal
pub const COUNTDOWN: f64 = 10.0;

const OPPONENT_NAMES: [&str; 3] = ["Albatross", "Petrel", "Skua"];

/// Deterministic race server stand-in
pub struct DemoRace {
    rng: Pcg32,
    course: Course,
    wind: Wind,
    opponents: Vec<Opponent>,
    start_time: f64,
    last_now: Option<f64>,
    course_sent: bool,
}

impl DemoRace {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let course = random_course(&mut rng);
        let wind = random_wind(&mut rng, &course);
        let opponents = OPPONENT_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                // Alternate starboard and port tack
                let side = if i % 2 == 0 { 1.0 } else { -1.0 };
                Opponent {
                    position: DVec2::new((i as f64 - 1.0) * 60.0, -250.0),
                    direction: ensure360(side * rng.random_range(30.0..60.0_f64)),
                    velocity: rng.random_range(8.0..14.0),
                    passed_gates: Vec::new(),
                    name: name.to_string(),
                }
            })
            .collect();

        log::info!(
            "Demo race seed {seed}: {} laps, upwind gate at {:.0}",
            course.laps,
            course.upwind.y
        );

        Self {
            rng,
            course,
            wind,
            opponents,
            start_time: COUNTDOWN,
            last_now: None,
            course_sent: false,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Server snapshot at race time `now` (seconds)
    ///
    /// The course is only included in the first snapshot.
    pub fn snapshot(&mut self, now: f64) -> RaceInput {
        let delta = self.last_now.map_or(0.0, |last| (now - last).max(0.0));
        self.last_now = Some(now);
        self.advance(delta);

        let course = (!self.course_sent).then(|| self.course.clone());
        self.course_sent = true;

        RaceInput {
            now,
            start_time: self.start_time,
            course,
            wind: self.wind.clone(),
            opponents: self.opponents.clone(),
            leaderboard: self.opponents.iter().map(|o| o.name.clone()).collect(),
            ..RaceInput::empty(now, self.start_time)
        }
    }

    /// Snapshot encoded as a wire message
    pub fn message(&mut self, now: f64) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot(now))
    }

    fn advance(&mut self, delta: f64) {
        if delta <= 0.0 {
            return;
        }

        // Small random walk on the base wind
        let shift = self.rng.random_range(-0.5..=0.5) * delta;
        self.wind.origin = wrap360(self.wind.origin + shift);

        let drift_heading = ensure360(self.wind.origin + 180.0);
        let (top, bottom) = (self.course.upwind.y + 200.0, self.course.downwind.y - 300.0);
        for gust in &mut self.wind.gusts {
            gust.position = move_point(gust.position, delta, 4.0, drift_heading);
            if gust.position.y < bottom {
                gust.position.y = top;
            }
        }

        for opponent in &mut self.opponents {
            let next = move_point(opponent.position, delta, opponent.velocity, opponent.direction);
            if self.course.within_bounds(next) {
                opponent.position = next;
            } else {
                opponent.direction = ensure360(-opponent.direction);
            }
        }
    }
}

fn random_course(rng: &mut Pcg32) -> Course {
    let upwind_y = rng.random_range(800.0..1400.0_f64).round();
    let downwind_y = -100.0;
    let half_width = 1000.0;

    let islands = (0..rng.random_range(2..=4))
        .map(|_| {
            let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            Island {
                location: DVec2::new(
                    side * rng.random_range(300.0..700.0_f64).round(),
                    rng.random_range(150.0..upwind_y - 150.0).round(),
                ),
                radius: rng.random_range(30.0..80.0_f64).round(),
            }
        })
        .collect();

    Course {
        upwind: Gate {
            y: upwind_y,
            width: rng.random_range(150.0..250.0_f64).round(),
        },
        downwind: Gate {
            y: downwind_y,
            width: 200.0,
        },
        laps: rng.random_range(1..=3),
        mark_radius: 5.0,
        islands,
        bounds: (
            DVec2::new(half_width, upwind_y + 300.0),
            DVec2::new(-half_width, downwind_y - 400.0),
        ),
    }
}

fn random_wind(rng: &mut Pcg32, course: &Course) -> Wind {
    let gusts = (0..3)
        .map(|_| Gust {
            position: DVec2::new(
                rng.random_range(-800.0..800.0_f64).round(),
                rng.random_range(course.downwind.y..course.upwind.y).round(),
            ),
            angle: rng.random_range(-20.0..20.0_f64).round(),
            speed: rng.random_range(2.0..6.0_f64).round(),
            radius: rng.random_range(80.0..200.0_f64).round(),
        })
        .collect();

    Wind {
        origin: wrap360(rng.random_range(-10.0..10.0_f64)),
        speed: rng.random_range(8.0..16.0_f64).round(),
        gusts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_race() {
        let mut a = DemoRace::new(7);
        let mut b = DemoRace::new(7);
        for i in 0..20 {
            let now = i as f64 * 0.5;
            assert_eq!(a.snapshot(now), b.snapshot(now));
        }
    }

    #[test]
    fn test_wind_origin_stays_normalized() {
        for seed in 0..20 {
            let mut race = DemoRace::new(seed);
            for i in 0..200 {
                let origin = race.snapshot(i as f64 * 0.5).wind.origin;
                assert!((0.0..360.0).contains(&origin), "seed {seed}: {origin}");
            }
        }
    }

    #[test]
    fn test_course_sent_once() {
        let mut race = DemoRace::new(1);
        assert!(race.snapshot(0.0).course.is_some());
        assert!(race.snapshot(0.1).course.is_none());
    }

    #[test]
    fn test_start_is_clear() {
        for seed in 0..50 {
            let race = DemoRace::new(seed);
            let course = race.course();
            let start = DVec2::new(0.0, -200.0);
            assert!(!crate::sim::is_stuck(start, course), "seed {seed}");
            assert!((1..=3).contains(&course.laps));
        }
    }

    #[test]
    fn test_message_is_valid_input() {
        let mut race = DemoRace::new(3);
        let json = race.message(0.0).unwrap();
        let parsed = RaceInput::from_json(&json).unwrap();
        assert_eq!(parsed.start_time, COUNTDOWN);
        assert_eq!(parsed.leaderboard.len(), OPPONENT_NAMES.len());
    }
}
