//! Shift Master entry point
//!
//! The browser build is driven by the page through `platform::web`. The
//! native binary runs a headless demo race with a simple autopilot:
//!
//! ```text
//! shift-master [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::DVec2;

    use shift_master::Session;
    use shift_master::consts::TICK_HZ;
    use shift_master::host::demo::DemoRace;
    use shift_master::polar::{angle_to_wind, downwind_vmg, ensure360, mps_to_knots, upwind_vmg};
    use shift_master::sim::{GameState, NextGate};

    /// Give up after this much race time (seconds)
    const TIME_LIMIT: f64 = 20.0 * 60.0;
    /// Heading error tolerated before turning (degrees)
    const DEAD_BAND: f64 = 2.0;
    /// Distance off the course axis before the autopilot tacks back
    const LANE_HALF_WIDTH: f64 = 250.0;

    /// Compass bearing from `from` to `to` (degrees)
    fn bearing(from: DVec2, to: DVec2) -> f64 {
        let d = to - from;
        ensure360(d.x.atan2(d.y).to_degrees())
    }

    /// Point just past the gate the boat has to cross next
    fn waypoint(state: &GameState) -> Option<DVec2> {
        let course = &state.course;
        let y = match state.player.next_gate(course.laps)? {
            NextGate::StartLine => course.downwind.y + 50.0,
            NextGate::Upwind => course.upwind.y + 50.0,
            NextGate::Downwind => course.downwind.y - 50.0,
        };
        Some(DVec2::new(0.0, y))
    }

    /// Heading the autopilot wants, sailing VMG angles outside the polar's
    /// sweet spot
    fn desired_heading(state: &GameState, target: DVec2) -> f64 {
        let player = &state.player;
        let direct = angle_to_wind(bearing(player.position, target), player.wind_origin);
        let upwind = upwind_vmg(player.wind_speed);
        let downwind = downwind_vmg(player.wind_speed);

        let current_side = if player.wind_angle < 0.0 { -1.0 } else { 1.0 };
        let off_lane = (player.position.x - target.x).abs() > LANE_HALF_WIDTH;
        // East component of a compass heading is its sine
        let heading_away = (player.position.x - target.x).signum()
            == player.direction.to_radians().sin().signum();
        let side = if off_lane && heading_away {
            -current_side
        } else {
            current_side
        };

        let angle = if direct.abs() < upwind {
            side * upwind
        } else if direct.abs() > downwind {
            side * downwind
        } else {
            direct
        };
        ensure360(player.wind_origin + angle)
    }

    fn steer(session: &mut Session) {
        let state = session.state();
        let Some(target) = waypoint(state) else {
            session.key("ArrowLeft", false);
            session.key("ArrowRight", false);
            return;
        };
        let error = angle_to_wind(desired_heading(state, target), state.player.direction);
        session.key("ArrowRight", error > DEAD_BAND);
        session.key("ArrowLeft", error < -DEAD_BAND);
    }

    pub fn run(seed: u64) -> Result<(), Box<dyn std::error::Error>> {
        let settings = shift_master::Settings::load();
        env_logger::Builder::new()
            .filter_level(settings.log_level())
            .parse_default_env()
            .init();

        log::info!("Shift Master (native) starting headless demo race...");
        let mut demo = DemoRace::new(seed);
        let mut session = Session::new(settings);

        let tick_ms = 1000.0 / TICK_HZ;
        let mut tick = 0u64;
        loop {
            let now_ms = tick as f64 * tick_ms;
            let now = now_ms / 1000.0;
            session.receive_race_message(&demo.message(now)?)?;
            steer(&mut session);
            let output = session.tick(now_ms)?;

            if session.finished() {
                let elapsed = output.passed_gates.first().copied().unwrap_or(now) - demo.start_time();
                log::info!("Finished in {elapsed:.1}s");
                println!("finished {elapsed:.1}s");
                break;
            }
            if now > TIME_LIMIT {
                log::warn!(
                    "Time limit reached with {} gates passed",
                    output.passed_gates.len()
                );
                println!("gave up after {} gates", output.passed_gates.len());
                break;
            }
            if tick % (TICK_HZ as u64 * 30) == 0 {
                log::info!(
                    "t={now:.0}s gates={} speed={:.1}kn",
                    output.passed_gates.len(),
                    mps_to_knots(output.velocity)
                );
            }
            tick += 1;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    headless::run(seed)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebSession, this is just to satisfy the compiler
}
