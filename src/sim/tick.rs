//! Per-tick state transition
//!
//! `step_game` is a pure function of the tick input and the previous state.
//! It runs five steps in order, each taking the state produced by the one
//! before: race merge, wind, keyboard steering, movement, mouse pan.

use glam::DVec2;

use super::camera::{center_after_drag, center_after_move};
use super::collision::{is_stuck, passed_gates_after_step};
use super::input::{Arrows, Input, KeyboardInput, MouseInput};
use super::state::{ControlMode, GameState, Player, Wind};
use crate::consts::*;
use crate::geo::{distance, move_point};
use crate::polar::{angle_to_wind, ensure360, player_velocity, wrap360};
use crate::protocol::RaceInput;

/// Advance the game by one tick
pub fn step_game(input: &Input, state: &GameState) -> GameState {
    let state = race_input_step(&input.race, state.clone());
    let state = wind_step(&input.race.wind, state);
    let state = keys_step(&input.keyboard, state);
    let state = move_step(input.race.now, input.delta, input.viewport, state);
    mouse_step(&input.mouse, state)
}

/// Take the server's view of everything but the player's boat
pub fn race_input_step(race: &RaceInput, state: GameState) -> GameState {
    GameState {
        opponents: race.opponents.clone(),
        buoys: race.buoys.clone(),
        player_spell: race.player_spell.clone(),
        triggered_spells: race.triggered_spells.clone(),
        course: race.course.clone().unwrap_or(state.course),
        leaderboard: race.leaderboard.clone(),
        countdown: race.start_time - race.now,
        ..state
    }
}

/// Set the wind and what the boat feels of it
pub fn wind_step(wind: &Wind, state: GameState) -> GameState {
    let player = player_wind(wind, state.player);
    GameState {
        wind: wind.clone(),
        player,
        ..state
    }
}

/// Wind felt at the boat: the first gust covering it, else the base wind
fn player_wind(wind: &Wind, player: Player) -> Player {
    let gust = wind
        .gusts
        .iter()
        .find(|gust| distance(player.position, gust.position) < gust.radius);
    let (wind_origin, wind_speed) = match gust {
        Some(gust) => (ensure360(gust.angle), wind.speed + gust.speed),
        None => (wrap360(wind.origin), wind.speed),
    };
    Player {
        wind_origin,
        wind_speed,
        ..player
    }
}

/// Apply steering keys
pub fn keys_step(keyboard: &KeyboardInput, state: GameState) -> GameState {
    let inverted = state.steering_inverted();
    let player = steer_player(keyboard, inverted, state.player);
    GameState { player, ..state }
}

fn steer_player(keyboard: &KeyboardInput, inverted: bool, player: Player) -> Player {
    let force_turn = keyboard.arrows.x != 0;
    let tack_pressed = keyboard.tack && !player.tack_key_down;

    let tack_target = if force_turn {
        None
    } else {
        tack_target(&player, tack_pressed)
    };

    let turn = turn_amount(tack_target, &player, keyboard.arrows, keyboard.fine_turn);
    let turn = if inverted { -turn } else { turn };

    let direction = ensure360(player.direction + turn);
    let wind_angle = angle_to_wind(direction, player.wind_origin);
    let turned = Player {
        direction,
        wind_angle,
        ..player
    };

    let tack_target = if tack_target_reached(&turned, tack_target) {
        None
    } else {
        tack_target
    };

    let control_mode = if force_turn {
        ControlMode::FixedDirection
    } else if keyboard.arrows.y > 0 || keyboard.lock_angle {
        ControlMode::FixedWindAngle
    } else {
        turned.control_mode
    };

    Player {
        control_mode,
        tack_target,
        tack_key_down: keyboard.tack,
        spell_cast: keyboard.spell_cast,
        ..turned
    }
}

/// Keep, drop or start a tack target
///
/// A new target is the mirror image of the current course on the other
/// tack: a heading under `FixedDirection`, a wind angle under
/// `FixedWindAngle`.
fn tack_target(player: &Player, tack_pressed: bool) -> Option<f64> {
    match player.tack_target {
        Some(_) if tack_target_reached(player, player.tack_target) => None,
        Some(target) => Some(target),
        None if tack_pressed => Some(match player.control_mode {
            ControlMode::FixedDirection => ensure360(player.wind_origin - player.wind_angle),
            ControlMode::FixedWindAngle => -player.wind_angle,
        }),
        None => None,
    }
}

fn tack_target_reached(player: &Player, target: Option<f64>) -> bool {
    match (target, player.control_mode) {
        (Some(target), ControlMode::FixedDirection) => {
            (target - player.direction).abs() < TACK_TOLERANCE
        }
        (Some(target), ControlMode::FixedWindAngle) => {
            (target - player.wind_angle).abs() < TACK_TOLERANCE
        }
        (None, _) => false,
    }
}

/// Heading change for this tick (degrees, clockwise positive)
fn turn_amount(tack_target: Option<f64>, player: &Player, arrows: Arrows, fine_turn: bool) -> f64 {
    if let Some(target) = tack_target {
        return match player.control_mode {
            ControlMode::FixedDirection => {
                let max_turn = TACK_TURN.min((player.direction - target).abs());
                if ensure360(player.direction - target) > 180.0 {
                    max_turn
                } else {
                    -max_turn
                }
            }
            ControlMode::FixedWindAngle => {
                // Tacks go through the wind, jibes through dead downwind
                let max_turn = TACK_TURN.min((player.wind_angle - target).abs());
                if target > 90.0 || (target < 0.0 && target >= -90.0) {
                    -max_turn
                } else {
                    max_turn
                }
            }
        };
    }

    match (player.control_mode, arrows.x, arrows.y) {
        (ControlMode::FixedDirection, 0, 0) => 0.0,
        // Follow wind shifts to hold the angle
        (ControlMode::FixedWindAngle, 0, 0) => {
            player.wind_origin + player.wind_angle - player.direction
        }
        _ => {
            let rate = if fine_turn { FINE_TURN } else { COARSE_TURN };
            arrows.x as f64 * rate
        }
    }
}

/// Move the boat, update race progress and the follow camera
pub fn move_step(now: f64, delta: f64, viewport: DVec2, state: GameState) -> GameState {
    let player = move_player(now, delta, viewport, &state);
    GameState { player, ..state }
}

fn move_player(now: f64, delta: f64, viewport: DVec2, state: &GameState) -> Player {
    let player = &state.player;
    let position = player.position;

    let velocity = player_velocity(player.wind_speed, player.wind_angle, player.velocity);
    let next_position = move_point(position, delta, velocity, player.direction);
    let stuck = is_stuck(next_position, &state.course);
    let new_position = if stuck { position } else { next_position };

    let mut wake = Vec::with_capacity(WAKE_LENGTH);
    wake.push(new_position);
    wake.extend(player.wake.iter().copied().take(WAKE_LENGTH - 1));

    let passed_gates = if state.race_started() {
        passed_gates_after_step(player, now, &state.course, position, new_position)
    } else {
        player.passed_gates.clone()
    };

    let center = center_after_move(position, new_position, player.center, viewport);

    Player {
        position: new_position,
        velocity: if stuck { 0.0 } else { velocity },
        center,
        wake,
        passed_gates,
        ..player.clone()
    }
}

/// Pan the camera while the pointer is dragged
pub fn mouse_step(mouse: &MouseInput, state: GameState) -> GameState {
    match mouse.drag {
        Some(drag) => {
            let center = center_after_drag(state.player.center, drag, mouse.mouse);
            GameState {
                player: Player {
                    center,
                    ..state.player
                },
                ..state
            }
        }
        None => state,
    }
}
