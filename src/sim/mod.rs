//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One state in, one state out per tick
//! - Time only enters through the tick input
//! - No rendering, clock or platform dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{GateEvent, gate_event, is_stuck};
pub use input::{Arrows, Input, KeyboardInput, MouseInput};
pub use state::{
    Buoy, ControlMode, Course, GameState, Gate, Gust, Island, NextGate, Opponent, Player, Spell,
    SpellKind, Wind, contains_spell, find_next_gate,
};
pub use tick::step_game;
