//! Input record for a single tick
//!
//! Everything the step engine reads from the outside world, sampled once
//! per tick by the host.

use glam::DVec2;

use crate::consts::TICK_DT;
use crate::geo::Point;
use crate::protocol::RaceInput;

/// Arrow key state, each axis in -1..=1 (right and up are positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arrows {
    pub x: i32,
    pub y: i32,
}

impl Arrows {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.clamp(-1, 1),
            y: y.clamp(-1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardInput {
    pub arrows: Arrows,
    /// Enter: hold the current angle to the wind
    pub lock_angle: bool,
    /// Space: tack or jibe
    pub tack: bool,
    /// Shift: slow turns
    pub fine_turn: bool,
    pub spell_cast: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseInput {
    /// Pointer position as it was one debounce interval ago, while dragging
    pub drag: Option<Point>,
    /// Current pointer position (screen pixels, y down)
    pub mouse: Point,
}

/// Everything needed to advance one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    /// Seconds since the previous tick
    pub delta: f64,
    /// Whole seconds since the session started
    pub chrono: f64,
    pub keyboard: KeyboardInput,
    pub mouse: MouseInput,
    /// Window size (width, height)
    pub viewport: DVec2,
    pub race: RaceInput,
}

impl Input {
    /// Input for one nominal tick with no keys, mouse or window
    pub fn new(race: RaceInput) -> Self {
        Self {
            delta: TICK_DT,
            chrono: 0.0,
            keyboard: KeyboardInput::default(),
            mouse: MouseInput::default(),
            viewport: DVec2::ZERO,
            race,
        }
    }
}
