//! Input sampling
//!
//! Raw events (keys, pointer, resize) update the sampler's state as they
//! arrive; [`InputSampler::sample`] turns that state into one [`Input`] per
//! tick. Timestamps are host milliseconds from any monotonic origin.

use std::collections::VecDeque;

use glam::DVec2;

use crate::consts::{DRAG_DEBOUNCE_MS, TICK_DT};
use crate::geo::Point;
use crate::protocol::RaceInput;
use crate::sim::input::{Arrows, Input, KeyboardInput, MouseInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Space,
    Shift,
    Spell,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a game key
    pub fn from_key_name(name: &str, spell_key: char) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "Enter" => Some(Key::Enter),
            " " => Some(Key::Space),
            "Shift" => Some(Key::Shift),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.eq_ignore_ascii_case(&spell_key) => Some(Key::Spell),
                    _ => None,
                }
            }
        }
    }
}

/// Which game keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    enter: bool,
    space: bool,
    shift: bool,
    spell: bool,
}

impl KeyboardState {
    pub fn set(&mut self, key: Key, pressed: bool) {
        let slot = match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Up => &mut self.up,
            Key::Down => &mut self.down,
            Key::Enter => &mut self.enter,
            Key::Space => &mut self.space,
            Key::Shift => &mut self.shift,
            Key::Spell => &mut self.spell,
        };
        *slot = pressed;
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn input(&self) -> KeyboardInput {
        KeyboardInput {
            arrows: Arrows::new(
                self.right as i32 - self.left as i32,
                self.up as i32 - self.down as i32,
            ),
            lock_angle: self.enter,
            tack: self.space,
            fine_turn: self.shift,
            spell_cast: self.spell,
        }
    }
}

/// Seconds between consecutive samples
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous call; one nominal tick on the first call
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0),
            None => TICK_DT,
        };
        self.last_ms = Some(now_ms);
        delta
    }
}

/// Whole seconds elapsed since the first sample
#[derive(Debug, Clone, Default)]
pub struct Chrono {
    start_ms: Option<f64>,
    seconds: f64,
}

impl Chrono {
    pub fn update(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = ((now_ms - start) / 1000.0).floor();
        // Never runs backwards
        self.seconds = self.seconds.max(elapsed);
        self.seconds
    }
}

/// Pointer drag with a fixed debounce delay
///
/// While the button is held, the drag origin reported for a sample at `t`
/// is the pointer position at `t - DRAG_DEBOUNCE_MS`.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    pressed_at: Option<f64>,
    /// Pointer positions since the press, oldest first
    history: VecDeque<(f64, Point)>,
}

impl DragTracker {
    pub fn press(&mut self, now_ms: f64, position: Point) {
        self.pressed_at = Some(now_ms);
        self.history.clear();
        self.history.push_back((now_ms, position));
    }

    pub fn moved(&mut self, now_ms: f64, position: Point) {
        if self.pressed_at.is_some() {
            self.history.push_back((now_ms, position));
        }
    }

    pub fn release(&mut self) {
        self.pressed_at = None;
        self.history.clear();
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Debounced drag origin, `None` when idle or just pressed
    pub fn drag(&mut self, now_ms: f64) -> Option<Point> {
        let pressed_at = self.pressed_at?;
        let cutoff = now_ms - DRAG_DEBOUNCE_MS;
        if pressed_at > cutoff {
            return None;
        }
        // Keep only the newest sample at or before the cutoff
        while self.history.len() > 1 && self.history[1].0 <= cutoff {
            self.history.pop_front();
        }
        self.history.front().map(|&(_, position)| position)
    }
}

/// Turns raw host events into one [`Input`] per tick
#[derive(Debug, Clone)]
pub struct InputSampler {
    clock: FrameClock,
    chrono: Chrono,
    keyboard: KeyboardState,
    drag: DragTracker,
    mouse: Point,
    viewport: DVec2,
}

impl InputSampler {
    pub fn new(viewport: DVec2) -> Self {
        Self {
            clock: FrameClock::default(),
            chrono: Chrono::default(),
            keyboard: KeyboardState::default(),
            drag: DragTracker::default(),
            mouse: DVec2::ZERO,
            viewport,
        }
    }

    pub fn key(&mut self, key: Key, pressed: bool) {
        self.keyboard.set(key, pressed);
    }

    pub fn release_keys(&mut self) {
        self.keyboard.clear();
    }

    pub fn pointer_down(&mut self, now_ms: f64, position: Point) {
        self.mouse = position;
        self.drag.press(now_ms, position);
    }

    pub fn pointer_move(&mut self, now_ms: f64, position: Point) {
        self.mouse = position;
        self.drag.moved(now_ms, position);
    }

    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    /// Sample everything for the tick at `now_ms`
    pub fn sample(&mut self, now_ms: f64, race: RaceInput) -> Input {
        Input {
            delta: self.clock.delta(now_ms),
            chrono: self.chrono.update(now_ms),
            keyboard: self.keyboard.input(),
            mouse: MouseInput {
                drag: self.drag.drag(now_ms),
                mouse: self.mouse,
            },
            viewport: self.viewport,
            race,
        }
    }
}
