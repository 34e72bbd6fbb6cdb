//! Host session
//!
//! Wraps the pure step engine with the state a host loop needs between
//! ticks: the current [`GameState`], the input sampler and the latest
//! valid race snapshot.

pub mod demo;

use glam::DVec2;

use crate::error::InputError;
use crate::platform::InputSampler;
use crate::protocol::{RaceInput, RaceOutput};
use crate::settings::Settings;
use crate::sim::{GameState, step_game};

pub struct Session {
    state: GameState,
    sampler: InputSampler,
    race: Option<RaceInput>,
    settings: Settings,
    ticks: u64,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        log::info!("Session started");
        Self {
            state: GameState::new(),
            sampler: InputSampler::new(settings.viewport()),
            race: None,
            settings,
            ticks: 0,
        }
    }

    /// Validate and store a race server message
    ///
    /// A rejected message leaves the previous snapshot in place.
    pub fn receive_race_message(&mut self, json: &str) -> Result<(), InputError> {
        match RaceInput::from_json(json) {
            Ok(race) => {
                self.receive_race_input(race);
                Ok(())
            }
            Err(e) => {
                log::warn!("Rejected race message: {e}");
                Err(e)
            }
        }
    }

    /// Store an already validated snapshot
    pub fn receive_race_input(&mut self, race: RaceInput) {
        if self.race.is_none() {
            log::info!("First race snapshot received");
        }
        // A course only arrives once; keep it for later snapshots sent with `null`
        if race.course.is_some() || self.race.is_none() {
            self.race = Some(race);
        } else if let Some(previous) = self.race.take() {
            self.race = Some(RaceInput {
                course: previous.course,
                ..race
            });
        }
    }

    /// Advance one tick at host time `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> Result<RaceOutput, InputError> {
        let race = self.race.clone().ok_or(InputError::NoRaceSnapshot)?;
        let input = self.sampler.sample(now_ms, race);
        let was_finished = self.finished();

        self.state = step_game(&input, &self.state);
        self.ticks += 1;

        if !was_finished && self.finished() {
            log::info!("Race finished after {} ticks", self.ticks);
        }
        log::debug!(
            "tick {} pos=({:.1}, {:.1}) dir={} v={:.2}",
            self.ticks,
            self.state.player.position.x,
            self.state.player.position.y,
            self.state.player.direction,
            self.state.player.velocity
        );

        Ok(RaceOutput::from(&self.state.player))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings; key bindings apply to the next key event
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether the player has passed every gate
    pub fn finished(&self) -> bool {
        self.race.is_some() && self.state.player.has_finished(self.state.course.laps)
    }

    /// Forward a key event by DOM key name; unbound keys are ignored
    pub fn key(&mut self, name: &str, pressed: bool) {
        if let Some(key) = self.settings.key_for(name) {
            self.sampler.key(key, pressed);
        }
    }

    /// Release all keys, e.g. on window blur
    pub fn release_keys(&mut self) {
        self.sampler.release_keys();
    }

    pub fn pointer_down(&mut self, now_ms: f64, x: f64, y: f64) {
        self.sampler.pointer_down(now_ms, DVec2::new(x, y));
    }

    pub fn pointer_move(&mut self, now_ms: f64, x: f64, y: f64) {
        self.sampler.pointer_move(now_ms, DVec2::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.sampler.pointer_up();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.sampler.resize(width, height);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
