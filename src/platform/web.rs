//! Browser bindings
//!
//! The page owns the network socket, the canvas and the animation frame
//! loop; it forwards events and race messages here and draws from the
//! state JSON.

use wasm_bindgen::prelude::*;

use crate::host::Session;
use crate::settings::Settings;

/// Install the panic hook and console logger once per page
fn init_logging(settings: &Settings) {
    console_error_panic_hook::set_once();
    if let Some(level) = settings.log_level().to_level() {
        // Already initialized when several sessions are created
        let _ = console_log::init_with_level(level);
    }
}

/// Milliseconds from the page's performance clock
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let settings = Settings::load();
        init_logging(&settings);
        log::info!("Shift Master starting...");
        WebSession {
            session: Session::new(settings),
        }
    }

    /// Feed one race server message (JSON)
    #[wasm_bindgen(js_name = receiveRaceMessage)]
    pub fn receive_race_message(&mut self, json: &str) -> Result<(), JsValue> {
        self.session
            .receive_race_message(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Advance one tick; returns the outbound message as JSON
    pub fn tick(&mut self) -> Result<String, JsValue> {
        let output = self
            .session
            .tick(now_ms())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        output.to_json().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Full game state as JSON for the renderer
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) {
        self.session.key(key, true);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) {
        self.session.key(key, false);
    }

    /// Window lost focus: key-up events will not arrive
    pub fn blur(&mut self) {
        self.session.release_keys();
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session.pointer_down(now_ms(), x, y);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.pointer_move(now_ms(), x, y);
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.resize(width, height);
    }

    #[wasm_bindgen(js_name = setSpellKey)]
    pub fn set_spell_key(&mut self, key: char) {
        let settings = Settings {
            spell_key: key,
            ..self.session.settings().clone()
        };
        settings.save();
        self.session.set_settings(settings);
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
