//! Shift Master - A multiplayer sailing race simulation core
//!
//! Core modules:
//! - `geo`: 2D point helpers in the course's compass convention
//! - `polar`: Angle normalization and the boat's polar performance curve
//! - `sim`: Deterministic per-frame state update (steering, movement, gates)
//! - `protocol`: Race server wire messages (inbound snapshot, outbound boat)
//! - `platform`: Input sampling and browser bindings
//! - `host`: Session wrapping the pure step engine for a host loop
//! - `settings`: Player preferences

pub mod error;
pub mod geo;
pub mod host;
pub mod platform;
pub mod polar;
pub mod protocol;
pub mod settings;
pub mod sim;

pub use error::InputError;
pub use host::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Host clock rate (ticks per second)
    pub const TICK_HZ: f64 = 30.0;
    /// Nominal tick duration in seconds
    pub const TICK_DT: f64 = 1.0 / TICK_HZ;

    /// Share of the gap to the polar target closed each tick
    pub const VELOCITY_SMOOTHING: f64 = 0.02;

    /// Heading change per tick with an arrow key held (degrees)
    pub const COARSE_TURN: f64 = 3.0;
    /// Heading change per tick with shift held (degrees)
    pub const FINE_TURN: f64 = 1.0;
    /// Maximum heading change per tick while tacking toward a target (degrees)
    pub const TACK_TURN: f64 = 2.0;
    /// Tack target is reached when closer than this (degrees)
    pub const TACK_TOLERANCE: f64 = 0.1;

    /// Wake history length
    pub const WAKE_LENGTH: usize = 40;

    /// Camera refocus margins, as a share of the viewport dimension
    pub const CAMERA_MARGIN_X: f64 = 0.2;
    pub const CAMERA_MARGIN_Y: f64 = 0.4;

    /// Pointer drag debounce (milliseconds)
    pub const DRAG_DEBOUNCE_MS: f64 = 20.0;

    /// Boat starting position, south of the start line
    pub const START_POSITION: (f64, f64) = (0.0, -200.0);
}
