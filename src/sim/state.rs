//! Game state and core race types
//!
//! The whole game is one [`GameState`] value. Course, wind and opponents
//! mirror the race server; the player's boat is the only locally simulated
//! entity.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::START_POSITION;
use crate::geo::{Box2, Point};

/// How steering holds the boat between key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Keep the compass heading
    #[default]
    FixedDirection,
    /// Keep the angle to the wind, following wind shifts
    FixedWindAngle,
}

/// The gate the boat has to cross next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextGate {
    StartLine,
    Downwind,
    Upwind,
}

/// Spell kinds carried by buoys and triggered by the server
///
/// Tags the client has no effect for are kept verbatim so they still
/// round-trip to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpellKind {
    /// Reduced visibility around the boat
    Fog,
    /// Steering input is inverted
    PoleInversion,
    Other(String),
}

impl SpellKind {
    pub fn as_str(&self) -> &str {
        match self {
            SpellKind::Fog => "Fog",
            SpellKind::PoleInversion => "PoleInversion",
            SpellKind::Other(kind) => kind,
        }
    }

    /// Whether this spell flips the sign of every turn
    pub fn inverts_steering(&self) -> bool {
        matches!(self, SpellKind::PoleInversion)
    }

    /// Whether this spell hides the course around the boat
    pub fn obscures_view(&self) -> bool {
        matches!(self, SpellKind::Fog)
    }
}

impl From<String> for SpellKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "Fog" => SpellKind::Fog,
            "PoleInversion" => SpellKind::PoleInversion,
            _ => SpellKind::Other(kind),
        }
    }
}

impl From<SpellKind> for String {
    fn from(kind: SpellKind) -> Self {
        match kind {
            SpellKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub kind: SpellKind,
}

impl Spell {
    pub fn new(kind: SpellKind) -> Self {
        Self { kind }
    }
}

/// True if any spell in the list has the given kind
pub fn contains_spell(kind: &SpellKind, spells: &[Spell]) -> bool {
    spells.iter().any(|spell| &spell.kind == kind)
}

/// A localized zone of modified wind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gust {
    pub position: Point,
    /// Wind origin inside the gust (degrees)
    pub angle: f64,
    /// Added to the base wind speed
    pub speed: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    /// Direction the wind blows from (degrees)
    pub origin: f64,
    pub speed: f64,
    pub gusts: Vec<Gust>,
}

/// A gate: the horizontal line between two marks at `(±width/2, y)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gate {
    pub y: f64,
    pub width: f64,
}

impl Gate {
    /// Left and right marks
    pub fn marks(&self) -> (Point, Point) {
        (
            DVec2::new(-self.width / 2.0, self.y),
            DVec2::new(self.width / 2.0, self.y),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub location: Point,
    pub radius: f64,
}

/// Course geometry, sent once by the server at race start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub upwind: Gate,
    pub downwind: Gate,
    pub laps: u32,
    pub mark_radius: f64,
    pub islands: Vec<Island>,
    /// Two opposite corners of the race area
    pub bounds: Box2,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            upwind: Gate::default(),
            downwind: Gate::default(),
            laps: 0,
            mark_radius: 0.0,
            islands: Vec::new(),
            bounds: (DVec2::ZERO, DVec2::ZERO),
        }
    }
}

impl Course {
    /// All four gate marks, upwind pair first
    pub fn gate_marks(&self) -> [Point; 4] {
        let (ul, ur) = self.upwind.marks();
        let (dl, dr) = self.downwind.marks();
        [ul, ur, dl, dr]
    }

    /// True if `p` is within the race area, edges included
    pub fn within_bounds(&self, p: Point) -> bool {
        let (c1, c2) = self.bounds;
        let min = c1.min(c2);
        let max = c1.max(c2);
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Number of gate passages that completes the race
    pub fn finish_count(&self) -> u64 {
        finish_count(self.laps)
    }
}

/// Another racer, mirrored from the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opponent {
    pub position: Point,
    pub direction: f64,
    pub velocity: f64,
    pub passed_gates: Vec<f64>,
    pub name: String,
}

/// A pickup carrying a spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buoy {
    pub position: Point,
    pub radius: f64,
    pub spell: Spell,
}

/// The local player's boat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub position: Point,
    /// Compass heading (degrees, [0, 360))
    pub direction: f64,
    pub velocity: f64,
    /// Heading relative to the felt wind (degrees, (-180, 180])
    pub wind_angle: f64,
    /// Wind origin felt at the boat, gusts included (degrees, [0, 360))
    pub wind_origin: f64,
    pub wind_speed: f64,
    pub control_mode: ControlMode,
    /// Heading or wind angle being tacked toward, depending on control mode
    pub tack_target: Option<f64>,
    /// Tack key state on the previous tick
    #[serde(default)]
    pub tack_key_down: bool,
    /// Gate passage timestamps (newest first)
    pub passed_gates: Vec<f64>,
    /// Recent positions (newest first)
    pub wake: Vec<Point>,
    /// Camera center
    pub center: Point,
    pub spell_cast: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: DVec2::new(START_POSITION.0, START_POSITION.1),
            direction: 0.0,
            velocity: 0.0,
            wind_angle: 0.0,
            wind_origin: 0.0,
            wind_speed: 0.0,
            control_mode: ControlMode::FixedDirection,
            tack_target: None,
            tack_key_down: false,
            passed_gates: Vec::new(),
            wake: Vec::new(),
            center: DVec2::ZERO,
            spell_cast: false,
        }
    }
}

impl Player {
    /// Gate to cross next, `None` once the race is finished
    pub fn next_gate(&self, laps: u32) -> Option<NextGate> {
        find_next_gate(self, laps)
    }

    pub fn has_finished(&self, laps: u32) -> bool {
        self.next_gate(laps).is_none()
    }
}

/// Gate passages in a race of `laps` laps: the start plus two per lap
///
/// Computed in `u64` so it cannot overflow for any `u32` lap count.
pub fn finish_count(laps: u32) -> u64 {
    u64::from(laps) * 2 + 1
}

/// Race progress, derived only from how many gates have been passed
pub fn find_next_gate(player: &Player, laps: u32) -> Option<NextGate> {
    let count = player.passed_gates.len() as u64;
    if count == finish_count(laps) {
        None
    } else if count == 0 {
        Some(NextGate::StartLine)
    } else if count % 2 == 1 {
        Some(NextGate::Downwind)
    } else {
        Some(NextGate::Upwind)
    }
}

/// Complete game state, replaced wholesale every tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub wind: Wind,
    pub player: Player,
    pub opponents: Vec<Opponent>,
    pub buoys: Vec<Buoy>,
    pub course: Course,
    pub leaderboard: Vec<String>,
    /// Seconds until the start; zero or negative once racing
    pub countdown: f64,
    pub player_spell: Option<Spell>,
    pub triggered_spells: Vec<Spell>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the start signal has been given
    pub fn race_started(&self) -> bool {
        self.countdown <= 0.0
    }

    /// Whether a currently triggered spell inverts steering
    pub fn steering_inverted(&self) -> bool {
        self.triggered_spells
            .iter()
            .any(|spell| spell.kind.inverts_steering())
    }
}
