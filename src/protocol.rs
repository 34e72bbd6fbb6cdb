//! Race server wire messages
//!
//! Inbound: one [`RaceInput`] snapshot per tick (sampled, so repeats and
//! drops are fine). Outbound: one [`RaceOutput`] with the player's boat.
//!
//! Inbound validation is strict: every field must be present with the right
//! primitive type, including the nullable `course` and `playerSpell`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InputError;
use crate::geo::Point;
use crate::sim::state::{Buoy, Course, Opponent, Player, Spell, Wind};

/// Race server snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceInput {
    /// Server time (seconds)
    pub now: f64,
    /// Race start time (seconds)
    pub start_time: f64,
    /// Present at race start, `null` when unchanged
    #[serde(deserialize_with = "required_nullable")]
    pub course: Option<Course>,
    pub wind: Wind,
    pub opponents: Vec<Opponent>,
    pub buoys: Vec<Buoy>,
    #[serde(deserialize_with = "required_nullable")]
    pub player_spell: Option<Spell>,
    pub triggered_spells: Vec<Spell>,
    pub leaderboard: Vec<String>,
}

impl RaceInput {
    /// Parse and validate a snapshot
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, InputError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Snapshot with no course, wind or opponents, at the given times
    pub fn empty(now: f64, start_time: f64) -> Self {
        Self {
            now,
            start_time,
            course: None,
            wind: Wind::default(),
            opponents: Vec::new(),
            buoys: Vec::new(),
            player_spell: None,
            triggered_spells: Vec::new(),
            leaderboard: Vec::new(),
        }
    }
}

/// `Option` field that must still be present on the wire, possibly `null`
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Player state sent back to the server every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceOutput {
    pub position: Point,
    pub direction: f64,
    pub velocity: f64,
    pub passed_gates: Vec<f64>,
    pub spell_cast: bool,
}

impl From<&Player> for RaceOutput {
    fn from(player: &Player) -> Self {
        Self {
            position: player.position,
            direction: player.direction,
            velocity: player.velocity,
            passed_gates: player.passed_gates.clone(),
            spell_cast: player.spell_cast,
        }
    }
}

impl RaceOutput {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
