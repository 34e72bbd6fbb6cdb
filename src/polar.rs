//! Wind angles and the boat's polar performance curve
//!
//! The polar is an empirical cubic fit of boat speed against true wind speed
//! and the absolute angle to the wind, for the single boat class raced in
//! the game. The coefficients are the exact double values the race server
//! and every other client use, so results must not drift.

use crate::consts::VELOCITY_SMOOTHING;
use crate::geo::to_radians;

// Polar fit coefficients. `x1` is wind speed, `x2` is angle to wind.
const C_X1_3: f64 = -0.0008629353458;
const C_X1_2_X2: f64 = 0.000001150751365;
const C_X1_X2_2: f64 = 0.00015451549639999997;
const C_X2_3: f64 = 0.000015765085609999998;
const C_X2_A: f64 = 0.010136647430000001;
const C_X1_X2: f64 = 0.03818064169;
const C_X2_2: f64 = 0.0036616994530000004;
const C_X1: f64 = 0.6076025593000001;
const C_X2_B: f64 = 0.2385773381;
const C_0: f64 = 14.77328598;

/// Upwind and downwind VMG search ranges (degrees off the wind)
const UPWIND_RANGE: std::ops::RangeInclusive<i32> = 30..=60;
const DOWNWIND_RANGE: std::ops::RangeInclusive<i32> = 130..=180;

/// Round to the nearest whole degree (halves round up) and wrap into [0, 360)
pub fn ensure360(val: f64) -> f64 {
    let rounded = (val + 0.5).floor() as i64;
    rounded.wrapping_add(360).rem_euclid(360) as f64
}

/// Wrap into [0, 360) without rounding
///
/// `rem_euclid` yields exactly 360 for tiny negative inputs, which is folded
/// back to 0.
pub fn wrap360(val: f64) -> f64 {
    let wrapped = val.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed angle between heading and wind origin, in (-180, 180]
///
/// Only corrects a single turn of overshoot, which is all that can occur
/// when both inputs are already in [0, 360).
pub fn angle_to_wind(player_direction: f64, wind_origin: f64) -> f64 {
    let delta = player_direction - wind_origin;
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// Boat speed for a wind speed and absolute angle to the wind (degrees)
pub fn polar_velocity(speed: f64, angle: f64) -> f64 {
    let x1 = speed;
    let x2 = angle;
    let v = C_X1_3 * x1.powi(3) - C_X1_2_X2 * x1.powi(2) * x2 - C_X1_X2_2 * x1 * x2.powi(2)
        - C_X2_3 * x2.powi(3)
        + C_X2_A * x2
        + C_X1_X2 * x1 * x2
        + C_X2_2 * x2.powi(2)
        - C_X1 * x1
        - C_X2_B * x2
        + C_0;
    v * 2.0
}

/// Ease the previous boat speed toward the polar target
///
/// Only [`VELOCITY_SMOOTHING`] of the gap is closed per tick, which gives
/// the boat its inertia.
pub fn player_velocity(wind_speed: f64, wind_angle: f64, previous_velocity: f64) -> f64 {
    let target = polar_velocity(wind_speed, wind_angle.abs());
    previous_velocity + (target - previous_velocity) * VELOCITY_SMOOTHING
}

/// Velocity made good at `angle` off the wind
pub fn vmg_value(speed: f64, angle: f64) -> f64 {
    (to_radians(angle).cos() * polar_velocity(speed, angle)).abs()
}

/// Best upwind angle (30°..=60°) for the given wind speed
pub fn upwind_vmg(wind_speed: f64) -> f64 {
    best_vmg_angle(wind_speed, UPWIND_RANGE)
}

/// Best downwind angle (130°..=180°) for the given wind speed
pub fn downwind_vmg(wind_speed: f64) -> f64 {
    best_vmg_angle(wind_speed, DOWNWIND_RANGE)
}

fn best_vmg_angle(wind_speed: f64, range: std::ops::RangeInclusive<i32>) -> f64 {
    last_max(range.map(|a| {
        let angle = a as f64;
        (angle, vmg_value(wind_speed, angle))
    }))
    .unwrap_or(0.0)
}

/// Key of the maximum value; equal maxima resolve to the last one seen
fn last_max(items: impl Iterator<Item = (f64, f64)>) -> Option<f64> {
    items
        .fold(None, |best: Option<(f64, f64)>, (key, value)| match best {
            Some((_, best_value)) if value < best_value => best,
            _ => Some((key, value)),
        })
        .map(|(key, _)| key)
}

/// Meters per second to knots
pub fn mps_to_knots(mps: f64) -> f64 {
    mps * 3600.0 / 1.852 / 1000.0
}
