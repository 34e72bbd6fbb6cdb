//! Input validation errors
//!
//! The step engine itself is total; the only failures are at the boundary
//! where race server messages come in.

/// Failure to accept race input for a tick
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The race snapshot does not match its shape or primitive types
    #[error("invalid race input: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A tick was requested before any valid race snapshot arrived
    #[error("no race snapshot received yet")]
    NoRaceSnapshot,
}
