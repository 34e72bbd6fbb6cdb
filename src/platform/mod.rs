//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input sampling (keys, pointer drag, window size, frame clock)
//! - Browser bindings (wasm32 only)

pub mod sampler;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sampler::{InputSampler, Key};
