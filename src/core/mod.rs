// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod outcome;
pub mod state;

// Re-export public types for convenient access via `quantsim::core::TypeName`
pub use error::SimError;
pub use outcome::{Delivery, JointSpin, Outcome, ParityOutcome, Spin};
pub use state::AmplitudeState;

pub mod constants;
pub use constants::sim_constants::{CLIP_EPSILON, DEFAULT_SEED, DEFAULT_TOLERANCE, DEFAULT_TRIALS, NORM_TOLERANCE, PI};
