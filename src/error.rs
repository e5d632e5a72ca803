//! Failures reported by profile construction and distance-domain queries.

use thiserror::Error;

use crate::phase::Phase;

/// Errors produced while building or querying a motion profile
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// A construction limit is non-finite or outside its allowed range.
    #[error("invalid {name}: {value}")]
    InvalidLimit { name: &'static str, value: f64 },

    /// A distance query fell outside `[0, total]`.
    #[error("distance {distance} is outside of the profile range [0, {total}]")]
    DistanceOutOfRange { distance: f64, total: f64 },

    /// The local polynomial of a phase had no real root inside the phase duration.
    #[error("no root found in phase {phase} for distance {distance}")]
    NoRootInPhase { phase: Phase, distance: f64 },

    /// Sampling was requested with a backwards range or a non-positive step.
    #[error("invalid sample range: start {start}, end {end}, step {step}")]
    InvalidSampleRange { start: f64, end: f64, step: f64 },
}

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
