//! Error types for platformer-physics-rs.

use thiserror::Error;

use crate::dynamics::BodyHandle;

/// Errors surfaced while building bodies and colliders.
///
/// Nothing in a physics step returns these: pair interactions that cannot be
/// resolved are skipped instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A polygon needs at least three points.
    #[error("polygon needs at least 3 points, got {points}")]
    DegeneratePolygon {
        /// Number of points supplied.
        points: usize,
    },

    /// A polygon point was NaN or infinite.
    #[error("polygon point {index} is not finite")]
    NonFinitePoint {
        /// Index of the offending point.
        index: usize,
    },

    /// A body property could not be parsed.
    #[error("invalid value {value:?} for property {name:?}")]
    InvalidProperty {
        /// Property key.
        name: String,
        /// Raw value.
        value: String,
    },

    /// No live body has this handle.
    #[error("no body with handle {0:?}")]
    UnknownBody(BodyHandle),
}

pub type Result<T, E = PhysicsError> = core::result::Result<T, E>;
