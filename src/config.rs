//! Tuning constants for the actor simulation.

use serde::{Deserialize, Serialize};

/// Per-world tuning. The defaults are the values the platformer was tuned with;
/// several of them (gravity, friction) are applied per physics step rather than
/// per second, so they assume a fixed physics cadence.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Added to `velocity.y` of gravity-affected bodies every physics step.
    pub gravity: f32,
    /// Global velocity damping per physics step.
    pub damping: f32,
    /// Extra horizontal damping while grounded.
    pub ground_friction: f32,
    /// Below this speed a body is snapped to rest.
    pub rest_speed: f32,
    /// Movement sub-steps per physics step.
    pub physics_substeps: u32,
    /// Movement sub-steps per render frame.
    pub frame_substeps: u32,
    /// Contacts with `|normal.y|` above this count as standing on ground.
    pub ground_threshold: f32,
    /// Impulse scale for contacts whose normal is not exactly vertical.
    pub incline_damping: f32,
    /// Penetration allowed before positional correction kicks in.
    pub slop: f32,
    /// Fraction of the penetration removed per resolution.
    pub correction_percent: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 15.7,
            damping: 0.99,
            ground_friction: 0.97,
            rest_speed: 0.3,
            physics_substeps: 3,
            frame_substeps: 1,
            ground_threshold: 0.5,
            incline_damping: 0.044,
            slop: 0.01,
            correction_percent: 0.6,
        }
    }
}
