use log::trace;
use serde::{Deserialize, Serialize};

use crate::collision::{Polygon, aabb_overlap, intersect};
use crate::config::WorldConfig;
use crate::dynamics::BodyHandle;
use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDef {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32, // 0 => immovable
    pub restitution: f32,
    pub is_static: bool,
    pub gravity_affected: bool,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 15.0,
            restitution: 0.5,
            is_static: false,
            gravity_affected: true,
        }
    }
}

impl BodyDef {
    /// Applies one authoring attribute.
    ///
    /// `static` makes the body immovable whatever its value. `mass`,
    /// `restitution` and `gravity` take a number / number / boolean.
    /// Other keys belong to other systems and are ignored.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "static" => {
                self.mass = 0.0;
                self.restitution = 0.0;
                self.is_static = true;
            }
            "mass" => {
                let mass = parse_number(name, value)?;
                if mass < 0.0 {
                    return Err(invalid(name, value));
                }
                self.mass = mass;
            }
            "restitution" => {
                let restitution = parse_number(name, value)?;
                if !(0.0..=1.0).contains(&restitution) {
                    return Err(invalid(name, value));
                }
                self.restitution = restitution;
            }
            "gravity" => {
                self.gravity_affected = value.trim().parse().map_err(|_| invalid(name, value))?;
            }
            _ => trace!("ignoring property {name:?}"),
        }
        Ok(())
    }

    pub fn from_properties<'a>(
        properties: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let mut def = Self::default();
        for (name, value) in properties {
            def.set_property(name, value)?;
        }
        Ok(def)
    }
}

fn invalid(name: &str, value: &str) -> PhysicsError {
    PhysicsError::InvalidProperty {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

fn parse_number(name: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(name, value))
}

/// Kinematic state saved at the end of each physics step. Render frames move
/// bodies ahead of it; the next physics step starts from it again.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub ground: Option<BodyHandle>,
    pub ground_normal: Vec2,
}

#[derive(Clone, Debug)]
pub struct Body {
    handle: BodyHandle,

    pub position: Vec2,
    pub velocity: Vec2,

    mass: f32,
    inv_mass: f32,
    pub restitution: f32,
    pub is_static: bool,
    pub gravity_affected: bool,

    /// Local-space collider, `None` until the body is initialized.
    pub collider: Option<Polygon>,
    pub ground: Option<BodyHandle>,
    pub ground_normal: Vec2,

    snapshot: Snapshot,
    initialized: bool,
}

impl Body {
    pub fn from_def(handle: BodyHandle, def: BodyDef) -> Self {
        let mut body = Self {
            handle,
            position: def.position,
            velocity: def.velocity,
            mass: 0.0,
            inv_mass: 0.0,
            restitution: def.restitution,
            is_static: def.is_static,
            gravity_affected: def.gravity_affected,
            collider: None,
            ground: None,
            ground_normal: Vec2::ZERO,
            snapshot: Snapshot::default(),
            initialized: false,
        };
        body.set_mass(def.mass);
        body.save_snapshot();
        body
    }

    #[inline]
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Mass 0 makes the body immovable by collisions.
    pub fn set_mass(&mut self, mass: f32) {
        debug_assert!(mass >= 0.0 && mass.is_finite(), "invalid mass {mass}");
        self.mass = mass;
        self.inv_mass = if mass == 0.0 { 0.0 } else { 1.0 / mass };
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.ground.is_some()
    }

    /// Only clearing has an effect; a body cannot become grounded without a ground.
    pub fn set_grounded(&mut self, grounded: bool) {
        if !grounded {
            self.ground = None;
        }
    }

    /// Drops links to `ground`, including the one kept in the snapshot.
    pub(crate) fn forget_ground(&mut self, ground: BodyHandle) {
        if self.ground == Some(ground) {
            self.ground = None;
        }
        if self.snapshot.ground == Some(ground) {
            self.snapshot.ground = None;
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    pub fn save_snapshot(&mut self) {
        self.snapshot = Snapshot {
            position: self.position,
            velocity: self.velocity,
            ground: self.ground,
            ground_normal: self.ground_normal,
        };
    }

    pub fn restore_snapshot(&mut self) {
        let Snapshot {
            position,
            velocity,
            ground,
            ground_normal,
        } = self.snapshot;
        self.position = position;
        self.velocity = velocity;
        self.ground = ground;
        self.ground_normal = ground_normal;
    }

    /// Damping, ground friction and gravity for one physics step.
    pub fn integrate_forces(&mut self, config: &WorldConfig) {
        if self.is_static || self.velocity.length() < config.rest_speed {
            self.velocity = Vec2::ZERO;
        }
        if self.is_static {
            return;
        }

        self.velocity *= config.damping;

        if self.is_grounded() {
            self.velocity.x *= config.ground_friction;
        }

        if self.gravity_affected {
            self.velocity.y += config.gravity;
        }
    }

    /// Bounding-box test at both bodies' current positions.
    pub fn intersect_bounds(&self, other: &Body) -> bool {
        match (&self.collider, &other.collider) {
            (Some(a), Some(b)) => aabb_overlap(a, self.position, b, other.position),
            _ => false,
        }
    }

    /// Separating-axis test at both bodies' current positions.
    pub fn intersect(&self, other: &Body) -> Option<Vec2> {
        intersect(
            self.collider.as_ref()?,
            self.position,
            other.collider.as_ref()?,
            other.position,
        )
    }
}
