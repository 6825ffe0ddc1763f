//! Per-actor customization points.
//!
//! The world drives every actor through [`ActorHooks`]. Each hook has a
//! default, so an actor type only overrides what it changes.

use crate::collision::{Polygon, Resolution, resolve};
use crate::config::WorldConfig;
use crate::dynamics::{Body, Commands};
use crate::error::Result;
use crate::math::Vec2;

/// Rectangle in authoring (screen) space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Layout has not happened yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }
}

/// Whatever draws an actor: tells the simulation where the actor was authored
/// and learns where it ended up.
pub trait Presentation {
    fn rect(&self) -> Rect;

    /// Authoring-space to simulation-space factor.
    fn scale_from_screen(&self) -> f32 {
        1.0
    }

    fn set_position(&mut self, _position: Vec2) {}
}

/// Presentation with a fixed rectangle that remembers the last reported position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedRect {
    pub rect: Rect,
    pub scale: f32,
    pub reported: Option<Vec2>,
}

impl FixedRect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::new(position, size),
            scale: 1.0,
            reported: None,
        }
    }
}

impl Presentation for FixedRect {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn scale_from_screen(&self) -> f32 {
        self.scale
    }

    fn set_position(&mut self, position: Vec2) {
        self.reported = Some(position);
    }
}

pub trait ActorHooks {
    /// Builds the local-space collider. Runs at initialization and at the start
    /// of every physics step.
    fn create_collider(&mut self, _body: &Body, presentation: &dyn Presentation) -> Result<Polygon> {
        panel_collider(presentation)
    }

    /// Force integration for one physics step.
    fn simulate(&mut self, body: &mut Body, config: &WorldConfig, _commands: &mut Commands) {
        body.integrate_forces(config);
    }

    /// Runs every render frame before the frame's movement.
    fn frame_simulate(&mut self, _body: &mut Body, _commands: &mut Commands) {}

    /// Contact response of `this` against `other`.
    fn compute_collision(
        &mut self,
        this: &mut Body,
        other: &mut Body,
        displacement: Vec2,
        config: &WorldConfig,
    ) -> Resolution {
        resolve(this, other, displacement, config)
    }
}

/// Default actor: a rectangle taken from its presentation.
#[derive(Copy, Clone, Debug, Default)]
pub struct PanelCollider;

impl ActorHooks for PanelCollider {}

/// Actor approximated by a regular polygon.
#[derive(Copy, Clone, Debug)]
pub struct CircleCollider {
    pub sides: usize,
    pub radius: f32,
}

impl ActorHooks for CircleCollider {
    fn create_collider(&mut self, _body: &Body, _presentation: &dyn Presentation) -> Result<Polygon> {
        circle_collider(self.sides, self.radius)
    }
}

/// The presentation rectangle moved to the local origin and scaled into simulation space.
pub fn panel_collider(presentation: &dyn Presentation) -> Result<Polygon> {
    let rect = presentation.rect();
    let mut polygon = Polygon::rect(rect.position, rect.max())?;
    polygon.subtract(rect.position);
    polygon.scale_by(presentation.scale_from_screen());
    Ok(polygon)
}

/// Regular polygon whose bounding box starts at the local origin, like [`panel_collider`].
pub fn circle_collider(sides: usize, radius: f32) -> Result<Polygon> {
    let mut polygon = Polygon::regular(sides, radius)?;
    polygon.translate(Vec2::splat(radius));
    Ok(polygon)
}
