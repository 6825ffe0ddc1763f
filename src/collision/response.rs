use log::trace;

use crate::config::WorldConfig;
use crate::dynamics::Body;
use crate::math::Vec2;

/// What [`resolve`] did to a pair of bodies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The displacement had no direction.
    Skipped,
    /// The bodies were already moving apart along the normal.
    Separating { grounded: bool },
    /// Neither body can move.
    Immovable { grounded: bool },
    Applied {
        grounded: bool,
        /// Impulse magnitude before incline damping.
        impulse: f32,
        /// Correction direction and strength; each body moves by this times its inverse mass.
        correction: Vec2,
    },
}

impl Resolution {
    pub fn grounded(self) -> bool {
        match self {
            Resolution::Skipped => false,
            Resolution::Separating { grounded }
            | Resolution::Immovable { grounded }
            | Resolution::Applied { grounded, .. } => grounded,
        }
    }
}

/// Impulse response of `this` against `other`, where `displacement` is the
/// minimum translation that pushes `this` out of `other`.
///
/// Both bodies are updated. The caller runs this once from each side with the
/// displacement negated for the second call.
pub fn resolve(
    this: &mut Body,
    other: &mut Body,
    displacement: Vec2,
    config: &WorldConfig,
) -> Resolution {
    let normal = displacement.normalize();
    if normal.has_nan() {
        trace!("skipping degenerate contact {:?} -> {:?}", this.handle(), other.handle());
        return Resolution::Skipped;
    }

    // Mostly vertical normal: we are standing on (or hanging under) `other`.
    let grounded = normal.y.abs() > config.ground_threshold;
    if grounded {
        this.ground = Some(other.handle());
        this.ground_normal = normal;
    }

    let relative_velocity = this.velocity - other.velocity;
    let along_normal = relative_velocity.dot(normal);
    if along_normal > 0.0 {
        return Resolution::Separating { grounded };
    }

    let inv_mass_sum = this.inv_mass() + other.inv_mass();
    if inv_mass_sum == 0.0 {
        return Resolution::Immovable { grounded };
    }

    let restitution = this.restitution.min(other.restitution);
    let impulse = -(1.0 + restitution) * along_normal / inv_mass_sum;

    let mut incline = normal.dot(Vec2::UP).abs();
    if incline != 1.0 {
        incline *= config.incline_damping;
    }

    let p = incline * impulse * normal;
    other.velocity -= other.inv_mass() * p;
    this.velocity += this.inv_mass() * p;

    let depth = (displacement.length() - config.slop).max(0.0);
    let correction = normal * (config.correction_percent * depth / inv_mass_sum);
    other.position -= correction * other.inv_mass();
    this.position += correction * this.inv_mass();

    Resolution::Applied {
        grounded,
        impulse,
        correction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{BodyDef, BodyHandle};
    use approx::assert_relative_eq;

    fn body(handle: usize, mass: f32, restitution: f32, velocity: Vec2) -> Body {
        Body::from_def(
            BodyHandle(handle),
            BodyDef {
                mass,
                restitution,
                velocity,
                ..Default::default()
            },
        )
    }

    #[test]
    fn zero_displacement_is_skipped() {
        let mut a = body(0, 1.0, 0.5, Vec2::new(0.0, 1.0));
        let mut b = body(1, 1.0, 0.5, Vec2::ZERO);
        let r = resolve(&mut a, &mut b, Vec2::ZERO, &WorldConfig::default());

        assert_eq!(r, Resolution::Skipped);
        assert_eq!(a.velocity, Vec2::new(0.0, 1.0));
        assert!(a.ground.is_none());
    }

    #[test]
    fn elastic_vertical_collision_swaps_velocities() {
        let config = WorldConfig::default();
        let mut a = body(0, 1.0, 1.0, Vec2::new(0.0, 1.0));
        let mut b = body(1, 1.0, 1.0, Vec2::new(0.0, -1.0));
        let momentum = a.velocity.y * a.mass() + b.velocity.y * b.mass();

        // a sits above b.
        let d = Vec2::new(0.0, -0.5);
        let r = resolve(&mut a, &mut b, d, &config);
        assert!(matches!(r, Resolution::Applied { grounded: true, .. }));
        let r = resolve(&mut b, &mut a, -d, &config);
        assert!(matches!(r, Resolution::Separating { grounded: true }));

        assert_relative_eq!(a.velocity.y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(b.velocity.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(
            a.velocity.y * a.mass() + b.velocity.y * b.mass(),
            momentum,
            epsilon = 1e-6
        );

        assert_eq!(a.ground, Some(BodyHandle(1)));
        assert_eq!(b.ground, Some(BodyHandle(0)));
    }

    #[test]
    fn positional_correction_splits_by_inverse_mass() {
        let config = WorldConfig::default();
        let mut a = body(0, 1.0, 0.0, Vec2::new(0.0, 1.0));
        let mut b = body(1, 1.0, 0.0, Vec2::ZERO);

        resolve(&mut a, &mut b, Vec2::new(0.0, -0.51), &config);

        // depth 0.5, 60% removed, split evenly.
        assert_relative_eq!(a.position.y, -0.15, epsilon = 1e-5);
        assert_relative_eq!(b.position.y, 0.15, epsilon = 1e-5);
    }

    #[test]
    fn static_body_is_never_moved() {
        let config = WorldConfig::default();
        let mut wall = body(0, 0.0, 0.0, Vec2::ZERO);
        let mut ball = body(1, 2.0, 0.5, Vec2::new(0.0, -3.0));

        // Ball moving up into a ceiling; the ceiling pushes it back down.
        let d = Vec2::new(0.0, 0.3);
        resolve(&mut ball, &mut wall, d, &config);
        resolve(&mut wall, &mut ball, -d, &config);

        assert_eq!(wall.velocity, Vec2::ZERO);
        assert_eq!(wall.position, Vec2::ZERO);
        assert!(ball.velocity.y > -3.0);
        assert!(ball.position.y > 0.0);
    }

    #[test]
    fn two_static_bodies_are_immovable() {
        let config = WorldConfig::default();
        let mut a = body(0, 0.0, 0.0, Vec2::new(0.0, 1.0));
        let mut b = body(1, 0.0, 0.0, Vec2::ZERO);

        let r = resolve(&mut a, &mut b, Vec2::new(0.0, -0.5), &config);
        assert_eq!(r, Resolution::Immovable { grounded: true });
        assert_eq!(a.position, Vec2::ZERO);
        assert_eq!(b.position, Vec2::ZERO);
        assert!(a.velocity.is_finite());
    }

    #[test]
    fn horizontal_contact_is_damped_and_not_ground() {
        let config = WorldConfig::default();
        let mut a = body(0, 1.0, 0.0, Vec2::new(4.0, 0.0));
        let mut wall = body(1, 0.0, 0.0, Vec2::ZERO);

        let r = resolve(&mut a, &mut wall, Vec2::new(-0.2, 0.0), &config);

        assert!(!r.grounded());
        assert!(a.ground.is_none());
        // Purely horizontal normal: incline factor is zero.
        assert_relative_eq!(a.velocity.x, 4.0, epsilon = 1e-6);
        assert!(a.position.x < 0.0);
    }

    #[test]
    fn inclined_contact_uses_incline_damping() {
        let config = WorldConfig::default();
        let mut a = body(0, 1.0, 0.0, Vec2::new(0.0, 2.0));
        let mut slope = body(1, 0.0, 0.0, Vec2::ZERO);

        let d = Vec2::new(-0.3, -0.4);
        let r = resolve(&mut a, &mut slope, d, &config);
        let Resolution::Applied { impulse, grounded, .. } = r else {
            panic!("expected impulse, got {r:?}");
        };
        assert!(grounded);

        let n = d.normalize();
        let expected = Vec2::new(0.0, 2.0) + (0.8 * config.incline_damping) * impulse * n;
        assert_relative_eq!(a.velocity.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(a.velocity.y, expected.y, epsilon = 1e-6);
    }
}
