use approx::assert_relative_eq;

use platformer_physics_rs::math::{Vec2, random_range};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn public_math_api_smoke() {
    let v = Vec2::new(3.0, 4.0);
    let n = v.normalize();
    assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
    assert_relative_eq!(n.dot(n.perp()), 0.0, epsilon = 1e-6);
}

#[test]
fn up_is_vertical_axis() {
    assert_relative_eq!(Vec2::UP.dot(Vec2::new(0.0, -1.0)).abs(), 1.0);
    assert_relative_eq!(Vec2::UP.dot(Vec2::new(1.0, 0.0)), 0.0);
}

#[test]
fn random_range_is_public() {
    let mut rng = StdRng::seed_from_u64(1);
    let v = random_range(&mut rng, 0.0, 1.0);
    assert!((0.0..=1.0).contains(&v));
}
