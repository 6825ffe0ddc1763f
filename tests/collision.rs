use approx::assert_relative_eq;

use platformer_physics_rs::collision::{Polygon, aabb_overlap, intersect};
use platformer_physics_rs::math::{Vec2, random_range};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn unit_square() -> Polygon {
    Polygon::rect(Vec2::ZERO, Vec2::new(1.0, 1.0)).unwrap()
}

fn random_shape(rng: &mut StdRng) -> Polygon {
    if random_range(rng, 0.0, 1.0) < 0.5 {
        let w = random_range(rng, 0.2, 3.0);
        let h = random_range(rng, 0.2, 3.0);
        Polygon::rect(Vec2::ZERO, Vec2::new(w, h)).unwrap()
    } else {
        let sides = random_range(rng, 3.0, 12.0) as usize;
        Polygon::regular(sides, random_range(rng, 0.2, 2.0)).unwrap()
    }
}

fn random_position(rng: &mut StdRng) -> Vec2 {
    Vec2::new(random_range(rng, -3.0, 3.0), random_range(rng, -3.0, 3.0))
}

#[test]
fn integration_overlapping_squares_separate_along_x() {
    let a = unit_square();
    let b = unit_square();

    let d = intersect(&a, Vec2::ZERO, &b, Vec2::new(0.5, 0.0)).expect("squares overlap");
    assert_relative_eq!(d.length(), 0.5, epsilon = 1e-6);
    assert!(d.x < 0.0);

    let d = intersect(&b, Vec2::new(0.5, 0.0), &a, Vec2::ZERO).expect("squares overlap");
    assert!(d.x > 0.0);
}

#[test]
fn integration_far_squares_do_not_collide() {
    let a = unit_square();
    let b = unit_square();
    assert!(intersect(&a, Vec2::ZERO, &b, Vec2::new(5.0, 0.0)).is_none());
}

#[test]
fn aabb_overlap_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2_000 {
        let a = random_shape(&mut rng);
        let b = random_shape(&mut rng);
        let pa = random_position(&mut rng);
        let pb = random_position(&mut rng);

        assert_eq!(aabb_overlap(&a, pa, &b, pb), aabb_overlap(&b, pb, &a, pa));
    }
}

#[test]
fn sat_hits_are_always_aabb_hits() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut hits = 0;
    for _ in 0..2_000 {
        let a = random_shape(&mut rng);
        let b = random_shape(&mut rng);
        let pa = random_position(&mut rng);
        let pb = random_position(&mut rng);

        if intersect(&a, pa, &b, pb).is_some() {
            hits += 1;
            assert!(aabb_overlap(&a, pa, &b, pb));
        }
    }
    assert!(hits > 0, "generator never produced an overlap");
}

#[test]
fn displacement_points_away_from_other_shape() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..2_000 {
        let a = random_shape(&mut rng);
        let b = random_shape(&mut rng);
        let pa = random_position(&mut rng);
        let pb = random_position(&mut rng);

        if let Some(d) = intersect(&a, pa, &b, pb) {
            let towards_b = b.center(pb) - a.center(pa);
            assert!(d.dot(towards_b) <= 0.0);
            assert!(d.length() > 0.0);
        }
    }
}

#[test]
fn applying_displacement_removes_overlap() {
    let a = unit_square();
    let b = Polygon::regular(6, 0.8).unwrap();
    let pa = Vec2::new(0.2, 0.1);
    let pb = Vec2::new(1.0, 0.9);

    let d = intersect(&a, pa, &b, pb).expect("shapes overlap");
    // Push a bit further than needed so the result is strictly separated.
    let moved = pa + d * 1.01;
    assert!(intersect(&a, moved, &b, pb).is_none());
}
